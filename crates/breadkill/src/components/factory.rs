use glam::Vec2;

use crate::api::config::EntityParams;
use crate::api::types::EntityId;
use crate::components::entity::{Bullet, Enemy, Entity, Player, Wall};
use crate::core::physics::{BodyDesc, ColliderDesc, PhysicsWorld, PointMass};
use crate::core::soft_body::{HEXAGON_CONNECTIONS, HEXAGON_VERTICES};

/// Builds entities with the arena's construction parameters and texture slots.
///
/// No validation: zero-size walls or zero-length bullet directions are the caller's problem.
pub struct EntityFactory {
    params: EntityParams,
    player_spawn: Vec2,
    next_id: u32,
}

impl EntityFactory {
    pub fn new(params: EntityParams, player_spawn: Vec2) -> Self {
        Self {
            params,
            player_spawn,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The player's hexagon at the level's spawn point.
    pub fn make_player(&mut self, world: &mut PhysicsWorld) -> Entity {
        let body = world.create_soft_body(self.player_spawn, &HEXAGON_VERTICES, &HEXAGON_CONNECTIONS);
        Entity::Player(Player {
            id: self.next_id(),
            body,
            tex_idx: self.params.textures.player,
            force: self.params.player_force,
        })
    }

    pub fn make_enemy(&mut self, world: &mut PhysicsWorld, pos: Vec2) -> Entity {
        let body = world.create_soft_body(pos, &HEXAGON_VERTICES, &HEXAGON_CONNECTIONS);
        Entity::Enemy(Enemy {
            id: self.next_id(),
            body,
            tex_idx: self.params.textures.enemy,
            force: self.params.enemy_force,
        })
    }

    /// A static box centered at `pos` with full extents `size`.
    pub fn make_wall(&mut self, world: &mut PhysicsWorld, pos: Vec2, size: Vec2) -> Entity {
        Entity::Wall(Wall {
            id: self.next_id(),
            shape: world.create_box(pos, size, false),
            tex_idx: self.params.textures.wall,
        })
    }

    /// Spawn a bullet half a direction-unit ahead of `pos` and launch it along `dir`.
    /// `dir` is expected to be normalized.
    pub fn make_bullet(&mut self, world: &mut PhysicsWorld, pos: Vec2, dir: Vec2) -> Entity {
        let radius = self.params.bullet_radius;
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius })
            .with_position(pos + dir * 0.5)
            .with_ccd(true);
        let mass = PointMass {
            body: world.create_body(&desc),
            radius,
        };
        world.apply_circle_impulse(&mass, dir * self.params.bullet_speed_coef);
        Entity::Bullet(Bullet {
            id: self.next_id(),
            mass,
            tex_idx: self.params.textures.bullet,
        })
    }
}
