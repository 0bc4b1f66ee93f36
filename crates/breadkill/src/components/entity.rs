use glam::Vec2;
use rand::Rng;

use crate::api::types::{EntityId, EntityKind};
use crate::core::physics::{PhysicsWorld, PointMass, RigidBox};
use crate::core::soft_body::SoftBody;
use crate::renderer::traits::Renderer;
use crate::systems::render::{emit_fan, emit_quad, tiled_extent};

/// The user-controlled soft body.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: SoftBody,
    pub tex_idx: u32,
    /// Scale applied to the centroid-to-pointer offset when flinging.
    pub force: f32,
}

impl Player {
    /// Fling away from `target`, slingshot-style: the farther the click, the harder the push.
    pub fn fling(&self, world: &mut PhysicsWorld, target: Vec2) -> Vec2 {
        let impulse = -(target - self.body.centroid(world)) * self.force;
        self.body.apply_impulse(world, impulse);
        impulse
    }

    pub fn centroid(&self, world: &PhysicsWorld) -> Vec2 {
        self.body.centroid(world)
    }
}

/// A soft body that wanders by random impulses.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub body: SoftBody,
    pub tex_idx: u32,
    /// Magnitude of the per-frame random impulse.
    pub force: f32,
}

impl Enemy {
    /// One step of the random walk.
    pub fn wander<R: Rng>(&self, world: &mut PhysicsWorld, rng: &mut R) {
        let dir = random_direction(rng);
        self.body.apply_impulse(world, dir * self.force);
    }
}

/// Static level geometry.
#[derive(Debug, Clone)]
pub struct Wall {
    pub id: EntityId,
    pub shape: RigidBox,
    pub tex_idx: u32,
}

/// A fire-and-forget projectile.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: EntityId,
    pub mass: PointMass,
    pub tex_idx: u32,
}

/// Everything that lives in the arena. Each variant owns exactly one physics object.
#[derive(Debug, Clone)]
pub enum Entity {
    Player(Player),
    Enemy(Enemy),
    Wall(Wall),
    Bullet(Bullet),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Player(p) => p.id,
            Entity::Enemy(e) => e.id,
            Entity::Wall(w) => w.id,
            Entity::Bullet(b) => b.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Enemy(_) => EntityKind::Enemy,
            Entity::Wall(_) => EntityKind::Wall,
            Entity::Bullet(_) => EntityKind::Bullet,
        }
    }

    pub fn tex_idx(&self) -> u32 {
        match self {
            Entity::Player(p) => p.tex_idx,
            Entity::Enemy(e) => e.tex_idx,
            Entity::Wall(w) => w.tex_idx,
            Entity::Bullet(b) => b.tex_idx,
        }
    }

    /// Where the entity is right now: centroid for soft bodies, center otherwise.
    pub fn position(&self, world: &PhysicsWorld) -> Vec2 {
        match self {
            Entity::Player(p) => p.body.centroid(world),
            Entity::Enemy(e) => e.body.centroid(world),
            Entity::Wall(w) => world.box_position(&w.shape),
            Entity::Bullet(b) => world.circle_position(&b.mass),
        }
    }

    /// Per-frame behavior. Only enemies act on their own; the player is
    /// driven by the run loop's fire trigger.
    pub fn update<R: Rng>(&mut self, world: &mut PhysicsWorld, rng: &mut R) {
        if let Entity::Enemy(enemy) = self {
            enemy.wander(world, rng);
        }
    }

    /// Push this frame's triangles for the entity.
    pub fn emit_geometry(&self, world: &PhysicsWorld, renderer: &mut dyn Renderer) {
        match self {
            Entity::Player(Player { body, tex_idx, .. })
            | Entity::Enemy(Enemy { body, tex_idx, .. }) => {
                let points = body.point_positions(world);
                emit_fan(&points, body.centroid(world), *tex_idx, renderer);
            }
            Entity::Wall(wall) => {
                let corners = world.box_corners(&wall.shape);
                emit_quad(&corners, tiled_extent(&corners), wall.tex_idx, renderer);
            }
            Entity::Bullet(bullet) => {
                let corners = world.circle_world_vertices(&bullet.mass);
                emit_quad(&corners, Vec2::ONE, bullet.tex_idx, renderer);
            }
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }
}

/// A unit vector with a uniformly distributed angle.
pub fn random_direction<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}
