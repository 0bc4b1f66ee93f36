use crate::api::types::{EntityId, EntityKind};
use crate::components::entity::{Entity, Player};

/// Entity storage in creation order, using a flat Vec.
/// Nothing is ever removed, so iteration order is stable for the whole run.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the end of the update/draw order.
    ///
    /// Entities must arrive in id order starting at 1, as the factory hands them out,
    /// so an id doubles as its slot index.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        debug_assert_eq!(
            id.0 as usize,
            self.entities.len() + 1,
            "entity {id:?} spawned out of order"
        );
        self.entities.push(entity);
        id
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = (id.0 as usize).checked_sub(1)?;
        self.entities.get(slot).filter(|e| e.id() == id)
    }

    /// Iterate over all entities, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// The first player in the scene.
    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(Entity::as_player)
    }

    /// Number of entities of one kind.
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::EntityParams;
    use crate::components::factory::EntityFactory;
    use crate::core::physics::PhysicsWorld;
    use glam::Vec2;

    fn populated() -> (PhysicsWorld, EntityFactory, Scene) {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let mut factory = EntityFactory::new(EntityParams::default(), Vec2::new(5.0, 1.0));
        let mut scene = Scene::new();
        scene.spawn(factory.make_wall(&mut world, Vec2::new(5.0, 5.0), Vec2::new(8.0, 2.0)));
        scene.spawn(factory.make_enemy(&mut world, Vec2::new(3.0, 2.0)));
        scene.spawn(factory.make_enemy(&mut world, Vec2::new(7.0, 2.0)));
        scene.spawn(factory.make_player(&mut world));
        (world, factory, scene)
    }

    #[test]
    fn spawn_and_get() {
        let (world, _, scene) = populated();
        let ids: Vec<EntityId> = scene.iter().map(Entity::id).collect();
        let enemy = scene.get(ids[1]).unwrap();
        assert_eq!(enemy.kind(), EntityKind::Enemy);
        assert!(enemy.position(&world).distance(Vec2::new(3.0, 2.0)) < 1e-5);
        assert!(scene.get(EntityId(999)).is_none());
    }

    #[test]
    fn iteration_keeps_creation_order() {
        let (_, _, scene) = populated();
        let kinds: Vec<EntityKind> = scene.iter().map(Entity::kind).collect();
        assert_eq!(
            kinds,
            [EntityKind::Wall, EntityKind::Enemy, EntityKind::Enemy, EntityKind::Player]
        );
    }

    #[test]
    fn finds_player_and_counts_kinds() {
        let (_, _, scene) = populated();
        assert!(scene.player().is_some());
        assert_eq!(scene.count_kind(EntityKind::Enemy), 2);
        assert_eq!(scene.count_kind(EntityKind::Bullet), 0);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn get_finds_late_spawns_by_id() {
        let (mut world, mut factory, mut scene) = populated();
        let mut bullets = Vec::new();
        for i in 0..50 {
            let pos = Vec2::new(i as f32, 0.0);
            bullets.push((scene.spawn(factory.make_bullet(&mut world, pos, Vec2::X)), pos));
        }

        for (id, pos) in bullets {
            let bullet = scene.get(id).unwrap();
            assert_eq!(bullet.id(), id);
            assert!(bullet.position(&world).distance(pos + Vec2::X * 0.5) < 1e-4);
        }
        assert!(scene.get(EntityId(0)).is_none());
        assert!(scene.get(EntityId(scene.len() as u32 + 1)).is_none());
    }

    #[test]
    fn empty_scene_has_no_player() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert!(scene.player().is_none());
    }
}
