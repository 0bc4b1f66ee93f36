use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::api::config::{pixel_scale, ArenaConfig};
use crate::api::error::Result;
use crate::api::types::{EntityId, EntityKind};
use crate::components::factory::EntityFactory;
use crate::core::physics::PhysicsWorld;
use crate::core::scene::Scene;
use crate::core::time::{FrameClock, StepTimer};
use crate::input::platform::{Platform, PointerState};
use crate::input::trigger::FireTrigger;
use crate::renderer::traits::Renderer;
use crate::renderer::triangle::Triangle;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Whether the physics world advanced this frame.
    pub stepped: bool,
    pub steps: u32,
    /// Whether the fire button produced a shot this frame.
    pub fired: bool,
    /// Triangles pushed to the renderer before present.
    pub triangles: usize,
}

/// Totals over a whole `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub steps: u64,
    pub shots: u64,
}

impl RunSummary {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.steps += u64::from(report.steps);
        if report.fired {
            self.shots += 1;
        }
    }
}

/// Owns the physics world and every entity, and drives them one frame at a time.
///
/// Per frame: sample the fire button, fling the player and spawn a bullet on a
/// press, step physics when the timer says so, then update and draw every
/// entity in creation order and present.
pub struct ArenaRunner {
    config: ArenaConfig,
    world: PhysicsWorld,
    factory: EntityFactory,
    scene: Scene,
    trigger: FireTrigger,
    timer: StepTimer,
    /// Shared by every enemy's random walk.
    rng: Pcg32,
    frame_count: u64,
}

impl ArenaRunner {
    /// Validate the config, then build the world and the level it describes.
    pub fn new(config: ArenaConfig) -> Result<Self> {
        config.validate()?;

        let mut runner = Self {
            world: PhysicsWorld::from_config(&config.physics),
            factory: EntityFactory::new(config.entities.clone(), config.level.player_spawn),
            scene: Scene::new(),
            trigger: FireTrigger::new(),
            timer: StepTimer::from_config(&config.timing),
            rng: Pcg32::seed_from_u64(config.seed),
            frame_count: 0,
            config,
        };
        runner.setup_level();
        Ok(runner)
    }

    fn setup_level(&mut self) {
        for wall in &self.config.level.walls {
            let entity = self.factory.make_wall(&mut self.world, wall.pos, wall.size);
            self.scene.spawn(entity);
        }
        for &pos in &self.config.level.enemies {
            let entity = self.factory.make_enemy(&mut self.world, pos);
            self.scene.spawn(entity);
        }
        let player = self.factory.make_player(&mut self.world);
        self.scene.spawn(player);

        log::info!(
            "Arena ready: {} walls, {} enemies, {} bodies, {} joints",
            self.scene.count_kind(EntityKind::Wall),
            self.scene.count_kind(EntityKind::Enemy),
            self.world.body_count(),
            self.world.joint_count(),
        );
    }

    /// Run one frame. `window_width` is the current window width in pixels,
    /// used to map the pointer into world space.
    pub fn frame(
        &mut self,
        frame_dt: f32,
        pointer: PointerState,
        window_width: u32,
        renderer: &mut dyn Renderer,
    ) -> FrameReport {
        self.frame_count += 1;
        let mut report = FrameReport::default();

        // Input
        if self.trigger.sample(pointer.primary_pressed) {
            let scale = pixel_scale(self.config.world_width, window_width);
            self.fire_at(pointer.to_world(scale));
            report.fired = true;
        }

        // Physics
        let steps = self.timer.accumulate(frame_dt);
        for _ in 0..steps {
            self.world.step(self.timer.dt());
        }
        report.steps = steps;
        report.stepped = steps > 0;

        // Update, then draw, in creation order
        for entity in self.scene.iter_mut() {
            entity.update(&mut self.world, &mut self.rng);
        }
        let mut counter = CountingRenderer::new(renderer);
        for entity in self.scene.iter() {
            entity.emit_geometry(&self.world, &mut counter);
        }
        report.triangles = counter.triangles;
        counter.present();

        report
    }

    /// Fling the player away from `target` and shoot a bullet toward it.
    ///
    /// Returns the new bullet, or `None` when there is no player or the
    /// target sits exactly on the player's centroid.
    pub fn fire_at(&mut self, target: Vec2) -> Option<EntityId> {
        let Some(player) = self.scene.player() else {
            log::warn!("Fire requested with no player in the arena");
            return None;
        };
        let centroid = player.centroid(&self.world);
        let impulse = player.fling(&mut self.world, target);
        log::debug!(
            "Frame {}: fling from {:?} toward {:?}, impulse {:?}",
            self.frame_count,
            centroid,
            target,
            impulse
        );

        let Some(dir) = (target - centroid).try_normalize() else {
            log::warn!("Pointer on the player centroid, no bullet direction");
            return None;
        };
        let bullet = self
            .factory
            .make_bullet(&mut self.world, centroid + dir * 0.5, dir);
        let id = self.scene.spawn(bullet);
        log::debug!(
            "Spawned bullet {:?} ({} bullets live)",
            id,
            self.scene.count_kind(EntityKind::Bullet)
        );
        Some(id)
    }

    /// Loop frames until the platform asks to close.
    pub fn run<P: Platform, C: FrameClock>(
        &mut self,
        platform: &mut P,
        renderer: &mut dyn Renderer,
        clock: &mut C,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        loop {
            platform.pump_events();
            if platform.should_close() {
                break;
            }
            let pointer = platform.pointer();
            let (window_width, _) = platform.window_size();
            let report = self.frame(clock.frame_delta(), pointer, window_width, renderer);
            summary.record(&report);
        }
        log::info!(
            "Run finished after {} frames: {} steps, {} shots",
            summary.frames,
            summary.steps,
            summary.shots
        );
        summary
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn timer(&self) -> &StepTimer {
        &self.timer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Forwards to the real renderer and counts what passes through.
struct CountingRenderer<'a> {
    inner: &'a mut dyn Renderer,
    triangles: usize,
}

impl<'a> CountingRenderer<'a> {
    fn new(inner: &'a mut dyn Renderer) -> Self {
        Self {
            inner,
            triangles: 0,
        }
    }
}

impl Renderer for CountingRenderer<'_> {
    fn push_triangle(&mut self, triangle: &Triangle) {
        self.triangles += 1;
        self.inner.push_triangle(triangle);
    }

    fn present(&mut self) {
        self.inner.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{LevelConfig, StepPolicy, WallSpec};
    use crate::components::entity::Entity;
    use crate::core::time::FixedClock;
    use crate::renderer::traits::TriangleBatch;

    const DT: f32 = 1.0 / 60.0;
    const WIDTH: u32 = 1024;

    fn runner() -> ArenaRunner {
        ArenaRunner::new(ArenaConfig::default()).unwrap()
    }

    /// Player at (5,1) above a single floor, nothing else.
    fn floor_only() -> ArenaRunner {
        let config = ArenaConfig {
            level: LevelConfig {
                player_spawn: Vec2::new(5.0, 1.0),
                walls: vec![WallSpec { pos: Vec2::new(5.0, 5.0), size: Vec2::new(8.0, 2.0) }],
                enemies: vec![],
            },
            ..ArenaConfig::default()
        };
        ArenaRunner::new(config).unwrap()
    }

    /// Pointer at a world position, given the default 10-unit-wide world in a 1024 px window.
    fn pointer_at(world: Vec2, pressed: bool) -> PointerState {
        let px = world * (WIDTH as f32 / 10.0);
        PointerState { x_px: px.x, y_px: px.y, primary_pressed: pressed }
    }

    fn player_centroid(runner: &ArenaRunner) -> Vec2 {
        runner.scene().player().unwrap().centroid(runner.world())
    }

    #[test]
    fn default_level_is_built() {
        let runner = runner();
        let scene = runner.scene();
        assert_eq!(scene.count_kind(EntityKind::Wall), 3);
        assert_eq!(scene.count_kind(EntityKind::Enemy), 2);
        assert_eq!(scene.count_kind(EntityKind::Player), 1);
        // 3 walls + 3 hexagons of 6 points
        assert_eq!(runner.world().body_count(), 3 + 18);
        assert_eq!(runner.world().joint_count(), 24);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ArenaConfig::default();
        config.timing.fixed_dt = -1.0;
        assert!(ArenaRunner::new(config).is_err());
    }

    #[test]
    fn held_press_fires_once() {
        let mut runner = runner();
        let mut batch = TriangleBatch::new();
        let target = Vec2::new(8.0, 1.0);

        let mut fired = 0;
        for _ in 0..5 {
            let report = runner.frame(DT, pointer_at(target, true), WIDTH, &mut batch);
            fired += report.fired as u32;
        }
        let report = runner.frame(DT, pointer_at(target, false), WIDTH, &mut batch);
        fired += report.fired as u32;

        assert_eq!(fired, 1);
        assert_eq!(runner.scene().count_kind(EntityKind::Bullet), 1);
    }

    #[test]
    fn second_press_fires_again() {
        let mut runner = runner();
        let mut batch = TriangleBatch::new();
        let target = Vec2::new(8.0, 1.0);
        for pressed in [true, false, true, true, false] {
            runner.frame(DT, pointer_at(target, pressed), WIDTH, &mut batch);
        }
        assert_eq!(runner.scene().count_kind(EntityKind::Bullet), 2);
    }

    #[test]
    fn fling_pushes_player_away_from_pointer() {
        let mut runner = floor_only();
        let mut batch = TriangleBatch::new();
        runner.frame(DT, pointer_at(Vec2::new(8.0, 1.0), true), WIDTH, &mut batch);

        let player = runner.scene().player().unwrap();
        let vel = runner.world().circle_velocity(&player.body.points[0]);
        assert!(vel.x < 0.0, "player should move left, away from the click: {vel:?}");
    }

    #[test]
    fn bullet_spawns_one_unit_toward_pointer() {
        let mut runner = floor_only();
        let centroid = player_centroid(&runner);
        let target = centroid + Vec2::new(3.0, -4.0);
        let dir = Vec2::new(0.6, -0.8);

        let id = runner.fire_at(target).unwrap();
        let bullet = runner.scene().get(id).unwrap();
        assert_eq!(bullet.kind(), EntityKind::Bullet);
        let pos = bullet.position(runner.world());
        assert!(pos.distance(centroid + dir) < 1e-4, "bullet at {pos:?}");

        let Entity::Bullet(b) = bullet else { unreachable!() };
        let vel = runner.world().circle_velocity(&b.mass);
        assert!(vel.normalize().distance(dir) < 1e-3, "launch {vel:?} not along {dir:?}");

        // Impulse is momentum: mass * velocity == speed_coef * dir
        let mass = std::f32::consts::PI * b.mass.radius * b.mass.radius;
        let expected = dir * runner.config().entities.bullet_speed_coef;
        assert!((vel * mass).distance(expected) < 1e-4, "momentum {:?}", vel * mass);
    }

    #[test]
    fn pointer_on_centroid_skips_the_bullet() {
        let mut runner = floor_only();
        let centroid = player_centroid(&runner);
        assert!(runner.fire_at(centroid).is_none());
        assert_eq!(runner.scene().count_kind(EntityKind::Bullet), 0);
    }

    #[test]
    fn half_frame_deltas_step_every_other_frame() {
        let mut runner = runner();
        let mut batch = TriangleBatch::new();
        let stepped: Vec<bool> = (0..10)
            .map(|_| runner.frame(1.0 / 120.0, PointerState::default(), WIDTH, &mut batch).stepped)
            .collect();
        assert_eq!(
            stepped,
            [false, true, false, true, false, true, false, true, false, true]
        );
    }

    #[test]
    fn carry_over_policy_catches_up_long_frames() {
        let mut config = ArenaConfig::default();
        config.timing.step_policy = StepPolicy::CarryOver;
        let mut runner = ArenaRunner::new(config).unwrap();
        let mut batch = TriangleBatch::new();
        let report = runner.frame(DT * 3.0 + 1e-4, PointerState::default(), WIDTH, &mut batch);
        assert_eq!(report.steps, 3);
    }

    #[test]
    fn player_falls_and_rests_on_the_floor() {
        let mut runner = floor_only();
        let mut batch = TriangleBatch::new();
        let start = player_centroid(&runner);

        let mut lowest = f32::MIN;
        for _ in 0..120 {
            runner.frame(DT, PointerState::default(), WIDTH, &mut batch);
            let player = runner.scene().player().unwrap();
            for p in player.body.point_positions(runner.world()) {
                lowest = lowest.max(p.y);
            }
        }

        let end = player_centroid(&runner);
        assert!(end.y > start.y, "player should fall: {start:?} -> {end:?}");
        // Bottom points are 0.3 below the centroid and rest on the floor top at y = 4
        assert!(end.y > 3.0 && end.y < 4.0, "player should rest near the floor: {end:?}");
        assert!(lowest < 4.0 + 0.05, "a point passed through the floor: y={lowest}");
    }

    #[test]
    fn walls_stay_put_and_enemies_drift() {
        let mut runner = runner();
        let mut batch = TriangleBatch::new();
        let start: Vec<(EntityKind, Vec2)> = runner
            .scene()
            .iter()
            .map(|e| (e.kind(), e.position(runner.world())))
            .collect();

        for _ in 0..60 {
            runner.frame(DT, PointerState::default(), WIDTH, &mut batch);
        }

        for ((kind, before), entity) in start.iter().zip(runner.scene().iter()) {
            let after = entity.position(runner.world());
            match kind {
                EntityKind::Wall => assert!(before.distance(after) < 1e-5, "wall moved"),
                EntityKind::Enemy => {
                    assert!((before.x - after.x).abs() > 1e-4, "enemy did not drift: {before:?}")
                }
                _ => {}
            }
        }
    }

    #[test]
    fn every_entity_is_drawn_each_frame() {
        let mut runner = runner();
        let mut batch = TriangleBatch::new();

        let report = runner.frame(DT, PointerState::default(), WIDTH, &mut batch);
        // 3 walls * 2 + 3 hexagons * 6
        assert_eq!(report.triangles, 24);
        assert_eq!(batch.last_frame.len(), 24);
        assert!(batch.is_empty(), "present should clear the batch");

        let report = runner.frame(DT, pointer_at(Vec2::new(8.0, 1.0), true), WIDTH, &mut batch);
        assert!(report.fired);
        assert_eq!(report.triangles, 26);
        assert_eq!(batch.frames_presented, 2);
    }

    #[test]
    fn runs_until_the_platform_closes() {
        struct Scripted {
            frame: u32,
            close_after: u32,
        }

        impl Platform for Scripted {
            fn pump_events(&mut self) {
                self.frame += 1;
            }
            fn should_close(&self) -> bool {
                self.frame > self.close_after
            }
            fn pointer(&self) -> PointerState {
                // Click on frames 3 and 4, released otherwise
                pointer_at(Vec2::new(8.0, 1.0), self.frame == 3 || self.frame == 4)
            }
            fn window_size(&self) -> (u32, u32) {
                (WIDTH, 768)
            }
        }

        let mut runner = runner();
        let mut platform = Scripted { frame: 0, close_after: 30 };
        let mut batch = TriangleBatch::new();
        let summary = runner.run(&mut platform, &mut batch, &mut FixedClock(DT));

        assert_eq!(summary.frames, 30);
        assert_eq!(summary.steps, 30);
        assert_eq!(summary.shots, 1);
        assert_eq!(batch.frames_presented, 30);
        assert_eq!(runner.frame_count(), 30);
    }
}
