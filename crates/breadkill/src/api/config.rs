use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::{ArenaError, Result};

/// Configuration for the arena, loaded once at startup.
///
/// Every section has a `Default` matching the stock game, and every field is
/// `#[serde(default)]`, so a JSON file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Width of the visible world in simulation units (default: 10).
    /// Pointer pixels are scaled by `world_width / window_width` on both axes.
    pub world_width: f32,
    /// Window width in pixels (default: 1024).
    pub window_width: u32,
    /// Window height in pixels (default: 768).
    pub window_height: u32,
    /// Seed for the shared random source that drives enemy wandering.
    pub seed: u64,
    pub physics: PhysicsConfig,
    pub timing: TimingConfig,
    pub entities: EntityParams,
    pub level: LevelConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_width: 10.0,
            window_width: 1024,
            window_height: 768,
            seed: 0x5eed_b4ead,
            physics: PhysicsConfig::default(),
            timing: TimingConfig::default(),
            entities: EntityParams::default(),
            level: LevelConfig::default(),
        }
    }
}

/// Physics world and soft-body spring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector. Y-down: positive Y pulls bodies toward the bottom of the screen.
    pub gravity: Vec2,
    /// Solver sub-steps per `step` call.
    pub substeps: u32,
    /// Friction for every collider the world creates.
    pub friction: f32,
    /// Radius of each soft-body point mass.
    pub point_radius: f32,
    /// Damping ratio of soft-body joints (1.0 = critically damped).
    pub joint_damping_ratio: f32,
    /// Stiffness frequency of soft-body joints, in Hz.
    pub joint_frequency_hz: f32,
    /// Shortest length a soft-body joint may compress to.
    pub joint_min_length: f32,
    /// Longest length a soft-body joint may stretch to.
    pub joint_max_length: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            substeps: 8,
            friction: 0.3,
            point_radius: 0.02,
            joint_damping_ratio: 0.9,
            joint_frequency_hz: 10.0,
            joint_min_length: 0.15,
            joint_max_length: 3.0,
        }
    }
}

/// How leftover frame time is treated once a physics step has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// Step at most once per frame and throw away whatever exceeded the timestep.
    Reset,
    /// Classic accumulator: keep the remainder, run as many steps as fit.
    CarryOver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed physics timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    pub step_policy: StepPolicy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            step_policy: StepPolicy::Reset,
        }
    }
}

/// Texture slots handed to the renderer with every vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSlots {
    pub wall: u32,
    pub player: u32,
    pub enemy: u32,
    pub bullet: u32,
}

impl Default for TextureSlots {
    fn default() -> Self {
        Self {
            wall: 0,
            player: 1,
            enemy: 2,
            bullet: 3,
        }
    }
}

/// Construction parameters for entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityParams {
    /// Scale applied to `centroid - pointer` when the player is flung.
    pub player_force: f32,
    /// Magnitude of the random impulse an enemy receives every frame.
    pub enemy_force: f32,
    pub bullet_radius: f32,
    /// Scale applied to the unit firing direction for the bullet's launch impulse.
    pub bullet_speed_coef: f32,
    pub textures: TextureSlots,
}

impl Default for EntityParams {
    fn default() -> Self {
        Self {
            player_force: 0.008,
            enemy_force: 0.0004,
            bullet_radius: 0.10,
            bullet_speed_coef: 1.0,
            textures: TextureSlots::default(),
        }
    }
}

/// A static wall: center position and full extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Level layout created at setup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub player_spawn: Vec2,
    pub walls: Vec<WallSpec>,
    pub enemies: Vec<Vec2>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_spawn: Vec2::new(5.0, 1.0),
            walls: vec![
                // Floor
                WallSpec { pos: Vec2::new(5.0, 5.0), size: Vec2::new(8.0, 2.0) },
                // Side walls standing on the floor
                WallSpec { pos: Vec2::new(1.5, 2.5), size: Vec2::new(1.0, 3.0) },
                WallSpec { pos: Vec2::new(8.5, 2.5), size: Vec2::new(1.0, 3.0) },
            ],
            enemies: vec![Vec2::new(3.0, 2.0), Vec2::new(7.0, 2.0)],
        }
    }
}

impl ArenaConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.timing.fixed_dt > 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.timing.fixed_dt
            )));
        }
        if self.physics.substeps == 0 {
            return Err(ArenaError::InvalidConfig("substeps must be at least 1".into()));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ArenaError::InvalidConfig(format!(
                "window must be non-empty, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if !(self.world_width > 0.0) {
            return Err(ArenaError::InvalidConfig(format!(
                "world_width must be positive, got {}",
                self.world_width
            )));
        }
        if self.physics.joint_min_length > self.physics.joint_max_length {
            return Err(ArenaError::InvalidConfig(format!(
                "joint length range is inverted: [{}, {}]",
                self.physics.joint_min_length, self.physics.joint_max_length
            )));
        }
        Ok(())
    }

}

/// Simulation units per window pixel. Both axes share it so the world isn't stretched.
/// A zero width is treated as one pixel.
pub fn pixel_scale(world_width: f32, window_width_px: u32) -> f32 {
    world_width / window_width_px.max(1) as f32
}
