use std::time::Instant;

use crate::api::config::{StepPolicy, TimingConfig};

/// Maximum physics steps a carry-over timer will run in one frame.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Decides when the physics world steps.
///
/// Frame deltas accumulate until they reach the fixed timestep. What happens
/// to the time beyond the threshold depends on the [`StepPolicy`]:
/// `Reset` steps once and zeroes the accumulator (dropping the remainder),
/// `CarryOver` keeps the remainder and can step several times per frame.
pub struct StepTimer {
    /// The fixed delta time per step.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    policy: StepPolicy,
}

impl StepTimer {
    pub fn new(dt: f32, policy: StepPolicy) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            policy,
        }
    }

    pub fn from_config(config: &TimingConfig) -> Self {
        Self::new(config.fixed_dt, config.step_policy)
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        match self.policy {
            StepPolicy::Reset => {
                if self.accumulator >= self.dt {
                    self.accumulator = 0.0;
                    1
                } else {
                    0
                }
            }
            StepPolicy::CarryOver => {
                // Cap to prevent spiral of death
                self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
                let steps = (self.accumulator / self.dt) as u32;
                self.accumulator -= steps as f32 * self.dt;
                steps
            }
        }
    }

    /// Time accumulated since the last step.
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn policy(&self) -> StepPolicy {
        self.policy
    }
}

/// Source of per-frame time deltas for the run loop.
pub trait FrameClock {
    /// Seconds elapsed since the previous call.
    fn frame_delta(&mut self) -> f32;
}

/// Real elapsed time, for interactive hosts.
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn frame_delta(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}

/// A constant delta every frame, for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f32);

impl FrameClock for FixedClock {
    fn frame_delta(&mut self) -> f32 {
        self.0
    }
}
