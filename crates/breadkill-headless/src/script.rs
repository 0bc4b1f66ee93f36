use breadkill::{Platform, PointerState};
use glam::Vec2;

/// Frames between the start of two clicks.
const CLICK_PERIOD: u64 = 90;
/// How long each click is held.
const CLICK_HOLD: u64 = 6;

/// A windowless platform with a scripted pointer.
///
/// The pointer circles the middle of the window and clicks periodically,
/// holding the button for a few frames so the fire trigger's debounce is
/// exercised. Closes after a fixed number of frames.
pub struct ScriptedPlatform {
    width: u32,
    height: u32,
    frame: u64,
    total_frames: u64,
}

impl ScriptedPlatform {
    pub fn new(width: u32, height: u32, total_frames: u64) -> Self {
        Self {
            width,
            height,
            frame: 0,
            total_frames,
        }
    }
}

impl Platform for ScriptedPlatform {
    fn pump_events(&mut self) {
        self.frame += 1;
    }

    fn should_close(&self) -> bool {
        self.frame > self.total_frames
    }

    fn pointer(&self) -> PointerState {
        let center = Vec2::new(self.width as f32, self.height as f32) * 0.5;
        let radius = self.height as f32 * 0.35;
        let angle = self.frame as f32 * 0.02;
        let pos = center + Vec2::from_angle(angle) * radius;
        PointerState {
            x_px: pos.x,
            y_px: pos.y,
            primary_pressed: self.frame % CLICK_PERIOD < CLICK_HOLD,
        }
    }

    fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
