use glam::Vec2;

/// Pointer state in window pixels, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x_px: f32,
    pub y_px: f32,
    /// Whether the primary button is currently held.
    pub primary_pressed: bool,
}

impl PointerState {
    /// Convert to simulation space. Both axes use the same scale so the world isn't stretched.
    pub fn to_world(&self, pixel_scale: f32) -> Vec2 {
        Vec2::new(self.x_px, self.y_px) * pixel_scale
    }
}

/// Windowing and input host the run loop talks to.
///
/// Implementations own the window. The loop pumps events once per frame,
/// then reads the latest pointer and window state.
pub trait Platform {
    /// Process pending OS events so the state queries are current.
    fn pump_events(&mut self);

    /// Whether the user asked to close the window.
    fn should_close(&self) -> bool;

    fn pointer(&self) -> PointerState;

    /// Window size in pixels.
    fn window_size(&self) -> (u32, u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_scales_uniformly() {
        let pointer = PointerState { x_px: 512.0, y_px: 384.0, primary_pressed: false };
        let world = pointer.to_world(10.0 / 1024.0);
        assert!((world.x - 5.0).abs() < 1e-5);
        assert!((world.y - 3.75).abs() < 1e-5);
    }
}
