/// Edge-triggered fire button.
///
/// Fires once when the button goes down, then stays quiet until the button
/// has been seen released. Holding the button never repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireTrigger {
    click_is_pressed: bool,
    click_has_been_released: bool,
}

impl FireTrigger {
    pub fn new() -> Self {
        Self {
            click_is_pressed: false,
            click_has_been_released: true,
        }
    }

    /// Feed this frame's button state. Returns `true` on the frame a press should fire.
    pub fn sample(&mut self, pressed: bool) -> bool {
        self.click_is_pressed = pressed;
        if !self.click_is_pressed {
            self.click_has_been_released = true;
            return false;
        }
        if self.click_has_been_released {
            self.click_has_been_released = false;
            return true;
        }
        false
    }
}

impl Default for FireTrigger {
    fn default() -> Self {
        Self::new()
    }
}
