pub mod platform;
pub mod trigger;

pub use platform::{Platform, PointerState};
pub use trigger::FireTrigger;
