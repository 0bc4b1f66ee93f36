pub mod physics;
pub mod scene;
pub mod soft_body;
pub mod time;
