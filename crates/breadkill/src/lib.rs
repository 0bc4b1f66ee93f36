pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::config::{
    pixel_scale, ArenaConfig, EntityParams, LevelConfig, PhysicsConfig, StepPolicy, TextureSlots,
    TimingConfig, WallSpec,
};
pub use api::error::{ArenaError, Result};
pub use api::types::{EntityId, EntityKind};
pub use components::entity::{Bullet, Enemy, Entity, Player, Wall};
pub use components::factory::EntityFactory;
pub use core::physics::{
    BodyDesc, ColliderDesc, Joint, PhysicsBody, PhysicsWorld, PointMass, RigidBox, SpringParams,
};
pub use core::scene::Scene;
pub use core::soft_body::{JointConn, SoftBody, HEXAGON_CONNECTIONS, HEXAGON_VERTICES};
pub use core::time::{FixedClock, FrameClock, StepTimer, WallClock};
pub use input::{FireTrigger, Platform, PointerState};
pub use renderer::{Renderer, Triangle, TriangleBatch, Vertex};
pub use runner::{ArenaRunner, FrameReport, RunSummary};
