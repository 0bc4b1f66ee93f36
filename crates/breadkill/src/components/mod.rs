pub mod entity;
pub mod factory;
