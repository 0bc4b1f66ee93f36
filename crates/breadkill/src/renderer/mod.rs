pub mod traits;
pub mod triangle;

// Re-export key types for convenient access
pub use traits::{Renderer, TriangleBatch};
pub use triangle::{Triangle, Vertex};
