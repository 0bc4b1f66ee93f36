//! Renderer contract the simulation draws through.
//!
//! The GPU backend lives outside this crate. The core only pushes textured
//! triangles and asks for a present once per frame; [`TriangleBatch`] is the
//! in-memory implementation used headless and in tests.

use super::triangle::Triangle;

/// A triangle sink with a once-per-frame present.
///
/// # Example Implementation
///
/// ```ignore
/// struct GpuRenderer {
///     batch: Vec<Triangle>,
///     // device, pipeline, textures...
/// }
///
/// impl Renderer for GpuRenderer {
///     fn push_triangle(&mut self, triangle: &Triangle) {
///         self.batch.push(*triangle);
///     }
///
///     fn present(&mut self) {
///         // Upload bytemuck::cast_slice(&self.batch), draw, then clear.
///         self.batch.clear();
///     }
/// }
/// ```
pub trait Renderer {
    /// Queue a triangle for this frame. May be called any number of times.
    fn push_triangle(&mut self, triangle: &Triangle);

    /// Draw everything pushed since the last present, then clear the batch.
    fn present(&mut self);
}

/// Collects triangles in memory and counts presented frames.
#[derive(Debug, Default)]
pub struct TriangleBatch {
    /// Triangles pushed since the last present.
    pub triangles: Vec<Triangle>,
    /// The batch as it stood at the last present.
    pub last_frame: Vec<Triangle>,
    pub frames_presented: u64,
    pub triangles_presented: u64,
}

impl TriangleBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Renderer for TriangleBatch {
    fn push_triangle(&mut self, triangle: &Triangle) {
        self.triangles.push(*triangle);
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        self.triangles_presented += self.triangles.len() as u64;
        self.last_frame = std::mem::take(&mut self.triangles);
    }
}
