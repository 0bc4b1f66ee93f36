use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One textured vertex as the GPU pipeline consumes it.
/// 5 × 4 bytes = 20 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// X position in simulation space.
    pub x: f32,
    /// Y position in simulation space.
    pub y: f32,
    pub u: f32,
    pub v: f32,
    /// Index into the renderer's texture array.
    pub tex_idx: u32,
}

impl Vertex {
    pub const STRIDE_BYTES: usize = 20;

    pub fn new(pos: Vec2, uv: Vec2, tex_idx: u32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            u: uv.x,
            v: uv.y,
            tex_idx,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Three vertices, drawn as one triangle.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub points: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { points: [a, b, c] }
    }
}
