use glam::Vec2;

use crate::core::soft_body::HEXAGON_POINTS;
use crate::renderer::traits::Renderer;
use crate::renderer::triangle::{Triangle, Vertex};

/// Texture coordinates for each hexagon point, in template order.
pub const HEXAGON_UVS: [Vec2; HEXAGON_POINTS] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.5),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 0.5),
];

/// Texture coordinate of the fan center.
pub const CENTER_UV: Vec2 = Vec2::new(0.5, 0.5);

/// Fan-triangulate a ring of points around `center`: one triangle per edge.
///
/// Points beyond the UV table reuse the center UV.
pub fn emit_fan(points: &[Vec2], center: Vec2, tex_idx: u32, renderer: &mut dyn Renderer) {
    let n = points.len();
    let uv = |i: usize| HEXAGON_UVS.get(i).copied().unwrap_or(CENTER_UV);
    for i in 0..n {
        let j = (i + 1) % n;
        renderer.push_triangle(&Triangle::new(
            Vertex::new(points[i], uv(i), tex_idx),
            Vertex::new(points[j], uv(j), tex_idx),
            Vertex::new(center, CENTER_UV, tex_idx),
        ));
    }
}

/// Two triangles over a quad given counter-clockwise from its top-left corner.
/// `uv_extent` is the UV at the far corner, so values above 1 tile the texture.
pub fn emit_quad(corners: &[Vec2; 4], uv_extent: Vec2, tex_idx: u32, renderer: &mut dyn Renderer) {
    let (w, h) = (uv_extent.x, uv_extent.y);
    let uvs = [
        Vec2::new(0.0, h),
        Vec2::new(w, h),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    let vertex = |i: usize| Vertex::new(corners[i], uvs[i], tex_idx);
    renderer.push_triangle(&Triangle::new(vertex(0), vertex(1), vertex(2)));
    renderer.push_triangle(&Triangle::new(vertex(0), vertex(2), vertex(3)));
}

/// UV extent that tiles one texture repeat per unit of half width/height.
pub fn tiled_extent(corners: &[Vec2; 4]) -> Vec2 {
    let width = (corners[0].x - corners[1].x).abs() * 0.5;
    let height = (corners[1].y - corners[2].y).abs() * 0.5;
    Vec2::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::TriangleBatch;

    fn hexagon() -> Vec<Vec2> {
        crate::core::soft_body::HEXAGON_VERTICES.to_vec()
    }

    #[test]
    fn fan_emits_one_triangle_per_edge() {
        let mut batch = TriangleBatch::new();
        let points = hexagon();
        emit_fan(&points, Vec2::ZERO, 1, &mut batch);

        assert_eq!(batch.len(), 6);
        for (i, tri) in batch.triangles.iter().enumerate() {
            assert_eq!(tri.points[0].pos(), points[i]);
            assert_eq!(tri.points[1].pos(), points[(i + 1) % 6]);
            assert_eq!(tri.points[2].pos(), Vec2::ZERO);
            assert!(tri.points.iter().all(|v| v.tex_idx == 1));
        }
        // Last triangle closes the ring
        assert_eq!(batch.triangles[5].points[1].u, 0.0);
        assert_eq!(batch.triangles[5].points[1].v, 1.0);
    }

    #[test]
    fn quad_covers_all_four_corners() {
        let mut batch = TriangleBatch::new();
        let corners = [
            Vec2::new(1.0, 4.0),
            Vec2::new(9.0, 4.0),
            Vec2::new(9.0, 6.0),
            Vec2::new(1.0, 6.0),
        ];
        emit_quad(&corners, Vec2::ONE, 0, &mut batch);

        assert_eq!(batch.len(), 2);
        let used: Vec<Vec2> = batch
            .triangles
            .iter()
            .flat_map(|t| t.points.iter().map(|v| v.pos()))
            .collect();
        for corner in &corners {
            assert!(used.contains(corner), "corner {corner:?} not covered");
        }
    }

    #[test]
    fn tiled_extent_is_half_the_box_size() {
        let corners = [
            Vec2::new(1.0, 4.0),
            Vec2::new(9.0, 4.0),
            Vec2::new(9.0, 6.0),
            Vec2::new(1.0, 6.0),
        ];
        assert_eq!(tiled_extent(&corners), Vec2::new(4.0, 1.0));
    }
}
