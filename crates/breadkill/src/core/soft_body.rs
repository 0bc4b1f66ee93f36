//! Deformable bodies built from point masses and damped distance joints.
//!
//! A soft body is a ring of small circles held together by springs. The
//! springs let the mesh jiggle and squash on contact while pulling it back
//! to its rest shape.

use glam::Vec2;

use crate::core::physics::{Joint, PhysicsWorld, PointMass};

/// A joint between two point masses, by index into the vertex template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointConn {
    pub a: usize,
    pub b: usize,
}

impl JointConn {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// Number of point masses in the hexagon mesh.
pub const HEXAGON_POINTS: usize = 6;

/// Hexagon offsets from the spawn position, walking the perimeter.
pub const HEXAGON_VERTICES: [Vec2; HEXAGON_POINTS] = [
    Vec2::new(-0.25, -0.30),
    Vec2::new(0.25, -0.30),
    Vec2::new(0.25, 0.00),
    Vec2::new(0.25, 0.30),
    Vec2::new(-0.25, 0.30),
    Vec2::new(-0.25, 0.00),
];

/// Six perimeter edges plus two cross braces so the hexagon can't fold flat.
pub const HEXAGON_CONNECTIONS: [JointConn; 8] = [
    JointConn::new(0, 1),
    JointConn::new(1, 2),
    JointConn::new(2, 3),
    JointConn::new(3, 4),
    JointConn::new(4, 5),
    JointConn::new(5, 0),
    JointConn::new(0, 3),
    JointConn::new(1, 4),
];

/// Point masses plus the joints linking them.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftBody {
    pub points: Vec<PointMass>,
    pub joints: Vec<Joint>,
}

impl SoftBody {
    /// Apply the same impulse to every point mass.
    ///
    /// The push moves the whole mesh; the joints still let it deform under
    /// contacts and gravity.
    pub fn apply_impulse(&self, world: &mut PhysicsWorld, impulse: Vec2) {
        for point in &self.points {
            world.apply_circle_impulse(point, impulse);
        }
    }

    /// Average of the current point-mass positions.
    pub fn centroid(&self, world: &PhysicsWorld) -> Vec2 {
        if self.points.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.points.iter().map(|p| world.circle_position(p)).sum();
        sum / self.points.len() as f32
    }

    /// Current point-mass positions, in template order.
    pub fn point_positions(&self, world: &PhysicsWorld) -> Vec<Vec2> {
        self.points.iter().map(|p| world.circle_position(p)).collect()
    }
}

impl PhysicsWorld {
    /// Build a soft body: one dynamic point mass per offset (placed at
    /// `position + offset`) and one damped distance joint per connection,
    /// using the world's configured point radius and spring.
    ///
    /// Connection indices must be valid indices into `vertices`.
    pub fn create_soft_body(
        &mut self,
        position: Vec2,
        vertices: &[Vec2],
        connections: &[JointConn],
    ) -> SoftBody {
        let point_radius = self.soft_point_radius;
        let spring = self.soft_spring;
        let points: Vec<PointMass> = vertices
            .iter()
            .map(|offset| self.create_circle(position + *offset, point_radius, true))
            .collect();

        let joints = connections
            .iter()
            .map(|conn| self.create_distance_joint(&points[conn.a], &points[conn.b], spring))
            .collect();

        SoftBody { points, joints }
    }
}
