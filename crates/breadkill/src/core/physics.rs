use glam::Vec2;
use rapier2d::na;
use rapier2d::prelude::*;

use crate::api::config::PhysicsConfig;

// ---------------------------------------------------------------------------
// glam <-> nalgebra conversions
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Shape description for a collider.
#[derive(Debug, Clone, Copy)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub dynamic: bool,
    pub position: Vec2,
    pub ccd: bool,
    pub collider: ColliderDesc,
}

impl BodyDesc {
    /// A body that responds to gravity, impulses and contacts.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            dynamic: true,
            position: Vec2::ZERO,
            ccd: false,
            collider,
        }
    }

    /// A body that never moves.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            dynamic: false,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }
}

/// Handle pair referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A circular body. Soft-body nodes and projectiles are point masses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub body: PhysicsBody,
    pub radius: f32,
}

/// A rectangular body, used for level geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBox {
    pub body: PhysicsBody,
    pub half_extents: Vec2,
}

/// Spring parameters for a damped distance joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// 1.0 = critically damped.
    pub damping_ratio: f32,
    /// Oscillation frequency of the spring, in Hz.
    pub frequency_hz: f32,
    pub min_length: f32,
    pub max_length: f32,
}

impl SpringParams {
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            damping_ratio: config.joint_damping_ratio,
            frequency_hz: config.joint_frequency_hz,
            min_length: config.joint_min_length,
            max_length: config.joint_max_length,
        }
    }

    /// Acceleration-based stiffness and damping for the joint motor.
    /// Mass-independent, so the spring feels the same whatever the point-mass density.
    pub fn motor_gains(&self) -> (f32, f32) {
        let omega = std::f32::consts::TAU * self.frequency_hz;
        (omega * omega, 2.0 * self.damping_ratio * omega)
    }
}

/// A damped distance constraint between two point masses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub handle: ImpulseJointHandle,
    /// Distance the spring pulls back toward, measured when the joint was created.
    pub rest_length: f32,
    pub spring: SpringParams,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
pub struct PhysicsWorld {
    gravity: na::Vector2<f32>,
    substeps: u32,
    friction: f32,
    pub(crate) soft_point_radius: f32,
    pub(crate) soft_spring: SpringParams,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a world with the given gravity and the stock sub-step count and friction.
    /// Y-down: use positive Y for downward gravity.
    pub fn new(gravity: Vec2) -> Self {
        Self::from_config(&PhysicsConfig {
            gravity,
            ..PhysicsConfig::default()
        })
    }

    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            gravity: vec2_to_na(config.gravity),
            substeps: config.substeps.max(1),
            friction: config.friction,
            soft_point_radius: config.point_radius,
            soft_spring: SpringParams::from_config(config),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Advance the simulation by `elapsed` seconds, split into `substeps` pipeline steps.
    /// Meant to be called with a constant timestep.
    pub fn step(&mut self, elapsed: f32) {
        self.integration_parameters.dt = elapsed / self.substeps as f32;
        for _ in 0..self.substeps {
            self.physics_pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.island_manager,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                Some(&mut self.query_pipeline),
                &(),
                &(),
            );
        }
    }

    /// Create a rigid body + collider and return handles.
    pub fn create_body(&mut self, desc: &BodyDesc) -> PhysicsBody {
        let body_type = if desc.dynamic {
            RigidBodyType::Dynamic
        } else {
            RigidBodyType::Fixed
        };
        let rb = RigidBodyBuilder::new(body_type)
            .translation(vec2_to_na(desc.position))
            .ccd_enabled(desc.ccd)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .friction(self.friction)
            .restitution(0.0)
            .density(1.0)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        // Mass is otherwise only computed on the next step, and impulses before then would be lost
        if let Some(rb) = self.bodies.get_mut(body_handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Create a box centered at `position` with full extents `size`.
    pub fn create_box(&mut self, position: Vec2, size: Vec2, dynamic: bool) -> RigidBox {
        let half_extents = size / 2.0;
        let collider = ColliderDesc::Cuboid {
            half_width: half_extents.x,
            half_height: half_extents.y,
        };
        let desc = if dynamic {
            BodyDesc::dynamic(collider)
        } else {
            BodyDesc::fixed(collider)
        };
        let body = self.create_body(&desc.with_position(position));
        RigidBox { body, half_extents }
    }

    /// Create a single circular point mass.
    pub fn create_circle(&mut self, position: Vec2, radius: f32, dynamic: bool) -> PointMass {
        let collider = ColliderDesc::Ball { radius };
        let desc = if dynamic {
            BodyDesc::dynamic(collider)
        } else {
            BodyDesc::fixed(collider)
        };
        let body = self.create_body(&desc.with_position(position));
        PointMass { body, radius }
    }

    /// Link two point masses with a damped distance joint.
    /// The rest length is the distance between them right now, so the joint starts unstressed.
    pub fn create_distance_joint(
        &mut self,
        a: &PointMass,
        b: &PointMass,
        spring: SpringParams,
    ) -> Joint {
        let rest_length = self.circle_position(a).distance(self.circle_position(b));
        let (stiffness, damping) = spring.motor_gains();

        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .coupled_axes(JointAxesMask::LIN_AXES)
            .local_anchor1(na::Point2::origin())
            .local_anchor2(na::Point2::origin())
            .motor_position(JointAxis::LinX, rest_length, stiffness, damping)
            .motor_model(JointAxis::LinX, MotorModel::AccelerationBased)
            .limits(JointAxis::LinX, [spring.min_length, spring.max_length])
            .contacts_enabled(false)
            .build();
        let handle = self
            .impulse_joints
            .insert(a.body.body_handle, b.body.body_handle, joint, true);

        Joint {
            handle,
            rest_length,
            spring,
        }
    }

    /// Apply an instantaneous impulse at the center of a point mass.
    pub fn apply_circle_impulse(&mut self, mass: &PointMass, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(mass.body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Current world position of a point mass.
    pub fn circle_position(&self, mass: &PointMass) -> Vec2 {
        self.body_translation(&mass.body)
    }

    /// Current linear velocity of a point mass.
    pub fn circle_velocity(&self, mass: &PointMass) -> Vec2 {
        self.bodies
            .get(mass.body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Corners of the square bounding a point mass, counter-clockwise from (-r, -r).
    pub fn circle_world_vertices(&self, mass: &PointMass) -> [Vec2; 4] {
        let c = self.circle_position(mass);
        let r = mass.radius;
        [
            c + Vec2::new(-r, -r),
            c + Vec2::new(r, -r),
            c + Vec2::new(r, r),
            c + Vec2::new(-r, r),
        ]
    }

    /// World-space corners of a box, counter-clockwise from its local (-hx, -hy).
    pub fn box_corners(&self, rigid_box: &RigidBox) -> [Vec2; 4] {
        let h = rigid_box.half_extents;
        let local = [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ];
        let Some(rb) = self.bodies.get(rigid_box.body.body_handle) else {
            return local;
        };
        let iso = rb.position();
        local.map(|p| {
            let world = iso.transform_point(&na::Point2::new(p.x, p.y));
            Vec2::new(world.x, world.y)
        })
    }

    /// Center of a box.
    pub fn box_position(&self, rigid_box: &RigidBox) -> Vec2 {
        self.body_translation(&rigid_box.body)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of joints in the simulation.
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    fn body_translation(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
