//! Planar rigid-body state and its integrator.
//!
//! Bodies translate in the x/z plane and rotate only about the vertical
//! axis. Each tick applies one acceleration with semi-implicit Euler:
//! accelerate, damp, clamp, then move. Height is pinned to the ground after
//! every step so nothing drifts vertically.
use glam::{Quat, Vec3};

use crate::vector_math::{clamp_magnitude, flatten, forward};

/// Kinematic state of one vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleBody {
    /// World position; `y` always equals `ground_height` after a step.
    pub position: Vec3,
    /// Planar velocity.
    pub velocity: Vec3,
    /// Rotation about the up axis.
    pub heading: Quat,
    /// Linear damping coefficient per second.
    pub linear_damping: f32,
    /// Height the body is constrained to.
    pub ground_height: f32,
}

impl VehicleBody {
    /// Creates a body at rest.
    #[must_use]
    pub const fn new(position: Vec3, heading: Quat, linear_damping: f32, ground_height: f32) -> Self {
        Self {
            position: Vec3::new(position.x, ground_height, position.z),
            velocity: Vec3::ZERO,
            heading,
            linear_damping,
            ground_height,
        }
    }

    /// Planar forward axis.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        forward(self.heading)
    }

    /// Planar speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        flatten(self.velocity).length()
    }

    /// Moves the body without integrating, keeping the ground constraint.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, self.ground_height, position.z);
    }

    /// Adds an instantaneous velocity change, such as a collision kick.
    pub fn apply_impulse(&mut self, delta_velocity: Vec3) {
        self.velocity += flatten(delta_velocity);
    }

    /// Zeroes the velocity.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}

/// Advances `body` by `dt` seconds under `acceleration`.
///
/// When `max_speed` is given, planar speed is clamped after the acceleration
/// and damping are applied, so an impulse added before the tick can never
/// carry the body past its top speed.
pub fn integrate(body: &mut VehicleBody, acceleration: Vec3, max_speed: Option<f32>, dt: f32) {
    let mut velocity = flatten(body.velocity) + flatten(acceleration) * dt;
    velocity *= (1.0 - body.linear_damping * dt).max(0.0);
    if let Some(limit) = max_speed {
        velocity = clamp_magnitude(velocity, limit);
    }
    body.velocity = velocity;
    body.position += velocity * dt;
    body.position.y = body.ground_height;
}
