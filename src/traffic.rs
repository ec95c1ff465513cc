//! Path-locked motion for ambient traffic.
//!
//! A traffic vehicle owns one [`SplinePath`]. Each tick advances a progress
//! parameter at a fixed pace, steers toward a point slightly further along
//! the curve at constant cruise speed, and reports arrival once the body is
//! within [`TRAFFIC_ARRIVAL_EPSILON`] of the final control point. There is no
//! braking curve.
use glam::Vec3;
use log::{debug, info};
use rand::Rng;

use crate::config::TrafficConfig;
use crate::constants::{TRAFFIC_ARRIVAL_EPSILON, TRAFFIC_PACING_DIVISOR};
use crate::error::MotionError;
use crate::physics::{integrate, VehicleBody};
use crate::spline::SplinePath;
use crate::vector_math::{
    clamp_magnitude, flatten, look_rotation, planar_distance, safe_normalize, slerp_heading,
};

/// Outcome of one traffic tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficTick {
    /// No path has been started, or the path already finished.
    Idle,
    /// The vehicle moved along its path.
    Moving,
    /// The vehicle reached the end of its path and should be destroyed.
    Arrived,
}

/// Progress state of one traffic vehicle.
#[derive(Debug, Clone)]
pub struct TrafficController {
    config: TrafficConfig,
    path: Option<SplinePath>,
    progress: f32,
    active: bool,
}

impl TrafficController {
    /// Builds an idle controller after validating `config`.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] when `config` is invalid.
    pub fn new(config: TrafficConfig) -> Result<Self, MotionError> {
        config.validate()?;
        Ok(Self {
            config,
            path: None,
            progress: 0.0,
            active: false,
        })
    }

    /// Generates a jittered path from `start` to `end`, places `body` on its
    /// first point and starts moving.
    ///
    /// # Errors
    /// Returns [`MotionError::DegeneratePath`] if `start` and `end` coincide
    /// in the plane. The controller is left untouched in that case.
    pub fn start_path<R: Rng + ?Sized>(
        &mut self,
        start: Vec3,
        end: Vec3,
        body: &mut VehicleBody,
        rng: &mut R,
    ) -> Result<(), MotionError> {
        let path = SplinePath::generate(
            start,
            end,
            self.config.mid_points,
            self.config.lateral_jitter,
            rng,
        )?;
        self.follow(path, body);
        Ok(())
    }

    /// Starts moving along an explicit path.
    pub fn follow(&mut self, path: SplinePath, body: &mut VehicleBody) {
        body.teleport(path.first());
        body.halt();
        info!(
            "traffic path started at {} toward {} with {} control points",
            path.first(),
            path.last(),
            path.len()
        );
        self.path = Some(path);
        self.progress = 0.0;
        self.active = true;
    }

    /// Path being followed, if one was started.
    #[must_use]
    pub const fn path(&self) -> Option<&SplinePath> {
        self.path.as_ref()
    }

    /// Current progress parameter.
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the controller is following a path.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Score delta reported when a driver hits this vehicle.
    #[must_use]
    pub const fn collision_penalty(&self) -> i32 {
        self.config.collision_penalty
    }

    /// Advances one fixed step.
    pub fn tick(&mut self, body: &mut VehicleBody, dt: f32) -> TrafficTick {
        let Some(path) = self.path.as_ref().filter(|_| self.active) else {
            return TrafficTick::Idle;
        };

        self.progress += (self.config.speed / TRAFFIC_PACING_DIVISOR) * dt;

        if planar_distance(body.position, path.last()) < TRAFFIC_ARRIVAL_EPSILON {
            debug!("traffic reached {} at progress {}", path.last(), self.progress);
            self.active = false;
            return TrafficTick::Arrived;
        }

        let look_t = (self.progress + self.config.look_ahead).min(path.max_t());
        let target = path.evaluate(look_t);
        let desired = safe_normalize(flatten(target - body.position)) * self.config.speed;
        let steering = clamp_magnitude(desired - flatten(body.velocity), self.config.steering_force);
        integrate(body, steering, None, dt);
        self.rotate_towards_velocity(body, dt);
        TrafficTick::Moving
    }

    fn rotate_towards_velocity(&self, body: &mut VehicleBody, dt: f32) {
        let velocity = flatten(body.velocity);
        if velocity.length_squared() < self.config.rotation_gate {
            return;
        }
        if let Some(look) = look_rotation(velocity) {
            body.heading = slerp_heading(body.heading, look, self.config.rot_speed * dt);
        }
    }
}
