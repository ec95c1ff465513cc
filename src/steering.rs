//! Arrival steering shared by every self-propelled driver.
//!
//! [`arrive`] is the pure force rule. [`ArrivalSteering`] holds the goal,
//! turns the computed force into an acceleration scaled by how well the
//! vehicle faces its desired direction, and integrates the body.
use glam::Vec3;
use log::debug;

use crate::config::SteeringConfig;
use crate::physics::{integrate, VehicleBody};
use crate::vector_math::{clamp_magnitude, flatten, look_rotation, safe_normalize, slerp_heading};

/// Result of one arrival evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    /// Steering force clamped to `max_force`; zero once the goal is reached.
    pub force: Vec3,
    /// Velocity the vehicle would like to have.
    pub desired_velocity: Vec3,
    /// `true` when the goal lies within `stop_distance` and must be dropped.
    pub goal_cleared: bool,
}

/// Computes the arrival steering force toward `goal`.
///
/// Desired speed scales linearly from zero at the goal to `max_speed` at
/// `slow_radius` and beyond. Inside `stop_distance` the goal counts as
/// reached and the result carries no force.
///
/// # Examples
///
/// ```
/// use cashrun::config::SteeringConfig;
/// use cashrun::steering::arrive;
/// use glam::Vec3;
///
/// let arrival = arrive(Vec3::ZERO, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), &SteeringConfig::default());
/// assert!((arrival.desired_velocity.length() - 6.0).abs() < 1e-5);
/// assert!(!arrival.goal_cleared);
/// ```
#[must_use]
pub fn arrive(position: Vec3, velocity: Vec3, goal: Vec3, config: &SteeringConfig) -> Arrival {
    let to_goal = flatten(goal - position);
    let distance = to_goal.length();

    if distance < config.stop_distance {
        return Arrival {
            force: Vec3::ZERO,
            desired_velocity: Vec3::ZERO,
            goal_cleared: true,
        };
    }

    let speed_factor = (distance / config.slow_radius).clamp(0.0, 1.0);
    let desired_velocity = safe_normalize(to_goal) * (config.max_speed * speed_factor);
    let force = clamp_magnitude(desired_velocity - flatten(velocity), config.max_force);
    Arrival {
        force,
        desired_velocity,
        goal_cleared: false,
    }
}

/// Where an actor sits in its pursuit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteeringPhase {
    /// No goal is held.
    #[default]
    Idle,
    /// A goal is held and force is applied every tick.
    Seeking,
    /// The goal was reached during the last tick; the goal is already gone.
    Arrived,
}

/// Goal-holding arrival controller for one vehicle.
#[derive(Debug, Clone)]
pub struct ArrivalSteering {
    config: SteeringConfig,
    target: Option<Vec3>,
    desired_velocity: Vec3,
    steering_force: Vec3,
    phase: SteeringPhase,
}

impl ArrivalSteering {
    /// Builds a controller after validating `config`.
    ///
    /// # Errors
    /// Returns [`crate::MotionError::InvalidConfig`] when `config` is invalid.
    pub fn new(config: SteeringConfig) -> Result<Self, crate::MotionError> {
        config.validate()?;
        Ok(Self {
            config,
            target: None,
            desired_velocity: Vec3::ZERO,
            steering_force: Vec3::ZERO,
            phase: SteeringPhase::Idle,
        })
    }

    /// Tuning in use.
    #[must_use]
    pub const fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Replaces the goal. The newest call wins.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = Some(target);
        self.phase = SteeringPhase::Seeking;
    }

    /// Current goal, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Lifecycle phase after the most recent tick or command.
    #[must_use]
    pub const fn phase(&self) -> SteeringPhase {
        self.phase
    }

    /// Desired velocity computed by the last tick.
    #[must_use]
    pub const fn desired_velocity(&self) -> Vec3 {
        self.desired_velocity
    }

    /// Clamped steering force computed by the last tick. Kept for diagnostics.
    #[must_use]
    pub const fn steering_force(&self) -> Vec3 {
        self.steering_force
    }

    /// Drops the goal immediately and brings `body` to rest.
    pub fn stop(&mut self, body: &mut VehicleBody) {
        self.clear(body);
        self.phase = SteeringPhase::Idle;
    }

    fn clear(&mut self, body: &mut VehicleBody) {
        self.target = None;
        self.desired_velocity = Vec3::ZERO;
        self.steering_force = Vec3::ZERO;
        body.halt();
    }

    /// Runs one fixed step: steer, rotate, accelerate, clamp, move.
    ///
    /// Without a goal the body still integrates, so leftover velocity from an
    /// impulse decays under drag and stays within `max_speed`.
    pub fn tick(&mut self, body: &mut VehicleBody, dt: f32) -> SteeringPhase {
        let max_speed = Some(self.config.max_speed);
        let Some(goal) = self.target else {
            self.phase = SteeringPhase::Idle;
            integrate(body, Vec3::ZERO, max_speed, dt);
            return self.phase;
        };

        let arrival = arrive(body.position, body.velocity, goal, &self.config);
        if arrival.goal_cleared {
            debug!("goal {goal} reached at {}", body.position);
            self.clear(body);
            self.phase = SteeringPhase::Arrived;
            integrate(body, Vec3::ZERO, max_speed, dt);
            return self.phase;
        }

        self.desired_velocity = arrival.desired_velocity;
        self.steering_force = arrival.force;
        self.rotate_towards_desired(body, dt);

        let facing = body.forward().dot(safe_normalize(self.desired_velocity)).max(0.0);
        integrate(body, self.steering_force * facing, max_speed, dt);
        self.phase = SteeringPhase::Seeking;
        self.phase
    }

    fn rotate_towards_desired(&self, body: &mut VehicleBody, dt: f32) {
        if self.desired_velocity.length_squared() < self.config.rotation_gate {
            return;
        }
        if let Some(look) = look_rotation(self.desired_velocity) {
            body.heading = slerp_heading(body.heading, look, self.config.rot_speed * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;
    use rstest::rstest;

    fn body_at(position: Vec3) -> VehicleBody {
        VehicleBody::new(position, Quat::IDENTITY, 0.0, 0.0)
    }

    fn steering() -> ArrivalSteering {
        ArrivalSteering::new(SteeringConfig::default()).expect("default config is valid")
    }

    #[rstest]
    #[case::far(5.0, 6.0)]
    #[case::at_slow_radius(1.5, 6.0)]
    #[case::halfway(0.75, 3.0)]
    fn desired_speed_follows_braking_curve(#[case] distance: f32, #[case] expected: f32) {
        let arrival = arrive(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, distance),
            &SteeringConfig::default(),
        );
        assert_relative_eq!(arrival.desired_velocity.length(), expected, epsilon = 1e-5);
    }

    #[test]
    fn height_difference_does_not_count_toward_distance() {
        let arrival = arrive(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(0.1, 50.0, 0.0),
            &SteeringConfig::default(),
        );
        assert!(arrival.goal_cleared);
    }

    #[test]
    fn no_forward_thrust_when_facing_away() {
        let mut slow_turner = ArrivalSteering::new(SteeringConfig {
            rot_speed: 1e-3,
            ..SteeringConfig::default()
        })
        .expect("valid config");
        let mut body = body_at(Vec3::ZERO);
        body.heading = Quat::from_rotation_y(std::f32::consts::PI);
        slow_turner.set_target(Vec3::new(0.0, 0.0, 10.0));
        slow_turner.tick(&mut body, 0.02);
        assert!(body.speed() < 1e-3, "speed {}", body.speed());
        assert!(slow_turner.target().is_some());
    }

    #[test]
    fn facing_goal_accelerates_toward_it() {
        let mut s = steering();
        let mut body = body_at(Vec3::ZERO);
        s.set_target(Vec3::new(0.0, 0.0, 10.0));
        s.tick(&mut body, 0.02);
        // Desired 6 from rest is below max_force, so the whole difference applies.
        assert_relative_eq!(body.velocity.z, 6.0 * 0.02, epsilon = 1e-5);
        assert_eq!(s.phase(), SteeringPhase::Seeking);
    }

    #[test]
    fn arrival_clears_goal_and_returns_to_idle() {
        let mut s = steering();
        let mut body = body_at(Vec3::ZERO);
        body.velocity = Vec3::new(0.5, 0.0, 0.0);
        s.set_target(Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(s.tick(&mut body, 0.02), SteeringPhase::Arrived);
        assert!(s.target().is_none());
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(s.tick(&mut body, 0.02), SteeringPhase::Idle);
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn stop_resets_everything() {
        let mut s = steering();
        let mut body = body_at(Vec3::ZERO);
        s.set_target(Vec3::new(0.0, 0.0, 10.0));
        s.tick(&mut body, 0.02);
        s.stop(&mut body);
        assert!(s.target().is_none());
        assert_eq!(s.phase(), SteeringPhase::Idle);
        assert_eq!(s.steering_force(), Vec3::ZERO);
        assert_eq!(s.desired_velocity(), Vec3::ZERO);
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn heading_turns_toward_desired_velocity() {
        let mut s = steering();
        let mut body = body_at(Vec3::ZERO);
        s.set_target(Vec3::new(10.0, 0.0, 0.0));
        let before = body.forward().dot(Vec3::X);
        s.tick(&mut body, 0.02);
        assert!(body.forward().dot(Vec3::X) > before);
    }
}
