//! Tuning for steering, traffic and avoidance.
//!
//! Every struct deserialises with defaults taken from [`crate::constants`],
//! so a JSON document only has to name the values it overrides. Validation
//! runs when a configuration is loaded and again when actors are built, which
//! keeps invalid values out of the tick loop.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AGENT_DRAG, AGENT_MAX_FORCE, AGENT_MAX_SPEED, AGENT_ROTATION_GATE, AGENT_ROT_SPEED,
    AGENT_SLOW_RADIUS, AGENT_STOP_DISTANCE, AVOID_RADIUS, AVOID_STRENGTH, COLLECTIBLE_RADIUS,
    FIXED_STEP, GROUND_HEIGHT, IDLE_BRAKE_OFFSET, MAX_SPEED_JITTER, TRAFFIC_COLLISION_PENALTY,
    TRAFFIC_DRAG, TRAFFIC_LATERAL_JITTER, TRAFFIC_LOOK_AHEAD, TRAFFIC_MAX_MID_POINTS,
    TRAFFIC_MID_POINTS, TRAFFIC_RADIUS, TRAFFIC_ROTATION_GATE, TRAFFIC_ROT_SPEED, TRAFFIC_SPEED, TRAFFIC_STEERING_FORCE,
    VEHICLE_RADIUS,
};
use crate::error::MotionError;

fn positive(field: &'static str, value: f32) -> Result<(), MotionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MotionError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), MotionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MotionError::invalid(
            field,
            format!("must be zero or positive, got {value}"),
        ))
    }
}

/// Arrival steering tuning for player and opponent vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Top planar speed.
    pub max_speed: f32,
    /// Largest steering acceleration.
    pub max_force: f32,
    /// Heading interpolation rate per second.
    pub rot_speed: f32,
    /// Distance at which braking begins.
    pub slow_radius: f32,
    /// Distance at which the goal is cleared.
    pub stop_distance: f32,
    /// Squared desired speed below which the heading is left alone.
    pub rotation_gate: f32,
    /// Linear damping of the body.
    pub drag: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: AGENT_MAX_SPEED,
            max_force: AGENT_MAX_FORCE,
            rot_speed: AGENT_ROT_SPEED,
            slow_radius: AGENT_SLOW_RADIUS,
            stop_distance: AGENT_STOP_DISTANCE,
            rotation_gate: AGENT_ROTATION_GATE,
            drag: AGENT_DRAG,
        }
    }
}

impl SteeringConfig {
    /// Checks every field and the braking-zone ordering.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] when a value is non-finite,
    /// out of range, or when `stop_distance` is not below `slow_radius`.
    pub fn validate(&self) -> Result<(), MotionError> {
        positive("steering.max_speed", self.max_speed)?;
        positive("steering.max_force", self.max_force)?;
        positive("steering.rot_speed", self.rot_speed)?;
        positive("steering.slow_radius", self.slow_radius)?;
        positive("steering.stop_distance", self.stop_distance)?;
        non_negative("steering.rotation_gate", self.rotation_gate)?;
        non_negative("steering.drag", self.drag)?;
        if self.stop_distance >= self.slow_radius {
            return Err(MotionError::invalid(
                "steering.stop_distance",
                format!(
                    "must be below slow_radius ({}), got {}",
                    self.slow_radius, self.stop_distance
                ),
            ));
        }
        Ok(())
    }
}

/// Path shape and motion tuning for traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Number of jittered interior control points.
    pub mid_points: u32,
    /// Parameter lead of the look-ahead target.
    pub look_ahead: f32,
    /// Bound of the lateral jitter on interior points.
    pub lateral_jitter: f32,
    /// Cruise speed.
    pub speed: f32,
    /// Largest steering acceleration.
    pub steering_force: f32,
    /// Linear damping of the body.
    pub drag: f32,
    /// Squared speed below which the heading is left alone.
    pub rotation_gate: f32,
    /// Heading interpolation rate per second.
    pub rot_speed: f32,
    /// Score delta reported to the orchestrator on a hit.
    pub collision_penalty: i32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            mid_points: TRAFFIC_MID_POINTS,
            look_ahead: TRAFFIC_LOOK_AHEAD,
            lateral_jitter: TRAFFIC_LATERAL_JITTER,
            speed: TRAFFIC_SPEED,
            steering_force: TRAFFIC_STEERING_FORCE,
            drag: TRAFFIC_DRAG,
            rotation_gate: TRAFFIC_ROTATION_GATE,
            rot_speed: TRAFFIC_ROT_SPEED,
            collision_penalty: TRAFFIC_COLLISION_PENALTY,
        }
    }
}

impl TrafficConfig {
    /// Checks every field.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] when `mid_points` is zero or
    /// above [`TRAFFIC_MAX_MID_POINTS`], or when a float is non-finite or
    /// out of range.
    pub fn validate(&self) -> Result<(), MotionError> {
        if self.mid_points == 0 {
            return Err(MotionError::invalid(
                "traffic.mid_points",
                "must be at least one",
            ));
        }
        if self.mid_points > TRAFFIC_MAX_MID_POINTS {
            return Err(MotionError::invalid(
                "traffic.mid_points",
                format!(
                    "must be at most {TRAFFIC_MAX_MID_POINTS}, got {}",
                    self.mid_points
                ),
            ));
        }
        non_negative("traffic.look_ahead", self.look_ahead)?;
        non_negative("traffic.lateral_jitter", self.lateral_jitter)?;
        positive("traffic.speed", self.speed)?;
        positive("traffic.steering_force", self.steering_force)?;
        non_negative("traffic.drag", self.drag)?;
        non_negative("traffic.rotation_gate", self.rotation_gate)?;
        positive("traffic.rot_speed", self.rot_speed)
    }
}

/// Traffic avoidance tuning for autonomous drivers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceConfig {
    /// Radius within which traffic contributes.
    pub radius: f32,
    /// Scale applied to the summed offset.
    pub strength: f32,
    /// Forward distance of the idle brake point.
    pub idle_brake_offset: f32,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            radius: AVOID_RADIUS,
            strength: AVOID_STRENGTH,
            idle_brake_offset: IDLE_BRAKE_OFFSET,
        }
    }
}

impl AvoidanceConfig {
    /// Checks every field.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] for a non-positive radius or a
    /// negative or non-finite strength or offset.
    pub fn validate(&self) -> Result<(), MotionError> {
        positive("avoidance.radius", self.radius)?;
        non_negative("avoidance.strength", self.strength)?;
        non_negative("avoidance.idle_brake_offset", self.idle_brake_offset)
    }
}

/// Complete configuration of a [`crate::world::MotionWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Tick length in seconds.
    pub fixed_step: f32,
    /// Height bodies are pinned to.
    pub ground_height: f32,
    /// Collider radius of player and opponent vehicles.
    pub vehicle_radius: f32,
    /// Collider radius of traffic.
    pub traffic_radius: f32,
    /// Collider radius of collectibles.
    pub collectible_radius: f32,
    /// Default bound for opponent top-speed jitter.
    pub max_speed_jitter: f32,
    /// Seed of the world RNG.
    pub seed: u64,
    /// Arrival steering tuning.
    pub steering: SteeringConfig,
    /// Traffic tuning.
    pub traffic: TrafficConfig,
    /// Avoidance tuning.
    pub avoidance: AvoidanceConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            fixed_step: FIXED_STEP,
            ground_height: GROUND_HEIGHT,
            vehicle_radius: VEHICLE_RADIUS,
            traffic_radius: TRAFFIC_RADIUS,
            collectible_radius: COLLECTIBLE_RADIUS,
            max_speed_jitter: MAX_SPEED_JITTER,
            seed: 0,
            steering: SteeringConfig::default(),
            traffic: TrafficConfig::default(),
            avoidance: AvoidanceConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Checks this configuration and every nested one.
    ///
    /// # Errors
    /// Returns the first [`MotionError::InvalidConfig`] encountered.
    pub fn validate(&self) -> Result<(), MotionError> {
        positive("fixed_step", self.fixed_step)?;
        if !self.ground_height.is_finite() {
            return Err(MotionError::invalid("ground_height", "must be finite"));
        }
        positive("vehicle_radius", self.vehicle_radius)?;
        positive("traffic_radius", self.traffic_radius)?;
        positive("collectible_radius", self.collectible_radius)?;
        non_negative("max_speed_jitter", self.max_speed_jitter)?;
        self.steering.validate()?;
        self.traffic.validate()?;
        self.avoidance.validate()
    }

    /// Parses and validates a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use cashrun::config::WorldConfig;
    /// let config = WorldConfig::from_json_str(r#"{ "seed": 7, "steering": { "max_speed": 9.0 } }"#)
    ///     .expect("valid config");
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.steering.max_speed, 9.0);
    /// assert_eq!(config.steering.max_force, 25.0);
    /// ```
    ///
    /// # Errors
    /// Returns [`MotionError::ConfigParse`] for malformed JSON and
    /// [`MotionError::InvalidConfig`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, MotionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`MotionError::ConfigIo`] when the file cannot be read, and
    /// otherwise the errors of [`WorldConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MotionError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|source| MotionError::ConfigIo {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::equal(1.5, 1.5)]
    #[case::above(1.5, 2.0)]
    fn stop_distance_must_sit_inside_slow_radius(#[case] slow: f32, #[case] stop: f32) {
        let config = SteeringConfig {
            slow_radius: slow,
            stop_distance: stop,
            ..SteeringConfig::default()
        };
        let err = config.validate().expect_err("ordering violation");
        assert!(matches!(
            err,
            MotionError::InvalidConfig {
                field: "steering.stop_distance",
                ..
            }
        ));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-1.0)]
    #[case::nan(f32::NAN)]
    fn max_speed_must_be_positive(#[case] speed: f32) {
        let config = SteeringConfig {
            max_speed: speed,
            ..SteeringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn traffic_needs_interior_points() {
        let config = TrafficConfig {
            mid_points: 0,
            ..TrafficConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    #[case::just_above(TRAFFIC_MAX_MID_POINTS + 1)]
    #[case::huge(u32::MAX)]
    fn traffic_interior_points_are_bounded(#[case] mid_points: u32) {
        let config = TrafficConfig {
            mid_points,
            ..TrafficConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MotionError::InvalidConfig {
                field: "traffic.mid_points",
                ..
            })
        ));
    }

    #[test]
    fn largest_interior_point_count_is_accepted() {
        let config = TrafficConfig {
            mid_points: TRAFFIC_MAX_MID_POINTS,
            ..TrafficConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_path_in_json_is_rejected() {
        let result = WorldConfig::from_json_str(r#"{ "traffic": { "mid_points": 4294967295 } }"#);
        assert!(matches!(result, Err(MotionError::InvalidConfig { .. })));
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let result = WorldConfig::from_json_str(r#"{ "avoidance": { "radius": 0.0 } }"#);
        assert!(matches!(result, Err(MotionError::InvalidConfig { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = WorldConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(MotionError::ConfigParse(_))));
    }
}
