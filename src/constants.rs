//! Tuning constants shared across the movement systems.
//!
//! These are the defaults every configuration starts from. Values are in
//! world units, seconds and radians unless noted otherwise.

/// Length of one simulation tick in seconds (50 Hz).
pub const FIXED_STEP: f32 = 0.02;
/// Height every body is pinned to after integration.
pub const GROUND_HEIGHT: f32 = 0.0;

/// Top speed of a steered vehicle.
pub const AGENT_MAX_SPEED: f32 = 6.0;
/// Largest steering acceleration a steered vehicle may apply.
pub const AGENT_MAX_FORCE: f32 = 25.0;
/// Heading interpolation rate of a steered vehicle.
pub const AGENT_ROT_SPEED: f32 = 15.0;
/// Distance at which arrival braking begins.
pub const AGENT_SLOW_RADIUS: f32 = 1.5;
/// Distance at which a goal counts as reached.
pub const AGENT_STOP_DISTANCE: f32 = 0.2;
/// Desired velocities with a smaller squared magnitude leave the heading alone.
pub const AGENT_ROTATION_GATE: f32 = 0.1;
/// Linear damping of a steered vehicle.
pub const AGENT_DRAG: f32 = 0.0;

/// Number of jittered interior points on a traffic path.
pub const TRAFFIC_MID_POINTS: u32 = 2;
/// Largest accepted number of interior points on a traffic path.
pub const TRAFFIC_MAX_MID_POINTS: u32 = 64;
/// Parameter distance the traffic look-ahead target leads progress by.
pub const TRAFFIC_LOOK_AHEAD: f32 = 0.6;
/// Bound of the lateral offset applied to interior path points.
pub const TRAFFIC_LATERAL_JITTER: f32 = 0.3;
/// Cruise speed of traffic.
pub const TRAFFIC_SPEED: f32 = 8.0;
/// Largest steering acceleration traffic may apply.
pub const TRAFFIC_STEERING_FORCE: f32 = 20.0;
/// Linear damping of traffic bodies.
pub const TRAFFIC_DRAG: f32 = 4.0;
/// Velocities with a smaller squared magnitude leave the traffic heading alone.
pub const TRAFFIC_ROTATION_GATE: f32 = 0.01;
/// Heading interpolation rate of traffic.
pub const TRAFFIC_ROT_SPEED: f32 = 10.0;
/// Score delta reported when a driver hits a traffic body.
pub const TRAFFIC_COLLISION_PENALTY: i32 = -10_000;
/// Empirical divisor turning traffic speed into path progress per second.
pub const TRAFFIC_PACING_DIVISOR: f32 = 5.0;
/// Planar distance to the final path point at which traffic is finished.
pub const TRAFFIC_ARRIVAL_EPSILON: f32 = 0.1;

/// Radius within which traffic pushes autonomous drivers away.
pub const AVOID_RADIUS: f32 = 2.0;
/// Scale applied to the summed avoidance vector.
pub const AVOID_STRENGTH: f32 = 1.5;
/// Distance ahead of an idle autonomous driver at which it parks its goal.
pub const IDLE_BRAKE_OFFSET: f32 = 0.1;
/// Bound of the random offset applied to an opponent's top speed.
pub const MAX_SPEED_JITTER: f32 = 2.0;

/// Collider radius of player and opponent vehicles.
pub const VEHICLE_RADIUS: f32 = 0.35;
/// Collider radius of traffic vehicles.
pub const TRAFFIC_RADIUS: f32 = 0.4;
/// Collider radius of collectibles.
pub const COLLECTIBLE_RADIUS: f32 = 0.25;
