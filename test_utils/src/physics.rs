//! Convenience constructors for bodies, paths and worlds used in tests.

use cashrun::{
    ActorId, MotionWorld, SpawnPose, SplinePath, SteeringConfig, TrafficConfig, VehicleBody,
    WorldConfig,
};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG for tests.
///
/// # Examples
/// ```
/// use rand::Rng;
/// use test_utils::physics::seeded_rng;
/// let a: u32 = seeded_rng(3).gen();
/// let b: u32 = seeded_rng(3).gen();
/// assert_eq!(a, b);
/// ```
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Undamped body at `position` facing +Z on the default ground.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use test_utils::physics::body_at;
/// let b = body_at(Vec3::new(1.0, 5.0, 2.0));
/// assert_eq!(b.position, Vec3::new(1.0, 0.0, 2.0));
/// ```
pub fn body_at(position: Vec3) -> VehicleBody {
    VehicleBody::new(position, Quat::IDENTITY, 0.0, 0.0)
}

/// Body at `position` whose forward axis points along `direction`.
pub fn body_facing(position: Vec3, direction: Vec3) -> VehicleBody {
    let heading = cashrun::vector_math::look_rotation(direction).unwrap_or(Quat::IDENTITY);
    VehicleBody::new(position, heading, 0.0, 0.0)
}

/// Default steering tuning.
pub fn steering_config() -> SteeringConfig {
    SteeringConfig::default()
}

/// Traffic tuning without lateral jitter, so paths are straight.
pub fn straight_traffic_config() -> TrafficConfig {
    TrafficConfig {
        lateral_jitter: 0.0,
        ..TrafficConfig::default()
    }
}

/// Straight path from `start` to `end` with `mid` evenly spaced interior points.
///
/// # Panics
/// Panics if `start` and `end` coincide.
pub fn straight_path(start: Vec3, end: Vec3, mid: u32) -> SplinePath {
    SplinePath::generate(start, end, mid, 0.0, &mut seeded_rng(0))
        .unwrap_or_else(|e| panic!("straight path: {e}"))
}

/// World with default tuning except straight traffic paths.
///
/// # Panics
/// Panics if the configuration is rejected.
pub fn world() -> MotionWorld {
    let config = WorldConfig {
        traffic: straight_traffic_config(),
        ..WorldConfig::default()
    };
    MotionWorld::new(config).unwrap_or_else(|e| panic!("world config: {e}"))
}

/// World holding one autonomous driver at `position` facing +Z with no
/// speed jitter.
///
/// # Panics
/// Panics if the actor cannot be created.
pub fn world_with_opponent(position: Vec3) -> (MotionWorld, ActorId) {
    let mut w = world();
    let id = w
        .create_autonomous_actor(SpawnPose::at(position), 0.0)
        .unwrap_or_else(|e| panic!("opponent: {e}"));
    (w, id)
}

/// World holding the player at `position` facing +Z.
///
/// # Panics
/// Panics if the actor cannot be created.
pub fn world_with_player(position: Vec3) -> (MotionWorld, ActorId) {
    let mut w = world();
    let id = w
        .create_player_actor(SpawnPose::at(position))
        .unwrap_or_else(|e| panic!("player: {e}"));
    (w, id)
}
