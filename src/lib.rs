//! Movement core of a top-down arcade driving game.
//!
//! Steering drives vehicle bodies toward goals with arrival braking, traffic
//! follows jittered Catmull-Rom paths, and autonomous drivers pick the
//! nearest collectible while steering clear of traffic. [`MotionWorld`] owns
//! every body and runs them on one fixed step.
pub mod actor;
pub mod arena;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod spline;
pub mod steering;
pub mod traffic;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use actor::{avoidance_offset, nearest_collectible, GoalSelector, HeldTarget};
pub use arena::Arena;
pub use config::{AvoidanceConfig, SteeringConfig, TrafficConfig, WorldConfig};
pub use entity::{ActorId, ActorKind, Collectible, CollectibleId, SpawnPose};
pub use error::MotionError;
pub use events::MotionEvent;
pub use input::PointerInput;
pub use logging::init as init_logging;
pub use physics::{integrate, VehicleBody};
pub use spline::SplinePath;
pub use steering::{arrive, Arrival, ArrivalSteering, SteeringPhase};
pub use traffic::{TrafficController, TrafficTick};
pub use vector_math::{clamp_magnitude, flatten, safe_normalize};
pub use world::MotionWorld;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use cashrun::prelude::*;
    //! ```

    pub use crate::MotionError;
    pub use crate::MotionEvent;
    pub use crate::MotionWorld;
    pub use crate::SpawnPose;
    pub use crate::WorldConfig;
    pub use glam::Vec3;
}
