//! Outbound notifications drained by the orchestrator once per tick.
use crate::entity::{ActorId, CollectibleId};

/// Something the orchestrator has to react to.
///
/// Contact events fire once when an overlap begins. The pair has to separate
/// before it can report again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// A driver's collider started overlapping a collectible.
    CollectibleContact {
        /// The driver.
        actor: ActorId,
        /// The collectible touched.
        collectible: CollectibleId,
        /// Value attached to the collectible.
        value: i32,
    },
    /// A driver's collider started overlapping a traffic vehicle.
    TrafficContact {
        /// The driver.
        actor: ActorId,
        /// The traffic vehicle hit.
        traffic: ActorId,
        /// Penalty attached to the traffic vehicle.
        penalty: i32,
    },
    /// A traffic vehicle finished its path and was removed.
    ActorDestroyed {
        /// The removed actor.
        actor: ActorId,
    },
}

impl MotionEvent {
    /// The actor this event is about.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        match *self {
            Self::CollectibleContact { actor, .. }
            | Self::TrafficContact { actor, .. }
            | Self::ActorDestroyed { actor } => actor,
        }
    }
}
