//! Handles and plain records for things living in the world.
use std::fmt;

use glam::{Quat, Vec3};

/// Handle of a vehicle owned by a [`crate::world::MotionWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Handle of a collectible registered by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectibleId(pub u64);

impl CollectibleId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CollectibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collectible#{}", self.0)
    }
}

/// Role of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// Steered toward externally supplied pointer targets.
    Player,
    /// Chooses its own goals among collectibles while avoiding traffic.
    Autonomous,
    /// Follows a generated path and is destroyed at its end.
    Traffic,
}

impl ActorKind {
    /// Whether the actor collects and reports contacts.
    #[must_use]
    pub const fn is_driver(self) -> bool {
        matches!(self, Self::Player | Self::Autonomous)
    }
}

/// A pickup worth `value` points, owned by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    /// Handle used in contact events.
    pub id: CollectibleId,
    /// World position; collectibles never move.
    pub position: Vec3,
    /// Score value reported on contact.
    pub value: i32,
}

/// Position and heading an actor is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPose {
    /// Initial position. The height is replaced by the ground height.
    pub position: Vec3,
    /// Initial heading about the up axis.
    pub heading: Quat,
}

impl SpawnPose {
    /// Pose at `position` facing +Z.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            heading: Quat::IDENTITY,
        }
    }

    /// Pose at `position` rotated `yaw` radians about the up axis.
    #[must_use]
    pub fn facing(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            heading: Quat::from_rotation_y(yaw),
        }
    }
}
