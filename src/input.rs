//! Pointer input for the human-controlled vehicle.
use glam::Vec3;

use crate::steering::ArrivalSteering;

/// Holds the most recent world-space point picked by the player.
///
/// Points are not filtered or queued; a newer submission replaces an older
/// one that has not been applied yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pending: Option<Vec3>,
}

impl PointerInput {
    /// Records `point` as the next goal.
    pub fn submit(&mut self, point: Vec3) {
        self.pending = Some(point);
    }

    /// Point waiting to be applied.
    #[must_use]
    pub const fn pending(&self) -> Option<Vec3> {
        self.pending
    }

    /// Hands the pending point, if any, to `steering`.
    pub fn apply(&mut self, steering: &mut ArrivalSteering) {
        if let Some(point) = self.pending.take() {
            steering.set_target(point);
        }
    }
}
