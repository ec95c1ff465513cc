//! Goal selection for autonomous drivers.
//!
//! Each tick an autonomous driver keeps (or picks) the nearest collectible
//! and adds a repulsion vector pushing it away from nearby traffic. With
//! nothing to chase it parks its goal just ahead of itself, and the same
//! repulsion still applies.
use glam::Vec3;
use log::debug;
use ordered_float::OrderedFloat;

use crate::config::AvoidanceConfig;
use crate::entity::{Collectible, CollectibleId};
use crate::vector_math::{flatten, safe_normalize};

/// A collectible the driver is currently chasing.
///
/// Only the handle and last seen position are kept. The collectible itself
/// belongs to the orchestrator and is revalidated every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldTarget {
    /// Handle of the chased collectible.
    pub id: CollectibleId,
    /// Its position when last seen.
    pub position: Vec3,
}

impl From<&Collectible> for HeldTarget {
    fn from(collectible: &Collectible) -> Self {
        Self {
            id: collectible.id,
            position: collectible.position,
        }
    }
}

/// Returns the collectible closest to `position`.
///
/// Ties go to the earliest element in `collectibles`.
#[must_use]
pub fn nearest_collectible(position: Vec3, collectibles: &[Collectible]) -> Option<&Collectible> {
    collectibles
        .iter()
        .min_by_key(|c| OrderedFloat(position.distance(c.position)))
}

/// Sums a linear-falloff push away from every obstacle inside the radius.
///
/// Each obstacle closer than `config.radius` contributes its planar direction
/// away from the obstacle weighted by `1 - distance / radius`. The sum is
/// scaled by `config.strength`. An obstacle at exactly `position` has no
/// defined direction and contributes nothing.
#[must_use]
pub fn avoidance_offset(position: Vec3, obstacles: &[Vec3], config: &AvoidanceConfig) -> Vec3 {
    let mut offset = Vec3::ZERO;

    for &obstacle in obstacles {
        let away = flatten(position - obstacle);
        let distance = away.length();
        if distance >= config.radius {
            continue;
        }
        let weight = 1.0 - distance / config.radius;
        offset += safe_normalize(away) * weight;
    }

    offset * config.strength
}

/// Per-driver pursuit and idle state.
#[derive(Debug, Clone)]
pub struct GoalSelector {
    config: AvoidanceConfig,
    target: Option<HeldTarget>,
    brake_point: Option<Vec3>,
}

impl GoalSelector {
    /// Builds a selector after validating `config`.
    ///
    /// # Errors
    /// Returns [`crate::MotionError::InvalidConfig`] when `config` is invalid.
    pub fn new(config: AvoidanceConfig) -> Result<Self, crate::MotionError> {
        config.validate()?;
        Ok(Self {
            config,
            target: None,
            brake_point: None,
        })
    }

    /// Collectible currently chased.
    #[must_use]
    pub const fn held_target(&self) -> Option<HeldTarget> {
        self.target
    }

    /// Parked idle goal, present only while nothing is chased.
    #[must_use]
    pub const fn brake_point(&self) -> Option<Vec3> {
        self.brake_point
    }

    /// Picks this tick's steering goal.
    ///
    /// `forward` is the driver's planar forward axis, used once to place the
    /// idle brake point. `traffic` holds obstacle positions from the end of
    /// the previous tick.
    pub fn select_goal(
        &mut self,
        position: Vec3,
        forward: Vec3,
        collectibles: &[Collectible],
        traffic: &[Vec3],
    ) -> Vec3 {
        self.revalidate(collectibles);
        if self.target.is_none() {
            self.target = nearest_collectible(position, collectibles).map(HeldTarget::from);
            if let Some(target) = self.target {
                debug!("picked {} at {}", target.id, target.position);
            }
        }

        let base = match self.target {
            Some(target) => {
                self.brake_point = None;
                target.position
            }
            None => *self
                .brake_point
                .get_or_insert(position + forward * self.config.idle_brake_offset),
        };

        let goal = base + avoidance_offset(position, traffic, &self.config);
        Vec3::new(goal.x, position.y, goal.z)
    }

    fn revalidate(&mut self, collectibles: &[Collectible]) {
        let Some(held) = self.target else {
            return;
        };
        match collectibles.iter().find(|c| c.id == held.id) {
            Some(live) => self.target = Some(HeldTarget::from(live)),
            None => {
                debug!("{} vanished, reselecting", held.id);
                self.target = None;
            }
        }
    }

    /// Reports a contact with `collectible`.
    ///
    /// Returns `true` when it sits exactly where the chased target was, which
    /// tells the caller to stop steering right away instead of waiting for
    /// the stop-distance check.
    #[must_use]
    pub fn on_collectible_contact(&self, collectible: &Collectible) -> bool {
        self.target
            .is_some_and(|held| held.position == collectible.position)
    }
}
