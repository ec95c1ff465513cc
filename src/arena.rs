//! Circular play area used to place spawns.
//!
//! Traffic enters on a random edge point and crosses to the diametrically
//! opposite one. Collectibles appear in an annulus inside the edge, with
//! area-uniform density.
use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::entity::SpawnPose;
use crate::vector_math::{flatten, safe_normalize};

/// A circle of `radius` centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    /// Radius of the edge.
    pub radius: f32,
}

impl Arena {
    /// Builds an arena with the given edge radius.
    #[must_use]
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Point on the edge in the planar direction of `direction`.
    ///
    /// A direction without planar length maps to the centre.
    #[must_use]
    pub fn point_on_edge(&self, direction: Vec3) -> Vec3 {
        safe_normalize(flatten(direction)) * self.radius
    }

    /// Uniformly random point on the edge.
    pub fn random_point_on_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let angle = rng.gen_range(0.0..TAU);
        Vec3::new(angle.cos(), 0.0, angle.sin()) * self.radius
    }

    /// Random point whose distance from the centre lies in
    /// `[min_radius, max_radius]`, uniform over the annulus area.
    ///
    /// The bounds are swapped if given in the wrong order.
    pub fn random_point_inside<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_radius: f32,
        max_radius: f32,
    ) -> Vec3 {
        let (low, high) = if min_radius <= max_radius {
            (min_radius, max_radius)
        } else {
            (max_radius, min_radius)
        };
        let r_sq = if high > low {
            rng.gen_range(low * low..=high * high)
        } else {
            low * low
        };
        let r = r_sq.max(0.0).sqrt();
        let angle = rng.gen_range(0.0..TAU);
        Vec3::new(angle.cos() * r, 0.0, angle.sin() * r)
    }

    /// Start and end of a traffic crossing through the arena.
    pub fn traffic_crossing<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec3, Vec3) {
        let start = self.random_point_on_edge(rng);
        (start, self.point_on_edge(-start))
    }

    /// `count` evenly spaced poses halfway to the edge, each facing the centre.
    #[must_use]
    pub fn spawn_poses(&self, count: usize) -> Vec<SpawnPose> {
        let spacing = TAU / crate::numeric::index_to_f32(count.max(1));
        (0..count)
            .map(|i| {
                let angle = spacing * crate::numeric::index_to_f32(i);
                let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * (self.radius * 0.5);
                let facing = -position;
                SpawnPose::facing(position, facing.x.atan2(facing.z))
            })
            .collect()
    }
}
