//! Jittered control polylines and Catmull-Rom evaluation.
//!
//! A path runs from a fixed start to a fixed end through `mid_count`
//! interior points. Interior points sit at even steps along the straight
//! line and are pushed sideways by a uniform random offset. The curve is
//! evaluated with a uniform Catmull-Rom basis, duplicating the boundary point
//! instead of reading past either end.
use glam::Vec3;
use rand::Rng;

use crate::constants::TRAFFIC_MAX_MID_POINTS;
use crate::error::MotionError;
use crate::numeric::{count_to_f32, floor_to_index, index_to_f32};
use crate::vector_math::{flatten, safe_normalize};

/// Immutable control points of one traffic path.
#[derive(Debug, Clone, PartialEq)]
pub struct SplinePath {
    points: Vec<Vec3>,
}

impl SplinePath {
    /// Generates `mid_count + 2` control points from `start` to `end`.
    ///
    /// Each interior point is displaced along the horizontal axis
    /// perpendicular to the travel direction by a value drawn uniformly from
    /// `[-jitter_bound, jitter_bound]`, and its height is zeroed.
    ///
    /// # Errors
    /// Returns [`MotionError::DegeneratePath`] when `start` and `end` share a
    /// planar position, and [`MotionError::InvalidConfig`] when
    /// `jitter_bound` is negative or non-finite or `mid_count` exceeds
    /// [`TRAFFIC_MAX_MID_POINTS`].
    pub fn generate<R: Rng + ?Sized>(
        start: Vec3,
        end: Vec3,
        mid_count: u32,
        jitter_bound: f32,
        rng: &mut R,
    ) -> Result<Self, MotionError> {
        if mid_count > TRAFFIC_MAX_MID_POINTS {
            return Err(MotionError::invalid(
                "traffic.mid_points",
                format!("must be at most {TRAFFIC_MAX_MID_POINTS}, got {mid_count}"),
            ));
        }
        if !(jitter_bound.is_finite() && jitter_bound >= 0.0) {
            return Err(MotionError::invalid(
                "traffic.lateral_jitter",
                format!("must be zero or positive, got {jitter_bound}"),
            ));
        }
        let flow = safe_normalize(flatten(end - start));
        if flow == Vec3::ZERO {
            return Err(MotionError::DegeneratePath { start, end });
        }
        let side = Vec3::Y.cross(flow);
        let step = flatten(end - start).length() / (count_to_f32(mid_count) + 1.0);

        let mut points = Vec::with_capacity(mid_count as usize + 2);
        points.push(start);
        for i in 1..=mid_count {
            let lateral = if jitter_bound > 0.0 {
                rng.gen_range(-jitter_bound..=jitter_bound)
            } else {
                0.0
            };
            let point = start + flow * (step * count_to_f32(i)) + side * lateral;
            points.push(Vec3::new(point.x, 0.0, point.z));
        }
        points.push(end);
        Ok(Self { points })
    }

    /// Wraps an explicit list of control points.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] for fewer than two points.
    pub fn from_points(points: Vec<Vec3>) -> Result<Self, MotionError> {
        if points.len() < 2 {
            return Err(MotionError::invalid(
                "path.points",
                format!("needs at least two control points, got {}", points.len()),
            ));
        }
        Ok(Self { points })
    }

    /// Control points in order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a path holds at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First control point.
    #[must_use]
    pub fn first(&self) -> Vec3 {
        self.points.first().copied().unwrap_or(Vec3::ZERO)
    }

    /// Last control point.
    #[must_use]
    pub fn last(&self) -> Vec3 {
        self.points.last().copied().unwrap_or(Vec3::ZERO)
    }

    /// Largest meaningful progress parameter, `len - 1`.
    #[must_use]
    pub fn max_t(&self) -> f32 {
        index_to_f32(self.points.len().saturating_sub(1))
    }

    fn point(&self, index: isize) -> Vec3 {
        let last = self.points.len().saturating_sub(1);
        let clamped = usize::try_from(index.max(0)).unwrap_or(0).min(last);
        self.points.get(clamped).copied().unwrap_or(Vec3::ZERO)
    }

    /// Position on the curve at progress `t`.
    ///
    /// `t` is clamped to `[0, max_t]`, so the first and last control points
    /// are returned exactly at the ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use cashrun::spline::SplinePath;
    /// use glam::Vec3;
    ///
    /// let path = SplinePath::from_points(vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)])
    ///     .expect("two or more points");
    /// assert_eq!(path.evaluate(0.0), Vec3::ZERO);
    /// assert_eq!(path.evaluate(2.0), Vec3::new(2.0, 0.0, 0.0));
    /// // The first segment reuses the start point as its outer neighbour.
    /// assert!((path.evaluate(0.5).x - 0.4375).abs() < 1e-5);
    /// ```
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let max_t = self.max_t();
        let clamped_t = if t.is_finite() { t.clamp(0.0, max_t) } else { 0.0 };
        let segment = floor_to_index(clamped_t, self.points.len().saturating_sub(2));
        let local_t = clamped_t - index_to_f32(segment);
        let i = isize::try_from(segment).unwrap_or(0);

        let p1 = self.point(i);
        let p2 = self.point(i + 1);
        if local_t <= 0.0 {
            return p1;
        }
        if local_t >= 1.0 {
            return p2;
        }
        catmull_rom(self.point(i - 1), p1, p2, self.point(i + 2), local_t)
    }

    /// Walks the curve in increments of `step`, always ending on the last
    /// control point.
    ///
    /// Useful for drawing the path or checking its shape. A non-positive or
    /// non-finite step yields only the two endpoints.
    #[must_use]
    pub fn sample(&self, step: f32) -> Vec<Vec3> {
        let max_t = self.max_t();
        let mut samples = vec![self.first()];
        if step.is_finite() && step > 0.0 {
            let mut t = step;
            while t < max_t {
                samples.push(self.evaluate(t));
                t += step;
            }
        }
        samples.push(self.last());
        samples
    }
}

/// Uniform Catmull-Rom blend of four points at `t` in `[0, 1]`.
#[must_use]
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}
