//! Planar vector helpers.
//!
//! Every body moves in the x/z plane with +Z as its local forward axis and
//! +Y as up. Any helper that normalises returns the zero vector instead of
//! `NaN` when its input is zero or non-finite.
use glam::{Quat, Vec3};

/// Drops the vertical component of `vector`.
#[must_use]
pub const fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Returns the unit vector in the direction of `vector`.
///
/// The zero vector and vectors with non-finite components map to zero.
///
/// # Examples
///
/// ```
/// use cashrun::vector_math::safe_normalize;
/// use glam::Vec3;
///
/// let unit = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.z - 0.8).abs() < 1e-6);
/// assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
/// ```
#[must_use]
pub fn safe_normalize(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Scales `vector` down so its length does not exceed `max_length`.
#[must_use]
pub fn clamp_magnitude(vector: Vec3, max_length: f32) -> Vec3 {
    let length_sq = vector.length_squared();
    if length_sq <= max_length * max_length {
        return vector;
    }
    safe_normalize(vector) * max_length
}

/// Distance between `a` and `b` ignoring height.
#[must_use]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a - b).length()
}

/// Planar forward axis of a body with the given heading.
#[must_use]
pub fn forward(heading: Quat) -> Vec3 {
    safe_normalize(flatten(heading * Vec3::Z))
}

/// Heading that points the forward axis along `direction`.
///
/// Returns `None` when the planar part of `direction` has no length, since
/// no heading is defined for it.
#[must_use]
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let planar = safe_normalize(flatten(direction));
    if planar == Vec3::ZERO {
        return None;
    }
    Some(Quat::from_rotation_y(planar.x.atan2(planar.z)))
}

/// Spherically interpolates `from` toward `to`, clamping `fraction` to `[0, 1]`.
#[must_use]
pub fn slerp_heading(from: Quat, to: Quat, fraction: f32) -> Quat {
    from.slerp(to, fraction.clamp(0.0, 1.0)).normalize()
}
