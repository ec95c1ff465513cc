//! Utility helpers for tests.
pub mod physics;

use glam::Vec3;

/// Assert that `actual` lies within `tolerance` of `expected` in every axis.
///
/// # Panics
/// Panics with both vectors in the message when any component differs by
/// more than `tolerance`.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    let delta = (actual - expected).abs();
    assert!(
        delta.max_element() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// Assert that `actual` lies within `tolerance` of `expected` ignoring height.
///
/// # Panics
/// Panics with both vectors in the message when the planar distance exceeds
/// `tolerance`.
pub fn assert_planar_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    let distance = cashrun::vector_math::planar_distance(actual, expected);
    assert!(
        distance <= tolerance,
        "expected {expected}, got {actual} (planar distance {distance})"
    );
}
