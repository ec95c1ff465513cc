//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point and integer
//! domains, mainly for turning a continuous path parameter into a control
//! point index.

/// Floor `value` and clamp it into `0..=max_index`.
///
/// Non-finite inputs map to `0`.
///
/// # Examples
///
/// ```
/// use cashrun::numeric::floor_to_index;
/// assert_eq!(floor_to_index(1.7, 3), 1);
/// assert_eq!(floor_to_index(-2.0, 3), 0);
/// assert_eq!(floor_to_index(9.0, 3), 3);
/// assert_eq!(floor_to_index(f32::NAN, 3), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The floored value is checked to be non-negative and the cast saturates."
)]
#[must_use]
pub fn floor_to_index(value: f32, max_index: usize) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let floored = value.floor();
    if floored <= 0.0 {
        return 0;
    }
    (floored as usize).min(max_index)
}

/// Convert a small index or count into `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Control point counts are tiny compared with f32 precision."
)]
#[must_use]
pub const fn index_to_f32(index: usize) -> f32 {
    index as f32
}

/// Convert a `u32` count into `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Configured counts are tiny compared with f32 precision."
)]
#[must_use]
pub const fn count_to_f32(count: u32) -> f32 {
    count as f32
}
