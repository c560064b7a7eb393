//! Easing curves.

/// Quintic ease-in-out: slow start, fast middle, slow finish.
///
/// Maps `[0, 1]` onto `[0, 1]` with `f(0) = 0`, `f(0.5) = 0.5`, `f(1) = 1`.
#[inline]
pub fn ease_in_out_quint(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}
