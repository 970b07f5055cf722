//! L4 Atomic Layer: Easing function for count animations
//!
//! Maps linear progress in [0, 1] to decelerating progress in [0, 1].

/// Cubic ease-out: f(t) = 1 - (1-t)³
///
/// Fast at the start, slow near the end. Returns exactly 0 at t=0 and
/// exactly 1 at t=1. Input is not clamped.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
