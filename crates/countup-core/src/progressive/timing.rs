//! L4 Atomic Layer: Step arithmetic, interpolation and value formatting
//!
//! Pure functions shared by the controller and the scheduler.

use std::time::Duration;

/// Number of discrete steps needed to cover `duration` at one step per `delay`
///
/// Always at least 1. A zero `delay` also yields 1; callers reject it earlier.
#[inline]
pub fn total_steps(duration: Duration, delay: Duration) -> u64 {
    let delay = delay.as_nanos();
    if delay == 0 {
        return 1;
    }
    let steps = duration.as_nanos() / delay;
    steps.clamp(1, u64::MAX as u128) as u64
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor, not clamped
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + t * (to - from)
}

/// Extra digits rendered before rounding by hand
const GUARD_DIGITS: usize = 30;

/// Format a number with exactly `decimals` fractional digits
///
/// Halfway cases round away from zero on the exact binary value, so
/// `2.5` with 0 decimals gives `"3"`. Negative zero prints as `"0"`,
/// NaN as `"NaN"` and infinities as `"Infinity"` / `"-Infinity"`.
///
/// Magnitudes of 1e21 and above are written out in full digits, unlike
/// JavaScript's `toFixed`, which switches to exponent notation (`"1e+21"`).
pub fn format_fixed(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let decimals = decimals as usize;
    let wide = format!("{:.*}", decimals + GUARD_DIGITS, value.abs());
    let (int_part, frac_part) = wide.split_once('.').unwrap_or((wide.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    let round_up = frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5');

    let mut int_len = int_part.len();
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| *d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| *d as char));
    }
    out
}
