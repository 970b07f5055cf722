//! L3 Molecular Layer: Progressive number controller
//!
//! Combines endpoints, easing and step arithmetic into a value that advances
//! one discrete step at a time. Time is handled by the caller.

use std::time::Duration;

use super::easing::ease_out_cubic;
use super::endpoint::Endpoint;
use super::timing::{format_fixed, lerp, total_steps};
use crate::{Error, Result};

/// Largest supported number of fractional digits
pub const MAX_DECIMALS: u32 = 100;

/// Formatting and timing options for a progressive number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOptions {
    /// Fractional digits in formatted values
    pub decimals: u32,
    /// Total time span of the animation
    pub duration: Duration,
    /// Time between steps (must be > 0)
    pub delay: Duration,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            decimals: 0,
            duration: Duration::from_millis(1500),
            delay: Duration::from_millis(5),
        }
    }
}

impl ProgressOptions {
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Reject configurations that cannot be animated
    pub fn validate(&self) -> Result<()> {
        if self.delay.is_zero() {
            return Err(Error::InvalidDelay);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(Error::InvalidDecimals(self.decimals));
        }
        Ok(())
    }
}

/// Result of a single advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Formatted current value
    pub value: String,
    /// Step index after the advance
    pub step: u64,
    /// Whether the target has been reached
    pub done: bool,
}

/// A number that moves from `initial` to `target` in eased, discrete steps
///
/// Starts at step 1 with `current == initial`. Each [`advance`](Self::advance)
/// moves one step along a cubic ease-out curve. Once progress reaches 1 the
/// value snaps to `target` exactly and further advances report `done`.
#[derive(Debug, Clone)]
pub struct ProgressiveNumber {
    initial: f64,
    target: f64,
    current: f64,
    decimals: u32,
    duration: Duration,
    delay: Duration,
    steps: u64,
    current_step: u64,
}

impl ProgressiveNumber {
    /// Resolve both endpoints and set up the step count
    pub fn new(
        initial: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        options: ProgressOptions,
    ) -> Result<Self> {
        options.validate()?;

        let initial = initial.into().resolve()?;
        let target = target.into().resolve()?;

        Ok(Self {
            initial,
            target,
            current: initial,
            decimals: options.decimals,
            duration: options.duration,
            delay: options.delay,
            steps: total_steps(options.duration, options.delay),
            current_step: 1,
        })
    }

    /// Advance one step and return the new state
    pub fn advance(&mut self) -> Step {
        let progress = self.progress();
        let done = progress >= 1.0;

        if done {
            self.current = self.target;
        } else {
            self.current = lerp(self.initial, self.target, ease_out_cubic(progress));
            self.current_step += 1;
        }

        Step {
            value: self.value(),
            step: self.current_step,
            done,
        }
    }

    /// Current state without advancing
    pub fn snapshot(&self) -> Step {
        Step {
            value: self.value(),
            step: self.current_step,
            done: self.is_complete(),
        }
    }

    /// Fraction of steps covered, `current_step / total_steps`
    #[inline]
    pub fn progress(&self) -> f64 {
        self.current_step as f64 / self.steps as f64
    }

    /// Current value formatted with the configured number of decimals
    pub fn value(&self) -> String {
        format_fixed(self.current, self.decimals)
    }

    /// Current step index
    #[inline]
    pub fn step(&self) -> u64 {
        self.current_step
    }

    /// Whether the value has snapped to the target
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0 && self.current == self.target
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn initial(&self) -> f64 {
        self.initial
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn total_steps(&self) -> u64 {
        self.steps
    }

    #[inline]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
