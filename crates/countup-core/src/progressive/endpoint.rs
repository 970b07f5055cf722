//! L4 Atomic Layer: Animation endpoints
//!
//! An endpoint is either a plain number or a computation producing one.
//! Computations run exactly once, when the animation is constructed.

use std::fmt;

use crate::{Error, Result};

/// Deferred endpoint evaluation
pub type Computation = Box<dyn FnOnce() -> Result<f64> + Send>;

/// Start or end value of an animation
pub enum Endpoint {
    /// A plain number
    Literal(f64),
    /// A number computed lazily at construction time
    Computed(Computation),
}

impl Endpoint {
    /// Endpoint computed by an infallible function
    pub fn computed<F>(f: F) -> Self
    where
        F: FnOnce() -> f64 + Send + 'static,
    {
        Endpoint::Computed(Box::new(move || Ok(f())))
    }

    /// Endpoint computed by a fallible function
    ///
    /// A failure surfaces as [`Error::Endpoint`] from construction.
    pub fn try_computed<F, E>(f: F) -> Self
    where
        F: FnOnce() -> std::result::Result<f64, E> + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Endpoint::Computed(Box::new(move || f().map_err(|e| Error::Endpoint(e.into()))))
    }

    /// Evaluate the endpoint into a plain number
    ///
    /// The result is not validated: NaN and infinities pass through.
    pub fn resolve(self) -> Result<f64> {
        match self {
            Endpoint::Literal(value) => Ok(value),
            Endpoint::Computed(f) => f(),
        }
    }

    /// Whether the endpoint is evaluated lazily
    pub fn is_computed(&self) -> bool {
        matches!(self, Endpoint::Computed(_))
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Endpoint::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<f64> for Endpoint {
    fn from(value: f64) -> Self {
        Endpoint::Literal(value)
    }
}

impl From<f32> for Endpoint {
    fn from(value: f32) -> Self {
        Endpoint::Literal(value as f64)
    }
}

impl From<i32> for Endpoint {
    fn from(value: i32) -> Self {
        Endpoint::Literal(value as f64)
    }
}

impl From<u32> for Endpoint {
    fn from(value: u32) -> Self {
        Endpoint::Literal(value as f64)
    }
}
