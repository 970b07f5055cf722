//! Progressive numbers: eased interpolation between two endpoints in fixed steps
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `endpoint` - Literal or lazily computed endpoint values
//! - `easing` - Cubic ease-out shaping function
//! - `timing` - Step count, interpolation and fixed-point formatting
//!
//! ## L3 Molecular Layer
//! - `number` - Step-by-step controller combining atoms
//!
//! The controller has no notion of time. `crate::scheduler` drives it with a timer.
//!
//! # Usage
//!
//! ```ignore
//! use countup_core::progressive::{ProgressOptions, ProgressiveNumber};
//!
//! let mut number = ProgressiveNumber::new(0.0, 100.0, ProgressOptions::default())?;
//! loop {
//!     let step = number.advance();
//!     println!("{} ({})", step.value, step.step);
//!     if step.done {
//!         break;
//!     }
//! }
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod endpoint;
pub mod timing;

// L3 Molecular Layer
pub mod number;

pub use endpoint::Endpoint;
pub use number::{ProgressOptions, ProgressiveNumber, Step};
