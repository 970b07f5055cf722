//! Timer-driven execution of progressive numbers
//!
//! A [`ProgressiveRun`] arms a one-shot [`Timer`] for each step and re-arms
//! it until the target is reached. [`TokioTimer`] paces runs on a tokio
//! runtime. [`ManualTimer`] paces them from an explicit virtual clock.

mod manual;
mod service;
mod timer;

pub use manual::{ManualTimer, ManualTimerHandle};
pub use service::{generate, generate_with, Phase, ProgressiveRun, StepCallback};
pub use timer::{Timer, TimerCallback, TimerHandle, TokioTimer, TokioTimerHandle};
