pub mod config;
pub mod error;
pub mod progressive;
pub mod scheduler;

pub use config::{AnimationConfig, AppConfig, OutputFormat};
pub use error::{Error, Result};
pub use progressive::{Endpoint, ProgressOptions, ProgressiveNumber, Step};
pub use scheduler::{generate, generate_with, ManualTimer, Phase, ProgressiveRun, Timer, TimerHandle, TokioTimer};
