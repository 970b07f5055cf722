use thiserror::Error;

use crate::scheduler::Phase;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid delay: the delay between steps must be greater than zero")]
    InvalidDelay,

    #[error("Invalid decimals: {0} (at most 100 fractional digits are supported)")]
    InvalidDecimals(u32),

    #[error("Endpoint evaluation failed: {0}")]
    Endpoint(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Animation cannot be started from the {0} phase")]
    NotStartable(Phase),

    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
