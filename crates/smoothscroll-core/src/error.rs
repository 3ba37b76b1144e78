use thiserror::Error;

use crate::scroll::Axis;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid scroll distance: {0}")]
    InvalidDistance(f64),

    #[error("Invalid speed ratio: {0} (must be positive and finite)")]
    InvalidSpeedRatio(f64),

    #[error("No async runtime available to drive the animation: {0}")]
    NoRuntime(String),

    #[error("Animation state lock poisoned for {0} axis")]
    LockPoisoned(Axis),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
