use thiserror::Error;

use crate::animation::ScheduleError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reel needs at least one value")]
    EmptyReel,

    #[error("A spin is already in progress")]
    SpinInProgress,

    #[error("Scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
