use std::io;

use thiserror::Error;

/// Failures that abort the run. Collisions and quit requests are not
/// errors, they end the game cleanly through the shutdown signal.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    #[error("terminal failure: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("could not set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("the {0} thread panicked")]
    ThreadPanic(&'static str),
}
