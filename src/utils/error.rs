//! Error types and handling
//!
//! Application-level errors. Everything below this level is absorbed into a
//! log line and a state decision by the monitor; the only errors that reach
//! the caller are the fatal startup ones.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid room URL: {0}")]
    InvalidRoomUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
