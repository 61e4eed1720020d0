//! Stream capture module
//!
//! Owns the external ffmpeg process for one recording. The supervisor
//! starts ffmpeg against a resolved stream URL, tracks its lifetime with a
//! background exit observer, and terminates it on demand.

pub mod ffmpeg;

pub use ffmpeg::StreamCapture;

use thiserror::Error;

/// Capture launch errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spawn failed: {0}")]
    Spawn(String),
}
