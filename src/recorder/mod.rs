//! Recording system module
//!
//! This module implements the session controller:
//! - RecorderState and per-session bookkeeping
//! - RoomMonitor driving poll ticks and capture start/stop
//!
//! At most one recording is active at any time.

pub mod monitor;
pub mod state;

pub use monitor::{MonitorConfig, RoomMonitor};
pub use state::{RecorderState, RecordingSession};
