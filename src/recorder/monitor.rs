//! Room monitor
//!
//! Orchestrates the recording lifecycle: polls the live listing on a fixed
//! interval, starts a capture when the room goes live, stops it when the
//! room goes offline, and shuts down cleanly on SIGINT/SIGTERM.

use std::path::PathBuf;
use std::time::Duration;

use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;

use crate::api::{LiveRoom, RoomTarget, ShowroomClient};
use crate::capture::StreamCapture;
use crate::utils::error::AppResult;

use super::state::{RecorderState, RecordingSession};

/// Options for one monitor run
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Directory recordings are written to
    pub output_dir: PathBuf,
    /// Delay between live-status checks
    pub poll_interval: Duration,
    /// Show ffmpeg's own console output
    pub passthrough: bool,
}

/// What the controller should do with one poll result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickAction {
    /// Room just went live: start a capture
    Start,
    /// Room went offline mid-recording: stop the capture
    Stop,
    /// Nothing changed
    Wait,
}

/// State transition for one poll result.
fn decide(state: RecorderState, is_live: bool) -> TickAction {
    match (state, is_live) {
        (RecorderState::Idle, true) => TickAction::Start,
        (RecorderState::Recording, false) => TickAction::Stop,
        _ => TickAction::Wait,
    }
}

/// Monitors a single room and records it whenever it is live.
///
/// Holds all mutable controller state: the capture handle for the active
/// recording and the process-lifetime sequence counter. At most one capture
/// exists at a time.
pub struct RoomMonitor {
    client: ShowroomClient,
    target: RoomTarget,
    config: MonitorConfig,
    /// Capture handle for the active recording, if any
    capture: Option<StreamCapture>,
    /// Recordings started so far in this process
    recording_count: u32,
}

impl RoomMonitor {
    pub fn new(target: RoomTarget, config: MonitorConfig) -> Self {
        Self {
            client: ShowroomClient::new(),
            target,
            config,
            capture: None,
            recording_count: 0,
        }
    }

    /// Run the tick loop until a shutdown signal arrives.
    ///
    /// The first tick fires immediately, so a room that is already live
    /// starts recording without waiting out the interval. An in-progress
    /// recording is stopped before returning.
    pub async fn run(&mut self) -> AppResult<()> {
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        // A slow tick delays the next one instead of bursting to catch up
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Started monitoring: {}", self.target.key());

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = sigint.recv() => {
                    tracing::info!("Received interrupt, shutting down");
                    break;
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received termination signal, shutting down");
                    break;
                }
            }
        }

        self.stop_recording().await;
        Ok(())
    }

    /// Effective state: recording only while the capture process is alive.
    ///
    /// The exit observer clears the active flag when ffmpeg dies on its
    /// own, so a stale handle reads as `Idle` here and is discarded on the
    /// next transition.
    fn state(&self) -> RecorderState {
        match &self.capture {
            Some(capture) if capture.is_active() => RecorderState::Recording,
            _ => RecorderState::Idle,
        }
    }

    /// One poll-and-decide cycle.
    async fn tick(&mut self) {
        let live_room = match self.client.find_live_room(&self.target).await {
            Ok(room) => room,
            Err(e) => {
                // Non-fatal: treated as not live, retried next tick
                tracing::warn!("Live status check failed: {e}");
                None
            }
        };

        match decide(self.state(), live_room.is_some()) {
            TickAction::Start => {
                if let Some(room) = live_room {
                    self.start_recording(room).await;
                }
            }
            TickAction::Stop => self.stop_recording().await,
            TickAction::Wait => {}
        }
    }

    /// Resolve the stream and launch a capture for a freshly live room.
    ///
    /// Any failure leaves the state `Idle`; the next tick retries while the
    /// room stays live.
    async fn start_recording(&mut self, room: LiveRoom) {
        tracing::info!("Room {} is live", room.room_id);

        let stream_url = match self.client.resolve_stream_url(room.room_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Stream resolution failed: {e}");
                return;
            }
        };

        // The sequence number is claimed once a stream resolves; a failed
        // launch consumes it
        self.recording_count += 1;
        let session = RecordingSession::new(room.room_id, self.recording_count);
        let output_path = session.output_path(&self.config.output_dir);

        match StreamCapture::spawn(&stream_url, &output_path, self.config.passthrough) {
            Ok(capture) => {
                self.capture = Some(capture);
                tracing::info!("Started recording: {}", output_path.display());
            }
            Err(e) => tracing::warn!("Failed to start capture: {e}"),
        }
    }

    /// Stop the active recording, if any.
    async fn stop_recording(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if capture.is_active() {
                tracing::info!("Stopping recording: {}", capture.output_path().display());
                capture.stop().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_and_live_starts() {
        assert_eq!(decide(RecorderState::Idle, true), TickAction::Start);
    }

    #[test]
    fn test_idle_and_offline_waits() {
        assert_eq!(decide(RecorderState::Idle, false), TickAction::Wait);
    }

    #[test]
    fn test_recording_and_live_waits() {
        // Never start a second capture while one is running
        assert_eq!(decide(RecorderState::Recording, true), TickAction::Wait);
    }

    #[test]
    fn test_recording_and_offline_stops() {
        assert_eq!(decide(RecorderState::Recording, false), TickAction::Stop);
    }
}
