//! Recording state management
//!
//! Defines the recorder state machine and per-session bookkeeping.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Current state of the recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// Watching the room, no recording in progress
    Idle,
    /// Capture process running
    Recording,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Bookkeeping for one live session's recording.
///
/// A new session is created each time the room is seen going live; the
/// sequence number counts recordings across the process lifetime.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    /// Numeric room id reported by the live listing
    pub room_id: u64,
    /// Position in this process's run (first recording = 1)
    pub sequence: u32,
    /// Local wall-clock time the live session was detected
    pub started_at: DateTime<Local>,
}

impl RecordingSession {
    /// Create a session starting now.
    pub fn new(room_id: u64, sequence: u32) -> Self {
        Self {
            room_id,
            sequence,
            started_at: Local::now(),
        }
    }

    /// File name of this session's recording: `{room}_{timestamp}_{seq}.ts`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.ts",
            self.room_id,
            self.started_at.format("%Y%m%d_%H%M%S"),
            self.sequence
        )
    }

    /// Full output path for this session under `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_at(room_id: u64, sequence: u32) -> RecordingSession {
        RecordingSession {
            room_id,
            sequence,
            started_at: Local.with_ymd_and_hms(2026, 8, 7, 21, 30, 5).unwrap(),
        }
    }

    #[test]
    fn test_file_name_format() {
        let session = session_at(513601, 1);
        assert_eq!(session.file_name(), "513601_20260807_213005_1.ts");
    }

    #[test]
    fn test_output_path_under_dir() {
        let session = session_at(513601, 1);
        assert_eq!(
            session.output_path(Path::new("recordings")),
            PathBuf::from("recordings/513601_20260807_213005_1.ts")
        );
    }

    #[test]
    fn test_sequence_is_part_of_the_name() {
        let first = session_at(513601, 1);
        let second = session_at(513601, 2);
        assert_ne!(first.file_name(), second.file_name());
        assert!(second.file_name().ends_with("_2.ts"));
    }

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(RecorderState::default(), RecorderState::Idle);
    }
}
