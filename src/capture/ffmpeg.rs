//! FFmpeg capture supervision
//!
//! Wraps the external ffmpeg process that copies a live stream to disk:
//! launch, background exit tracking, and graceful termination.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::CaptureError;

/// How long a stopped process is given to flush and exit.
const STOP_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Handle to one running ffmpeg capture.
///
/// The child process itself is owned by the background exit observer; this
/// handle keeps the pid for signaling plus the two flags shared with the
/// observer. `stop_requested` is always stored before the process is
/// signaled, so the observer can attribute the exit even when it races a
/// concurrent `stop()`.
pub struct StreamCapture {
    pid: u32,
    output_path: PathBuf,
    active: Arc<AtomicBool>,
    stop_requested: Arc<AtomicBool>,
}

impl StreamCapture {
    /// Launch ffmpeg copying `stream_url` into `output_path`.
    ///
    /// The stream is copied without re-encoding; an existing file at the
    /// output path is overwritten. The output directory is created if
    /// needed. With `passthrough`, ffmpeg inherits this process's standard
    /// streams; otherwise its output is discarded.
    pub fn spawn(
        stream_url: &str,
        output_path: &Path,
        passthrough: bool,
    ) -> Result<Self, CaptureError> {
        if let Some(dir) = output_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut command = Command::new("ffmpeg");
        command
            .args(["-i", stream_url, "-c", "copy", "-y"])
            .arg(output_path)
            .stdin(Stdio::null());
        if passthrough {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let mut child = command
            .spawn()
            .map_err(|e| CaptureError::Spawn(format!("failed to start ffmpeg: {e}")))?;
        let pid = child.id();

        let active = Arc::new(AtomicBool::new(true));
        let stop_requested = Arc::new(AtomicBool::new(false));

        // Exit observer: owns the child, blocks until it exits, then decides
        // whether this was a requested stop or the process dying on its own.
        let observer_active = active.clone();
        let observer_stop = stop_requested.clone();
        let observer_path = output_path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let status = child.wait();
            if observer_stop.load(Ordering::SeqCst) {
                tracing::info!("Recording saved: {}", observer_path.display());
            } else {
                match status {
                    Ok(status) => tracing::warn!("ffmpeg exited unexpectedly: {status}"),
                    Err(e) => tracing::warn!("ffmpeg exited unexpectedly: {e}"),
                }
            }
            observer_active.store(false, Ordering::SeqCst);
        });

        Ok(Self {
            pid,
            output_path: output_path.to_path_buf(),
            active,
            stop_requested,
        })
    }

    /// Whether the capture process is still running.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Path the recording is being written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Request graceful termination.
    ///
    /// Interrupts ffmpeg so it can finalize the file, escalating to a kill
    /// if the signal cannot be delivered, then waits a fixed grace period.
    /// The stop is complete once the grace period elapses, whether or not
    /// the process has actually exited; the exit observer independently
    /// records the exit itself.
    pub async fn stop(&mut self) {
        if !self.is_active() {
            return;
        }

        // Must be visible to the observer before the process can exit
        self.stop_requested.store(true, Ordering::SeqCst);

        if let Err(e) = signal_process(self.pid, libc::SIGINT) {
            tracing::warn!("Failed to interrupt ffmpeg ({e}), killing it");
            let _ = signal_process(self.pid, libc::SIGKILL);
        }

        tokio::time::sleep(STOP_GRACE_PERIOD).await;
    }
}

impl Drop for StreamCapture {
    fn drop(&mut self) {
        // Termination is attempted on every exit path; a handle dropped
        // without stop() still signals the process.
        if self.is_active() && !self.stop_requested.swap(true, Ordering::SeqCst) {
            let _ = signal_process(self.pid, libc::SIGTERM);
        }
    }
}

fn signal_process(pid: u32, signal: libc::c_int) -> std::io::Result<()> {
    // SAFETY: kill(2) does not touch memory.
    let rc = unsafe { libc::kill(pid as libc::pid_t, signal) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}
