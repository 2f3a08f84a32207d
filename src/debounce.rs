//! Time-based result debouncing and detection feedback
//!
//! The window is purely time-based: a different code arriving inside it is
//! suppressed just like a repeat of the same code.

use std::io::Write;
use std::time::Duration;

use tokio::time::Instant;

/// Length of the vibration pulse on an accepted detection
pub const VIBRATION: Duration = Duration::from_millis(100);

/// Audio/haptic cue played on an accepted detection
///
/// Both calls are best-effort: errors are logged at debug level and dropped.
pub trait Feedback: Send + Sync {
    /// Play a short confirmation tone
    fn beep(&self) -> Result<(), String>;
    /// Pulse the vibration motor
    fn vibrate(&self, duration: Duration) -> Result<(), String>;
}

/// Feedback that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn beep(&self) -> Result<(), String> {
        Ok(())
    }

    fn vibrate(&self, _duration: Duration) -> Result<(), String> {
        Ok(())
    }
}

/// Rings the terminal bell; there is nothing to vibrate
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Feedback for TerminalBell {
    fn beep(&self) -> Result<(), String> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| e.to_string())
    }

    fn vibrate(&self, _duration: Duration) -> Result<(), String> {
        Err("no haptic device".to_string())
    }
}

/// Fire both cues, ignoring failures
pub fn play_feedback(feedback: &dyn Feedback) {
    if let Err(err) = feedback.beep() {
        log::debug!("beep failed: {err}");
    }
    if let Err(err) = feedback.vibrate(VIBRATION) {
        log::debug!("vibrate failed: {err}");
    }
}

/// Suppresses detections that land inside the cooldown window
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_emitted_at: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given cooldown window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emitted_at: None,
        }
    }

    /// Instant of the last accepted detection
    pub fn last_emitted_at(&self) -> Option<Instant> {
        self.last_emitted_at
    }

    /// Accept (and remember) a detection at `now`, or suppress it.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_emitted_at {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_emitted_at = Some(now);
        true
    }
}

/// The most recent accepted detection, shown briefly to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentDetection {
    /// Decoded text
    pub text: String,
    /// When it was accepted
    pub at: Instant,
}

impl RecentDetection {
    /// Whether it is still inside the display window at `now`
    pub fn visible_at(&self, now: Instant, display: Duration) -> bool {
        now.saturating_duration_since(self.at) < display
    }
}
