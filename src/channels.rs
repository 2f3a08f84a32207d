//! Result and error channels handed to a scan session
//!
//! Sends never fail from the session's point of view: a dropped receiver
//! just means nobody is listening any more.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::debounce::RecentDetection;
use crate::error::ScanError;
use crate::models::ScanEvent;

/// Sending half: accepted detections and non-fatal problems
#[derive(Debug, Clone)]
pub struct ScanChannels {
    results: mpsc::UnboundedSender<ScanEvent>,
    errors: mpsc::UnboundedSender<ScanError>,
}

/// Receiving half, owned by the embedding application
#[derive(Debug)]
pub struct ScanReceivers {
    /// One event per accepted detection
    pub results: mpsc::UnboundedReceiver<ScanEvent>,
    /// Errors; `message` strings come from their `Display`
    pub errors: mpsc::UnboundedReceiver<ScanError>,
}

impl ScanChannels {
    /// Create a connected pair
    pub fn new() -> (Self, ScanReceivers) {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        (
            Self {
                results: results_tx,
                errors: errors_tx,
            },
            ScanReceivers {
                results: results_rx,
                errors: errors_rx,
            },
        )
    }

    /// Deliver an accepted detection
    pub fn emit(&self, event: ScanEvent) {
        log::info!("scanned {:?} ({})", event.text, event.variant);
        if self.results.send(event).is_err() {
            log::debug!("result receiver dropped");
        }
    }

    /// Forward an error to the embedding application
    pub fn report(&self, err: ScanError) {
        log::warn!("{err}");
        if self.errors.send(err).is_err() {
            log::debug!("error receiver dropped");
        }
    }
}

/// What the scanner is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No camera held
    Idle,
    /// Waiting for the camera (the "focusing" indicator)
    Focusing,
    /// Frames are being decoded
    Scanning,
}

/// Snapshot published on the status watch channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStatus {
    /// Current phase
    pub phase: ScanPhase,
    /// Last accepted detection
    pub last_detection: Option<RecentDetection>,
    /// How long a detection counts as "just detected"
    pub display: Duration,
}

impl ScanStatus {
    /// Idle status with the given display window
    pub fn idle(display: Duration) -> Self {
        Self {
            phase: ScanPhase::Idle,
            last_detection: None,
            display,
        }
    }

    /// Text of a detection accepted less than `display` ago
    pub fn just_detected(&self, now: Instant) -> Option<&str> {
        self.last_detection
            .as_ref()
            .filter(|d| d.visible_at(now, self.display))
            .map(|d| d.text.as_str())
    }
}

/// Publisher side of [`ScanStatus`]
pub type StatusSender = watch::Sender<ScanStatus>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VariantKind;

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (channels, receivers) = ScanChannels::new();
        drop(receivers);
        channels.report(ScanError::EnhancementFailed("zoom".into()));
        channels.emit(ScanEvent {
            text: "123".into(),
            symbology: None,
            variant: VariantKind::Band(0),
        });
    }

    #[test]
    fn test_just_detected_expires() {
        let now = Instant::now();
        let mut status = ScanStatus::idle(Duration::from_millis(1800));
        assert_eq!(status.just_detected(now), None);
        status.last_detection = Some(RecentDetection {
            text: "96385074".into(),
            at: now,
        });
        assert_eq!(status.just_detected(now + Duration::from_millis(500)), Some("96385074"));
        assert_eq!(status.just_detected(now + Duration::from_secs(2)), None);
    }
}
