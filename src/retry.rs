//! Failure counter driving ROI escalation
//!
//! The counter only moves on tick outcomes: +1 for a tick where every
//! variant missed, back to zero on any decode. Time never decays it.

/// ROI aggressiveness handed to the frame pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationLevel {
    /// Nominal ROI fractions
    Nominal,
    /// Widened ROI after a run of misses
    Widened,
}

/// Tracks consecutive missed ticks
#[derive(Debug, Clone)]
pub struct RetryController {
    consecutive_failures: u32,
    widen_after: u32,
}

impl RetryController {
    /// Widen once the failure count exceeds `widen_after`
    pub fn new(widen_after: u32) -> Self {
        Self {
            consecutive_failures: 0,
            widen_after,
        }
    }

    /// Ticks missed since the last decode
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Current escalation level
    pub fn level(&self) -> EscalationLevel {
        if self.consecutive_failures > self.widen_after {
            EscalationLevel::Widened
        } else {
            EscalationLevel::Nominal
        }
    }

    /// A variant decoded this tick
    pub fn record_success(&mut self) {
        if self.consecutive_failures > 0 {
            log::debug!("decode after {} missed ticks", self.consecutive_failures);
        }
        self.consecutive_failures = 0;
    }

    /// Every variant missed this tick
    pub fn record_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures == self.widen_after.saturating_add(1) {
            log::debug!("widening ROI after {} missed ticks", self.consecutive_failures);
        }
    }
}
