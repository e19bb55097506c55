//! Shake detection engine.
//!
//! The detector is a sample-clock-based state machine. It owns no thread and
//! no sensor subscription -- the caller feeds it one sample at a time and
//! reacts to the returned event.
//!
//! ## State Transitions
//!
//! ```text
//! Inactive -> start() -> Active -> stop() -> Inactive
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut detector = ShakeDetector::new();
//! detector.start();
//! // For each sensor reading:
//! detector.on_sample(&sample); // Returns Some(Event::Shake) on detection
//! ```
//!
//! The threshold check is a pure magnitude comparison: a single
//! super-threshold sample is sufficient evidence, and the cooldown is the
//! only guard against a burst of triggers during one physical gesture.
//! There is no smoothing and no frequency analysis.

use chrono::Utc;

use crate::events::Event;
use crate::sample::AccelSample;

/// Acceleration magnitude above which a sample counts as a shake, in g.
pub const SHAKE_THRESHOLD_G: f64 = 2.5;

/// Minimum enforced gap between two consecutive shake emissions.
pub const SHAKE_COOLDOWN_MS: u64 = 1_000;

/// Cadence the sensor source is asked to deliver samples at.
pub const SAMPLE_RATE_HZ: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Inactive,
    Active,
}

/// Core shake detector.
///
/// The cooldown is measured on the sample stream's own clock, so a replayed
/// trace behaves identically to a live feed.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    state: DetectorState,
    /// Stream timestamp of the last confirmed shake. `None` until the first
    /// emission -- the cooldown never blocks the first shake.
    last_shake_ms: Option<u64>,
}

impl ShakeDetector {
    /// Create a new detector in the `Inactive` state.
    pub fn new() -> Self {
        Self {
            state: DetectorState::Inactive,
            last_shake_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == DetectorState::Active
    }

    /// Stream timestamp of the last confirmed shake, if any.
    pub fn last_shake_ms(&self) -> Option<u64> {
        self.last_shake_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin accepting samples. No-op while already active.
    pub fn start(&mut self) {
        self.state = DetectorState::Active;
    }

    /// Stop accepting samples. No-op while already inactive.
    ///
    /// `last_shake_ms` survives a stop, so a stop/start bounce inside the
    /// cooldown window cannot defeat the rate limit.
    pub fn stop(&mut self) {
        self.state = DetectorState::Inactive;
    }

    /// Process one sensor reading.
    ///
    /// Returns `Some(Event::Shake)` when the sample's magnitude exceeds
    /// [`SHAKE_THRESHOLD_G`] and at least [`SHAKE_COOLDOWN_MS`] has elapsed
    /// on the stream clock since the previous confirmed shake.
    pub fn on_sample(&mut self, sample: &AccelSample) -> Option<Event> {
        if self.state != DetectorState::Active {
            return None;
        }

        let magnitude = sample.magnitude();
        if magnitude <= SHAKE_THRESHOLD_G {
            return None;
        }

        if let Some(last) = self.last_shake_ms {
            let elapsed = sample.timestamp_ms.saturating_sub(last);
            if elapsed < SHAKE_COOLDOWN_MS {
                tracing::debug!(
                    timestamp_ms = sample.timestamp_ms,
                    elapsed_ms = elapsed,
                    "super-threshold sample suppressed by cooldown"
                );
                return None;
            }
        }

        self.last_shake_ms = Some(sample.timestamp_ms);
        tracing::debug!(timestamp_ms = sample.timestamp_ms, magnitude, "shake confirmed");
        Some(Event::Shake { at: Utc::now() })
    }
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_detector() -> ShakeDetector {
        let mut detector = ShakeDetector::new();
        detector.start();
        detector
    }

    fn spike(timestamp_ms: u64) -> AccelSample {
        AccelSample::new(timestamp_ms, 3.0, 0.0, 0.0)
    }

    #[test]
    fn starts_inactive() {
        let detector = ShakeDetector::new();
        assert_eq!(detector.state(), DetectorState::Inactive);
        assert_eq!(detector.last_shake_ms(), None);
    }

    #[test]
    fn sub_threshold_never_emits() {
        let mut detector = active_detector();
        assert!(detector.on_sample(&AccelSample::new(0, 0.0, 0.0, 1.0)).is_none());
        assert!(detector.on_sample(&AccelSample::new(5_000, 1.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let mut detector = active_detector();
        // Magnitude exactly 2.5 does not count.
        assert!(detector.on_sample(&AccelSample::new(0, 2.5, 0.0, 0.0)).is_none());
        assert!(detector.on_sample(&AccelSample::new(16, 2.51, 0.0, 0.0)).is_some());
    }

    #[test]
    fn inactive_detector_ignores_spikes() {
        let mut detector = ShakeDetector::new();
        assert!(detector.on_sample(&spike(0)).is_none());
        assert_eq!(detector.last_shake_ms(), None);
    }

    #[test]
    fn cooldown_suppresses_second_spike() {
        let mut detector = active_detector();
        assert!(detector.on_sample(&spike(0)).is_some());
        assert!(detector.on_sample(&spike(500)).is_none());
        assert_eq!(detector.last_shake_ms(), Some(0));
    }

    #[test]
    fn spikes_a_cooldown_apart_both_emit() {
        let mut detector = active_detector();
        assert!(detector.on_sample(&spike(0)).is_some());
        assert!(detector.on_sample(&spike(1_000)).is_some());
        assert_eq!(detector.last_shake_ms(), Some(1_000));
    }

    #[test]
    fn stop_silences_detector() {
        let mut detector = active_detector();
        detector.stop();
        assert!(detector.on_sample(&spike(0)).is_none());
    }

    #[test]
    fn cooldown_survives_stop_start() {
        let mut detector = active_detector();
        assert!(detector.on_sample(&spike(0)).is_some());
        detector.stop();
        detector.start();
        assert!(detector.on_sample(&spike(500)).is_none());
        assert!(detector.on_sample(&spike(1_200)).is_some());
    }

    #[test]
    fn start_is_idempotent() {
        let mut detector = active_detector();
        detector.start();
        assert!(detector.is_active());
        assert!(detector.on_sample(&spike(0)).is_some());
    }

    #[test]
    fn documented_scenario() {
        let mut detector = active_detector();
        // Resting: magnitude 1.0.
        assert!(detector.on_sample(&AccelSample::new(0, 0.0, 0.0, 1.0)).is_none());
        // Spike at t=0: magnitude 3.0.
        assert!(detector.on_sample(&spike(0)).is_some());
        assert_eq!(detector.last_shake_ms(), Some(0));
        // Spike at t=0.5s: inside the cooldown.
        assert!(detector.on_sample(&spike(500)).is_none());
        // Spike at t=1.2s: cooldown elapsed.
        assert!(detector.on_sample(&spike(1_200)).is_some());
        assert_eq!(detector.last_shake_ms(), Some(1_200));
    }
}
