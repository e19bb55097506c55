//! Haptic feedback seam.

/// Duration of the feedback pulse requested per confirmed shake.
pub const PULSE_DURATION_MS: u64 = 200;

/// A haptic/vibration unit.
///
/// `pulse` is fire-and-forget: no acknowledgment is awaited and failures stay
/// inside the implementation (a host without a vibrator logs and returns).
pub trait FeedbackEffector: Send {
    /// Request one fixed-intensity pulse of [`PULSE_DURATION_MS`].
    fn pulse(&self);
}

/// Effector for hosts without a vibration unit.
pub struct NoopFeedback;

impl FeedbackEffector for NoopFeedback {
    fn pulse(&self) {}
}
