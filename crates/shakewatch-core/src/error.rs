//! Core error types for shakewatch-core.
//!
//! Hardware absence is the only failure surfaced to callers; it is raised by
//! `enable_listening` and never retried, since the capability will not appear
//! mid-session. Transient per-sample sensor errors are logged and ignored so
//! a single bad reading cannot end a listening session.

use thiserror::Error;

/// Core error type for shakewatch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The accelerometer capability is absent on this host.
    #[error("accelerometer is not available on this device")]
    HardwareUnavailable,

    /// The accelerometer exists but the subscription could not be started.
    #[error("failed to subscribe to accelerometer updates: {reason}")]
    SubscriptionFailed { reason: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
