//! Motion sensor seam.
//!
//! `MotionSource` is the contract with the accelerometer hardware: probe for
//! the capability, subscribe at a fixed cadence, unsubscribe. Platform shells
//! implement it over their sensor APIs; tests and the CLI use the scripted
//! implementations in [`crate::simulation`].

use std::sync::{Mutex, PoisonError, Weak};

use crate::error::Result;
use crate::sample::AccelSample;
use crate::service::Shared;

/// An accelerometer source.
///
/// Sources deliver a single logical stream of samples, sequentially, on one
/// delivery context. They hold only the [`SampleSink`] handed to them on
/// subscribe -- never an owning reference to the detector side.
pub trait MotionSource: Send {
    /// Whether the accelerometer capability exists on this host.
    fn is_available(&self) -> bool;

    /// Begin delivering samples at `rate_hz` to `sink`.
    ///
    /// Fails with [`CoreError::SubscriptionFailed`] when the platform refuses
    /// the registration even though the capability probe passed.
    ///
    /// [`CoreError::SubscriptionFailed`]: crate::error::CoreError::SubscriptionFailed
    fn subscribe(&mut self, rate_hz: u32, sink: SampleSink) -> Result<()>;

    /// Cease delivering samples. Safe to call when not subscribed.
    fn unsubscribe(&mut self);
}

/// Non-owning delivery handle handed to a [`MotionSource`] on subscribe.
///
/// The sink holds only a weak reference to the service internals, so a live
/// subscription can never keep the detector alive past its owner. Deliveries
/// after the service is gone are silently discarded.
#[derive(Clone)]
pub struct SampleSink {
    shared: Weak<Mutex<Shared>>,
}

impl SampleSink {
    pub(crate) fn new(shared: Weak<Mutex<Shared>>) -> Self {
        Self { shared }
    }

    /// Deliver one sensor reading.
    pub fn deliver(&self, sample: AccelSample) {
        let Some(shared) = self.shared.upgrade() else {
            tracing::debug!("sample delivered after service teardown, discarding");
            return;
        };
        let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
        shared.handle_sample(&sample);
    }

    /// Report a transient sensor read error.
    ///
    /// Logged and dropped: a single bad reading never ends the listening
    /// session and never reaches the caller.
    pub fn report_error(&self, reason: &str) {
        tracing::warn!(reason, "transient sensor error, ignoring reading");
    }
}
