//! Listener plumbing and sensor lifecycle around the detector engine.
//!
//! The service owns the detector, the listener registry, the feedback
//! effector, and the motion source. Samples arrive through the weak
//! [`SampleSink`] the source was handed on subscribe; `enable_listening` and
//! `stop_listening` may interleave with in-flight deliveries, so one mutex
//! guards the combined mutable state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::detector::{ShakeDetector, SAMPLE_RATE_HZ};
use crate::error::{CoreError, Result};
use crate::events::{Event, SHAKE_EVENT};
use crate::feedback::FeedbackEffector;
use crate::sample::AccelSample;
use crate::source::{MotionSource, SampleSink};

/// Callback registered for the `"shake"` event. Zero-payload.
pub type ShakeListener = Box<dyn Fn() + Send>;

/// Handle returned by [`ShakeService::add_listener`], used to remove a
/// single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(u64);

/// State shared between the service and in-flight sample deliveries.
pub(crate) struct Shared {
    detector: ShakeDetector,
    listeners: Vec<(u64, ShakeListener)>,
    next_listener_id: u64,
    feedback: Box<dyn FeedbackEffector>,
}

impl Shared {
    /// Run one sample through the detector and fan out on detection.
    ///
    /// Listeners run on the delivery context while the state lock is held;
    /// they must not call back into the service.
    pub(crate) fn handle_sample(&mut self, sample: &AccelSample) {
        if let Some(Event::Shake { .. }) = self.detector.on_sample(sample) {
            tracing::info!(
                event = SHAKE_EVENT,
                timestamp_ms = sample.timestamp_ms,
                listeners = self.listeners.len(),
                "shake detected, notifying listeners"
            );
            self.feedback.pulse();
            for (_, listener) in &self.listeners {
                listener();
            }
        }
    }
}

/// Shake detection service: the surface exposed to the application shell.
///
/// Dropping the service stops any active listening session, so whichever
/// code activates the sensor is guaranteed to release it on every exit path.
pub struct ShakeService {
    shared: Arc<Mutex<Shared>>,
    source: Box<dyn MotionSource>,
}

impl ShakeService {
    pub fn new(source: Box<dyn MotionSource>, feedback: Box<dyn FeedbackEffector>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                detector: ShakeDetector::new(),
                listeners: Vec::new(),
                next_listener_id: 0,
                feedback,
            })),
            source,
        }
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a listening session is active.
    pub fn is_listening(&self) -> bool {
        self.lock_shared().detector.is_active()
    }

    /// Begin a listening session at the fixed 60 Hz cadence.
    ///
    /// Idempotent: enabling while already active reports success without
    /// duplicating the sensor subscription. Fails with
    /// [`CoreError::HardwareUnavailable`] when the capability probe fails,
    /// leaving state untouched.
    pub fn enable_listening(&mut self) -> Result<()> {
        if self.lock_shared().detector.is_active() {
            return Ok(());
        }
        if !self.source.is_available() {
            return Err(CoreError::HardwareUnavailable);
        }

        // Activate before subscribing: sources may start delivering
        // synchronously from inside `subscribe`.
        self.lock_shared().detector.start();
        let sink = SampleSink::new(Arc::downgrade(&self.shared));
        if let Err(err) = self.source.subscribe(SAMPLE_RATE_HZ, sink) {
            self.lock_shared().detector.stop();
            return Err(err);
        }

        tracing::info!(rate_hz = SAMPLE_RATE_HZ, "started listening for shake events");
        Ok(())
    }

    /// End the listening session. No-op when already inactive.
    pub fn stop_listening(&mut self) {
        if !self.lock_shared().detector.is_active() {
            return;
        }
        self.source.unsubscribe();
        self.lock_shared().detector.stop();
        tracing::info!("stopped listening for shake events");
    }

    /// Register interest in the `"shake"` event.
    pub fn add_listener(&self, listener: impl Fn() + Send + 'static) -> ListenerHandle {
        let mut shared = self.lock_shared();
        let id = shared.next_listener_id;
        shared.next_listener_id += 1;
        shared.listeners.push((id, Box::new(listener)));
        ListenerHandle(id)
    }

    /// Remove a single registration. Returns whether it was present.
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        let mut shared = self.lock_shared();
        let before = shared.listeners.len();
        shared.listeners.retain(|(id, _)| *id != handle.0);
        shared.listeners.len() != before
    }

    /// Remove every registered listener.
    pub fn remove_all_listeners(&self) {
        self.lock_shared().listeners.clear();
    }
}

impl Drop for ShakeService {
    fn drop(&mut self) {
        self.stop_listening();
    }
}
