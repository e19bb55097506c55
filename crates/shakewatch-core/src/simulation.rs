//! Scripted motion sources and trace generation.
//!
//! These stand in for the platform accelerometer in tests and in the CLI:
//! [`ScriptedSource`] replays a prepared sample vector synchronously on
//! subscribe, [`ManualSource`] hands its sink out so the caller pumps
//! samples explicitly, and [`synth_trace`] builds deterministic 60 Hz
//! traces with shake spikes.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::detector::SAMPLE_RATE_HZ;
use crate::error::Result;
use crate::sample::AccelSample;
use crate::source::{MotionSource, SampleSink};

/// Observation handle onto a scripted source, cloneable before the source is
/// boxed into a service.
#[derive(Clone)]
pub struct SourceProbe {
    subscriptions: Arc<AtomicU64>,
    subscribed: Arc<AtomicBool>,
}

impl SourceProbe {
    fn new() -> Self {
        Self {
            subscriptions: Arc::new(AtomicU64::new(0)),
            subscribed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Total number of subscribe calls the source has accepted.
    pub fn subscription_count(&self) -> u64 {
        self.subscriptions.load(Ordering::SeqCst)
    }

    /// Whether a subscription is currently active.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }
}

/// A source that replays a prepared sample vector synchronously when
/// subscribed.
pub struct ScriptedSource {
    samples: Vec<AccelSample>,
    available: bool,
    probe: SourceProbe,
}

impl ScriptedSource {
    pub fn new(samples: Vec<AccelSample>) -> Self {
        Self {
            samples,
            available: true,
            probe: SourceProbe::new(),
        }
    }

    /// A source whose capability probe fails, for the hardware-absent path.
    pub fn unavailable() -> Self {
        Self {
            samples: Vec::new(),
            available: false,
            probe: SourceProbe::new(),
        }
    }

    pub fn probe(&self) -> SourceProbe {
        self.probe.clone()
    }
}

impl MotionSource for ScriptedSource {
    fn is_available(&self) -> bool {
        self.available
    }

    fn subscribe(&mut self, _rate_hz: u32, sink: SampleSink) -> Result<()> {
        self.probe.subscriptions.fetch_add(1, Ordering::SeqCst);
        self.probe.subscribed.store(true, Ordering::SeqCst);
        for sample in &self.samples {
            sink.deliver(*sample);
        }
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.probe.subscribed.store(false, Ordering::SeqCst);
    }
}

/// A source that parks its sink in a shared slot so the caller can deliver
/// samples at arbitrary points, including after the service is gone.
pub struct ManualSource {
    slot: Arc<Mutex<Option<SampleSink>>>,
    probe: SourceProbe,
}

impl ManualSource {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            probe: SourceProbe::new(),
        }
    }

    /// The slot the sink is parked in while subscribed.
    pub fn sink_slot(&self) -> Arc<Mutex<Option<SampleSink>>> {
        Arc::clone(&self.slot)
    }

    pub fn probe(&self) -> SourceProbe {
        self.probe.clone()
    }
}

impl Default for ManualSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSource for ManualSource {
    fn is_available(&self) -> bool {
        true
    }

    fn subscribe(&mut self, _rate_hz: u32, sink: SampleSink) -> Result<()> {
        self.probe.subscriptions.fetch_add(1, Ordering::SeqCst);
        self.probe.subscribed.store(true, Ordering::SeqCst);
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.probe.subscribed.store(false, Ordering::SeqCst);
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Build a deterministic 60 Hz trace of `duration_ms` with `shakes`
/// super-threshold spikes spread evenly across it.
///
/// Resting samples read (0, 0, 1) -- a device lying still, magnitude 1 g.
/// Spike samples read (3, 0, 0), comfortably above the detection threshold.
/// Spikes are spaced wider than the cooldown whenever the duration allows,
/// so the requested count is also the expected detection count.
pub fn synth_trace(duration_ms: u64, shakes: u32) -> Vec<AccelSample> {
    let step_ms = 1_000 / SAMPLE_RATE_HZ as u64;
    let total = duration_ms / step_ms;
    let mut spike_at: Vec<u64> = Vec::new();
    if shakes > 0 && total > 0 {
        let stride = (total / shakes as u64).max(1);
        for i in 0..shakes as u64 {
            spike_at.push(i * stride);
        }
    }

    let mut samples = Vec::with_capacity(total as usize);
    for i in 0..total {
        let timestamp_ms = i * step_ms;
        let sample = if spike_at.binary_search(&i).is_ok() {
            AccelSample::new(timestamp_ms, 3.0, 0.0, 0.0)
        } else {
            AccelSample::new(timestamp_ms, 0.0, 0.0, 1.0)
        };
        samples.push(sample);
    }
    samples
}
