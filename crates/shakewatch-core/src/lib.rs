//! # Shakewatch Core Library
//!
//! This library provides the shake-detection core for the Shakewatch plugin.
//! It implements a CLI-first philosophy where the full detection pipeline is
//! exercisable from a standalone binary against recorded traces, with any
//! host shell (desktop bridge, mobile bridge) being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Detector Engine**: A sample-clock-based state machine that turns a
//!   60 Hz accelerometer stream into rate-limited shake events
//! - **Service**: Listener registration, sensor-subscription lifecycle, and
//!   haptic feedback wiring around the engine
//! - **Seams**: `MotionSource` abstracts the accelerometer hardware and
//!   `FeedbackEffector` abstracts the vibration unit, so hosts plug in
//!   platform implementations and tests plug in scripted ones
//!
//! ## Key Components
//!
//! - [`ShakeDetector`]: Core threshold-plus-cooldown state machine
//! - [`ShakeService`]: Listener plumbing and sensor lifecycle
//! - [`MotionSource`]: Trait for accelerometer sources
//! - [`simulation`]: Scripted sources and trace generation for tests/CLI

pub mod detector;
pub mod error;
pub mod events;
pub mod feedback;
pub mod sample;
pub mod service;
pub mod simulation;
pub mod source;

pub use detector::{
    DetectorState, ShakeDetector, SAMPLE_RATE_HZ, SHAKE_COOLDOWN_MS, SHAKE_THRESHOLD_G,
};
pub use error::{CoreError, Result};
pub use events::{Event, SHAKE_EVENT};
pub use feedback::{FeedbackEffector, NoopFeedback, PULSE_DURATION_MS};
pub use sample::AccelSample;
pub use service::{ListenerHandle, ShakeService};
pub use simulation::{synth_trace, ManualSource, ScriptedSource, SourceProbe};
pub use source::{MotionSource, SampleSink};
