//! Raw accelerometer samples.
//!
//! A sample is the minimal input contract with the sensor source: three
//! gravity-compensated axis readings in g units plus a monotonic stream
//! timestamp. Samples are ephemeral -- processed once, never retained.
//! Serialized form doubles as the JSONL trace-file line format.

use serde::{Deserialize, Serialize};

/// One reading from the motion sensor, produced at a fixed cadence.
///
/// Axis values are in units of gravitational acceleration, already
/// gravity-compensated by the sensor source. `timestamp_ms` must be
/// monotonically increasing within a stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelSample {
    pub timestamp_ms: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelSample {
    pub fn new(timestamp_ms: u64, x: f64, y: f64, z: f64) -> Self {
        Self { timestamp_ms, x, y, z }
    }

    /// Euclidean norm of the 3-axis acceleration vector, in g.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}
