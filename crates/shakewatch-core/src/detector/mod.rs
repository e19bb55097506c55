mod engine;

pub use engine::{
    DetectorState, ShakeDetector, SAMPLE_RATE_HZ, SHAKE_COOLDOWN_MS, SHAKE_THRESHOLD_G,
};
