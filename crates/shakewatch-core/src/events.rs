use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name under which shake notifications reach subscribed listeners.
pub const SHAKE_EVENT: &str = "shake";

/// A confirmed detection produces an Event.
/// Listeners receive the bare `"shake"` signal with no payload; the stamp
/// here is diagnostic metadata for logs and trace replay output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Shake {
        at: DateTime<Utc>,
    },
}
