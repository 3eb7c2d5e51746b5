//! Live update publishing.
//!
//! Whenever a status flag or the parked location changes, a change event is
//! published to all connected viewers. Events carry no state: consumers are
//! expected to re-fetch the overview rather than trust event content.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A change notification pushed to connected viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEvent {
    /// Event name; always `"update"` for state changes.
    pub event: String,
    /// Short human-readable description of what changed.
    pub message: String,
}

impl UpdateEvent {
    /// Create an `update` event with the given message.
    pub fn update(message: impl Into<String>) -> Self {
        Self {
            event: "update".to_string(),
            message: message.into(),
        }
    }
}

/// Publisher interface owned by the composition root.
///
/// Injected rather than process-global so tests can substitute a capturing
/// stub. Publishing is fire-and-forget: delivery is best-effort, at-most-once,
/// with no ordering guarantee beyond emission order at the source.
pub trait UpdatePublisher: Send + Sync {
    fn publish(&self, event: UpdateEvent);
}

/// Publisher stub that records events instead of delivering them.
#[derive(Debug, Default)]
pub struct CapturingPublisher {
    events: Mutex<Vec<UpdateEvent>>,
}

impl CapturingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, in emission order.
    pub fn published(&self) -> Vec<UpdateEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl UpdatePublisher for CapturingPublisher {
    fn publish(&self, event: UpdateEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
