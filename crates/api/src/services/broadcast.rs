//! Live update broadcasting.
//!
//! Fans update events out to connected WebSocket clients over a tokio
//! broadcast channel. Publishing never blocks and never fails the
//! request that triggered the update.

use tokio::sync::broadcast;
use tracing::debug;

use domain::services::{UpdateEvent, UpdatePublisher};

/// Publisher backed by a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<UpdateEvent>,
}

impl BroadcastPublisher {
    pub fn new(tx: broadcast::Sender<UpdateEvent>) -> Self {
        Self { tx }
    }
}

impl UpdatePublisher for BroadcastPublisher {
    fn publish(&self, event: UpdateEvent) {
        // send only errors when there are no subscribers
        match self.tx.send(event) {
            Ok(receivers) => debug!(receivers, "Update event broadcast"),
            Err(_) => debug!("No live update subscribers connected"),
        }
    }
}
