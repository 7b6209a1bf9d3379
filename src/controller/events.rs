// SPDX-License-Identifier: GPL-3.0-only

//! Side-channel notifications from the controller
//!
//! Failures never change screen state; they are reported here and in the
//! log. Hosts use [`ControllerEvent::PhotoSaved`] to show the confirmation
//! toast.

use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::errors::{CaptureError, SaveError};
use std::path::PathBuf;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Outcome of an asynchronous controller operation
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// A photo was captured and is now pending review
    PhotoCaptured { id: Uuid },
    /// The device failed to capture; state is unchanged
    CaptureFailed(CaptureError),
    /// The gallery stored the photo
    PhotoSaved { id: Uuid, path: PathBuf },
    /// The gallery failed to store the photo; review was cleared anyway
    SaveFailed { id: Uuid, error: SaveError },
}

/// Broadcast fan-out for controller events
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ControllerEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish an event; dropped silently when nobody listens
    pub fn publish(&self, event: ControllerEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
