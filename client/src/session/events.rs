//! Session event channel
//!
//! Components that depend on the signed-in user subscribe here and reload
//! their data when the session changes.

use nutri_clinic_shared::models::Role;
use tokio::sync::broadcast;
use tracing::debug;

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_CAPACITY: usize = 32;

/// Session lifecycle notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { role: Role },
    TokensUpdated,
    ProfileUpdated,
    SignedOut,
}

/// Publisher half of the session event channel
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish to all current subscribers; a channel without subscribers drops the event
    pub fn publish(&self, event: SessionEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "Session event published"),
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "Session event dropped, no subscribers")
            }
        }
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
