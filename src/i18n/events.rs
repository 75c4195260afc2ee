//! Cross-component "language changed" notifications.

use serde::{
    Deserialize,
    Serialize,
};
use tokio::sync::broadcast;

use crate::types::LanguageCode;

/// Default number of events buffered per subscriber.
const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageChanged {
    pub language: LanguageCode,
}

/// Broadcast channel for [`LanguageChanged`]. Clones share the channel.
#[derive(Debug, Clone)]
pub struct LanguageBus {
    sender: broadcast::Sender<LanguageChanged>,
}

impl LanguageBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Sends `event` to every subscriber. Returns how many received it.
    pub fn publish(&self, event: LanguageChanged) -> usize {
        self.sender.send(event).unwrap_or_else(|_| {
            tracing::trace!("No language change subscribers");
            0
        })
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.sender.subscribe()
    }
}

impl Default for LanguageBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
