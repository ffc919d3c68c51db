//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::{CombatEvent, Reporter};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Exchanges, abilities, healing, item use and rejections
    Combat,
    /// Loot drops
    Loot,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<CombatEvent>,
    loot: broadcast::Sender<CombatEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            combat: broadcast::channel(capacity).0,
            loot: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<CombatEvent> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Loot => &self.loot,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: CombatEvent) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<CombatEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for EventBus {
    fn report(&mut self, event: &CombatEvent) {
        self.publish(event.clone());
    }
}
