//! Topic-based notification bus.
//!
//! Observers subscribe to the topics they care about. Publishing never
//! blocks and never fails: a topic without subscribers simply drops the
//! notification.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::notification::{Notification, Topic};

#[derive(Clone)]
pub struct NotificationBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Notification>>>,
}

impl NotificationBus {
    /// Creates a bus with the default capacity per topic.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a bus with `capacity` buffered notifications per topic.
    ///
    /// Slow subscribers lag and skip; the simulation never waits for them.
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    pub fn publish(&self, notification: Notification) {
        let topic = notification.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(notification).is_err()
        {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Notification> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created up front.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to several topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Notification>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("topics", &self.channels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = NotificationBus::new();
        let mut score = bus.subscribe(Topic::Score);
        let mut level = bus.subscribe(Topic::Level);

        bus.publish(Notification::LevelReset);
        bus.publish(Notification::ScoreChanged {
            score: 10,
            points: 10,
            kills: 0,
        });

        assert!(matches!(
            score.try_recv(),
            Ok(Notification::ScoreChanged { score: 10, .. })
        ));
        assert!(score.try_recv().is_err());
        assert_eq!(level.try_recv().ok(), Some(Notification::LevelReset));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = NotificationBus::with_capacity(1);
        bus.publish(Notification::PlayerDied);
        bus.publish(Notification::PlayerDied);
    }
}
