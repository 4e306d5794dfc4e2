//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{BoardEvent, ControlsEvent, NoticeEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Piece placement: resets, flights, landings, resizes
    Board,
    /// Control visibility, dice display and scoreboard
    Controls,
    /// Player-facing notices and game results
    Notice,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Board, Topic::Controls, Topic::Notice];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone)]
pub enum Event {
    Board(BoardEvent),
    Controls(ControlsEvent),
    Notice(NoticeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Board(_) => Topic::Board,
            Event::Controls(_) => Topic::Controls,
            Event::Notice(_) => Topic::Notice,
        }
    }
}

struct Channels {
    board: broadcast::Sender<Event>,
    controls: broadcast::Sender<Event>,
    notice: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Board => &self.board,
            Topic::Controls => &self.controls,
            Topic::Notice => &self.notice,
        }
    }
}

/// Topic-based event bus
///
/// Every topic has its own broadcast channel, created up front, so
/// subscribing never fails.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                board: broadcast::channel(capacity).0,
                controls: broadcast::channel(capacity).0,
                notice: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::Notice;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut notices = bus.subscribe(Topic::Notice);
        let mut board = bus.subscribe(Topic::Board);

        bus.publish(Event::Notice(NoticeEvent::Notice(Notice::undo())));

        let event = notices.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Notice);
        assert!(matches!(
            board.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
