//! Broadcast event bus for distributing `SessionEvent` to front ends.
//!
//! Built on `tokio::sync::broadcast`. Publishing with no active
//! subscribers is a no-op.

use folio_types::event::SessionEvent;
use tokio::sync::broadcast;

/// Default channel capacity; a lagging subscriber loses the oldest events.
pub const DEFAULT_CAPACITY: usize = 256;

/// Multi-consumer bus for chat session change events.
///
/// Cloning the bus clones the sender.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_subscribe_delivers_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::BusyChanged { busy: true });

        let received = rx.recv().await.unwrap();
        assert!(matches!(received, SessionEvent::BusyChanged { busy: true }));
    }

    #[tokio::test]
    async fn multiple_subscribers_each_receive_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SessionEvent::ErrorChanged { error: None });

        assert!(matches!(
            rx1.recv().await.unwrap(),
            SessionEvent::ErrorChanged { error: None }
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            SessionEvent::ErrorChanged { error: None }
        ));
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(SessionEvent::BusyChanged { busy: false });
    }

    #[tokio::test]
    async fn lagged_receiver_reports_lag() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();

        for i in 0..5 {
            bus.publish(SessionEvent::BusyChanged { busy: i % 2 == 0 });
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(_))
        ));
        // After the lag is reported, the newest events are still readable.
        assert!(rx.recv().await.is_ok());
    }
}
