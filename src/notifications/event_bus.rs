//! Event bus for dispatching events to subscribers
//!
//! In-process publish/subscribe. `publish` walks the registry in
//! registration order and spawns one task per interested subscriber, so a
//! slow or failing subscriber cannot delay or fail the publisher or its
//! peers. Completion order across subscribers is unspecified.
//!
//! The bus is passed explicitly to the services that publish on it; tests
//! construct their own bus and register recording subscribers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::events::Event;
use super::ports::NotifyError;

/// A named handler for one or more event types.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this subscriber wants the event.
    fn handles(&self, event: &Event) -> bool;

    /// Process the event. Errors are logged by the bus and go no further.
    async fn handle(&self, event: Event) -> Result<(), NotifyError>;
}

/// Event bus dispatching events to registered subscribers
pub struct EventBus {
    subscribers: RwLock<Vec<Arc<dyn EventSubscriber>>>,
    dispatched: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            dispatched: AtomicUsize::new(0),
        }
    }

    /// Register a subscriber. Registration order is dispatch order.
    pub fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) {
        let mut subs = self
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner());
        debug!(subscriber = subscriber.name(), "Event subscriber registered");
        subs.push(subscriber);
    }

    /// Publish an event to all interested subscribers.
    ///
    /// Dispatch is synchronous; each subscriber's work runs as its own
    /// spawned task. Subscriber failures are logged here and never
    /// propagate back to the caller.
    pub fn publish(&self, event: Event) {
        let event_type = event.event_type();
        let booking_id = event.booking_id();

        let subs = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner());

        let mut matched = 0usize;
        for subscriber in subs.iter().filter(|s| s.handles(&event)) {
            matched += 1;
            let subscriber = Arc::clone(subscriber);
            let event = event.clone();
            tokio::spawn(async move {
                if let Err(err) = subscriber.handle(event).await {
                    warn!(
                        subscriber = subscriber.name(),
                        event_type,
                        error = %err,
                        "Event subscriber failed"
                    );
                }
            });
        }

        self.dispatched.fetch_add(matched, Ordering::Relaxed);
        debug!(
            event_type,
            ?booking_id,
            subscribers = matched,
            "Event published"
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Total handler tasks spawned since startup
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared event bus type
pub type SharedEventBus = Arc<EventBus>;

/// Create a shared event bus
pub fn create_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}
