//! Event fanout and notification side effects
//!
//! Booking and payment state changes are decoupled from their side effects
//! (email, realtime pushes, derived cache state) through an in-process
//! event bus. Subscribers run as independent spawned tasks; their failures
//! are logged where they happen and never reach the publisher.

pub mod event_bus;
pub mod events;
pub mod ports;
pub mod subscribers;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{Event, UserCreatedEvent, UserLoggedInEvent};
pub use ports::{EmailMessage, EmailSender, LastLoginStore, NotifyError, RealtimeSender};
pub use subscribers::register_default_subscribers;
