//! Notification events
//!
//! Defines all event types published on the bus. Booking and payment
//! events carry the full record as committed; subscribers must tolerate
//! interleaved completion of back-to-back events.

use uuid::Uuid;

use crate::domain::{Booking, PaymentRecord};

/// Events published by the booking and payment flows
#[derive(Debug, Clone)]
pub enum Event {
    BookingCreated(Booking),
    PaymentSucceeded(PaymentRecord),
    BookingConfirmed(Booking),
    BookingCancelled(Booking),
    UserCreated(UserCreatedEvent),
    UserLoggedIn(UserLoggedInEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::BookingCreated(_) => "booking.created",
            Event::PaymentSucceeded(_) => "payment.succeeded",
            Event::BookingConfirmed(_) => "booking.confirmed",
            Event::BookingCancelled(_) => "booking.cancelled",
            Event::UserCreated(_) => "user.created",
            Event::UserLoggedIn(_) => "user.logged_in",
        }
    }

    /// Booking this event concerns, if any
    pub fn booking_id(&self) -> Option<Uuid> {
        match self {
            Event::BookingCreated(b)
            | Event::BookingConfirmed(b)
            | Event::BookingCancelled(b) => Some(b.id),
            Event::PaymentSucceeded(p) => p.booking_id,
            Event::UserCreated(_) | Event::UserLoggedIn(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserCreatedEvent {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct UserLoggedInEvent {
    pub user_id: Uuid,
}
