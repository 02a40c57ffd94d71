//! Booking aggregate
//!
//! Contains the Booking entity, its slot value type, and the repository
//! interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, Slot};
pub use repository::{BookingFilter, BookingRepository};
