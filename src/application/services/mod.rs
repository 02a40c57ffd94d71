pub mod booking;
pub mod payment;

pub use booking::{BookingService, NewBooking};
pub use payment::PaymentService;

/// Currency applied when neither the caller nor the advocate specifies one
pub const DEFAULT_CURRENCY: &str = "INR";
