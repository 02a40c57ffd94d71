pub mod ports;
pub mod services;

pub use ports::{LockOptions, LockOutcome, LockToken, SlotLock};
pub use services::{BookingService, PaymentService};
