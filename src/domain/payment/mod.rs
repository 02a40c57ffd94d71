//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{PaymentRecord, PaymentStatus};
pub use repository::PaymentRepository;
