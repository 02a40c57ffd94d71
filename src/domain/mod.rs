pub mod advocate;
pub mod booking;
pub mod error;
pub mod payment;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use advocate::{Advocate, AdvocateRepository};
pub use booking::{Booking, BookingFilter, BookingRepository, BookingStatus, Slot};
pub use error::{DomainError, DomainResult};
pub use payment::{PaymentRecord, PaymentRepository, PaymentStatus};
pub use repositories::RepositoryProvider;
pub use user::{User, UserRepository};
