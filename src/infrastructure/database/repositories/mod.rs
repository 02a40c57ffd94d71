//! SeaORM repository implementations

pub mod advocate_repository;
pub mod booking_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod user_repository;

pub use advocate_repository::SeaOrmAdvocateRepository;
pub use booking_repository::SeaOrmBookingRepository;
pub use payment_repository::SeaOrmPaymentRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
