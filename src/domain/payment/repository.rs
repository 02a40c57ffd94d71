//! Payment repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::PaymentRecord;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Save a new payment record
    async fn create(&self, payment: PaymentRecord) -> DomainResult<()>;

    /// Find payment by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PaymentRecord>>;

    /// All payment records referencing a booking
    async fn find_by_booking(&self, booking_id: Uuid) -> DomainResult<Vec<PaymentRecord>>;
}
