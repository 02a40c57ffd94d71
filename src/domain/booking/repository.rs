//! Booking repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::Booking;
use crate::domain::DomainResult;

/// Filter for booking listings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<Uuid>,
    pub advocate_id: Option<Uuid>,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking atomically. The write runs inside a storage
    /// transaction; the caller publishes events only after this returns Ok.
    async fn create(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;

    /// Update an existing booking (status, payment reference)
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Whether any pending/confirmed booking of the advocate overlaps
    /// `[start, end)` under half-open semantics.
    async fn has_overlap(
        &self,
        advocate_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// Page through bookings matching the filter, newest slot first.
    /// Returns the page and the total match count.
    async fn list(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Booking>, u64)>;
}
