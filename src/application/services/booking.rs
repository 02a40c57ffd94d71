//! Booking service
//!
//! Coordinates the booking creation critical section: advisory lock on the
//! `(advocate, slot-start)` key, overlap check against committed bookings,
//! transactional insert, and post-commit event publication.
//!
//! The lock is best-effort. When the backend is unreachable the flow
//! continues to the availability check unprotected: two racing requests for
//! an identical slot can then both commit. That degraded mode trades strict
//! race-freedom for availability and is covered by tests rather than
//! hardened away.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{LockOptions, LockOutcome, SlotLock, DEFAULT_LOCK_TTL};
use crate::domain::{
    Advocate, Booking, BookingFilter, DomainError, DomainResult, PaymentRecord,
    RepositoryProvider, Slot,
};
use crate::notifications::{Event, SharedEventBus};

use super::DEFAULT_CURRENCY;

/// Largest page size a listing caller can request
const MAX_PAGE_SIZE: u64 = 100;

/// Lock key for one advocate/slot-start pair, at millisecond precision
fn slot_lock_key(advocate_id: Uuid, start: DateTime<Utc>) -> String {
    format!(
        "lock:adv:{}:{}",
        advocate_id,
        start.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// A booking request as accepted by [`BookingService::create_booking`]
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub advocate_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Fee override in minor units; defaults to the advocate's fee
    pub amount: Option<i64>,
    /// Defaults to "INR"
    pub currency: Option<String>,
}

/// Service for booking operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    lock: Arc<dyn SlotLock>,
    bus: SharedEventBus,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        lock: Arc<dyn SlotLock>,
        bus: SharedEventBus,
    ) -> Self {
        Self { repos, lock, bus }
    }

    /// Create a pending booking for the advocate and slot.
    ///
    /// Fails with `NotFound` if the advocate does not exist, `InvalidInput`
    /// on a degenerate time range, `Conflict` if a pending/confirmed
    /// booking already overlaps the slot. Publishes `booking.created` only
    /// after the insert transaction commits; the lock, when held, is
    /// released on every exit path.
    pub async fn create_booking(&self, request: NewBooking) -> DomainResult<Booking> {
        let advocate = self
            .repos
            .advocates()
            .find_by_id(request.advocate_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Advocate", request.advocate_id))?;

        let slot = Slot::new(request.start, request.end)?;

        let key = slot_lock_key(advocate.id, slot.start);
        let outcome = self
            .lock
            .acquire(&key, DEFAULT_LOCK_TTL, LockOptions::default())
            .await;
        if !outcome.is_locked() {
            warn!(key, "Slot lock unavailable; proceeding without lock protection");
        }

        let result = self.reserve(&advocate, &request, slot).await;

        if let LockOutcome::Locked(token) = outcome {
            if !self.lock.release(&key, &token).await {
                debug!(key, "Slot lock not released (expired or taken over)");
            }
        }

        let booking = result?;
        self.bus.publish(Event::BookingCreated(booking.clone()));
        info!(
            booking_id = %booking.id,
            advocate_id = %booking.advocate_id,
            slot_start = %booking.slot.start,
            "Booking created"
        );
        Ok(booking)
    }

    /// The critical section proper: availability check plus insert.
    async fn reserve(
        &self,
        advocate: &Advocate,
        request: &NewBooking,
        slot: Slot,
    ) -> DomainResult<Booking> {
        let clash = self
            .repos
            .bookings()
            .has_overlap(advocate.id, slot.start, slot.end)
            .await?;
        if clash {
            return Err(DomainError::Conflict(
                "Selected slot is not available".to_string(),
            ));
        }

        let amount = request.amount.unwrap_or(advocate.consultation_fee);
        let currency = request
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let booking = Booking::new(request.user_id, advocate.id, slot, amount, currency);
        self.repos.bookings().create(booking.clone()).await?;
        Ok(booking)
    }

    /// Finalize a reserved slot after (simulated) payment success.
    ///
    /// Creates a succeeded payment record, marks the booking confirmed with
    /// the payment back-reference, then publishes `payment.succeeded`
    /// followed by `booking.confirmed`. Availability is not re-checked:
    /// the reservation's correctness was established at creation time.
    /// Repeated external calls are not deduplicated.
    pub async fn confirm_booking(
        &self,
        booking_id: Uuid,
        provider: &str,
        provider_payment_id: Option<String>,
    ) -> DomainResult<(Booking, PaymentRecord)> {
        let mut booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;

        let payment = PaymentRecord::succeeded(
            Some(booking.id),
            booking.user_id,
            booking.amount,
            booking.currency.clone(),
            provider,
            provider_payment_id,
        );
        self.repos.payments().create(payment.clone()).await?;

        booking.confirm(payment.id);
        self.repos.bookings().update(booking.clone()).await?;

        self.bus.publish(Event::PaymentSucceeded(payment.clone()));
        self.bus.publish(Event::BookingConfirmed(booking.clone()));

        info!(booking_id = %booking.id, payment_id = %payment.id, "Booking confirmed");
        Ok((booking, payment))
    }

    /// Cancel a non-terminal booking and publish `booking.cancelled`.
    pub async fn cancel_booking(&self, booking_id: Uuid) -> DomainResult<Booking> {
        let mut booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;

        booking.cancel()?;
        self.repos.bookings().update(booking.clone()).await?;

        self.bus.publish(Event::BookingCancelled(booking.clone()));
        info!(booking_id = %booking.id, "Booking cancelled");
        Ok(booking)
    }

    /// Page through bookings, newest slot first.
    pub async fn list_bookings(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Booking>, u64)> {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        self.repos.bookings().list(filter, page, limit).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
