//! Booking domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};
use crate::shared::time::ranges_overlap;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created, awaiting payment confirmation
    Pending,
    /// Paid and confirmed
    Confirmed,
    /// Cancelled by user, advocate or admin (terminal)
    Cancelled,
    /// Consultation took place (terminal)
    Completed,
    /// Client did not show up
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no-show",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            "completed" => Self::Completed,
            "no-show" => Self::NoShow,
            _ => Self::Cancelled,
        }
    }

    /// Whether a booking in this status reserves its slot.
    /// Only pending and confirmed bookings block other requests.
    pub fn blocks_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A half-open consultation window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    /// Build a slot, requiring strict ordering (`start < end`).
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::InvalidInput(format!(
                "Invalid slot times: start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        ranges_overlap(self.start, self.end, other.start, other.end)
    }
}

/// A reserved consultation window with an advocate
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: Uuid,
    /// Requesting user
    pub user_id: Uuid,
    /// Advocate being booked
    pub advocate_id: Uuid,
    /// Reserved time slot
    pub slot: Slot,
    /// Current status
    pub status: BookingStatus,
    /// Fee in minor currency units
    pub amount: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Payment record attached on confirmation
    pub payment_id: Option<Uuid>,
    /// Free-form notes
    pub notes: String,
    /// Arbitrary metadata
    pub meta: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_id: Uuid,
        advocate_id: Uuid,
        slot: Slot,
        amount: i64,
        currency: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            advocate_id,
            slot,
            status: BookingStatus::Pending,
            amount,
            currency: currency.into(),
            payment_id: None,
            notes: String::new(),
            meta: serde_json::Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark as confirmed and attach the payment reference.
    ///
    /// Repeated confirmation calls are not deduplicated here; the payment
    /// confirmation flow documents that gap.
    pub fn confirm(&mut self, payment_id: Uuid) {
        self.status = BookingStatus::Confirmed;
        self.payment_id = Some(payment_id);
        self.updated_at = Utc::now();
    }

    /// Cancel this booking. Terminal bookings reject the transition.
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::Conflict(format!(
                "Booking {} is already {}",
                self.id, self.status
            )));
        }
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether this booking currently reserves its slot.
    pub fn blocks_slot(&self) -> bool {
        self.status.blocks_slot()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    fn sample_booking() -> Booking {
        Booking::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Slot::new(t(9, 0), t(9, 30)).unwrap(),
            50_000,
            "INR",
        )
    }

    #[test]
    fn new_booking_is_pending() {
        let b = sample_booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert!(b.blocks_slot());
        assert!(b.payment_id.is_none());
    }

    #[test]
    fn slot_requires_strict_ordering() {
        assert!(Slot::new(t(9, 0), t(9, 0)).is_err());
        assert!(Slot::new(t(9, 30), t(9, 0)).is_err());
        assert!(Slot::new(t(9, 0), t(9, 1)).is_ok());
    }

    #[test]
    fn adjacent_slots_do_not_overlap() {
        let a = Slot::new(t(10, 0), t(10, 30)).unwrap();
        let b = Slot::new(t(10, 30), t(11, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn confirm_attaches_payment() {
        let mut b = sample_booking();
        let payment_id = Uuid::new_v4();
        b.confirm(payment_id);
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert_eq!(b.payment_id, Some(payment_id));
    }

    #[test]
    fn cancel_from_pending_and_confirmed() {
        let mut b = sample_booking();
        assert!(b.cancel().is_ok());
        assert_eq!(b.status, BookingStatus::Cancelled);

        let mut b = sample_booking();
        b.confirm(Uuid::new_v4());
        assert!(b.cancel().is_ok());
    }

    #[test]
    fn cancel_is_terminal() {
        let mut b = sample_booking();
        b.cancel().unwrap();
        assert!(matches!(b.cancel(), Err(DomainError::Conflict(_))));
        assert!(!b.blocks_slot());
    }

    #[test]
    fn completed_rejects_cancellation() {
        let mut b = sample_booking();
        b.status = BookingStatus::Completed;
        assert!(b.cancel().is_err());
    }

    #[test]
    fn status_roundtrip() {
        for status in &[
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::NoShow,
        ] {
            assert_eq!(&BookingStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_cancelled() {
        assert_eq!(BookingStatus::from_str("garbage"), BookingStatus::Cancelled);
    }
}
