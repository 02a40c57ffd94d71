//! Payment record entity
//!
//! One record per payment attempt, tied to at most one booking. A
//! `confirmed` booking corresponds to exactly one `succeeded` record
//! referencing it; the booking carries the back-reference.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            "refunded" => Self::Refunded,
            _ => Self::Failed,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One payment attempt
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub id: Uuid,
    /// Booking this payment settles, if any
    pub booking_id: Option<Uuid>,
    /// Paying user
    pub user_id: Uuid,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    /// Provider name ("simulated" unless a real gateway is wired)
    pub provider: String,
    /// Provider-side transaction reference
    pub provider_payment_id: Option<String>,
    pub status: PaymentStatus,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// A payment that already succeeded (simulated confirmation path).
    pub fn succeeded(
        booking_id: Option<Uuid>,
        user_id: Uuid,
        amount: i64,
        currency: impl Into<String>,
        provider: impl Into<String>,
        provider_payment_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            user_id,
            amount,
            currency: currency.into(),
            provider: provider.into(),
            provider_payment_id,
            status: PaymentStatus::Succeeded,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: Utc::now(),
        }
    }

    /// A payment attempt awaiting settlement.
    pub fn pending(
        booking_id: Option<Uuid>,
        user_id: Uuid,
        amount: i64,
        currency: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            user_id,
            amount,
            currency: currency.into(),
            provider: provider.into(),
            provider_payment_id: None,
            status: PaymentStatus::Pending,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_record_references_booking() {
        let booking_id = Uuid::new_v4();
        let p = PaymentRecord::succeeded(
            Some(booking_id),
            Uuid::new_v4(),
            50_000,
            "INR",
            "simulated",
            None,
        );
        assert_eq!(p.status, PaymentStatus::Succeeded);
        assert_eq!(p.booking_id, Some(booking_id));
    }

    #[test]
    fn pending_record_has_no_provider_reference() {
        let p = PaymentRecord::pending(None, Uuid::new_v4(), 1_000, "INR", "simulated");
        assert_eq!(p.status, PaymentStatus::Pending);
        assert!(p.provider_payment_id.is_none());
    }

    #[test]
    fn status_roundtrip() {
        for status in &[
            PaymentStatus::Pending,
            PaymentStatus::Succeeded,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(&PaymentStatus::from_str(status.as_str()), status);
        }
    }
}
