//! Payment service
//!
//! No real provider is integrated: `simulate_payment` settles instantly
//! and publishes `payment.succeeded`, whose subscriber moves the
//! referenced booking forward if needed.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainResult, PaymentRecord, RepositoryProvider};
use crate::notifications::{Event, SharedEventBus};

use super::DEFAULT_CURRENCY;

/// Service for payment operations
pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    bus: SharedEventBus,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, bus: SharedEventBus) -> Self {
        Self { repos, bus }
    }

    /// Create an already-succeeded payment and publish `payment.succeeded`.
    pub async fn simulate_payment(
        &self,
        booking_id: Option<Uuid>,
        user_id: Uuid,
        amount: i64,
        currency: Option<String>,
    ) -> DomainResult<PaymentRecord> {
        let payment = PaymentRecord::succeeded(
            booking_id,
            user_id,
            amount,
            currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            "simulated",
            Some(format!("sim-{}", Utc::now().timestamp_millis())),
        );
        self.repos.payments().create(payment.clone()).await?;

        self.bus.publish(Event::PaymentSucceeded(payment.clone()));
        info!(payment_id = %payment.id, ?booking_id, "Simulated payment created");
        Ok(payment)
    }

    /// Create a pending payment record. No event is published until the
    /// payment settles.
    pub async fn create_pending(
        &self,
        booking_id: Option<Uuid>,
        user_id: Uuid,
        amount: i64,
        currency: Option<String>,
    ) -> DomainResult<PaymentRecord> {
        let payment = PaymentRecord::pending(
            booking_id,
            user_id,
            amount,
            currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            "simulated",
        );
        self.repos.payments().create(payment.clone()).await?;
        Ok(payment)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentRepository, PaymentStatus};
    use crate::infrastructure::storage::InMemoryRepositories;
    use crate::notifications::create_event_bus;

    #[tokio::test]
    async fn simulated_payment_succeeds_with_provider_reference() {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = PaymentService::new(repos.clone(), create_event_bus());

        let payment = service
            .simulate_payment(None, Uuid::new_v4(), 20_000, None)
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Succeeded);
        assert_eq!(payment.provider, "simulated");
        assert!(payment
            .provider_payment_id
            .as_deref()
            .is_some_and(|id| id.starts_with("sim-")));
        assert_eq!(payment.currency, "INR");

        let stored = repos.payments().find_by_id(payment.id).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn pending_payment_is_persisted_without_settling() {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = PaymentService::new(repos.clone(), create_event_bus());

        let payment = service
            .create_pending(None, Uuid::new_v4(), 5_000, Some("EUR".to_string()))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.currency, "EUR");
        assert!(payment.provider_payment_id.is_none());
    }
}
