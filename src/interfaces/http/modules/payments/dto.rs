//! Payment DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::PaymentRecord;

/// Request to run a simulated payment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SimulatePaymentRequest {
    /// Booking to settle, if any
    pub booking_id: Option<Uuid>,
    /// Paying user
    pub user_id: Uuid,
    /// Amount in minor units
    #[validate(range(min = 0))]
    pub amount: i64,
    /// ISO 4217 code; defaults to INR
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

/// Payment details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: Uuid,
    pub booking_id: Option<Uuid>,
    pub user_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub provider: String,
    pub provider_payment_id: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl From<PaymentRecord> for PaymentDto {
    fn from(p: PaymentRecord) -> Self {
        Self {
            id: p.id,
            booking_id: p.booking_id,
            user_id: p.user_id,
            amount: p.amount,
            currency: p.currency,
            provider: p.provider,
            provider_payment_id: p.provider_payment_id,
            status: p.status.to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Response from the simulated payment endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub payment: PaymentDto,
}
