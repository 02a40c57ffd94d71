//! Booking DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::Booking;

/// Requested slot, RFC 3339 instants, half-open `[start, end)`
#[derive(Debug, Deserialize, ToSchema)]
pub struct SlotRequest {
    pub start: String,
    pub end: String,
}

/// Request to create a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Requesting user
    pub user_id: Uuid,
    /// Advocate to book
    pub advocate_id: Uuid,
    pub slot: SlotRequest,
    /// Fee override in minor units; defaults to the advocate's fee
    #[validate(range(min = 0))]
    pub amount: Option<i64>,
    /// ISO 4217 code; defaults to INR
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub advocate_id: Uuid,
    pub slot_start: String,
    pub slot_end: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub payment_id: Option<Uuid>,
    pub notes: String,
    pub created_at: String,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            advocate_id: b.advocate_id,
            slot_start: b.slot.start.to_rfc3339(),
            slot_end: b.slot.end.to_rfc3339(),
            status: b.status.to_string(),
            amount: b.amount,
            currency: b.currency,
            payment_id: b.payment_id,
            notes: b.notes,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Response from creating or cancelling a booking
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub booking: BookingDto,
}

/// Response from confirming a booking
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmBookingResponse {
    pub booking: BookingDto,
    pub payment: super::super::payments::dto::PaymentDto,
}

/// Query filter for listing bookings
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListBookingsQuery {
    pub user_id: Option<Uuid>,
    pub advocate_id: Option<Uuid>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}
