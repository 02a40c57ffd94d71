//! Payment HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::services::PaymentService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for payment handlers
#[derive(Clone)]
pub struct PaymentAppState {
    pub payments: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/simulate",
    tag = "Payments",
    request_body = SimulatePaymentRequest,
    responses(
        (status = 201, description = "Simulated payment settled", body = ApiResponse<PaymentResponse>)
    )
)]
pub async fn simulate_payment(
    State(state): State<PaymentAppState>,
    ValidatedJson(request): ValidatedJson<SimulatePaymentRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<PaymentResponse>>),
    (StatusCode, Json<ApiResponse<PaymentResponse>>),
> {
    let payment = state
        .payments
        .simulate_payment(
            request.booking_id,
            request.user_id,
            request.amount,
            request.currency,
        )
        .await
        .map_err(|e| domain_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PaymentResponse {
            payment: payment.into(),
        })),
    ))
}
