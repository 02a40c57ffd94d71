//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::services::{BookingService, NewBooking};
use crate::domain::BookingFilter;
use crate::interfaces::http::common::{domain_error, ApiResponse, PaginatedResponse, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

fn parse_instant(
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, (StatusCode, Json<ApiResponse<BookingResponse>>)> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Invalid {}: {}", field, e))),
            )
        })
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Invalid slot times"),
        (status = 404, description = "Advocate not found"),
        (status = 409, description = "Slot not available")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<BookingResponse>>),
    (StatusCode, Json<ApiResponse<BookingResponse>>),
> {
    let start = parse_instant("slot.start", &request.slot.start)?;
    let end = parse_instant("slot.end", &request.slot.end)?;

    let booking = state
        .bookings
        .create_booking(NewBooking {
            user_id: request.user_id,
            advocate_id: request.advocate_id,
            start,
            end,
            amount: request.amount,
            currency: request.currency,
        })
        .await
        .map_err(|e| domain_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingResponse {
            booking: booking.into(),
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(ListBookingsQuery),
    responses(
        (status = 200, description = "Bookings page", body = ApiResponse<PaginatedResponse<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<BookingDto>>>,
    (StatusCode, Json<ApiResponse<PaginatedResponse<BookingDto>>>),
> {
    let filter = BookingFilter {
        user_id: query.user_id,
        advocate_id: query.advocate_id,
    };

    let (bookings, total) = state
        .bookings
        .list_bookings(filter, query.page, query.limit)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(ApiResponse::success(PaginatedResponse {
        items: bookings.into_iter().map(BookingDto::from).collect(),
        total,
        page: query.page.max(1),
        limit: query.limit,
    })))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already terminal")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<BookingResponse>>)> {
    let booking = state
        .bookings
        .cancel_booking(id)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(ApiResponse::success(BookingResponse {
        booking: booking.into(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/confirm",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking confirmed", body = ApiResponse<ConfirmBookingResponse>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn confirm_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<Uuid>,
) -> Result<
    Json<ApiResponse<ConfirmBookingResponse>>,
    (StatusCode, Json<ApiResponse<ConfirmBookingResponse>>),
> {
    let (booking, payment) = state
        .bookings
        .confirm_booking(id, "simulated", None)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(ApiResponse::success(ConfirmBookingResponse {
        booking: booking.into(),
        payment: payment.into(),
    })))
}
