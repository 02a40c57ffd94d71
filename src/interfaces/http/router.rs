//! API router with Swagger UI

use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{BookingService, PaymentService};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::modules::bookings::{self, handlers::BookingAppState};
use crate::interfaces::http::modules::payments::{self, handlers::PaymentAppState};

/// Unified state for all API routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub booking_service: Arc<BookingService>,
    pub payment_service: Arc<PaymentService>,
}

impl FromRef<ApiState> for BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        BookingAppState {
            bookings: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<ApiState> for PaymentAppState {
    fn from_ref(s: &ApiState) -> Self {
        PaymentAppState {
            payments: Arc::clone(&s.payment_service),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Bookings
        bookings::handlers::create_booking,
        bookings::handlers::list_bookings,
        bookings::handlers::cancel_booking,
        bookings::handlers::confirm_booking,
        // Payments
        payments::handlers::simulate_payment,
    ),
    components(schemas(
        bookings::dto::CreateBookingRequest,
        bookings::dto::SlotRequest,
        bookings::dto::BookingDto,
        bookings::dto::BookingResponse,
        bookings::dto::ConfirmBookingResponse,
        payments::dto::SimulatePaymentRequest,
        payments::dto::PaymentDto,
        payments::dto::PaymentResponse,
        ApiResponse<bookings::dto::BookingResponse>,
        PaginatedResponse<bookings::dto::BookingDto>,
    )),
    tags(
        (name = "Bookings", description = "Consultation slot booking"),
        (name = "Payments", description = "Simulated payment settlement")
    )
)]
struct ApiDoc;

/// Build the REST API router
pub fn create_api_router(state: ApiState) -> Router {
    let booking_routes = Router::new()
        .route(
            "/",
            post(bookings::handlers::create_booking).get(bookings::handlers::list_bookings),
        )
        .route("/{id}/cancel", put(bookings::handlers::cancel_booking))
        .route("/{id}/confirm", post(bookings::handlers::confirm_booking));

    let payment_routes = Router::new().route("/simulate", post(payments::handlers::simulate_payment));

    Router::new()
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/payments", payment_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
