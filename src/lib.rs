//! # QuickLegal Booking Service
//!
//! Legal-services marketplace backend centered on consultation slot
//! booking: advisory locking against racing requests, half-open overlap
//! detection, transactional booking commits, and asynchronous event
//! fanout to email and realtime notifications.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Booking/payment services and outbound ports
//! - **infrastructure**: External concerns (database, Redis locks/cache,
//!   email, realtime gateway)
//! - **notifications**: Event bus, event types and subscribers
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Pure time-range helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
