//! HTTP interface
//!
//! Thin axum layer over the application services. No authentication is
//! wired here; an API gateway in front of this service owns identity.

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
