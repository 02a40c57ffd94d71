//! Repository provider
//!
//! Unified access to all per-aggregate repositories. Consumers request
//! only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let advocate = repos.advocates().find_by_id(id).await?;
//!     let clash = repos.bookings().has_overlap(id, start, end).await?;
//! }
//! ```

use super::advocate::AdvocateRepository;
use super::booking::BookingRepository;
use super::payment::PaymentRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn advocates(&self) -> &dyn AdvocateRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
