//! Advocate repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Advocate;
use crate::domain::DomainResult;

#[async_trait]
pub trait AdvocateRepository: Send + Sync {
    /// Save a new advocate profile
    async fn save(&self, advocate: Advocate) -> DomainResult<()>;

    /// Find advocate by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Advocate>>;
}
