//! SeaORM implementation of AdvocateRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;
use uuid::Uuid;

use crate::domain::advocate::{Advocate, AdvocateRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::advocate;

use super::db_err;

pub struct SeaOrmAdvocateRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdvocateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: advocate::Model) -> Advocate {
    Advocate {
        id: m.id,
        user_id: m.user_id,
        consultation_fee: m.consultation_fee,
        currency: m.currency,
        availability: serde_json::from_value(m.availability).unwrap_or_default(),
        bio: m.bio,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

#[async_trait]
impl AdvocateRepository for SeaOrmAdvocateRepository {
    async fn save(&self, a: Advocate) -> DomainResult<()> {
        debug!(advocate_id = %a.id, "Saving advocate");

        let availability =
            serde_json::to_value(&a.availability).unwrap_or_else(|_| serde_json::json!([]));
        let model = advocate::ActiveModel {
            id: Set(a.id),
            user_id: Set(a.user_id),
            consultation_fee: Set(a.consultation_fee),
            currency: Set(a.currency),
            availability: Set(availability),
            bio: Set(a.bio),
            is_active: Set(a.is_active),
            created_at: Set(a.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Advocate>> {
        let model = advocate::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
