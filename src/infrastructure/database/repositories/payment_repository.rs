//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::payment::{PaymentRecord, PaymentRepository, PaymentStatus};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::payment_record;

use super::db_err;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: payment_record::Model) -> PaymentRecord {
    PaymentRecord {
        id: m.id,
        booking_id: m.booking_id,
        user_id: m.user_id,
        amount: m.amount,
        currency: m.currency,
        provider: m.provider,
        provider_payment_id: m.provider_payment_id,
        status: PaymentStatus::from_str(&m.status),
        metadata: m.metadata,
        created_at: m.created_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn create(&self, p: PaymentRecord) -> DomainResult<()> {
        debug!(payment_id = %p.id, booking_id = ?p.booking_id, "Creating payment record");

        let model = payment_record::ActiveModel {
            id: Set(p.id),
            booking_id: Set(p.booking_id),
            user_id: Set(p.user_id),
            amount: Set(p.amount),
            currency: Set(p.currency),
            provider: Set(p.provider),
            provider_payment_id: Set(p.provider_payment_id),
            status: Set(p.status.as_str().to_string()),
            metadata: Set(p.metadata),
            created_at: Set(p.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PaymentRecord>> {
        let model = payment_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> DomainResult<Vec<PaymentRecord>> {
        let models = payment_record::Entity::find()
            .filter(payment_record::Column::BookingId.eq(booking_id))
            .order_by_desc(payment_record::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
