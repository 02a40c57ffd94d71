//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingFilter, BookingRepository, BookingStatus, Slot};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

use super::db_err;

/// Statuses that reserve a slot
const BLOCKING_STATUSES: [&str; 2] = ["pending", "confirmed"];

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        advocate_id: m.advocate_id,
        slot: Slot {
            start: m.slot_start,
            end: m.slot_end,
        },
        status: BookingStatus::from_str(&m.status),
        amount: m.amount,
        currency: m.currency,
        payment_id: m.payment_id,
        notes: m.notes,
        meta: m.meta,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        user_id: Set(b.user_id),
        advocate_id: Set(b.advocate_id),
        slot_start: Set(b.slot.start),
        slot_end: Set(b.slot.end),
        status: Set(b.status.as_str().to_string()),
        amount: Set(b.amount),
        currency: Set(b.currency),
        payment_id: Set(b.payment_id),
        notes: Set(b.notes),
        meta: Set(b.meta),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, b: Booking) -> DomainResult<()> {
        debug!(booking_id = %b.id, "Creating booking");

        // Single insert today, but the commit point matters: events are
        // published only after this transaction commits.
        let txn = self.db.begin().await.map_err(db_err)?;
        domain_to_active(b).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!(booking_id = %b.id, status = %b.status, "Updating booking");

        let existing = booking::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Booking", b.id));
        }

        domain_to_active(b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn has_overlap(
        &self,
        advocate_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool> {
        // Half-open interval predicate: slot_start < end AND slot_end > start.
        // Adjacent slots therefore do not match.
        let clash = booking::Entity::find()
            .filter(booking::Column::AdvocateId.eq(advocate_id))
            .filter(booking::Column::Status.is_in(BLOCKING_STATUSES))
            .filter(booking::Column::SlotStart.lt(end))
            .filter(booking::Column::SlotEnd.gt(start))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(clash.is_some())
    }

    async fn list(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Booking>, u64)> {
        let mut query = booking::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(booking::Column::UserId.eq(user_id));
        }
        if let Some(advocate_id) = filter.advocate_id {
            query = query.filter(booking::Column::AdvocateId.eq(advocate_id));
        }

        let paginator = query
            .order_by_desc(booking::Column::SlotStart)
            .paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(db_err)?;

        Ok((models.into_iter().map(model_to_domain).collect(), total))
    }
}
