//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    pub advocate_id: Uuid,

    /// Reserved slot, half-open `[slot_start, slot_end)`
    pub slot_start: DateTimeUtc,
    pub slot_end: DateTimeUtc,

    /// Booking status: pending, confirmed, cancelled, completed, no-show
    pub status: String,

    /// Fee in minor currency units
    pub amount: i64,
    pub currency: String,

    #[sea_orm(nullable)]
    pub payment_id: Option<Uuid>,

    pub notes: String,
    pub meta: Json,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::advocate::Entity",
        from = "Column::AdvocateId",
        to = "super::advocate::Column::Id"
    )]
    Advocate,
    #[sea_orm(has_many = "super::payment_record::Entity")]
    Payments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::advocate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advocate.def()
    }
}

impl Related<super::payment_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
