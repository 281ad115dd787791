//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Anchored day timestamp (UTC midnight + anchor offset)
    pub day: DateTimeUtc,
    pub court_name: String,
    /// One of the 16 catalog labels
    pub slot: String,
    pub client_ref: String,

    /// Payment state: FULL, DEPOSIT, UNPAID
    pub payment_state: String,
    pub payment_method: String,
    pub full_amount_charged: i64,
    pub deposit_amount_charged: i64,

    /// Reservation status: Active, Cancelled
    pub status: String,

    pub created_by: String,

    #[sea_orm(nullable)]
    pub note: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::court::Entity",
        from = "Column::CourtName",
        to = "super::court::Column::CourtName"
    )]
    Court,
}

impl Related<super::court::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Court.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
