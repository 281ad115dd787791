//! Court price configuration entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique court name, the booking key
    #[sea_orm(unique)]
    pub court_name: String,

    /// Price of a fully paid slot, smallest currency unit
    pub full_amount: i64,
    /// Deposit for a partially paid slot, smallest currency unit
    pub deposit_amount: i64,

    /// Config status: Active, Inactive
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
