//! Client entity
//!
//! Client records are owned by the client-administration side; the booking
//! core only reads them for the existence check.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// External client reference stored on reservations
    #[sea_orm(primary_key, auto_increment = false)]
    pub client_ref: String,

    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
