//! SeaORM implementation of CourtRepository

use async_trait::async_trait;
use log::{debug, error};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::court::{CourtPriceConfig, CourtRepository, CourtStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::court;

pub struct SeaOrmCourtRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourtRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: court::Model) -> CourtPriceConfig {
    CourtPriceConfig {
        id: m.id,
        court_name: m.court_name,
        full_amount: m.full_amount,
        deposit_amount: m.deposit_amount,
        status: CourtStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    error!("Database error: {}", e);
    DomainError::StoreUnavailable("database error".to_string())
}

#[async_trait]
impl CourtRepository for SeaOrmCourtRepository {
    async fn find_active_by_name(&self, name: &str) -> DomainResult<Option<CourtPriceConfig>> {
        debug!("Looking up court config: {}", name);

        let model = court::Entity::find()
            .filter(court::Column::CourtName.eq(name))
            .filter(court::Column::Status.eq("Active"))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_active(&self) -> DomainResult<Vec<CourtPriceConfig>> {
        let models = court::Entity::find()
            .filter(court::Column::Status.eq("Active"))
            .order_by_asc(court::Column::CourtName)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
