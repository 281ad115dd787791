//! SeaORM implementation of ClientRepository

use async_trait::async_trait;
use log::error;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::domain::client::ClientRepository;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::client;

pub struct SeaOrmClientRepository {
    db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn exists(&self, client_ref: &str) -> DomainResult<bool> {
        let count = client::Entity::find_by_id(client_ref)
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Database error: {}", e);
                DomainError::StoreUnavailable("database error".to_string())
            })?;
        Ok(count > 0)
    }
}
