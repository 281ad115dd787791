//! Court price configuration repository interface

use async_trait::async_trait;

use super::model::CourtPriceConfig;
use crate::domain::DomainResult;

#[async_trait]
pub trait CourtRepository: Send + Sync {
    /// Find the single active price configuration for a court name
    async fn find_active_by_name(&self, court_name: &str)
        -> DomainResult<Option<CourtPriceConfig>>;

    /// All active price configurations, ordered by court name
    async fn list_active(&self) -> DomainResult<Vec<CourtPriceConfig>>;
}
