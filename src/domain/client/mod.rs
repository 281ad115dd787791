//! Client collaborator interface
//!
//! Client records are plain CRUD owned elsewhere; the booking core only
//! needs an existence check for the reference stored on a reservation.

use async_trait::async_trait;

use crate::domain::DomainResult;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Whether a client with this external reference exists
    async fn exists(&self, client_ref: &str) -> DomainResult<bool>;
}
