//! # Courtbook
//!
//! Court reservation scheduling and financial reconciliation service.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Business logic and use cases
//! - **infrastructure**: External concerns (database, repositories)
//! - **api**: REST API with Swagger documentation
//! - **auth**: Request-scoped authorization context
//! - **notifications**: Reservation lifecycle events

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use api::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
