//!
//! Court reservation scheduling and reconciliation service.
//! Reads configuration from TOML file (~/.config/courtbook/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use courtbook::application::services::{AvailabilityService, BookingService, RevenueService};
use courtbook::domain::RepositoryProvider;
use courtbook::infrastructure::database::migrator::Migrator;
use courtbook::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use courtbook::{
    create_api_router, create_event_bus, default_config_path, init_database, AppConfig,
    DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("COURTBOOK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Courtbook...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories and services ──────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let event_bus = create_event_bus();
    let store_timeout = Duration::from_secs(app_cfg.booking.store_timeout_secs);

    let availability = Arc::new(AvailabilityService::new(repos.clone(), store_timeout));
    let booking = Arc::new(BookingService::new(
        repos.clone(),
        event_bus.clone(),
        store_timeout,
    ));
    let revenue = Arc::new(RevenueService::new(repos.clone(), store_timeout));

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    let signal_listener = shutdown.clone();
    tokio::spawn(async move {
        listen_for_shutdown_signals(signal_listener.clone()).await;
        signal_listener.trigger();
    });

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(repos, availability, booking, revenue);

    let api_addr = app_cfg.api_address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Courtbook shutdown complete");
    Ok(())
}
