//! QuickLegal booking service entry point
//!
//! Reads configuration from TOML file (~/.config/quicklegal/config.toml),
//! wires storage, the Redis slot lock, the event bus and its subscribers,
//! and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use quicklegal_booking::application::services::{BookingService, PaymentService};
use quicklegal_booking::application::SlotLock;
use quicklegal_booking::config::{default_config_path, AppConfig};
use quicklegal_booking::domain::RepositoryProvider;
use quicklegal_booking::infrastructure::database::migrator::Migrator;
use quicklegal_booking::infrastructure::email::mailer_from_config;
use quicklegal_booking::infrastructure::realtime::RealtimeGateway;
use quicklegal_booking::infrastructure::redis::{RedisCache, RedisSlotLock};
use quicklegal_booking::interfaces::http::router::ApiState;
use quicklegal_booking::notifications::register_default_subscribers;
use quicklegal_booking::{
    create_api_router, create_event_bus, init_database, DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("QUICKLEGAL_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let cfg = match AppConfig::load(&config_path) {
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

    info!("Starting QuickLegal booking service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: cfg.database.url.clone(),
    };
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

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));

    // ── Redis: slot lock + shared cache ────────────────────────
    // Connections are lazy; an unreachable Redis degrades locking
    // instead of failing startup.
    let slot_lock: Arc<dyn SlotLock> = Arc::new(RedisSlotLock::new(&cfg.redis.url)?);
    let cache = Arc::new(RedisCache::new(&cfg.redis.url)?);

    // ── Notifications ──────────────────────────────────────────
    let mailer = mailer_from_config(&cfg.smtp)?;
    let realtime = Arc::new(RealtimeGateway::new());

    let event_bus = create_event_bus();
    register_default_subscribers(&event_bus, repos.clone(), mailer, realtime, cache);
    info!(
        subscribers = event_bus.subscriber_count(),
        "Event bus initialized"
    );

    // ── Services & API ─────────────────────────────────────────
    let booking_service = Arc::new(BookingService::new(
        repos.clone(),
        slot_lock,
        event_bus.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(repos, event_bus));

    let router = create_api_router(ApiState {
        booking_service,
        payment_service,
    });

    let address = cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("REST API server listening on http://{}", address);
    info!("Swagger UI available at http://{}/docs/", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
