//! Armour Storefront - Public e-commerce site.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - Static product catalog compiled into the binary
//! - `PostgreSQL` for users, reviews, contact messages and sessions
//!   (`STOREFRONT_BACKEND=memory` keeps all of it in process memory)
//! - SMTP (lettre) for review confirmation emails, when configured

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;

use armour_storefront::catalog::Catalog;
use armour_storefront::config::{StorageBackend, StorefrontConfig};
use armour_storefront::db::{self, MemoryStorage, PgStore, Storage};
use armour_storefront::services::email::{LogNotifier, Notifier, SmtpNotifier};
use armour_storefront::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

/// Pick the review notifier: SMTP when configured, otherwise log-only.
fn create_notifier(config: &StorefrontConfig) -> Arc<dyn Notifier> {
    match &config.email {
        Some(email) => match SmtpNotifier::new(email) {
            Ok(notifier) => {
                tracing::info!(smtp_host = %email.smtp_host, "SMTP notifier configured");
                Arc::new(notifier)
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid SMTP configuration, emails will only be logged");
                Arc::new(LogNotifier)
            }
        },
        None => {
            tracing::info!("SMTP_HOST not set, review emails will only be logged");
            Arc::new(LogNotifier)
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "armour_storefront=info,tower_http=debug".into());

    // JSON for log shippers, text for terminals
    let json_layer = config
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.log_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let catalog = Catalog::load().expect("Failed to load product catalog");
    tracing::info!(products = catalog.len(), "Catalog loaded");

    let notifier = create_notifier(&config);

    let app = match config.backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .expect("postgres backend requires a database URL");
            let pool = db::create_pool(database_url).expect("Failed to create database pool");

            // NOTE: Migrations are NOT run automatically on startup.
            // Run them explicitly via: cargo run -p armour-cli -- migrate
            if let Err(e) = sqlx::query("SELECT 1").execute(&pool).await {
                tracing::warn!(error = %e, "Database not reachable yet, continuing startup");
            }

            let session_store = PostgresStore::new(pool.clone());
            let storage: Arc<dyn Storage> = Arc::new(PgStore::new(pool));
            let state = AppState::new(config.clone(), catalog, storage, notifier);
            armour_storefront::app(state, session_store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
            let state = AppState::new(config.clone(), catalog, storage, notifier);
            armour_storefront::app(state, MemoryStore::default())
        }
    };

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
