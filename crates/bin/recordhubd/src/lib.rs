//! # recordhubd — recordhub service runtime
//!
//! Composition root shared by the `cars-service` and `employees-service`
//! binaries. Each binary serves exactly one collection and owns its own
//! database; the two deployments never talk to each other.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the counter store and document repository (adapters)
//! - Construct the document service, injecting adapters via port traits
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;

use std::time::Duration;

use recordhub_adapter_http_axum::state::AppState;
use recordhub_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, Database, SqliteCounterStore, SqliteDocumentRepository,
};
use recordhub_app::services::document_service::DocumentService;
use recordhub_app::services::id_allocator::IdAllocator;
use recordhub_domain::schema::CollectionSchema;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Wire adapters and services for `schema` into a ready-to-serve router.
pub fn app(db: &Database, schema: CollectionSchema, request_timeout: Duration) -> axum::Router {
    let pool = db.pool().clone();

    let counters = SqliteCounterStore::new(pool.clone());
    let repo = SqliteDocumentRepository::new(pool, schema.collection);
    let service = DocumentService::new(schema, repo, IdAllocator::new(counters));

    recordhub_adapter_http_axum::router::build(AppState::new(service), request_timeout)
}

/// Run the service for `schema` until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or the listener cannot be bound.
pub async fn run(schema: CollectionSchema) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&schema)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let db = StorageConfig {
        database_url: config.database_url(&schema),
        max_connections: config.database.max_connections,
    }
    .build()
    .await?;

    let router = app(&db, schema, config.request_timeout());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        collection = schema.collection,
        addr = %bind_addr,
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
