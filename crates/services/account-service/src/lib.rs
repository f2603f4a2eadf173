//! Account Service Library
//!
//! User signup, login and access token issuance over HTTP.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AccountServiceConfig;
use crate::infra::{Database, MemoryPersistence, Persistence, UnitOfWork};
use crate::service::{AuthService, Authenticator, JwtIssuer};
use common::DatabaseConfig;
use domain::Argon2Hasher;

/// Where user rows live while serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Wire the auth service over the given unit of work.
pub fn build_auth_service<U>(uow: U, config: &AccountServiceConfig) -> Arc<dyn AuthService>
where
    U: UnitOfWork + 'static,
{
    Arc::new(Authenticator::new(
        Arc::new(uow),
        Arc::new(Argon2Hasher::new()),
        Arc::new(JwtIssuer::new(&config.jwt)),
    ))
}

/// Run the HTTP server. `host`/`port` override the configured address.
pub async fn run_server(
    config: AccountServiceConfig,
    host: Option<String>,
    port: Option<u16>,
    storage: Storage,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = match storage {
        Storage::Postgres => {
            let db = Arc::new(Database::connect(&config.database).await?);
            let auth = build_auth_service(Persistence::new(db.get_connection()), &config);
            AppState::new(auth).with_database(db)
        }
        Storage::Memory => {
            tracing::warn!("Using in-memory storage; users are lost on shutdown");
            AppState::new(build_auth_service(MemoryPersistence::new(), &config))
        }
    };

    let app = create_router(state);

    let host = host.unwrap_or_else(|| config.service.host.clone());
    let port = port.unwrap_or(config.service.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("{} listening on {}", config.service.service_name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env();
    let db = Database::connect_without_migrations(&config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
