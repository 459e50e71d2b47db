//! Taskvault server -- ownership-scoped task API over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # In-memory storage on the default address 127.0.0.1:8000
//! cargo run --bin taskvault
//!
//! # PostgreSQL storage on a custom address
//! TASKVAULT_DATABASE_URL=postgres://localhost/taskvault \
//!     cargo run --bin taskvault -- --bind 0.0.0.0:8080
//! ```

use std::sync::Arc;

use clap::Parser;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use mockable::DefaultClock;
use taskvault::{
    config::{ConfigError, ServerCliArgs, ServerConfig},
    http::{AppState, router},
    identity::{adapters::memory::StaticTokenIdentityProvider, ports::IdentityError},
    task::{
        adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
        ports::{TaskRepository, TaskRepositoryError},
        services::TaskAccessService,
    },
};
use thiserror::Error;

/// Errors that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to register identity token: {0}")]
    Identity(#[from] IdentityError),

    #[error("failed to connect to the database: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("failed to prepare the database schema: {0}")]
    Schema(#[from] TaskRepositoryError),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let cli = ServerCliArgs::parse();
    let config = ServerConfig::load(&cli)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let identity = identity_provider(&config)?;

    let Some(url) = config.database_url.clone() else {
        tracing::warn!("no database configured; tasks are kept in memory only");
        return serve(&config, Arc::new(InMemoryTaskRepository::new()), identity).await;
    };

    let pool_size = config.pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(pool_size)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await??;
    let repository = PostgresTaskRepository::new(pool);
    repository.ensure_schema().await?;
    tracing::info!(pool_size, "using PostgreSQL task storage");
    serve(&config, Arc::new(repository), identity).await
}

fn identity_provider(config: &ServerConfig) -> Result<StaticTokenIdentityProvider, StartupError> {
    let provider = StaticTokenIdentityProvider::new();
    for binding in &config.tokens {
        provider.register(&binding.token, binding.user_id)?;
    }
    if config.tokens.is_empty() {
        tracing::warn!("no bearer tokens configured; every task request will be rejected");
    }
    Ok(provider)
}

async fn serve<R>(
    config: &ServerConfig,
    repository: Arc<R>,
    identity: StaticTokenIdentityProvider,
) -> Result<(), StartupError>
where
    R: TaskRepository + 'static,
{
    let service = TaskAccessService::new(repository, Arc::new(DefaultClock))
        .with_max_page_size(config.max_page_size);
    let state =
        AppState::new(service, Arc::new(identity)).with_default_page_size(config.page_size);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, "taskvault listening"),
        Err(err) => tracing::warn!(error = %err, "could not read bound address"),
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
