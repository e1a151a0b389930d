//! Application Startup
//!
//! Application building and server initialization.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::{Settings, StoreBackend};
use crate::domain::PrefabRepository;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{InMemoryPrefabRepository, PgPrefabRepository};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub prefabs: Arc<dyn PrefabRepository>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(prefabs: Arc<dyn PrefabRepository>, settings: Settings) -> Self {
        Self {
            prefabs,
            settings: Arc::new(settings),
        }
    }
}

/// Build the router with all middleware layers applied.
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let prefabs = create_store(&settings).await?;
        let addr = settings.server_addr();

        let state = AppState::new(prefabs, settings);
        let router = build_router(state);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind TCP listener on {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Create the prefab store selected by `store.backend`.
async fn create_store(settings: &Settings) -> Result<Arc<dyn PrefabRepository>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory prefab store, data will not survive a restart");
            Ok(Arc::new(InMemoryPrefabRepository::new()))
        }
        StoreBackend::Postgres => {
            let pool = database::create_pool(&settings.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            tracing::info!("Database connection pool created");

            if settings.store.run_migrations {
                database::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");
            }

            Ok(Arc::new(PgPrefabRepository::new(pool)))
        }
    }
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("SIGINT received, shutting down");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, shutting down");
        }
    }
}

/// Wait for CTRL+C on non-Unix platforms
#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
