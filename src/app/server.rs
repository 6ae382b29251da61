//! HTTP server wiring for the card API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::app::handlers;
use crate::core::repository::CardRepository;
use crate::utils::error::{CardError, Result};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
}

/// Shared application state.
pub struct AppState {
    pub repository: CardRepository,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(repository: CardRepository) -> Self {
        Self {
            repository,
            start_time: Instant::now(),
        }
    }
}

/// Builds the card API router over the given repository.
pub fn router(repository: CardRepository) -> Router {
    let state = Arc::new(AppState::new(repository));

    Router::new()
        .route(
            "/card",
            get(handlers::list_cards).post(handlers::create_card),
        )
        .route(
            "/card/{id}",
            get(handlers::get_card)
                .put(handlers::update_card)
                .delete(handlers::delete_card),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::unknown_route)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    repository: CardRepository,
}

impl Server {
    pub fn new(config: ServerConfig, repository: CardRepository) -> Self {
        Self { config, repository }
    }

    /// Binds the configured address and serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        tracing::info!(
            addr = %self.config.addr,
            store = self.repository.store_kind(),
            "Card service listening"
        );
        serve(listener, self.repository, shutdown_signal()).await?;
        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Serves the router on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, repository: CardRepository, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(repository))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| CardError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
