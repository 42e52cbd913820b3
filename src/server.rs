// ABOUTME: Axum server orchestration: router assembly, middleware stack and lifecycle
// ABOUTME: Binds the configured address and shuts down gracefully on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, Level};

use crate::config::ServerConfig;
use crate::constants::defaults::MAX_REQUEST_BODY_BYTES;
use crate::errors::{AppError, AppResult};
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{GenerateRoutes, HealthRoutes};

/// HTTP server for the relay
pub struct RelayServer {
    resources: Arc<ServerResources>,
}

impl RelayServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete router with all routes and middleware
    ///
    /// Layers run outermost first: request id assignment, request id
    /// propagation, tracing, CORS, then the body size limit.
    pub fn router(resources: &Arc<ServerResources>) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(
                        DefaultMakeSpan::new()
                            .level(Level::INFO)
                            .include_headers(false),
                    )
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            )
            .layer(setup_cors(&resources.config));

        Router::new()
            .merge(HealthRoutes::routes(Arc::clone(resources)))
            .merge(GenerateRoutes::routes(Arc::clone(resources)))
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
            .layer(middleware)
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails
    /// while running
    pub async fn run(&self) -> AppResult<()> {
        let listener = Self::bind(&self.resources.config).await?;
        self.serve(listener).await
    }

    /// Bind the configured host and port
    ///
    /// The host may be a name (`localhost`) or an IPv4/IPv6 literal.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the host cannot be resolved or the
    /// port cannot be bound
    pub async fn bind(config: &ServerConfig) -> AppResult<TcpListener> {
        let host = config.host.trim_start_matches('[').trim_end_matches(']');
        TcpListener::bind((host, config.http_port))
            .await
            .map_err(|e| {
                AppError::config(format!("Failed to bind {}: {e}", config.bind_address()))
            })
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails while running
    pub async fn serve(&self, listener: TcpListener) -> AppResult<()> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;
        info!(
            environment = %self.resources.config.environment,
            model = %self.resources.config.gemini.model,
            "HTTP server listening on http://{local_addr}"
        );

        axum::serve(listener, Self::router(&self.resources))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

        info!(
            uptime_secs = self.resources.health.uptime().as_secs(),
            "HTTP server stopped"
        );
        Ok(())
    }
}

/// Resolve when the process receives Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
