//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use payments_types::{Clock, PaymentRepository, SystemClock};

use super::handlers::{self, AppState};
use crate::PaymentService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Payments API.
pub struct HttpServer<R: PaymentRepository, C: Clock = SystemClock> {
    state: Arc<AppState<R, C>>,
    metrics: bool,
}

impl<R: PaymentRepository, C: Clock> HttpServer<R, C> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<R, C>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            metrics: false,
        }
    }

    /// Records HTTP metrics through the global OpenTelemetry meter provider.
    pub fn with_metrics(mut self) -> Self {
        self.metrics = true;
        self
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
            .route("/payments", post(handlers::accept_payment::<R, C>))
            .route("/payments/{id}", delete(handlers::stop_payment::<R, C>))
            .route(
                "/payments/card/{card_number}",
                get(handlers::payments_by_card::<R, C>),
            )
            .route(
                "/payments/active/{card_number}",
                get(handlers::active_payments_by_card::<R, C>),
            );

        let router = if self.metrics {
            router.layer(axum_otel_metrics::HttpMetricsLayerBuilder::new().build())
        } else {
            router
        };

        router
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
