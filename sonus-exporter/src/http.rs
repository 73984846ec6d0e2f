//! HTTP server for the multi-target probe endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::probe::{Prober, TIMEOUT_HEADER, effective_timeout};

const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// How the probe budget is derived from a request.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutPolicy {
    /// Budget when the scraper sends none.
    pub default_secs: f64,
    /// Reserved for writing the response.
    pub offset_secs: f64,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            default_secs: 120.0,
            offset_secs: 0.5,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    prober: Arc<Prober>,
    timeouts: TimeoutPolicy,
}

#[derive(Debug, Deserialize)]
struct ProbeParams {
    target: Option<String>,
    debug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LogsParams {
    id: u64,
}

/// Create the HTTP router.
fn create_router(prober: Arc<Prober>, probe_path: &str, timeouts: TimeoutPolicy) -> Router {
    let state = AppState { prober, timeouts };

    Router::new()
        .route(probe_path, get(probe_handler))
        .route("/health", get(health_handler))
        .route("/history", get(history_handler))
        .route("/logs", get(logs_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Scraper-supplied budget in seconds, if any.
fn requested_timeout(headers: &HeaderMap) -> Result<Option<f64>, String> {
    let Some(value) = headers.get(TIMEOUT_HEADER) else {
        return Ok(None);
    };
    let text = value.to_str().map_err(|e| e.to_string())?;
    if text.is_empty() {
        return Ok(None);
    }
    text.trim().parse::<f64>().map(Some).map_err(|e| e.to_string())
}

/// Handler for the probe endpoint.
async fn probe_handler(
    State(state): State<AppState>,
    Query(params): Query<ProbeParams>,
    headers: HeaderMap,
) -> Response {
    let requested = match requested_timeout(&headers) {
        Ok(requested) => requested,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to parse timeout from Prometheus header: {}", e),
            )
                .into_response();
        }
    };

    let timeout = match effective_timeout(
        requested,
        state.timeouts.default_secs,
        state.timeouts.offset_secs,
    ) {
        Ok(timeout) => timeout,
        Err(e) => {
            warn!(error = %e, "Rejecting probe");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let Some(target) = params.target.filter(|t| !t.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Target parameter is missing").into_response();
    };

    let outcome = match state.prober.probe(&target, timeout).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(device = %target, error = %e, "Probe could not record results");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    if params.debug.as_deref() == Some("true") {
        return (
            StatusCode::OK,
            [("content-type", "text/plain")],
            outcome.debug_text,
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [("content-type", METRICS_CONTENT_TYPE)],
        outcome.metrics,
    )
        .into_response()
}

/// Handler for the /health endpoint.
async fn health_handler() -> Response {
    (StatusCode::OK, "healthy\n").into_response()
}

/// Recent results, optionally for one target.
async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let history = state.prober.history();
    let entries = match params.target {
        Some(target) => history.entries(&target),
        None => history.all(),
    };
    Json(entries).into_response()
}

/// Debug text of one retained probe.
async fn logs_handler(State(state): State<AppState>, Query(params): Query<LogsParams>) -> Response {
    match state.prober.history().get(params.id) {
        Some(entry) => (
            StatusCode::OK,
            [("content-type", "text/plain")],
            entry.debug_text,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("Probe {} not found\n", params.id),
        )
            .into_response(),
    }
}

/// HTTP server configuration.
pub struct HttpServer {
    prober: Arc<Prober>,
    listen_addr: SocketAddr,
    probe_path: String,
    timeouts: TimeoutPolicy,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(
        prober: Arc<Prober>,
        listen_addr: SocketAddr,
        probe_path: String,
        timeouts: TimeoutPolicy,
    ) -> Self {
        Self {
            prober,
            listen_addr,
            probe_path,
            timeouts,
        }
    }

    /// Router serving this server's routes.
    pub fn router(&self) -> Router {
        create_router(self.prober.clone(), &self.probe_path, self.timeouts)
    }

    /// Run the HTTP server until the shutdown signal is received.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let router = self.router();

        info!(
            addr = %self.listen_addr,
            path = %self.probe_path,
            "Starting HTTP server"
        );

        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.listen_addr, e))?;

        info!(
            addr = %self.listen_addr,
            path = %self.probe_path,
            "HTTP server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                loop {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                    if *shutdown.borrow() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
