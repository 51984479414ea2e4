//! Axum-based HTTP server for the railway registry API.
//!
//! Provides REST endpoints for:
//! - POST `/station` - Create a station: `{"name": "A"}`
//! - DELETE `/station` - Delete a station: `{"name": "A"}`
//! - GET `/stations` - List stations
//! - POST `/{station}/train` - Add a train: `{"name": "t1"}`
//! - DELETE `/{station}/train` - Remove a train: `{"name": "t1"}`
//! - GET `/{station}/trains` - List trains at a station
//! - POST `/trip` - Move a train: `{"from_station": "A", "to_station": "B", "train": "t1"}`
//! - GET `/health` - Liveness probe

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{Method, Uri},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::WebConfig;
use crate::Registry;

use super::http_handler::{route_not_found, ApiResult, HttpApiHandler};

// ============================================================================
// Route Handlers
// ============================================================================

async fn create_station(State(api): State<HttpApiHandler>, body: Bytes) -> ApiResult {
    api.handle_create_station(&body)
}

async fn delete_station(State(api): State<HttpApiHandler>, body: Bytes) -> ApiResult {
    api.handle_delete_station(&body)
}

async fn list_stations(State(api): State<HttpApiHandler>) -> ApiResult {
    api.handle_list_stations()
}

async fn add_train(
    State(api): State<HttpApiHandler>,
    Path(station): Path<String>,
    body: Bytes,
) -> ApiResult {
    api.handle_add_train(&station, &body)
}

async fn remove_train(
    State(api): State<HttpApiHandler>,
    Path(station): Path<String>,
    body: Bytes,
) -> ApiResult {
    api.handle_remove_train(&station, &body)
}

async fn list_trains(State(api): State<HttpApiHandler>, Path(station): Path<String>) -> ApiResult {
    api.handle_list_trains(&station)
}

async fn trip(State(api): State<HttpApiHandler>, body: Bytes) -> ApiResult {
    api.handle_trip(&body)
}

async fn health(State(api): State<HttpApiHandler>) -> ApiResult {
    api.handle_health()
}

/// Fallback handler for 404
async fn not_found(method: Method, uri: Uri) -> ApiResult {
    route_not_found(method.as_str(), uri.path())
}

// ============================================================================
// Server Builder
// ============================================================================

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
    /// Largest accepted request body in bytes
    pub body_limit_bytes: usize,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self::from_config(&WebConfig::default())
    }
}

impl WebServerConfig {
    /// Create a new config with the given address
    pub fn new(addr: impl Into<SocketAddr>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set whether CORS should be permissive
    pub fn cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Create from shared WebConfig
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            addr: config.socket_addr(),
            cors_permissive: config.cors_permissive,
            body_limit_bytes: config.body_limit_bytes,
        }
    }
}

/// Build the Axum router with all routes
pub fn build_router(registry: Arc<Registry>, config: &WebServerConfig) -> Router {
    let mut router = Router::new()
        .route("/station", post(create_station).delete(delete_station))
        .route("/stations", get(list_stations))
        .route("/trip", post(trip))
        .route("/health", get(health))
        .route("/:station/train", post(add_train).delete(remove_train))
        .route("/:station/trains", get(list_trains))
        .fallback(not_found)
        .with_state(HttpApiHandler::new(registry))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    // Add CORS if requested
    if config.cors_permissive {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Start the web server
///
/// Serves until the process receives Ctrl+C. Use [`build_router`] directly to
/// embed the API in a larger application.
pub async fn run_server(
    registry: Arc<Registry>,
    config: WebServerConfig,
) -> Result<(), std::io::Error> {
    let router = build_router(registry, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %listener.local_addr()?, "railway API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
