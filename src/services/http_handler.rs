//! HTTP API handler logic, independent of the HTTP server.
//!
//! [`HttpApiHandler`] decodes request bodies, calls the [`Registry`], and turns
//! the outcome into an [`ApiResult`] (status code plus JSON body). The Axum
//! router in [`web`](super::web) only extracts path segments and bodies and
//! delegates here.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use railways::Registry;
//! use railways::services::HttpApiHandler;
//!
//! let handler = HttpApiHandler::new(Arc::new(Registry::new()));
//!
//! let created = handler.handle_create_station(br#"{"name": "A"}"#);
//! assert_eq!(created.status(), 201);
//!
//! let listed = handler.handle_list_stations();
//! assert_eq!(listed.body(), r#"{"stations":["A"]}"#);
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ErrorKind, RegistryError};
use crate::messages::{
    parse_station_request, parse_train_request, parse_trip_request, validate_name, ErrorResponse,
    MessageError, StationsResponse, TrainRequest, TrainsResponse, TripResponse,
};
use crate::Registry;

// ============================================================================
// API Response Types
// ============================================================================

/// Result of an API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult {
    /// Success with status code and JSON response body.
    Ok(u16, String),
    /// Error with status code and JSON error body.
    Error(u16, String),
}

impl ApiResult {
    /// 200 response carrying `value` as JSON.
    pub fn ok<T: Serialize>(value: &T) -> Self {
        Self::json(200, value)
    }

    /// 201 response carrying `value` as JSON.
    pub fn created<T: Serialize>(value: &T) -> Self {
        Self::json(201, value)
    }

    /// Error response with an [`ErrorResponse`] body.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        let body = ErrorResponse::new(message);
        match serde_json::to_string(&body) {
            Ok(json) => Self::Error(status, json),
            Err(_) => Self::Error(500, String::from(r#"{"error":"internal error"}"#)),
        }
    }

    /// 400 error response.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    /// 404 error response.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(404, message)
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => Self::Ok(status, json),
            Err(e) => Self::error(500, format!("failed to encode response: {e}")),
        }
    }

    /// Check if this is a success response.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(..))
    }

    /// Get the JSON body.
    pub fn body(&self) -> &str {
        match self {
            Self::Ok(_, json) | Self::Error(_, json) => json,
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::Ok(status, _) | Self::Error(status, _) => *status,
        }
    }
}

impl From<&RegistryError> for ApiResult {
    fn from(err: &RegistryError) -> Self {
        Self::error(status_for(err.kind()), err.to_string())
    }
}

impl From<&MessageError> for ApiResult {
    fn from(err: &MessageError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// HTTP status code for a registry error kind.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Conflict => 409,
        ErrorKind::NotFound => 404,
        ErrorKind::Invalid => 400,
    }
}

// Axum integration: allow ApiResult to be returned directly from handlers
#[cfg(feature = "web")]
impl axum::response::IntoResponse for ApiResult {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{header, StatusCode};

        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match self {
            Self::Ok(_, json) | Self::Error(_, json) => json,
        };

        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

fn rejected(op: &'static str, err: &RegistryError) -> ApiResult {
    debug!(op, error = %err, "request rejected");
    ApiResult::from(err)
}

fn malformed(op: &'static str, err: &MessageError) -> ApiResult {
    debug!(op, error = %err, "malformed request");
    ApiResult::from(err)
}

// ============================================================================
// HTTP API Handler
// ============================================================================

/// Shared HTTP API handler.
///
/// Cheap to clone; every clone talks to the same [`Registry`].
#[derive(Debug, Clone)]
pub struct HttpApiHandler {
    registry: Arc<Registry>,
}

impl HttpApiHandler {
    /// Create a new handler over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry this handler serves.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// POST /station - Create a station.
    ///
    /// Accepts JSON: `{"name": "A"}`
    pub fn handle_create_station(&self, body: &[u8]) -> ApiResult {
        let req = match parse_station_request(body) {
            Ok(req) => req,
            Err(e) => return malformed("create_station", &e),
        };
        match self.registry.create_station(&req.name) {
            Ok(()) => {
                debug!(station = %req.name, "station created");
                ApiResult::created(&req)
            }
            Err(e) => rejected("create_station", &e),
        }
    }

    /// DELETE /station - Delete a station and any trains still at it.
    ///
    /// Accepts JSON: `{"name": "A"}`
    pub fn handle_delete_station(&self, body: &[u8]) -> ApiResult {
        let req = match parse_station_request(body) {
            Ok(req) => req,
            Err(e) => return malformed("delete_station", &e),
        };
        match self.registry.delete_station(&req.name) {
            Ok(scrapped) => {
                if scrapped.is_empty() {
                    debug!(station = %req.name, "station deleted");
                } else {
                    info!(
                        station = %req.name,
                        trains = ?scrapped,
                        "station deleted with trains still present; trains removed"
                    );
                }
                ApiResult::ok(&req)
            }
            Err(e) => rejected("delete_station", &e),
        }
    }

    /// GET /stations - List all stations.
    pub fn handle_list_stations(&self) -> ApiResult {
        ApiResult::ok(&StationsResponse {
            stations: self.registry.list_stations(),
        })
    }

    /// POST /{station}/train - Place a new train at a station.
    ///
    /// Accepts JSON: `{"name": "t1"}`
    pub fn handle_add_train(&self, station: &str, body: &[u8]) -> ApiResult {
        let req = match train_request(station, body) {
            Ok(req) => req,
            Err(e) => return malformed("add_train", &e),
        };
        match self.registry.add_train(station, &req.name) {
            Ok(()) => {
                debug!(station, train = %req.name, "train added");
                ApiResult::created(&req)
            }
            Err(e) => rejected("add_train", &e),
        }
    }

    /// DELETE /{station}/train - Remove a train from a station.
    ///
    /// Accepts JSON: `{"name": "t1"}`
    pub fn handle_remove_train(&self, station: &str, body: &[u8]) -> ApiResult {
        let req = match train_request(station, body) {
            Ok(req) => req,
            Err(e) => return malformed("remove_train", &e),
        };
        match self.registry.remove_train(station, &req.name) {
            Ok(()) => {
                debug!(station, train = %req.name, "train removed");
                ApiResult::ok(&req)
            }
            Err(e) => rejected("remove_train", &e),
        }
    }

    /// GET /{station}/trains - List trains at a station.
    pub fn handle_list_trains(&self, station: &str) -> ApiResult {
        match self.registry.list_trains(station) {
            Ok(trains) => ApiResult::ok(&TrainsResponse { trains }),
            Err(e) => rejected("list_trains", &e),
        }
    }

    /// POST /trip - Move a train between stations.
    ///
    /// Accepts JSON: `{"from_station": "A", "to_station": "B", "train": "t1"}`
    pub fn handle_trip(&self, body: &[u8]) -> ApiResult {
        let req = match parse_trip_request(body) {
            Ok(req) => req,
            Err(e) => return malformed("trip", &e),
        };
        match self
            .registry
            .trip(&req.from_station, &req.to_station, &req.train)
        {
            Ok(()) => {
                debug!(
                    train = %req.train,
                    from = %req.from_station,
                    to = %req.to_station,
                    "trip completed"
                );
                ApiResult::ok(&TripResponse::from(req))
            }
            Err(e) => rejected("trip", &e),
        }
    }

    /// GET /health - Liveness probe.
    pub fn handle_health(&self) -> ApiResult {
        ApiResult::Ok(200, String::from(r#"{"status":"ok"}"#))
    }
}

fn train_request(station: &str, body: &[u8]) -> Result<TrainRequest, MessageError> {
    validate_name("station name", station)?;
    parse_train_request(body)
}

/// Fallback for unmatched routes.
pub fn route_not_found(method: &str, path: &str) -> ApiResult {
    warn!(method, path, "no route");
    ApiResult::not_found(format!("No route for {method} {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> HttpApiHandler {
        HttpApiHandler::new(Arc::new(Registry::new()))
    }

    fn error_message(result: &ApiResult) -> String {
        let body: ErrorResponse = serde_json::from_str(result.body()).unwrap();
        body.error
    }

    // ========================================================================
    // ApiResult
    // ========================================================================

    #[test]
    fn test_api_result() {
        let ok = ApiResult::ok(&TrainsResponse { trains: vec![] });
        assert!(ok.is_ok());
        assert_eq!(ok.status(), 200);
        assert_eq!(ok.body(), r#"{"trains":[]}"#);

        let err = ApiResult::bad_request("bad input");
        assert!(!err.is_ok());
        assert_eq!(err.status(), 400);
        assert_eq!(err.body(), r#"{"error":"bad input"}"#);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Conflict), 409);
        assert_eq!(status_for(ErrorKind::NotFound), 404);
        assert_eq!(status_for(ErrorKind::Invalid), 400);

        let err = RegistryError::TrainNotAtStation {
            train: "t1".into(),
            station: "A".into(),
        };
        assert_eq!(ApiResult::from(&err).status(), 404);
    }

    // ========================================================================
    // Stations
    // ========================================================================

    #[test]
    fn test_create_station_twice() {
        let handler = handler();

        let first = handler.handle_create_station(br#"{"name": "X"}"#);
        assert_eq!(first.status(), 201);
        assert_eq!(first.body(), r#"{"name":"X"}"#);

        let second = handler.handle_create_station(br#"{"name": "X"}"#);
        assert_eq!(second.status(), 409);
        assert_eq!(error_message(&second), "Station X already exists");
    }

    #[test]
    fn test_create_station_bad_body() {
        let handler = handler();

        let result = handler.handle_create_station(b"not json");
        assert_eq!(result.status(), 400);
        assert!(error_message(&result).starts_with("Invalid request body"));
        assert!(handler.registry().list_stations().is_empty());
    }

    #[test]
    fn test_delete_station_reports_missing() {
        let handler = handler();
        let result = handler.handle_delete_station(br#"{"name": "A"}"#);
        assert_eq!(result.status(), 404);
        assert_eq!(error_message(&result), "Station A does not exist");
    }

    #[test]
    fn test_delete_station_with_trains() {
        let handler = handler();
        handler.registry().create_station("A").unwrap();
        handler.registry().add_train("A", "t1").unwrap();

        let result = handler.handle_delete_station(br#"{"name": "A"}"#);
        assert_eq!(result.status(), 200);
        assert!(handler.registry().list_all_trains().is_empty());
    }

    // ========================================================================
    // Trains
    // ========================================================================

    #[test]
    fn test_add_and_list_trains() {
        let handler = handler();
        handler.registry().create_station("A").unwrap();

        assert_eq!(
            handler.handle_add_train("A", br#"{"name": "t2"}"#).status(),
            201
        );
        assert_eq!(
            handler.handle_add_train("A", br#"{"name": "t1"}"#).status(),
            201
        );

        let listed = handler.handle_list_trains("A");
        assert_eq!(listed.body(), r#"{"trains":["t1","t2"]}"#);
    }

    #[test]
    fn test_add_train_missing_station() {
        let handler = handler();
        let result = handler.handle_add_train("X", br#"{"name": "t1"}"#);
        assert_eq!(result.status(), 404);
        assert!(handler.registry().list_all_trains().is_empty());
    }

    #[test]
    fn test_add_train_rejects_blank_station_segment() {
        let handler = handler();
        let result = handler.handle_add_train(" ", br#"{"name": "t1"}"#);
        assert_eq!(result.status(), 400);
    }

    #[test]
    fn test_remove_unknown_train() {
        let handler = handler();
        handler.registry().create_station("A").unwrap();

        let result = handler.handle_remove_train("A", br#"{"name": "t1"}"#);
        assert_eq!(result.status(), 404);
        assert_eq!(error_message(&result), "Train t1 does not exist");
    }

    // ========================================================================
    // Trip
    // ========================================================================

    #[test]
    fn test_trip() {
        let handler = handler();
        handler.registry().create_station("A").unwrap();
        handler.registry().create_station("B").unwrap();
        handler.registry().add_train("A", "t1").unwrap();

        let result =
            handler.handle_trip(br#"{"from_station": "A", "to_station": "B", "train": "t1"}"#);
        assert_eq!(result.status(), 200);
        let body: TripResponse = serde_json::from_str(result.body()).unwrap();
        assert_eq!(body.to_station, "B");
        assert_eq!(handler.registry().locate_train("t1").as_deref(), Some("B"));
    }

    #[test]
    fn test_trip_same_station_is_bad_request() {
        let handler = handler();
        handler.registry().create_station("A").unwrap();
        handler.registry().add_train("A", "t1").unwrap();

        let result =
            handler.handle_trip(br#"{"from_station": "A", "to_station": "A", "train": "t1"}"#);
        assert_eq!(result.status(), 400);
    }

    #[test]
    fn test_trip_missing_departure() {
        let handler = handler();
        let result =
            handler.handle_trip(br#"{"from_station": "A", "to_station": "B", "train": "t1"}"#);
        assert_eq!(result.status(), 404);
        assert_eq!(error_message(&result), "Departure station A does not exist");
    }

    #[test]
    fn test_route_not_found() {
        let result = route_not_found("GET", "/nowhere/at/all");
        assert_eq!(result.status(), 404);
        assert_eq!(error_message(&result), "No route for GET /nowhere/at/all");
    }

    #[test]
    fn test_health() {
        assert_eq!(handler().handle_health().body(), r#"{"status":"ok"}"#);
    }
}
