//! Request and response message types for the HTTP API.
//!
//! All field names are `snake_case`. Requests reject unknown fields, and every
//! station or train name is validated on decode (see [`validate_name`]).
//!
//! # Example
//!
//! ```
//! use railways::messages::{parse_trip_request, TripRequest};
//!
//! let json = br#"{"from_station": "A", "to_station": "B", "train": "t1"}"#;
//! let req = parse_trip_request(json).unwrap();
//! assert_eq!(req, TripRequest::new("A", "B", "t1"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted station or train name, in bytes.
pub const MAX_NAME_LEN: usize = 128;

// ============================================================================
// Errors
// ============================================================================

/// A request body that could not be turned into a valid request.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The body is not valid JSON for the expected request shape.
    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    /// A name field is present but not acceptable.
    #[error("Invalid {field}: {reason}")]
    InvalidName {
        /// Which field was rejected.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Check that `name` is usable as a station or train identifier.
///
/// Names must be non-blank, at most [`MAX_NAME_LEN`] bytes, and free of `/`
/// because station names double as URL path segments.
pub fn validate_name(field: &'static str, name: &str) -> Result<(), MessageError> {
    let reason = if name.trim().is_empty() {
        "must not be empty"
    } else if name.len() > MAX_NAME_LEN {
        "is too long"
    } else if name.contains('/') {
        "must not contain '/'"
    } else {
        return Ok(());
    };
    Err(MessageError::InvalidName { field, reason })
}

// ============================================================================
// Request Types
// ============================================================================

/// Request naming a station, used to create or delete it.
///
/// ```json
/// {"name": "Amsterdam"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationRequest {
    /// Station name
    pub name: String,
}

impl StationRequest {
    /// Create a new station request.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request naming a train, used to add it to or remove it from a station.
///
/// ```json
/// {"name": "IC-3000"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainRequest {
    /// Train name
    pub name: String,
}

impl TrainRequest {
    /// Create a new train request.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request to move a train between two stations.
///
/// The legacy `FromStation`, `ToStation` and `Train` keys are accepted as
/// aliases.
///
/// ```json
/// {"from_station": "Amsterdam", "to_station": "Utrecht", "train": "IC-3000"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripRequest {
    /// Departure station
    #[serde(alias = "FromStation")]
    pub from_station: String,
    /// Destination station
    #[serde(alias = "ToStation")]
    pub to_station: String,
    /// Train to move
    #[serde(alias = "Train")]
    pub train: String,
}

impl TripRequest {
    /// Create a new trip request.
    pub fn new(
        from_station: impl Into<String>,
        to_station: impl Into<String>,
        train: impl Into<String>,
    ) -> Self {
        Self {
            from_station: from_station.into(),
            to_station: to_station.into(),
            train: train.into(),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// All known stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationsResponse {
    /// Station names
    pub stations: Vec<String>,
}

/// Trains located at one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainsResponse {
    /// Train names
    pub trains: Vec<String>,
}

/// A completed trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripResponse {
    /// Train that moved
    pub train: String,
    /// Station it left
    pub from_station: String,
    /// Station it is now at
    pub to_station: String,
}

impl From<TripRequest> for TripResponse {
    fn from(req: TripRequest) -> Self {
        Self {
            train: req.train,
            from_station: req.from_station,
            to_station: req.to_station,
        }
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable explanation
    pub error: String,
}

impl ErrorResponse {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parse and validate a station request.
pub fn parse_station_request(json: &[u8]) -> Result<StationRequest, MessageError> {
    let req: StationRequest = serde_json::from_slice(json)?;
    validate_name("station name", &req.name)?;
    Ok(req)
}

/// Parse and validate a train request.
pub fn parse_train_request(json: &[u8]) -> Result<TrainRequest, MessageError> {
    let req: TrainRequest = serde_json::from_slice(json)?;
    validate_name("train name", &req.name)?;
    Ok(req)
}

/// Parse and validate a trip request.
pub fn parse_trip_request(json: &[u8]) -> Result<TripRequest, MessageError> {
    let req: TripRequest = serde_json::from_slice(json)?;
    validate_name("departure station", &req.from_station)?;
    validate_name("destination station", &req.to_station)?;
    validate_name("train name", &req.train)?;
    Ok(req)
}
