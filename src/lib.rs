//! # railways
//!
//! Tracks which trains are at which stations and moves trains between
//! stations, exposed through a small HTTP API.
//!
//! ## Features
//!
//! - **Registry**: stations and globally unique trains with atomic trips
//! - **Typed errors**: every rejection names the offending station or train
//! - **HTTP API** (`web` feature): Axum router with JSON request/response types
//!
//! ## Architecture
//!
//! - `registry` - In-memory state and the operations that guard its invariants
//! - `error` - Registry error taxonomy
//! - `messages` - Wire request/response types and validation
//! - `config` - Server and logging configuration
//! - `services` - HTTP handler and Axum server
//!
//! ## Example
//!
//! ```rust
//! use railways::{Registry, RegistryError};
//!
//! let registry = Registry::new();
//! registry.create_station("A").unwrap();
//! registry.create_station("B").unwrap();
//! registry.add_train("A", "t1").unwrap();
//!
//! registry.trip("A", "B", "t1").unwrap();
//! assert!(registry.list_trains("A").unwrap().is_empty());
//! assert_eq!(registry.list_trains("B").unwrap(), vec!["t1"]);
//!
//! // Train names are unique across all stations
//! assert_eq!(
//!     registry.add_train("A", "t1"),
//!     Err(RegistryError::TrainAlreadyExists { train: "t1".into() })
//! );
//! ```

#![warn(missing_docs)]

/// Server and logging configuration.
pub mod config;
/// Error taxonomy for registry operations.
pub mod error;
/// Request and response types for the HTTP API.
pub mod messages;
/// In-memory station and train registry.
pub mod registry;

/// HTTP handler and (with the `web` feature) Axum server.
pub mod services;

// Re-exports for convenience
pub use config::{Config, LogConfig, WebConfig};
pub use error::{ErrorKind, RegistryError, StationRole};
pub use messages::{
    ErrorResponse, MessageError, StationRequest, StationsResponse, TrainRequest, TrainsResponse,
    TripRequest, TripResponse,
};
pub use registry::Registry;
