//! HTTP transport for the registry.
//!
//! - `http_handler`: server-independent request handling. Decodes bodies,
//!   calls the [`Registry`](crate::Registry), and maps results and errors to
//!   status codes and JSON bodies.
//! - `web` feature: Axum router and server runner on top of the handler.
//!
//! All request handlers share one registry through an `Arc`:
//!
//! ```ignore
//! use std::sync::Arc;
//! use railways::Registry;
//! use railways::services::{build_router, WebServerConfig};
//!
//! let registry = Arc::new(Registry::new());
//! let router = build_router(Arc::clone(&registry), &WebServerConfig::default());
//! ```

pub mod http_handler;

#[cfg(feature = "web")]
pub mod web;

// Re-exports
pub use http_handler::*;

#[cfg(feature = "web")]
pub use web::*;
