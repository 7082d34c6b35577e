//! HTTP API layer.
//!
//! Exposes the prediction pipeline as a token-authenticated axum
//! router. `api_router()` returns a plain `Router` that can be
//! mounted on any axum server instance.
//! Pipeline errors map to precise status codes and stable error codes
//! rather than a uniform 500.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
