//! API router assembly.
//!
//! Layers are applied from bottom (innermost) to top (outermost):
//! CORS → Extension(ctx) → auth → handler. `Extension` must be
//! outermost of the route layers so the auth middleware can access
//! `ApiContext`; handlers receive the same context via `State`.

use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

pub fn api_router(ctx: ApiContext) -> Router {
    let protected = Router::new()
        .route("/predict/pneumonia", post(endpoints::predict::pneumonia))
        .route(
            "/predict/heart_failure",
            post(endpoints::predict::heart_failure),
        )
        .route("/predict/diabetes", post(endpoints::predict::diabetes))
        .route_layer(axum::middleware::from_fn(middleware::require_auth))
        .with_state(ctx.clone());

    Router::new()
        .route("/health", get(endpoints::health::check))
        .merge(protected)
        .layer(Extension(ctx))
        .layer(CorsLayer::permissive())
}
