//! Bearer-token authentication middleware.
//!
//! Validates the gateway's service token and injects the
//! already-authenticated `CallerIdentity` (from `X-User-Id` /
//! `X-User-Name` headers) into request extensions for handlers.
//! User authentication itself happens upstream; this layer only
//! verifies the gateway and carries the identity through.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::CallerIdentity;

pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let expected = ctx.token.as_deref().ok_or(ApiError::Unauthorized)?;

    let presented = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    if !constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
        return Err(ApiError::Unauthorized);
    }

    let user_id = req
        .headers()
        .get("X-User-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| ApiError::BadRequest("missing or invalid X-User-Id header".into()))?;
    let name = req
        .headers()
        .get("X-User-Name")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    req.extensions_mut()
        .insert(CallerIdentity { user_id, name });

    Ok(next.run(req).await)
}

/// Length-leaking only; content comparison takes constant time.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
