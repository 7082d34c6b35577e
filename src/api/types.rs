//! Shared state for the API router.

use std::sync::Arc;

use crate::pipeline::Predictor;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub predictor: Arc<Predictor>,
    /// Service bearer token expected from the upstream gateway.
    /// `None` disables all authenticated routes.
    pub token: Option<Arc<String>>,
}

impl ApiContext {
    pub fn new(predictor: Arc<Predictor>, token: Option<String>) -> Self {
        Self {
            predictor,
            token: token.map(Arc::new),
        }
    }
}
