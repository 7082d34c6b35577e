//! Server bootstrap: wires configuration into the prediction stack
//! and runs the axum service.

use std::io;
use std::sync::Arc;

use crate::api::router::api_router;
use crate::api::types::ApiContext;
use crate::artifacts::ArtifactCache;
use crate::audit::{JsonlPredictionLog, PredictionSink};
use crate::config;
use crate::pipeline::explain::{DisabledGenerator, GeminiClient, TextGenerate};
use crate::pipeline::Predictor;

// The narrative client is blocking HTTP and must be built and used off
// the async runtime; the pipeline runs it under spawn_blocking.
fn build_generator() -> Arc<dyn TextGenerate> {
    match GeminiClient::from_env() {
        Some(Ok(client)) => Arc::new(client),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "narrative generator failed to initialize, explanations disabled");
            Arc::new(DisabledGenerator)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, explanations disabled");
            Arc::new(DisabledGenerator)
        }
    }
}

pub async fn serve() -> io::Result<()> {
    let artifacts = Arc::new(ArtifactCache::new(config::artifact_dir()));

    let generator = tokio::task::spawn_blocking(build_generator)
        .await
        .map_err(io::Error::other)?;

    let log_path = config::prediction_log_path();
    let sink: Arc<dyn PredictionSink> =
        Arc::new(JsonlPredictionLog::open(&log_path).map_err(io::Error::other)?);
    tracing::info!(path = %log_path.display(), "prediction log open");

    let token = config::api_token();
    if token.is_none() {
        tracing::warn!("HEALTHPREDICT_API_TOKEN not set, prediction routes will reject all requests");
    }

    let predictor = Arc::new(Predictor::new(artifacts, generator, sink));
    let router = api_router(ApiContext::new(predictor, token));

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router).await
}
