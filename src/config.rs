use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthPredict";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "info,healthpredict=debug".to_string()
}

/// Socket address the API server binds to.
pub fn bind_addr() -> SocketAddr {
    std::env::var("HEALTHPREDICT_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8000)))
}

/// Root directory holding one artifact subdirectory per disease model.
pub fn artifact_dir() -> PathBuf {
    std::env::var("HEALTHPREDICT_MODELS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models"))
}

/// Service bearer token expected from the upstream gateway.
/// `None` disables the API (all authenticated routes reject).
pub fn api_token() -> Option<String> {
    std::env::var("HEALTHPREDICT_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
}

/// Append-only prediction log destination.
pub fn prediction_log_path() -> PathBuf {
    std::env::var("HEALTHPREDICT_PREDICTION_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("predictions.jsonl"))
}

/// Gemini API key for narrative generation. Absent key means narratives
/// are disabled; predictions are still served without an explanation.
pub fn gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Text-generation model name.
pub fn gemini_model() -> String {
    std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string())
}

/// Base URL of the text-generation service.
pub fn gemini_base_url() -> String {
    std::env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string())
}

/// Timeout for one narrative-generation call.
pub fn gemini_timeout_secs() -> u64 {
    std::env::var("GEMINI_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60)
}
