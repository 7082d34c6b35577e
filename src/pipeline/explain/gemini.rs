//! Gemini REST client for narrative generation.
//!
//! Blocking HTTP with an explicit timeout; the pipeline already runs
//! off the request-handling threads. Connection, timeout, status, and
//! empty-candidate failures map to distinct `ExplainError` variants so
//! the caller can log precisely and keep serving the prediction.

use serde::{Deserialize, Serialize};

use super::{ExplainError, TextGenerate};
use crate::config;

pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        model: String,
        timeout_secs: u64,
    ) -> Result<Self, ExplainError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExplainError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            client,
            timeout_secs,
        })
    }

    /// The key travels in the `x-goog-api-key` header, never in the
    /// URL: `reqwest::Error` prints the full request URL, and those
    /// errors end up stringified in warning logs.
    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Build from environment configuration. `None` when no API key is
    /// set; predictions are then served without narratives.
    pub fn from_env() -> Option<Result<Self, ExplainError>> {
        let api_key = config::gemini_api_key()?;
        Some(Self::new(
            &config::gemini_base_url(),
            api_key,
            config::gemini_model(),
            config::gemini_timeout_secs(),
        ))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl TextGenerate for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, ExplainError> {
        let url = self.endpoint_url();
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "text/plain",
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ExplainError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ExplainError::Timeout(self.timeout_secs)
                } else {
                    ExplainError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExplainError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ExplainError::HttpClient(e.to_string()))?;

        let narrative: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();

        if narrative.trim().is_empty() {
            return Err(ExplainError::EmptyResponse);
        }
        Ok(narrative)
    }
}

/// Stand-in generator when no API key is configured.
pub struct DisabledGenerator;

impl TextGenerate for DisabledGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, ExplainError> {
        Err(ExplainError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "explain" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "text/plain",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "explain");
        assert_eq!(json["generationConfig"]["responseMimeType"], "text/plain");
    }

    #[test]
    fn response_parses_candidate_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "<p>Part one. "}, {"text": "Part two.</p>"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "<p>Part one. Part two.</p>");
    }

    #[test]
    fn response_without_candidates_parses_to_empty() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn disabled_generator_reports_not_configured() {
        assert!(matches!(
            DisabledGenerator.generate("anything"),
            Err(ExplainError::NotConfigured)
        ));
    }

    #[test]
    fn request_url_never_carries_the_api_key() {
        let client = GeminiClient::new(
            "http://localhost:9999",
            "super-secret-key".into(),
            "gemini-2.5-flash".into(),
            5,
        )
        .unwrap();
        let url = client.endpoint_url();
        assert!(url.contains("gemini-2.5-flash"));
        assert!(!url.contains("super-secret-key"));
        assert!(!url.contains("key="));
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let client = GeminiClient::new(
            "http://localhost:9999/",
            "key".into(),
            "gemini-2.5-flash".into(),
            5,
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
