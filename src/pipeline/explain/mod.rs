//! Narrative explanation composition.
//!
//! The composer ranks attributions, builds a deterministic prompt, and
//! delegates prose generation to an external text-generation service
//! behind the narrow `TextGenerate` seam so tests never touch a live
//! network. The returned narrative is accepted as-is beyond a
//! non-empty check; a failure here never invalidates the
//! already-computed prediction.

pub mod gemini;
pub mod prompt;

pub use gemini::{DisabledGenerator, GeminiClient};
pub use prompt::build_explanation_prompt;

use thiserror::Error;

use crate::models::{Attribution, PredictionResult};

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("text-generation service unreachable at {0}")]
    Connection(String),

    #[error("text-generation request timed out after {0}s")]
    Timeout(u64),

    #[error("text-generation service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("text-generation service returned an empty narrative")]
    EmptyResponse,

    #[error("narrative generation is not configured (missing API key)")]
    NotConfigured,
}

/// Prompt-in, text-out seam to the external generation service.
pub trait TextGenerate: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ExplainError>;
}

/// Build the prompt and obtain the narrative.
pub fn compose_explanation(
    generator: &dyn TextGenerate,
    result: &PredictionResult,
    attribution: &Attribution,
) -> Result<String, ExplainError> {
    let prompt = build_explanation_prompt(result, attribution);
    let narrative = generator.generate(&prompt)?;
    if narrative.trim().is_empty() {
        return Err(ExplainError::EmptyResponse);
    }
    Ok(narrative)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{ExplainError, TextGenerate};
    use std::sync::Mutex;

    /// Canned generator capturing the prompts it receives.
    pub struct MockGenerator {
        pub response: Result<String, fn() -> ExplainError>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        pub fn returning(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(make: fn() -> ExplainError) -> Self {
            Self {
                response: Err(make),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerate for MockGenerator {
        fn generate(&self, prompt: &str) -> Result<String, ExplainError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }
}
