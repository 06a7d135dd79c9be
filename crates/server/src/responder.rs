//! # Response Generator
//!
//! Produces the answer text for a query and its matched records. The LLM
//! path is tried only when a generator was configured; any failure on that
//! path is logged and replaced by the deterministic fallback, so callers
//! always get text back.

use std::sync::Arc;
use std::time::Instant;

use catalog::CollegeRecord;
use llm_client::{LlmError, TextGenerator};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{fallback, prompt};

/// Whether an LLM may be used, decided once at startup.
#[derive(Clone)]
pub enum LlmCapability {
    Available(Arc<dyn TextGenerator>),
    Unavailable,
}

impl LlmCapability {
    pub fn available(generator: impl TextGenerator + 'static) -> Self {
        LlmCapability::Available(Arc::new(generator))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, LlmCapability::Available(_))
    }
}

impl std::fmt::Debug for LlmCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmCapability::Available(generator) => {
                f.debug_tuple("Available").field(&generator.name()).finish()
            }
            LlmCapability::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Why the LLM path was abandoned
#[derive(Error, Debug)]
enum GenerationError {
    #[error("Failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("LLM returned an empty answer")]
    Empty,
}

/// Turns matches into answer text.
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    capability: LlmCapability,
}

impl ResponseGenerator {
    pub fn new(capability: LlmCapability) -> Self {
        Self { capability }
    }

    /// A generator that only ever uses the fallback.
    pub fn fallback_only() -> Self {
        Self::new(LlmCapability::Unavailable)
    }

    pub fn llm_available(&self) -> bool {
        self.capability.is_available()
    }

    /// Answer `query`. Never fails and never returns an empty string.
    pub async fn generate(&self, query: &str, matches: &[CollegeRecord]) -> String {
        let LlmCapability::Available(generator) = &self.capability else {
            debug!("No LLM configured, using fallback");
            return fallback::render(query, matches);
        };

        let start = Instant::now();
        match Self::generate_with_llm(generator.as_ref(), query, matches).await {
            Ok(text) => {
                info!(
                    provider = generator.name(),
                    elapsed = ?start.elapsed(),
                    "LLM answer generated"
                );
                text
            }
            Err(e) => {
                warn!(provider = generator.name(), "LLM generation failed, using fallback: {}", e);
                fallback::render(query, matches)
            }
        }
    }

    async fn generate_with_llm(
        generator: &dyn TextGenerator,
        query: &str,
        matches: &[CollegeRecord],
    ) -> Result<String, GenerationError> {
        let prompt = prompt::build_prompt(query, matches)?;
        let text = generator.generate_text(&prompt).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text)
    }
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::fallback_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedGenerator {
        answer: Result<String, fn() -> LlmError>,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedGenerator {
        fn ok(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(make: fn() -> LlmError) -> Self {
            Self {
                answer: Err(make),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn matches() -> Vec<CollegeRecord> {
        vec![CollegeRecord {
            name: "Birla Institute of Technology and Science".to_string(),
            location: "Pilani, Rajasthan".to_string(),
            rating: 4.6,
            fees: "₹5 Lakhs/year".to_string(),
            courses: vec!["B.E. Computer Science".to_string()],
            highlights: vec!["No reservation policy".to_string()],
        }]
    }

    #[tokio::test]
    async fn test_unavailable_uses_fallback() {
        let generator = ResponseGenerator::fallback_only();
        let text = generator.generate("pilani", &matches()).await;

        assert_eq!(text, fallback::render("pilani", &matches()));
        assert!(!generator.llm_available());
    }

    #[tokio::test]
    async fn test_llm_answer_is_returned_verbatim() {
        let llm = Arc::new(FixedGenerator::ok("Here are three great options."));
        let generator = ResponseGenerator::new(LlmCapability::Available(llm.clone()));

        let text = generator.generate("pilani", &matches()).await;

        assert_eq!(text, "Here are three great options.");
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"pilani\""));
        assert!(prompts[0].contains("Birla Institute of Technology and Science"));
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back() {
        let generator = ResponseGenerator::new(LlmCapability::available(FixedGenerator::failing(|| {
            LlmError::Status {
                status: 503,
                body: "overloaded".to_string(),
            }
        })));

        let text = generator.generate("pilani", &matches()).await;
        assert!(text.starts_with("Based on our database for \"pilani\":"));
    }

    #[tokio::test]
    async fn test_timeout_with_no_matches_uses_skeleton() {
        let generator =
            ResponseGenerator::new(LlmCapability::available(FixedGenerator::failing(|| LlmError::Timeout)));

        let text = generator.generate("robotics in Pune", &[]).await;
        assert_eq!(text, fallback::skeleton("robotics in Pune"));
    }

    #[tokio::test]
    async fn test_blank_llm_answer_falls_back() {
        let generator = ResponseGenerator::new(LlmCapability::available(FixedGenerator::ok("  \n ")));

        let text = generator.generate("pilani", &matches()).await;
        assert_eq!(text, fallback::render("pilani", &matches()));
    }

    #[test]
    fn test_capability_debug_hides_generator() {
        let capability = LlmCapability::available(FixedGenerator::ok("x"));
        assert_eq!(format!("{:?}", capability), "Available(\"fixed\")");
        assert!(capability.is_available());
    }
}
