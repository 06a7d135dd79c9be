//! Wire format of the Gemini `generateContent` endpoint.
//!
//! Only the fields the client reads or writes are modelled. Everything on
//! the response side is optional so that a shape mismatch surfaces as
//! `LlmError::InvalidResponse` from [`extract_text`] instead of a serde
//! error with a less useful message.

use serde::{Deserialize, Serialize};

use crate::LlmError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text prompt
    pub fn from_prompt(prompt: &str, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// Pull `candidates[0].content.parts[0].text` out of a response.
///
/// A missing link anywhere in that chain, or a blank text, is an invalid
/// response.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("response has no candidates".into()))?;

    let part = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .ok_or_else(|| LlmError::InvalidResponse("first candidate has no content parts".into()))?;

    match part.text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(LlmError::InvalidResponse("first content part has no text".into())),
    }
}
