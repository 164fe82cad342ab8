//! Gemini chat backend
//!
//! Talks to the `generateContent` endpoint. Generation runs at
//! temperature 0 so answers stay anchored to the supplied context.
//! Requests are never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::gemini::{self, DEFAULT_BASE_URL};

use super::ChatModel;

/// Gemini REST chat model
pub struct GeminiChat {
    client: Client,
    base_url: Url,
    model: String,
}

impl GeminiChat {
    /// Create a chat model handle against the public API.
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a chat model handle against a custom base URL.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: gemini::api_client(api_key)?,
            base_url: gemini::parse_base_url(base_url)?,
            model: gemini::qualified_model(model),
        })
    }
}

#[async_trait]
impl ChatModel for GeminiChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = gemini::action_url(&self.base_url, &self.model, "generateContent")?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "requesting completion");

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Generation(gemini::response_failure(response).await));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("invalid response body: {e}")))?;

        let answer = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if answer.is_empty() {
            return Err(Error::Generation(
                "model returned no answer candidates".to_string(),
            ));
        }

        Ok(answer)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
