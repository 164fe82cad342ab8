//! Gemini embedding backend
//!
//! Talks to the `embedContent` and `batchEmbedContents` endpoints of the
//! Gemini REST API. Requests are never retried; failures surface to the
//! caller immediately.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::gemini::{self, DEFAULT_BASE_URL};

use super::Embedder;

/// The API rejects batches above this many requests per call.
const MAX_BATCH_SIZE: usize = 100;

/// Embedding width by model. Gemini embedding models are fixed-width:
/// `embedding-001` and `text-embedding-004` produce 768 values.
fn model_dimension(model: &str) -> usize {
    match model.trim_start_matches("models/") {
        "gemini-embedding-001" => 3072,
        _ => 768,
    }
}

/// Gemini REST embedding provider
pub struct GeminiEmbedder {
    client: Client,
    base_url: Url,
    model: String,
    dimension: usize,
}

impl GeminiEmbedder {
    /// Create an embedder for the given model against the public API.
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create an embedder against a custom base URL.
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: gemini::api_client(api_key)?,
            base_url: gemini::parse_base_url(base_url)?,
            model: gemini::qualified_model(model),
            dimension: model_dimension(model),
        })
    }

    fn embed_request(&self, text: &str) -> EmbedContentRequest {
        EmbedContentRequest {
            model: self.model.clone(),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        }
    }

    async fn post<Req, Resp>(&self, action: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = gemini::action_url(&self.base_url, &self.model, action)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Embedding(gemini::response_failure(response).await));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| Error::Embedding(format!("invalid response body: {e}")))
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::Embedding(format!(
                "model {} returned a {}-dimensional vector, expected {}",
                self.model,
                vector.len(),
                self.dimension
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.model, chars = text.chars().count(), "embedding text");

        let response: EmbedContentResponse =
            self.post("embedContent", &self.embed_request(text)).await?;
        let vector = response.embedding.values;
        self.check_dimension(&vector)?;
        Ok(vector)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(MAX_BATCH_SIZE) {
            debug!(model = %self.model, batch_size = batch.len(), "embedding batch");

            let request = BatchEmbedContentsRequest {
                requests: batch.iter().map(|text| self.embed_request(text)).collect(),
            };
            let response: BatchEmbedContentsResponse =
                self.post("batchEmbedContents", &request).await?;

            if response.embeddings.len() != batch.len() {
                return Err(Error::Embedding(format!(
                    "requested {} embeddings, API returned {}",
                    batch.len(),
                    response.embeddings.len()
                )));
            }

            vectors.extend(response.embeddings.into_iter().map(|e| e.values));
        }

        for vector in &vectors {
            self.check_dimension(vector)?;
        }

        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct BatchEmbedContentsRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedContentsResponse {
    embeddings: Vec<ContentEmbedding>,
}
