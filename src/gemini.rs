//! Shared plumbing for the Gemini REST API
//!
//! Both the embedding and the chat backends speak to
//! `generativelanguage.googleapis.com` with the same auth header and URL
//! shape (`{base}/{model}:{action}`). This module owns that common ground;
//! the backends own their request/response types.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use url::Url;

/// Public Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Build an HTTP client that authenticates every request.
///
/// The API key travels in the `x-goog-api-key` header. No request timeout
/// is configured; a hung call hangs the invocation.
pub fn api_client(api_key: &str) -> Result<Client> {
    let mut value = HeaderValue::from_str(api_key)
        .map_err(|_| Error::Config("GOOGLE_API_KEY contains invalid header characters".to_string()))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("x-goog-api-key"), value);

    Ok(Client::builder().default_headers(headers).build()?)
}

/// Parse a base URL, ensuring it ends with a slash so joins append to it.
pub fn parse_base_url(value: &str) -> Result<Url> {
    if value.ends_with('/') {
        Ok(Url::parse(value)?)
    } else {
        Ok(Url::parse(&format!("{value}/"))?)
    }
}

/// Qualify a bare model name with the API's `models/` prefix.
pub fn qualified_model(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

/// Build the URL for one model action, e.g. `models/embedding-001:embedContent`.
pub fn action_url(base_url: &Url, model: &str, action: &str) -> Result<Url> {
    let suffix = format!("{}:{action}", qualified_model(model));
    Ok(base_url.join(&suffix)?)
}

/// Render a non-success response as `HTTP {status}: {body}`.
pub async fn response_failure(response: reqwest::Response) -> String {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => format!("HTTP {status}: {}", body.trim()),
        _ => format!("HTTP {status}"),
    }
}
