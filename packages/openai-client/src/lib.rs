//! Minimal OpenAI REST API client.
//!
//! Covers exactly what a structured-extraction tool needs: vision input
//! (images as data-URL content parts) and strict structured outputs with a
//! schema generated from a Rust type, over the chat completions endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ContentPart, OpenAIClient};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Flyer {
//!     title: String,
//!     dates: Vec<String>,
//! }
//!
//! let client = OpenAIClient::from_env()?;
//! let flyer: Flyer = client
//!     .extract(
//!         "gpt-4o",
//!         "Extract flyer details.",
//!         vec![
//!             ContentPart::text("Extract the fields from this flyer."),
//!             ContentPart::image(data_url),
//!         ],
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            OpenAIError::Config(
                "OPENAI_API_KEY not set. Set it in a .env file or export it in your shell."
                    .into(),
            )
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Type-safe structured extraction.
    ///
    /// Generates a strict JSON schema from `T`, sends it together with the
    /// user content (text and/or image parts), and deserializes the reply.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_content: impl Into<MessageContent>,
    ) -> Result<T> {
        let schema = T::openai_schema();

        debug!(
            type_name = %T::type_name(),
            model,
            "generated strict schema for extraction"
        );

        let request = StructuredRequest::new(model, system_prompt, user_content, schema);
        let json_str = self.structured_output(request).await?;

        serde_json::from_str(&json_str)
            .map_err(|e| OpenAIError::Parse(format!("failed to deserialize response: {e}")))
    }

    /// Structured output with a JSON schema.
    ///
    /// Uses the `json_schema` response format, so the returned string is
    /// guaranteed by the API to be valid JSON matching the schema.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let raw = self.post_chat(&request).await?;

        raw.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(OpenAIError::EmptyResponse)
    }

    /// POST a request body to `/chat/completions` and parse the raw reply.
    async fn post_chat<B: serde::Serialize>(&self, body: &B) -> Result<types::ChatResponseRaw> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builder_overrides_base_url() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com");

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }
}
