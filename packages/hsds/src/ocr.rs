//! Local-model variant: OCR the flyer with a vision model on an Ollama
//! endpoint, then run structured extraction on the text with a local LLM.
//!
//! No authentication — just needs Ollama running locally. Local vision
//! models are slow, so requests carry generous timeouts.

use std::str::FromStr;
use std::time::{Duration, Instant};

use openai_client::StructuredOutput;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::extract::SYSTEM_PROMPT;
use crate::image::FlyerImage;
use crate::types::HsdsData;

/// Default local endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Env var that overrides the local endpoint.
pub const OLLAMA_URL_ENV_VAR: &str = "OLLAMA_URL";

/// Default OCR vision model.
pub const DEFAULT_OCR_MODEL: &str = "deepseek-ocr";

/// Env var that overrides the OCR model.
pub const OCR_MODEL_ENV_VAR: &str = "HSDS_OCR_MODEL";

/// Default local text model for the structured pass.
pub const DEFAULT_LOCAL_MODEL: &str = "gpt-oss:20b";

/// Env var that overrides the local text model.
pub const LOCAL_MODEL_ENV_VAR: &str = "HSDS_LOCAL_MODEL";

/// Prompt used for the OCR pass.
const OCR_PROMPT: &str = "Convert the document to markdown.";

/// Speed/quality preset for the OCR pass.
///
/// The presets trade OCR thoroughness for wall-clock time by capping how
/// much text the model may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrMode {
    /// Fastest, for quick testing
    #[default]
    Tiny,
    /// Fast, good quality
    Small,
    /// Slower, better quality
    Base,
    /// Slowest, most thorough
    Gundam,
}

impl OcrMode {
    /// Output-token budget for the OCR pass.
    pub fn num_predict(self) -> u32 {
        match self {
            OcrMode::Tiny => 2048,
            OcrMode::Small => 4096,
            OcrMode::Base => 8192,
            OcrMode::Gundam => 16384,
        }
    }

    /// Lowercase label, used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            OcrMode::Tiny => "tiny",
            OcrMode::Small => "small",
            OcrMode::Base => "base",
            OcrMode::Gundam => "gundam",
        }
    }
}

impl FromStr for OcrMode {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tiny" => Ok(OcrMode::Tiny),
            "small" => Ok(OcrMode::Small),
            "base" => Ok(OcrMode::Base),
            "gundam" => Ok(OcrMode::Gundam),
            other => Err(ExtractError::Config(format!(
                "invalid OCR mode '{other}' (expected tiny, small, base, or gundam)"
            ))),
        }
    }
}

impl std::fmt::Display for OcrMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Text produced by the OCR pass, with timing for the console report.
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    pub elapsed: Duration,
}

/// Client for a local Ollama endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl OllamaClient {
    /// Create a client for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from `OLLAMA_URL`, falling back to localhost.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var(OLLAMA_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        Self::new(endpoint)
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check whether the Ollama API answers at all.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);
        match self
            .http_client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// List model names known to the endpoint.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct TagsResponse {
            #[serde(default)]
            models: Vec<ModelTag>,
        }

        #[derive(Deserialize)]
        struct ModelTag {
            name: String,
        }

        let url = format!("{}/api/tags", self.endpoint);
        let resp = self
            .http_client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| ExtractError::Ollama(format!("cannot reach {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExtractError::Ollama(format!("HTTP {status} from {url}")));
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| ExtractError::Ollama(format!("failed to parse tag list: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// OCR pass: flyer image in, markdown text out.
    pub async fn ocr_image(
        &self,
        model: &str,
        image: &FlyerImage,
        mode: OcrMode,
    ) -> Result<OcrResult> {
        info!(model, %mode, image = %image.path.display(), "running OCR pass");
        let start = Instant::now();

        let body = GenerateRequest {
            model: model.to_string(),
            prompt: OCR_PROMPT.to_string(),
            system: None,
            images: Some(vec![image.data.clone()]),
            format: None,
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                num_predict: mode.num_predict(),
            },
        };

        let text = self.generate(&body, Duration::from_secs(300)).await?;
        if text.is_empty() {
            return Err(ExtractError::Ollama(
                "OCR model returned an empty response".to_string(),
            ));
        }

        let elapsed = start.elapsed();
        info!(
            chars = text.len(),
            elapsed_s = elapsed.as_secs_f32(),
            "OCR pass complete"
        );

        Ok(OcrResult { text, elapsed })
    }

    /// Structured pass: OCR text in, HSDS record out.
    ///
    /// The strict JSON schema for [`HsdsData`] is passed as the Ollama
    /// `format` constraint, so the model is held to the same shape as the
    /// remote path.
    pub async fn extract_from_text(&self, model: &str, flyer_text: &str) -> Result<HsdsData> {
        info!(model, chars = flyer_text.len(), "extracting HSDS data from OCR text");

        let prompt = format!(
            "Extract HSDS data from this community services flyer text \
             (produced by OCR, so tolerate minor artifacts):\n\n{flyer_text}"
        );

        let body = GenerateRequest {
            model: model.to_string(),
            prompt,
            system: Some(SYSTEM_PROMPT.to_string()),
            images: None,
            format: Some(HsdsData::openai_schema()),
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                num_predict: 8192,
            },
        };

        let response = self.generate(&body, Duration::from_secs(300)).await?;
        let data: HsdsData = serde_json::from_str(&response)?;

        info!(
            services = data.services_at_locations.len(),
            organization = %data.organization.name,
            "local extraction complete"
        );

        Ok(data)
    }

    /// POST to `/api/generate` and return the response text.
    async fn generate(&self, body: &GenerateRequest, timeout: Duration) -> Result<String> {
        let url = format!("{}/api/generate", self.endpoint);
        debug!(%url, model = %body.model, "sending Ollama generate request");

        let resp = self
            .http_client
            .post(&url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ExtractError::Ollama(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ExtractError::Ollama(format!("HTTP {status}: {text}")));
        }

        let generated: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ExtractError::Ollama(format!("failed to parse response: {e}")))?;

        Ok(generated.response.trim().to_string())
    }
}

/// Ollama /api/generate request body.
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
    /// Either absent or a JSON schema the output must match
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama /api/generate response.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("tiny".parse::<OcrMode>().unwrap(), OcrMode::Tiny);
        assert_eq!("SMALL".parse::<OcrMode>().unwrap(), OcrMode::Small);
        assert_eq!("Base".parse::<OcrMode>().unwrap(), OcrMode::Base);
        assert_eq!("gundam".parse::<OcrMode>().unwrap(), OcrMode::Gundam);
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let err = "turbo".parse::<OcrMode>().unwrap_err();
        assert!(err.to_string().contains("turbo"));
    }

    #[test]
    fn slower_modes_get_bigger_budgets() {
        assert!(OcrMode::Tiny.num_predict() < OcrMode::Small.num_predict());
        assert!(OcrMode::Small.num_predict() < OcrMode::Base.num_predict());
        assert!(OcrMode::Base.num_predict() < OcrMode::Gundam.num_predict());
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.endpoint(), "http://localhost:11434");
    }
}
