//! Remote extraction: flyer image in, HSDS record out.
//!
//! One request, one response. Failures are terminal — no retries, no
//! partial-result recovery.

use openai_client::{ContentPart, OpenAIClient};
use tracing::info;

use crate::error::Result;
use crate::image::FlyerImage;
use crate::types::HsdsData;

/// Default vision model for remote extraction.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Env var that overrides the extraction model.
pub const MODEL_ENV_VAR: &str = "HSDS_MODEL";

/// System prompt for HSDS extraction. Shared by the remote and local paths.
pub(crate) const SYSTEM_PROMPT: &str = "\
You extract structured data from community services flyers following the \
Human Services Data Specification (HSDS).

Rules:
- Only record information that is explicitly visible on the flyer. Leave a \
field null or empty rather than guessing.
- Create one services_at_locations entry per (service, location) pair. A \
flyer advertising two services at one site yields two entries.
- Schedules use iCal conventions: freq is WEEKLY or MONTHLY, byday uses \
two-letter day codes (MO,TU,WE,TH,FR,SA,SU), times are 24-hour HH:MM.
- Phone numbers are recorded exactly as printed.
- status is 'active' unless the flyer says the service is suspended, \
cancelled, or closed.";

/// User-facing instruction sent alongside the image.
const USER_PROMPT: &str =
    "Extract HSDS data from this community services flyer image.";

/// Extracts HSDS data from flyer images via the OpenAI API.
#[derive(Clone)]
pub struct FlyerExtractor {
    client: OpenAIClient,
    model: String,
}

impl FlyerExtractor {
    /// Create an extractor backed by the given client.
    pub fn new(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from the environment: `OPENAI_API_KEY` (required) and
    /// `HSDS_MODEL` (optional model override).
    pub fn from_env() -> Result<Self> {
        let client = OpenAIClient::from_env()?;
        let model = std::env::var(MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self { client, model })
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The model this extractor will call.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract HSDS data from a loaded flyer image.
    pub async fn extract(&self, image: &FlyerImage) -> Result<HsdsData> {
        info!(
            model = %self.model,
            image = %image.path.display(),
            "extracting HSDS data from flyer"
        );

        let data = self
            .client
            .extract::<HsdsData>(
                &self.model,
                SYSTEM_PROMPT,
                vec![
                    ContentPart::text(USER_PROMPT),
                    ContentPart::image(image.data_url()),
                ],
            )
            .await?;

        info!(
            services = data.services_at_locations.len(),
            organization = %data.organization.name,
            "extraction complete"
        );

        Ok(data)
    }
}
