//! HSDS flyer extraction library.
//!
//! Pulls structured [HSDS](https://docs.openreferral.org/) records out of
//! community services flyer images. The hard work — image understanding and
//! structured extraction — is delegated to a model provider; this library is
//! the thin glue around it: load image → call model → render summary →
//! write JSON.
//!
//! Two paths to the same typed result:
//!
//! - [`FlyerExtractor`] sends the image straight to a remote vision model
//!   with a strict JSON schema.
//! - [`OllamaClient`] runs the local variant: an OCR pass over the image,
//!   then structured extraction over the text, both on a local endpoint.
//!
//! # Modules
//!
//! - [`types`] - HSDS record types (serde + schemars)
//! - [`image`] - flyer image loading and base64 encoding
//! - [`extract`] - remote extraction via the OpenAI API
//! - [`ocr`] - local OCR + local LLM variant via Ollama
//! - [`report`] - console summary rendering
//! - [`output`] - JSON persistence

pub mod error;
pub mod extract;
pub mod image;
pub mod ocr;
pub mod output;
pub mod report;
pub mod types;

pub use error::{ExtractError, Result};
pub use extract::{FlyerExtractor, DEFAULT_MODEL, MODEL_ENV_VAR};
pub use image::{resolve_image_path, FlyerImage, DEFAULT_IMAGE_PATH};
pub use ocr::{
    OcrMode, OcrResult, OllamaClient, DEFAULT_LOCAL_MODEL, DEFAULT_OCR_MODEL, DEFAULT_OLLAMA_URL,
    LOCAL_MODEL_ENV_VAR, OCR_MODEL_ENV_VAR, OLLAMA_URL_ENV_VAR,
};
pub use output::{ocr_text_path, write_json, write_text, DEFAULT_OUTPUT_PATH};
pub use report::render_summary;
pub use types::{
    Address, AddressType, HsdsData, Location, Organization, Phone, Schedule, ScheduleFreq,
    Service, ServiceAtLocation, ServiceStatus,
};
