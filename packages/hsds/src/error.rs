//! Typed errors for the HSDS extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). None of these are
//! recovered from: the binaries print them and exit non-zero.

use std::path::PathBuf;
use thiserror::Error;

use openai_client::OpenAIError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting HSDS data from a flyer.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input image does not exist
    #[error("image file not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    /// Input image exists but could not be read
    #[error("failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote OpenAI call failed
    #[error(transparent)]
    OpenAI(#[from] OpenAIError),

    /// Local Ollama call failed
    #[error("Ollama error: {0}")]
    Ollama(String),

    /// Model returned JSON that does not fit the HSDS types
    #[error("failed to parse model response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error (missing env var, bad endpoint)
    #[error("configuration error: {0}")]
    Config(String),
}
