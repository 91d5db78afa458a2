//! Flyer image loading.
//!
//! Reads an image from disk, sniffs the MIME type from the extension, and
//! base64-encodes the bytes for the multimodal API request body.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};

/// Default sample flyer used when no path is given on the command line.
pub const DEFAULT_IMAGE_PATH: &str = "./images/20251020_100526.jpg";

/// Pick the image path to load: the caller's argument, or the default sample.
pub fn resolve_image_path(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH))
}

/// A flyer image loaded from disk, base64-encoded and ready to send.
#[derive(Debug, Clone)]
pub struct FlyerImage {
    /// Where the image came from
    pub path: PathBuf,

    /// Base64-encoded image bytes
    pub data: String,

    /// MIME type (e.g., "image/jpeg")
    pub media_type: &'static str,
}

impl FlyerImage {
    /// Load and encode an image from a local file path.
    ///
    /// Fails before any network call when the file is missing or unreadable.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::ImageNotFound {
                path: path.to_path_buf(),
            });
        }

        let media_type = media_type_for(path);
        let bytes = fs::read(path).map_err(|source| ExtractError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);

        debug!(
            path = %path.display(),
            media_type,
            encoded_chars = data.len(),
            "encoded flyer image as base64"
        );

        Ok(Self {
            path: path.to_path_buf(),
            data,
            media_type,
        })
    }

    /// Data URL suitable for OpenAI-style image content parts.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Resolve a MIME type from the file extension.
///
/// Unknown extensions fall back to image/jpeg, same as the common case for
/// phone-camera flyer photos.
fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        other => {
            warn!("unknown image extension '{other}', defaulting to image/jpeg");
            "image/jpeg"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn media_types_map_from_extensions() {
        assert_eq!(media_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.png")), "image/png");
        assert_eq!(media_type_for(Path::new("a.gif")), "image/gif");
        assert_eq!(media_type_for(Path::new("a.webp")), "image/webp");
    }

    #[test]
    fn unknown_extension_falls_back_to_jpeg() {
        assert_eq!(media_type_for(Path::new("flyer.heic")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("noextension")), "image/jpeg");
    }

    #[test]
    fn no_argument_resolves_to_default_image() {
        assert_eq!(resolve_image_path(None), PathBuf::from(DEFAULT_IMAGE_PATH));
    }

    #[test]
    fn explicit_argument_wins_over_default() {
        let picked = resolve_image_path(Some(PathBuf::from("/tmp/other.png")));
        assert_eq!(picked, PathBuf::from("/tmp/other.png"));
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = FlyerImage::from_path("./does/not/exist.png").unwrap_err();
        assert!(matches!(err, ExtractError::ImageNotFound { .. }));
    }

    #[test]
    fn loads_and_encodes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flyer.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"not really a png").unwrap();

        let image = FlyerImage::from_path(&path).unwrap();
        assert_eq!(image.media_type, "image/png");
        assert!(!image.data.is_empty());
        assert!(image.data_url().starts_with("data:image/png;base64,"));
    }
}
