//! JSON persistence for extraction results.
//!
//! One fixed output path per run; an existing file is overwritten. The
//! write happens only after a successful model call, so a failed run never
//! leaves a partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExtractError, Result};
use crate::types::HsdsData;

/// Fixed path the extraction result is written to.
pub const DEFAULT_OUTPUT_PATH: &str = "./hsds_outputs/extracted_hsds_data.json";

/// Path the OCR text of a run is saved under, per mode preset.
pub fn ocr_text_path(mode_label: &str) -> PathBuf {
    PathBuf::from(format!("./hsds_outputs/ocr_text_{mode_label}.md"))
}

/// Serialize the result and write it to `path`, creating parent
/// directories and replacing any previous file.
pub fn write_json(data: &HsdsData, path: &Path) -> Result<()> {
    let rendered = serde_json::to_string_pretty(data)?;
    write_output(rendered.as_bytes(), path)?;

    info!(path = %path.display(), "HSDS data saved");
    Ok(())
}

/// Write raw text (the OCR pass output) to `path`.
pub fn write_text(text: &str, path: &Path) -> Result<()> {
    write_output(text.as_bytes(), path)?;

    info!(path = %path.display(), chars = text.len(), "OCR text saved");
    Ok(())
}

fn write_output(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ExtractError::OutputWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, bytes).map_err(|source| ExtractError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Organization;

    fn sample() -> HsdsData {
        HsdsData {
            organization: Organization {
                name: "Test Org".into(),
                description: "Testing".into(),
                url: None,
                email: None,
            },
            services_at_locations: vec![],
        }
    }

    #[test]
    fn written_file_is_exact_serialization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let data = sample();

        write_json(&data, &path).unwrap();

        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, serde_json::to_string_pretty(&data).unwrap());
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.json");

        write_json(&sample(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn second_run_overwrites_the_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut data = sample();
        write_json(&data, &path).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        data.organization.name = "Renamed Org".into();
        write_json(&data, &path).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_ne!(first, second);
        assert!(second.contains("Renamed Org"));
        assert!(!second.contains("Test Org"));
    }

    #[test]
    fn ocr_text_path_includes_mode() {
        assert_eq!(
            ocr_text_path("tiny"),
            PathBuf::from("./hsds_outputs/ocr_text_tiny.md")
        );
    }
}
