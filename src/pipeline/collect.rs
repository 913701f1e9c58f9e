//! Collector: list the capture folder and keep `Page_X` image files.
//!
//! Matching is purely lexical on the lower-cased file name: it must start
//! with the configured prefix and end with one of the allowed extensions.
//! File contents are not sniffed here; a mislabelled file fails later, when
//! the renderer decodes it.

use crate::config::CaptureConfig;
use crate::error::CaptureError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// `true` when `file_name` looks like a capture under `config`'s naming rule.
pub fn is_page_image(file_name: &str, config: &CaptureConfig) -> bool {
    let lower = file_name.to_lowercase();
    lower.starts_with(&config.name_prefix)
        && config
            .extensions
            .iter()
            .any(|ext| lower.ends_with(ext.as_str()))
}

/// Collect the capture file names of `folder`, in directory listing order.
///
/// # Errors
/// - [`CaptureError::FolderNotFound`] if `folder` does not exist
/// - [`CaptureError::NoImages`] if no entry matches
/// - [`CaptureError::ReadFolder`] for any other listing failure
pub fn collect_images(folder: &Path, config: &CaptureConfig) -> Result<Vec<String>, CaptureError> {
    let entries = std::fs::read_dir(folder).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CaptureError::FolderNotFound {
            path: folder.to_path_buf(),
        },
        _ => CaptureError::ReadFolder {
            path: folder.to_path_buf(),
            source: e,
        },
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CaptureError::ReadFolder {
            path: folder.to_path_buf(),
            source: e,
        })?;

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("Skipping non UTF-8 file name: {:?}", entry.file_name());
            continue;
        };

        if !is_page_image(&name, config) {
            continue;
        }

        if !entry.path().is_file() {
            debug!("Skipping '{}': not a regular file", name);
            continue;
        }

        files.push(name);
    }

    if files.is_empty() {
        return Err(CaptureError::NoImages {
            path: folder.to_path_buf(),
        });
    }

    info!("Collected {} capture(s) from {}", files.len(), folder.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn predicate_is_case_insensitive() {
        let c = CaptureConfig::default();
        assert!(is_page_image("Page_1.png", &c));
        assert!(is_page_image("PAGE_7.JPEG", &c));
        assert!(is_page_image("page_12_final.webp", &c));
        assert!(is_page_image("Page_x.bmp", &c));
    }

    #[test]
    fn predicate_rejects_wrong_prefix_or_extension() {
        let c = CaptureConfig::default();
        assert!(!is_page_image("Capture_1.png", &c));
        assert!(!is_page_image("Page_1.gif", &c));
        assert!(!is_page_image("Page_1.png.txt", &c));
        assert!(!is_page_image("my_Page_1.png", &c));
        assert!(!is_page_image("Page1.png", &c));
    }

    #[test]
    fn collects_only_matching_files() {
        let dir = TempDir::new().unwrap();
        for name in ["Page_1.png", "page_2.JPG", "notes.txt", "Page_3.gif", "Cover.png"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("Page_9.png")).unwrap();

        let mut files = collect_images(dir.path(), &CaptureConfig::default()).unwrap();
        files.sort();
        assert_eq!(files, vec!["Page_1.png".to_string(), "page_2.JPG".to_string()]);
    }

    #[test]
    fn missing_folder_is_folder_not_found() {
        let dir = TempDir::new().unwrap();
        let err = collect_images(&dir.path().join("nope"), &CaptureConfig::default()).unwrap_err();
        assert!(matches!(err, CaptureError::FolderNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn empty_folder_is_no_images() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "readme.md");
        let err = collect_images(dir.path(), &CaptureConfig::default()).unwrap_err();
        assert!(matches!(err, CaptureError::NoImages { .. }), "got {err:?}");
    }
}
