//! Source images: one capture file read into memory for one loop iteration.
//!
//! The file is read once; its format is sniffed from the bytes (not the
//! extension) and its pixel size is taken from the header without a full
//! decode. Renderers that need pixels call [`SourceImage::decode`].

use crate::error::CaptureError;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A capture file plus its natural pixel size.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub file_name: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    bytes: Vec<u8>,
}

impl SourceImage {
    /// Read `path` and probe its format and dimensions.
    pub fn load(path: &Path) -> Result<Self, CaptureError> {
        let bytes = std::fs::read(path).map_err(|e| CaptureError::ReadImage {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Probe already-read bytes.
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, CaptureError> {
        let decode_err = |source| CaptureError::DecodeImage {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
        let format = reader.format().ok_or_else(|| {
            decode_err(image::ImageError::Unsupported(
                image::error::ImageFormatHint::Unknown.into(),
            ))
        })?;
        let (width, height) = reader.into_dimensions().map_err(decode_err)?;

        debug!(
            "Loaded {} ({:?}, {}x{} px)",
            path.display(),
            format,
            width,
            height
        );

        Ok(Self {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            format,
            width,
            height,
            bytes,
        })
    }

    /// Raw file bytes as read from disk.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the full image.
    pub fn decode(&self) -> Result<DynamicImage, CaptureError> {
        image::load_from_memory_with_format(&self.bytes, self.format).map_err(|source| {
            CaptureError::DecodeImage {
                path: self.path.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn load_probes_size_and_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Page_1.png");
        RgbImage::from_pixel(40, 30, Rgb([10, 20, 30])).save(&path).unwrap();

        let src = SourceImage::load(&path).unwrap();
        assert_eq!((src.width, src.height), (40, 30));
        assert_eq!(src.format, ImageFormat::Png);
        assert_eq!(src.file_name, "Page_1.png");
        assert_eq!(src.decode().unwrap().width(), 40);
    }

    #[test]
    fn format_comes_from_content_not_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Page_1.jpg");
        RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        assert_eq!(SourceImage::load(&path).unwrap().format, ImageFormat::Png);
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Page_1.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = SourceImage::load(&path).unwrap_err();
        assert!(matches!(err, CaptureError::DecodeImage { .. }), "got {err:?}");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = SourceImage::load(Path::new("/no/such/Page_1.png")).unwrap_err();
        assert!(matches!(err, CaptureError::ReadImage { .. }), "got {err:?}");
    }
}
