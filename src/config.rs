//! Configuration types for capture-to-document conversion.
//!
//! Every constant the pipeline relies on (folder name, output names, the
//! 96-DPI capture assumption, label geometry) lives in [`CaptureConfig`] with
//! a documented default, so tests can point the pipeline at synthetic folders
//! and temporary outputs without touching the working directory.

use crate::error::CaptureError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for one conversion run.
///
/// Built via [`CaptureConfig::builder()`] or using
/// [`CaptureConfig::default()`].
///
/// # Example
/// ```rust
/// use img2doc::CaptureConfig;
///
/// let config = CaptureConfig::builder()
///     .input_dir("shots")
///     .docx_output("out/book.docx")
///     .build()
///     .unwrap();
/// assert_eq!(config.source_dpi, 96.0);
/// ```
#[derive(Clone)]
pub struct CaptureConfig {
    /// Folder scanned for `Page_X` captures. Default: `captures`.
    pub input_dir: PathBuf,

    /// Destination of the DOCX pipeline. Default: `result.docx`.
    pub docx_output: PathBuf,

    /// Destination of the PDF pipeline. Default: `result.pdf`.
    pub pdf_output: PathBuf,

    /// Lower-case file name prefix a capture must start with. Default: `page_`.
    pub name_prefix: String,

    /// Lower-case extensions (with the dot) a capture may end with.
    /// Default: `.png`, `.jpg`, `.jpeg`, `.bmp`, `.webp`.
    pub extensions: Vec<String>,

    /// Pixels per inch assumed for every capture. Default: 96.
    ///
    /// Screen captures carry no trustworthy physical size; 96 is the logical
    /// DPI of a standard desktop display.
    pub source_dpi: f64,

    /// Em size of the PDF page label in pixels. Default: 20.
    pub label_font_size: f32,

    /// Horizontal padding around the label text. Default: 20 px.
    pub label_padding_x: u32,

    /// Vertical padding around the label text. Default: 10 px.
    pub label_padding_y: u32,

    /// Gap between the label box and the bottom edge of the image. Default: 10 px.
    pub label_bottom_margin: u32,

    /// Scalable fonts tried, in order, for the label. The first one that loads
    /// wins; if none does, the embedded bitmap font is used.
    pub label_font_paths: Vec<PathBuf>,

    /// Resolution written into the PDF (pixels per inch). Default: 300.
    ///
    /// Only the page size is derived from it (`px × 72 / resolution` points);
    /// pixels are never resampled.
    pub pdf_resolution: f32,

    /// JPEG quality for PDF page frames, 1–100. Default: 100.
    pub jpeg_quality: u8,

    /// Optional progress events receiver.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("captures"),
            docx_output: PathBuf::from("result.docx"),
            pdf_output: PathBuf::from("result.pdf"),
            name_prefix: "page_".to_string(),
            extensions: [".png", ".jpg", ".jpeg", ".bmp", ".webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            source_dpi: 96.0,
            label_font_size: 20.0,
            label_padding_x: 20,
            label_padding_y: 10,
            label_bottom_margin: 10,
            label_font_paths: default_font_paths(),
            pdf_resolution: 300.0,
            jpeg_quality: 100,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for CaptureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureConfig")
            .field("input_dir", &self.input_dir)
            .field("docx_output", &self.docx_output)
            .field("pdf_output", &self.pdf_output)
            .field("name_prefix", &self.name_prefix)
            .field("extensions", &self.extensions)
            .field("source_dpi", &self.source_dpi)
            .field("label_font_size", &self.label_font_size)
            .field("label_padding_x", &self.label_padding_x)
            .field("label_padding_y", &self.label_padding_y)
            .field("label_bottom_margin", &self.label_bottom_margin)
            .field("label_font_paths", &self.label_font_paths)
            .field("pdf_resolution", &self.pdf_resolution)
            .field("jpeg_quality", &self.jpeg_quality)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl CaptureConfig {
    /// Create a new builder for `CaptureConfig`.
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder {
            config: Self::default(),
        }
    }

    /// Output path used for the given format.
    pub fn output_path(&self, format: OutputFormat) -> &Path {
        match format {
            OutputFormat::Docx => &self.docx_output,
            OutputFormat::Pdf => &self.pdf_output,
        }
    }
}

/// Builder for [`CaptureConfig`].
#[derive(Debug)]
pub struct CaptureConfigBuilder {
    config: CaptureConfig,
}

impl CaptureConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn docx_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.docx_output = path.into();
        self
    }

    pub fn pdf_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdf_output = path.into();
        self
    }

    /// Set the output path of one format.
    pub fn output(self, format: OutputFormat, path: impl Into<PathBuf>) -> Self {
        match format {
            OutputFormat::Docx => self.docx_output(path),
            OutputFormat::Pdf => self.pdf_output(path),
        }
    }

    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.name_prefix = prefix.into().to_lowercase();
        self
    }

    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = exts.into_iter().map(|e| e.into().to_lowercase()).collect();
        self
    }

    pub fn source_dpi(mut self, dpi: f64) -> Self {
        self.config.source_dpi = dpi;
        self
    }

    pub fn label_font_size(mut self, px: f32) -> Self {
        self.config.label_font_size = px.max(1.0);
        self
    }

    pub fn label_padding(mut self, x: u32, y: u32) -> Self {
        self.config.label_padding_x = x;
        self.config.label_padding_y = y;
        self
    }

    pub fn label_bottom_margin(mut self, px: u32) -> Self {
        self.config.label_bottom_margin = px;
        self
    }

    pub fn label_font_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.label_font_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn pdf_resolution(mut self, dpi: f32) -> Self {
        self.config.pdf_resolution = dpi;
        self
    }

    pub fn jpeg_quality(mut self, q: u8) -> Self {
        self.config.jpeg_quality = q.clamp(1, 100);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CaptureConfig, CaptureError> {
        let c = &self.config;
        if !(c.source_dpi.is_finite() && c.source_dpi > 0.0) {
            return Err(CaptureError::InvalidConfig(format!(
                "Source DPI must be positive, got {}",
                c.source_dpi
            )));
        }
        if !(c.pdf_resolution.is_finite() && c.pdf_resolution > 0.0) {
            return Err(CaptureError::InvalidConfig(format!(
                "PDF resolution must be positive, got {}",
                c.pdf_resolution
            )));
        }
        if c.extensions.is_empty() {
            return Err(CaptureError::InvalidConfig(
                "At least one image extension is required".into(),
            ));
        }
        if c.input_dir.as_os_str().is_empty() {
            return Err(CaptureError::InvalidConfig(
                "Input folder must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which document the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Word-processing document: landscape, zero margins, live page footer.
    Docx,
    /// Portable document: one page per capture, stamped `i / N` label.
    Pdf,
}

impl OutputFormat {
    /// Upper-case name used in console messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "DOCX",
            OutputFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Candidate label fonts, Arial first, then common open fallbacks.
fn default_font_paths() -> Vec<PathBuf> {
    [
        "arial.ttf",
        "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_capture_conventions() {
        let c = CaptureConfig::default();
        assert_eq!(c.input_dir, PathBuf::from("captures"));
        assert_eq!(c.docx_output, PathBuf::from("result.docx"));
        assert_eq!(c.pdf_output, PathBuf::from("result.pdf"));
        assert_eq!(c.name_prefix, "page_");
        assert_eq!(c.extensions.len(), 5);
        assert_eq!(c.source_dpi, 96.0);
        assert_eq!(c.pdf_resolution, 300.0);
        assert_eq!(c.jpeg_quality, 100);
        assert_eq!((c.label_padding_x, c.label_padding_y), (20, 10));
    }

    #[test]
    fn builder_lowercases_prefix_and_extensions() {
        let c = CaptureConfig::builder()
            .name_prefix("Shot_")
            .extensions([".PNG", ".Jpg"])
            .build()
            .unwrap();
        assert_eq!(c.name_prefix, "shot_");
        assert_eq!(c.extensions, vec![".png".to_string(), ".jpg".to_string()]);
    }

    #[test]
    fn builder_rejects_zero_dpi() {
        let err = CaptureConfig::builder().source_dpi(0.0).build().unwrap_err();
        assert!(err.to_string().contains("Source DPI"));
    }

    #[test]
    fn builder_rejects_empty_extensions() {
        let err = CaptureConfig::builder()
            .extensions(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, CaptureError::InvalidConfig(_)));
    }

    #[test]
    fn jpeg_quality_is_clamped() {
        let c = CaptureConfig::builder().jpeg_quality(0).build().unwrap();
        assert_eq!(c.jpeg_quality, 1);
    }

    #[test]
    fn output_path_follows_format() {
        let c = CaptureConfig::builder()
            .output(OutputFormat::Pdf, "x.pdf")
            .build()
            .unwrap();
        assert_eq!(c.output_path(OutputFormat::Pdf), Path::new("x.pdf"));
        assert_eq!(c.output_path(OutputFormat::Docx), Path::new("result.docx"));
    }

    #[test]
    fn output_format_serialises_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Docx).unwrap();
        assert_eq!(json, "\"docx\"");
    }
}
