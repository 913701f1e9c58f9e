//! Page renderers: one strategy per output format.
//!
//! A renderer owns the output document while it is being built. The driver
//! feeds it one [`SourceImage`] at a time, in sequence order, then calls
//! [`PageRenderer::finish`] exactly once to get the serialised file bytes.

use crate::config::{CaptureConfig, OutputFormat};
use crate::error::CaptureError;
use crate::pipeline::docx::DocxRenderer;
use crate::pipeline::pdf::PdfRenderer;
use crate::pipeline::source::SourceImage;

/// Where a page sits in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    /// 1-based page number.
    pub index: usize,
    /// Total number of pages.
    pub total: usize,
}

impl PagePosition {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }
}

/// Builds one output document page by page.
pub trait PageRenderer {
    fn format(&self) -> OutputFormat;

    /// Append one page for `image`.
    fn render_page(&mut self, image: &SourceImage, position: PagePosition) -> Result<(), CaptureError>;

    /// Pages appended so far.
    fn pages(&self) -> usize;

    /// Serialise the finished document.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, CaptureError>;
}

/// Build the renderer for `format`.
pub fn renderer_for(format: OutputFormat, config: &CaptureConfig) -> Box<dyn PageRenderer> {
    match format {
        OutputFormat::Docx => Box::new(DocxRenderer::new(config)),
        OutputFormat::Pdf => Box::new(PdfRenderer::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_matches_format() {
        let config = CaptureConfig::builder()
            .label_font_paths(Vec::<std::path::PathBuf>::new())
            .build()
            .unwrap();
        for format in [OutputFormat::Docx, OutputFormat::Pdf] {
            let r = renderer_for(format, &config);
            assert_eq!(r.format(), format);
            assert_eq!(r.pages(), 0);
        }
    }
}
