//! Result types returned by the conversion entry points.

use crate::config::OutputFormat;
use serde::Serialize;
use std::path::PathBuf;

/// One page of the produced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// 1-based page number.
    pub index: usize,
    /// Capture the page was made from.
    pub file_name: String,
    /// Pixel width of the capture.
    pub width: u32,
    /// Pixel height of the capture.
    pub height: u32,
}

/// A serialised document held in memory.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    pub pages: Vec<PageSummary>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Outcome of a successful [`crate::convert()`] run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub format: OutputFormat,
    pub output_path: PathBuf,
    pub page_count: usize,
    /// Wall-clock time of the whole run.
    pub duration_ms: u64,
    pub pages: Vec<PageSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serialises_to_json() {
        let summary = ConversionSummary {
            format: OutputFormat::Pdf,
            output_path: PathBuf::from("result.pdf"),
            page_count: 1,
            duration_ms: 12,
            pages: vec![PageSummary {
                index: 1,
                file_name: "Page_1.png".into(),
                width: 800,
                height: 600,
            }],
        };
        let v: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(v["format"], "pdf");
        assert_eq!(v["page_count"], 1);
        assert_eq!(v["pages"][0]["file_name"], "Page_1.png");
        assert_eq!(v["pages"][0]["width"], 800);
    }
}
