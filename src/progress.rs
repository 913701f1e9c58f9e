//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::CaptureConfigBuilder::progress_callback`] to receive
//! events as the pipeline walks the page sequence.
//!
//! # Example
//!
//! ```rust
//! use img2doc::{CaptureConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} placed", page_num, total_pages);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//!
//! let config = CaptureConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::config::OutputFormat;
use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page.
///
/// Pages are processed one at a time on the calling thread, in sequence
/// order. All methods have default no-op implementations so callers only
/// override what they care about. The `Send + Sync` bound lets a config
/// carrying a callback be shared across threads.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the page sequence is known, before any page is read.
    fn on_conversion_start(&self, format: OutputFormat, total_pages: usize) {
        let _ = (format, total_pages);
    }

    /// Called just before a capture file is opened.
    ///
    /// # Arguments
    /// * `page_num`: 1-indexed position in the sequence
    /// * `total_pages`: sequence length
    /// * `file_name`: capture file name
    fn on_page_start(&self, page_num: usize, total_pages: usize, file_name: &str) {
        let _ = (page_num, total_pages, file_name);
    }

    /// Called once a page has been added to the output document.
    fn on_page_complete(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once, right before the output file is written.
    fn on_serialize_start(&self, format: OutputFormat, output_path: &Path) {
        let _ = (format, output_path);
    }

    /// Called after the output file has been written.
    fn on_conversion_complete(&self, total_pages: usize) {
        let _ = total_pages;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::CaptureConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
