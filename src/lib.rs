//! # img2doc
//!
//! Assemble a folder of numbered screen captures (`Page_1.png`,
//! `Page_2.jpg`, …) into one paginated document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! captures/
//!  │
//!  ├─ 1. Collect   keep files named page_*.{png,jpg,jpeg,bmp,webp}
//!  ├─ 2. Sequence  order by the integer after "Page_", unnumbered last
//!  ├─ 3. Render    DOCX: full-width picture per page, PAGE / NUMPAGES footer
//!  │               PDF:  labelled JPEG frame per page
//!  └─ 4. Write     one atomic file write
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use img2doc::{convert, CaptureConfig, OutputFormat};
//!
//! fn main() -> Result<(), img2doc::CaptureError> {
//!     let config = CaptureConfig::default();
//!     let summary = convert(OutputFormat::Pdf, &config)?;
//!     println!("{} pages in {}", summary.page_count, summary.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `img2doc` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! img2doc = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CaptureConfig, CaptureConfigBuilder, OutputFormat};
pub use convert::{convert, inspect, render_sequence, render_to_bytes, write_atomic};
pub use error::CaptureError;
pub use output::{ConversionSummary, PageSummary, RenderedDocument};
pub use pipeline::sequence::{PageEntry, PageIndex, PageSequence};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
