//! Error types for the img2doc library.
//!
//! Every failure is fatal to the run: the pipeline either writes one complete
//! output file or none at all. Two failures are *expected* input conditions
//! and carry their own exit status:
//!
//! * [`CaptureError::FolderNotFound`]: the capture folder does not exist.
//! * [`CaptureError::NoImages`]: the folder holds no `Page_X` image.
//!
//! Everything else (corrupt image, full disk, permission denied) is an
//! unexpected failure and maps to a different exit status so scripts can tell
//! "nothing to do" apart from "something broke".
//!
//! Two conditions are *not* errors at all: a file name without a parseable
//! page index sorts last, and a missing label font falls back to the embedded
//! bitmap font.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the img2doc library.
#[derive(Debug, Error)]
pub enum CaptureError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The capture folder does not exist.
    #[error("Folder not found: '{path}'\nCreate it and drop your Page_X captures inside.")]
    FolderNotFound { path: PathBuf },

    /// The folder exists but contains no matching image.
    #[error(
        "No 'Page_X' images found in '{path}'.\n\
Files must be named 'Page_X' where 'X' is an INTEGER (png, jpg, jpeg, bmp or webp)."
    )]
    NoImages { path: PathBuf },

    /// Listing the capture folder failed for a reason other than absence.
    #[error("Failed to read folder '{path}': {source}")]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A capture file could not be read from disk.
    #[error("Failed to read image '{path}': {source}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A capture file was read but is not a decodable image.
    #[error("Failed to decode image '{path}': {source}")]
    DecodeImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// Re-encoding a page (JPEG frame or PNG transcode) failed.
    #[error("Failed to encode page {page}: {detail}")]
    EncodeImage { page: usize, detail: String },

    // ── Serialisation errors ──────────────────────────────────────────────
    /// Packing the DOCX document into its ZIP container failed.
    #[error("Failed to build DOCX package: {0}")]
    DocxPackage(String),

    /// Building or writing the PDF document failed.
    #[error("Failed to build PDF document: {0}")]
    PdfWrite(String),

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CaptureError {
    /// Process exit status for this error.
    ///
    /// `1` for the two expected input conditions, `2` for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CaptureError::FolderNotFound { .. } | CaptureError::NoImages { .. } => 1,
            _ => 2,
        }
    }

    /// Wrap a DOCX packaging failure from `docx-rs`.
    pub(crate) fn docx(err: impl std::fmt::Display) -> Self {
        CaptureError::DocxPackage(err.to_string())
    }

    /// Wrap a PDF serialisation failure from `lopdf`.
    pub(crate) fn pdf(err: impl std::fmt::Display) -> Self {
        CaptureError::PdfWrite(err.to_string())
    }
}
