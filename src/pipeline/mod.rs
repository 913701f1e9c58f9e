//! Pipeline stages for capture-to-document conversion.
//!
//! Each submodule implements one step. Collect and sequence are shared by
//! both output formats; rendering is a strategy per format.
//!
//! ## Data Flow
//!
//! ```text
//! collect ──▶ sequence ──▶ source ──▶ render (docx | pdf) ──▶ bytes
//! (names)     (order)      (bytes+px)  (one page per image)
//! ```
//!
//! 1. [`collect`]: list the folder and keep `Page_X` image files
//! 2. [`sequence`]: stable numeric sort on the page index
//! 3. [`source`]: read one capture and probe its format and size
//! 4. [`render`]: the [`render::PageRenderer`] trait and its selection;
//!    [`docx`] and [`pdf`] implement it, [`label`] and [`bitmap_font`]
//!    draw the PDF page numbers

pub mod bitmap_font;
pub mod collect;
pub mod docx;
pub mod label;
pub mod pdf;
pub mod render;
pub mod sequence;
pub mod source;
