//! Conversion entry points.
//!
//! [`inspect`] runs the shared front half (collect and sequence) only.
//! [`render_to_bytes`] additionally renders every page into an in-memory
//! document, and [`convert`] writes that document to the configured output
//! path. Nothing is written unless every page rendered.

use crate::config::{CaptureConfig, OutputFormat};
use crate::error::CaptureError;
use crate::output::{ConversionSummary, PageSummary, RenderedDocument};
use crate::pipeline::collect::collect_images;
use crate::pipeline::render::{renderer_for, PagePosition};
use crate::pipeline::sequence::PageSequence;
use crate::pipeline::source::SourceImage;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Collect and order the captures of `config.input_dir`.
///
/// # Errors
/// [`CaptureError::FolderNotFound`], [`CaptureError::NoImages`] or
/// [`CaptureError::ReadFolder`].
pub fn inspect(config: &CaptureConfig) -> Result<PageSequence, CaptureError> {
    let names = collect_images(&config.input_dir, config)?;
    let sequence = PageSequence::new(&config.input_dir, names);
    debug!("Page order: {:?}", sequence.file_names());
    Ok(sequence)
}

/// Render every capture of `config.input_dir` into a `format` document,
/// without touching the file system beyond reading the captures.
pub fn render_to_bytes(
    format: OutputFormat,
    config: &CaptureConfig,
) -> Result<RenderedDocument, CaptureError> {
    let sequence = inspect(config)?;
    render_sequence(format, &sequence, config)
}

/// Render an already sequenced folder.
pub fn render_sequence(
    format: OutputFormat,
    sequence: &PageSequence,
    config: &CaptureConfig,
) -> Result<RenderedDocument, CaptureError> {
    let total = sequence.len();
    info!("Rendering {} page(s) as {}", total, format);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(format, total);
    }

    let mut renderer = renderer_for(format, config);
    let mut pages = Vec::with_capacity(total);

    for (i, (entry, path)) in sequence.entries().iter().zip(sequence.paths()).enumerate() {
        let position = PagePosition::new(i + 1, total);
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(position.index, total, &entry.file_name);
        }

        // Loaded and dropped within the iteration.
        let image = SourceImage::load(&path)?;
        renderer.render_page(&image, position)?;
        pages.push(PageSummary {
            index: position.index,
            file_name: entry.file_name.clone(),
            width: image.width,
            height: image.height,
        });

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(position.index, total);
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_serialize_start(format, config.output_path(format));
    }
    let bytes = renderer.finish()?;
    debug!("Serialised {} bytes", bytes.len());

    Ok(RenderedDocument {
        format,
        bytes,
        pages,
    })
}

/// Convert the capture folder into a `format` document at
/// `config.output_path(format)`.
///
/// The file is written atomically: a failure at any point leaves no output
/// and any previous file at that path untouched.
///
/// # Errors
/// See [`CaptureError`]. [`CaptureError::exit_code`] tells expected input
/// conditions apart from unexpected failures.
pub fn convert(format: OutputFormat, config: &CaptureConfig) -> Result<ConversionSummary, CaptureError> {
    let start = Instant::now();
    let output_path = config.output_path(format);
    info!("Starting {} conversion of {}", format, config.input_dir.display());

    let rendered = render_to_bytes(format, config)?;
    write_atomic(output_path, &rendered.bytes)?;

    let page_count = rendered.page_count();
    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "{} written to {} ({} pages, {}ms)",
        format,
        output_path.display(),
        page_count,
        duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(page_count);
    }

    Ok(ConversionSummary {
        format,
        output_path: output_path.to_path_buf(),
        page_count,
        duration_ms,
        pages: rendered.pages,
    })
}

/// Write `bytes` to a temp file beside `path`, then rename it into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CaptureError> {
    let write_err = |source| CaptureError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.bin");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn missing_folder_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("result.pdf");
        let config = CaptureConfig::builder()
            .input_dir(dir.path().join("captures"))
            .pdf_output(&out)
            .build()
            .unwrap();
        let err = convert(OutputFormat::Pdf, &config).unwrap_err();
        assert!(matches!(err, CaptureError::FolderNotFound { .. }));
        assert!(!out.exists());
    }
}
