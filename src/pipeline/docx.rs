//! DOCX renderer: full-width pictures on a landscape page with a live
//! `PAGE / NUMPAGES` footer.
//!
//! Every capture is assumed to be `source_dpi` pixels per inch. Its placed
//! width is the usable page width and its height follows the aspect ratio.
//! The height is never clamped, so a very tall capture runs past the bottom
//! of its page.
//!
//! The document itself is assembled with `docx-rs`. Paragraphs are collected
//! page by page and the [`Docx`] is built and packed once in
//! [`PageRenderer::finish`].

use crate::config::{CaptureConfig, OutputFormat};
use crate::error::CaptureError;
use crate::pipeline::render::{PagePosition, PageRenderer};
use crate::pipeline::source::SourceImage;
use docx_rs::{
    AlignmentType, BreakType, Docx, FieldCharType, Footer, InstrNUMPAGES, InstrPAGE, InstrText,
    PageMargin, PageOrientationType, Paragraph, Pic, Run,
};
use image::ImageFormat;
use std::io::Cursor;
use tracing::debug;

pub const EMU_PER_INCH: u32 = 914_400;
const EMU_PER_TWIP: u32 = 635;

/// US Letter, landscape, in twips.
pub const PAGE_WIDTH_TWIPS: u32 = 15_840;
pub const PAGE_HEIGHT_TWIPS: u32 = 12_240;
/// Header and footer distance from the page edge, in twips.
const HEADER_FOOTER_TWIPS: i32 = 720;

pub struct DocxRenderer {
    body: Vec<Paragraph>,
    pictures: usize,
    source_dpi: f64,
}

impl DocxRenderer {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            body: Vec::new(),
            pictures: 0,
            source_dpi: config.source_dpi,
        }
    }

    /// Width available to a picture: the full page, since margins are zero.
    pub fn usable_width_emu() -> u32 {
        PAGE_WIDTH_TWIPS * EMU_PER_TWIP
    }

    /// Landscape document with zero margins, the page-number footer and every
    /// paragraph appended so far.
    fn document(body: Vec<Paragraph>) -> Docx {
        let margins = PageMargin::new()
            .top(0)
            .right(0)
            .bottom(0)
            .left(0)
            .header(HEADER_FOOTER_TWIPS)
            .footer(HEADER_FOOTER_TWIPS)
            .gutter(0);

        body.into_iter().fold(
            Docx::new()
                .page_size(PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS)
                .page_orient(PageOrientationType::Landscape)
                .page_margin(margins)
                .footer(Footer::new().add_paragraph(page_number_paragraph())),
            |docx, paragraph| docx.add_paragraph(paragraph),
        )
    }
}

impl PageRenderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render_page(&mut self, image: &SourceImage, position: PagePosition) -> Result<(), CaptureError> {
        let (width_emu, height_emu) = placed_size(
            image.width,
            image.height,
            self.source_dpi,
            Self::usable_width_emu(),
        );
        let png = embeddable(image, position.index)?;

        debug!(
            "Page {}/{}: {} placed at {}x{} EMU",
            position.index, position.total, image.file_name, width_emu, height_emu
        );

        let picture = Pic::new_with_dimensions(png, image.width, image.height)
            .size(width_emu, height_emu);
        self.body
            .push(Paragraph::new().add_run(Run::new().add_image(picture)));
        self.body
            .push(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)));
        self.pictures += 1;
        Ok(())
    }

    fn pages(&self) -> usize {
        self.pictures
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, CaptureError> {
        let mut out = Cursor::new(Vec::new());
        Self::document(self.body)
            .build()
            .pack(&mut out)
            .map_err(CaptureError::docx)?;
        Ok(out.into_inner())
    }
}

/// Size in EMU of a `px_w × px_h` capture placed across `usable_width_emu`.
///
/// The natural size is `px / source_dpi` inches; only its aspect ratio is
/// kept. The returned height is truncated to whole EMU and saturates at
/// `u32::MAX`.
pub fn placed_size(px_w: u32, px_h: u32, source_dpi: f64, usable_width_emu: u32) -> (u32, u32) {
    let width_in = px_w as f64 / source_dpi;
    let height_in = px_h as f64 / source_dpi;
    let aspect = width_in / height_in;

    let placed_width_in = usable_width_emu as f64 / EMU_PER_INCH as f64;
    let height_emu = (placed_width_in / aspect * EMU_PER_INCH as f64) as u32;
    (usable_width_emu, height_emu)
}

/// Centered `PAGE / NUMPAGES` footer paragraph built from live fields.
pub fn page_number_paragraph() -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(field_run(InstrText::PAGE(InstrPAGE::new())))
        .add_run(Run::new().add_text(" / "))
        .add_run(field_run(InstrText::NUMPAGES(InstrNUMPAGES::new())))
}

/// `begin` / instruction / `separate` / placeholder / `end`.
fn field_run(instruction: InstrText) -> Run {
    Run::new()
        .add_field_char(FieldCharType::Begin, false)
        .add_instr_text(instruction)
        .add_field_char(FieldCharType::Separate, false)
        .add_text("1")
        .add_field_char(FieldCharType::End, false)
}

/// PNG bytes to embed for `image`.
///
/// The package names every media part `*.png`, so anything that is not
/// already PNG is transcoded.
fn embeddable(image: &SourceImage, page: usize) -> Result<Vec<u8>, CaptureError> {
    if image.format == ImageFormat::Png {
        return Ok(image.bytes().to_vec());
    }

    debug!("Transcoding {} ({:?}) to PNG", image.file_name, image.format);
    let decoded = image.decode()?;
    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CaptureError::EncodeImage {
            page,
            detail: e.to_string(),
        })?;
    Ok(png)
}
