//! PDF renderer: one labelled JPEG frame per page.
//!
//! Frames keep the capture's pixel size. The page size is derived from it at
//! `pdf_resolution` pixels per inch, so nothing is resampled.

use crate::config::{CaptureConfig, OutputFormat};
use crate::error::CaptureError;
use crate::pipeline::label::{label_text, stamp_label, LabelFont, LabelStyle};
use crate::pipeline::render::{PagePosition, PageRenderer};
use crate::pipeline::source::SourceImage;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

const POINTS_PER_INCH: f32 = 72.0;

/// One encoded page.
#[derive(Debug, Clone)]
pub struct PdfFrame {
    pub width: u32,
    pub height: u32,
    /// Baseline JPEG, RGB.
    pub jpeg: Vec<u8>,
}

pub struct PdfRenderer {
    font: LabelFont,
    style: LabelStyle,
    jpeg_quality: u8,
    resolution: f32,
    frames: Vec<PdfFrame>,
}

impl PdfRenderer {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            font: LabelFont::load(&config.label_font_paths, config.label_font_size),
            style: LabelStyle::from_config(config),
            jpeg_quality: config.jpeg_quality,
            resolution: config.pdf_resolution,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[PdfFrame] {
        &self.frames
    }
}

impl PageRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render_page(&mut self, image: &SourceImage, position: PagePosition) -> Result<(), CaptureError> {
        let mut rgb = image.decode()?.to_rgb8();
        let text = label_text(position.index, position.total);
        let lb = stamp_label(&mut rgb, &text, &self.font, &self.style);
        debug!(
            "Page {}/{}: {} labelled at ({}, {})",
            position.index, position.total, image.file_name, lb.x0, lb.y0
        );

        let (width, height) = rgb.dimensions();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality)
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| CaptureError::EncodeImage {
                page: position.index,
                detail: e.to_string(),
            })?;

        self.frames.push(PdfFrame { width, height, jpeg });
        Ok(())
    }

    fn pages(&self) -> usize {
        self.frames.len()
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, CaptureError> {
        write_pdf(&self.frames, self.resolution)
    }
}

/// Page size in points of a `px`-pixel edge at `resolution` ppi.
pub fn points(px: u32, resolution: f32) -> f32 {
    px as f32 * POINTS_PER_INCH / resolution
}

/// Serialise `frames` as a PDF, one full-bleed page each.
pub fn write_pdf(frames: &[PdfFrame], resolution: f32) -> Result<Vec<u8>, CaptureError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::with_capacity(frames.len());
    for frame in frames {
        let (w_pt, h_pt) = (points(frame.width, resolution), points(frame.height, resolution));

        let image_id = doc.add_object(
            Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(frame.width),
                    "Height" => i64::from(frame.height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                frame.jpeg.clone(),
            )
            .with_compression(false),
        );

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![w_pt.into(), 0.into(), 0.into(), h_pt.into(), 0.into(), 0.into()],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(CaptureError::pdf)?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), w_pt.into(), h_pt.into()],
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let count = i64::try_from(page_ids.len()).map_err(CaptureError::pdf)?;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<Object>>(),
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("img2doc"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(CaptureError::pdf)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    fn renderer() -> PdfRenderer {
        let config = CaptureConfig::builder()
            .label_font_paths(Vec::<PathBuf>::new())
            .build()
            .unwrap();
        PdfRenderer::new(&config)
    }

    fn png_source(w: u32, h: u32) -> SourceImage {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([0, 128, 255])))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        SourceImage::from_bytes(Path::new("Page_1.png"), bytes).unwrap()
    }

    #[test]
    fn points_follow_resolution() {
        assert_eq!(points(300, 300.0), 72.0);
        assert_eq!(points(1500, 300.0), 360.0);
    }

    #[test]
    fn frame_keeps_pixel_size() {
        let mut r = renderer();
        r.render_page(&png_source(320, 200), PagePosition::new(1, 1)).unwrap();
        let frame = &r.frames()[0];
        assert_eq!((frame.width, frame.height), (320, 200));
        assert_eq!(image::guess_format(&frame.jpeg).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn frame_carries_white_label_box() {
        let mut r = renderer();
        r.render_page(&png_source(200, 100), PagePosition::new(1, 3)).unwrap();
        let decoded = image::load_from_memory(&r.frames()[0].jpeg).unwrap().to_rgb8();
        // box spans x 51..=149, y 56..=90; sample a padding pixel
        let p = decoded.get_pixel(55, 60);
        assert!(p.0.iter().all(|c| *c > 230), "expected white, got {p:?}");
        let outside = decoded.get_pixel(10, 10);
        assert!(outside.0[2] > 200 && outside.0[0] < 40, "got {outside:?}");
    }

    #[test]
    fn written_pdf_has_one_page_per_frame() {
        let mut r = Box::new(renderer());
        for i in 1..=2 {
            r.render_page(&png_source(600, 300), PagePosition::new(i, 2)).unwrap();
        }
        let bytes = (r as Box<dyn PageRenderer>).finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
