//! PDF export: fragment → mounted canvas → paginated PDF.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::ResumeDocument;
use crate::parser::MarkdownParser;
use crate::render::Fragment;

use super::metrics::Face;
use super::paginate::{page_offsets, PageGeometry, PT_PER_MM};
use super::raster::{DrawOp, LayoutRasterizer, OffscreenStage, Raster, Rasterizer};
use super::{Artifact, ExportOptions};

/// Name of the canvas XObject in page resources.
const CANVAS: &str = "Canvas";

/// A rendered PDF and what went into it.
#[derive(Debug, Clone)]
pub struct PdfOutput {
    /// PDF file bytes
    pub bytes: Vec<u8>,
    /// Number of pages
    pub page_count: usize,
    /// Canvas height after scaling to the page width, in millimetres
    pub image_height_mm: f32,
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// PDF exporter.
///
/// At most one export runs at a time; a call made while another is in
/// flight returns `Ok(None)` without doing anything.
pub struct PdfExporter {
    options: ExportOptions,
    rasterizer: Arc<dyn Rasterizer>,
    stage: OffscreenStage,
    busy: AtomicBool,
}

impl PdfExporter {
    /// Create an exporter with the layout rasterizer.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            rasterizer: Arc::new(LayoutRasterizer),
            stage: OffscreenStage::new(),
            busy: AtomicBool::new(false),
        }
    }

    /// Replace the rasterizer.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    /// Export options in use.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Whether an export is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Number of fragments currently mounted off-screen.
    pub fn mounted(&self) -> usize {
        self.stage.mounted()
    }

    /// Export a document as `enhanced-resume-<date>.pdf`.
    ///
    /// Returns `Ok(None)` when another export holds the busy flag.
    pub fn export(&self, doc: &ResumeDocument, date: NaiveDate) -> Result<Option<Artifact>> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            log::info!("PDF export already in progress; ignoring request");
            return Ok(None);
        };

        match self.render(doc) {
            Ok(output) => {
                log::info!(
                    "Exported PDF: {} page(s), {} bytes",
                    output.page_count,
                    output.bytes.len()
                );
                Ok(Some(Artifact::pdf(output.bytes, date)))
            }
            Err(err) => {
                log::error!("PDF export failed: {}", err);
                Err(match err {
                    Error::Export(_) => err,
                    other => Error::Export(other.to_string()),
                })
            }
        }
    }

    /// Parse markdown and export it.
    pub fn export_source(&self, markdown: &str, date: NaiveDate) -> Result<Option<Artifact>> {
        self.export(&MarkdownParser::new(markdown).parse(), date)
    }

    /// Render a document to PDF bytes without touching the busy flag.
    pub fn render(&self, doc: &ResumeDocument) -> Result<PdfOutput> {
        let fragment = Fragment::with_width(doc, self.options.width_px);

        let raster = {
            let mount = self.stage.mount(&fragment);
            self.rasterizer.rasterize(&mount, self.options.scale)?
        };
        raster.validate()?;

        let geometry = self.options.geometry;
        let image_height_mm = geometry.image_height_mm(&raster);
        let offsets = page_offsets(image_height_mm, geometry.height_mm);
        log::debug!(
            "Canvas {}x{} → {:.1}mm over {} page(s)",
            raster.width,
            raster.height,
            image_height_mm,
            offsets.len()
        );

        let writer = PdfWriter::new(geometry).with_title(doc.title().map(str::to_string));
        let bytes = writer.write(&raster, &offsets)?;

        Ok(PdfOutput {
            bytes,
            page_count: offsets.len(),
            image_height_mm,
        })
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

/// Writes a raster as one Form XObject placed on every page at an offset.
pub struct PdfWriter {
    geometry: PageGeometry,
    title: Option<String>,
}

impl PdfWriter {
    /// Create a writer for a page geometry.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            title: None,
        }
    }

    /// Set the document title metadata.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Assemble the PDF. `offsets` are image-top positions in millimetres.
    pub fn write(&self, raster: &Raster, offsets: &[f32]) -> Result<Vec<u8>> {
        raster.validate()?;

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for face in Face::all() {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }

        let canvas_content = canvas_content(raster).encode()?;
        let canvas = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => vec![0.into(), 0.into(), raster.width.into(), raster.height.into()],
                "Resources" => dictionary! { "Font" => fonts },
                "Filter" => "FlateDecode",
            },
            compress(&canvas_content)?,
        );
        let canvas_id = document.add_object(canvas);

        let resources_id = document.add_object(dictionary! {
            "XObject" => dictionary! { CANVAS => canvas_id },
        });

        let page_width = self.geometry.width_pt();
        let page_height = self.geometry.height_pt();
        let scale = page_width / raster.width;
        let image_height = raster.height * scale;

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(offsets.len());
        for offset_mm in offsets {
            let offset = offset_mm * PT_PER_MM;
            let bottom = page_height - image_height - offset;
            let content = Content {
                operations: vec![
                    Operation::new("q", vec![]),
                    Operation::new(
                        "cm",
                        vec![scale.into(), 0.into(), 0.into(), scale.into(), 0.into(), bottom.into()],
                    ),
                    Operation::new("Do", vec![CANVAS.into()]),
                    Operation::new("Q", vec![]),
                ],
            };
            let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal(format!("resumark {}", env!("CARGO_PKG_VERSION"))),
        };
        if let Some(ref title) = self.title {
            info.set("Title", Object::string_literal(encode_text_string(title)));
        }
        let info_id = document.add_object(info);
        document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Content stream drawing the raster in its own coordinate space (y up).
fn canvas_content(raster: &Raster) -> Content {
    let mut ops = Vec::with_capacity(raster.ops.len() * 5 + 3);
    let flip = |y: f32| raster.height - y;

    let [r, g, b] = raster.background.to_unit();
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new(
        "re",
        vec![0.into(), 0.into(), raster.width.into(), raster.height.into()],
    ));
    ops.push(Operation::new("f", vec![]));

    for op in &raster.ops {
        match op {
            DrawOp::Fill { x, y, w, h, color } => {
                let [r, g, b] = color.to_unit();
                ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), flip(y + h).into(), (*w).into(), (*h).into()],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Rule { x1, x2, y, width, color } => {
                let [r, g, b] = color.to_unit();
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), flip(*y).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), flip(*y).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text { x, y, size, face, color, text } => {
                let [r, g, b] = color.to_unit();
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![face.resource_name().into(), (*size).into()]));
                ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
                ops.push(Operation::new(
                    "Tm",
                    vec![1.into(), 0.into(), 0.into(), 1.into(), (*x).into(), flip(*y).into()],
                ));
                ops.push(Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    Content { operations: ops }
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Encode a document-level text string (Info entries) as UTF-16BE with BOM.
fn encode_text_string(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xfe, 0xff];
    for unit in text.nfc().collect::<String>().encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// Encode text for a WinAnsi base-14 font. Unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.nfc()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markdown: &str) -> ResumeDocument {
        MarkdownParser::new(markdown).parse()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Go • Rust"), b"Go \x95 Rust".to_vec());
        assert_eq!(encode_win_ansi("Zürich"), b"Z\xfcrich".to_vec());
        // Decomposed ü is composed first
        assert_eq!(encode_win_ansi("Zu\u{308}rich"), b"Z\xfcrich".to_vec());
        assert_eq!(encode_win_ansi("東京"), b"??".to_vec());
    }

    #[test]
    fn test_encode_text_string_is_utf16be() {
        assert_eq!(encode_text_string("A•"), vec![0xfe, 0xff, 0x00, 0x41, 0x20, 0x22]);
        assert_eq!(encode_text_string(""), vec![0xfe, 0xff]);
    }

    #[test]
    fn test_info_title_round_trips() {
        let raster = Raster {
            width: 1600.0,
            height: 100.0,
            background: crate::render::fragment::Rgb::WHITE,
            ops: Vec::new(),
        };
        let bytes = PdfWriter::new(PageGeometry::default())
            .with_title(Some("Jane – Lead • Zürich".to_string()))
            .write(&raster, &[0.0])
            .unwrap();

        let parsed = Document::load_mem(&bytes).unwrap();
        let info_id = parsed.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = parsed.get_dictionary(info_id).unwrap();
        let title = info.get(b"Title").unwrap().as_str().unwrap();
        assert_eq!(title, encode_text_string("Jane – Lead • Zürich").as_slice());
    }

    #[test]
    fn test_export_short_resume_single_page() {
        let exporter = PdfExporter::default();
        let artifact = exporter
            .export(&doc("# Jane Doe\njane@x.com | +1555\n## Skills\n- Go"), date())
            .unwrap()
            .unwrap();

        assert_eq!(artifact.filename, "enhanced-resume-2024-03-09.pdf");
        assert_eq!(artifact.media_type, "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF-"));
        assert!(!exporter.is_busy());
        assert_eq!(exporter.mounted(), 0);
    }

    #[test]
    fn test_long_resume_paginates() {
        let markdown = format!(
            "# Jane Doe\n## Experience\n{}",
            (0..40)
                .map(|i| format!("### Company {i} | 2021 - Present\n- Shipped feature {i}\n- Mentored engineers\n"))
                .collect::<String>()
        );
        let output = PdfExporter::default().render(&doc(&markdown)).unwrap();

        let expected = (output.image_height_mm / PageGeometry::A4_EXPORT.height_mm).ceil() as usize;
        assert!(output.page_count > 1);
        assert_eq!(output.page_count, expected);

        let parsed = Document::load_mem(&output.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), output.page_count);
    }

    #[test]
    fn test_busy_export_is_noop() {
        let exporter = PdfExporter::default();
        exporter.busy.store(true, Ordering::Release);

        let result = exporter.export(&doc("## Skills\n- Go"), date()).unwrap();
        assert!(result.is_none());
        // The flag belongs to the other export; it is left alone
        assert!(exporter.is_busy());
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(&self, _mount: &super::super::raster::Mount<'_>, _scale: f32) -> Result<Raster> {
            Err(Error::Other("canvas lost".to_string()))
        }
    }

    #[test]
    fn test_failure_releases_mount_and_flag() {
        let exporter = PdfExporter::default().with_rasterizer(Arc::new(FailingRasterizer));

        let err = exporter.export(&doc("## Skills\n- Go"), date()).unwrap_err();
        assert!(matches!(err, Error::Export(ref msg) if msg.contains("canvas lost")));
        assert!(!exporter.is_busy());
        assert_eq!(exporter.mounted(), 0);

        // The exporter is usable again afterwards
        let err = exporter.export(&doc("## Skills\n- Go"), date()).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }

    #[test]
    fn test_writer_page_per_offset() {
        let raster = Raster {
            width: 1600.0,
            height: 100.0,
            background: crate::render::fragment::Rgb::WHITE,
            ops: Vec::new(),
        };
        let bytes = PdfWriter::new(PageGeometry::default())
            .write(&raster, &[0.0, -295.0, -590.0])
            .unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 3);
    }
}
