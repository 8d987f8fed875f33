//! Downloadable artifacts: the original markdown and the paginated PDF.
//!
//! # Example
//!
//! ```no_run
//! use resumark::export::{today, PdfExporter};
//! use resumark::parse_markdown;
//!
//! let doc = parse_markdown("# Jane Doe\n## Skills\n- Rust");
//! if let Some(artifact) = PdfExporter::default().export(&doc, today())? {
//!     artifact.write_to_dir(".")?;
//! }
//! # Ok::<(), resumark::Error>(())
//! ```

pub mod metrics;
mod paginate;
mod pdf;
mod raster;

pub use paginate::{page_offsets, PageGeometry, PT_PER_MM};
pub use pdf::{PdfExporter, PdfOutput, PdfWriter};
pub use raster::{DrawOp, LayoutRasterizer, Mount, OffscreenStage, Raster, Rasterizer, DEFAULT_SCALE};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::error::Result;
use crate::render::fragment::DEFAULT_FRAGMENT_WIDTH;

/// Media type of markdown artifacts.
pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

/// Media type of PDF artifacts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A named file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name
    pub filename: String,
    /// MIME type
    pub media_type: &'static str,
    /// File content
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Markdown artifact holding `markdown` unchanged.
    pub fn markdown(markdown: &str, date: NaiveDate) -> Self {
        Self {
            filename: markdown_filename(date),
            media_type: MARKDOWN_MEDIA_TYPE,
            bytes: markdown.as_bytes().to_vec(),
        }
    }

    /// PDF artifact.
    pub fn pdf(bytes: Vec<u8>, date: NaiveDate) -> Self {
        Self {
            filename: pdf_filename(date),
            media_type: PDF_MEDIA_TYPE,
            bytes,
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the artifact has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact into `dir` under its file name, creating `dir` if
    /// needed. Returns the written path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// `optimized-resume-<YYYY-MM-DD>.md`
pub fn markdown_filename(date: NaiveDate) -> String {
    format!("optimized-resume-{}.md", date.format("%Y-%m-%d"))
}

/// `enhanced-resume-<YYYY-MM-DD>.pdf`
pub fn pdf_filename(date: NaiveDate) -> String {
    format!("enhanced-resume-{}.pdf", date.format("%Y-%m-%d"))
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Export the original markdown as a file artifact.
pub fn export_markdown(markdown: &str, date: NaiveDate) -> Artifact {
    Artifact::markdown(markdown, date)
}

/// Options for PDF export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Off-screen mount width in CSS pixels
    pub width_px: u32,
    /// Raster pixels per CSS pixel
    pub scale: f32,
    /// Page geometry
    pub geometry: PageGeometry,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_FRAGMENT_WIDTH,
            scale: DEFAULT_SCALE,
            geometry: PageGeometry::default(),
        }
    }
}

impl ExportOptions {
    /// Create default export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mount width.
    pub fn with_width(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    /// Set the pixel density.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(markdown_filename(date()), "optimized-resume-2024-03-09.md");
        assert_eq!(pdf_filename(date()), "enhanced-resume-2024-03-09.pdf");
    }

    #[test]
    fn test_export_markdown_passthrough() {
        let source = "# Jane\n\n\n## Skills\n*  odd spacing kept \n";
        let artifact = export_markdown(source, date());
        assert_eq!(artifact.bytes, source.as_bytes());
        assert_eq!(artifact.media_type, "text/markdown");
        assert_eq!(artifact.len(), source.len());
    }

    #[test]
    fn test_export_markdown_empty() {
        let artifact = export_markdown("", date());
        assert!(artifact.is_empty());
        assert_eq!(artifact.filename, "optimized-resume-2024-03-09.md");
    }

    #[test]
    fn test_write_to_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out");
        let path = export_markdown("# Jane", date()).write_to_dir(&dir).unwrap();

        assert_eq!(path, dir.join("optimized-resume-2024-03-09.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# Jane");
    }

    #[test]
    fn test_export_options_builder() {
        let options = ExportOptions::new().with_width(640).with_scale(1.0);
        assert_eq!(options.width_px, 640);
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.geometry, PageGeometry::A4_EXPORT);
        assert_eq!(ExportOptions::default().width_px, 800);
    }
}
