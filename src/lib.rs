//! # resumark
//!
//! Resume markdown rendering and export.
//!
//! This library parses a small markdown dialect used for resumes into a
//! structured document, renders it as screen HTML and exports it as a
//! paginated PDF or as the original markdown file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resumark::{parse_file, render};
//!
//! fn main() -> resumark::Result<()> {
//!     // Parse a resume
//!     let doc = parse_file("resume.md")?;
//!
//!     // Render for screen
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One model, many outputs**: HTML, PDF, markdown, JSON
//! - **Line classification**: titles, sections, entries, bullets, contact and job-detail lines
//! - **Paginated PDF**: a single tall canvas sliced over A4-width pages
//! - **Learning paths**: typed progress updates for learning-path records

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{export_markdown, Artifact, ExportOptions, PageGeometry, PdfExporter};
pub use model::{
    ClassifiedLine, Entry, LearningModule, LearningPath, LearningResource, LineKind,
    ModuleUpdate, ResourceUpdate, ResumeDocument, Section, SectionLayout,
};
pub use parser::{MarkdownParser, ParseOptions};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

use chrono::NaiveDate;

/// Parse resume markdown into a document.
///
/// # Example
///
/// ```
/// let doc = resumark::parse_markdown("# Jane Doe\n## Skills\n- Rust");
/// assert_eq!(doc.title(), Some("Jane Doe"));
/// ```
pub fn parse_markdown(markdown: &str) -> ResumeDocument {
    MarkdownParser::new(markdown).parse()
}

/// Parse a resume markdown file.
///
/// # Example
///
/// ```no_run
/// use resumark::parse_file;
///
/// let doc = parse_file("resume.md").unwrap();
/// println!("Sections: {}", doc.sections.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ResumeDocument> {
    let parser = MarkdownParser::open(path)?;
    Ok(parser.parse())
}

/// Parse a resume markdown file with custom options.
///
/// # Example
///
/// ```no_run
/// use resumark::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_job_detail_token("2025");
/// let doc = parse_file_with_options("resume.md", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ResumeDocument> {
    let parser = MarkdownParser::open_with_options(path, options)?;
    Ok(parser.parse())
}

/// Render resume markdown to screen HTML.
///
/// # Example
///
/// ```
/// let html = resumark::to_html("# Jane Doe\n## Skills\n- Rust").unwrap();
/// assert!(html.contains("SKILLS"));
/// ```
pub fn to_html(markdown: &str) -> Result<String> {
    render::to_html(&parse_markdown(markdown), &RenderOptions::default())
}

/// Render resume markdown to PDF bytes.
///
/// # Example
///
/// ```no_run
/// let bytes = resumark::to_pdf("# Jane Doe\n## Skills\n- Rust").unwrap();
/// std::fs::write("resume.pdf", bytes).unwrap();
/// ```
pub fn to_pdf(markdown: &str) -> Result<Vec<u8>> {
    let output = PdfExporter::default().render(&parse_markdown(markdown))?;
    Ok(output.bytes)
}

/// Convert resume markdown to JSON.
pub fn to_json(markdown: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&parse_markdown(markdown), format)
}

/// Builder for parsing and exporting resumes.
///
/// # Example
///
/// ```no_run
/// use resumark::Resumark;
///
/// let html = Resumark::new()
///     .with_class_prefix("cv")
///     .standalone()
///     .parse_file("resume.md")?
///     .to_html()?;
/// # Ok::<(), resumark::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resumark {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl Resumark {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the job-detail tokens.
    pub fn with_job_detail_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_options = self.parse_options.with_job_detail_tokens(tokens);
        self
    }

    /// Set the HTML class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_class_prefix(prefix);
        self
    }

    /// Render HTML as a complete page.
    pub fn standalone(mut self) -> Self {
        self.render_options = self.render_options.with_standalone(true);
        self
    }

    /// Set PDF export options.
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export_options = options;
        self
    }

    /// Parse markdown and return a result wrapper.
    pub fn parse(self, markdown: &str) -> ResumarkResult {
        let parser = MarkdownParser::with_options(markdown, self.parse_options);
        ResumarkResult {
            document: parser.parse(),
            source: parser.source().to_string(),
            render_options: self.render_options,
            export_options: self.export_options,
        }
    }

    /// Parse a markdown file and return a result wrapper.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<ResumarkResult> {
        let parser = MarkdownParser::open_with_options(path, self.parse_options)?;
        Ok(ResumarkResult {
            document: parser.parse(),
            source: parser.source().to_string(),
            render_options: self.render_options,
            export_options: self.export_options,
        })
    }
}

/// A parsed resume with the options to render it.
#[derive(Debug, Clone)]
pub struct ResumarkResult {
    /// The parsed document
    pub document: ResumeDocument,
    source: String,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl ResumarkResult {
    /// Render screen HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Re-serialize to markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        let exporter = PdfExporter::new(self.export_options.clone());
        Ok(exporter.render(&self.document)?.bytes)
    }

    /// The original markdown as a downloadable artifact.
    pub fn markdown_artifact(&self, date: NaiveDate) -> Artifact {
        export_markdown(&self.source, date)
    }

    /// The PDF as a downloadable artifact.
    pub fn pdf_artifact(&self, date: NaiveDate) -> Result<Artifact> {
        Ok(Artifact::pdf(self.to_pdf()?, date))
    }

    /// The original markdown.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the document.
    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "# Jane Doe\njane@x.com | +1555\n## Experience\n### Acme | 2021 - Present\n- Built things";

    #[test]
    fn test_resumark_builder() {
        let builder = Resumark::new().with_class_prefix("cv").standalone();
        assert_eq!(builder.render_options.class_prefix, "cv");
        assert!(builder.render_options.standalone);
    }

    #[test]
    fn test_resumark_builder_default() {
        let builder = Resumark::default();
        assert_eq!(builder.render_options.class_prefix, "resume");
        assert_eq!(builder.parse_options.job_detail_tokens.len(), 6);
    }

    #[test]
    fn test_resumark_builder_job_detail_tokens() {
        let result = Resumark::new()
            .with_job_detail_tokens(["2019"])
            .parse("# Jane\n## Skills\nRust | 2019\nGo | 2021");

        let skills = result.document.section("Skills").unwrap();
        assert_eq!(skills.loose_content[0].kind, LineKind::JobDetailsLine);
        assert_eq!(skills.loose_content[1].kind, LineKind::Paragraph);
    }

    #[test]
    fn test_parse_markdown() {
        let doc = parse_markdown(RESUME);
        assert_eq!(doc.title(), Some("Jane Doe"));
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.entry_count(), 1);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/nonexistent/resume.md");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_to_html_convenience() {
        let html = to_html(RESUME).unwrap();
        assert!(html.contains("EXPERIENCE"));
        assert!(html.contains("jane@x.com"));
    }

    #[test]
    fn test_to_pdf_convenience() {
        let bytes = to_pdf(RESUME).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_result_artifacts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let result = Resumark::new().parse(RESUME);

        let markdown = result.markdown_artifact(date);
        assert_eq!(markdown.filename, "optimized-resume-2024-01-02.md");
        assert_eq!(markdown.bytes, RESUME.as_bytes());

        let pdf = result.pdf_artifact(date).unwrap();
        assert_eq!(pdf.filename, "enhanced-resume-2024-01-02.pdf");
        assert_eq!(pdf.media_type, "application/pdf");
    }

    #[test]
    fn test_result_json_and_markdown() {
        let result = Resumark::new().parse(RESUME);
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"Jane Doe\""));
        assert_eq!(parse_markdown(&result.to_markdown()), result.document);
    }
}
