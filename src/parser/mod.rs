//! Resume markdown parsing module.

mod classify;
mod grouper;
mod options;

pub use classify::{classify, classify_line, LineClassifier};
pub use grouper::{group, SectionGrouper};
pub use options::{ParseOptions, DEFAULT_JOB_DETAIL_TOKENS};

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::ResumeDocument;

/// Resume markdown parser.
pub struct MarkdownParser {
    source: String,
    classifier: LineClassifier,
}

impl MarkdownParser {
    /// Create a parser over markdown text.
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(source: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: source.into(),
            classifier: LineClassifier::with_options(&options),
        }
    }

    /// Read a markdown file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Read a markdown file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::with_options(source, options))
    }

    /// Read markdown from a reader.
    pub fn from_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Self::with_options(source, options))
    }

    /// The markdown source as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Classify and group the source into a document.
    pub fn parse(&self) -> ResumeDocument {
        let lines = self.classifier.classify_all(&self.source);
        log::debug!("Classified {} non-blank line(s)", lines.len());
        group(lines)
    }
}
