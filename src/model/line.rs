//! Line-level types.

use serde::{Deserialize, Serialize};

/// Semantic kind of a single resume markdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `# Name` - the candidate's name
    Title,
    /// `## Experience` - opens a section
    SectionHeader,
    /// `### Acme Inc | 2021 - Present` - opens an entry
    SubsectionHeader,
    /// `- Did X` or `* Did X`
    Bullet,
    /// Pipe-delimited contact details (`a@b.com | +1 555`)
    ContactLine,
    /// Pipe-delimited line carrying a year or "Present"
    JobDetailsLine,
    /// Anything else
    Paragraph,
}

impl LineKind {
    /// Markdown prefix that introduces this kind, if it has one.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            LineKind::Title => Some("# "),
            LineKind::SectionHeader => Some("## "),
            LineKind::SubsectionHeader => Some("### "),
            LineKind::Bullet => Some("- "),
            LineKind::ContactLine | LineKind::JobDetailsLine | LineKind::Paragraph => None,
        }
    }

    /// Whether this kind belongs to the document header rather than a section.
    pub fn is_header(&self) -> bool {
        matches!(self, LineKind::Title | LineKind::ContactLine)
    }
}

/// A classified line. `text` has the markdown marker stripped for
/// titles, headers and bullets, and is verbatim for every other kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Line kind
    pub kind: LineKind,

    /// Line text
    pub text: String,
}

impl ClassifiedLine {
    /// Create a classified line.
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Create a bullet line.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::new(LineKind::Bullet, text)
    }

    /// Create a paragraph line.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(LineKind::Paragraph, text)
    }

    /// Check if this is a bullet line.
    pub fn is_bullet(&self) -> bool {
        self.kind == LineKind::Bullet
    }

    /// Render the line back into the markdown dialect.
    pub fn to_markdown(&self) -> String {
        match self.kind.marker() {
            Some(marker) => format!("{}{}", marker, self.text),
            None => self.text.clone(),
        }
    }

    /// Split a contact line into trimmed, non-empty `|` tokens.
    pub fn contact_tokens(&self) -> Vec<&str> {
        split_pipe_tokens(&self.text)
    }
}

/// Split pipe-delimited text into trimmed, non-empty tokens.
pub fn split_pipe_tokens(text: &str) -> Vec<&str> {
    text.split('|')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_markdown_restores_marker() {
        assert_eq!(ClassifiedLine::bullet("Built things").to_markdown(), "- Built things");
        assert_eq!(
            ClassifiedLine::new(LineKind::SubsectionHeader, "Acme").to_markdown(),
            "### Acme"
        );
        assert_eq!(
            ClassifiedLine::new(LineKind::ContactLine, "a@b.com | +1").to_markdown(),
            "a@b.com | +1"
        );
    }

    #[test]
    fn test_contact_tokens() {
        let line = ClassifiedLine::new(LineKind::ContactLine, " jane@x.com |  +1555 || Berlin ");
        assert_eq!(line.contact_tokens(), vec!["jane@x.com", "+1555", "Berlin"]);
    }

    #[test]
    fn test_header_kinds() {
        assert!(LineKind::Title.is_header());
        assert!(LineKind::ContactLine.is_header());
        assert!(!LineKind::JobDetailsLine.is_header());
    }
}
