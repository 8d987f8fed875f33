//! Document-level types.

use super::{ClassifiedLine, LineKind};
use serde::{Deserialize, Serialize};

/// A grouped resume document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    /// Title and contact lines, in input order
    pub header: Vec<ClassifiedLine>,

    /// Sections in input order
    pub sections: Vec<Section>,
}

impl ResumeDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first title line, if any.
    pub fn title(&self) -> Option<&str> {
        self.header
            .iter()
            .find(|line| line.kind == LineKind::Title)
            .map(|line| line.text.as_str())
    }

    /// The first contact line, if any.
    pub fn contact(&self) -> Option<&ClassifiedLine> {
        self.header
            .iter()
            .find(|line| line.kind == LineKind::ContactLine)
    }

    /// Get a section by case-insensitive title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.title.eq_ignore_ascii_case(title))
    }

    /// Check if the document has neither header nor sections.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.sections.is_empty()
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Total number of bullet lines across all sections.
    pub fn bullet_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.lines())
            .filter(|line| line.is_bullet())
            .count()
    }

    /// Flatten the document back into classified lines.
    ///
    /// Header lines come first; entries follow their section's loose content.
    pub fn to_lines(&self) -> Vec<ClassifiedLine> {
        let mut lines = self.header.clone();
        for section in &self.sections {
            lines.push(ClassifiedLine::new(
                LineKind::SectionHeader,
                section.title.clone(),
            ));
            lines.extend(section.loose_content.iter().cloned());
            for entry in &section.entries {
                lines.push(ClassifiedLine::new(
                    LineKind::SubsectionHeader,
                    entry.heading.clone(),
                ));
                lines.extend(entry.content.iter().cloned());
            }
        }
        lines
    }
}

/// How a section is laid out. Derived from the title on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLayout {
    /// Experience/education: entry headers with indented content
    Chronological,
    /// Everything else: bullets and paragraphs directly
    Flat,
}

impl SectionLayout {
    /// Classify a section title.
    pub fn for_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("experience") || lower.contains("education") {
            SectionLayout::Chronological
        } else {
            SectionLayout::Flat
        }
    }
}

/// A top-level resume section opened by a `##` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title as written
    pub title: String,

    /// Entries opened by `###` headers
    pub entries: Vec<Entry>,

    /// Lines not enclosed in any entry
    pub loose_content: Vec<ClassifiedLine>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            loose_content: Vec::new(),
        }
    }

    /// Layout for this section, re-derived from the title.
    pub fn layout(&self) -> SectionLayout {
        SectionLayout::for_title(&self.title)
    }

    /// Whether this is an experience/education-like section.
    pub fn is_chronological(&self) -> bool {
        self.layout() == SectionLayout::Chronological
    }

    /// Title as displayed.
    pub fn display_title(&self) -> String {
        self.title.to_uppercase()
    }

    /// All content lines (loose first, then entries), excluding headings.
    pub fn lines(&self) -> impl Iterator<Item = &ClassifiedLine> {
        self.loose_content
            .iter()
            .chain(self.entries.iter().flat_map(|e| e.content.iter()))
    }
}

/// A sub-unit of a section (one job, one degree) opened by a `###` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry heading
    pub heading: String,

    /// Lines under the heading
    pub content: Vec<ClassifiedLine>,
}

impl Entry {
    /// Create an empty entry.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: Vec::new(),
        }
    }
}
