//! Groups classified lines into sections and entries.

use crate::model::{ClassifiedLine, Entry, LineKind, ResumeDocument, Section};

/// Incremental section grouper.
///
/// Feed lines with [`SectionGrouper::push`] and call
/// [`SectionGrouper::finish`] to close whatever is still open.
#[derive(Debug, Default)]
pub struct SectionGrouper {
    document: ResumeDocument,
    section: Option<Section>,
    entry: Option<Entry>,
    dropped: usize,
}

impl SectionGrouper {
    /// Create a new grouper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one classified line.
    pub fn push(&mut self, line: ClassifiedLine) {
        match line.kind {
            LineKind::Title | LineKind::ContactLine => self.document.header.push(line),
            LineKind::SectionHeader => {
                self.close_section();
                self.section = Some(Section::new(line.text));
            }
            LineKind::SubsectionHeader => {
                if self.section.is_none() {
                    self.drop_line(&line);
                    return;
                }
                self.close_entry();
                self.entry = Some(Entry::new(line.text));
            }
            _ => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.content.push(line);
                } else if let Some(section) = self.section.as_mut() {
                    section.loose_content.push(line);
                } else {
                    self.drop_line(&line);
                }
            }
        }
    }

    /// Close any open entry and section and return the document.
    pub fn finish(mut self) -> ResumeDocument {
        self.close_section();
        if self.dropped > 0 {
            log::debug!("{} line(s) outside any section were dropped", self.dropped);
        }
        self.document
    }

    /// Number of lines dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn close_entry(&mut self) {
        if let Some(entry) = self.entry.take() {
            if let Some(section) = self.section.as_mut() {
                section.entries.push(entry);
            }
        }
    }

    fn close_section(&mut self) {
        self.close_entry();
        if let Some(section) = self.section.take() {
            self.document.sections.push(section);
        }
    }

    fn drop_line(&mut self, line: &ClassifiedLine) {
        log::warn!(
            "Dropping {:?} line before the first section header: {:?}",
            line.kind,
            line.text
        );
        self.dropped += 1;
    }
}

/// Group classified lines into a [`ResumeDocument`].
pub fn group<I>(lines: I) -> ResumeDocument
where
    I: IntoIterator<Item = ClassifiedLine>,
{
    let mut grouper = SectionGrouper::new();
    for line in lines {
        grouper.push(line);
    }
    grouper.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    #[test]
    fn test_group_empty() {
        let doc = group(Vec::new());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_entries_and_loose_content() {
        let doc = group(classify(
            "## Experience\nSummary of roles\n### Acme\n- a\n- b\n### Globex\nGlobex | 2020 - 2022\n- c",
        ));
        assert_eq!(doc.sections.len(), 1);

        let section = &doc.sections[0];
        assert_eq!(section.loose_content, vec![ClassifiedLine::paragraph("Summary of roles")]);
        assert_eq!(section.entries.len(), 2);
        assert_eq!(section.entries[0].heading, "Acme");
        assert_eq!(section.entries[0].content.len(), 2);
        assert_eq!(section.entries[1].content[0].kind, LineKind::JobDetailsLine);
    }

    #[test]
    fn test_section_header_closes_entry() {
        let doc = group(classify("## Education\n### MIT\n- BSc\n## Skills\n- Rust"));
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].entries.len(), 1);
        assert!(doc.sections[1].entries.is_empty());
        assert_eq!(doc.sections[1].loose_content, vec![ClassifiedLine::bullet("Rust")]);
    }

    #[test]
    fn test_leading_lines_dropped() {
        let mut grouper = SectionGrouper::new();
        for line in classify("# Jane\nStray intro\n- stray bullet\n### stray entry\n## Skills\n- Go") {
            grouper.push(line);
        }
        assert_eq!(grouper.dropped(), 3);

        let doc = grouper.finish();
        assert_eq!(doc.title(), Some("Jane"));
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].loose_content.len(), 1);
    }

    #[test]
    fn test_header_lines_partitioned_from_anywhere() {
        let doc = group(classify("## Skills\n- Go\n# Late Title\nme@x.com | +1"));
        assert_eq!(doc.title(), Some("Late Title"));
        assert!(doc.contact().is_some());
        assert_eq!(doc.sections[0].loose_content.len(), 1);
    }
}
