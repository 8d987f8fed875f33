//! Markdown re-serialization of a grouped resume document.

use crate::model::{LineKind, ResumeDocument};

/// Flatten a document back into the resume markdown dialect.
///
/// Parsing the output yields a document equal to the input for every
/// document the parser can produce.
pub fn to_markdown(doc: &ResumeDocument) -> String {
    let mut output = String::new();
    for line in doc.to_lines() {
        if line.kind == LineKind::SectionHeader && !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line.to_markdown());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;

    #[test]
    fn test_round_trip() {
        let source = "# Jane Doe\njane@x.com | +1555\n## Experience\nLoose intro\n### Acme Inc | 2021 - Present\nAcme | 2021 - Present\n* Built things\n## Skills\n- Python\n- Go";
        let doc = MarkdownParser::new(source).parse();
        let markdown = to_markdown(&doc);
        let reparsed = MarkdownParser::new(&markdown).parse();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_bullet_marker_normalized() {
        let doc = MarkdownParser::new("## Skills\n* Go").parse();
        assert_eq!(to_markdown(&doc), "## Skills\n- Go\n");
    }

    #[test]
    fn test_sections_separated_by_blank_line() {
        let doc = MarkdownParser::new("# Jane\n## A\n- x\n## B\n- y").parse();
        assert_eq!(to_markdown(&doc), "# Jane\n\n## A\n- x\n\n## B\n- y\n");
    }
}
