//! JSON rendering for resume documents.

use crate::error::{Error, Result};
use crate::model::ResumeDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &ResumeDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Read a document back from JSON.
pub fn from_json(json: &str) -> Result<ResumeDocument> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;

    #[test]
    fn test_to_json_pretty() {
        let doc = MarkdownParser::new("# Jane\n## Skills\n- Go").parse();

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"loose_content\""));
        assert!(json.contains("\"kind\": \"bullet\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_round_trip() {
        let doc = MarkdownParser::new("## Experience\n### Acme\n- Built").parse();

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(from_json("{not json"), Err(Error::Json(_))));
    }
}
