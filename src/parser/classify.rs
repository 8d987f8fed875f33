//! Line classification for the resume markdown dialect.

use regex::Regex;

use crate::model::{ClassifiedLine, LineKind};

use super::options::ParseOptions;

/// Classifies single trimmed, non-empty lines.
///
/// Rules are tried in order and the first match wins; later rules overlap
/// earlier ones (`## ` also starts with `#`, a contact line may carry a year).
#[derive(Debug, Clone)]
pub struct LineClassifier {
    job_details: Option<Regex>,
}

impl LineClassifier {
    /// Create a classifier with the default token set.
    pub fn new() -> Self {
        Self::with_options(&ParseOptions::default())
    }

    /// Create a classifier from parse options.
    pub fn with_options(options: &ParseOptions) -> Self {
        let alternatives: Vec<String> = options
            .job_detail_tokens
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| regex::escape(t))
            .collect();

        // Escaped literals always form a valid pattern.
        let job_details = if alternatives.is_empty() {
            None
        } else {
            Regex::new(&alternatives.join("|")).ok()
        };

        Self { job_details }
    }

    /// Classify one line. The caller trims and drops blank lines first.
    pub fn classify(&self, line: &str) -> ClassifiedLine {
        if let Some(rest) = line.strip_prefix("# ") {
            return ClassifiedLine::new(LineKind::Title, rest);
        }
        if let Some(rest) = line.strip_prefix("## ") {
            return ClassifiedLine::new(LineKind::SectionHeader, rest);
        }
        if let Some(rest) = line.strip_prefix("### ") {
            return ClassifiedLine::new(LineKind::SubsectionHeader, rest);
        }
        if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            return ClassifiedLine::new(LineKind::Bullet, rest);
        }

        if line.contains('|') {
            if line.contains('@') || line.contains('+') {
                return ClassifiedLine::new(LineKind::ContactLine, line);
            }
            if self.is_job_details(line) {
                return ClassifiedLine::new(LineKind::JobDetailsLine, line);
            }
        }

        ClassifiedLine::new(LineKind::Paragraph, line)
    }

    /// Split markdown into lines, trim, drop blanks and classify the rest.
    pub fn classify_all(&self, markdown: &str) -> Vec<ClassifiedLine> {
        markdown
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.classify(line))
            .collect()
    }

    fn is_job_details(&self, line: &str) -> bool {
        self.job_details
            .as_ref()
            .is_some_and(|re| re.is_match(line))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify one line with the default rules.
pub fn classify_line(line: &str) -> ClassifiedLine {
    LineClassifier::new().classify(line)
}

/// Classify every non-blank line of a markdown document with the default rules.
pub fn classify(markdown: &str) -> Vec<ClassifiedLine> {
    LineClassifier::new().classify_all(markdown)
}
