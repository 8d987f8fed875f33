//! Parsing options and configuration.

/// Tokens that mark a pipe-delimited line as job details.
pub const DEFAULT_JOB_DETAIL_TOKENS: [&str; 6] = ["2020", "2021", "2022", "2023", "2024", "Present"];

/// Options for parsing resume markdown.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Literal substrings that mark a `|` line as a job-details line
    pub job_detail_tokens: Vec<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the job-detail token set.
    pub fn with_job_detail_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_detail_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Add one job-detail token (e.g. a newer year).
    pub fn with_job_detail_token(mut self, token: impl Into<String>) -> Self {
        self.job_detail_tokens.push(token.into());
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            job_detail_tokens: DEFAULT_JOB_DETAIL_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}
