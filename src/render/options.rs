//! Rendering options and configuration.

/// Options for rendering a resume to screen markup.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix for CSS class names (`resume` → `resume-title`, `resume-pill`, ...)
    pub class_prefix: String,

    /// Wrap the fragment in a complete HTML page with a default stylesheet
    pub standalone: bool,

    /// Glyph placed before bullet lines
    pub bullet_glyph: char,

    /// Page title used in standalone mode when the resume has no title line
    pub fallback_title: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Enable or disable standalone page output.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set the bullet glyph.
    pub fn with_bullet_glyph(mut self, glyph: char) -> Self {
        self.bullet_glyph = glyph;
        self
    }

    /// Class name for a component, e.g. `class("pill")` → `resume-pill`.
    pub fn class(&self, component: &str) -> String {
        if self.class_prefix.is_empty() {
            component.to_string()
        } else {
            format!("{}-{}", self.class_prefix, component)
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class_prefix: "resume".to_string(),
            standalone: false,
            bullet_glyph: '•',
            fallback_title: "Resume".to_string(),
        }
    }
}
