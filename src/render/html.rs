//! Screen rendering: resume document to class-annotated HTML.

use crate::error::Result;
use crate::model::{ClassifiedLine, Entry, LineKind, ResumeDocument, Section, SectionLayout};

use super::RenderOptions;

/// Render a document to HTML markup.
pub fn to_html(doc: &ResumeDocument, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// HTML screen renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document.
    pub fn render(&self, doc: &ResumeDocument) -> Result<String> {
        let mut body = String::new();
        body.push_str(&format!("<article class=\"{}\">\n", self.class("document")));
        self.render_header(&mut body, doc);
        for section in &doc.sections {
            self.render_section(&mut body, section);
        }
        body.push_str("</article>\n");

        if !self.options.standalone {
            return Ok(body);
        }

        let title = doc.title().unwrap_or(&self.options.fallback_title);
        Ok(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape_html(title),
            self.stylesheet(),
            body
        ))
    }

    fn render_header(&self, output: &mut String, doc: &ResumeDocument) {
        if doc.header.is_empty() {
            return;
        }

        output.push_str(&format!("<header class=\"{}\">\n", self.class("header")));
        for line in &doc.header {
            match line.kind {
                LineKind::Title => output.push_str(&format!(
                    "<h1 class=\"{}\">{}</h1>\n",
                    self.class("title"),
                    escape_html(&line.text)
                )),
                LineKind::ContactLine => self.render_contact(output, line),
                kind => log::warn!("{:?} line in document header not rendered: {:?}", kind, line.text),
            }
        }
        output.push_str("</header>\n");
    }

    fn render_contact(&self, output: &mut String, line: &ClassifiedLine) {
        let tokens = line.contact_tokens();
        if tokens.is_empty() {
            log::warn!("Contact line has no tokens, not rendered: {:?}", line.text);
            return;
        }
        output.push_str(&format!("<div class=\"{}\">", self.class("contact")));
        for token in tokens {
            output.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                self.class("pill"),
                escape_html(token)
            ));
        }
        output.push_str("</div>\n");
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        let layout = section.layout();
        let modifier = match layout {
            SectionLayout::Chronological => "chronological",
            SectionLayout::Flat => "flat",
        };
        output.push_str(&format!(
            "<section class=\"{} {}--{}\">\n",
            self.class("section"),
            self.class("section"),
            modifier
        ));
        output.push_str(&format!(
            "<h2 class=\"{}\">{}</h2>\n",
            self.class("section-title"),
            escape_html(&section.display_title())
        ));

        for line in &section.loose_content {
            self.render_flat_line(output, line);
        }

        for entry in &section.entries {
            match layout {
                SectionLayout::Chronological => self.render_chronological_entry(output, entry),
                SectionLayout::Flat => self.render_flat_entry(output, entry),
            }
        }

        output.push_str("</section>\n");
    }

    fn render_chronological_entry(&self, output: &mut String, entry: &Entry) {
        output.push_str(&format!("<div class=\"{}\">\n", self.class("entry")));
        self.render_entry_heading(output, entry);
        output.push_str(&format!("<div class=\"{}\">\n", self.class("entry-body")));
        for line in &entry.content {
            if line.is_bullet() {
                self.render_bullet(output, line);
            } else {
                output.push_str(&format!(
                    "<p class=\"{}\"><em>{}</em></p>\n",
                    self.class("detail"),
                    escape_html(&line.text)
                ));
            }
        }
        output.push_str("</div>\n</div>\n");
    }

    fn render_flat_entry(&self, output: &mut String, entry: &Entry) {
        self.render_entry_heading(output, entry);
        for line in &entry.content {
            self.render_flat_line(output, line);
        }
    }

    fn render_entry_heading(&self, output: &mut String, entry: &Entry) {
        output.push_str(&format!(
            "<h3 class=\"{}\">{}</h3>\n",
            self.class("entry-heading"),
            escape_html(&entry.heading)
        ));
    }

    fn render_flat_line(&self, output: &mut String, line: &ClassifiedLine) {
        if line.is_bullet() {
            self.render_bullet(output, line);
        } else {
            output.push_str(&format!(
                "<p class=\"{}\">{}</p>\n",
                self.class("paragraph"),
                escape_html(&line.text)
            ));
        }
    }

    fn render_bullet(&self, output: &mut String, line: &ClassifiedLine) {
        output.push_str(&format!(
            "<p class=\"{}\"><span class=\"{}\">{}</span> {}</p>\n",
            self.class("bullet"),
            self.class("glyph"),
            self.options.bullet_glyph,
            escape_html(&line.text)
        ));
    }

    fn class(&self, component: &str) -> String {
        self.options.class(component)
    }

    fn stylesheet(&self) -> String {
        let rules = [
            ("document", "max-width: 800px; margin: 0 auto; font-family: Helvetica, Arial, sans-serif; color: #1f2937;"),
            ("title", "text-align: center; font-size: 2rem; font-weight: 700; margin: 0 0 0.5rem;"),
            ("contact", "display: flex; flex-wrap: wrap; justify-content: center; gap: 0.5rem;"),
            ("pill", "padding: 0.25rem 0.75rem; border-radius: 9999px; background: #eef2ff; font-size: 0.8rem;"),
            ("section-title", "font-size: 1.1rem; border-bottom: 2px solid #4f46e5; padding-bottom: 0.25rem; letter-spacing: 0.05em;"),
            ("entry-heading", "font-size: 1rem; margin: 0.75rem 0 0.25rem;"),
            ("entry-body", "padding-left: 1rem;"),
            ("detail", "font-size: 0.85rem; margin: 0.15rem 0;"),
            ("bullet", "margin: 0.15rem 0;"),
            ("glyph", "color: #4f46e5;"),
            ("paragraph", "margin: 0.25rem 0;"),
        ];
        rules
            .iter()
            .map(|(component, css)| format!(".{} {{ {} }}\n", self.class(component), css))
            .collect()
    }
}

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;

    fn render(markdown: &str) -> String {
        let doc = MarkdownParser::new(markdown).parse();
        to_html(&doc, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("R&D <team>"), "R&amp;D &lt;team&gt;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_header_title_and_pills() {
        let html = render("# Jane Doe\njane@x.com | +1555 | \n## Skills\n- Go");
        assert!(html.contains("<h1 class=\"resume-title\">Jane Doe</h1>"));
        assert!(html.contains("<span class=\"resume-pill\">jane@x.com</span><span class=\"resume-pill\">+1555</span></div>"));
    }

    #[test]
    fn test_all_header_lines_rendered_in_order() {
        let html = render("# Jane Doe\njane@x.com | +1555\n# Second Title\n## References\nDr. Smith | smith@uni.edu\n- Available on request");
        assert_eq!(html.matches("<h1 class=\"resume-title\">").count(), 2);
        assert_eq!(html.matches("<div class=\"resume-contact\">").count(), 2);
        assert!(html.contains("<span class=\"resume-pill\">smith@uni.edu</span>"));

        let second_title = html.find("Second Title").unwrap();
        let smith = html.find("Dr. Smith").unwrap();
        let references = html.find("REFERENCES").unwrap();
        assert!(second_title < smith && smith < references);
    }

    #[test]
    fn test_section_title_uppercased() {
        let html = render("## Work Experience\n### Acme\n- Built");
        assert!(html.contains(">WORK EXPERIENCE</h2>"));
        assert!(html.contains("resume-section--chronological"));
    }

    #[test]
    fn test_chronological_entry_rendering() {
        let html = render("## Experience\n### Acme | 2021 - Present\nAcme | 2021 - Present\n- Built things");
        assert!(html.contains("<h3 class=\"resume-entry-heading\">Acme | 2021 - Present</h3>"));
        assert!(html.contains("<div class=\"resume-entry-body\">"));
        assert!(html.contains("<p class=\"resume-detail\"><em>Acme | 2021 - Present</em></p>"));
        assert!(html.contains("<span class=\"resume-glyph\">•</span> Built things"));
    }

    #[test]
    fn test_flat_section_rendering() {
        let html = render("## Skills\n- Python\nFluent in German\n### Tools\n- Docker");
        assert!(html.contains("resume-section--flat"));
        assert!(html.contains("<p class=\"resume-paragraph\">Fluent in German</p>"));
        assert!(html.contains("<h3 class=\"resume-entry-heading\">Tools</h3>"));
        assert!(!html.contains("resume-entry-body"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_standalone_page() {
        let doc = MarkdownParser::new("# Jane <3\n## Skills\n- Go").parse();
        let options = RenderOptions::new().with_standalone(true);
        let html = to_html(&doc, &options).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Jane &lt;3</title>"));
        assert!(html.contains(".resume-pill {"));
    }

    #[test]
    fn test_no_header_when_missing() {
        let html = render("## Skills\n- Go");
        assert!(!html.contains("<header"));
    }
}
