//! Inline-styled fragment for PDF export.
//!
//! The fragment is the export-side view of a [`ResumeDocument`]: a small
//! node tree where every node carries its style from [`InlineStyle::for_role`].
//! The same table drives [`Fragment::to_html`] and the export rasterizer, so
//! the markup and the PDF cannot drift apart.

use crate::model::{ClassifiedLine, LineKind, ResumeDocument};

use super::html::escape_html;

/// Default fragment width in CSS pixels.
pub const DEFAULT_FRAGMENT_WIDTH: u32 = 800;

/// Padding around the fragment content in CSS pixels.
pub const FRAGMENT_PADDING: f32 = 40.0;

/// One node of the export fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Large centered heading
    Title(String),
    /// Centered row of pills, one per contact token
    ContactRow(Vec<String>),
    /// Bordered section wrapper
    Section {
        /// Display title
        title: String,
        /// Nodes inside the wrapper
        children: Vec<Node>,
    },
    /// Entry heading inside a section
    SubHeading(String),
    /// Glyph-prefixed paragraph
    Bullet(String),
    /// Plain paragraph
    Paragraph(String),
}

impl Node {
    fn from_line(line: &ClassifiedLine) -> Self {
        if line.is_bullet() {
            Node::Bullet(line.text.clone())
        } else {
            Node::Paragraph(line.text.clone())
        }
    }

    /// Style role of this node.
    pub fn role(&self) -> StyleRole {
        match self {
            Node::Title(_) => StyleRole::Title,
            Node::ContactRow(_) => StyleRole::ContactRow,
            Node::Section { .. } => StyleRole::SectionTitle,
            Node::SubHeading(_) => StyleRole::SubHeading,
            Node::Bullet(_) => StyleRole::Bullet,
            Node::Paragraph(_) => StyleRole::Paragraph,
        }
    }
}

/// Visual role of a node; key into the style table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    /// Candidate name
    Title,
    /// Row wrapping the contact pills
    ContactRow,
    /// A single contact pill
    Pill,
    /// Section heading with bottom border
    SectionTitle,
    /// Entry heading
    SubHeading,
    /// Bullet paragraph
    Bullet,
    /// Plain paragraph
    Paragraph,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Left aligned
    Left,
    /// Centered
    Center,
}

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// White
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// CSS hex notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Components scaled to `0.0..=1.0` for PDF color operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// Inline style of a node, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineStyle {
    /// Font size
    pub font_size: f32,
    /// Bold weight
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Alignment
    pub align: Align,
    /// Text color
    pub color: Rgb,
    /// Background color (pills)
    pub background: Option<Rgb>,
    /// Space above the node
    pub margin_top: f32,
    /// Space below the node
    pub margin_bottom: f32,
    /// Left indent
    pub indent: f32,
    /// Horizontal padding inside the box (pills)
    pub padding_x: f32,
    /// Vertical padding inside the box (pills, section title)
    pub padding_y: f32,
    /// Bottom border width and color
    pub border_bottom: Option<(f32, Rgb)>,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

const TEXT: Rgb = Rgb(0x1f, 0x29, 0x37);
const ACCENT: Rgb = Rgb(0x4f, 0x46, 0xe5);
const PILL_BG: Rgb = Rgb(0xee, 0xf2, 0xff);

impl InlineStyle {
    const BASE: InlineStyle = InlineStyle {
        font_size: 14.0,
        bold: false,
        italic: false,
        align: Align::Left,
        color: TEXT,
        background: None,
        margin_top: 0.0,
        margin_bottom: 4.0,
        indent: 0.0,
        padding_x: 0.0,
        padding_y: 0.0,
        border_bottom: None,
        line_height: 1.4,
    };

    /// Style for a role.
    pub fn for_role(role: StyleRole) -> InlineStyle {
        let base = Self::BASE;
        match role {
            StyleRole::Title => InlineStyle {
                font_size: 32.0,
                bold: true,
                align: Align::Center,
                margin_bottom: 12.0,
                line_height: 1.2,
                ..base
            },
            StyleRole::ContactRow => InlineStyle {
                align: Align::Center,
                margin_bottom: 20.0,
                ..base
            },
            StyleRole::Pill => InlineStyle {
                font_size: 12.0,
                background: Some(PILL_BG),
                padding_x: 12.0,
                padding_y: 4.0,
                margin_bottom: 6.0,
                indent: 6.0,
                ..base
            },
            StyleRole::SectionTitle => InlineStyle {
                font_size: 18.0,
                bold: true,
                color: ACCENT,
                margin_top: 16.0,
                margin_bottom: 10.0,
                padding_y: 4.0,
                border_bottom: Some((2.0, ACCENT)),
                line_height: 1.3,
                ..base
            },
            StyleRole::SubHeading => InlineStyle {
                font_size: 15.0,
                bold: true,
                margin_top: 8.0,
                margin_bottom: 4.0,
                ..base
            },
            StyleRole::Bullet => InlineStyle {
                indent: 16.0,
                margin_bottom: 3.0,
                ..base
            },
            StyleRole::Paragraph => base,
        }
    }

    /// CSS declarations for a `style` attribute.
    pub fn css(&self) -> String {
        let mut decls = vec![
            format!("font-size:{}px", self.font_size),
            format!("line-height:{}", self.line_height),
            format!("color:{}", self.color.to_hex()),
            format!("margin:{}px 0 {}px {}px", self.margin_top, self.margin_bottom, self.indent),
        ];
        if self.bold {
            decls.push("font-weight:bold".to_string());
        }
        if self.italic {
            decls.push("font-style:italic".to_string());
        }
        if self.align == Align::Center {
            decls.push("text-align:center".to_string());
        }
        if let Some(bg) = self.background {
            decls.push(format!("background:{}", bg.to_hex()));
            decls.push("border-radius:9999px".to_string());
            decls.push("display:inline-block".to_string());
        }
        if self.padding_x > 0.0 || self.padding_y > 0.0 {
            decls.push(format!("padding:{}px {}px", self.padding_y, self.padding_x));
        }
        if let Some((width, color)) = self.border_bottom {
            decls.push(format!("border-bottom:{}px solid {}", width, color.to_hex()));
        }
        decls.join(";")
    }
}

/// Export fragment built from a resume document.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Fixed width in CSS pixels
    pub width: u32,
    /// Top-level nodes
    pub nodes: Vec<Node>,
}

impl Fragment {
    /// Build a fragment from a document at the default width.
    pub fn from_document(doc: &ResumeDocument) -> Self {
        Self::with_width(doc, DEFAULT_FRAGMENT_WIDTH)
    }

    /// Build a fragment from a document at a given width.
    pub fn with_width(doc: &ResumeDocument, width: u32) -> Self {
        let mut nodes = Vec::new();

        // Every header line renders, in input order.
        for line in &doc.header {
            match line.kind {
                LineKind::Title => nodes.push(Node::Title(line.text.clone())),
                LineKind::ContactLine => {
                    let tokens: Vec<String> = line
                        .contact_tokens()
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    if tokens.is_empty() {
                        log::warn!("Contact line has no tokens, not rendered: {:?}", line.text);
                    } else {
                        nodes.push(Node::ContactRow(tokens));
                    }
                }
                kind => log::warn!("{:?} line in document header not rendered: {:?}", kind, line.text),
            }
        }

        for section in &doc.sections {
            let mut children: Vec<Node> = section.loose_content.iter().map(Node::from_line).collect();
            for entry in &section.entries {
                children.push(Node::SubHeading(entry.heading.clone()));
                children.extend(entry.content.iter().map(Node::from_line));
            }
            nodes.push(Node::Section {
                title: section.display_title(),
                children,
            });
        }

        Self { width, nodes }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Emit the inline-styled HTML markup.
    pub fn to_html(&self) -> String {
        let mut output = format!(
            "<div style=\"width:{}px;padding:{}px;background:{};font-family:Helvetica,Arial,sans-serif;box-sizing:border-box\">\n",
            self.width,
            FRAGMENT_PADDING,
            Rgb::WHITE.to_hex()
        );
        for node in &self.nodes {
            write_node(&mut output, node);
        }
        output.push_str("</div>\n");
        output
    }
}

fn write_node(output: &mut String, node: &Node) {
    let style = InlineStyle::for_role(node.role()).css();
    match node {
        Node::Title(text) => {
            output.push_str(&format!("<h1 style=\"{}\">{}</h1>\n", style, escape_html(text)));
        }
        Node::ContactRow(tokens) => {
            let pill = InlineStyle::for_role(StyleRole::Pill).css();
            output.push_str(&format!("<div style=\"{}\">", style));
            for token in tokens {
                output.push_str(&format!("<span style=\"{}\">{}</span>", pill, escape_html(token)));
            }
            output.push_str("</div>\n");
        }
        Node::Section { title, children } => {
            output.push_str("<div>\n");
            output.push_str(&format!("<h2 style=\"{}\">{}</h2>\n", style, escape_html(title)));
            for child in children {
                write_node(output, child);
            }
            output.push_str("</div>\n");
        }
        Node::SubHeading(text) => {
            output.push_str(&format!("<h3 style=\"{}\">{}</h3>\n", style, escape_html(text)));
        }
        Node::Bullet(text) => {
            output.push_str(&format!("<p style=\"{}\">• {}</p>\n", style, escape_html(text)));
        }
        Node::Paragraph(text) => {
            output.push_str(&format!("<p style=\"{}\">{}</p>\n", style, escape_html(text)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MarkdownParser;

    const JANE: &str = "# Jane Doe\njane@x.com | +1555\n## Experience\n### Acme Inc | 2021 - Present\n- Built things\n## Skills\n- Python\n- Go";

    #[test]
    fn test_fragment_structure() {
        let doc = MarkdownParser::new(JANE).parse();
        let fragment = Fragment::from_document(&doc);

        assert_eq!(fragment.width, DEFAULT_FRAGMENT_WIDTH);
        assert_eq!(fragment.nodes[0], Node::Title("Jane Doe".to_string()));
        assert_eq!(
            fragment.nodes[1],
            Node::ContactRow(vec!["jane@x.com".to_string(), "+1555".to_string()])
        );
        assert_eq!(
            fragment.nodes[2],
            Node::Section {
                title: "EXPERIENCE".to_string(),
                children: vec![
                    Node::SubHeading("Acme Inc | 2021 - Present".to_string()),
                    Node::Bullet("Built things".to_string()),
                ],
            }
        );
        assert_eq!(fragment.nodes.len(), 4);
    }

    #[test]
    fn test_fragment_html_is_inline_styled() {
        let doc = MarkdownParser::new(JANE).parse();
        let html = Fragment::from_document(&doc).to_html();

        assert!(html.starts_with("<div style=\"width:800px;"));
        assert!(html.contains("text-align:center"));
        assert!(html.contains("border-bottom:2px solid #4f46e5\">EXPERIENCE</h2>"));
        assert!(html.contains("• Built things</p>"));
        assert!(html.contains("border-radius:9999px"));
        assert!(!html.contains("class="));
    }

    #[test]
    fn test_every_header_line_becomes_a_node() {
        let doc = MarkdownParser::new(
            "# Jane Doe\njane@x.com | +1555\n# Second Title\n## References\nDr. Smith | smith@uni.edu\n- Available on request",
        )
        .parse();
        let fragment = Fragment::from_document(&doc);

        assert_eq!(
            &fragment.nodes[..4],
            &[
                Node::Title("Jane Doe".to_string()),
                Node::ContactRow(vec!["jane@x.com".to_string(), "+1555".to_string()]),
                Node::Title("Second Title".to_string()),
                Node::ContactRow(vec!["Dr. Smith".to_string(), "smith@uni.edu".to_string()]),
            ]
        );
        assert_eq!(
            fragment.nodes[4],
            Node::Section {
                title: "REFERENCES".to_string(),
                children: vec![Node::Bullet("Available on request".to_string())],
            }
        );
    }

    #[test]
    fn test_empty_document_fragment() {
        let fragment = Fragment::from_document(&ResumeDocument::new());
        assert!(fragment.is_empty());
    }

    #[test]
    fn test_rgb_conversions() {
        assert_eq!(Rgb(0x4f, 0x46, 0xe5).to_hex(), "#4f46e5");
        assert_eq!(Rgb::WHITE.to_unit(), [1.0, 1.0, 1.0]);
    }
}
