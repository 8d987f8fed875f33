//! Off-screen mounting and rasterization of export fragments.
//!
//! A fragment is mounted on an [`OffscreenStage`] for exactly as long as the
//! returned [`Mount`] guard lives. Rasterizers only ever see a mounted
//! fragment, and the guard releases the mount on every exit path.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::render::fragment::{Align, InlineStyle, Node, Rgb, StyleRole, FRAGMENT_PADDING};
use crate::render::Fragment;

use super::metrics::{measure, wrap, Face};

/// Default pixel density multiplier.
pub const DEFAULT_SCALE: f32 = 2.0;

/// Holds fragments while they are being rasterized.
#[derive(Debug, Default)]
pub struct OffscreenStage {
    mounted: AtomicUsize,
}

impl OffscreenStage {
    /// Create an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a fragment. It stays mounted until the guard is dropped.
    pub fn mount<'a>(&'a self, fragment: &'a Fragment) -> Mount<'a> {
        self.mounted.fetch_add(1, Ordering::AcqRel);
        log::debug!("Mounted fragment off-screen at {}px", fragment.width);
        Mount {
            stage: self,
            fragment,
        }
    }

    /// Number of fragments currently mounted.
    pub fn mounted(&self) -> usize {
        self.mounted.load(Ordering::Acquire)
    }
}

/// A fragment mounted on a stage.
#[derive(Debug)]
pub struct Mount<'a> {
    stage: &'a OffscreenStage,
    fragment: &'a Fragment,
}

impl<'a> Mount<'a> {
    /// The mounted fragment.
    pub fn fragment(&self) -> &Fragment {
        self.fragment
    }

    /// Mounted width in CSS pixels.
    pub fn width(&self) -> u32 {
        self.fragment.width
    }
}

impl Drop for Mount<'_> {
    fn drop(&mut self) {
        self.stage.mounted.fetch_sub(1, Ordering::AcqRel);
        log::debug!("Unmounted fragment");
    }
}

/// One drawing operation in raster pixels, y growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single line of text; `y` is the baseline.
    Text {
        /// Left edge
        x: f32,
        /// Baseline
        y: f32,
        /// Font size
        size: f32,
        /// Font face
        face: Face,
        /// Fill color
        color: Rgb,
        /// Text
        text: String,
    },
    /// Horizontal rule.
    Rule {
        /// Start x
        x1: f32,
        /// End x
        x2: f32,
        /// Vertical position
        y: f32,
        /// Stroke width
        width: f32,
        /// Stroke color
        color: Rgb,
    },
    /// Filled rectangle (pill background).
    Fill {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
        /// Fill color
        color: Rgb,
    },
}

impl DrawOp {
    fn scaled(self, s: f32) -> Self {
        match self {
            DrawOp::Text { x, y, size, face, color, text } => DrawOp::Text {
                x: x * s,
                y: y * s,
                size: size * s,
                face,
                color,
                text,
            },
            DrawOp::Rule { x1, x2, y, width, color } => DrawOp::Rule {
                x1: x1 * s,
                x2: x2 * s,
                y: y * s,
                width: width * s,
                color,
            },
            DrawOp::Fill { x, y, w, h, color } => DrawOp::Fill {
                x: x * s,
                y: y * s,
                w: w * s,
                h: h * s,
                color,
            },
        }
    }
}

/// Rasterized fragment: a fixed-size canvas and its drawing operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Width in raster pixels
    pub width: f32,
    /// Height in raster pixels
    pub height: f32,
    /// Solid background
    pub background: Rgb,
    /// Operations in paint order
    pub ops: Vec<DrawOp>,
}

impl Raster {
    /// Check the canvas can be placed on a page.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::Export(format!("invalid raster width {}", self.width)));
        }
        if !(self.height.is_finite() && self.height >= 0.0) {
            return Err(Error::Export(format!("invalid raster height {}", self.height)));
        }
        Ok(())
    }
}

/// Turns a mounted fragment into a raster.
pub trait Rasterizer: Send + Sync {
    /// Rasterize at `scale` raster pixels per CSS pixel.
    fn rasterize(&self, mount: &Mount<'_>, scale: f32) -> Result<Raster>;
}

/// Default rasterizer: lays the fragment out with Helvetica metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutRasterizer;

impl Rasterizer for LayoutRasterizer {
    fn rasterize(&self, mount: &Mount<'_>, scale: f32) -> Result<Raster> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::Export(format!("invalid raster scale {}", scale)));
        }
        let width = mount.width() as f32;
        if width <= FRAGMENT_PADDING * 2.0 {
            return Err(Error::Export(format!(
                "fragment width {}px leaves no room for content",
                mount.width()
            )));
        }

        let mut layout = Layout::new(width);
        for node in &mount.fragment().nodes {
            layout.node(node);
        }
        let height = layout.y + FRAGMENT_PADDING;

        Ok(Raster {
            width: width * scale,
            height: height * scale,
            background: Rgb::WHITE,
            ops: layout.ops.into_iter().map(|op| op.scaled(scale)).collect(),
        })
    }
}

/// Layout cursor in CSS pixels.
struct Layout {
    width: f32,
    y: f32,
    ops: Vec<DrawOp>,
}

impl Layout {
    fn new(width: f32) -> Self {
        Self {
            width,
            y: FRAGMENT_PADDING,
            ops: Vec::new(),
        }
    }

    fn content_left(&self) -> f32 {
        FRAGMENT_PADDING
    }

    fn content_width(&self) -> f32 {
        self.width - FRAGMENT_PADDING * 2.0
    }

    fn node(&mut self, node: &Node) {
        let style = InlineStyle::for_role(node.role());
        match node {
            Node::Title(text) | Node::SubHeading(text) | Node::Paragraph(text) => {
                self.y += style.margin_top;
                self.text_block(text, &style, None);
                self.y += style.margin_bottom;
            }
            Node::Bullet(text) => {
                self.y += style.margin_top;
                self.text_block(text, &style, Some('•'));
                self.y += style.margin_bottom;
            }
            Node::ContactRow(tokens) => {
                self.y += style.margin_top;
                self.pills(tokens);
                self.y += style.margin_bottom;
            }
            Node::Section { title, children } => {
                self.y += style.margin_top;
                self.y += style.padding_y;
                self.text_block(title, &style, None);
                self.y += style.padding_y;
                if let Some((border, color)) = style.border_bottom {
                    self.y += border / 2.0;
                    self.ops.push(DrawOp::Rule {
                        x1: self.content_left(),
                        x2: self.content_left() + self.content_width(),
                        y: self.y,
                        width: border,
                        color,
                    });
                    self.y += border / 2.0;
                }
                self.y += style.margin_bottom;
                for child in children {
                    self.node(child);
                }
            }
        }
    }

    /// Wrapped text; a glyph hangs in the indent and the text wraps beside it.
    fn text_block(&mut self, text: &str, style: &InlineStyle, glyph: Option<char>) {
        let face = Face::for_style(style.bold, style.italic);
        let line_height = style.font_size * style.line_height;
        let left = self.content_left() + style.indent;
        let glyph_width = glyph
            .map(|g| measure(&format!("{} ", g), face, style.font_size))
            .unwrap_or(0.0);
        let max_width = (self.content_width() - style.indent - glyph_width).max(1.0);

        let lines = wrap(text, face, style.font_size, max_width);
        for (i, line) in lines.iter().enumerate() {
            let baseline = self.y + (line_height + style.font_size * 0.7) / 2.0;
            if i == 0 {
                if let Some(g) = glyph {
                    self.ops.push(DrawOp::Text {
                        x: left,
                        y: baseline,
                        size: style.font_size,
                        face,
                        color: style.color,
                        text: g.to_string(),
                    });
                }
            }
            let line_width = measure(line, face, style.font_size);
            let x = match style.align {
                Align::Left => left + glyph_width,
                Align::Center => self.content_left() + (self.content_width() - line_width) / 2.0,
            };
            self.ops.push(DrawOp::Text {
                x,
                y: baseline,
                size: style.font_size,
                face,
                color: style.color,
                text: line.clone(),
            });
            self.y += line_height;
        }
    }

    /// Pills flow into centered rows.
    fn pills(&mut self, tokens: &[String]) {
        let pill = InlineStyle::for_role(StyleRole::Pill);
        let face = Face::for_style(pill.bold, pill.italic);
        let gap = pill.indent;
        let height = pill.font_size * pill.line_height + pill.padding_y * 2.0;

        let sized: Vec<(&str, f32)> = tokens
            .iter()
            .map(|t| (t.as_str(), measure(t, face, pill.font_size) + pill.padding_x * 2.0))
            .collect();

        let mut rows: Vec<Vec<(&str, f32)>> = Vec::new();
        let mut row_width = 0.0_f32;
        for (token, width) in sized {
            let width = width.min(self.content_width());
            match rows.last_mut() {
                Some(row) if row_width + gap + width <= self.content_width() => {
                    row.push((token, width));
                    row_width += gap + width;
                }
                _ => {
                    rows.push(vec![(token, width)]);
                    row_width = width;
                }
            }
        }

        for row in rows {
            let total: f32 = row.iter().map(|(_, w)| w).sum::<f32>() + gap * (row.len() - 1) as f32;
            let mut x = self.content_left() + (self.content_width() - total) / 2.0;
            for (token, width) in row {
                if let Some(bg) = pill.background {
                    self.ops.push(DrawOp::Fill {
                        x,
                        y: self.y,
                        w: width,
                        h: height,
                        color: bg,
                    });
                }
                self.ops.push(DrawOp::Text {
                    x: x + pill.padding_x,
                    y: self.y + pill.padding_y + (pill.font_size * pill.line_height + pill.font_size * 0.7) / 2.0,
                    size: pill.font_size,
                    face,
                    color: pill.color,
                    text: token.to_string(),
                });
                x += width + gap;
            }
            self.y += height + pill.margin_bottom;
        }
    }
}
