//! Static Helvetica metrics used to lay text out before it reaches the PDF.
//!
//! Widths are the standard AFM advance widths in 1/1000 em for ASCII
//! 0x20..=0x7E. Index = (char as usize) - 32. Bold text is approximated by
//! widening the regular table.

use unicode_normalization::UnicodeNormalization;

/// The three base-14 faces the export uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
    /// Helvetica-Oblique
    Oblique,
}

impl Face {
    /// Pick the face for a style.
    pub fn for_style(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, _) => Face::Bold,
            (false, true) => Face::Oblique,
            (false, false) => Face::Regular,
        }
    }

    /// PostScript name of the base font.
    pub fn base_font(&self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
        }
    }

    /// All faces, in resource order.
    pub fn all() -> [Face; 3] {
        [Face::Regular, Face::Bold, Face::Oblique]
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

/// Width of the bullet glyph (WinAnsi 0x95).
const BULLET_WIDTH: u16 = 350;

const BOLD_FACTOR: f32 = 1.07;

/// Measure a string in the same unit as `font_size`. Text is measured in
/// NFC, the form it is drawn in.
pub fn measure(text: &str, face: Face, font_size: f32) -> f32 {
    let units: u32 = text
        .nfc()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                HELVETICA[code - 32] as u32
            } else if c == '•' {
                BULLET_WIDTH as u32
            } else {
                FALLBACK_WIDTH as u32
            }
        })
        .sum();
    let width = units as f32 / 1000.0 * font_size;
    match face {
        Face::Bold => width * BOLD_FACTOR,
        Face::Regular | Face::Oblique => width,
    }
}

/// Greedy word wrap. Words wider than the line are placed on a line of their own.
pub fn wrap(text: &str, face: Face, font_size: f32, max_width: f32) -> Vec<String> {
    let space = measure(" ", face, font_size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_width = measure(word, face, font_size);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
