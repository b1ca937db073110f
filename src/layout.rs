// src/layout.rs

//! Text metrics and row layout.
//!
//! Widths charge the horizontal spacing once per character, the last one
//! included, and every row is one line advance tall. An empty string is still
//! one row: zero wide, one line advance high.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::atlas::{Glyph, GlyphTable};
use crate::surface::Rect;

/// Horizontal alignment of rows within the rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    /// Parses `LEFT`, `RIGHT`, `CENTER` or `CENTRE` (any case). Anything else
    /// is `Left`.
    pub fn parse(token: &str) -> Align {
        match token.trim().to_ascii_uppercase().as_str() {
            "RIGHT" => Align::Right,
            "CENTER" | "CENTRE" => Align::Center,
            _ => Align::Left,
        }
    }

    /// Horizontal offset of a `row_width` row inside a `max_width` block.
    pub fn offset(self, max_width: u32, row_width: u32) -> u32 {
        let slack = max_width.saturating_sub(row_width);
        match self {
            Align::Left => 0,
            Align::Right => slack,
            Align::Center => slack / 2,
        }
    }
}

impl From<&str> for Align {
    fn from(token: &str) -> Self {
        Align::parse(token)
    }
}

impl From<String> for Align {
    fn from(token: String) -> Self {
        Align::parse(&token)
    }
}

impl From<Align> for String {
    fn from(align: Align) -> Self {
        align.to_string()
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Align::Left => "LEFT",
            Align::Right => "RIGHT",
            Align::Center => "CENTER",
        };
        f.write_str(token)
    }
}

/// Per-character metrics, in the shape of a freetype `get_metrics` record.
///
/// A bitmap glyph is its own bounding box, so the x fields all hold the
/// advance width and the y fields all hold the line advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
    pub advance_x: u32,
    pub advance_y: u32,
}

/// Where one row of text lands in the rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlacement<'t> {
    pub text: &'t str,
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

/// The metrics engine: a borrowed view of a font's glyph data.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    glyphs: &'a GlyphTable,
    default_char: char,
    font_height: u32,
    spacing: (u32, u32),
}

impl<'a> Layout<'a> {
    /// `default_char` is expected to be mapped in `glyphs`.
    pub fn new(
        glyphs: &'a GlyphTable,
        default_char: char,
        font_height: u32,
        spacing: (u32, u32),
    ) -> Self {
        Self {
            glyphs,
            default_char,
            font_height,
            spacing,
        }
    }

    /// The character actually drawn for `c`.
    pub fn resolve(&self, c: char) -> char {
        if self.glyphs.contains(c) {
            c
        } else {
            self.default_char
        }
    }

    /// The glyph drawn for `c`, after default substitution.
    pub fn glyph(&self, c: char) -> Glyph {
        self.glyphs
            .get(self.resolve(c))
            .copied()
            .unwrap_or_default()
    }

    pub fn char_width(&self, c: char) -> u32 {
        self.glyph(c).width
    }

    pub fn advance(&self, c: char) -> u32 {
        self.char_width(c).saturating_add(self.spacing.0)
    }

    /// Width of a single row: glyph widths plus one spacing per character.
    pub fn text_width(&self, row: &str) -> u32 {
        row.chars()
            .fold(0u32, |width, c| width.saturating_add(self.advance(c)))
    }

    /// Row height, independent of content.
    pub fn text_height(&self) -> u32 {
        self.font_height
    }

    pub fn line_advance(&self) -> u32 {
        self.font_height.saturating_add(self.spacing.1)
    }

    /// Height of `row_count` stacked rows.
    pub fn block_height(&self, row_count: usize) -> u32 {
        let rows = u32::try_from(row_count).unwrap_or(u32::MAX);
        self.line_advance().saturating_mul(rows)
    }

    /// Splits `text` into rows at each `'\n'`. Always yields at least one row.
    pub fn rows<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split('\n').collect()
    }

    pub fn bounding_box(&self, text: &str) -> Rect {
        let rows = self.rows(text);
        let width = rows.iter().map(|row| self.text_width(row)).max().unwrap_or(0);
        Rect::new(0, 0, width, self.block_height(rows.len()))
    }

    /// Metrics for each character of `text`, line breaks excluded.
    pub fn metrics(&self, text: &str) -> Vec<GlyphMetrics> {
        let advance_y = self.line_advance();
        text.chars()
            .filter(|&c| c != '\n')
            .map(|c| {
                let advance_x = self.advance(c);
                GlyphMetrics {
                    min_x: advance_x,
                    max_x: advance_x,
                    min_y: advance_y,
                    max_y: advance_y,
                    advance_x,
                    advance_y,
                }
            })
            .collect()
    }

    /// Positions every row of `text` within its bounding box.
    pub fn place_rows<'t>(&self, text: &'t str, align: Align) -> Vec<RowPlacement<'t>> {
        let rows = self.rows(text);
        let widths: Vec<u32> = rows.iter().map(|row| self.text_width(row)).collect();
        let max_width = widths.iter().copied().max().unwrap_or(0);
        let line_advance = self.line_advance();

        rows.into_iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (text, width))| RowPlacement {
                text,
                x: align.offset(max_width, width),
                y: line_advance.saturating_mul(i as u32),
                width,
            })
            .collect()
    }
}
