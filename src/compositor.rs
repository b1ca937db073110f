// src/compositor.rs

//! Turns text into pixels.
//!
//! Each row is drawn on its own colorkey-filled buffer, glyph by glyph, and the
//! rows are then blitted into the final block at their aligned offsets. Color
//! substitution, when requested, runs once on the finished block.

use log::trace;

use crate::color::Rgb;
use crate::config::RenderOptions;
use crate::error::{FontError, Result};
use crate::font::FontFace;
use crate::layout::Layout;
use crate::recolor::color_swap;
use crate::surface::{Rect, Surface};

/// A rendered block of text.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The pixels, with the font's colorkey set as transparency key.
    pub surface: Surface,
    /// `{0, 0, width, height}`, identical to the font's bounding box for the text.
    pub rect: Rect,
}

/// Renders `text` with `face`.
///
/// Fails with `ContractViolation` when the requested color is the colorkey or
/// when a color is requested from a font that does not declare its own.
pub fn render(face: &FontFace, text: &str, options: &RenderOptions) -> Result<Rendered> {
    let colorkey = face.colorkey();
    let color = options.color.or(face.default_color());
    let swap = match color {
        Some(c) if c == colorkey => {
            return Err(FontError::ContractViolation(format!(
                "render color {} is the font's colorkey",
                c
            )))
        }
        Some(c) => {
            let font_color = face.font_color().ok_or_else(|| {
                FontError::ContractViolation(format!(
                    "render color {} requested but the font declares no font_color",
                    c
                ))
            })?;
            Some((font_color, c))
        }
        None => None,
    };

    let layout = face.layout();
    let placements = layout.place_rows(text, options.align);
    let width = placements.iter().map(|row| row.width).max().unwrap_or(0);
    let height = layout.block_height(placements.len());

    let mut block = Surface::filled(width, height, colorkey);
    for row in &placements {
        trace!("Row {:?} at ({}, {}) width {}", row.text, row.x, row.y, row.width);
        let row_surface = render_row(face.atlas(), &layout, row.text, row.width, colorkey);
        block.blit(&row_surface, (row.x, row.y), row_surface.rect());
    }

    if let Some((old, new)) = swap {
        block = color_swap(&block, old, new);
    }
    block.set_colorkey(Some(colorkey));

    Ok(Rendered {
        surface: block,
        rect: Rect::new(0, 0, width, height),
    })
}

fn render_row(atlas: &Surface, layout: &Layout<'_>, row: &str, width: u32, colorkey: Rgb) -> Surface {
    let mut surface = Surface::filled(width, layout.text_height(), colorkey);
    let mut x_offset = 0u32;
    for c in row.chars() {
        let glyph = layout.glyph(c);
        surface.blit(atlas, (x_offset, 0), glyph.rect());
        x_offset = x_offset.saturating_add(layout.advance(c));
    }
    surface
}
