// src/atlas.rs

//! Glyph tables and the two ways of building them from an atlas image.
//!
//! - [`scan_fixed_height`] walks row 0 of a single-row atlas and closes a glyph
//!   every time it meets a separator-colored pixel.
//! - [`from_entries`] takes explicit rectangles straight from the descriptor.
//!
//! Both produce rectangles at the atlas' natural resolution; scaling happens
//! afterwards (see `scale`).

use crate::color::Rgb;
use crate::surface::{Rect, Surface};
use log::{debug, warn};
use std::collections::HashMap;

/// The atlas rectangle holding one character's bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Glyph {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Glyph {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Character to glyph mapping that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
    order: Vec<char>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `c` to `glyph`. Re-inserting a character replaces its glyph but
    /// keeps its original position in the order.
    pub fn insert(&mut self, c: char, glyph: Glyph) {
        if self.glyphs.insert(c, glyph).is_none() {
            self.order.push(c);
        }
    }

    pub fn get(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The first character that was mapped.
    pub fn first(&self) -> Option<char> {
        self.order.first().copied()
    }

    /// Iterates glyphs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> + '_ {
        self.order.iter().map(move |c| (*c, &self.glyphs[c]))
    }

    /// Tallest glyph in the table, 0 when empty.
    pub fn max_height(&self) -> u32 {
        self.glyphs.values().map(|g| g.height).max().unwrap_or(0)
    }

    /// Returns a new table with `f` applied to every glyph.
    pub fn map(&self, mut f: impl FnMut(&Glyph) -> Glyph) -> GlyphTable {
        let mut out = GlyphTable::new();
        for (c, glyph) in self.iter() {
            out.insert(c, f(glyph));
        }
        out
    }
}

/// Detects glyph slots in a single-row atlas.
///
/// Columns are scanned left to right at row 0. A column whose row-0 pixel is
/// `separator` closes the glyph made of the columns since the previous
/// separator; every character of `character_order[slot]` is mapped to it.
/// Slots beyond the end of `character_order` are ignored.
pub fn scan_fixed_height(
    atlas: &Surface,
    separator: Rgb,
    character_order: &[String],
) -> GlyphTable {
    let height = atlas.height();
    let mut table = GlyphTable::new();
    let mut run_width = 0u32;
    let mut slot = 0usize;
    let mut ignored_slots = 0usize;

    for x in 0..atlas.width() {
        if atlas.get_at(x, 0) != Some(separator) {
            run_width += 1;
            continue;
        }

        let glyph = Glyph {
            x: x - run_width,
            y: 0,
            width: run_width,
            height,
        };
        match character_order.get(slot) {
            Some(chars) => {
                debug!("Glyph slot {} {:?}: {:?}", slot, chars, glyph);
                for c in chars.chars() {
                    table.insert(c, glyph);
                }
            }
            None => ignored_slots += 1,
        }
        slot += 1;
        run_width = 0;
    }

    if ignored_slots > 0 {
        warn!(
            "Atlas has {} glyph slots but character_order lists {}; ignoring the last {}",
            slot,
            character_order.len(),
            ignored_slots
        );
    } else if slot < character_order.len() {
        warn!(
            "character_order lists {} entries but the atlas has only {} glyph slots; {:?} stay unmapped",
            character_order.len(),
            slot,
            &character_order[slot..]
        );
    }

    table
}

/// Builds a table from explicit descriptor rectangles.
///
/// Rectangles reaching outside the atlas are kept; rendering clips them.
pub fn from_entries(atlas: &Surface, entries: &[(char, Glyph)]) -> GlyphTable {
    let mut table = GlyphTable::new();
    for &(c, glyph) in entries {
        if glyph.rect().right() > atlas.width() || glyph.rect().bottom() > atlas.height() {
            warn!(
                "Glyph {:?} {:?} extends past the {}x{} atlas",
                c,
                glyph,
                atlas.width(),
                atlas.height()
            );
        }
        table.insert(c, glyph);
    }
    table
}
