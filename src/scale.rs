// src/scale.rs

//! Uniform scaling of glyph tables and atlas images.
//!
//! The factor is kept as the exact ratio `target / natural` and applied with
//! integer arithmetic, so scaling the natural height always yields `target`.

use crate::atlas::{Glyph, GlyphTable};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    target: u32,
    natural: u32,
}

impl Scale {
    pub const IDENTITY: Scale = Scale {
        target: 1,
        natural: 1,
    };

    /// Scale mapping `natural_height` onto `target_size`.
    ///
    /// `None` keeps the native size, as does a zero `natural_height` (there is
    /// nothing to scale).
    pub fn to_size(target_size: Option<u32>, natural_height: u32) -> Self {
        match target_size {
            Some(target) if natural_height > 0 => Scale {
                target,
                natural: natural_height,
            },
            _ => Scale::IDENTITY,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.target == self.natural
    }

    /// The factor as a float, for logging.
    pub fn factor(&self) -> f64 {
        self.target as f64 / self.natural as f64
    }

    /// Scales one length, truncating toward zero.
    pub fn apply(&self, value: u32) -> u32 {
        (value as u64 * self.target as u64 / self.natural as u64) as u32
    }

    pub fn glyph(&self, glyph: &Glyph) -> Glyph {
        Glyph {
            x: self.apply(glyph.x),
            y: self.apply(glyph.y),
            width: self.apply(glyph.width),
            height: self.apply(glyph.height),
        }
    }

    pub fn table(&self, table: &GlyphTable) -> GlyphTable {
        if self.is_identity() {
            return table.clone();
        }
        table.map(|g| self.glyph(g))
    }

    pub fn surface(&self, surface: &Surface) -> Surface {
        if self.is_identity() {
            return surface.clone();
        }
        surface.resized(self.apply(surface.width()), self.apply(surface.height()))
    }
}
