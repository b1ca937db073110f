// src/config.rs

//! Construction and render parameters for bitmap fonts.
//!
//! Both structs deserialize from JSON (or any serde format) with every field
//! optional, so callers can keep font settings next to the rest of their
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::Rgb;
use crate::layout::Align;

/// Character used for anything the font does not map.
pub const DEFAULT_CHAR: char = '_';

/// Largest horizontal or vertical gap, in pixels, a font accepts.
pub const MAX_SPACING: u32 = 4096;

/// Parameters for loading a font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Path to the font descriptor.
    pub path: PathBuf,
    /// Target glyph height in pixels. `None` keeps the atlas' native size.
    pub size: Option<u32>,
    /// Default foreground color for renders that don't pass their own.
    /// Requires the descriptor to declare `font_color`.
    pub color: Option<Rgb>,
    /// Horizontal and vertical spacing; overrides the descriptor's `spacing`.
    pub spacing: Option<(u32, u32)>,
    /// Substitute for unmapped characters. When the font lacks it too, the
    /// font's first character is used instead.
    pub default_char: char,
    /// Guess the colorkey from the atlas corners when the descriptor has none.
    pub detect_colorkey: bool,
}

impl Default for FontOptions {
    fn default() -> Self {
        FontOptions {
            path: PathBuf::new(),
            size: None,
            color: None,
            spacing: None,
            default_char: DEFAULT_CHAR,
            detect_colorkey: false,
        }
    }
}

impl FontOptions {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FontOptions {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_spacing(mut self, horizontal: u32, vertical: u32) -> Self {
        self.spacing = Some((horizontal, vertical));
        self
    }

    pub fn with_default_char(mut self, c: char) -> Self {
        self.default_char = c;
        self
    }

    pub fn with_detect_colorkey(mut self, detect: bool) -> Self {
        self.detect_colorkey = detect;
        self
    }
}

/// Parameters for a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Foreground color; falls back to the font's construction color.
    pub color: Option<Rgb>,
    pub align: Align,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}
