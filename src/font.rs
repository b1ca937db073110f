// src/font.rs

//! Loaded bitmap fonts.
//!
//! Two atlas formats are supported, each with its own type:
//!
//! - [`FixedHeightFont`]: one row of glyphs delimited by separator pixels.
//! - [`FreeDimsFont`]: glyph rectangles listed explicitly in the descriptor.
//!
//! Both hold a [`FontFace`] and expose the [`BitmapFont`] capabilities.
//! [`Font::load`] inspects the descriptor and builds the matching variant.
//!
//! Fonts are immutable once built and can be shared between threads freely.

use log::{info, warn};

use crate::atlas::{from_entries, scan_fixed_height, GlyphTable};
use crate::color::Rgb;
use crate::compositor::{self, Rendered};
use crate::config::{FontOptions, RenderOptions};
use crate::descriptor::{check_spacing, AtlasLayout, FontDescriptor};
use crate::error::{FontError, Result};
use crate::layout::{GlyphMetrics, Layout};
use crate::scale::Scale;
use crate::surface::{self, Rect, Surface};

/// The state every bitmap font carries after construction.
#[derive(Debug, Clone)]
pub struct FontFace {
    atlas: Surface,
    glyphs: GlyphTable,
    font_height: u32,
    spacing: (u32, u32),
    default_char: char,
    colorkey: Rgb,
    font_color: Option<Rgb>,
    default_color: Option<Rgb>,
}

impl FontFace {
    /// Scales the natural-resolution `atlas` and `glyphs` and resolves the
    /// remaining options against the descriptor.
    fn build(
        descriptor: &FontDescriptor,
        mut atlas: Surface,
        glyphs: GlyphTable,
        natural_height: u32,
        colorkey: Rgb,
        options: &FontOptions,
    ) -> Result<Self> {
        if options.size == Some(0) {
            return Err(FontError::validation("size", "must be at least one pixel"));
        }
        if glyphs.is_empty() {
            return Err(FontError::validation(
                "character_order",
                "the atlas contains no glyphs",
            ));
        }

        let scale = Scale::to_size(options.size, natural_height);
        let glyphs = scale.table(&glyphs);
        atlas.set_colorkey(Some(colorkey));
        let atlas = scale.surface(&atlas);
        let font_height = scale.apply(natural_height);

        let default_char = if glyphs.contains(options.default_char) {
            options.default_char
        } else {
            // `glyphs` is non-empty, so `first` is always present.
            let fallback = glyphs.first().unwrap_or(options.default_char);
            warn!(
                "Default character {:?} is not in the font; using {:?}",
                options.default_char, fallback
            );
            fallback
        };

        let spacing = check_spacing(options.spacing.or(descriptor.spacing).unwrap_or((0, 0)))?;

        info!(
            "Built {} font from {}: {} glyphs, height {} (scale {:.3}), spacing {:?}",
            descriptor.layout.name(),
            descriptor.path.display(),
            glyphs.len(),
            font_height,
            scale.factor(),
            spacing
        );

        Ok(FontFace {
            atlas,
            glyphs,
            font_height,
            spacing,
            default_char,
            colorkey,
            font_color: descriptor.font_color,
            default_color: options.color,
        })
    }

    pub fn atlas(&self) -> &Surface {
        &self.atlas
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    pub fn font_height(&self) -> u32 {
        self.font_height
    }

    pub fn spacing(&self) -> (u32, u32) {
        self.spacing
    }

    pub fn default_char(&self) -> char {
        self.default_char
    }

    pub fn colorkey(&self) -> Rgb {
        self.colorkey
    }

    pub fn font_color(&self) -> Option<Rgb> {
        self.font_color
    }

    pub fn default_color(&self) -> Option<Rgb> {
        self.default_color
    }

    pub fn layout(&self) -> Layout<'_> {
        Layout::new(&self.glyphs, self.default_char, self.font_height, self.spacing)
    }
}

/// What every bitmap font can do.
pub trait BitmapFont {
    fn face(&self) -> &FontFace;

    fn font_height(&self) -> u32 {
        self.face().font_height()
    }

    fn line_advance(&self) -> u32 {
        self.face().layout().line_advance()
    }

    fn text_width(&self, row: &str) -> u32 {
        self.face().layout().text_width(row)
    }

    fn metrics(&self, text: &str) -> Vec<GlyphMetrics> {
        self.face().layout().metrics(text)
    }

    fn bounding_box(&self, text: &str) -> Rect {
        self.face().layout().bounding_box(text)
    }

    fn render(&self, text: &str, options: &RenderOptions) -> Result<Rendered> {
        compositor::render(self.face(), text, options)
    }
}

/// Resolves the colorkey and checks the color options shared by both variants.
fn prepare_colors(
    descriptor: &FontDescriptor,
    atlas: &Surface,
    options: &FontOptions,
) -> Result<Rgb> {
    let colorkey = match descriptor.colorkey {
        Some(key) => key,
        None if options.detect_colorkey => surface::detect_colorkey(atlas).unwrap_or_else(|| {
            warn!("Could not detect a colorkey from the atlas corners; using black");
            Rgb::BLACK
        }),
        None => Rgb::BLACK,
    };

    if let Some(font_color) = descriptor.font_color {
        if font_color == colorkey {
            return Err(FontError::validation(
                "font_color",
                format!("{} must differ from the colorkey", font_color),
            ));
        }
    }

    if let Some(color) = options.color {
        if descriptor.font_color.is_none() {
            return Err(FontError::validation(
                "font_color",
                "required when a font color is requested",
            ));
        }
        if color == colorkey {
            return Err(FontError::ContractViolation(format!(
                "font color {} is the colorkey",
                color
            )));
        }
    }

    Ok(colorkey)
}

/// A font whose glyphs sit on one row, delimited by separator pixels.
#[derive(Debug, Clone)]
pub struct FixedHeightFont {
    face: FontFace,
}

impl FixedHeightFont {
    pub fn load(options: &FontOptions) -> Result<Self> {
        let descriptor = FontDescriptor::load(&options.path)?;
        Self::from_descriptor(&descriptor, options)
    }

    pub fn from_descriptor(descriptor: &FontDescriptor, options: &FontOptions) -> Result<Self> {
        let (separator_color, character_order) = match &descriptor.layout {
            AtlasLayout::FixedHeight {
                separator_color,
                character_order,
            } => (*separator_color, character_order),
            AtlasLayout::FreeDims { .. } => {
                return Err(FontError::validation(
                    "character_order",
                    "missing; this descriptor uses a chars table",
                ))
            }
        };

        let atlas = Surface::open(&descriptor.atlas_path)?;
        let colorkey = prepare_colors(descriptor, &atlas, options)?;
        let glyphs = scan_fixed_height(&atlas, separator_color, character_order);
        let natural_height = atlas.height();

        let face = FontFace::build(descriptor, atlas, glyphs, natural_height, colorkey, options)?;
        Ok(Self { face })
    }
}

impl BitmapFont for FixedHeightFont {
    fn face(&self) -> &FontFace {
        &self.face
    }
}

/// A font whose glyph rectangles come straight from the descriptor.
#[derive(Debug, Clone)]
pub struct FreeDimsFont {
    face: FontFace,
}

impl FreeDimsFont {
    pub fn load(options: &FontOptions) -> Result<Self> {
        let descriptor = FontDescriptor::load(&options.path)?;
        Self::from_descriptor(&descriptor, options)
    }

    pub fn from_descriptor(descriptor: &FontDescriptor, options: &FontOptions) -> Result<Self> {
        let chars = match &descriptor.layout {
            AtlasLayout::FreeDims { chars } => chars,
            AtlasLayout::FixedHeight { .. } => {
                return Err(FontError::validation(
                    "chars",
                    "missing; this descriptor uses character_order",
                ))
            }
        };

        let atlas = Surface::open(&descriptor.atlas_path)?;
        let colorkey = prepare_colors(descriptor, &atlas, options)?;
        let glyphs = from_entries(&atlas, chars);
        let natural_height = glyphs.max_height();

        let face = FontFace::build(descriptor, atlas, glyphs, natural_height, colorkey, options)?;
        Ok(Self { face })
    }
}

impl BitmapFont for FreeDimsFont {
    fn face(&self) -> &FontFace {
        &self.face
    }
}

/// A font of either format, chosen from the descriptor's contents.
#[derive(Debug, Clone)]
pub enum Font {
    FixedHeight(FixedHeightFont),
    FreeDims(FreeDimsFont),
}

impl Font {
    /// Loads the descriptor at `options.path` and builds the matching font.
    pub fn load(options: &FontOptions) -> Result<Font> {
        let descriptor = FontDescriptor::load(&options.path)?;
        Font::from_descriptor(&descriptor, options)
    }

    pub fn from_descriptor(descriptor: &FontDescriptor, options: &FontOptions) -> Result<Font> {
        match descriptor.layout {
            AtlasLayout::FixedHeight { .. } => {
                FixedHeightFont::from_descriptor(descriptor, options).map(Font::FixedHeight)
            }
            AtlasLayout::FreeDims { .. } => {
                FreeDimsFont::from_descriptor(descriptor, options).map(Font::FreeDims)
            }
        }
    }
}

impl BitmapFont for Font {
    fn face(&self) -> &FontFace {
        match self {
            Font::FixedHeight(font) => font.face(),
            Font::FreeDims(font) => font.face(),
        }
    }
}
