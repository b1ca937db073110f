// src/lib.rs

//! Bitmap ("sprite sheet") fonts.
//!
//! A font is an atlas image holding every glyph plus a JSON descriptor that
//! maps characters to regions of it. Loading a font parses the descriptor,
//! builds the glyph table (by scanning separator pixels or by reading explicit
//! rectangles), and scales everything to the requested size. The result is an
//! immutable value that measures and renders text.
//!
//! ```no_run
//! use sprite_font::{BitmapFont, Font, FontOptions, RenderOptions, Rgb};
//!
//! # fn main() -> sprite_font::Result<()> {
//! let font = Font::load(&FontOptions::new("fonts/pixel.json").with_size(16))?;
//! let rendered = font.render("Hello\nworld", &RenderOptions::new().with_color(Rgb::WHITE))?;
//! rendered.surface.save("hello.png".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod atlas;
pub mod color;
pub mod compositor;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod font;
pub mod layout;
pub mod recolor;
pub mod scale;
pub mod surface;

pub use atlas::{Glyph, GlyphTable};
pub use color::{NamedColor, Rgb};
pub use compositor::Rendered;
pub use config::{FontOptions, RenderOptions, DEFAULT_CHAR, MAX_SPACING};
pub use descriptor::{AtlasLayout, FontDescriptor};
pub use error::{FontError, Result};
pub use font::{BitmapFont, FixedHeightFont, Font, FontFace, FreeDimsFont};
pub use layout::{Align, GlyphMetrics};
pub use recolor::color_swap;
pub use surface::{detect_colorkey, Rect, Surface};
