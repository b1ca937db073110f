// Shared fixtures: small atlases written as PNGs next to their descriptors.
#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::PathBuf;

pub const KEY: [u8; 3] = [0, 0, 0];
pub const INK: [u8; 3] = [255, 0, 0];
pub const SEP: [u8; 3] = [127, 127, 127];

pub const HEIGHT: u32 = 8;
pub const WIDTH_A: u32 = 10;
pub const WIDTH_B: u32 = 12;
pub const WIDTH_DEFAULT: u32 = 6;

fn rgba(c: [u8; 3]) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/// Glyphs `A`, `B` and `_` on one row, each followed by a separator column.
/// Row 0 carries only the separators; rows 1.. of every glyph column are ink.
pub fn fixed_height_atlas() -> RgbaImage {
    let widths = [WIDTH_A, WIDTH_B, WIDTH_DEFAULT];
    let total: u32 = widths.iter().map(|w| w + 1).sum();
    let mut image = RgbaImage::from_pixel(total, HEIGHT, rgba(KEY));
    let mut x = 0;
    for w in widths {
        for col in x..x + w {
            for row in 1..HEIGHT {
                image.put_pixel(col, row, rgba(INK));
            }
        }
        image.put_pixel(x + w, 0, rgba(SEP));
        x += w + 1;
    }
    image
}

/// Left edge of each glyph in [`fixed_height_atlas`].
pub const X_A: u32 = 0;
pub const X_B: u32 = WIDTH_A + 1;
pub const X_DEFAULT: u32 = WIDTH_A + WIDTH_B + 2;

pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let fixture = Fixture { dir };
        fixture.write_image("atlas.png", &fixed_height_atlas());
        fixture
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_image(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let path = self.path(name);
        image.save(&path).expect("save fixture image");
        path
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// A fixed-height descriptor over `atlas.png` with the given extra fields.
    pub fn fixed_height(&self, extra: &str) -> PathBuf {
        let body = format!(
            r#"{{
    "font_image": "atlas.png",
    "separator_color": [127, 127, 127],
    "character_order": ["Aa", "Bb", "_"]{}
}}"#,
            extra
        );
        self.write("fixed.json", &body)
    }

    /// A free-dimension descriptor over the same atlas.
    pub fn free_dims(&self, extra: &str) -> PathBuf {
        let body = format!(
            r#"{{
    "font_image": "atlas.png",
    "chars": {{
        "A": {{"x": {}, "y": 0, "width": {}, "height": {}}},
        "B": {{"x": {}, "y": 0, "width": {}, "height": {}}},
        "_": {{"x": {}, "y": 0, "width": {}, "height": {}}}
    }}{}
}}"#,
            X_A, WIDTH_A, HEIGHT, X_B, WIDTH_B, HEIGHT, X_DEFAULT, WIDTH_DEFAULT, HEIGHT, extra
        );
        self.write("free.json", &body)
    }
}
