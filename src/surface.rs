// src/surface.rs

//! A thin pixel surface over `image::RgbaImage`.
//!
//! Surfaces are always opaque; an optional colorkey marks the color that is
//! treated as transparent when the surface is blitted elsewhere or exported.

use crate::color::Rgb;
use crate::error::{FontError, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::debug;
use std::path::Path;

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    colorkey: Option<Rgb>,
}

impl Surface {
    /// Creates a surface of the given size filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(color.to_rgba())),
            colorkey: None,
        }
    }

    /// Wraps an existing image, discarding its alpha channel.
    pub fn from_image(mut pixels: RgbaImage) -> Self {
        for pixel in pixels.pixels_mut() {
            pixel.0[3] = 255;
        }
        Self {
            pixels,
            colorkey: None,
        }
    }

    /// Decodes a PNG or BMP file.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| FontError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        debug!(
            "Surface: decoded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(image))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    pub fn colorkey(&self) -> Option<Rgb> {
        self.colorkey
    }

    pub fn set_colorkey(&mut self, colorkey: Option<Rgb>) {
        self.colorkey = colorkey;
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn get_at(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width() && y < self.height() {
            Some(Rgb::from_rgba(self.pixels.get_pixel(x, y).0))
        } else {
            None
        }
    }

    /// Sets the pixel at `(x, y)`; writes outside the surface are dropped.
    pub fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, Rgba(color.to_rgba()));
        }
    }

    /// Copies `area` of `src` to `dest` on this surface.
    ///
    /// Both rectangles are clipped to their surfaces. Source pixels equal to the
    /// source colorkey are skipped.
    pub fn blit(&mut self, src: &Surface, dest: (u32, u32), area: Rect) {
        let src_right = area.right().min(src.width());
        let src_bottom = area.bottom().min(src.height());
        let key = src.colorkey;

        for sy in area.y..src_bottom {
            let dy = dest.1 as u64 + (sy - area.y) as u64;
            if dy >= self.height() as u64 {
                break;
            }
            for sx in area.x..src_right {
                let dx = dest.0 as u64 + (sx - area.x) as u64;
                if dx >= self.width() as u64 {
                    break;
                }
                let pixel = *src.pixels.get_pixel(sx, sy);
                if key == Some(Rgb::from_rgba(pixel.0)) {
                    continue;
                }
                self.pixels.put_pixel(dx as u32, dy as u32, pixel);
            }
        }
    }

    /// Returns a copy resampled to `width` x `height` with nearest-neighbour
    /// filtering, so every output pixel carries an exact source color.
    pub fn resized(&self, width: u32, height: u32) -> Surface {
        let pixels = if width == 0 || height == 0 {
            RgbaImage::new(width, height)
        } else if (width, height) == self.pixels.dimensions() {
            self.pixels.clone()
        } else {
            imageops::resize(&self.pixels, width, height, FilterType::Nearest)
        };
        Surface {
            pixels,
            colorkey: self.colorkey,
        }
    }

    /// Returns a new surface with `f` applied to every pixel.
    pub fn map_colors(&self, mut f: impl FnMut(Rgb) -> Rgb) -> Surface {
        let mut pixels = self.pixels.clone();
        for pixel in pixels.pixels_mut() {
            *pixel = Rgba(f(Rgb::from_rgba(pixel.0)).to_rgba());
        }
        Surface {
            pixels,
            colorkey: self.colorkey,
        }
    }

    /// Exports the surface with colorkey pixels made fully transparent.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut out = self.pixels.clone();
        if let Some(key) = self.colorkey {
            for pixel in out.pixels_mut() {
                if Rgb::from_rgba(pixel.0) == key {
                    pixel.0[3] = 0;
                }
            }
        }
        out
    }

    /// Writes the keyed export to `path`; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.to_rgba_image()
            .save(path)
            .map_err(|source| FontError::Image {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Guesses an atlas background color from its four corners.
///
/// Returns the corner color when all four agree, otherwise `None`.
pub fn detect_colorkey(surface: &Surface) -> Option<Rgb> {
    let (w, h) = (surface.width(), surface.height());
    if w == 0 || h == 0 {
        return None;
    }
    let corners = [
        surface.get_at(0, 0)?,
        surface.get_at(w - 1, 0)?,
        surface.get_at(0, h - 1)?,
        surface.get_at(w - 1, h - 1)?,
    ];
    if corners.iter().all(|&c| c == corners[0]) {
        Some(corners[0])
    } else {
        debug!("detect_colorkey: corners disagree: {:?}", corners);
        None
    }
}
