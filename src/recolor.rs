// src/recolor.rs

//! Foreground color substitution.

use crate::color::Rgb;
use crate::surface::Surface;

/// Returns a copy of `surface` with every `old_color` pixel painted `new_color`.
///
/// All other pixels, the colorkey background included, are left as they are,
/// and the colorkey setting is carried over.
pub fn color_swap(surface: &Surface, old_color: Rgb, new_color: Rgb) -> Surface {
    if old_color == new_color {
        return surface.clone();
    }
    surface.map_colors(|c| if c == old_color { new_color } else { c })
}
