// src/descriptor.rs

//! Loading and validation of font descriptor files.
//!
//! A descriptor is a JSON document, optionally annotated with `//` comments,
//! that names the atlas image and describes how glyphs are laid out in it.
//! The presence of `character_order` selects the fixed-height layout; any
//! other descriptor is read as a free-dimension `chars` table.

use crate::atlas::Glyph;
use crate::color::Rgb;
use crate::config::MAX_SPACING;
use crate::error::{FontError, Result};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How glyphs are located inside the atlas image.
#[derive(Debug, Clone, PartialEq)]
pub enum AtlasLayout {
    /// One row of glyphs separated by marker pixels in row 0.
    FixedHeight {
        separator_color: Rgb,
        /// Entry `i` lists every character drawn by the `i`-th glyph slot.
        character_order: Vec<String>,
    },
    /// Explicit rectangles, in descriptor order.
    FreeDims { chars: Vec<(char, Glyph)> },
}

/// A validated font descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Location of the descriptor file itself.
    pub path: PathBuf,
    /// Resolved, existing atlas image path.
    pub atlas_path: PathBuf,
    /// The atlas background color, when the descriptor names one.
    pub colorkey: Option<Rgb>,
    /// The color glyphs are drawn in, used for color substitution.
    pub font_color: Option<Rgb>,
    /// Horizontal and vertical gaps, when the descriptor names them.
    pub spacing: Option<(u32, u32)>,
    pub layout: AtlasLayout,
}

impl FontDescriptor {
    /// Reads, parses and validates the descriptor at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => FontError::NotFound {
                what: "font descriptor",
                path: path.to_path_buf(),
            },
            _ => FontError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let cwd = std::env::current_dir().unwrap_or_default();
        let descriptor = Self::parse(&text, path, &cwd)?;
        info!(
            "Loaded font descriptor {} ({})",
            path.display(),
            descriptor.layout.name()
        );
        Ok(descriptor)
    }

    /// Parses descriptor text. `path` locates the descriptor for relative atlas
    /// references; `fallback_dir` is tried when that lookup fails.
    pub fn parse(text: &str, path: &Path, fallback_dir: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_str(&strip_comments(text)).map_err(|source| FontError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let fields = value.as_object().ok_or_else(|| {
            FontError::validation("<root>", "descriptor must be a JSON object")
        })?;

        let image_ref = match fields.get("font_image") {
            Some(Value::String(s)) if !s.is_empty() => s.as_str(),
            Some(_) => {
                return Err(FontError::validation(
                    "font_image",
                    "must be a non-empty string",
                ))
            }
            None => return Err(FontError::validation("font_image", "missing")),
        };
        let descriptor_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let atlas_path = resolve_atlas_path(descriptor_dir, image_ref, fallback_dir)?;

        let colorkey = optional_color(fields, "colorkey")?;
        let font_color = optional_color(fields, "font_color")?;

        let spacing = match fields.get("spacing") {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_spacing(value)?),
        };

        let layout = if fields.contains_key("character_order") {
            parse_fixed_height(fields)?
        } else {
            parse_free_dims(fields)?
        };

        Ok(FontDescriptor {
            path: path.to_path_buf(),
            atlas_path,
            colorkey,
            font_color,
            spacing,
            layout,
        })
    }

    /// The transparency key, black unless the descriptor says otherwise.
    pub fn background_color(&self) -> Rgb {
        self.colorkey.unwrap_or(Rgb::BLACK)
    }
}

impl AtlasLayout {
    pub fn name(&self) -> &'static str {
        match self {
            AtlasLayout::FixedHeight { .. } => "fixed-height",
            AtlasLayout::FreeDims { .. } => "free-dimension",
        }
    }
}

/// Removes `//` comments running to the end of a line.
///
/// Slashes inside JSON string literals are left alone so that paths and URLs
/// survive.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Skip to the end of the line but keep the newline itself.
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Resolves the atlas reference against the descriptor directory first and
/// `fallback_dir` second.
pub(crate) fn resolve_atlas_path(
    descriptor_dir: &Path,
    image_ref: &str,
    fallback_dir: &Path,
) -> Result<PathBuf> {
    let beside_descriptor = descriptor_dir.join(image_ref);
    if beside_descriptor.is_file() {
        debug!("Atlas resolved next to descriptor: {}", beside_descriptor.display());
        return Ok(beside_descriptor);
    }

    let from_fallback = fallback_dir.join(image_ref);
    if from_fallback.is_file() {
        debug!("Atlas resolved from working directory: {}", from_fallback.display());
        return Ok(from_fallback);
    }

    Err(FontError::NotFound {
        what: "font image",
        path: beside_descriptor,
    })
}

fn optional_color(fields: &Map<String, Value>, field: &'static str) -> Result<Option<Rgb>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_color(value, field).map(Some),
    }
}

fn parse_color(value: &Value, field: &'static str) -> Result<Rgb> {
    serde_json::from_value::<Rgb>(value.clone())
        .map_err(|e| FontError::validation(field, e.to_string()))
}

fn parse_spacing(value: &Value) -> Result<(u32, u32)> {
    let invalid = || FontError::validation("spacing", "expected [horizontal, vertical] pixel gaps");
    let items = value.as_array().ok_or_else(invalid)?;
    match items.as_slice() {
        [h, v] => {
            let h = h.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or_else(invalid)?;
            let v = v.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or_else(invalid)?;
            check_spacing((h, v))
        }
        _ => Err(invalid()),
    }
}

/// Rejects gaps wider than [`MAX_SPACING`].
pub(crate) fn check_spacing(spacing: (u32, u32)) -> Result<(u32, u32)> {
    if spacing.0 > MAX_SPACING || spacing.1 > MAX_SPACING {
        return Err(FontError::validation(
            "spacing",
            format!("{:?} exceeds the {} pixel limit", spacing, MAX_SPACING),
        ));
    }
    Ok(spacing)
}

fn parse_fixed_height(fields: &Map<String, Value>) -> Result<AtlasLayout> {
    let separator_color = match fields.get("separator_color") {
        None | Some(Value::Null) => {
            return Err(FontError::validation("separator_color", "missing"))
        }
        Some(value) => parse_color(value, "separator_color")?,
    };

    let entries = fields
        .get("character_order")
        .and_then(Value::as_array)
        .ok_or_else(|| FontError::validation("character_order", "must be a list of strings"))?;
    if entries.is_empty() {
        return Err(FontError::validation("character_order", "must not be empty"));
    }

    let character_order = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry.as_str().map(str::to_owned).ok_or_else(|| {
                FontError::validation("character_order", format!("entry {} is not a string", i))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AtlasLayout::FixedHeight {
        separator_color,
        character_order,
    })
}

fn parse_free_dims(fields: &Map<String, Value>) -> Result<AtlasLayout> {
    let table = match fields.get("chars") {
        None => return Err(FontError::validation("chars", "missing")),
        Some(Value::Object(table)) => table,
        Some(_) => return Err(FontError::validation("chars", "must be a mapping")),
    };
    if table.is_empty() {
        return Err(FontError::validation("chars", "must not be empty"));
    }

    let mut chars = Vec::with_capacity(table.len());
    for (key, entry) in table {
        let mut key_chars = key.chars();
        let c = match (key_chars.next(), key_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(FontError::validation(
                    "chars",
                    format!("key '{}' must be exactly one character", key),
                ))
            }
        };
        chars.push((c, parse_glyph(key, entry)?));
    }

    Ok(AtlasLayout::FreeDims { chars })
}

fn parse_glyph(key: &str, entry: &Value) -> Result<Glyph> {
    let rect = entry.as_object().ok_or_else(|| {
        FontError::validation("chars", format!("entry '{}' must be a mapping", key))
    })?;
    let dim = |name: &str| -> Result<u32> {
        rect.get(name)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                FontError::validation(
                    "chars",
                    format!("entry '{}' needs a non-negative integer '{}'", key, name),
                )
            })
    };
    Ok(Glyph {
        x: dim("x")?,
        y: dim("y")?,
        width: dim("width")?,
        height: dim("height")?,
    })
}
