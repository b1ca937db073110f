// src/error.rs

//! Error type shared by descriptor loading, atlas building and rendering.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    /// The descriptor or the atlas image could not be located.
    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// The descriptor is not valid JSON once comments are stripped.
    #[error("invalid JSON in font descriptor {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The descriptor parsed but a required field is missing or malformed.
    #[error("invalid font descriptor field '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    /// The caller asked for something the font cannot honour, such as
    /// rendering in the colorkey color.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error for {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl FontError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        FontError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FontError>;
