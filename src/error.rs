use std::path::PathBuf;

use thiserror::Error;

/// A single hex color value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color '{value}': expected 6 hex digits, got {len}")]
    InvalidLength { value: String, len: usize },
    #[error("invalid hex color '{value}': non-hex digit")]
    InvalidDigit { value: String },
}

/// The input could not be turned into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(
        "unsupported or corrupt image ({reason}). Supported formats: PNG, JPEG, GIF, BMP, TIFF, WebP"
    )]
    UnsupportedFormat { reason: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A theme JSON file could not be read at all.
///
/// Missing or malformed color values are not errors; they are completed
/// from the default theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to parse theme JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to access theme file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}' (expected one of: shell, json, xresources, iterm2, winterm, wezterm, registry, ansi)")]
    UnknownFormat(String),
}
