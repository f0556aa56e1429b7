//! Terminal color themes from images.
//!
//! The pipeline is `decode -> extract -> assign`: an image is reduced to its
//! dominant colors, which are mapped onto the 19 slots of a [`Theme`]. Themes
//! (extracted, preset or hand-edited) export to a handful of terminal formats
//! through [`backends::Format`].

pub mod backends;
pub mod cli;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod presets;
pub mod preview;
pub mod theme;
pub mod tui;

use backends::{Artifact, ExportRequest};
use error::{DecodeError, ExportError};
use pipeline::extract::ExtractConfig;
use theme::{Theme, ThemeDraft, DEFAULT_NAME};

/// Extract a theme from encoded image bytes with default settings.
pub fn extract_theme(bytes: &[u8]) -> Result<Theme, DecodeError> {
    extract_theme_with(bytes, &ExtractConfig::default(), DEFAULT_NAME)
}

pub fn extract_theme_with(
    bytes: &[u8],
    config: &ExtractConfig,
    name: &str,
) -> Result<Theme, DecodeError> {
    let pixels = pipeline::decode::decode(bytes, config.max_dimension)?;
    let colors = pipeline::extract::extract_colors(&pixels, config);
    Ok(pipeline::assign::assign_slots(&colors, name))
}

/// Export a possibly partial theme. Missing or invalid slots are filled
/// from the default theme; only an unknown format is an error.
pub fn export_theme(
    theme: &ThemeDraft,
    format: &str,
    mode: Option<&str>,
) -> Result<Artifact, ExportError> {
    Ok(ExportRequest::new(format, theme.clone(), mode)?.export())
}
