use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::backends::Format;
use crate::color::Color;
use crate::pipeline::extract::{ExtractConfig, ExtractMethod};
use crate::theme::Slot;

/// Generate terminal color themes from images, presets or theme files.
#[derive(Parser, Debug)]
#[command(name = "termtint", version, about)]
pub struct Args {
    /// Image to extract the theme from (PNG, JPEG, GIF, BMP, TIFF, WebP)
    #[arg(conflicts_with_all = ["preset", "theme"])]
    pub image: Option<PathBuf>,

    /// Start from a built-in preset (see --list-presets)
    #[arg(long, conflicts_with = "theme")]
    pub preset: Option<String>,

    /// Start from a theme JSON file
    #[arg(long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Theme name (defaults to the image file stem or preset name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Override a slot, e.g. --set red=#ff0000 (repeatable)
    #[arg(long = "set", value_name = "SLOT=#HEX", value_parser = parse_override)]
    pub overrides: Vec<(Slot, Color)>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "shell")]
    pub format: Format,

    /// Format-specific variant (shell: vars|apply, wezterm: scheme|config)
    #[arg(long)]
    pub mode: Option<String>,

    /// Leave the name and usage comment lines out of the export
    #[arg(long)]
    pub no_comments: bool,

    /// Write the export to this file instead of stdout
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Write the export into this directory under a name derived from the theme
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Install the theme as a WezTerm color scheme
    #[arg(long)]
    pub install_wezterm: bool,

    /// Print a colored terminal preview of the theme
    #[arg(long)]
    pub preview: bool,

    /// Edit the theme interactively before exporting
    #[arg(long)]
    pub tui: bool,

    /// Color extraction algorithm
    #[arg(long, value_enum, default_value_t = ExtractMethod::KMeans)]
    pub method: ExtractMethod,

    /// Number of colors to extract
    #[arg(short = 'k', long = "colors", default_value_t = 16)]
    pub colors: usize,

    /// K-means seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// K-means iteration limit
    #[arg(long, default_value_t = 20)]
    pub max_iterations: usize,

    /// List built-in presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// List export formats and exit
    #[arg(long)]
    pub list_formats: bool,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            method: self.method,
            k: self.colors,
            max_iterations: self.max_iterations,
            seed: self.seed,
            ..ExtractConfig::default()
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Parse `SLOT=#HEX`.
pub fn parse_override(s: &str) -> Result<(Slot, Color), String> {
    let (key, hex) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=#HEX, got '{s}'"))?;
    let slot = Slot::from_key(key.trim()).ok_or_else(|| {
        let keys: Vec<&str> = Slot::ALL.iter().map(|slot| slot.key()).collect();
        format!("unknown slot '{key}' (expected one of: {})", keys.join(", "))
    })?;
    let color = Color::from_hex(hex).map_err(|err| err.to_string())?;
    Ok((slot, color))
}
