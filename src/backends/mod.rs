//! Theme exporters, one module per output format.
//!
//! Every exporter is a pure `&Theme -> bytes` function. Incomplete input is
//! completed once, at the [`ExportRequest`] boundary, so the exporters only
//! ever see a full 19-slot [`Theme`].

pub mod ansi;
pub mod iterm2;
pub mod json;
pub mod registry;
pub mod shell;
pub mod wezterm;
pub mod winterm;
pub mod xresources;

use std::str::FromStr;

use crate::error::ExportError;
use crate::theme::{Theme, ThemeDraft};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Format {
    Shell,
    Json,
    Xresources,
    Iterm2,
    #[value(name = "winterm", alias = "windows-terminal")]
    WindowsTerminal,
    Wezterm,
    Registry,
    Ansi,
}

impl Format {
    pub const ALL: [Format; 8] = [
        Format::Shell,
        Format::Json,
        Format::Xresources,
        Format::Iterm2,
        Format::WindowsTerminal,
        Format::Wezterm,
        Format::Registry,
        Format::Ansi,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Format::Shell => "shell",
            Format::Json => "json",
            Format::Xresources => "xresources",
            Format::Iterm2 => "iterm2",
            Format::WindowsTerminal => "winterm",
            Format::Wezterm => "wezterm",
            Format::Registry => "registry",
            Format::Ansi => "ansi",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Shell => ".sh",
            Format::Json | Format::WindowsTerminal => ".json",
            Format::Xresources => ".Xresources",
            Format::Iterm2 => ".itermcolors",
            Format::Wezterm => ".lua",
            Format::Registry => ".reg",
            Format::Ansi => ".ansi",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Shell => "text/x-shellscript",
            Format::Json | Format::WindowsTerminal => "application/json",
            Format::Xresources | Format::Registry | Format::Ansi => "text/plain",
            Format::Iterm2 => "application/xml",
            Format::Wezterm => "text/x-lua",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Format::Shell => "POSIX shell variables, optionally applying the colors (mode: vars|apply)",
            Format::Json => "termtint theme JSON (can be loaded back with --theme)",
            Format::Xresources => "X11 resources for xterm, urxvt and friends",
            Format::Iterm2 => "iTerm2 color preset (.itermcolors plist)",
            Format::WindowsTerminal => "Windows Terminal color scheme object",
            Format::Wezterm => "WezTerm Lua color scheme (mode: scheme|config)",
            Format::Registry => "Windows console registry file",
            Format::Ansi => "raw OSC escape sequences; cat it to recolor a terminal",
        }
    }

    /// Serialize a complete theme with header comments. Unknown `mode`
    /// values fall back to the format's default mode.
    pub fn render(self, theme: &Theme, mode: Option<&str>) -> Vec<u8> {
        self.render_with(theme, mode, true)
    }

    /// Like [`Format::render`]; `comments = false` drops the name and usage
    /// comment lines. JSON, Windows Terminal and ANSI output have none.
    pub fn render_with(self, theme: &Theme, mode: Option<&str>, comments: bool) -> Vec<u8> {
        match self {
            Format::Shell => {
                shell::serialize(theme, shell::ShellMode::parse(mode), comments).into_bytes()
            }
            Format::Json => ignore_mode(self, mode, json::serialize(theme)).into_bytes(),
            Format::Xresources => {
                ignore_mode(self, mode, xresources::serialize(theme, comments)).into_bytes()
            }
            Format::Iterm2 => {
                ignore_mode(self, mode, iterm2::serialize(theme, comments)).into_bytes()
            }
            Format::WindowsTerminal => {
                ignore_mode(self, mode, winterm::serialize(theme)).into_bytes()
            }
            Format::Wezterm => {
                wezterm::serialize(theme, wezterm::WeztermMode::parse(mode), comments).into_bytes()
            }
            Format::Registry => {
                ignore_mode(self, mode, registry::serialize(theme, comments)).into_bytes()
            }
            Format::Ansi => ignore_mode(self, mode, ansi::serialize(theme)),
        }
    }

    pub fn artifact(self, theme: &Theme, mode: Option<&str>) -> Artifact {
        self.artifact_with(theme, mode, true)
    }

    pub fn artifact_with(self, theme: &Theme, mode: Option<&str>, comments: bool) -> Artifact {
        Artifact {
            bytes: self.render_with(theme, mode, comments),
            filename: suggested_filename(&theme.name, self.extension()),
            content_type: self.content_type(),
        }
    }
}

fn ignore_mode<T>(format: Format, mode: Option<&str>, output: T) -> T {
    if let Some(mode) = mode {
        log::warn!("format '{}' has no modes, ignoring '{mode}'", format.tag());
    }
    output
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "windows-terminal" {
            return Ok(Format::WindowsTerminal);
        }
        Format::ALL
            .into_iter()
            .find(|f| f.tag() == wanted)
            .ok_or_else(|| ExportError::UnknownFormat(s.to_string()))
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Exported file contents plus what a caller needs to save or serve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

/// A validated export: known format, theme still possibly partial.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: Format,
    pub theme: ThemeDraft,
    pub mode: Option<String>,
    /// Emit header comments (on by default).
    pub comments: bool,
}

impl ExportRequest {
    /// Parse the format tag; fails with [`ExportError::UnknownFormat`].
    pub fn new(format: &str, theme: ThemeDraft, mode: Option<&str>) -> Result<Self, ExportError> {
        Ok(Self {
            format: format.parse()?,
            theme,
            mode: mode.map(str::to_string),
            comments: true,
        })
    }

    pub fn without_comments(mut self) -> Self {
        self.comments = false;
        self
    }

    /// Complete the theme from defaults and run the exporter.
    pub fn export(&self) -> Artifact {
        let (theme, _warnings) = self.theme.complete();
        self.format
            .artifact_with(&theme, self.mode.as_deref(), self.comments)
    }
}

/// Theme name made safe for a filename, plus `extension`.
pub fn suggested_filename(name: &str, extension: &str) -> String {
    let stem = file_stem(name);
    format!("{stem}{extension}")
}

/// Characters outside `[A-Za-z0-9._-]` become `_`; empty names become `theme`.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "theme".to_string()
    } else {
        stem.to_string()
    }
}

/// Free text made safe for a single-line comment.
pub(crate) fn comment_text(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
