use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ThemeError;

pub const DEFAULT_NAME: &str = "My New Theme";

/// The 19 fixed color keys of a terminal theme, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Background,
    Foreground,
    Cursor,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Slot {
    pub const ALL: [Slot; 19] = [
        Slot::Background,
        Slot::Foreground,
        Slot::Cursor,
        Slot::Black,
        Slot::Red,
        Slot::Green,
        Slot::Yellow,
        Slot::Blue,
        Slot::Magenta,
        Slot::Cyan,
        Slot::White,
        Slot::BrightBlack,
        Slot::BrightRed,
        Slot::BrightGreen,
        Slot::BrightYellow,
        Slot::BrightBlue,
        Slot::BrightMagenta,
        Slot::BrightCyan,
        Slot::BrightWhite,
    ];

    /// ANSI slots in palette order: index `i` here is palette color `i`.
    pub const ANSI: [Slot; 16] = [
        Slot::Black,
        Slot::Red,
        Slot::Green,
        Slot::Yellow,
        Slot::Blue,
        Slot::Magenta,
        Slot::Cyan,
        Slot::White,
        Slot::BrightBlack,
        Slot::BrightRed,
        Slot::BrightGreen,
        Slot::BrightYellow,
        Slot::BrightBlue,
        Slot::BrightMagenta,
        Slot::BrightCyan,
        Slot::BrightWhite,
    ];

    /// The eight base colors, which is also the hue-matching tie-break order.
    pub const BASE: [Slot; 8] = [
        Slot::Black,
        Slot::Red,
        Slot::Green,
        Slot::Yellow,
        Slot::Blue,
        Slot::Magenta,
        Slot::Cyan,
        Slot::White,
    ];

    /// The snake_case key used in theme JSON.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Background => "background",
            Slot::Foreground => "foreground",
            Slot::Cursor => "cursor",
            Slot::Black => "black",
            Slot::Red => "red",
            Slot::Green => "green",
            Slot::Yellow => "yellow",
            Slot::Blue => "blue",
            Slot::Magenta => "magenta",
            Slot::Cyan => "cyan",
            Slot::White => "white",
            Slot::BrightBlack => "bright_black",
            Slot::BrightRed => "bright_red",
            Slot::BrightGreen => "bright_green",
            Slot::BrightYellow => "bright_yellow",
            Slot::BrightBlue => "bright_blue",
            Slot::BrightMagenta => "bright_magenta",
            Slot::BrightCyan => "bright_cyan",
            Slot::BrightWhite => "bright_white",
        }
    }

    pub fn from_key(key: &str) -> Option<Slot> {
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        Slot::ALL.into_iter().find(|slot| slot.key() == key)
    }

    /// Palette index 0..=15 for ANSI slots, `None` for background/foreground/cursor.
    pub fn ansi_index(self) -> Option<usize> {
        Slot::ANSI.iter().position(|&s| s == self)
    }

    /// The bright counterpart of a base slot.
    pub fn bright(self) -> Option<Slot> {
        Slot::BASE
            .iter()
            .position(|&s| s == self)
            .map(|i| Slot::ANSI[i + 8])
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A complete 19-slot terminal theme.
///
/// Every slot always holds a color; partial input goes through
/// [`ThemeDraft::complete`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    colors: [Color; 19],
}

impl Theme {
    /// Build a theme from an exhaustive slot lookup.
    pub fn from_fn(name: impl Into<String>, mut color_of: impl FnMut(Slot) -> Color) -> Self {
        let mut colors = [Color::BLACK; 19];
        for slot in Slot::ALL {
            colors[slot.position()] = color_of(slot);
        }
        Self {
            name: name.into(),
            colors,
        }
    }

    pub fn get(&self, slot: Slot) -> Color {
        self.colors[slot.position()]
    }

    pub fn set(&mut self, slot: Slot, color: Color) {
        self.colors[slot.position()] = color;
    }

    /// Slots and colors in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Color)> + '_ {
        Slot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    /// The 16 ANSI colors in palette order.
    pub fn ansi(&self) -> [Color; 16] {
        Slot::ANSI.map(|slot| self.get(slot))
    }

    pub fn to_draft(&self) -> ThemeDraft {
        ThemeDraft {
            name: Some(self.name.clone()),
            colors: self
                .iter()
                .map(|(slot, color)| {
                    (
                        slot.key().to_string(),
                        serde_json::Value::String(color.to_hex()),
                    )
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings into a map cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Theme, ThemeError> {
        let draft: ThemeDraft = serde_json::from_str(json)?;
        Ok(draft.complete().0)
    }

    pub fn load_json(path: &Path) -> Result<Theme, ThemeError> {
        let json = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Theme::from_json(&json)
    }

    pub fn save_json(&self, path: &Path) -> Result<(), ThemeError> {
        let mut json = self.to_json();
        json.push('\n');
        std::fs::write(path, json).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

struct ColorsRef<'a>(&'a Theme);

impl Serialize for ColorsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Slot::ALL.len()))?;
        for (slot, color) in self.0.iter() {
            map.serialize_entry(slot.key(), &color.to_hex())?;
        }
        map.end()
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("colors", &ColorsRef(self))?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ThemeDraft::deserialize(deserializer)?.complete().0)
    }
}

/// A non-fatal problem found while completing a [`ThemeDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeWarning {
    Missing(Slot),
    Invalid { slot: Slot, value: String },
}

impl std::fmt::Display for ThemeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeWarning::Missing(slot) => {
                write!(f, "theme is missing '{slot}', using default")
            }
            ThemeWarning::Invalid { slot, value } => {
                write!(f, "theme has invalid '{slot}' value '{value}', using default")
            }
        }
    }
}

/// A theme as it arrives from outside: possibly partial, possibly invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDraft {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_colors")]
    pub colors: BTreeMap<String, serde_json::Value>,
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(name)) => Ok(Some(name)),
        None => Ok(None),
        Some(other) => {
            log::warn!("theme name must be a string, got {other}; using default");
            Ok(None)
        }
    }
}

/// A `colors` member that is null or not an object counts as empty.
fn lenient_colors<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, serde_json::Value>, D::Error> {
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Object(colors)) => Ok(colors.into_iter().collect()),
        None => {
            log::warn!("theme colors are null, using defaults");
            Ok(BTreeMap::new())
        }
        Some(other) => {
            log::warn!("theme colors must be an object, got {other}; using defaults");
            Ok(BTreeMap::new())
        }
    }
}

impl ThemeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            colors: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, hex: impl Into<String>) -> Self {
        self.colors
            .insert(key.into(), serde_json::Value::String(hex.into()));
        self
    }

    /// Complete-or-default normalization.
    ///
    /// Valid values are kept (normalized to lowercase); missing or invalid
    /// ones take the default theme's value. Keys that name no slot are
    /// ignored. Every substitution is logged and returned.
    pub fn complete(&self) -> (Theme, Vec<ThemeWarning>) {
        let mut found: BTreeMap<Slot, &serde_json::Value> = BTreeMap::new();
        for (key, value) in &self.colors {
            match Slot::from_key(key) {
                // null is the same as absent
                Some(_) if value.is_null() => {}
                Some(slot) => {
                    found.insert(slot, value);
                }
                None => log::debug!("ignoring unknown theme key '{key}'"),
            }
        }

        let defaults = default_theme();
        let mut warnings = Vec::new();
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_NAME.to_string(),
        };
        let theme = Theme::from_fn(name, |slot| match found.get(&slot) {
            Some(value) => match value.as_str().map(Color::from_hex) {
                Some(Ok(color)) => color,
                _ => {
                    let value = match value.as_str() {
                        Some(s) => s.to_string(),
                        None => value.to_string(),
                    };
                    warnings.push(ThemeWarning::Invalid { slot, value });
                    defaults.get(slot)
                }
            },
            None => {
                warnings.push(ThemeWarning::Missing(slot));
                defaults.get(slot)
            }
        });

        for warning in &warnings {
            log::warn!("{warning}");
        }
        (theme, warnings)
    }
}

impl From<&Theme> for ThemeDraft {
    fn from(theme: &Theme) -> Self {
        theme.to_draft()
    }
}

/// Build a theme from 19 hex literals in canonical slot order.
///
/// Only used for compile-time tables (default theme, presets).
pub(crate) fn theme_from_table(name: &str, hexes: [&str; 19]) -> Theme {
    Theme::from_fn(name, |slot| {
        Color::from_hex(hexes[slot.position()]).unwrap_or(Color::BLACK)
    })
}

/// The built-in fallback theme.
pub fn default_theme() -> Theme {
    theme_from_table(
        DEFAULT_NAME,
        [
            "#1e1e1e", "#d4d4d4", "#ffffff", "#000000", "#cd3131", "#0dbc79", "#e5e510",
            "#2472c8", "#bc3fbc", "#11a8cd", "#e5e5e5", "#666666", "#f14c4c", "#23d18b",
            "#f5f543", "#3b8eea", "#d670d6", "#29b8db", "#e5e5e5",
        ],
    )
}
