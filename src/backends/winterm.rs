//! Windows Terminal color scheme, ready to paste into `settings.json`'s
//! `schemes` array.

use serde::Serialize;

use crate::theme::{Slot, Theme};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Scheme<'a> {
    name: &'a str,
    background: String,
    foreground: String,
    cursor_color: String,
    selection_background: String,
    black: String,
    red: String,
    green: String,
    yellow: String,
    blue: String,
    purple: String,
    cyan: String,
    white: String,
    bright_black: String,
    bright_red: String,
    bright_green: String,
    bright_yellow: String,
    bright_blue: String,
    bright_purple: String,
    bright_cyan: String,
    bright_white: String,
}

impl<'a> From<&'a Theme> for Scheme<'a> {
    fn from(theme: &'a Theme) -> Self {
        let hex = |slot| theme.get(slot).to_hex();
        Self {
            name: &theme.name,
            background: hex(Slot::Background),
            foreground: hex(Slot::Foreground),
            cursor_color: hex(Slot::Cursor),
            selection_background: hex(Slot::BrightBlack),
            black: hex(Slot::Black),
            red: hex(Slot::Red),
            green: hex(Slot::Green),
            yellow: hex(Slot::Yellow),
            blue: hex(Slot::Blue),
            purple: hex(Slot::Magenta),
            cyan: hex(Slot::Cyan),
            white: hex(Slot::White),
            bright_black: hex(Slot::BrightBlack),
            bright_red: hex(Slot::BrightRed),
            bright_green: hex(Slot::BrightGreen),
            bright_yellow: hex(Slot::BrightYellow),
            bright_blue: hex(Slot::BrightBlue),
            bright_purple: hex(Slot::BrightMagenta),
            bright_cyan: hex(Slot::BrightCyan),
            bright_white: hex(Slot::BrightWhite),
        }
    }
}

pub fn serialize(theme: &Theme) -> String {
    let mut out = serde_json::to_string_pretty(&Scheme::from(theme)).unwrap_or_default();
    out.push('\n');
    out
}
