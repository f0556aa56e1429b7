//! Windows console (conhost) colors as a `.reg` file.
//!
//! The console has no free-form background or foreground; they are mapped
//! to the nearest palette entries through `ScreenColors`.

use std::fmt::Write;

use crate::color::Color;
use crate::theme::{Slot, Theme};

use super::comment_text;

/// Registry `dword` for a color: `00bbggrr`.
pub fn dword(color: Color) -> String {
    format!("{:02x}{:02x}{:02x}{:02x}", 0, color.b, color.g, color.r)
}

/// Registry key component: backslashes and brackets are not allowed.
pub fn key_name(name: &str) -> String {
    let key: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '\\' | '[' | ']' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if key.is_empty() {
        "termtint".to_string()
    } else {
        key
    }
}

fn nearest_index(palette: &[Color; 16], target: Color, skip: Option<usize>) -> usize {
    palette
        .iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != skip)
        .min_by_key(|&(_, &c)| c.distance_sq(target))
        .map_or(0, |(i, _)| i)
}

/// `ScreenColors` value: background index in the high nibble.
pub fn screen_colors(theme: &Theme) -> u8 {
    let palette = theme.ansi();
    let bg = nearest_index(&palette, theme.get(Slot::Background), None);
    let fg = nearest_index(&palette, theme.get(Slot::Foreground), Some(bg));
    ((bg as u8) << 4) | fg as u8
}

pub fn serialize(theme: &Theme, comments: bool) -> String {
    let mut out = String::from("Windows Registry Editor Version 5.00\r\n\r\n");
    if comments {
        let _ = write!(out, "; {}\r\n", comment_text(&theme.name));
        let _ = write!(
            out,
            "; background {}, foreground {}, cursor {}\r\n\r\n",
            theme.get(Slot::Background),
            theme.get(Slot::Foreground),
            theme.get(Slot::Cursor)
        );
    }
    let _ = write!(out, "[HKEY_CURRENT_USER\\Console\\{}]\r\n", key_name(&theme.name));
    for (i, color) in theme.ansi().iter().enumerate() {
        let _ = write!(out, "\"ColorTable{i:02}\"=dword:{}\r\n", dword(*color));
    }
    let _ = write!(out, "\"ScreenColors\"=dword:{:08x}\r\n", screen_colors(theme));
    out
}
