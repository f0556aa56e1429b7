use std::fmt::Write;

use crate::theme::{Slot, Theme};

use super::comment_text;

/// Optional `! name` header followed by exactly 19 `*resource: #rrggbb` lines.
pub fn serialize(theme: &Theme, comments: bool) -> String {
    let mut out = String::new();
    if comments {
        let _ = writeln!(out, "! {}", comment_text(&theme.name).trim_end());
    }
    let _ = writeln!(out, "*background: {}", theme.get(Slot::Background));
    let _ = writeln!(out, "*foreground: {}", theme.get(Slot::Foreground));
    let _ = writeln!(out, "*cursorColor: {}", theme.get(Slot::Cursor));
    for (i, color) in theme.ansi().iter().enumerate() {
        let _ = writeln!(out, "*color{i}: {color}");
    }
    out
}
