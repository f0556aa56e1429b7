//! A fixed, simulated terminal session used to preview a theme.
//!
//! Each segment names the slot it is drawn in, so the same session feeds
//! both the plain escape-sequence renderer here and the TUI widget.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::color::Color;
use crate::theme::{Slot, Theme};

/// Text drawn in a slot's color. `Slot::Cursor` segments are drawn as a
/// cursor block (cursor color as background).
pub type Segment = (Slot, &'static str);

/// Columns every preview line is padded to.
pub const WIDTH: usize = 64;

const PROMPT: [Segment; 4] = [
    (Slot::Green, "user@host"),
    (Slot::Foreground, ":"),
    (Slot::Blue, "~/src/termtint"),
    (Slot::Foreground, "$ "),
];

pub const SESSION: &[&[Segment]] = &[
    &[PROMPT[0], PROMPT[1], PROMPT[2], PROMPT[3], (Slot::Foreground, "ls -la")],
    &[(Slot::Foreground, "total 32")],
    &[
        (Slot::Foreground, "drwxr-xr-x  5 user staff  160 Oct 16 09:12 "),
        (Slot::Blue, "src"),
    ],
    &[
        (Slot::Foreground, "-rw-r--r--  1 user staff  612 Oct 16 09:12 "),
        (Slot::Foreground, "Cargo.toml"),
    ],
    &[
        (Slot::Foreground, "-rwxr-xr-x  1 user staff 4096 Oct 16 09:12 "),
        (Slot::Green, "install.sh"),
    ],
    &[
        (Slot::Foreground, "lrwxr-xr-x  1 user staff   12 Oct 16 09:12 "),
        (Slot::Cyan, "latest"),
        (Slot::Foreground, " -> "),
        (Slot::Magenta, "release.tar"),
    ],
    &[PROMPT[0], PROMPT[1], PROMPT[2], PROMPT[3], (Slot::Foreground, "git status")],
    &[(Slot::Foreground, "On branch "), (Slot::BrightCyan, "main")],
    &[(Slot::Foreground, "Changes not staged for commit:")],
    &[(Slot::Red, "        modified:   src/main.rs")],
    &[(Slot::Foreground, "Untracked files:")],
    &[(Slot::BrightRed, "        notes.txt")],
    &[PROMPT[0], PROMPT[1], PROMPT[2], PROMPT[3], (Slot::Foreground, "cargo build")],
    &[
        (Slot::BrightRed, "error[E0308]"),
        (Slot::BrightWhite, ": mismatched types"),
    ],
    &[(Slot::BrightBlue, "  --> "), (Slot::Foreground, "src/main.rs:4:18")],
    &[
        (Slot::Yellow, "warning"),
        (Slot::BrightYellow, ": unused variable: `x`"),
    ],
    &[(Slot::BrightBlack, "# build finished with 1 error, 1 warning")],
    &[PROMPT[0], PROMPT[1], PROMPT[2], PROMPT[3], (Slot::Cursor, " ")],
];

/// Black or white, whichever reads better on `color`.
pub fn label_color(color: Color) -> Color {
    if color.luminance() >= 128.0 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

pub(crate) fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Width of a session line in columns.
pub fn line_width(line: &[Segment]) -> usize {
    line.iter().map(|(_, text)| text.chars().count()).sum()
}

/// Write the session followed by two rows of palette swatches as 24-bit
/// color escape sequences.
pub fn write_ansi<W: Write>(theme: &Theme, out: &mut W) -> io::Result<()> {
    let background = term_color(theme.get(Slot::Background));

    for line in SESSION {
        queue!(out, SetBackgroundColor(background))?;
        for &(slot, text) in line.iter() {
            if slot == Slot::Cursor {
                queue!(
                    out,
                    SetBackgroundColor(term_color(theme.get(Slot::Cursor))),
                    Print(text),
                    SetBackgroundColor(background)
                )?;
            } else {
                queue!(out, SetForegroundColor(term_color(theme.get(slot))), Print(text))?;
            }
        }
        let pad = WIDTH.saturating_sub(line_width(line));
        queue!(out, Print(" ".repeat(pad)), ResetColor, Print("\n"))?;
    }

    for row in Slot::ANSI.chunks(8) {
        for &slot in row {
            let color = theme.get(slot);
            let index = slot.ansi_index().unwrap_or_default();
            queue!(
                out,
                SetBackgroundColor(term_color(color)),
                SetForegroundColor(term_color(label_color(color))),
                Print(format!(" {index:>2}  "))
            )?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;

    fn render(theme: &Theme) -> String {
        let mut buf = Vec::new();
        write_ansi(theme, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn lines_fit_preview_width() {
        for line in SESSION {
            assert!(line_width(line) <= WIDTH, "{line:?}");
        }
    }

    #[test]
    fn uses_theme_colors() {
        let out = render(&default_theme());
        // red (#cd3131) foreground, background #1e1e1e
        assert!(out.contains("\x1b[38;2;205;49;49m"));
        assert!(out.contains("\x1b[48;2;30;30;30m"));
        assert!(out.contains("cargo build"));
    }

    #[test]
    fn one_output_line_per_session_line_plus_swatches() {
        let out = render(&default_theme());
        assert_eq!(out.lines().count(), SESSION.len() + 2);
        assert!(out.contains(" 15  "));
    }

    #[test]
    fn label_color_contrasts() {
        assert_eq!(label_color(Color::WHITE), Color::BLACK);
        assert_eq!(label_color(Color::new(0x1e, 0x1e, 0x1e)), Color::WHITE);
    }
}
