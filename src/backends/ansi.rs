//! Raw OSC escape sequences. `cat theme.ansi` recolors the running terminal.

use crate::color::Color;
use crate::theme::{Slot, Theme};

const ST: &str = "\x1b\\";

/// X11 `rgb:rr/gg/bb` color string used by OSC 4/10/11/12.
pub(crate) fn x11_rgb(color: Color) -> String {
    format!("rgb:{:02x}/{:02x}/{:02x}", color.r, color.g, color.b)
}

/// OSC bodies (without `ESC ]` and terminator) setting every palette entry,
/// then foreground, background and cursor.
pub(crate) fn osc_bodies(theme: &Theme) -> Vec<String> {
    let mut bodies: Vec<String> = theme
        .ansi()
        .iter()
        .enumerate()
        .map(|(i, &c)| format!("4;{i};{}", x11_rgb(c)))
        .collect();
    bodies.push(format!("10;{}", x11_rgb(theme.get(Slot::Foreground))));
    bodies.push(format!("11;{}", x11_rgb(theme.get(Slot::Background))));
    bodies.push(format!("12;{}", x11_rgb(theme.get(Slot::Cursor))));
    bodies
}

pub fn serialize(theme: &Theme) -> Vec<u8> {
    osc_bodies(theme)
        .iter()
        .map(|body| format!("\x1b]{body}{ST}"))
        .collect::<String>()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;

    #[test]
    fn x11_spec_is_lowercase_pairs() {
        assert_eq!(x11_rgb(Color::new(0xAB, 0x01, 0xff)), "rgb:ab/01/ff");
    }

    #[test]
    fn emits_nineteen_sequences() {
        let out = String::from_utf8(serialize(&default_theme())).unwrap();
        assert_eq!(out.matches("\x1b]").count(), 19);
        assert_eq!(out.matches(ST).count(), 19);
        assert!(out.starts_with("\x1b]4;0;rgb:00/00/00\x1b\\"));
        assert!(out.contains("\x1b]4;1;rgb:cd/31/31\x1b\\"));
        assert!(out.contains("\x1b]11;rgb:1e/1e/1e\x1b\\"));
        assert!(out.ends_with("\x1b]12;rgb:ff/ff/ff\x1b\\"));
    }
}
