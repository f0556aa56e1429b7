//! iTerm2 `.itermcolors` presets: an XML property list of sRGB components.

use std::fmt::Write;

use crate::color::Color;
use crate::theme::{Slot, Theme};

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
"#;

/// Escape text for XML element content and comments.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

fn component(value: u8) -> f64 {
    f64::from(value) / 255.0
}

fn write_entry(out: &mut String, key: &str, color: Color) {
    let _ = writeln!(out, "\t<key>{key}</key>");
    out.push_str("\t<dict>\n");
    out.push_str("\t\t<key>Alpha Component</key>\n\t\t<real>1</real>\n");
    let _ = writeln!(
        out,
        "\t\t<key>Blue Component</key>\n\t\t<real>{}</real>",
        component(color.b)
    );
    out.push_str("\t\t<key>Color Space</key>\n\t\t<string>sRGB</string>\n");
    let _ = writeln!(
        out,
        "\t\t<key>Green Component</key>\n\t\t<real>{}</real>",
        component(color.g)
    );
    let _ = writeln!(
        out,
        "\t\t<key>Red Component</key>\n\t\t<real>{}</real>",
        component(color.r)
    );
    out.push_str("\t</dict>\n");
}

pub fn serialize(theme: &Theme, comments: bool) -> String {
    let mut out = String::from(HEADER);
    if comments {
        // "--" is not allowed inside an XML comment.
        let name = xml_escape(&theme.name).replace("--", "- -");
        let _ = writeln!(out, "\t<!-- {name} -->");
    }

    for (i, color) in theme.ansi().iter().enumerate() {
        write_entry(&mut out, &format!("Ansi {i} Color"), *color);
    }
    let background = theme.get(Slot::Background);
    let foreground = theme.get(Slot::Foreground);
    write_entry(&mut out, "Background Color", background);
    write_entry(&mut out, "Bold Color", foreground);
    write_entry(&mut out, "Cursor Color", theme.get(Slot::Cursor));
    write_entry(&mut out, "Cursor Text Color", background);
    write_entry(&mut out, "Foreground Color", foreground);
    write_entry(&mut out, "Selected Text Color", foreground);
    write_entry(&mut out, "Selection Color", theme.get(Slot::BrightBlack));

    out.push_str("</dict>\n</plist>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;
    use regex::Regex;

    /// Pull `(key, r, g, b)` back out of the plist.
    fn entries(plist: &str) -> Vec<(String, Color)> {
        let re = Regex::new(
            r"<key>([^<]+)</key>\s*<dict>\s*<key>Alpha Component</key>\s*<real>1</real>\s*<key>Blue Component</key>\s*<real>([0-9.e-]+)</real>\s*<key>Color Space</key>\s*<string>sRGB</string>\s*<key>Green Component</key>\s*<real>([0-9.e-]+)</real>\s*<key>Red Component</key>\s*<real>([0-9.e-]+)</real>",
        )
        .unwrap();
        let channel = |s: &str| (s.parse::<f64>().unwrap() * 255.0).round() as u8;
        re.captures_iter(plist)
            .map(|cap| {
                (
                    cap[1].to_string(),
                    Color::new(channel(&cap[4]), channel(&cap[3]), channel(&cap[2])),
                )
            })
            .collect()
    }

    #[test]
    fn contains_all_ansi_and_special_entries() {
        let theme = default_theme();
        let parsed = entries(&serialize(&theme, true));
        assert_eq!(parsed.len(), 23);
        for (i, color) in theme.ansi().iter().enumerate() {
            assert_eq!(parsed[i], (format!("Ansi {i} Color"), *color));
        }
        let lookup = |key: &str| parsed.iter().find(|(k, _)| k == key).unwrap().1;
        assert_eq!(lookup("Background Color"), theme.get(Slot::Background));
        assert_eq!(lookup("Foreground Color"), theme.get(Slot::Foreground));
        assert_eq!(lookup("Cursor Color"), theme.get(Slot::Cursor));
    }

    #[test]
    fn is_wellformed_plist_shell() {
        let out = serialize(&default_theme(), true);
        assert!(out.starts_with("<?xml version=\"1.0\""));
        assert!(out.trim_end().ends_with("</plist>"));
        assert_eq!(out.matches("<dict>").count(), out.matches("</dict>").count());
    }

    #[test]
    fn name_is_escaped() {
        let mut theme = default_theme();
        theme.name = "a <b> & -- c".to_string();
        let out = serialize(&theme, true);
        assert!(out.contains("<!-- a &lt;b&gt; &amp; - - c -->"));
    }

    #[test]
    fn without_comments_has_no_xml_comment() {
        let theme = default_theme();
        let out = serialize(&theme, false);
        assert!(!out.contains("<!--"));
        assert_eq!(entries(&out), entries(&serialize(&theme, true)));
    }
}
