//! The theme's own JSON form, loadable again with `Theme::from_json`.

use crate::theme::Theme;

pub fn serialize(theme: &Theme) -> String {
    let mut out = theme.to_json();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn parses_back_to_same_theme() {
        let theme = presets::find("Dracula").unwrap();
        let out = serialize(&theme);
        assert_eq!(Theme::from_json(&out).unwrap(), theme);
    }

    #[test]
    fn keys_follow_slot_order() {
        let out = serialize(&crate::theme::default_theme());
        let bg = out.find("\"background\"").unwrap();
        let black = out.find("\"black\"").unwrap();
        let bright_white = out.find("\"bright_white\"").unwrap();
        assert!(bg < black && black < bright_white);
    }
}
