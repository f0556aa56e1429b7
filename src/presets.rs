//! Built-in named themes.

use crate::theme::{default_theme, theme_from_table, Theme};

/// Names of the built-in presets, in display order.
pub const NAMES: [&str; 8] = [
    "My New Theme",
    "Tokyo Night",
    "Solarized Dark",
    "Solarized Light",
    "Dracula",
    "Monokai",
    "Nord",
    "Ocean",
];

/// Look up a preset by name.
///
/// Case-insensitive, and spaces, hyphens and underscores are ignored, so
/// `tokyo-night` and `TokyoNight` both find "Tokyo Night". `default` is an
/// alias for the default theme.
pub fn find(name: &str) -> Option<Theme> {
    let wanted = fold(name);
    if wanted == "default" {
        return Some(default_theme());
    }
    NAMES
        .iter()
        .find(|candidate| fold(candidate) == wanted)
        .map(|&name| build(name))
}

/// All presets in display order.
pub fn all() -> Vec<Theme> {
    NAMES.iter().map(|&name| build(name)).collect()
}

fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// Columns: background, foreground, cursor, then the 16 ANSI colors.
fn build(name: &str) -> Theme {
    match name {
        "Tokyo Night" => theme_from_table(
            name,
            [
                "#1a1b26", "#a9b1d6", "#ffffff", "#1a1b26", "#f7768e", "#9ece6a", "#e0af68",
                "#7aa2f7", "#bb9af7", "#7dcfff", "#a9b1d6", "#414868", "#f7768e", "#9ece6a",
                "#e0af68", "#7aa2f7", "#bb9af7", "#7dcfff", "#c0caf5",
            ],
        ),
        "Solarized Dark" => theme_from_table(
            name,
            [
                "#002b36", "#839496", "#ffffff", "#073642", "#dc322f", "#586e75", "#657b83",
                "#268bd2", "#d33682", "#2aa198", "#839496", "#002b36", "#cb4b16", "#93a1a1",
                "#839496", "#6c71c4", "#dc322f", "#2aa198", "#fdf6e3",
            ],
        ),
        "Solarized Light" => theme_from_table(
            name,
            [
                "#fdf6e3", "#657b83", "#268bd2", "#073642", "#dc322f", "#586e75", "#657b83",
                "#268bd2", "#d33682", "#2aa198", "#fdf6e3", "#002b36", "#cb4b16", "#93a1a1",
                "#839496", "#6c71c4", "#dc322f", "#2aa198", "#fdf6e3",
            ],
        ),
        "Dracula" => theme_from_table(
            name,
            [
                "#282a36", "#f8f8f2", "#f8f8f2", "#21222c", "#ff5555", "#50fa7b", "#f1fa8c",
                "#bd93f9", "#ff79c6", "#8be9fd", "#f8f8f2", "#6272a4", "#ff5555", "#50fa7b",
                "#f1fa8c", "#bd93f9", "#ff79c6", "#8be9fd", "#f8f8f2",
            ],
        ),
        "Monokai" => theme_from_table(
            name,
            [
                "#272822", "#f8f8f2", "#f8f8f2", "#272822", "#f92672", "#a6e22e", "#f4bf75",
                "#66d9ef", "#ae81ff", "#a1efe4", "#f8f8f2", "#75715e", "#f92672", "#a6e22e",
                "#f4bf75", "#66d9ef", "#ae81ff", "#a1efe4", "#f8f8f2",
            ],
        ),
        "Nord" => theme_from_table(
            name,
            [
                "#2e3440", "#d8dee9", "#d8dee9", "#2e3440", "#bf616a", "#a3be8c", "#ebcb8b",
                "#81a1c1", "#b48ead", "#88c0d0", "#d8dee9", "#4c566a", "#bf616a", "#a3be8c",
                "#ebcb8b", "#81a1c1", "#b48ead", "#88c0d0", "#eceff4",
            ],
        ),
        "Ocean" => theme_from_table(
            name,
            [
                "#001b33", "#76c4de", "#76c4de", "#001b33", "#ff5458", "#62d196", "#ffd866",
                "#65b7ff", "#c297ff", "#6ae4e4", "#76c4de", "#003366", "#ff5458", "#62d196",
                "#ffd866", "#65b7ff", "#c297ff", "#6ae4e4", "#c8e6ff",
            ],
        ),
        _ => default_theme(),
    }
}
