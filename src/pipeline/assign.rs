use crate::color::Color;
use crate::pipeline::contrast::ensure_readable;
use crate::pipeline::extract::ExtractedColor;
use crate::theme::{default_theme, Slot, Theme};

/// Colors below this HSV saturation are treated as neutral (black/white).
pub const NEUTRAL_SATURATION: f32 = 0.25;
/// Colors below this HSV value are too dark for their hue to read.
pub const NEUTRAL_VALUE: f32 = 0.2;
/// How far (in degrees) an empty slot may reach for a leftover color.
pub const FALLBACK_HUE_WINDOW: f32 = 45.0;
/// Bright variants are their base color mixed this far toward white.
pub const BRIGHT_FACTOR: f32 = 0.25;

const DARK_FALLBACK_MAX: f32 = 80.0;
const LIGHT_FALLBACK_MIN: f32 = 170.0;

/// Canonical hue for each chromatic base slot.
fn anchor(slot: Slot) -> Option<f32> {
    match slot {
        Slot::Red => Some(0.0),
        Slot::Yellow => Some(60.0),
        Slot::Green => Some(120.0),
        Slot::Cyan => Some(180.0),
        Slot::Blue => Some(240.0),
        Slot::Magenta => Some(300.0),
        _ => None,
    }
}

fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn is_neutral(color: Color) -> bool {
    let hsv = color.to_hsv();
    hsv.saturation < NEUTRAL_SATURATION || hsv.value < NEUTRAL_VALUE
}

/// The chromatic base slot whose anchor is closest to `hue`.
///
/// Equal distances resolve to the slot listed first in [`Slot::BASE`].
pub fn nearest_hue_slot(hue: f32) -> Slot {
    let mut best = Slot::Red;
    let mut best_distance = f32::MAX;
    for slot in Slot::BASE {
        if let Some(anchor) = anchor(slot) {
            let distance = hue_distance(hue, anchor);
            if distance < best_distance {
                best = slot;
                best_distance = distance;
            }
        }
    }
    best
}

/// The base slot a color naturally belongs to.
pub fn classify(color: Color) -> Slot {
    if is_neutral(color) {
        if color.luminance() < 128.0 {
            Slot::Black
        } else {
            Slot::White
        }
    } else {
        nearest_hue_slot(color.hue())
    }
}

/// Index of the darkest color and of the lightest remaining one.
/// Ties go to the better-ranked (earlier) color.
fn pick_background_foreground(colors: &[Color]) -> (usize, Option<usize>) {
    let mut bg = 0;
    for (i, color) in colors.iter().enumerate() {
        if color.luminance() < colors[bg].luminance() {
            bg = i;
        }
    }

    let mut fg: Option<usize> = None;
    for (i, color) in colors.iter().enumerate() {
        if i == bg {
            continue;
        }
        match fg {
            Some(best) if color.luminance() <= colors[best].luminance() => {}
            _ => fg = Some(i),
        }
    }
    (bg, fg)
}

/// Second chance for a slot nothing was classified into.
fn fallback_pick(slot: Slot, colors: &[Color], used: &[bool]) -> Option<usize> {
    let unused = move || {
        colors
            .iter()
            .enumerate()
            .filter(move |&(i, _)| !used[i])
            .map(|(i, &c)| (i, c))
    };
    match slot {
        Slot::Black => unused()
            .filter(|(_, c)| c.luminance() < DARK_FALLBACK_MAX)
            .fold(None, |best: Option<(usize, Color)>, (i, c)| match best {
                Some((_, b)) if b.luminance() <= c.luminance() => best,
                _ => Some((i, c)),
            })
            .map(|(i, _)| i),
        Slot::White => unused()
            .filter(|(_, c)| c.luminance() > LIGHT_FALLBACK_MIN)
            .fold(None, |best: Option<(usize, Color)>, (i, c)| match best {
                Some((_, b)) if b.luminance() >= c.luminance() => best,
                _ => Some((i, c)),
            })
            .map(|(i, _)| i),
        _ => {
            let target = anchor(slot)?;
            unused()
                .find(|&(_, c)| {
                    !is_neutral(c) && hue_distance(c.hue(), target) <= FALLBACK_HUE_WINDOW
                })
                .map(|(i, _)| i)
        }
    }
}

/// Map ranked extracted colors onto a complete 19-slot theme.
///
/// Background is the darkest color and foreground the lightest of the rest,
/// adjusted for readability. The remaining colors fill the eight base slots
/// by hue (best rank wins), leftovers get a second chance within
/// [`FALLBACK_HUE_WINDOW`], and anything still empty takes the default
/// theme's color. Bright slots are derived from their base color and the
/// cursor follows the foreground.
pub fn assign_slots(ranked: &[ExtractedColor], name: &str) -> Theme {
    let defaults = default_theme();
    let colors: Vec<Color> = ranked.iter().map(|c| c.color).collect();
    if colors.is_empty() {
        log::warn!("no extracted colors, using the default theme");
        let mut theme = defaults;
        theme.name = name.to_string();
        return theme;
    }

    let (bg_index, fg_index) = pick_background_foreground(&colors);
    let mut used = vec![false; colors.len()];
    used[bg_index] = true;
    let fg_candidate = match fg_index {
        Some(i) => {
            used[i] = true;
            colors[i]
        }
        None => colors[bg_index],
    };
    let (background, foreground) = ensure_readable(colors[bg_index], fg_candidate);

    let mut base: [Option<Color>; 8] = [None; 8];
    for (i, &color) in colors.iter().enumerate() {
        if used[i] {
            continue;
        }
        let slot = classify(color);
        if let Some(pos) = Slot::BASE.iter().position(|&s| s == slot) {
            if base[pos].is_none() {
                base[pos] = Some(color);
                used[i] = true;
            }
        }
    }

    for (pos, &slot) in Slot::BASE.iter().enumerate() {
        if base[pos].is_some() {
            continue;
        }
        if let Some(i) = fallback_pick(slot, &colors, &used) {
            base[pos] = Some(colors[i]);
            used[i] = true;
        }
    }

    let resolved: [Color; 8] = std::array::from_fn(|pos| {
        base[pos].unwrap_or_else(|| {
            let slot = Slot::BASE[pos];
            log::debug!("no image color fits '{slot}', using default");
            defaults.get(slot)
        })
    });

    Theme::from_fn(name, |slot| match slot {
        Slot::Background => background,
        Slot::Foreground | Slot::Cursor => foreground,
        _ => {
            let index = slot.ansi_index().unwrap_or(0);
            let color = resolved[index % 8];
            if index >= 8 {
                color.brighten(BRIGHT_FACTOR)
            } else {
                color
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(colors: &[Color]) -> Vec<ExtractedColor> {
        let weight = 1.0 / colors.len() as f32;
        colors
            .iter()
            .map(|&color| ExtractedColor { color, weight })
            .collect()
    }

    #[test]
    fn classify_primaries_and_neutrals() {
        assert_eq!(classify(Color::new(255, 0, 0)), Slot::Red);
        assert_eq!(classify(Color::new(0, 200, 0)), Slot::Green);
        assert_eq!(classify(Color::new(230, 230, 20)), Slot::Yellow);
        assert_eq!(classify(Color::new(20, 20, 230)), Slot::Blue);
        assert_eq!(classify(Color::new(200, 30, 200)), Slot::Magenta);
        assert_eq!(classify(Color::new(30, 200, 200)), Slot::Cyan);
        assert_eq!(classify(Color::new(10, 10, 10)), Slot::Black);
        assert_eq!(classify(Color::new(220, 220, 220)), Slot::White);
        // saturated but nearly black
        assert_eq!(classify(Color::new(40, 0, 0)), Slot::Black);
    }

    #[test]
    fn hue_ties_follow_slot_order() {
        assert_eq!(nearest_hue_slot(30.0), Slot::Red);
        assert_eq!(nearest_hue_slot(90.0), Slot::Green);
        assert_eq!(nearest_hue_slot(150.0), Slot::Green);
        assert_eq!(nearest_hue_slot(210.0), Slot::Blue);
        assert_eq!(nearest_hue_slot(270.0), Slot::Blue);
        assert_eq!(nearest_hue_slot(330.0), Slot::Red);
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(nearest_hue_slot(355.0), Slot::Red);
        assert_eq!(nearest_hue_slot(359.9), Slot::Red);
        assert!((hue_distance(350.0, 10.0) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn solid_red_keeps_red() {
        let theme = assign_slots(&ranked(&[Color::new(255, 0, 0); 16]), "red");
        assert_eq!(theme.get(Slot::Red), Color::new(255, 0, 0));
        assert_ne!(theme.get(Slot::Background), theme.get(Slot::Foreground));
        assert!(
            theme.get(Slot::Background).luminance() < theme.get(Slot::Foreground).luminance()
        );
    }

    #[test]
    fn background_is_darkest_and_foreground_lightest() {
        let colors = [
            Color::new(200, 40, 40),
            Color::new(240, 240, 235),
            Color::new(12, 14, 20),
            Color::new(40, 180, 60),
        ];
        let theme = assign_slots(&ranked(&colors), "t");
        assert_eq!(theme.get(Slot::Background), Color::new(12, 14, 20));
        assert_eq!(theme.get(Slot::Foreground), Color::new(240, 240, 235));
        assert_eq!(theme.get(Slot::Cursor), theme.get(Slot::Foreground));
        assert_eq!(theme.get(Slot::Red), Color::new(200, 40, 40));
        assert_eq!(theme.get(Slot::Green), Color::new(40, 180, 60));
    }

    #[test]
    fn colorful_palette_fills_every_slot_from_image() {
        let colors = [
            Color::new(5, 5, 8),
            Color::new(250, 250, 250),
            Color::new(220, 50, 50),
            Color::new(50, 200, 50),
            Color::new(50, 50, 220),
            Color::new(220, 220, 50),
            Color::new(200, 50, 200),
            Color::new(50, 200, 200),
            Color::new(20, 20, 20),
            Color::new(240, 240, 240),
        ];
        let theme = assign_slots(&ranked(&colors), "t");
        assert_eq!(theme.get(Slot::Black), Color::new(20, 20, 20));
        assert_eq!(theme.get(Slot::Red), Color::new(220, 50, 50));
        assert_eq!(theme.get(Slot::Green), Color::new(50, 200, 50));
        assert_eq!(theme.get(Slot::Yellow), Color::new(220, 220, 50));
        assert_eq!(theme.get(Slot::Blue), Color::new(50, 50, 220));
        assert_eq!(theme.get(Slot::Magenta), Color::new(200, 50, 200));
        assert_eq!(theme.get(Slot::Cyan), Color::new(50, 200, 200));
        assert_eq!(theme.get(Slot::White), Color::new(240, 240, 240));
    }

    #[test]
    fn best_ranked_color_wins_a_slot() {
        let colors = [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(180, 30, 30),
            Color::new(250, 10, 10),
        ];
        let theme = assign_slots(&ranked(&colors), "t");
        assert_eq!(theme.get(Slot::Red), Color::new(180, 30, 30));
    }

    #[test]
    fn leftover_color_fills_nearby_empty_slot() {
        // The orange (hue 24) loses red to a better-ranked color and is
        // 36 degrees from yellow's anchor.
        let colors = [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(220, 20, 20),
            Color::new(220, 100, 20),
        ];
        let theme = assign_slots(&ranked(&colors), "t");
        assert_eq!(theme.get(Slot::Red), Color::new(220, 20, 20));
        assert_eq!(theme.get(Slot::Yellow), Color::new(220, 100, 20));
    }

    #[test]
    fn grayscale_falls_back_to_default_hues() {
        let grays: Vec<Color> = [10u8, 40, 90, 140, 200, 240]
            .iter()
            .map(|&v| Color::new(v, v, v))
            .collect();
        let theme = assign_slots(&ranked(&grays), "mono");
        let defaults = default_theme();
        assert_eq!(theme.get(Slot::Black), Color::new(40, 40, 40));
        assert_eq!(theme.get(Slot::White), Color::new(140, 140, 140));
        for slot in [
            Slot::Red,
            Slot::Green,
            Slot::Yellow,
            Slot::Blue,
            Slot::Magenta,
            Slot::Cyan,
        ] {
            assert_eq!(theme.get(slot), defaults.get(slot), "{slot}");
        }
    }

    #[test]
    fn bright_variants_derive_from_base() {
        let colors = [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(200, 40, 40),
        ];
        let theme = assign_slots(&ranked(&colors), "t");
        for (i, &base) in Slot::BASE.iter().enumerate() {
            let bright = Slot::ANSI[i + 8];
            assert_eq!(theme.get(bright), theme.get(base).brighten(BRIGHT_FACTOR));
        }
    }

    #[test]
    fn single_color_is_still_complete_and_readable() {
        let theme = assign_slots(&ranked(&[Color::new(128, 128, 128)]), "one");
        assert!(
            theme.get(Slot::Background).luminance() < theme.get(Slot::Foreground).luminance()
        );
        assert_eq!(theme.name, "one");
    }

    #[test]
    fn empty_input_gives_default_colors() {
        let theme = assign_slots(&[], "empty");
        let mut expected = default_theme();
        expected.name = "empty".to_string();
        assert_eq!(theme, expected);
    }

    #[test]
    fn assignment_is_deterministic() {
        let colors: Vec<Color> = (0..16u8)
            .map(|i| Color::new(i * 15, 255 - i * 13, ((i as u16 * 37) % 255) as u8))
            .collect();
        let a = assign_slots(&ranked(&colors), "d");
        let b = assign_slots(&ranked(&colors), "d");
        assert_eq!(a, b);
    }
}
