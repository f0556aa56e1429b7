use crate::color::Color;

/// Minimum luminance gap (0..=255 scale) between background and foreground.
pub const MIN_LUMINANCE_GAP: f32 = 100.0;

/// The light gray a too-dim foreground is pulled toward (default foreground).
pub const LIGHT_GRAY: Color = Color::new(0xd4, 0xd4, 0xd4);

const STEPS: u8 = 10;

fn gap(background: Color, foreground: Color) -> f32 {
    foreground.luminance() - background.luminance()
}

/// Make `foreground` readable on `background`.
///
/// First the foreground is mixed toward [`LIGHT_GRAY`] (only when it is
/// dimmer than that gray), then the background toward black, in 10% steps,
/// stopping as soon as the gap reaches [`MIN_LUMINANCE_GAP`]. The result
/// always has `background.luminance() < foreground.luminance()`.
pub fn ensure_readable(background: Color, foreground: Color) -> (Color, Color) {
    if gap(background, foreground) >= MIN_LUMINANCE_GAP {
        return (background, foreground);
    }

    let mut fg = foreground;
    if foreground.luminance() < LIGHT_GRAY.luminance() {
        for step in 1..=STEPS {
            fg = foreground.mix(LIGHT_GRAY, f32::from(step) / f32::from(STEPS));
            if gap(background, fg) >= MIN_LUMINANCE_GAP {
                break;
            }
        }
    }

    let mut bg = background;
    if gap(bg, fg) < MIN_LUMINANCE_GAP {
        for step in 1..=STEPS {
            bg = background.mix(Color::BLACK, f32::from(step) / f32::from(STEPS));
            if gap(bg, fg) >= MIN_LUMINANCE_GAP {
                break;
            }
        }
    }

    log::debug!("low contrast {background}/{foreground} adjusted to {bg}/{fg}");
    (bg, fg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_pair_is_untouched() {
        let bg = Color::new(0x1e, 0x1e, 0x1e);
        let fg = Color::new(0xd4, 0xd4, 0xd4);
        assert_eq!(ensure_readable(bg, fg), (bg, fg));
    }

    #[test]
    fn dim_foreground_moves_toward_gray() {
        let bg = Color::new(20, 20, 40);
        let fg = Color::new(60, 60, 80);
        let (new_bg, new_fg) = ensure_readable(bg, fg);
        assert_eq!(new_bg, bg, "background should not need to change");
        assert!(new_fg.luminance() - new_bg.luminance() >= MIN_LUMINANCE_GAP);
    }

    #[test]
    fn identical_colors_get_separated() {
        let red = Color::new(255, 0, 0);
        let (bg, fg) = ensure_readable(red, red);
        assert_ne!(bg, fg);
        assert!(fg.luminance() - bg.luminance() >= MIN_LUMINANCE_GAP);
    }

    #[test]
    fn white_on_white_darkens_background() {
        let (bg, fg) = ensure_readable(Color::WHITE, Color::WHITE);
        assert_eq!(fg, Color::WHITE);
        assert!(bg.luminance() < fg.luminance());
        assert!(fg.luminance() - bg.luminance() >= MIN_LUMINANCE_GAP);
    }

    #[test]
    fn gap_always_met_across_grid() {
        let levels = [0u8, 40, 90, 128, 170, 212, 255];
        for &a in &levels {
            for &b in &levels {
                for &c in &levels {
                    let bg = Color::new(a, b, c);
                    let fg = Color::new(c, a, b);
                    let (new_bg, new_fg) = ensure_readable(bg, fg);
                    assert!(
                        new_fg.luminance() - new_bg.luminance() >= MIN_LUMINANCE_GAP,
                        "{bg}/{fg} -> {new_bg}/{new_fg}"
                    );
                }
            }
        }
    }
}
