use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::preview::{self, SESSION};
use crate::theme::{Slot, Theme};

use super::Channel;

const SLOT_NAMES: [&str; 8] = ["Blk", "Red", "Grn", "Yel", "Blu", "Mag", "Cyn", "Wht"];

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: AppColor) -> Color {
    to_color(preview::label_color(c))
}

fn slot_name(index: usize) -> &'static str {
    SLOT_NAMES[index % 8]
}

/// A widget that renders the 16-color ANSI palette as an 8x2 grid of colored
/// swatches with labels. Highlights the currently selected slot.
pub struct PaletteWidget<'a> {
    theme: &'a Theme,
    selected: Option<Slot>,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(theme: &'a Theme, selected: Option<Slot>) -> Self {
        Self { theme, selected }
    }
}

/// Build a row of colored swatches. Each swatch is 6 chars wide with the slot
/// name centered on the colored background. Selected slot gets bold + underline.
fn build_swatch_row(slots: &[AppColor; 16], start: usize, selected: Option<usize>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (offset, &c) in slots[start..start + 8].iter().enumerate() {
        let i = start + offset;
        let mut style = Style::default().bg(to_color(c)).fg(contrast_fg(c));
        if selected == Some(i) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!("{:^6}", slot_name(i)), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_index_row(start: usize, selected: Option<usize>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for i in start..start + 8 {
        let style = if selected == Some(i) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{i:^6}"), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Palette");
        let inner = block.inner(area);
        block.render(area, buf);

        let slots = self.theme.ansi();
        let selected = self.selected.and_then(Slot::ansi_index);
        let mut lines = vec![
            Line::from("  Normal"),
            build_swatch_row(&slots, 0, selected),
            build_index_row(0, selected),
            Line::from(""),
            Line::from("  Bright"),
            build_swatch_row(&slots, 8, selected),
            build_index_row(8, selected),
        ];

        if let Some(slot) = self.selected {
            let color = self.theme.get(slot);
            let ratio = AppColor::contrast_ratio(&color, &self.theme.get(Slot::Background));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("  {slot}  "),
                    Style::default().bg(to_color(color)).fg(contrast_fg(color)),
                ),
                Span::raw(format!("  {}  contrast {ratio:.1}:1", color.to_hex_upper())),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// The simulated shell session drawn in the theme's colors.
pub struct TerminalPreview<'a> {
    theme: &'a Theme,
}

impl<'a> TerminalPreview<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for TerminalPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = to_color(self.theme.get(Slot::Background));
        let block = Block::bordered()
            .title(format!("Preview: {}", self.theme.name))
            .style(Style::default().bg(background));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = SESSION
            .iter()
            .map(|segments| {
                let spans: Vec<Span> = segments
                    .iter()
                    .map(|&(slot, text)| {
                        let color = to_color(self.theme.get(slot));
                        let style = if slot == Slot::Cursor {
                            Style::default().bg(color)
                        } else {
                            Style::default().fg(color)
                        };
                        Span::styled(text, style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .style(Style::default().bg(background))
            .render(inner, buf);
    }
}

/// All 19 slots with swatch, key and uppercase hex; the selected row shows
/// which channel the arrow keys edit.
pub struct SlotList<'a> {
    theme: &'a Theme,
    selected: Slot,
    channel: Channel,
}

impl<'a> SlotList<'a> {
    pub fn new(theme: &'a Theme, selected: Slot, channel: Channel) -> Self {
        Self {
            theme,
            selected,
            channel,
        }
    }
}

impl Widget for SlotList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Slots");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .theme
            .iter()
            .map(|(slot, color)| {
                let is_selected = slot == self.selected;
                let marker = if is_selected { "> " } else { "  " };
                let label_style = if is_selected {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let mut spans = vec![
                    Span::raw(marker),
                    Span::styled("    ", Style::default().bg(to_color(color))),
                    Span::styled(format!(" {:<15}", slot.key()), label_style),
                    Span::styled(color.to_hex_upper(), label_style),
                ];
                if is_selected {
                    spans.push(Span::styled(
                        format!("  {}", self.channel.readout(color)),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
