pub mod widgets;

use std::io;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::color::Color;
use crate::presets;
use crate::theme::{Slot, Theme};

use widgets::{PaletteWidget, SlotList, TerminalPreview};

const FINE_STEP: i16 = 1;
const COARSE_STEP: i16 = 16;

/// Which RGB channel the arrow keys edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    fn get(self, color: Color) -> u8 {
        match self {
            Channel::Red => color.r,
            Channel::Green => color.g,
            Channel::Blue => color.b,
        }
    }

    fn with(self, color: Color, value: u8) -> Color {
        match self {
            Channel::Red => Color { r: value, ..color },
            Channel::Green => Color { g: value, ..color },
            Channel::Blue => Color { b: value, ..color },
        }
    }

    /// `R=205` style readout of this channel.
    pub fn readout(self, color: Color) -> String {
        let label = match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
        };
        format!("{label}={}", self.get(color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accept,
    Abort,
}

/// State for the interactive theme editor.
#[derive(Debug, Clone)]
pub struct TuiApp {
    pub theme: Theme,
    pub selected: usize,
    pub channel: Channel,
    presets: Vec<Theme>,
    preset_index: Option<usize>,
    outcome: Option<Outcome>,
}

impl TuiApp {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            selected: 0,
            channel: Channel::default(),
            presets: presets::all(),
            preset_index: None,
            outcome: None,
        }
    }

    pub fn selected_slot(&self) -> Slot {
        Slot::ALL[self.selected % Slot::ALL.len()]
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up => self.select(-1),
            KeyCode::Down => self.select(1),
            KeyCode::Char('r') => self.channel = Channel::Red,
            KeyCode::Char('g') => self.channel = Channel::Green,
            KeyCode::Char('b') => self.channel = Channel::Blue,
            KeyCode::Left if coarse => self.adjust(-COARSE_STEP),
            KeyCode::Right if coarse => self.adjust(COARSE_STEP),
            KeyCode::Left => self.adjust(-FINE_STEP),
            KeyCode::Right => self.adjust(FINE_STEP),
            KeyCode::Char('[') => self.adjust(-COARSE_STEP),
            KeyCode::Char(']') => self.adjust(COARSE_STEP),
            KeyCode::Char('p') => self.next_preset(),
            KeyCode::Enter | KeyCode::Char('q') => self.outcome = Some(Outcome::Accept),
            KeyCode::Esc => self.outcome = Some(Outcome::Abort),
            _ => {}
        }
    }

    fn select(&mut self, delta: isize) {
        let len = Slot::ALL.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Nudge the selected channel, saturating at 0 and 255.
    fn adjust(&mut self, delta: i16) {
        let slot = self.selected_slot();
        let color = self.theme.get(slot);
        let value = (i16::from(self.channel.get(color)) + delta).clamp(0, 255) as u8;
        self.theme.set(slot, self.channel.with(color, value));
    }

    fn next_preset(&mut self) {
        if self.presets.is_empty() {
            return;
        }
        let next = self.preset_index.map_or(0, |i| (i + 1) % self.presets.len());
        self.preset_index = Some(next);
        self.theme = self.presets[next].clone();
        log::debug!("switched to preset {}", self.theme.name);
    }

    fn draw(&self, frame: &mut Frame) {
        let [main, help] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        let [left, right] =
            Layout::horizontal([Constraint::Length(44), Constraint::Min(0)]).areas(main);
        let [preview, palette] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(13)]).areas(right);

        let slot = self.selected_slot();
        frame.render_widget(SlotList::new(&self.theme, slot, self.channel), left);
        frame.render_widget(TerminalPreview::new(&self.theme), preview);
        frame.render_widget(PaletteWidget::new(&self.theme, Some(slot)), palette);
        frame.render_widget(
            Paragraph::new(Line::from(
                " ↑/↓ slot  r/g/b channel  ←/→ ±1  [ ] ±16  p preset  Enter accept  Esc abort",
            )),
            help,
        );
    }
}

/// Runs its restore hook when dropped, on success, error and panic alike.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        log::warn!("failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(io::stderr(), LeaveAlternateScreen, Show) {
        log::warn!("failed to leave alternate screen: {err}");
    }
}

/// Run the editor until the user accepts (returns the edited theme) or
/// aborts (returns `None`).
pub fn run(mut app: TuiApp) -> Result<Option<Theme>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let _guard = TerminalGuard::new(restore_terminal);
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stderr))?;

    event_loop(&mut terminal, &mut app)?;
    Ok(match app.outcome() {
        Some(Outcome::Accept) => Some(app.theme),
        _ => None,
    })
}

fn event_loop<W: io::Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    app: &mut TuiApp,
) -> Result<()> {
    while app.outcome().is_none() {
        terminal.draw(|frame| app.draw(frame))?;
        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::theme::default_theme;

    fn press(app: &mut TuiApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_select_slots_and_wrap() {
        let mut app = TuiApp::new(default_theme());
        assert_eq!(app.selected_slot(), Slot::Background);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_slot(), Slot::BrightWhite);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_slot(), Slot::Foreground);
    }

    #[test]
    fn channel_adjustments() {
        let mut app = TuiApp::new(default_theme());
        // background #1e1e1e
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.theme.get(Slot::Background), Color::new(0x1e, 0x1f, 0x1e));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.theme.get(Slot::Background), Color::new(0x1e, 0x2f, 0x1e));
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        assert_eq!(app.theme.get(Slot::Background), Color::new(0x1e, 0x1f, 0x1e));
    }

    #[test]
    fn adjustments_saturate() {
        let mut app = TuiApp::new(default_theme());
        press(&mut app, KeyCode::Char('b'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('['));
        }
        assert_eq!(app.theme.get(Slot::Background).b, 0);
        // cursor is #ffffff
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.theme.get(Slot::Cursor).b, 255);
    }

    #[test]
    fn presets_cycle_in_order() {
        let mut app = TuiApp::new(default_theme());
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.theme.name, presets::NAMES[0]);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.theme.name, presets::NAMES[1]);
    }

    #[test]
    fn enter_accepts_escape_aborts() {
        let mut app = TuiApp::new(default_theme());
        assert_eq!(app.outcome(), None);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.outcome(), Some(Outcome::Accept));

        let mut app = TuiApp::new(default_theme());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.outcome(), Some(Outcome::Abort));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = TuiApp::new(default_theme());
        let mut key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn terminal_guard_restores_on_early_error() {
        let restored = Cell::new(0);
        let setup = || -> Result<()> {
            let _guard = TerminalGuard::new(|| restored.set(restored.get() + 1));
            anyhow::bail!("terminal setup failed");
        };
        assert!(setup().is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn terminal_guard_restores_on_panic() {
        let restored = Cell::new(false);
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = TerminalGuard::new(|| restored.set(true));
            panic!("draw failed");
        }));
        assert!(caught.is_err());
        assert!(restored.get());
    }
}
