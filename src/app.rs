use crate::calendar::{Note, NoteTarget, NoteView};
use crate::clock::Clock;
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C> {
    view: NoteView,
    clock: C,
    refresh: Duration,
    state: AppState,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(view: NoteView, clock: C, refresh: Duration) -> App<C> {
        App {
            view,
            clock,
            refresh,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut last_refresh = Instant::now();
        while !self.quitting() {
            self.draw(terminal)?;
            let timeout = self.refresh.saturating_sub(last_refresh.elapsed());
            if event::poll(timeout)? {
                self.handle_event(&event::read()?)?;
            }
            if last_refresh.elapsed() >= self.refresh {
                self.refresh_today();
                last_refresh = Instant::now();
            }
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(mouse) = event {
            if !self.handle_mouse(mouse) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h' | 'p') | KeyCode::Left => self.previous_month(),
                KeyCode::Char('l' | 'n') | KeyCode::Right => self.next_month(),
                KeyCode::Char('t' | '0') | KeyCode::Home => {
                    self.view.jump_to_today();
                    true
                }
                KeyCode::Char('H') => self.nudge(-1, 0),
                KeyCode::Char('J') => self.nudge(0, 1),
                KeyCode::Char('K') => self.nudge(0, -1),
                KeyCode::Char('L') => self.nudge(1, 0),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => c
                            .to_digit(10)
                            .and_then(|d| u8::try_from(d).ok())
                            .map_or(JumpToOutput::Invalid, |d| {
                                state.handle_input(JumpToInput::Digit(d))
                            }),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            tracing::info!(%date, "jumping to month");
                            self.view.jump_to_date(date);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if a click could not be acted on
    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let MouseEvent {
            kind, column, row, ..
        } = *mouse;
        match self.state {
            AppState::Calendar => (),
            AppState::Helping => {
                if matches!(kind, MouseEventKind::Down(_)) {
                    self.state = AppState::Calendar;
                }
                return true;
            }
            AppState::Jumping(_) | AppState::Quitting => return true,
        }
        match kind {
            MouseEventKind::Down(MouseButton::Left) => match self.view.hit(column, row) {
                Some(NoteTarget::TitleBar) => {
                    self.view.start_drag(column, row);
                    true
                }
                Some(NoteTarget::Close) => {
                    self.state = AppState::Quitting;
                    true
                }
                Some(NoteTarget::Previous) => self.previous_month(),
                Some(NoteTarget::Next) => self.next_month(),
                Some(NoteTarget::Today) => {
                    self.view.jump_to_today();
                    true
                }
                None => true,
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                self.view.drag_to(column, row);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.view.end_drag();
                true
            }
            _ => true,
        }
    }

    fn refresh_today(&mut self) {
        tracing::debug!("re-reading clock");
        match self.clock.today() {
            Ok(today) => {
                if today != self.view.today() {
                    tracing::info!(%today, "date changed");
                }
                self.view.set_today(today);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to determine local date; keeping previous date");
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn previous_month(&mut self) -> bool {
        match self.view.previous_month() {
            Ok(()) => {
                tracing::info!(shown = %self.view.shown(), "moved to previous month");
                true
            }
            Err(e) => {
                tracing::debug!(shown = %self.view.shown(), "cannot go back: {e}");
                false
            }
        }
    }

    fn next_month(&mut self) -> bool {
        match self.view.next_month() {
            Ok(()) => {
                tracing::info!(shown = %self.view.shown(), "moved to next month");
                true
            }
            Err(e) => {
                tracing::debug!(shown = %self.view.shown(), "cannot go forwards: {e}");
                false
            }
        }
    }

    fn nudge(&mut self, dx: i32, dy: i32) -> bool {
        self.view.nudge(dx, dy);
        true
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Note.render(area, buf, &mut self.view);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
