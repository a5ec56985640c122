//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event, a terminal resize, or a rate refresh
//! arriving from the background task.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::refresh::{RateRefresher, RateSnapshot, ScheduledTask, StaticRateSource};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, ValueInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub value_input: ValueInput,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            value_input: ValueInput::new(&app.selection(app.category).input),
        }
    }

    /// Pull the active category's input back into the entry field.
    pub fn sync(&mut self, app: &App) {
        self.value_input.sync(&app.selection(app.category).input);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset on redraw
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Map a terminal event to a core action. Input edits go through the
/// entry field first so its buffer stays authoritative while typing.
fn to_action(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::NextCategory => Some(Action::NextCategory),
        TuiEvent::PrevCategory => Some(Action::PrevCategory),
        TuiEvent::FromPrev => Some(Action::CycleFrom(-1)),
        TuiEvent::FromNext => Some(Action::CycleFrom(1)),
        TuiEvent::ToPrev => Some(Action::CycleTo(-1)),
        TuiEvent::ToNext => Some(Action::CycleTo(1)),
        TuiEvent::Swap => Some(Action::Swap(app.category)),
        TuiEvent::ClearHistory => Some(Action::ClearHistory),
        TuiEvent::Resize => None,
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace | TuiEvent::Submit => {
            match tui.value_input.handle_event(event)? {
                InputEvent::Changed(text) => Some(Action::InputChanged(text)),
                InputEvent::Submit => Some(Action::Commit),
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel::<Action>();

    let sink_tx = tx.clone();
    let mut refresher = RateRefresher::new(
        Arc::new(StaticRateSource),
        config.refresh_interval,
        Arc::new(move |snapshot: RateSnapshot| {
            if sink_tx.send(Action::RatesRefreshed(snapshot)).is_err() {
                warn!("Failed to deliver rate snapshot: receiver dropped");
            }
        }),
    );
    refresher.start();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = to_action(&event, &app, &mut tui) else {
                continue;
            };
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
                break;
            }
            tui.sync(&app);
        }

        if should_quit {
            break;
        }

        // Handle background task actions (rate refresh)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    refresher.stop();
    ratatui::restore();
    info!("unitconv shutting down");
    Ok(())
}
