//! # ValueInput Component
//!
//! The numeric entry field of the converter panel.
//!
//! ## Responsibilities
//!
//! - Capture typed and pasted characters that can form a number
//! - Handle backspace and submission (Enter)
//! - Render the buffer with the cursor parked at its end
//!
//! The buffer is internal state, but the app owns the canonical input per
//! category; `sync` pulls it back in when the active category changes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Longest input the field accepts.
const MAX_INPUT_LEN: usize = 32;

/// High-level events emitted by the ValueInput
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Buffer content changed; carries the new text
    Changed(String),
    /// User pressed Enter
    Submit,
}

pub struct ValueInput {
    pub buffer: String,
    /// Whether to place the terminal cursor in the field (Prop)
    pub focused: bool,
}

impl ValueInput {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            focused: true,
        }
    }

    /// Replace the buffer with the app's copy if they differ.
    pub fn sync(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
        }
    }

    fn push_filtered(&mut self, text: &str) -> bool {
        let before = self.buffer.len();
        for c in text.chars().filter(|c| accepts(*c)) {
            if self.buffer.len() >= MAX_INPUT_LEN {
                break;
            }
            self.buffer.push(c);
        }
        self.buffer.len() != before
    }
}

/// Characters that may appear in a number the engine can read.
fn accepts(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

impl EventHandler for ValueInput {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.push_filtered(c.encode_utf8(&mut tmp))
                    .then(|| InputEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => self
                .push_filtered(text.trim())
                .then(|| InputEvent::Changed(self.buffer.clone())),
            TuiEvent::Backspace => self
                .buffer
                .pop()
                .map(|_| InputEvent::Changed(self.buffer.clone())),
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

impl Component for ValueInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Value ")
            .border_style(Style::default().fg(Color::Cyan));
        let paragraph = Paragraph::new(self.buffer.as_str()).block(block);
        frame.render_widget(paragraph, area);

        if self.focused && area.width > 2 && area.height > 2 {
            let max_x = area.x + area.width - 2;
            let x = (area.x + 1 + self.buffer.width() as u16).min(max_x);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}
