//! # TitleBar Component
//!
//! Top status bar: app name, status message and the latest simulated
//! exchange-rate quotes with their capture time.
//!
//! Purely presentational. All three props come from core `App` state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     status_message: app.status_message.clone(),
//!     rates: app.rates.clone(),
//! };
//! title_bar.render(frame, area);
//! ```

use crate::core::refresh::RateSnapshot;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub status_message: String,
    pub rates: Option<RateSnapshot>,
}

impl TitleBar {
    /// Left-hand text: `unitconv | <status>`.
    pub fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            "unitconv".to_string()
        } else {
            format!("unitconv | {}", self.status_message)
        }
    }

    /// Right-hand text: quotes and update time, or a placeholder.
    pub fn rates_text(&self) -> String {
        match &self.rates {
            Some(snapshot) => {
                let quotes: Vec<String> = snapshot
                    .quotes
                    .iter()
                    .map(|q| format!("{} {}", q.pair, q.value))
                    .collect();
                format!("{} · updated {}", quotes.join("  "), snapshot.updated_label())
            }
            None => "rates pending".to_string(),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = Span::styled(
            self.title_text(),
            Style::default().add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Line::from(title), area);

        let rates = Line::from(Span::styled(
            self.rates_text(),
            Style::default().fg(Color::DarkGray),
        ))
        .right_aligned();
        frame.render_widget(rates, area);
    }
}
