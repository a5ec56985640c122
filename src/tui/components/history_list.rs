//! # HistoryList Component
//!
//! Renders the ledger newest-first:
//!
//! ```text
//! 12 km       → 7.4565 mile          2024/05/01 10:00:00
//! 3 斤        → 1.5000 kg            2024/05/01 09:58:12
//! ```
//!
//! Unit labels may contain CJK characters, which take two terminal
//! columns, so padding is computed with `unicode-width` rather than `len()`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::history::HistoryRecord;
use crate::tui::component::Component;

/// Column width reserved for the "from" side of each row.
const FROM_COLUMN: usize = 14;
const TO_COLUMN: usize = 22;

pub struct HistoryList<'a> {
    pub records: &'a [HistoryRecord],
    pub capacity: usize,
}

/// Pad `text` with spaces to `width` display columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - used))
}

/// Formats a number the way a user typed it: no trailing `.0`.
fn format_source_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One row: `<from>  → <to>  <timestamp>`.
pub fn format_row(record: &HistoryRecord) -> String {
    let from = format!("{} {}", format_source_value(record.from_value), record.from_unit);
    let to = format!("{} {}", record.to_value, record.to_unit);
    format!(
        "{} → {} {}",
        pad_to_width(&from, FROM_COLUMN),
        pad_to_width(&to, TO_COLUMN),
        record.timestamp
    )
}

impl Component for HistoryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" History ({}/{}) ", self.records.len(), self.capacity))
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        if self.records.is_empty() {
            let empty = Paragraph::new("No conversions yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .records
            .iter()
            .map(|record| {
                ListItem::new(Line::from(vec![
                    Span::raw(format_row(record)),
                    Span::styled(format!("  [{}]", record.category), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
