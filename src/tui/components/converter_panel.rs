//! # ConverterPanel Component
//!
//! The working row of the screen: value entry, source unit, target unit
//! and result.
//!
//! ```text
//! ┌ Value ──────┐┌ From ↑↓ ┐┌ To ←→ ──┐┌ Result ─────────┐
//! │12           ││ km      ││ mile    ││ 7.4565 mile     │
//! └─────────────┘└─────────┘└─────────┘└─────────────────┘
//! ```
//!
//! Follows the persistent state + transient wrapper pattern: `ValueInput`
//! lives in `TuiState`, the panel is rebuilt each frame around it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;
use crate::tui::components::value_input::ValueInput;

pub struct ConverterPanel<'a> {
    pub input: &'a mut ValueInput,
    pub from_label: String,
    pub to_label: String,
    pub output: String,
    pub error: Option<String>,
}

impl<'a> ConverterPanel<'a> {
    /// Text shown in the result box.
    pub fn result_line(&self) -> Line<'static> {
        match &self.error {
            Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
            None => Line::from(vec![
                Span::styled(
                    self.output.clone(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(self.to_label.clone()),
            ]),
        }
    }
}

fn unit_box<'b>(title: &'b str, label: &'b str) -> Paragraph<'b> {
    Paragraph::new(format!(" {label}")).block(
        Block::bordered()
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

impl Component for ConverterPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::Percentage;
        let [value_area, from_area, to_area, result_area] =
            Layout::horizontal([Percentage(30), Percentage(20), Percentage(20), Percentage(30)])
                .areas(area);

        self.input.render(frame, value_area);
        frame.render_widget(unit_box(" From ↑↓ ", &self.from_label), from_area);
        frame.render_widget(unit_box(" To ←→ ", &self.to_label), to_area);

        let result = Paragraph::new(self.result_line()).block(
            Block::bordered()
                .title(" Result ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(result, result_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_line_shows_value_and_unit() {
        let mut input = ValueInput::new("1");
        let panel = ConverterPanel {
            input: &mut input,
            from_label: "m".into(),
            to_label: "km".into(),
            output: "0.0010".into(),
            error: None,
        };
        assert_eq!(panel.result_line().to_string(), "0.0010 km");
    }

    #[test]
    fn test_result_line_shows_error() {
        let mut input = ValueInput::new("1");
        let panel = ConverterPanel {
            input: &mut input,
            from_label: "x".into(),
            to_label: "c".into(),
            output: String::new(),
            error: Some("unknown temperature unit: x".into()),
        };
        assert_eq!(panel.result_line().to_string(), "unknown temperature unit: x");
    }
}
