use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::core::units;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CategoryTabs, ConverterPanel, HistoryList, TitleBar};

const HELP_TEXT: &str =
    " Tab Category  ↑↓ From  ←→ To  Enter Save  Ctrl+S Swap  Ctrl+L Clear history  Esc Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Length(3), Min(3), Length(1)]);
    let [title_area, tabs_area, panel_area, history_area, help_area] = layout.areas(frame.area());

    TitleBar {
        status_message: app.status_message.clone(),
        rates: app.rates.clone(),
    }
    .render(frame, title_area);

    CategoryTabs {
        active: app.category,
    }
    .render(frame, tabs_area);

    let category = app.category;
    let selection = app.selection(category);
    ConverterPanel {
        input: &mut tui.value_input,
        from_label: units::unit_label(category, app.from_symbol(category)),
        to_label: units::unit_label(category, app.to_symbol(category)),
        output: selection.output.clone(),
        error: selection.error.clone(),
    }
    .render(frame, panel_area);

    HistoryList {
        records: &app.history_view,
        capacity: app.history.max_items(),
    }
    .render(frame, history_area);

    frame.render_widget(
        Line::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)).centered(),
        help_area,
    );
}
