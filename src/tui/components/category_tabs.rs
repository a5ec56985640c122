//! # CategoryTabs Component
//!
//! One tab per conversion category; the active one is highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Tabs};

use crate::core::units::Category;
use crate::tui::component::Component;

pub struct CategoryTabs {
    pub active: Category,
}

impl Component for CategoryTabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        let tabs = Tabs::new(titles)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)))
            .select(self.active.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }
}
