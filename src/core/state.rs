//! # Application State
//!
//! Core business state for the converter. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── category: Category                 // active tab
//! ├── selections: [Selection; 8]         // input + from/to per category
//! ├── history: Arc<HistoryStore>         // persisted ledger
//! ├── history_view: Vec<HistoryRecord>   // last list(), refreshed after mutations
//! ├── rates: Option<RateSnapshot>        // latest simulated quotes
//! ├── temperature_mode: TemperatureMode  // lenient or strict temperature lookup
//! └── status_message: String             // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use log::{debug, warn};

use crate::core::config::ResolvedConfig;
use crate::core::engine::{self, TemperatureMode};
use crate::core::history::{FileStorage, HistoryRecord, HistoryStore, LedgerStorage, MemoryStorage};
use crate::core::refresh::RateSnapshot;
use crate::core::units::{self, Category};

/// Shown instead of a result that does not fit in an `f64`.
pub const OUT_OF_RANGE: &str = "value out of range";

/// Input and unit choice for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub input: String,
    /// Index into `units::unit_symbols(category)`.
    pub from: usize,
    pub to: usize,
    /// Last formatted result; empty when the last conversion failed.
    pub output: String,
    pub error: Option<String>,
}

impl Selection {
    fn new() -> Self {
        Self {
            input: String::from("1"),
            from: 0,
            to: 1,
            output: String::new(),
            error: None,
        }
    }
}

pub struct App {
    pub category: Category,
    selections: Vec<Selection>,
    pub history: Arc<HistoryStore>,
    pub history_view: Vec<HistoryRecord>,
    pub rates: Option<RateSnapshot>,
    pub temperature_mode: TemperatureMode,
    pub status_message: String,
}

impl App {
    pub fn new(history: Arc<HistoryStore>, category: Category, temperature_mode: TemperatureMode) -> Self {
        let mut app = Self {
            category,
            selections: Category::ALL.iter().map(|_| Selection::new()).collect(),
            history_view: history.list(),
            history,
            rates: None,
            temperature_mode,
            status_message: String::from("Welcome to unitconv!"),
        };
        for category in Category::ALL {
            app.convert(category, false);
        }
        app
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let storage: Box<dyn LedgerStorage> = match &config.history_file {
            Some(path) => {
                debug!("History file: {}", path.display());
                Box::new(FileStorage::new(path))
            }
            None => {
                warn!("No history file available, history will not persist");
                Box::new(MemoryStorage::new())
            }
        };
        let store = HistoryStore::with_capacity(storage, config.history_max_items);
        Self::new(Arc::new(store), config.category, config.temperature_mode)
    }

    pub fn selection(&self, category: Category) -> &Selection {
        &self.selections[category.index()]
    }

    fn selection_mut(&mut self, category: Category) -> &mut Selection {
        &mut self.selections[category.index()]
    }

    pub fn from_symbol(&self, category: Category) -> &'static str {
        let symbols = units::unit_symbols(category);
        symbols[self.selection(category).from.min(symbols.len() - 1)]
    }

    pub fn to_symbol(&self, category: Category) -> &'static str {
        let symbols = units::unit_symbols(category);
        symbols[self.selection(category).to.min(symbols.len() - 1)]
    }

    pub fn set_input(&mut self, category: Category, input: String) {
        self.selection_mut(category).input = input;
    }

    /// Moves the source unit by `delta` places, wrapping around.
    pub fn cycle_from(&mut self, category: Category, delta: isize) {
        let len = units::unit_symbols(category).len();
        let selection = self.selection_mut(category);
        selection.from = wrap_index(selection.from, delta, len);
    }

    pub fn cycle_to(&mut self, category: Category, delta: isize) {
        let len = units::unit_symbols(category).len();
        let selection = self.selection_mut(category);
        selection.to = wrap_index(selection.to, delta, len);
    }

    /// Recomputes `category`'s output. With `record`, a successful
    /// conversion is also handed to the history store.
    pub fn convert(&mut self, category: Category, record: bool) -> Option<f64> {
        let value = engine::parse_value(&self.selection(category).input);
        let from = self.from_symbol(category);
        let to = self.to_symbol(category);

        match engine::convert(category, value, from, to, self.temperature_mode) {
            Ok(result) if !value.is_finite() || !result.is_finite() => {
                warn!("Conversion out of range: {} {} -> {}", value, from, to);
                let selection = self.selection_mut(category);
                selection.output.clear();
                selection.error = Some(String::from(OUT_OF_RANGE));
                None
            }
            Ok(result) => {
                let formatted = engine::format_result(result);
                let selection = self.selection_mut(category);
                selection.output = formatted.clone();
                selection.error = None;

                if record {
                    self.record(category, value, from, formatted, to);
                }
                Some(result)
            }
            Err(e) => {
                warn!("Conversion failed: {}", e);
                let selection = self.selection_mut(category);
                selection.output.clear();
                selection.error = Some(e.to_string());
                None
            }
        }
    }

    /// Exchanges source and target units, then converts and records.
    pub fn swap(&mut self, category: Category) -> Option<f64> {
        let selection = self.selection_mut(category);
        std::mem::swap(&mut selection.from, &mut selection.to);
        self.convert(category, true)
    }

    fn record(&mut self, category: Category, value: f64, from: &str, formatted: String, to: &str) {
        let entry = HistoryRecord::new(
            value,
            units::unit_label(category, from),
            formatted,
            units::unit_label(category, to),
            category.label(),
        );
        match self.history.add(entry) {
            Ok(true) => self.refresh_history(),
            Ok(false) => {}
            Err(e) => {
                warn!("Failed to save history: {}", e);
                self.status_message = format!("History not saved: {e}");
            }
        }
    }

    pub fn clear_history(&mut self) {
        match self.history.clear() {
            Ok(()) => self.status_message = String::from("History cleared"),
            Err(e) => {
                warn!("Failed to clear history: {}", e);
                self.status_message = format!("Clear failed: {e}");
            }
        }
        self.refresh_history();
    }

    /// Re-reads the ledger for display.
    pub fn refresh_history(&mut self) {
        self.history_view = self.history.list();
    }
}

fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{read_only_app, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to unitconv!");
        assert_eq!(app.category, Category::Length);
        assert_eq!(app.from_symbol(Category::Length), "m");
        assert_eq!(app.to_symbol(Category::Length), "km");
        assert_eq!(app.selection(Category::Length).output, "0.0010");
        assert!(app.history_view.is_empty());
    }

    #[test]
    fn test_initial_conversions_are_not_recorded() {
        let app = test_app();
        assert!(app.history.list().is_empty());
        assert_eq!(app.selection(Category::Currency).output, "7.2500");
        assert_eq!(app.selection(Category::Temperature).output, "33.8000");
    }

    #[test]
    fn test_convert_with_record() {
        let mut app = test_app();
        app.set_input(Category::Length, "5".into());
        assert_eq!(app.convert(Category::Length, true), Some(0.005));

        assert_eq!(app.history_view.len(), 1);
        let entry = &app.history_view[0];
        assert_eq!(entry.from_value, 5.0);
        assert_eq!(entry.from_unit, "m");
        assert_eq!(entry.to_value, "0.0050");
        assert_eq!(entry.to_unit, "km");
        assert_eq!(entry.category, "Length");
    }

    #[test]
    fn test_zero_input_is_not_recorded() {
        let mut app = test_app();
        app.set_input(Category::Weight, "0".into());
        app.convert(Category::Weight, true);
        app.set_input(Category::Weight, "not a number".into());
        app.convert(Category::Weight, true);

        assert_eq!(app.selection(Category::Weight).output, "0.0000");
        assert!(app.history.list().is_empty());
    }

    #[test]
    fn test_swap_exchanges_units_and_records() {
        let mut app = test_app();
        app.set_input(Category::Length, "2".into());
        assert_eq!(app.swap(Category::Length), Some(2000.0));
        assert_eq!(app.from_symbol(Category::Length), "km");
        assert_eq!(app.to_symbol(Category::Length), "m");
        assert_eq!(app.history_view[0].to_value, "2000.0000");
    }

    #[test]
    fn test_temperature_records_display_labels() {
        let mut app = test_app();
        app.set_input(Category::Temperature, "100".into());
        app.convert(Category::Temperature, true);
        assert_eq!(app.history_view[0].from_unit, "°C");
        assert_eq!(app.history_view[0].to_unit, "°F");
        assert_eq!(app.history_view[0].to_value, "212.0000");
    }

    #[test]
    fn test_cycle_wraps_both_directions() {
        let mut app = test_app();
        app.cycle_from(Category::Temperature, -1);
        assert_eq!(app.from_symbol(Category::Temperature), "k");
        app.cycle_from(Category::Temperature, 1);
        assert_eq!(app.from_symbol(Category::Temperature), "c");
        app.cycle_to(Category::Speed, 4);
        assert_eq!(app.to_symbol(Category::Speed), "m/s");
    }

    #[test]
    fn test_selections_are_per_category() {
        let mut app = test_app();
        app.set_input(Category::Time, "3".into());
        assert_eq!(app.selection(Category::Time).input, "3");
        assert_eq!(app.selection(Category::Volume).input, "1");
    }

    #[test]
    fn test_clear_history_refreshes_view() {
        let mut app = test_app();
        app.set_input(Category::Area, "1".into());
        app.convert(Category::Area, true);
        assert_eq!(app.history_view.len(), 1);
        app.clear_history();
        assert!(app.history_view.is_empty());
    }

    #[test]
    fn test_out_of_range_input_is_not_recorded() {
        let mut app = test_app();
        for i in 1..=5 {
            app.set_input(Category::Length, i.to_string());
            app.convert(Category::Length, true);
        }

        app.set_input(Category::Length, "1e999".into());
        assert_eq!(app.convert(Category::Length, true), None);

        let selection = app.selection(Category::Length);
        assert!(selection.output.is_empty());
        assert_eq!(selection.error.as_deref(), Some(OUT_OF_RANGE));
        assert_eq!(app.history.list().len(), 5);
        assert_eq!(app.history_view[0].from_value, 5.0);
    }

    #[test]
    fn test_overflowing_result_is_not_recorded() {
        let mut app = test_app();
        app.cycle_from(Category::Length, 1);
        app.cycle_to(Category::Length, 2);
        assert_eq!(app.from_symbol(Category::Length), "km");
        assert_eq!(app.to_symbol(Category::Length), "mm");

        app.set_input(Category::Length, "1e306".into());
        assert_eq!(app.convert(Category::Length, true), None);
        assert_eq!(app.selection(Category::Length).error.as_deref(), Some(OUT_OF_RANGE));
        assert!(app.history.list().is_empty());
    }

    #[test]
    fn test_failed_save_reports_in_status() {
        let mut app = read_only_app(1);
        app.set_input(Category::Length, "5".into());
        assert_eq!(app.convert(Category::Length, true), Some(0.005));

        assert!(app.status_message.starts_with("History not saved"));
        assert_eq!(app.history_view.len(), 1);
        assert_eq!(app.history_view[0].from_value, 1.0);
    }

    #[test]
    fn test_failed_clear_reports_in_status() {
        let mut app = read_only_app(2);
        app.clear_history();
        assert!(app.status_message.starts_with("Clear failed"));
        assert_eq!(app.history_view.len(), 2);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 5), 4);
        assert_eq!(wrap_index(4, 1, 5), 0);
        assert_eq!(wrap_index(2, 7, 5), 4);
        assert_eq!(wrap_index(0, 1, 0), 0);
    }
}
