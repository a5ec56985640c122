//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, status and rate ticker
//! - `CategoryTabs`: one tab per category
//! - `HistoryList`: the ledger, newest first
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ValueInput`: numeric entry field
//! - `ConverterPanel`: transient wrapper around `ValueInput` plus unit/result boxes
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `App` themselves.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs
//! ├── category_tabs.rs
//! ├── converter_panel.rs
//! ├── value_input.rs
//! └── history_list.rs
//! ```

mod category_tabs;
mod converter_panel;
mod history_list;
mod title_bar;
pub mod value_input;

pub use category_tabs::CategoryTabs;
pub use converter_panel::ConverterPanel;
pub use history_list::HistoryList;
pub use title_bar::TitleBar;
pub use value_input::{InputEvent, ValueInput};
