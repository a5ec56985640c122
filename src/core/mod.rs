//! # Core Application Logic
//!
//! This module contains the converter's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • units (rate tables)  │
//!                    │  • engine (conversion)  │
//!                    │  • history (ledger)     │
//!                    │  • State + Action       │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Library   │      │   Rate     │
//!     │  Adapter   │      │  callers   │      │  refresh   │
//!     │ (ratatui)  │      │  (tests)   │      │  (tokio)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`]: Categories, unit enums and their factor tables
//! - [`engine`]: Pure conversion functions and input/output formatting
//! - [`history`]: The bounded, persisted ledger of recent conversions
//! - [`refresh`]: Simulated periodic exchange-rate refresh
//! - [`config`]: Config file, env and CLI resolution
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer

pub mod action;
pub mod config;
pub mod engine;
pub mod history;
pub mod refresh;
pub mod state;
pub mod units;
