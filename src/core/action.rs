//! # Actions
//!
//! Everything that can happen in the converter becomes an `Action`.
//! User types a digit? That's `Action::InputChanged(text)`.
//! The rate timer fires? That's `Action::RatesRefreshed(snapshot)`.
//!
//! The `update()` function takes the current state and an action, applies
//! it, and returns an `Effect` telling the adapter what to do next.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::refresh::RateSnapshot;
use crate::core::state::App;
use crate::core::units::Category;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectCategory(Category),
    NextCategory,
    PrevCategory,
    /// New input text for the active category; recomputes without recording.
    InputChanged(String),
    /// Move the active category's source unit by the given offset.
    CycleFrom(isize),
    CycleTo(isize),
    /// Exchange source and target units of a category.
    Swap(Category),
    /// Convert the active category and record it in history.
    Commit,
    ClearHistory,
    RatesRefreshed(RateSnapshot),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    let category = app.category;

    match action {
        Action::SelectCategory(next) => {
            app.category = next;
            app.status_message = next.label().to_string();
        }
        Action::NextCategory => {
            app.category = category.next();
            app.status_message = app.category.label().to_string();
        }
        Action::PrevCategory => {
            app.category = category.prev();
            app.status_message = app.category.label().to_string();
        }
        Action::InputChanged(text) => {
            app.set_input(category, text);
            app.convert(category, false);
        }
        Action::CycleFrom(delta) => {
            app.cycle_from(category, delta);
            app.convert(category, false);
        }
        Action::CycleTo(delta) => {
            app.cycle_to(category, delta);
            app.convert(category, false);
        }
        Action::Swap(target) => {
            app.swap(target);
        }
        Action::Commit => {
            app.convert(category, true);
        }
        Action::ClearHistory => {
            app.clear_history();
        }
        Action::RatesRefreshed(snapshot) => {
            info!("Rates updated at {}", snapshot.updated_label());
            app.rates = Some(snapshot);
        }
        Action::Quit => return Effect::Quit,
    }

    Effect::None
}
