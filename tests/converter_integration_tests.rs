use std::sync::Arc;

use unitconv::core::action::{Action, update};
use unitconv::core::engine::{
    self, ConversionError, TemperatureMode, convert_currency, convert_linear, convert_temperature,
};
use unitconv::core::history::{FileStorage, HistoryRecord, HistoryStore, MemoryStorage};
use unitconv::core::state::App;
use unitconv::core::units::{Category, unit_symbols};

// ============================================================================
// Helper Functions
// ============================================================================

fn app_with_store(store: Arc<HistoryStore>) -> App {
    App::new(store, Category::Length, TemperatureMode::Lenient)
}

fn commit(app: &mut App, input: &str) {
    update(app, Action::InputChanged(input.to_string()));
    update(app, Action::Commit);
}

// ============================================================================
// Engine Properties
// ============================================================================

#[test]
fn test_round_trip_law_holds_for_every_linear_pair() {
    for category in Category::ALL.into_iter().filter(|c| c.is_linear()) {
        let symbols = unit_symbols(category);
        for a in &symbols {
            for b in &symbols {
                let there = convert_linear(98.6, a, b, category).unwrap();
                let back = convert_linear(there, b, a, category).unwrap();
                assert!((back - 98.6).abs() < 1e-9, "{category:?} {a}<->{b}: {back}");
            }
        }
    }
}

#[test]
fn test_reference_values() {
    assert_eq!(convert_temperature(0.0, "c", "f"), 32.0);
    assert_eq!(convert_temperature(100.0, "c", "f"), 212.0);
    assert_eq!(convert_temperature(0.0, "k", "c"), -273.15);
    assert_eq!(convert_currency(100.0, "USD", "CNY").unwrap(), 725.0);
}

#[test]
fn test_lookup_failures_are_distinguishable() {
    assert!(matches!(
        convert_linear(1.0, "m", "parsec", Category::Length),
        Err(ConversionError::UnknownUnit { .. })
    ));
    assert!(matches!(
        convert_currency(1.0, "DOGE", "USD"),
        Err(ConversionError::UnknownCurrency(_))
    ));
    // Temperature keeps its lenient fallback unless strict mode is asked for
    assert!(engine::convert(Category::Temperature, 1.0, "r", "c", TemperatureMode::Lenient).is_ok());
    assert!(engine::convert(Category::Temperature, 1.0, "r", "c", TemperatureMode::Strict).is_err());
}

// ============================================================================
// History Through the App
// ============================================================================

#[test]
fn test_eleven_conversions_keep_newest_ten() {
    let store = Arc::new(HistoryStore::in_memory());
    let mut app = app_with_store(store.clone());

    for i in 1..=11 {
        commit(&mut app, &i.to_string());
    }

    let ledger = store.list();
    assert_eq!(ledger.len(), 10);
    assert_eq!(ledger[0].from_value, 11.0);
    assert_eq!(ledger[9].from_value, 2.0);
}

#[test]
fn test_zero_conversion_leaves_ledger_unchanged() {
    let store = Arc::new(HistoryStore::in_memory());
    let mut app = app_with_store(store.clone());

    commit(&mut app, "4");
    let before = store.list().len();
    commit(&mut app, "0");
    commit(&mut app, "");
    assert_eq!(store.list().len(), before);
}

#[test]
fn test_overflowing_input_keeps_persisted_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = Arc::new(HistoryStore::new(Box::new(FileStorage::new(&path))));
    let mut app = app_with_store(store.clone());

    for i in 1..=5 {
        commit(&mut app, &i.to_string());
    }
    commit(&mut app, "1e999");
    assert_eq!(store.list().len(), 5);
    assert!(app.selection(Category::Length).error.is_some());

    commit(&mut app, "6");
    let reopened = HistoryStore::new(Box::new(FileStorage::new(&path)));
    let ledger = reopened.list();
    assert_eq!(ledger.len(), 6);
    assert_eq!(ledger[0].from_value, 6.0);
}

#[test]
fn test_non_finite_record_is_refused() {
    let store = HistoryStore::in_memory();
    store
        .add(HistoryRecord::new(2.0, "m", "0.0020", "km", "Length"))
        .unwrap();
    let added = store
        .add(HistoryRecord::new(f64::NAN, "m", "NaN", "km", "Length"))
        .unwrap();
    assert!(!added);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_clear_then_list_is_empty() {
    let store = Arc::new(HistoryStore::in_memory());
    let mut app = app_with_store(store.clone());
    commit(&mut app, "1");
    commit(&mut app, "2");

    update(&mut app, Action::ClearHistory);
    assert!(store.list().is_empty());
    assert!(app.history_view.is_empty());
}

#[test]
fn test_ledger_survives_restart_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let store = Arc::new(HistoryStore::new(Box::new(FileStorage::new(&path))));
        let mut app = app_with_store(store);
        update(&mut app, Action::SelectCategory(Category::Weight));
        commit(&mut app, "3");
    }

    let store = Arc::new(HistoryStore::new(Box::new(FileStorage::new(&path))));
    let app = app_with_store(store);
    assert_eq!(app.history_view.len(), 1);
    assert_eq!(app.history_view[0].category, "Weight");
    assert_eq!(app.history_view[0].to_value, "3000.0000");
}

#[test]
fn test_corrupt_ledger_starts_empty() {
    let store = Arc::new(HistoryStore::new(Box::new(MemoryStorage::with_payload("[1, 2, 3"))));
    let app = app_with_store(store.clone());
    assert!(app.history_view.is_empty());

    store
        .add(HistoryRecord::new(1.0, "m", "0.0010", "km", "Length"))
        .unwrap();
    assert_eq!(store.list().len(), 1);
}
