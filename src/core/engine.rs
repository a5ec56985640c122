//! # Conversion Engine
//!
//! Pure value transformations. No I/O, no state.
//!
//! ```text
//! value ─┬─ linear      → value × rate(from) ÷ rate(to)
//!        ├─ temperature → to Celsius, then Celsius → target
//!        └─ currency    → value × rate(to) ÷ rate(from)   (USD pivot)
//! ```
//!
//! Converting a unit to itself short-circuits, so the identity is exact in
//! every category. Results are full-precision `f64`; [`format_result`] gives
//! the 4-decimal display string.

use std::fmt;

use crate::core::units::{self, Category, TemperatureUnit};

/// Number of fractional digits in displayed and persisted results.
pub const DISPLAY_DECIMALS: usize = 4;

/// Failures a conversion can signal to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Unit symbol not registered for the category.
    UnknownUnit { category: Category, unit: String },
    /// Currency code not present in the rate table.
    UnknownCurrency(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::UnknownUnit { category, unit } => {
                write!(f, "unknown {} unit: {unit}", category.key())
            }
            ConversionError::UnknownCurrency(code) => write!(f, "unknown currency: {code}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// How temperature conversion treats symbols outside {c, f, k}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureMode {
    /// Unknown source is read as Celsius, unknown target returns Celsius.
    #[default]
    Lenient,
    /// Unknown symbols fail with `UnknownUnit`.
    Strict,
}

/// Converts through the category's base unit.
pub fn convert_linear(
    value: f64,
    from: &str,
    to: &str,
    category: Category,
) -> Result<f64, ConversionError> {
    let from_rate = units::rate_of(category, from)?;
    let to_rate = units::rate_of(category, to)?;
    if from == to {
        return Ok(value);
    }
    let base = value * from_rate;
    Ok(base / to_rate)
}

/// Converts via Celsius. Never fails: see [`TemperatureMode::Lenient`].
pub fn convert_temperature(value: f64, from: &str, to: &str) -> f64 {
    if from == to {
        return value;
    }
    let celsius = TemperatureUnit::from_symbol(from).map_or(value, |unit| unit.to_celsius(value));
    TemperatureUnit::from_symbol(to).map_or(celsius, |unit| unit.from_celsius(celsius))
}

/// Same formulas as [`convert_temperature`], but unknown symbols are errors.
pub fn convert_temperature_strict(
    value: f64,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    let lookup = |symbol: &str| {
        TemperatureUnit::from_symbol(symbol).ok_or_else(|| ConversionError::UnknownUnit {
            category: Category::Temperature,
            unit: symbol.to_string(),
        })
    };
    let from_unit = lookup(from)?;
    let to_unit = lookup(to)?;
    if from_unit == to_unit {
        return Ok(value);
    }
    Ok(to_unit.from_celsius(from_unit.to_celsius(value)))
}

/// Converts between currencies with USD as the pivot.
pub fn convert_currency(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let from_rate = units::currency_rate(from)?;
    let to_rate = units::currency_rate(to)?;
    if from == to {
        return Ok(value);
    }
    Ok(value * to_rate / from_rate)
}

/// Dispatches to the rule that belongs to `category`.
pub fn convert(
    category: Category,
    value: f64,
    from: &str,
    to: &str,
    mode: TemperatureMode,
) -> Result<f64, ConversionError> {
    match category {
        Category::Temperature => match mode {
            TemperatureMode::Lenient => Ok(convert_temperature(value, from, to)),
            TemperatureMode::Strict => convert_temperature_strict(value, from, to),
        },
        Category::Currency => convert_currency(value, from, to),
        _ => convert_linear(value, from, to, category),
    }
}

/// Reads the leading number of `input`; anything unparsable becomes 0.
///
/// Accepts `[+-]digits[.digits][e[+-]digits]` after optional whitespace and
/// ignores trailing text, so `"12abc"` is 12 and `"abc"` is 0.
pub fn parse_value(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    match text[..end].parse::<f64>() {
        // -0 and NaN both collapse to a plain zero
        Ok(value) if value != 0.0 && !value.is_nan() => value,
        _ => 0.0,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Fixed 4-decimal rendering used for display and for the ledger.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    format!("{:.*}", DISPLAY_DECIMALS, value)
}
