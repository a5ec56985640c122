//! # Rate Table
//!
//! Static conversion data for every category.
//!
//! ```text
//! Category
//! ├── Length / Weight / Area / Volume / Speed / Time   → linear factor tables
//! ├── Temperature                                      → piecewise rule (via Celsius)
//! └── Currency                                         → rate per 1 USD
//! ```
//!
//! Linear factors read as "1 unit = factor base-units". The base units are
//! meter, kilogram, square meter, liter, meter/second and second. Nothing
//! here is mutable: the tables are `match` arms compiled into the binary.

use serde::{Deserialize, Serialize};

use crate::core::engine::ConversionError;

/// A conversion domain with its own unit set and conversion rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Length,
    Weight,
    Area,
    Volume,
    Speed,
    Time,
    Temperature,
    Currency,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Length,
        Category::Weight,
        Category::Area,
        Category::Volume,
        Category::Speed,
        Category::Time,
        Category::Temperature,
        Category::Currency,
    ];

    /// Human-readable label. This is what history records store under `type`.
    pub fn label(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Area => "Area",
            Category::Volume => "Volume",
            Category::Speed => "Speed",
            Category::Time => "Time",
            Category::Temperature => "Temperature",
            Category::Currency => "Currency",
        }
    }

    /// Lower-case key used in config files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Area => "area",
            Category::Volume => "volume",
            Category::Speed => "speed",
            Category::Time => "time",
            Category::Temperature => "temperature",
            Category::Currency => "currency",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Cycles forward, wrapping from the last category back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// True for categories converted through a factor table.
    pub fn is_linear(self) -> bool {
        !matches!(self, Category::Temperature | Category::Currency)
    }
}

/// Declares a unit enum together with its symbol and factor tables.
macro_rules! linear_units {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $symbol:literal = $factor:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn symbol(self) -> &'static str {
                match self {
                    $($name::$variant => $symbol),+
                }
            }

            pub fn factor(self) -> f64 {
                match self {
                    $($name::$variant => $factor),+
                }
            }

            pub fn from_symbol(symbol: &str) -> Option<Self> {
                match symbol {
                    $($symbol => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

linear_units! {
    /// Length units, base: meter.
    LengthUnit {
        Meter => "m" = 1.0,
        Kilometer => "km" = 1000.0,
        Centimeter => "cm" = 0.01,
        Millimeter => "mm" = 0.001,
        Foot => "ft" = 0.3048,
        Inch => "in" = 0.0254,
        Yard => "yd" = 0.9144,
        Mile => "mile" = 1609.344,
        NauticalMile => "nmi" = 1852.0,
        Chi => "市尺" = 0.33333,
    }
}

linear_units! {
    /// Weight units, base: kilogram.
    WeightUnit {
        Kilogram => "kg" = 1.0,
        Gram => "g" = 0.001,
        Milligram => "mg" = 0.000001,
        Pound => "lb" = 0.453592,
        Ounce => "oz" = 0.0283495,
        Tonne => "t" = 1000.0,
        Jin => "斤" = 0.5,
        Liang => "两" = 0.05,
    }
}

linear_units! {
    /// Area units, base: square meter.
    AreaUnit {
        SquareMeter => "m²" = 1.0,
        SquareKilometer => "km²" = 1_000_000.0,
        Hectare => "ha" = 10_000.0,
        Acre => "acre" = 4046.86,
        SquareFoot => "ft²" = 0.092903,
        SquareInch => "in²" = 0.00064516,
        Mu => "亩" = 666.667,
    }
}

linear_units! {
    /// Volume units, base: liter.
    VolumeUnit {
        Liter => "l" = 1.0,
        Milliliter => "ml" = 0.001,
        CubicMeter => "m³" = 1000.0,
        Gallon => "gal" = 3.78541,
        Quart => "qt" = 0.946353,
        Pint => "pt" = 0.473176,
        Cup => "cup" = 0.236588,
    }
}

linear_units! {
    /// Speed units, base: meter per second.
    SpeedUnit {
        MeterPerSecond => "m/s" = 1.0,
        KilometerPerHour => "km/h" = 0.277778,
        MilePerHour => "mph" = 0.44704,
        Knot => "knot" = 0.514444,
        FootPerSecond => "ft/s" = 0.3048,
    }
}

linear_units! {
    /// Time units, base: second. Month and year are fixed 30/365-day spans.
    TimeUnit {
        Second => "s" = 1.0,
        Minute => "min" = 60.0,
        Hour => "h" = 3600.0,
        Day => "d" = 86_400.0,
        Week => "week" = 604_800.0,
        Month => "month" = 2_592_000.0,
        Year => "year" = 31_536_000.0,
    }
}

/// Legacy area key kept readable for ledgers written before `m²` was canonical.
const LEGACY_SQUARE_METER: &str = "㎡";

/// Returns the factor of `symbol` within `category`'s linear table.
///
/// Temperature and currency have no factor table and always miss here.
pub fn rate_of(category: Category, symbol: &str) -> Result<f64, ConversionError> {
    let factor = match category {
        Category::Length => LengthUnit::from_symbol(symbol).map(LengthUnit::factor),
        Category::Weight => WeightUnit::from_symbol(symbol).map(WeightUnit::factor),
        Category::Area => {
            let symbol = if symbol == LEGACY_SQUARE_METER { "m²" } else { symbol };
            AreaUnit::from_symbol(symbol).map(AreaUnit::factor)
        }
        Category::Volume => VolumeUnit::from_symbol(symbol).map(VolumeUnit::factor),
        Category::Speed => SpeedUnit::from_symbol(symbol).map(SpeedUnit::factor),
        Category::Time => TimeUnit::from_symbol(symbol).map(TimeUnit::factor),
        Category::Temperature | Category::Currency => None,
    };

    factor.ok_or_else(|| ConversionError::UnknownUnit {
        category,
        unit: symbol.to_string(),
    })
}

/// The complete, ordered unit set of a category (symbols / currency codes).
pub fn unit_symbols(category: Category) -> Vec<&'static str> {
    match category {
        Category::Length => LengthUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Weight => WeightUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Area => AreaUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Volume => VolumeUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Speed => SpeedUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Time => TimeUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Temperature => TemperatureUnit::ALL.iter().map(|u| u.symbol()).collect(),
        Category::Currency => Currency::ALL.iter().map(|c| c.code()).collect(),
    }
}

/// Display label for a unit. Only temperature differs from its symbol.
pub fn unit_label(category: Category, symbol: &str) -> String {
    if category == Category::Temperature
        && let Some(unit) = TemperatureUnit::from_symbol(symbol)
    {
        return unit.label().to_string();
    }
    symbol.to_string()
}

// ── Temperature ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: &'static [TemperatureUnit] = &[
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "c",
            TemperatureUnit::Fahrenheit => "f",
            TemperatureUnit::Kelvin => "k",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "c" => Some(TemperatureUnit::Celsius),
            "f" => Some(TemperatureUnit::Fahrenheit),
            "k" => Some(TemperatureUnit::Kelvin),
            _ => None,
        }
    }

    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - 273.15,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + 273.15,
        }
    }
}

// ── Currency ────────────────────────────────────────────────────────────────

/// Currencies with a fixed rate against the USD pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Cny,
    Eur,
    Gbp,
    Jpy,
    Aud,
    Cad,
    Chf,
    Hkd,
    Krw,
}

impl Currency {
    pub const PIVOT: Currency = Currency::Usd;

    pub const ALL: &'static [Currency] = &[
        Currency::Usd,
        Currency::Cny,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Hkd,
        Currency::Krw,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cny => "CNY",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Hkd => "HKD",
            Currency::Krw => "KRW",
        }
    }

    /// Units of this currency per 1 USD.
    pub fn rate(self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Cny => 7.25,
            Currency::Eur => 0.92,
            Currency::Gbp => 0.79,
            Currency::Jpy => 151.5,
            Currency::Aud => 1.52,
            Currency::Cad => 1.36,
            Currency::Chf => 0.89,
            Currency::Hkd => 7.82,
            Currency::Krw => 1350.0,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

/// Rate of `code` against the pivot currency.
pub fn currency_rate(code: &str) -> Result<f64, ConversionError> {
    Currency::from_code(code)
        .map(Currency::rate)
        .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
}
