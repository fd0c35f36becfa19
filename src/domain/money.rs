use std::fmt;

/// Money is represented as integer cents to avoid floating-point drift in totals.
/// 1 unit = 100 cents, so $4.50 = 450 cents.
pub type Cents = i64;

/// Largest price the catalog file can hold. Prices are written as float
/// units, and up to this bound every cent value reads back unchanged.
pub const MAX_PRICE: Cents = 1_000_000_000_000_000;

/// Format cents as a human-readable amount with two decimals.
/// Example: 450 -> "4.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Example: "4.50" -> 450, "12.5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let parts: Vec<&str> = input.split('.').collect();
    if parts.iter().any(|p| !p.chars().all(|c| c.is_ascii_digit())) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let cents = match parts.as_slice() {
        [units] => parse_units(units)?.checked_mul(100),
        [units, decimals] => {
            if units.is_empty() && decimals.is_empty() {
                return Err(ParseCentsError::InvalidFormat);
            }
            let units = if units.is_empty() { 0 } else { parse_units(units)? };

            // Pad or truncate the decimal part to 2 digits
            let decimal_cents: i64 = match decimals.len() {
                0 => 0,
                1 => parse_units(decimals)? * 10,
                _ => parse_units(&decimals[..2])?,
            };

            units
                .checked_mul(100)
                .and_then(|c| c.checked_add(decimal_cents))
        }
        _ => return Err(ParseCentsError::InvalidFormat),
    }
    .ok_or(ParseCentsError::OutOfRange)?;

    Ok(if negative { -cents } else { cents })
}

fn parse_units(digits: &str) -> Result<i64, ParseCentsError> {
    digits.parse().map_err(|_| ParseCentsError::InvalidFormat)
}

/// Convert a floating amount of currency units to cents, rounding to the
/// nearest cent.
pub fn cents_from_units(units: f64) -> Option<Cents> {
    let cents = (units * 100.0).round();
    if cents.is_finite() && cents.abs() < i64::MAX as f64 {
        Some(cents as Cents)
    } else {
        None
    }
}

/// Convert cents to a floating amount of currency units.
pub fn units_from_cents(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

/// Serde adapter storing cents as a JSON number of currency units
/// (`450` <-> `4.5`). Amounts outside `0..=MAX_PRICE` are rejected both ways.
pub mod as_units {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};

    use super::{Cents, MAX_PRICE, cents_from_units, units_from_cents};

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        if *cents > MAX_PRICE {
            return Err(ser::Error::custom("price out of range"));
        }
        serializer.serialize_f64(units_from_cents(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let units = f64::deserialize(deserializer)?;
        match cents_from_units(units) {
            Some(cents) if cents < 0 => Err(de::Error::custom("price must not be negative")),
            Some(cents) if cents <= MAX_PRICE => Ok(cents),
            _ => Err(de::Error::custom("price out of range")),
        }
    }
}
