use std::fmt;

/// Money is stored as integer minor units (cents) to avoid floating-point drift.
/// 1 unit = 100 minor units, so 1000.00 = 100000.
pub type Money = i64;

/// Format minor units as a human-readable decimal string.
/// Example: 100000 -> "1000.00", -1234 -> "-12.34"
pub fn format_money(amount: Money) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Parse a decimal string into minor units.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
pub fn parse_money(input: &str) -> Result<Money, ParseMoneyError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-');

    let parts: Vec<&str> = input.split('.').collect();
    let (units, fraction) = match parts.as_slice() {
        [units] => (parse_units(units)?, 0),
        [units, fraction] => {
            let units = if units.is_empty() {
                0
            } else {
                parse_units(units)?
            };
            (units, parse_fraction(fraction)?)
        }
        _ => return Err(ParseMoneyError::InvalidFormat),
    };
    let amount = units
        .checked_mul(100)
        .and_then(|minor| minor.checked_add(fraction))
        .ok_or(ParseMoneyError::InvalidFormat)?;

    Ok(if negative { -amount } else { amount })
}

fn parse_units(s: &str) -> Result<Money, ParseMoneyError> {
    s.parse().map_err(|_| ParseMoneyError::InvalidFormat)
}

// One digit means tens of minor units; extra digits are truncated.
fn parse_fraction(s: &str) -> Result<Money, ParseMoneyError> {
    match s.len() {
        0 => Ok(0),
        1 => Ok(parse_units(s)? * 10),
        _ => parse_units(s.get(..2).ok_or(ParseMoneyError::InvalidFormat)?),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    InvalidFormat,
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoneyError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseMoneyError {}
