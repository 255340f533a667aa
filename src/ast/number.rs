use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// A number literal.
///
/// Held as an exact [`Decimal`] when the source digits fit one without
/// rounding. Longer literals keep their digits as text so nothing is lost.
/// `Display` gives the canonical form either way: no leading zeros in the
/// integer part, no trailing zeros in the fraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Decimal(Decimal),
    Digits(String),
}

impl Number {
    /// Build from a lexed digit string: digits with an optional `.` fraction,
    /// integer part possibly empty (`.5`).
    pub fn from_digits(text: &str) -> Self {
        let canonical = canonical_digits(text);
        match Decimal::from_str(&canonical) {
            Ok(d) if d.normalize().to_string() == canonical => Number::Decimal(d.normalize()),
            _ => Number::Digits(canonical),
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Number::Decimal(d) => Some(d),
            Number::Digits(_) => None,
        }
    }
}

fn canonical_digits(text: &str) -> String {
    let (integer, fraction) = text.split_once('.').unwrap_or((text, ""));
    let integer = match integer.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Decimal(d) => write!(f, "{d}"),
            Number::Digits(digits) => f.write_str(digits),
        }
    }
}

#[test]
fn test_canonical_digits() {
    assert_eq!(canonical_digits("007"), "7");
    assert_eq!(canonical_digits("1.50"), "1.5");
    assert_eq!(canonical_digits(".5"), "0.5");
    assert_eq!(canonical_digits("2.000"), "2");
    assert_eq!(canonical_digits("0"), "0");
}

#[test]
fn test_long_literals_keep_digits() {
    assert_eq!(
        Number::from_digits("123456789012345678901234567890"),
        Number::Digits("123456789012345678901234567890".to_string())
    );
    assert_eq!(
        Number::from_digits("1.00000000000000000000000000001"),
        Number::Digits("1.00000000000000000000000000001".to_string())
    );
    assert!(Number::from_digits("3.14").as_decimal().is_some());
}
