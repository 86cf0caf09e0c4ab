//! Money value object
//!
//! Amounts are stored as integer hundredths so that parsing, summing and
//! splitting never lose a cent. User input is accepted the way people type
//! prices into a form: `"$1,250,000.50"`, `"1 250 000"`, `"PKR 45,000"`.

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// A non-negative currency amount with two decimal places (Value Object)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };
    pub const MAX: Money = Money { cents: i64::MAX };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn from_units(units: i64) -> Self {
        Self {
            cents: units.saturating_mul(100),
        }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Parse a user-typed currency string.
    ///
    /// Currency symbols or codes around the number are ignored, as are
    /// thousands separators (`,`, `_`, spaces). Negative amounts and more
    /// than two decimal places are rejected.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let body = strip_decoration(input)
            .ok_or_else(|| DomainError::InvalidAmount(input.to_string()))?;
        if body.starts_with('-') {
            return Err(DomainError::InvalidAmount(format!(
                "{} (amount cannot be negative)",
                input.trim()
            )));
        }
        parse_hundredths(body)
            .map(Self::from_cents)
            .map_err(|reason| DomainError::InvalidAmount(format!("{} ({})", input.trim(), reason)))
    }

    /// Amount formatted with thousands separators and two decimals.
    pub fn format_grouped(&self) -> String {
        let units = self.cents / 100;
        let fraction = self.cents % 100;
        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{}.{:02}", grouped, fraction)
    }

    /// Amount formatted with a leading currency symbol.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.format_grouped()
        } else {
            format!("{}{}", symbol, self.format_grouped())
        }
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        let cents = self.cents.checked_sub(other.cents)?;
        (cents >= 0).then_some(Money { cents })
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates at [`Money::MAX`].
    fn add(self, rhs: Money) -> Money {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl Sub for Money {
    type Output = Money;

    /// Saturates at zero; amounts are never negative.
    fn sub(self, rhs: Money) -> Money {
        Money {
            cents: (self.cents - rhs.cents).max(0),
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_grouped())
    }
}

impl std::str::FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The backend sends prices either as JSON numbers or as decimal strings.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n >= 0.0 && n.is_finite() => {
                let cents = (n * 100.0).round();
                if cents >= i64::MAX as f64 {
                    return Err(serde::de::Error::custom(format!("amount too large: {}", n)));
                }
                Ok(Money::from_cents(cents as i64))
            }
            Raw::Number(n) => Err(serde::de::Error::custom(format!("invalid amount: {}", n))),
            Raw::Text(s) => Money::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Cut away currency symbols and codes around the numeric body.
///
/// Returns `None` when the input holds no digit at all.
pub(crate) fn strip_decoration(input: &str) -> Option<&str> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let last_digit = s.rfind(|c: char| c.is_ascii_digit())?;
    let first_digit = s.find(|c: char| c.is_ascii_digit())?;

    let mut start = first_digit;
    // `.5` and `$.5` keep their point; `Rs.500` does not.
    if start > 0
        && bytes[start - 1] == b'.'
        && (start == 1 || !bytes[start - 2].is_ascii_alphabetic())
    {
        start -= 1;
    }
    if start > 0 && bytes[start - 1] == b'-' {
        start -= 1;
    }
    Some(&s[start..=last_digit])
}

/// Parse a decimal body such as `1,250.5` into hundredths.
pub(crate) fn parse_hundredths(body: &str) -> Result<i64, &'static str> {
    let mut whole: i64 = 0;
    let mut fraction: i64 = 0;
    let mut fraction_digits = 0;
    let mut seen_point = false;
    let mut seen_digit = false;

    for ch in body.chars() {
        match ch {
            '0'..='9' => {
                let digit = i64::from(ch as u8 - b'0');
                seen_digit = true;
                if seen_point {
                    fraction_digits += 1;
                    if fraction_digits > 2 {
                        return Err("at most two decimal places");
                    }
                    fraction = fraction * 10 + digit;
                } else {
                    whole = whole
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(digit))
                        .ok_or("amount too large")?;
                }
            }
            '.' if !seen_point => seen_point = true,
            ',' | '_' | ' ' | '\u{a0}' if !seen_point => {}
            _ => return Err("unexpected character"),
        }
    }

    if !seen_digit {
        return Err("no digits");
    }
    if fraction_digits == 1 {
        fraction *= 10;
    }
    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(fraction))
        .ok_or("amount too large")
}
