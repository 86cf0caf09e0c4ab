//! Percentage value object

use super::error::DomainError;
use super::money::{parse_hundredths, strip_decoration, Money};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A percentage between 0 and 100 with two decimal places.
///
/// Stored as hundredths of a percent, so `2.5%` is `250`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage {
    hundredths: u32,
}

impl Percentage {
    pub const ZERO: Percentage = Percentage { hundredths: 0 };
    pub const FULL: Percentage = Percentage { hundredths: 10_000 };

    /// Build from a whole percent value.
    ///
    /// Returns `None` above 100.
    pub fn from_whole(percent: u32) -> Option<Self> {
        (percent <= 100).then_some(Self {
            hundredths: percent * 100,
        })
    }

    pub fn from_hundredths(hundredths: u32) -> Option<Self> {
        (hundredths <= 10_000).then_some(Self { hundredths })
    }

    pub fn hundredths(&self) -> u32 {
        self.hundredths
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }

    /// Parse `"20"`, `"2.5"` or `"2.5%"`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let body = strip_decoration(input)
            .ok_or_else(|| DomainError::InvalidPercentage(input.to_string()))?;
        if body.starts_with('-') {
            return Err(DomainError::InvalidPercentage(format!(
                "{} (cannot be negative)",
                input.trim()
            )));
        }
        let value = parse_hundredths(body)
            .map_err(|reason| DomainError::InvalidPercentage(format!("{} ({})", input.trim(), reason)))?;
        u32::try_from(value)
            .ok()
            .and_then(Self::from_hundredths)
            .ok_or_else(|| {
                DomainError::InvalidPercentage(format!("{} (must be at most 100)", input.trim()))
            })
    }

    /// This percentage of `amount`, rounded half up to the cent.
    pub fn of(&self, amount: Money) -> Money {
        let scaled = i128::from(amount.cents()) * i128::from(self.hundredths);
        Money::from_cents(((scaled + 5_000) / 10_000) as i64)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.hundredths / 100;
        let fraction = self.hundredths % 100;
        if fraction == 0 {
            write!(f, "{}%", whole)
        } else if fraction % 10 == 0 {
            write!(f, "{}.{}%", whole, fraction / 10)
        } else {
            write!(f, "{}.{:02}%", whole, fraction)
        }
    }
}

impl std::str::FromStr for Percentage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Percentage::parse(s)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if (0.0..=100.0).contains(&n) => {
                Ok(Percentage {
                    hundredths: (n * 100.0).round() as u32,
                })
            }
            Raw::Number(n) => Err(serde::de::Error::custom(format!("invalid percentage: {}", n))),
            Raw::Text(s) => Percentage::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}
