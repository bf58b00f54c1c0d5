//! Position direction: Long or Short

use std::fmt;
use std::str::FromStr;

use crate::error::PositionError;

/// Direction of a position.
///
/// Configuration files spell these `"buy"` and `"sell"`; `"long"` and
/// `"short"` are accepted as aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[cfg_attr(feature = "serde", serde(rename = "buy", alias = "long"))]
    Long,
    #[cfg_attr(feature = "serde", serde(rename = "sell", alias = "short"))]
    Short,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }

    /// Apply this direction to a payoff computed for a long holder.
    #[inline]
    pub fn apply(self, long_profit: f64) -> f64 {
        match self {
            Direction::Long => long_profit,
            Direction::Short => -long_profit,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "BUY"),
            Direction::Short => write!(f, "SELL"),
        }
    }
}

impl FromStr for Direction {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(Direction::Long),
            "sell" | "short" => Ok(Direction::Short),
            "" => Err(PositionError::MissingPurchase),
            _ => Err(PositionError::UnknownPurchase(s.to_string())),
        }
    }
}
