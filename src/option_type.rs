//! Option type: Call or Put

use std::fmt;
use std::str::FromStr;

use crate::error::PositionError;

/// Whether an option grants the right to buy (call) or sell (put).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Pays out once the underlying trades above the strike.
    Call,
    /// Mirror image of the call around the strike.
    Put,
}

impl OptionType {
    /// Payoff for a long holder at `price`, net of the premium.
    ///
    /// A call is flat at `-premium` up to and including the strike. A put is
    /// flat at `premium` from the strike upward. The strict comparison on the
    /// put side keeps both kinks exactly at the strike.
    #[inline]
    pub fn long_payoff(self, price: f64, strike: f64, premium: f64) -> f64 {
        match self {
            OptionType::Call => {
                if price <= strike {
                    -premium
                } else {
                    price - strike - premium
                }
            }
            OptionType::Put => {
                if price < strike {
                    price - strike + premium
                } else {
                    premium
                }
            }
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "CALL"),
            OptionType::Put => write!(f, "PUT"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            "" => Err(PositionError::MissingOptionType),
            _ => Err(PositionError::UnknownOptionType(s.to_string())),
        }
    }
}
