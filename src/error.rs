//! Errors for position construction and payoff computation.

/// A position configuration that cannot be turned into a [`Position`](crate::Position).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionError {
    /// No `purchase` value was given.
    #[error("position needs a purchase value (buy or sell)")]
    MissingPurchase,
    /// `purchase` was neither buy nor sell.
    #[error("unknown purchase value '{0}', expected buy or sell")]
    UnknownPurchase(String),
    /// `price` was absent or zero.
    #[error("position needs a non-zero price value")]
    MissingPrice,
    /// `price` was NaN or infinite.
    #[error("price must be finite, got {0}")]
    NonFinitePrice(f64),
    /// An option configuration without `optiontype`.
    #[error("option needs an optiontype value (call or put)")]
    MissingOptionType,
    /// `optiontype` was neither call nor put.
    #[error("unknown optiontype '{0}', expected call or put")]
    UnknownOptionType(String),
    /// An option configuration whose `strike` was absent or zero.
    #[error("option needs a non-zero strike value")]
    MissingStrike,
    /// `strike` was NaN or infinite.
    #[error("strike must be finite, got {0}")]
    NonFiniteStrike(f64),
}

/// Errors returned by range resolution and payoff computation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffError {
    /// A position failed validation.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
    /// Bounds or curves were requested for a portfolio with no positions.
    #[error("portfolio is empty")]
    EmptyPortfolio,
    /// The range margin must be finite and strictly positive.
    #[error("margin must be positive and finite, got {0}")]
    InvalidMargin(f64),
    /// Explicit bounds with `low >= high` or a non-finite end.
    #[error("invalid bounds: low {low} must be finite and below high {high}")]
    InvalidBounds { low: f64, high: f64 },
    /// An option strike falls outside explicitly supplied bounds.
    #[error("strike {strike} lies outside bounds [{low}, {high}]")]
    StrikeOutOfBounds { strike: f64, low: f64, high: f64 },
    /// Adding the margin to a structural price does not change it in `f64`.
    #[error("margin {margin} is below floating-point resolution at price {price}")]
    MarginBelowResolution { margin: f64, price: f64 },
    /// Curve samples with a non-finite price or out of ascending price order.
    #[error("curve sample {index} is non-finite or out of price order")]
    UnsortedCurve { index: usize },
}

/// Result alias for payoff computations.
pub type Result<T> = std::result::Result<T, PayoffError>;
