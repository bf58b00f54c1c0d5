//! Core types: PayoffPoint, PriceBounds

use std::fmt;

use crate::error::{PayoffError, Result};

/// One sample of a piecewise-linear payoff function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffPoint {
    /// Underlying price at which the payoff is sampled
    pub price: f64,
    /// Profit (negative = loss) at that price
    pub profit: f64,
}

impl PayoffPoint {
    #[inline]
    pub fn new(price: f64, profit: f64) -> Self {
        Self { price, profit }
    }
}

impl fmt::Display for PayoffPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.price, self.profit)
    }
}

/// Price interval the payoff is evaluated over.
///
/// Always satisfies `low < high` with both ends finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounds"))]
pub struct PriceBounds {
    low: f64,
    high: f64,
}

/// Unvalidated wire form of [`PriceBounds`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    low: f64,
    high: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for PriceBounds {
    type Error = PayoffError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        PriceBounds::new(raw.low, raw.high)
    }
}

impl PriceBounds {
    /// Create bounds, rejecting `low >= high` and non-finite ends.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(PayoffError::InvalidBounds { low, high });
        }
        Ok(Self { low, high })
    }

    /// Lower end of the range.
    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper end of the range.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// `high - low`, always positive.
    #[inline]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if `price` lies within `[low, high]`.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }
}

impl fmt::Display for PriceBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_accept_ordered_pair() {
        let b = PriceBounds::new(85.0, 115.0).unwrap();
        assert_eq!(b.low(), 85.0);
        assert_eq!(b.high(), 115.0);
        assert_eq!(b.width(), 30.0);
    }

    #[test]
    fn bounds_reject_degenerate() {
        assert_eq!(
            PriceBounds::new(100.0, 100.0),
            Err(PayoffError::InvalidBounds {
                low: 100.0,
                high: 100.0
            })
        );
        assert!(PriceBounds::new(120.0, 80.0).is_err());
        assert!(PriceBounds::new(f64::NEG_INFINITY, 80.0).is_err());
        assert!(PriceBounds::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn contains_is_inclusive() {
        let b = PriceBounds::new(35.0, 65.0).unwrap();
        assert!(b.contains(35.0));
        assert!(b.contains(65.0));
        assert!(b.contains(50.0));
        assert!(!b.contains(34.99));
        assert!(!b.contains(65.01));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", PriceBounds::new(85.0, 115.0).unwrap()), "[85, 115]");
        assert_eq!(format!("{}", PayoffPoint::new(50.0, -2.0)), "(50, -2)");
    }
}
