//! Piecewise-linear payoff curves and queries over them.

use crate::error::{PayoffError, Result};
use crate::types::PayoffPoint;

/// A piecewise-linear payoff function, stored as samples sorted ascending by
/// price.
///
/// Connecting consecutive samples with straight lines reproduces the function
/// exactly, provided every kink is sampled. Curves produced by the
/// [`engine`](crate::engine) satisfy this.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<PayoffPoint>", into = "Vec<PayoffPoint>")
)]
pub struct PayoffCurve {
    points: Vec<PayoffPoint>,
}

impl PayoffCurve {
    /// Wrap samples that are already sorted ascending by price.
    pub fn from_sorted(points: Vec<PayoffPoint>) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[0].price <= w[1].price),
            "payoff samples must be sorted by price"
        );
        Self { points }
    }

    /// Wrap samples after checking that prices are finite and ascending.
    pub fn from_points(points: Vec<PayoffPoint>) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.price.is_finite()) {
            return Err(PayoffError::UnsortedCurve { index });
        }
        if let Some(index) = points.windows(2).position(|w| w[0].price > w[1].price) {
            return Err(PayoffError::UnsortedCurve { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// The samples, ascending by price.
    #[inline]
    pub fn points(&self) -> &[PayoffPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PayoffPoint> {
        self.points.iter()
    }

    /// Sample prices, ascending.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Profit at `price`, interpolating linearly between samples.
    ///
    /// Returns `None` outside the sampled range.
    pub fn profit_at(&self, price: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if !(first.price..=last.price).contains(&price) {
            return None;
        }

        // First sample at or above `price`
        let i = self.points.partition_point(|p| p.price < price);
        let right = self.points[i];
        if right.price == price || i == 0 {
            return Some(right.profit);
        }
        let left = self.points[i - 1];
        Some(interpolate(left, right, price))
    }

    /// Prices at which the curve is zero.
    ///
    /// Sign changes between samples are solved linearly. A sample that is
    /// exactly zero is reported once; a flat stretch at zero reports only its
    /// two ends.
    pub fn break_evens(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let n = self.points.len();

        for i in 0..n {
            let p = self.points[i];
            if p.profit == 0.0 {
                let prev_zero = i > 0 && self.points[i - 1].profit == 0.0;
                let next_zero = i + 1 < n && self.points[i + 1].profit == 0.0;
                if !(prev_zero && next_zero) {
                    out.push(p.price);
                }
            }
            if i + 1 < n {
                let q = self.points[i + 1];
                if (p.profit < 0.0 && q.profit > 0.0) || (p.profit > 0.0 && q.profit < 0.0) {
                    out.push(root(p, q));
                }
            }
        }
        out
    }

    /// Highest sampled profit. Exact for a piecewise-linear curve.
    pub fn max_profit(&self) -> Option<f64> {
        self.points.iter().map(|p| p.profit).reduce(f64::max)
    }

    /// Lowest sampled profit (most negative = worst loss).
    pub fn max_loss(&self) -> Option<f64> {
        self.points.iter().map(|p| p.profit).reduce(f64::min)
    }

    /// `(lowest, highest)` profit, for choosing a vertical axis domain.
    pub fn profit_range(&self) -> Option<(f64, f64)> {
        Some((self.max_loss()?, self.max_profit()?))
    }
}

impl TryFrom<Vec<PayoffPoint>> for PayoffCurve {
    type Error = PayoffError;

    fn try_from(points: Vec<PayoffPoint>) -> Result<Self> {
        Self::from_points(points)
    }
}

impl From<PayoffCurve> for Vec<PayoffPoint> {
    fn from(curve: PayoffCurve) -> Self {
        curve.points
    }
}

impl<'a> IntoIterator for &'a PayoffCurve {
    type Item = &'a PayoffPoint;
    type IntoIter = std::slice::Iter<'a, PayoffPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[inline]
fn interpolate(a: PayoffPoint, b: PayoffPoint, price: f64) -> f64 {
    let t = (price - a.price) / (b.price - a.price);
    a.profit + t * (b.profit - a.profit)
}

/// Zero of the line through `a` and `b`. Caller guarantees a sign change.
#[inline]
fn root(a: PayoffPoint, b: PayoffPoint) -> f64 {
    a.price - a.profit * (b.price - a.price) / (b.profit - a.profit)
}
