//! Payoff engine: per-position segments and the aggregate curve.
//!
//! Every position's payoff is piecewise linear. A stock is a single line; an
//! option bends once, at its strike. The portfolio payoff is their sum, so it
//! is piecewise linear with kinks only at the union of all strikes. Sampling
//! at the range ends plus every strike therefore reproduces the aggregate
//! exactly with the fewest points.

use log::debug;

use crate::curve::PayoffCurve;
use crate::error::{PayoffError, Result};
use crate::portfolio::{Portfolio, Position};
use crate::range::{self, DEFAULT_MARGIN};
use crate::types::{PayoffPoint, PriceBounds};

/// Engine configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Distance added below the lowest and above the highest structural price
    pub margin: f64,
}

impl EngineConfig {
    pub fn with_margin(margin: f64) -> Self {
        Self { margin }
    }

    /// Returns `Err` if the margin is not finite and positive.
    pub fn validate(&self) -> Result<()> {
        range::validate_margin(self.margin)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }
}

/// Everything a renderer needs to draw a payoff chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PayoffReport {
    /// Horizontal extent of the chart
    pub bounds: PriceBounds,
    /// One curve per position, in portfolio order
    pub per_position_segments: Vec<PayoffCurve>,
    /// Portfolio payoff sampled at every inflection price
    pub aggregate_curve: PayoffCurve,
    /// Display label, passed through untouched
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
}

impl PayoffReport {
    /// Attach a display label.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Prices at which the portfolio breaks even.
    pub fn break_evens(&self) -> Vec<f64> {
        self.aggregate_curve.break_evens()
    }

    /// `(lowest, highest)` profit across the aggregate and every position
    /// line, for sizing a vertical axis.
    pub fn profit_range(&self) -> Option<(f64, f64)> {
        std::iter::once(&self.aggregate_curve)
            .chain(self.per_position_segments.iter())
            .filter_map(PayoffCurve::profit_range)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

/// Computes payoff reports for portfolios.
///
/// Stateless apart from its configuration: every call derives bounds and
/// curves from the portfolio it is given.
///
/// ```
/// use nanopayoff::{Direction, PayoffEngine, Portfolio, Position};
///
/// let mut portfolio = Portfolio::new();
/// portfolio.push(Position::call(Direction::Long, 50.0, 2.0).unwrap());
///
/// let report = PayoffEngine::default().compute(&portfolio).unwrap();
/// assert_eq!(report.bounds.low(), 35.0);
/// assert_eq!(report.bounds.high(), 65.0);
/// assert_eq!(report.aggregate_curve.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffEngine {
    config: EngineConfig,
}

impl PayoffEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve bounds for `portfolio` and compute its report.
    pub fn compute(&self, portfolio: &Portfolio) -> Result<PayoffReport> {
        let bounds = range::resolve_bounds(portfolio, self.config.margin)?;
        self.compute_with_bounds(portfolio, bounds)
    }

    /// Compute a report over caller-supplied bounds.
    ///
    /// # Errors
    ///
    /// - [`PayoffError::EmptyPortfolio`] if `portfolio` has no positions
    /// - [`PayoffError::StrikeOutOfBounds`] if any strike lies outside `bounds`
    pub fn compute_with_bounds(
        &self,
        portfolio: &Portfolio,
        bounds: PriceBounds,
    ) -> Result<PayoffReport> {
        if portfolio.is_empty() {
            return Err(PayoffError::EmptyPortfolio);
        }
        let per_position_segments = position_segments(portfolio, bounds)?;
        let aggregate_curve = aggregate_curve(portfolio, bounds)?;

        debug!(
            "payoff over {bounds}: {} positions, {} inflection points",
            portfolio.len(),
            aggregate_curve.len()
        );

        Ok(PayoffReport {
            bounds,
            per_position_segments,
            aggregate_curve,
            title: None,
        })
    }
}

/// The line for one position: `[low, high]` for a stock,
/// `[low, strike, high]` for an option.
pub fn position_segment(position: &Position, bounds: PriceBounds) -> Result<PayoffCurve> {
    let sample = |price: f64| PayoffPoint::new(price, position.evaluate(price));

    let points = match position.strike() {
        Some(strike) => {
            check_strike(strike, bounds)?;
            vec![sample(bounds.low()), sample(strike), sample(bounds.high())]
        }
        None => vec![sample(bounds.low()), sample(bounds.high())],
    };
    Ok(PayoffCurve::from_sorted(points))
}

/// One line per position, in portfolio order.
pub fn position_segments(portfolio: &Portfolio, bounds: PriceBounds) -> Result<Vec<PayoffCurve>> {
    portfolio
        .iter()
        .map(|p| position_segment(p, bounds))
        .collect()
}

/// Distinct prices where the aggregate payoff may bend, ascending:
/// the two bounds plus every option strike.
pub fn inflection_prices(portfolio: &Portfolio, bounds: PriceBounds) -> Result<Vec<f64>> {
    let mut prices = Vec::with_capacity(portfolio.len() + 2);
    prices.push(bounds.low());
    prices.push(bounds.high());
    for strike in portfolio.strikes() {
        check_strike(strike, bounds)?;
        prices.push(strike);
    }

    prices.sort_by(f64::total_cmp);
    // A strike sitting exactly on a bound, or shared by two options,
    // must yield a single sample.
    prices.dedup();
    Ok(prices)
}

/// Portfolio payoff at every inflection price.
pub fn aggregate_curve(portfolio: &Portfolio, bounds: PriceBounds) -> Result<PayoffCurve> {
    if portfolio.is_empty() {
        return Err(PayoffError::EmptyPortfolio);
    }
    let points = inflection_prices(portfolio, bounds)?
        .into_iter()
        .map(|price| PayoffPoint::new(price, portfolio.evaluate(price)))
        .collect();
    Ok(PayoffCurve::from_sorted(points))
}

fn check_strike(strike: f64, bounds: PriceBounds) -> Result<()> {
    if bounds.contains(strike) {
        Ok(())
    } else {
        Err(PayoffError::StrikeOutOfBounds {
            strike,
            low: bounds.low(),
            high: bounds.high(),
        })
    }
}
