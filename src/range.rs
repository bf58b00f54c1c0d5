//! Evaluation range resolution.
//!
//! The range brackets every structural price of a portfolio (option strikes
//! and stock purchase prices) with a fixed margin on both sides, so every kink
//! in the payoff is visible with some flat or sloped context around it.

use log::trace;

use crate::error::{PayoffError, Result};
use crate::portfolio::Portfolio;
use crate::types::PriceBounds;

/// Margin added below the lowest and above the highest structural price.
pub const DEFAULT_MARGIN: f64 = 15.0;

/// Check that a margin is finite and strictly positive.
///
/// A positive margin is what guarantees `low < high` for a single-price
/// portfolio.
pub fn validate_margin(margin: f64) -> Result<()> {
    if !margin.is_finite() || margin <= 0.0 {
        return Err(PayoffError::InvalidMargin(margin));
    }
    Ok(())
}

/// Compute the evaluation range for `portfolio`.
///
/// `low = min(structural) - margin`, `high = max(structural) + margin`.
///
/// # Errors
///
/// - [`PayoffError::InvalidMargin`] if `margin` is not finite and positive
/// - [`PayoffError::EmptyPortfolio`] if there is nothing to bracket
/// - [`PayoffError::MarginBelowResolution`] if a price is so large in
///   magnitude that adding or subtracting `margin` leaves it unchanged
///   (around `1e17` for the default margin)
pub fn resolve_bounds(portfolio: &Portfolio, margin: f64) -> Result<PriceBounds> {
    validate_margin(margin)?;

    let mut prices = portfolio.iter().map(|p| p.structural_price());
    let first = prices.next().ok_or(PayoffError::EmptyPortfolio)?;
    let (lowest, highest) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

    trace!("structural prices span [{lowest}, {highest}], margin {margin}");
    let (low, high) = (lowest - margin, highest + margin);
    if low >= lowest {
        return Err(PayoffError::MarginBelowResolution {
            margin,
            price: lowest,
        });
    }
    if high <= highest {
        return Err(PayoffError::MarginBelowResolution {
            margin,
            price: highest,
        });
    }
    PriceBounds::new(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Position};

    fn portfolio(positions: Vec<Position>) -> Portfolio {
        positions.into_iter().collect()
    }

    #[test]
    fn single_stock() {
        let p = portfolio(vec![Position::stock(Direction::Long, 100.0).unwrap()]);
        let bounds = resolve_bounds(&p, DEFAULT_MARGIN).unwrap();
        assert_eq!(bounds.low(), 85.0);
        assert_eq!(bounds.high(), 115.0);
    }

    #[test]
    fn option_uses_strike_not_premium() {
        let p = portfolio(vec![Position::call(Direction::Long, 50.0, 2.0).unwrap()]);
        let bounds = resolve_bounds(&p, DEFAULT_MARGIN).unwrap();
        assert_eq!(bounds, PriceBounds::new(35.0, 65.0).unwrap());
    }

    #[test]
    fn mixed_portfolio_spans_all() {
        let p = portfolio(vec![
            Position::stock(Direction::Long, 100.0).unwrap(),
            Position::put(Direction::Long, 80.0, 1.5).unwrap(),
            Position::call(Direction::Short, 130.0, 2.5).unwrap(),
        ]);
        let bounds = resolve_bounds(&p, 10.0).unwrap();
        assert_eq!(bounds.low(), 70.0);
        assert_eq!(bounds.high(), 140.0);
    }

    #[test]
    fn empty_portfolio_rejected() {
        assert_eq!(
            resolve_bounds(&Portfolio::new(), DEFAULT_MARGIN),
            Err(PayoffError::EmptyPortfolio)
        );
    }

    #[test]
    fn bad_margin_rejected() {
        let p = portfolio(vec![Position::stock(Direction::Long, 100.0).unwrap()]);
        assert_eq!(resolve_bounds(&p, 0.0), Err(PayoffError::InvalidMargin(0.0)));
        assert_eq!(resolve_bounds(&p, -5.0), Err(PayoffError::InvalidMargin(-5.0)));
        assert!(resolve_bounds(&p, f64::NAN).is_err());
        assert!(resolve_bounds(&p, f64::INFINITY).is_err());
    }

    #[test]
    fn margin_lost_at_huge_prices() {
        let p = portfolio(vec![Position::stock(Direction::Long, 1e18).unwrap()]);
        assert_eq!(
            resolve_bounds(&p, DEFAULT_MARGIN),
            Err(PayoffError::MarginBelowResolution {
                margin: 15.0,
                price: 1e18
            })
        );

        // Only the upper side is too coarse here
        let p = portfolio(vec![
            Position::stock(Direction::Long, 1.0).unwrap(),
            Position::stock(Direction::Long, 1e18).unwrap(),
        ]);
        assert_eq!(
            resolve_bounds(&p, DEFAULT_MARGIN),
            Err(PayoffError::MarginBelowResolution {
                margin: 15.0,
                price: 1e18
            })
        );

        // A margin that survives rounding is fine
        assert!(resolve_bounds(&p, 1e3).is_ok());
    }
}
