//! Batch evaluation over many independent portfolios.

use crate::engine::{PayoffEngine, PayoffReport};
use crate::error::Result;

use super::Portfolio;

/// Compute a report for each portfolio.
///
/// Portfolios are independent, so a failure in one does not affect the
/// others; each slot carries its own `Result`. With the `parallel` feature the
/// work is spread over the rayon thread pool. Output order always matches
/// input order.
///
/// # Example
///
/// ```
/// use nanopayoff::portfolio::{compute_all, Portfolio, Position};
/// use nanopayoff::{Direction, PayoffEngine};
///
/// let books: Vec<Portfolio> = [90.0, 100.0, 110.0]
///     .iter()
///     .map(|&k| [Position::call(Direction::Long, k, 2.0).unwrap()].into_iter().collect())
///     .collect();
///
/// let reports = compute_all(&PayoffEngine::default(), &books);
/// assert_eq!(reports.len(), 3);
/// assert_eq!(reports[1].as_ref().unwrap().bounds.low(), 85.0);
/// ```
#[cfg(feature = "parallel")]
pub fn compute_all(engine: &PayoffEngine, portfolios: &[Portfolio]) -> Vec<Result<PayoffReport>> {
    use rayon::prelude::*;

    portfolios.par_iter().map(|p| engine.compute(p)).collect()
}

/// Compute a report for each portfolio, sequentially.
///
/// See the `parallel` variant for details.
#[cfg(not(feature = "parallel"))]
pub fn compute_all(engine: &PayoffEngine, portfolios: &[Portfolio]) -> Vec<Result<PayoffReport>> {
    portfolios.iter().map(|p| engine.compute(p)).collect()
}
