//! # nanopayoff
//!
//! Deterministic profit/loss profiles for portfolios of stock and option
//! positions, as a function of the underlying price.
//!
//! ## Features
//!
//! - **Position model**: long/short stock, calls and puts with supplied premiums
//! - **Range resolution**: evaluation bounds bracketing every strike and
//!   purchase price with a configurable margin
//! - **Exact curves**: per-position lines and an aggregate curve sampled at every
//!   kink, so straight-line rendering is exact
//! - **Pure computation**: no caching, no shared state; recompute on every change
//!
//! ## Quick Start
//!
//! ```
//! use nanopayoff::{Direction, PayoffEngine, Portfolio, Position};
//!
//! let mut portfolio = Portfolio::new();
//! portfolio.push(Position::call(Direction::Long, 50.0, 2.0).unwrap());
//!
//! let report = PayoffEngine::default().compute(&portfolio).unwrap();
//!
//! assert_eq!(report.bounds.low(), 35.0);
//! assert_eq!(report.bounds.high(), 65.0);
//!
//! let curve: Vec<(f64, f64)> = report
//!     .aggregate_curve
//!     .iter()
//!     .map(|p| (p.price, p.profit))
//!     .collect();
//! assert_eq!(curve, vec![(35.0, -2.0), (50.0, -2.0), (65.0, 13.0)]);
//! ```
//!
//! ## Payoff Conventions
//!
//! | Position | Payoff at price `p` (long) |
//! |----------|----------------------------|
//! | **Stock** | `p - purchase` |
//! | **Call** | `-premium` if `p <= strike`, else `p - strike - premium` |
//! | **Put** | `p - strike + premium` if `p < strike`, else `premium` |
//!
//! Short positions negate the long payoff at every price:
//!
//! ```
//! use nanopayoff::{Direction, Position};
//!
//! let long = Position::put(Direction::Long, 50.0, 3.0).unwrap();
//! let short = Position::put(Direction::Short, 50.0, 3.0).unwrap();
//!
//! assert_eq!(long.evaluate(49.0), 2.0);
//! assert_eq!(short.evaluate(49.0), -2.0);
//! ```
//!
//! ## Combining Positions
//!
//! The aggregate curve is sampled at the bounds plus every distinct strike:
//!
//! ```
//! use nanopayoff::{Direction, PayoffEngine, Portfolio, Position};
//!
//! // Long call + short put at the same strike
//! let portfolio: Portfolio = [
//!     Position::call(Direction::Long, 50.0, 2.0).unwrap(),
//!     Position::put(Direction::Short, 50.0, 3.0).unwrap(),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = PayoffEngine::default().compute(&portfolio).unwrap();
//! assert_eq!(report.aggregate_curve.len(), 3); // 35, 50, 65
//! assert_eq!(report.aggregate_curve.profit_at(40.0), Some(5.0));
//! assert_eq!(report.aggregate_curve.profit_at(60.0), Some(5.0));
//! ```
//!
//! ## Errors
//!
//! Nothing is computed for an empty portfolio:
//!
//! ```
//! use nanopayoff::{PayoffEngine, PayoffError, Portfolio};
//!
//! let err = PayoffEngine::default().compute(&Portfolio::new()).unwrap_err();
//! assert_eq!(err, PayoffError::EmptyPortfolio);
//! ```

pub mod curve;
mod direction;
pub mod engine;
mod error;
mod option_type;
pub mod portfolio;
pub mod range;
mod request;
mod types;

// Re-export public API
pub use curve::PayoffCurve;
pub use direction::Direction;
pub use engine::{EngineConfig, PayoffEngine, PayoffReport};
pub use error::{PayoffError, PositionError, Result};
pub use option_type::OptionType;
pub use portfolio::{Instrument, Portfolio, Position, PositionConfig};
pub use range::{DEFAULT_MARGIN, resolve_bounds};
pub use request::ChartRequest;
pub use types::{PayoffPoint, PriceBounds};
