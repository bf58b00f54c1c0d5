//! Portfolio management: position model, configuration, and batch evaluation.
//!
//! A [`Portfolio`] is an ordered list of [`Position`]s owned by the caller.
//! Nothing here caches derived data; bounds and curves are recomputed from the
//! current positions every time they are requested.
//!
//! # Example
//!
//! ```
//! use nanopayoff::portfolio::{Portfolio, Position};
//! use nanopayoff::Direction;
//!
//! let mut portfolio = Portfolio::new();
//! portfolio.push(Position::stock(Direction::Long, 100.0).unwrap());
//! portfolio.push(Position::call(Direction::Short, 110.0, 3.0).unwrap());
//!
//! // Covered call: capped above the strike
//! assert_eq!(portfolio.evaluate(130.0), 13.0);
//! ```

pub mod batch;
pub mod config;
pub mod position;

pub use batch::compute_all;
pub use config::PositionConfig;
pub use position::{Instrument, Position};

use crate::error::PositionError;

/// An ordered collection of positions.
///
/// Insertion order is preserved; it only decides the order of per-position
/// segments in a [`PayoffReport`](crate::PayoffReport).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Create an empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a portfolio from configurations.
    ///
    /// All-or-nothing: the first invalid configuration aborts the build and
    /// its index is returned with the error.
    pub fn from_configs(configs: &[PositionConfig]) -> Result<Self, (usize, PositionError)> {
        let positions = configs
            .iter()
            .enumerate()
            .map(|(i, c)| Position::from_config(c).map_err(|e| (i, e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { positions })
    }

    // === Queries ===

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterator over positions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    /// Get a position by index.
    pub fn get(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    /// Strikes of every option position, in insertion order.
    pub fn strikes(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().filter_map(Position::strike)
    }

    /// Total profit of all positions at `price`.
    pub fn evaluate(&self, price: f64) -> f64 {
        self.positions.iter().map(|p| p.evaluate(price)).sum()
    }

    // === Mutation ===

    /// Append a position.
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Remove and return the position at `index`, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<Position> {
        if index < self.positions.len() {
            Some(self.positions.remove(index))
        } else {
            None
        }
    }

    /// Remove every position.
    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

impl FromIterator<Position> for Portfolio {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}
