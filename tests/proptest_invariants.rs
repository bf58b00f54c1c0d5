//! Property-based tests for payoff invariants.
//!
//! These tests use proptest to verify that key invariants hold
//! across randomly generated portfolios.

use nanopayoff::{
    Direction, EngineConfig, OptionType, PayoffEngine, Portfolio, Position, resolve_bounds,
};
use proptest::prelude::*;

/// Generate a price on a cent grid between $1 and $500
fn price_strategy() -> impl Strategy<Value = f64> {
    (100i64..=50_000i64).prop_map(|cents| cents as f64 / 100.0)
}

/// Generate a margin between $0.50 and $50
fn margin_strategy() -> impl Strategy<Value = f64> {
    (50i64..=5_000i64).prop_map(|cents| cents as f64 / 100.0)
}

/// Generate a direction
fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Long), Just(Direction::Short)]
}

/// Generate a position of any kind
fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        (direction_strategy(), price_strategy())
            .prop_map(|(d, p)| Position::stock(d, p).unwrap()),
        (
            direction_strategy(),
            prop_oneof![Just(OptionType::Call), Just(OptionType::Put)],
            price_strategy(),
            price_strategy(),
        )
            .prop_map(|(d, t, strike, premium)| Position::option(d, t, strike, premium).unwrap()),
    ]
}

/// Generate a non-empty portfolio
fn portfolio_strategy() -> impl Strategy<Value = Portfolio> {
    prop::collection::vec(position_strategy(), 1..20).prop_map(|v| v.into_iter().collect())
}

fn flipped(position: &Position) -> Position {
    let direction = position.direction().opposite();
    let flipped = match position.strike() {
        Some(strike) => {
            let option_type = match position.instrument() {
                nanopayoff::Instrument::Option { option_type, .. } => option_type,
                nanopayoff::Instrument::Stock => unreachable!(),
            };
            Position::option(direction, option_type, strike, position.reference_price())
        }
        None => Position::stock(direction, position.reference_price()),
    };
    flipped.unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ========================================================================
    // POSITION INVARIANTS
    // ========================================================================

    /// Reversing the direction negates the payoff at every price
    #[test]
    fn short_negates_long(
        position in position_strategy(),
        price in price_strategy(),
    ) {
        let opposite = flipped(&position);
        prop_assert_eq!(opposite.evaluate(price), -position.evaluate(price));
    }

    // ========================================================================
    // RANGE INVARIANTS
    // ========================================================================

    /// Bounds bracket every structural price by exactly the margin
    #[test]
    fn bounds_bracket_structural_prices(
        portfolio in portfolio_strategy(),
        margin in margin_strategy(),
    ) {
        let bounds = resolve_bounds(&portfolio, margin).unwrap();
        prop_assert!(bounds.low() < bounds.high());

        let lowest = portfolio.iter().map(Position::structural_price).fold(f64::INFINITY, f64::min);
        let highest = portfolio.iter().map(Position::structural_price).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(bounds.low(), lowest - margin);
        prop_assert_eq!(bounds.high(), highest + margin);
    }

    // ========================================================================
    // CURVE INVARIANTS
    // ========================================================================

    /// Aggregate samples are strictly ascending and span the bounds
    #[test]
    fn curve_prices_strictly_ascending(portfolio in portfolio_strategy()) {
        let report = PayoffEngine::default().compute(&portfolio).unwrap();
        let prices: Vec<f64> = report.aggregate_curve.prices().collect();

        prop_assert!(prices.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(prices.first().copied(), Some(report.bounds.low()));
        prop_assert_eq!(prices.last().copied(), Some(report.bounds.high()));
    }

    /// One sample per distinct price in {low, high} and the strikes
    #[test]
    fn curve_length_counts_distinct_prices(
        portfolio in portfolio_strategy(),
        margin in margin_strategy(),
    ) {
        let engine = PayoffEngine::new(EngineConfig::with_margin(margin)).unwrap();
        let report = engine.compute(&portfolio).unwrap();

        let mut expected: Vec<f64> = portfolio.strikes().collect();
        expected.push(report.bounds.low());
        expected.push(report.bounds.high());
        expected.sort_by(f64::total_cmp);
        expected.dedup();

        prop_assert_eq!(report.aggregate_curve.len(), expected.len());
    }

    /// Every aggregate sample is the portfolio payoff at that price
    #[test]
    fn aggregate_is_sum_of_positions(portfolio in portfolio_strategy()) {
        let report = PayoffEngine::default().compute(&portfolio).unwrap();

        for point in report.aggregate_curve.iter() {
            let summed: f64 = portfolio.iter().map(|p| p.evaluate(point.price)).sum();
            prop_assert_eq!(point.profit, summed);
        }
    }

    /// One segment per position; options get their strike as a sample
    #[test]
    fn segment_shapes(portfolio in portfolio_strategy()) {
        let report = PayoffEngine::default().compute(&portfolio).unwrap();
        prop_assert_eq!(report.per_position_segments.len(), portfolio.len());

        for (position, segment) in portfolio.iter().zip(&report.per_position_segments) {
            match position.strike() {
                Some(strike) => {
                    prop_assert_eq!(segment.len(), 3);
                    prop_assert_eq!(segment.points()[1].price, strike);
                }
                None => prop_assert_eq!(segment.len(), 2),
            }
        }
    }

    /// The aggregate never leaves the envelope of its own samples
    #[test]
    fn extrema_come_from_samples(portfolio in portfolio_strategy()) {
        let report = PayoffEngine::default().compute(&portfolio).unwrap();
        let (lo, hi) = report.profit_range().unwrap();
        prop_assert!(report.aggregate_curve.iter().all(|p| p.profit >= lo && p.profit <= hi));
    }
}
