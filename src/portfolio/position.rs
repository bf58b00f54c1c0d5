//! A single stock or option holding.

use crate::direction::Direction;
use crate::error::PositionError;
use crate::option_type::OptionType;

use super::config::PositionConfig;

/// What a position holds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Instrument {
    /// Shares of the underlying. Linear payoff, no kink.
    Stock,
    /// A call or put struck at `strike`.
    Option { option_type: OptionType, strike: f64 },
}

/// A stock or option position.
///
/// `reference_price` is the purchase price for a stock and the premium for an
/// option. It is always finite and non-zero, as is an option's strike.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPosition"))]
pub struct Position {
    /// Display label, may be empty
    ticker: String,
    /// Long or short
    direction: Direction,
    /// Purchase price (stock) or premium (option)
    reference_price: f64,
    /// Stock or option details
    instrument: Instrument,
}

/// Unvalidated wire form of [`Position`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPosition {
    #[serde(default)]
    ticker: String,
    direction: Direction,
    reference_price: f64,
    instrument: Instrument,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPosition> for Position {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, PositionError> {
        let position = match raw.instrument {
            Instrument::Stock => Position::stock(raw.direction, raw.reference_price)?,
            Instrument::Option {
                option_type,
                strike,
            } => Position::option(raw.direction, option_type, strike, raw.reference_price)?,
        };
        Ok(position.with_ticker(raw.ticker))
    }
}

impl Position {
    /// Create a stock position bought or sold at `price`.
    pub fn stock(direction: Direction, price: f64) -> Result<Self, PositionError> {
        Ok(Self {
            ticker: String::new(),
            direction,
            reference_price: require_price(Some(price))?,
            instrument: Instrument::Stock,
        })
    }

    /// Create an option position with the given strike and premium.
    pub fn option(
        direction: Direction,
        option_type: OptionType,
        strike: f64,
        premium: f64,
    ) -> Result<Self, PositionError> {
        let reference_price = require_price(Some(premium))?;
        let strike = require_strike(Some(strike))?;
        Ok(Self {
            ticker: String::new(),
            direction,
            reference_price,
            instrument: Instrument::Option {
                option_type,
                strike,
            },
        })
    }

    /// Shorthand for a call option.
    pub fn call(direction: Direction, strike: f64, premium: f64) -> Result<Self, PositionError> {
        Self::option(direction, OptionType::Call, strike, premium)
    }

    /// Shorthand for a put option.
    pub fn put(direction: Direction, strike: f64, premium: f64) -> Result<Self, PositionError> {
        Self::option(direction, OptionType::Put, strike, premium)
    }

    /// Build a position from a loosely-typed configuration.
    ///
    /// Fields are checked in the order purchase, price, optiontype, strike;
    /// the first failure is returned. A configuration that names neither an
    /// option type nor a strike is a stock.
    pub fn from_config(config: &PositionConfig) -> Result<Self, PositionError> {
        let direction: Direction = config
            .purchase
            .as_deref()
            .ok_or(PositionError::MissingPurchase)?
            .parse()?;
        let reference_price = require_price(config.price)?;

        let instrument = if config.is_option() {
            let option_type: OptionType = config
                .option_type
                .as_deref()
                .ok_or(PositionError::MissingOptionType)?
                .parse()?;
            let strike = require_strike(config.strike)?;
            Instrument::Option {
                option_type,
                strike,
            }
        } else {
            Instrument::Stock
        };

        Ok(Self {
            ticker: config.ticker.clone().unwrap_or_default(),
            direction,
            reference_price,
            instrument,
        })
    }

    /// Attach a display label.
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = ticker.into();
        self
    }

    // === Queries ===

    #[inline]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    #[inline]
    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Returns true for option positions.
    #[inline]
    pub fn is_option(&self) -> bool {
        matches!(self.instrument, Instrument::Option { .. })
    }

    /// The option's strike, or `None` for a stock.
    #[inline]
    pub fn strike(&self) -> Option<f64> {
        match self.instrument {
            Instrument::Option { strike, .. } => Some(strike),
            Instrument::Stock => None,
        }
    }

    /// The price the evaluation range must cover: strike for an option,
    /// purchase price for a stock.
    #[inline]
    pub fn structural_price(&self) -> f64 {
        self.strike().unwrap_or(self.reference_price)
    }

    /// Profit or loss of this position if the underlying settles at `price`.
    pub fn evaluate(&self, price: f64) -> f64 {
        let long_profit = match self.instrument {
            Instrument::Stock => price - self.reference_price,
            Instrument::Option {
                option_type,
                strike,
            } => option_type.long_payoff(price, strike, self.reference_price),
        };
        self.direction.apply(long_profit)
    }
}

impl TryFrom<&PositionConfig> for Position {
    type Error = PositionError;

    fn try_from(config: &PositionConfig) -> Result<Self, Self::Error> {
        Position::from_config(config)
    }
}

fn require_price(price: Option<f64>) -> Result<f64, PositionError> {
    match price {
        None => Err(PositionError::MissingPrice),
        Some(p) if p == 0.0 => Err(PositionError::MissingPrice),
        Some(p) if !p.is_finite() => Err(PositionError::NonFinitePrice(p)),
        Some(p) => Ok(p),
    }
}

fn require_strike(strike: Option<f64>) -> Result<f64, PositionError> {
    match strike {
        None => Err(PositionError::MissingStrike),
        Some(k) if k == 0.0 => Err(PositionError::MissingStrike),
        Some(k) if !k.is_finite() => Err(PositionError::NonFiniteStrike(k)),
        Some(k) => Ok(k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_breaks_even_at_purchase() {
        let long = Position::stock(Direction::Long, 100.0).unwrap();
        let short = Position::stock(Direction::Short, 100.0).unwrap();
        assert_eq!(long.evaluate(100.0), 0.0);
        assert_eq!(short.evaluate(100.0), 0.0);
        assert_eq!(long.evaluate(110.0), 10.0);
        assert_eq!(short.evaluate(110.0), -10.0);
    }

    #[test]
    fn long_call_kinks_at_strike() {
        let call = Position::call(Direction::Long, 50.0, 2.0).unwrap();
        assert_eq!(call.evaluate(50.0), -2.0);
        assert_eq!(call.evaluate(51.0), -1.0);
        assert_eq!(call.evaluate(49.0), -2.0);
    }

    #[test]
    fn long_put_kinks_at_strike() {
        let put = Position::put(Direction::Long, 50.0, 3.0).unwrap();
        assert_eq!(put.evaluate(50.0), 3.0);
        assert_eq!(put.evaluate(49.0), 2.0);
        assert_eq!(put.evaluate(51.0), 3.0);
    }

    #[test]
    fn short_negates_long() {
        let long = Position::put(Direction::Long, 50.0, 3.0).unwrap();
        let short = Position::put(Direction::Short, 50.0, 3.0).unwrap();
        for price in [30.0, 49.5, 50.0, 50.5, 80.0] {
            assert_eq!(short.evaluate(price), -long.evaluate(price));
        }
    }

    #[test]
    fn structural_price() {
        let stock = Position::stock(Direction::Long, 100.0).unwrap();
        let call = Position::call(Direction::Short, 120.0, 4.0).unwrap();
        assert_eq!(stock.structural_price(), 100.0);
        assert_eq!(call.structural_price(), 120.0);
        assert!(!stock.is_option());
        assert!(call.is_option());
        assert_eq!(stock.strike(), None);
        assert_eq!(call.strike(), Some(120.0));
    }

    #[test]
    fn zero_price_rejected() {
        assert_eq!(
            Position::stock(Direction::Long, 0.0),
            Err(PositionError::MissingPrice)
        );
        assert_eq!(
            Position::call(Direction::Long, 50.0, 0.0),
            Err(PositionError::MissingPrice)
        );
        assert_eq!(
            Position::call(Direction::Long, 0.0, 2.0),
            Err(PositionError::MissingStrike)
        );
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(
            Position::stock(Direction::Long, f64::NAN),
            Err(PositionError::NonFinitePrice(_))
        ));
        assert_eq!(
            Position::put(Direction::Long, f64::INFINITY, 1.0),
            Err(PositionError::NonFiniteStrike(f64::INFINITY))
        );
    }

    #[test]
    fn from_config_stock() {
        let config = PositionConfig::stock("sell", 42.5).with_ticker("AAPL");
        let pos = Position::from_config(&config).unwrap();
        assert_eq!(pos.ticker(), "AAPL");
        assert_eq!(pos.direction(), Direction::Short);
        assert_eq!(pos.instrument(), Instrument::Stock);
        assert_eq!(pos.reference_price(), 42.5);
    }

    #[test]
    fn from_config_option() {
        let config = PositionConfig::option("buy", 2.0, "call", 50.0);
        let pos = Position::try_from(&config).unwrap();
        assert_eq!(pos.ticker(), "");
        assert_eq!(
            pos.instrument(),
            Instrument::Option {
                option_type: OptionType::Call,
                strike: 50.0
            }
        );
    }

    #[test]
    fn from_config_checks_fields_in_order() {
        let mut config = PositionConfig::default();
        assert_eq!(
            Position::from_config(&config),
            Err(PositionError::MissingPurchase)
        );

        config.purchase = Some("buy".into());
        assert_eq!(Position::from_config(&config), Err(PositionError::MissingPrice));

        config.price = Some(2.0);
        config.strike = Some(50.0);
        assert_eq!(
            Position::from_config(&config),
            Err(PositionError::MissingOptionType)
        );

        config.option_type = Some("put".into());
        config.strike = Some(0.0);
        assert_eq!(Position::from_config(&config), Err(PositionError::MissingStrike));
    }

    #[test]
    fn option_type_without_strike_is_an_option() {
        let config = PositionConfig {
            purchase: Some("buy".into()),
            price: Some(2.0),
            option_type: Some("call".into()),
            ..PositionConfig::default()
        };
        assert_eq!(Position::from_config(&config), Err(PositionError::MissingStrike));
    }
}
