//! Loosely-typed position configuration, as supplied by callers.

/// Position configuration before validation.
///
/// Every field is optional so that a missing value surfaces as a
/// [`PositionError`](crate::PositionError) from
/// [`Position::from_config`](super::Position::from_config) rather than as a
/// deserialization failure.
///
/// ```
/// use nanopayoff::portfolio::{Position, PositionConfig};
///
/// let config = PositionConfig::option("buy", 2.0, "call", 50.0).with_ticker("XYZ");
/// let call = Position::from_config(&config).unwrap();
/// assert_eq!(call.evaluate(65.0), 13.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionConfig {
    /// Display label
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ticker: Option<String>,
    /// "buy" or "sell"
    #[cfg_attr(feature = "serde", serde(default))]
    pub purchase: Option<String>,
    /// Purchase price (stock) or premium (option)
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: Option<f64>,
    /// "call" or "put"; present only for options
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            rename = "optionType",
            alias = "optiontype",
            alias = "option_type",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub option_type: Option<String>,
    /// Strike price; present only for options
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub strike: Option<f64>,
}

impl PositionConfig {
    /// A stock configuration.
    pub fn stock(purchase: &str, price: f64) -> Self {
        Self {
            purchase: Some(purchase.to_string()),
            price: Some(price),
            ..Self::default()
        }
    }

    /// An option configuration.
    pub fn option(purchase: &str, premium: f64, option_type: &str, strike: f64) -> Self {
        Self {
            purchase: Some(purchase.to_string()),
            price: Some(premium),
            option_type: Some(option_type.to_string()),
            strike: Some(strike),
            ..Self::default()
        }
    }

    /// Attach a display label.
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        self.ticker = Some(ticker.to_string());
        self
    }

    /// Returns true if the configuration names an option type or a strike.
    #[inline]
    pub fn is_option(&self) -> bool {
        self.option_type.is_some() || self.strike.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_has_no_option_fields() {
        let config = PositionConfig::stock("buy", 100.0);
        assert!(!config.is_option());
        assert_eq!(config.ticker, None);
    }

    #[test]
    fn option_fields_set() {
        let config = PositionConfig::option("sell", 3.0, "put", 50.0).with_ticker("SPY");
        assert!(config.is_option());
        assert_eq!(config.option_type.as_deref(), Some("put"));
        assert_eq!(config.strike, Some(50.0));
        assert_eq!(config.ticker.as_deref(), Some("SPY"));
    }

    #[test]
    fn strike_alone_marks_option() {
        let config = PositionConfig {
            strike: Some(10.0),
            ..PositionConfig::default()
        };
        assert!(config.is_option());
    }
}
