//! Chart requests: the input half of the renderer interface.

use log::debug;

use crate::engine::{EngineConfig, PayoffEngine, PayoffReport};
use crate::error::{PositionError, Result};
use crate::portfolio::{Portfolio, PositionConfig};

/// Positions to chart, with optional margin override and title.
///
/// ```json
/// {
///   "title": "Synthetic short",
///   "margin": 10,
///   "positions": [
///     { "purchase": "buy",  "price": 2, "optiontype": "call", "strike": 50 },
///     { "purchase": "sell", "price": 3, "optiontype": "put",  "strike": 50 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartRequest {
    /// Display label copied into the report
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    /// Overrides the engine's configured margin
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub margin: Option<f64>,
    /// Position configurations, in chart order
    #[cfg_attr(feature = "serde", serde(default))]
    pub positions: Vec<PositionConfig>,
}

impl ChartRequest {
    /// Build the portfolio, reporting the index of the first bad position.
    pub fn portfolio(&self) -> std::result::Result<Portfolio, (usize, PositionError)> {
        Portfolio::from_configs(&self.positions)
    }

    /// The engine configuration after applying this request's margin override.
    pub fn engine_config(&self, defaults: EngineConfig) -> EngineConfig {
        match self.margin {
            Some(margin) => EngineConfig::with_margin(margin),
            None => defaults,
        }
    }

    /// An engine using this request's margin, validated.
    pub fn engine(&self, defaults: EngineConfig) -> Result<PayoffEngine> {
        PayoffEngine::new(self.engine_config(defaults))
    }

    /// Compute the report for `portfolio`, already built from this request.
    ///
    /// The margin override and title are applied here.
    pub fn compute_for(
        &self,
        portfolio: &Portfolio,
        defaults: EngineConfig,
    ) -> Result<PayoffReport> {
        let report = self.engine(defaults)?.compute(portfolio)?;
        Ok(PayoffReport {
            title: self.title.clone(),
            ..report
        })
    }

    /// Validate and compute the full report.
    ///
    /// Either the complete report is returned or the first error is.
    pub fn compute(&self, defaults: EngineConfig) -> Result<PayoffReport> {
        let portfolio = self.portfolio().map_err(|(index, err)| {
            debug!("position {index} rejected: {err}");
            err
        })?;
        self.compute_for(&portfolio, defaults)
    }
}

#[cfg(feature = "json")]
impl ChartRequest {
    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(feature = "json")]
impl PayoffReport {
    /// Serialize as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
