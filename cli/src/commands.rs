//! Report commands: compute, summary, check.
//!
//! Each command writes to any `Write` sink so that `main` can target stdout or
//! a file and tests can capture the output.

use std::io::Write;

use log::info;
use nanopayoff::{ChartRequest, PayoffCurve, PayoffError, PayoffReport};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::request;

/// Validate the request and compute its report.
///
/// The request's own margin overrides the configured one.
pub fn build_report(config: &Config, request: &ChartRequest) -> Result<PayoffReport> {
    let portfolio = request::portfolio(request)?;
    let report = request.compute_for(&portfolio, config.engine_config())?;

    info!(
        "computed payoff for {} positions over {} ({} curve points)",
        portfolio.len(),
        report.bounds,
        report.aggregate_curve.len()
    );
    Ok(report)
}

/// Write the report as JSON.
pub fn compute(config: &Config, request: &ChartRequest, out: &mut impl Write) -> Result<PayoffReport> {
    let report = build_report(config, request)?;
    let json = if config.output.pretty {
        report.to_json_pretty()
    } else {
        report.to_json()
    }
    .map_err(Error::Render)?;
    writeln!(out, "{json}")?;
    Ok(report)
}

/// Write a human-readable summary: bounds, curve, break-evens, extrema.
pub fn summary(config: &Config, request: &ChartRequest, out: &mut impl Write) -> Result<PayoffReport> {
    let report = build_report(config, request)?;

    if let Some(title) = &report.title {
        writeln!(out, "{title}")?;
    }
    writeln!(
        out,
        "Bounds:      ${:.2} .. ${:.2}",
        report.bounds.low(),
        report.bounds.high()
    )?;
    writeln!(out, "Positions:   {}", report.per_position_segments.len())?;
    writeln!(out)?;
    writeln!(out, "  {:>10}  {:>10}", "Price", "Profit")?;
    write_curve(out, &report.aggregate_curve)?;
    writeln!(out)?;

    let break_evens = report.break_evens();
    if break_evens.is_empty() {
        writeln!(out, "Break-even:  none")?;
    } else {
        let prices: Vec<String> = break_evens.iter().map(|p| format!("${p:.2}")).collect();
        writeln!(out, "Break-even:  {}", prices.join(", "))?;
    }
    if let Some((lo, hi)) = report.aggregate_curve.profit_range() {
        writeln!(out, "Max loss:    {lo:.2}")?;
        writeln!(out, "Max profit:  {hi:.2}")?;
    }
    Ok(report)
}

/// Validate every position and the effective margin without computing
/// curves.
///
/// Returns the number of positions. Anything `compute` would reject as input
/// is rejected here too, in the same order.
pub fn check(config: &Config, request: &ChartRequest) -> Result<usize> {
    let portfolio = request::portfolio(request)?;
    request.engine(config.engine_config())?;
    if portfolio.is_empty() {
        return Err(PayoffError::EmptyPortfolio.into());
    }
    Ok(portfolio.len())
}

fn write_curve(out: &mut impl Write, curve: &PayoffCurve) -> std::io::Result<()> {
    for p in curve {
        writeln!(out, "  {:>10.2}  {:>+10.2}", p.price, p.profit)?;
    }
    Ok(())
}
