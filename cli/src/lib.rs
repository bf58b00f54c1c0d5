//! nanopayoff-cli: command-line payoff reports.
//!
//! Reads a chart request (positions, optional margin and title) from a JSON
//! file, computes the payoff report with nanopayoff, and prints it as JSON for
//! a renderer or as a text summary.

pub mod commands;
pub mod config;
pub mod error;
pub mod request;
