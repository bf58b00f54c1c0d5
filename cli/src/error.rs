//! Error types for the report CLI.

use std::path::PathBuf;

use nanopayoff::{PayoffError, PositionError};

/// All errors that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read request file {path}: {source}")]
    RequestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse request JSON: {0}")]
    RequestParse(serde_json::Error),

    #[error("position {index} is invalid: {source}")]
    InvalidPosition { index: usize, source: PositionError },

    #[error("payoff computation failed: {0}")]
    Payoff(#[from] PayoffError),

    #[error("failed to render report: {0}")]
    Render(serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Process exit code: 2 for rejected input, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPosition { .. } | Error::Payoff(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
