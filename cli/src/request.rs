//! Chart request (request.json) loading and validation.

use std::path::Path;

use log::debug;
use nanopayoff::{ChartRequest, Portfolio};

use crate::error::{Error, Result};

/// Load a chart request from a JSON file.
pub fn load(path: &Path) -> Result<ChartRequest> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::RequestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let request = parse(&contents)?;
    debug!(
        "loaded {} positions from {}",
        request.positions.len(),
        path.display()
    );
    Ok(request)
}

/// Parse a chart request from a JSON string.
pub fn parse(json: &str) -> Result<ChartRequest> {
    ChartRequest::from_json(json).map_err(Error::RequestParse)
}

/// Build the request's portfolio, naming the first invalid position.
pub fn portfolio(request: &ChartRequest) -> Result<Portfolio> {
    request
        .portfolio()
        .map_err(|(index, source)| Error::InvalidPosition { index, source })
}
