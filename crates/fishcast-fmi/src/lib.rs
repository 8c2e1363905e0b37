//! FMI open data client
//!
//! Fetches forecasted surface weather and sea level series from the
//! Finnish Meteorological Institute's WFS endpoint and adapts them into
//! the core measurement series. The service covers Finnish locations
//! only.

pub mod client;
pub mod geoid;
pub mod waterml;

pub use client::*;
pub use geoid::*;
pub use waterml::*;

use fishcast_core::ForecastError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FmiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no {0} series in response")]
    MissingSeries(String),

    #[error("parameter series lengths differ")]
    LengthMismatch,

    #[error("unknown sea level location {name}; valid locations: {valid}")]
    UnknownSeaLevelLocation { name: String, valid: String },
}

pub type FmiResult<T> = Result<T, FmiError>;

impl From<FmiError> for ForecastError {
    fn from(error: FmiError) -> Self {
        match error {
            FmiError::UnknownSeaLevelLocation { .. } => {
                ForecastError::InvalidConfiguration(error.to_string())
            }
            other => ForecastError::DataUnavailable(other.to_string()),
        }
    }
}
