use thiserror::Error;

/// Failures surfaced by a forecast run.
///
/// None of these are fatal to a host process; callers recover by retrying
/// with different input. A series too short to score is an empty result,
/// not an error.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The data source failed or returned nothing usable
    #[error("forecast data unavailable: {0}")]
    DataUnavailable(String),

    /// The request itself cannot be served as given
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ForecastResult<T> = Result<T, ForecastError>;
