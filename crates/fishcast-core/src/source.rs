//! Data source seam and the fetch-and-score facade

use chrono::{DateTime, Utc};

use crate::error::ForecastResult;
use crate::moon::MoonPhaseResolver;
use crate::series::score_series;
use crate::types::{ForecastRequest, Measurement, MoonPhaseWindow, ScoredRecord};

/// A provider of raw forecast measurement series.
///
/// Implementations must return measurements in strictly increasing
/// timestamp order, localized to the requested timezone. Any transport or
/// parse failure surfaces as `ForecastError::DataUnavailable`.
#[async_trait::async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, request: &ForecastRequest) -> ForecastResult<Vec<Measurement>>;
}

/// Fetches a raw series and scores it.
///
/// Owns its collaborators; each call operates on fresh data with no
/// shared mutable state between runs.
pub struct Forecaster {
    source: Box<dyn ForecastSource>,
    moon: Box<dyn MoonPhaseResolver>,
}

impl Forecaster {
    pub fn new(source: Box<dyn ForecastSource>, moon: Box<dyn MoonPhaseResolver>) -> Self {
        Self { source, moon }
    }

    /// Fetch the forecast for `request` and derive the scored series.
    ///
    /// A fetch that succeeds with fewer than two measurements yields an
    /// empty series, not an error.
    pub async fn score_forecast(&self, request: &ForecastRequest) -> ForecastResult<Vec<ScoredRecord>> {
        let measurements = self.source.fetch(request).await?;
        tracing::debug!(
            place = %request.place,
            measurements = measurements.len(),
            "scoring forecast series"
        );
        Ok(score_series(
            self.moon.as_ref(),
            &measurements,
            request.sea_level_enabled(),
        ))
    }

    /// Moon phase window around `reference`, for presentation layers.
    pub fn moon_window(&self, reference: DateTime<Utc>) -> MoonPhaseWindow {
        self.moon.resolve(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use crate::moon::FixedMoonPhases;
    use chrono::{Duration, TimeZone};

    struct CannedSource(Vec<Measurement>);

    #[async_trait::async_trait]
    impl ForecastSource for CannedSource {
        async fn fetch(&self, _request: &ForecastRequest) -> ForecastResult<Vec<Measurement>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl ForecastSource for FailingSource {
        async fn fetch(&self, request: &ForecastRequest) -> ForecastResult<Vec<Measurement>> {
            Err(ForecastError::DataUnavailable(format!(
                "no data for {}",
                request.place
            )))
        }
    }

    fn moon() -> FixedMoonPhases {
        let anchor = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        FixedMoonPhases(MoonPhaseWindow {
            prev_full: anchor - Duration::days(8),
            next_full: anchor + Duration::days(7),
            prev_new: anchor - Duration::days(7),
            next_new: anchor + Duration::days(8),
        })
    }

    #[tokio::test]
    async fn test_score_forecast_scores_fetched_series() {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
            .unwrap()
            .fixed_offset();
        let measurements = vec![
            Measurement {
                time: start,
                pressure: 1000.0,
                wind_speed: 4.0,
                wind_direction: 220.0,
                sea_level: None,
            },
            Measurement {
                time: start + Duration::hours(1),
                pressure: 1001.2,
                wind_speed: 4.0,
                wind_direction: 220.0,
                sea_level: None,
            },
        ];

        let forecaster = Forecaster::new(Box::new(CannedSource(measurements)), Box::new(moon()));
        let request = ForecastRequest::new(chrono_tz::Europe::Helsinki, "Oulu", 48);

        let scored = forecaster.score_forecast(&request).await.unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].fishing_index, 90.0);
    }

    #[tokio::test]
    async fn test_score_forecast_short_fetch_is_empty_not_error() {
        let forecaster = Forecaster::new(Box::new(CannedSource(Vec::new())), Box::new(moon()));
        let request = ForecastRequest::new(chrono_tz::Europe::Helsinki, "Oulu", 48);

        let scored = forecaster.score_forecast(&request).await.unwrap();
        assert!(scored.is_empty());
    }

    #[tokio::test]
    async fn test_score_forecast_propagates_source_failure() {
        let forecaster = Forecaster::new(Box::new(FailingSource), Box::new(moon()));
        let request = ForecastRequest::new(chrono_tz::Europe::Helsinki, "Nowhere", 48);

        let error = forecaster.score_forecast(&request).await.unwrap_err();
        assert!(matches!(error, ForecastError::DataUnavailable(_)));
    }
}
