//! Core data types for forecast measurements and scored records

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One forecasted time step as returned by the weather data source.
///
/// Timestamps are timezone-aware and localized to the zone the data was
/// requested in. A series is strictly increasing in time; hourly spacing
/// is nominal but not assumed by the scoring code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Forecast timestamp, localized to the requested timezone
    pub time: DateTime<FixedOffset>,

    /// Air pressure (hPa)
    pub pressure: f64,

    /// Wind speed (m/s)
    pub wind_speed: f64,

    /// Wind direction (degrees, [0,360))
    pub wind_direction: f64,

    /// Sea level (cm), present only when sea-level tracking is requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,
}

/// A measurement scored against its predecessor.
///
/// Never exists for the first measurement of a series; a scored series is
/// one element shorter than its raw input. Built exactly once by the
/// series builder and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredRecord {
    pub time: DateTime<FixedOffset>,
    pub pressure: f64,

    /// Pressure change against the preceding measurement (hPa)
    pub pressure_diff: f64,

    pub wind_speed: f64,
    pub wind_direction: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,

    /// Sea-level change against the preceding measurement (cm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sea_level_diff: Option<f64>,

    /// Aggregated favorability index for this hour
    pub fishing_index: f64,
}

/// Nearest full/new moon instants around a reference instant.
///
/// Resolved fresh on every call; resolvers are stateless. Instants are
/// UTC, localization is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoonPhaseWindow {
    pub prev_full: DateTime<Utc>,
    pub next_full: DateTime<Utc>,
    pub prev_new: DateTime<Utc>,
    pub next_new: DateTime<Utc>,
}

/// Parameters for one forecast fetch-and-score run.
///
/// Configuration is passed explicitly per call; there is no process-wide
/// ambient state.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Timezone the returned timestamps are localized to
    pub timezone: Tz,

    /// Place name understood by the upstream weather service
    pub place: String,

    /// Number of forecast hours to request
    pub hours: u32,

    /// Forecast window start (default: now minus one hour)
    pub start_time: Option<DateTime<Utc>>,

    /// Sea-level measurement location; enables sea-level scoring when set
    pub sea_level_place: Option<String>,
}

impl ForecastRequest {
    pub fn new(timezone: Tz, place: impl Into<String>, hours: u32) -> Self {
        Self {
            timezone,
            place: place.into(),
            hours,
            start_time: None,
            sea_level_place: None,
        }
    }

    pub fn with_sea_level(mut self, place: impl Into<String>) -> Self {
        self.sea_level_place = Some(place.into());
        self
    }

    pub fn sea_level_enabled(&self) -> bool {
        self.sea_level_place.is_some()
    }
}
