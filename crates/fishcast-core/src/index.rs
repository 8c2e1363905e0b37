//! Index aggregation for one time step

use chrono::Utc;

use crate::moon::MoonPhaseResolver;
use crate::scoring::{
    moon_phase_points, pressure_trend_points, sea_level_trend_points, wind_direction_points,
};
use crate::types::{Measurement, ScoredRecord};

/// Weight applied to the pressure-trend points
pub const PRESSURE_TREND_WEIGHT: f64 = 0.6;

/// Weight applied to the wind-direction points
pub const WIND_DIRECTION_WEIGHT: f64 = 0.3;

/// Weight applied to the moon-phase points
pub const MOON_PHASE_WEIGHT: f64 = 0.15;

/// Score one measurement against its predecessor.
///
/// The weight total is 1.05, not 1.0, and the sea-level points are added
/// at full magnitude on top of the weighted sum; the index is therefore
/// not confined to [0,100] when sea-level tracking is on. Both quirks are
/// part of the scoring doctrine and are kept as-is.
pub fn score_step(
    moon: &dyn MoonPhaseResolver,
    previous: &Measurement,
    current: &Measurement,
    sea_level_enabled: bool,
) -> ScoredRecord {
    let reference = current.time.with_timezone(&Utc);
    let window = moon.resolve(reference);

    let pressure_diff = current.pressure - previous.pressure;

    let mut fishing_index = pressure_trend_points(pressure_diff) as f64 * PRESSURE_TREND_WEIGHT
        + wind_direction_points(current.wind_direction) as f64 * WIND_DIRECTION_WEIGHT
        + moon_phase_points(&window, reference) as f64 * MOON_PHASE_WEIGHT;

    let sea_level_diff = if sea_level_enabled {
        match (current.sea_level, previous.sea_level) {
            (Some(current_level), Some(previous_level)) => Some(current_level - previous_level),
            _ => None,
        }
    } else {
        None
    };

    if let Some(diff) = sea_level_diff {
        // Unweighted on purpose
        fishing_index += sea_level_trend_points(diff) as f64;
    }

    ScoredRecord {
        time: current.time,
        pressure: current.pressure,
        pressure_diff,
        wind_speed: current.wind_speed,
        wind_direction: current.wind_direction,
        sea_level: current.sea_level,
        sea_level_diff,
        fishing_index,
    }
}
