//! Point scorers for the individual environmental signals
//!
//! Each scorer is a total pure function mapping one physical signal to an
//! integer point value on a fixed scale. The bands are empirically tuned
//! from the source doctrine, not physically derived; boundary treatment
//! is intentional and must not be adjusted.

use chrono::{DateTime, Utc};

use crate::types::MoonPhaseWindow;

/// Wind sectors awarded points, as half-open degree ranges `[start, end)`.
/// Sectors are disjoint; everything else scores 0.
const WIND_SECTORS: [(f64, f64, i32); 5] = [
    (202.5, 247.5, 100), // south-west
    (157.5, 202.5, 80),  // south
    (247.5, 292.5, 80),  // west
    (112.5, 157.5, 50),  // south-east
    (292.5, 337.5, 50),  // north-west
];

/// Points for the barometric pressure change between consecutive
/// measurements (hPa).
///
/// Both sharply falling and sharply rising pressure indicate frontal
/// activity favorable to fish:
/// - 40: 0.3..=0.5 rise or -2.0..=-1.0 fall
/// - 80: 0.5..1.0 rise (exclusive low) or fall below -2.0
/// - 100: rise above 1.0
/// - 0: otherwise
pub fn pressure_trend_points(pressure_diff: f64) -> i32 {
    if (0.3..=0.5).contains(&pressure_diff) || (-2.0..=-1.0).contains(&pressure_diff) {
        40
    } else if (pressure_diff > 0.5 && pressure_diff <= 1.0) || pressure_diff < -2.0 {
        80
    } else if pressure_diff > 1.0 {
        100
    } else {
        0
    }
}

/// Points for the wind direction (degrees).
///
/// Input is expected in [0,360); values of exactly 360 or negative are out
/// of the contract and score 0. No modular wrapping is applied, callers
/// normalize beforehand.
pub fn wind_direction_points(direction: f64) -> i32 {
    for (start, end, points) in WIND_SECTORS {
        if (start..end).contains(&direction) {
            return points;
        }
    }
    0
}

/// Points for proximity to the nearest full or new moon.
///
/// Tiers are checked in priority order; the window looks further ahead
/// than behind on purpose:
/// - 100: within 1 day before a full or new moon
/// - 60: within 2 days before, or 1 day after, a full or new moon
/// - 30: within 3 days before a full or new moon
/// - 0: otherwise
pub fn moon_phase_points(window: &MoonPhaseWindow, reference: DateTime<Utc>) -> i32 {
    const SECONDS_PER_DAY: f64 = 86_400.0;
    let days_between = |from: DateTime<Utc>, to: DateTime<Utc>| {
        (to - from).num_seconds() as f64 / SECONDS_PER_DAY
    };

    let until_next_full = days_between(reference, window.next_full);
    let until_next_new = days_between(reference, window.next_new);
    let since_prev_full = days_between(window.prev_full, reference);
    let since_prev_new = days_between(window.prev_new, reference);

    if until_next_full <= 1.0 || until_next_new <= 1.0 {
        100
    } else if until_next_full <= 2.0
        || until_next_new <= 2.0
        || since_prev_full <= 1.0
        || since_prev_new <= 1.0
    {
        60
    } else if until_next_full <= 3.0 || until_next_new <= 3.0 {
        30
    } else {
        0
    }
}

/// Points for the sea-level change between consecutive measurements (cm).
///
/// Rising water contributes positively, falling water negatively. The
/// boundary inclusivity differs between the positive and negative
/// branches (+3 scores, -3 does not); this asymmetry is in the source
/// doctrine and is preserved verbatim.
pub fn sea_level_trend_points(sea_level_diff: f64) -> i32 {
    if (3.0..=6.0).contains(&sea_level_diff) {
        10
    } else if sea_level_diff > 6.0 && sea_level_diff <= 9.0 {
        20
    } else if sea_level_diff > 9.0 {
        30
    } else if sea_level_diff > -6.0 && sea_level_diff <= -3.0 {
        -10
    } else if (-9.0..=-6.0).contains(&sea_level_diff) {
        -20
    } else if sea_level_diff < -9.0 {
        -30
    } else {
        0
    }
}
