//! Lunar ephemeris for fishing forecasts
//!
//! Resolves the nearest full and new moon instants around a reference
//! instant using mean lunation arithmetic, replacing an external
//! ephemeris service. Stateless; every call recomputes the window.

pub mod lunation;

use chrono::{DateTime, Utc};
use fishcast_core::{MoonPhaseResolver, MoonPhaseWindow};

use crate::lunation::{datetime_to_jd, jd_to_datetime, lunation_near, phase_jd, Phase};

/// Moon phase resolver backed by the mean lunation series.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoonEphemeris;

impl MoonEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl MoonPhaseResolver for MoonEphemeris {
    fn resolve(&self, reference: DateTime<Utc>) -> MoonPhaseWindow {
        let jd = datetime_to_jd(reference);
        let k0 = lunation_near(jd);

        let (prev_full, next_full) = bracket(jd, k0, Phase::Full);
        let (prev_new, next_new) = bracket(jd, k0, Phase::New);

        MoonPhaseWindow {
            prev_full: jd_to_datetime(prev_full),
            next_full: jd_to_datetime(next_full),
            prev_new: jd_to_datetime(prev_new),
            next_new: jd_to_datetime(next_new),
        }
    }
}

/// Nearest phase instants on either side of `jd`.
///
/// Candidate lunations two either side of the estimate are enough: the
/// estimate is never off by more than one lunation.
fn bracket(jd: f64, k0: f64, phase: Phase) -> (f64, f64) {
    let offset = match phase {
        Phase::New => 0.0,
        Phase::Full => 0.5,
    };

    let mut prev = f64::NEG_INFINITY;
    let mut next = f64::INFINITY;
    for i in -2..=2 {
        let candidate = phase_jd(k0 + i as f64 + offset, phase);
        if candidate <= jd {
            prev = prev.max(candidate);
        } else {
            next = next.min(candidate);
        }
    }
    (prev, next)
}
