//! Moon phase resolver seam
//!
//! The lunar ephemeris is an injected capability so the scoring code can
//! be exercised with deterministic fixed windows instead of wall-clock
//! dependent astronomy.

use chrono::{DateTime, Utc};

use crate::types::MoonPhaseWindow;

/// Resolves the nearest full/new moon instants around a reference instant.
///
/// Implementations are stateless; the window is recomputed on every call.
pub trait MoonPhaseResolver: Send + Sync {
    fn resolve(&self, reference: DateTime<Utc>) -> MoonPhaseWindow;
}

/// Resolver returning the same window for every reference instant.
///
/// Intended for tests and offline runs where deterministic scores are
/// needed.
#[derive(Debug, Clone, Copy)]
pub struct FixedMoonPhases(pub MoonPhaseWindow);

impl MoonPhaseResolver for FixedMoonPhases {
    fn resolve(&self, _reference: DateTime<Utc>) -> MoonPhaseWindow {
        self.0
    }
}
