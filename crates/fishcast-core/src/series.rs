//! Series scoring and ranking

use crate::index::score_step;
use crate::moon::MoonPhaseResolver;
use crate::types::{Measurement, ScoredRecord};

/// Score an ordered measurement series pairwise.
///
/// Element `i` of the output corresponds to `measurements[i + 1]`, scored
/// against `measurements[i]`; the output is one element shorter than the
/// input. Inputs of length 0 or 1 yield an empty series without error.
/// The input is assumed time-ordered; nothing is reordered, filtered or
/// interpolated here.
pub fn score_series(
    moon: &dyn MoonPhaseResolver,
    measurements: &[Measurement],
    sea_level_enabled: bool,
) -> Vec<ScoredRecord> {
    measurements
        .windows(2)
        .map(|pair| score_step(moon, &pair[0], &pair[1], sea_level_enabled))
        .collect()
}

/// Select the `n` best hours of a scored series.
///
/// Records are ranked by fishing index descending with ties keeping their
/// original series order, then the selection is returned in chronological
/// order. A series shorter than `n` is returned whole, chronologically.
pub fn top_n(records: &[ScoredRecord], n: usize) -> Vec<ScoredRecord> {
    let mut ranked = records.to_vec();
    // Stable sort: equal indexes keep series order
    ranked.sort_by(|a, b| b.fishing_index.total_cmp(&a.fishing_index));
    ranked.truncate(n);
    ranked.sort_by_key(|record| record.time);
    ranked
}
