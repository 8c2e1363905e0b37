//! Terminal rendering of scored forecasts

use fishcast_core::ScoredRecord;

/// Width of the chart bars in columns
const MAX_WIDTH: usize = 80;

/// Index value a full-width bar corresponds to
const CHART_MAX_INDEX: f64 = 100.0;

/// One forecast line: timestamp, index and the raw signals behind it.
pub fn format_record(record: &ScoredRecord, sea_level_enabled: bool) -> String {
    let sea_level = if sea_level_enabled {
        match (record.sea_level, record.sea_level_diff) {
            (Some(level), Some(diff)) => format!("{level:.1} cm ({diff:+.1})"),
            _ => "N/A".to_string(),
        }
    } else {
        "N/A".to_string()
    };

    format!(
        "{} - Index: {:>3} - Pressure: {:6.1} hPa ({:+.1}), Wind: {:5.1}\u{b0} ({:.1} m/s) Sealevel: {}",
        record.time.format("%Y-%m-%d %H:%M"),
        record.fishing_index as i64,
        record.pressure,
        record.pressure_diff,
        record.wind_direction,
        record.wind_speed,
        sea_level,
    )
}

/// Horizontal bar chart of the index, one row per hour.
///
/// Bars are scaled against an index of 100; an index above that (possible
/// with sea level scoring on) simply draws past the scale.
pub fn ascii_chart(records: &[ScoredRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str("Date/Time        \u{2502}Fishing Index\n");
    out.push_str(&frame_row());

    for record in records {
        let bar_length = (record.fishing_index / CHART_MAX_INDEX * MAX_WIDTH as f64) as usize;
        let label = format!(
            "{:16} \u{2502}",
            record.time.format("%a %b-%d %H:%M").to_string()
        );
        out.push_str(&label);
        out.push_str(&"\u{2588}".repeat(bar_length));
        out.push('\n');
    }

    out.push_str(&frame_row());
    out.push_str(&scale_row());
    out.push_str(&tick_row());
    out
}

fn frame_row() -> String {
    format!(
        "{}\u{253c}{}\n",
        "\u{2500}".repeat(17),
        "\u{2500}".repeat(MAX_WIDTH)
    )
}

/// Scale labels at 0%, 20%, ... 100% of the bar width
fn scale_row() -> String {
    let step = MAX_WIDTH / 5;
    let mut scale = String::new();
    for mark in 0..5 {
        let value = (CHART_MAX_INDEX * mark as f64 / 5.0) as i64;
        scale.push_str(&format!("{:<step$}", value));
    }
    scale.push_str(&format!("{}", CHART_MAX_INDEX as i64));
    format!("{}{}\n", " ".repeat(17), scale)
}

fn tick_row() -> String {
    let mut ticks = String::new();
    for i in 0..=MAX_WIDTH {
        if i % (MAX_WIDTH / 5) == 0 {
            ticks.push('\u{2534}');
        } else {
            ticks.push('\u{2500}');
        }
    }
    format!("{}{}\n", " ".repeat(17), ticks)
}
