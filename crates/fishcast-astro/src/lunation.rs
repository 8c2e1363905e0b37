//! Mean lunation arithmetic
//!
//! Instants of new and full moon from the truncated mean-phase series in
//! Meeus, "Astronomical Algorithms", chapter 49. Accurate to a couple of
//! minutes over the surrounding centuries, which is far below the one-day
//! granularity the scoring tiers work at. Results are in Julian days on
//! the TT scale; the difference to UTC (about a minute) is ignored.

use chrono::{DateTime, Utc};

/// Average length of the synodic month in days
pub const SYNODIC_MONTH: f64 = 29.530_588_861;

/// Julian day of the Unix epoch
const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Julian day of J2000.0
const JD_J2000: f64 = 2_451_545.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    New,
    Full,
}

fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

pub fn datetime_to_jd(time: DateTime<Utc>) -> f64 {
    JD_UNIX_EPOCH + time.timestamp() as f64 / 86_400.0
}

pub fn jd_to_datetime(jd: f64) -> DateTime<Utc> {
    let unix = (jd - JD_UNIX_EPOCH) * 86_400.0;
    let seconds = unix.floor() as i64;
    let nanos = ((unix - seconds as f64) * 1e9) as u32;
    DateTime::from_timestamp(seconds, nanos).expect("lunation instant outside chrono range")
}

/// Lunation index of the mean new moon nearest before `jd`.
///
/// Index 0 is the first new moon of 2000; full moons sit at half-integer
/// indices.
pub fn lunation_near(jd: f64) -> f64 {
    let years_since_2000 = (jd - JD_J2000) / 365.25;
    (years_since_2000 * 12.3685).floor()
}

/// Instant of the `k`-th mean phase as a Julian day.
///
/// `k` must be an integer for new moons and an integer plus 0.5 for full
/// moons, matching `phase`.
pub fn phase_jd(k: f64, phase: Phase) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // Mean phase instant
    let mean = 2_451_550.097_66 + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    // Eccentricity of Earth's orbit
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    // Sun's mean anomaly
    let m = 2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3;

    // Moon's mean anomaly
    let mp = 201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4;

    // Moon's argument of latitude
    let f = 160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4;

    // Longitude of the ascending node
    let omega = 124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3;

    mean + periodic_corrections(phase, e, m, mp, f, omega) + planetary_corrections(k, t2)
}

fn periodic_corrections(phase: Phase, e: f64, m: f64, mp: f64, f: f64, omega: f64) -> f64 {
    // Leading coefficients differ between the new and full moon series;
    // the tail terms are shared.
    let head = match phase {
        Phase::New => {
            -0.407_20 * sin_deg(mp)
                + 0.172_41 * e * sin_deg(m)
                + 0.016_08 * sin_deg(2.0 * mp)
                + 0.010_39 * sin_deg(2.0 * f)
                + 0.007_39 * e * sin_deg(mp - m)
                - 0.005_14 * e * sin_deg(mp + m)
                + 0.002_08 * e * e * sin_deg(2.0 * m)
        }
        Phase::Full => {
            -0.406_14 * sin_deg(mp)
                + 0.173_02 * e * sin_deg(m)
                + 0.016_14 * sin_deg(2.0 * mp)
                + 0.010_43 * sin_deg(2.0 * f)
                + 0.007_34 * e * sin_deg(mp - m)
                - 0.005_15 * e * sin_deg(mp + m)
                + 0.002_09 * e * e * sin_deg(2.0 * m)
        }
    };

    head - 0.001_11 * sin_deg(mp - 2.0 * f)
        - 0.000_57 * sin_deg(mp + 2.0 * f)
        + 0.000_56 * e * sin_deg(2.0 * mp + m)
        - 0.000_42 * sin_deg(3.0 * mp)
        + 0.000_42 * e * sin_deg(m + 2.0 * f)
        + 0.000_38 * e * sin_deg(m - 2.0 * f)
        - 0.000_24 * e * sin_deg(2.0 * mp - m)
        - 0.000_17 * sin_deg(omega)
        - 0.000_07 * sin_deg(mp + 2.0 * m)
        + 0.000_04 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.000_04 * sin_deg(3.0 * m)
        + 0.000_03 * sin_deg(mp + m - 2.0 * f)
        + 0.000_03 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.000_03 * sin_deg(mp + m + 2.0 * f)
        + 0.000_03 * sin_deg(mp - m + 2.0 * f)
        - 0.000_02 * sin_deg(mp - m - 2.0 * f)
        - 0.000_02 * sin_deg(3.0 * mp + m)
        + 0.000_02 * sin_deg(4.0 * mp)
}

fn planetary_corrections(k: f64, t2: f64) -> f64 {
    let a1 = 299.77 + 0.107_408 * k - 0.009_173 * t2;
    let a2 = 251.88 + 0.016_321 * k;
    let a3 = 251.83 + 26.651_886 * k;
    let a4 = 349.42 + 36.412_478 * k;
    let a5 = 84.66 + 18.206_239 * k;
    let a6 = 141.74 + 53.303_771 * k;
    let a7 = 207.14 + 2.453_732 * k;
    let a8 = 154.84 + 7.306_860 * k;
    let a9 = 34.52 + 27.261_239 * k;
    let a10 = 207.19 + 0.121_824 * k;
    let a11 = 291.34 + 1.844_379 * k;
    let a12 = 161.72 + 24.198_154 * k;
    let a13 = 239.56 + 25.513_099 * k;
    let a14 = 331.55 + 3.592_518 * k;

    0.000_325 * sin_deg(a1)
        + 0.000_165 * sin_deg(a2)
        + 0.000_164 * sin_deg(a3)
        + 0.000_126 * sin_deg(a4)
        + 0.000_110 * sin_deg(a5)
        + 0.000_062 * sin_deg(a6)
        + 0.000_060 * sin_deg(a7)
        + 0.000_056 * sin_deg(a8)
        + 0.000_047 * sin_deg(a9)
        + 0.000_042 * sin_deg(a10)
        + 0.000_040 * sin_deg(a11)
        + 0.000_037 * sin_deg(a12)
        + 0.000_035 * sin_deg(a13)
        + 0.000_023 * sin_deg(a14)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn days_off(jd: f64, expected: DateTime<Utc>) -> f64 {
        (jd - datetime_to_jd(expected)).abs()
    }

    #[test]
    fn test_jd_round_trip() {
        let time = Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap();
        let jd = datetime_to_jd(time);
        let back = jd_to_datetime(jd);
        assert!((back - time).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_known_new_moons() {
        // Published instants: 2000-01-06 18:14, 2024-01-11 11:57 (UTC)
        let k = lunation_near(datetime_to_jd(
            Utc.with_ymd_and_hms(2000, 1, 10, 0, 0, 0).unwrap(),
        ));
        let jd = phase_jd(k, Phase::New);
        let expected = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap();
        assert!(days_off(jd, expected) < 0.05, "off by {} days", days_off(jd, expected));

        let k = lunation_near(datetime_to_jd(
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        ));
        let jd = phase_jd(k, Phase::New);
        let expected = Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap();
        assert!(days_off(jd, expected) < 0.05, "off by {} days", days_off(jd, expected));
    }

    #[test]
    fn test_known_full_moons() {
        // Published instants: 2000-01-21 04:40, 2024-01-25 17:54 (UTC)
        let k = lunation_near(datetime_to_jd(
            Utc.with_ymd_and_hms(2000, 1, 15, 0, 0, 0).unwrap(),
        ));
        let jd = phase_jd(k + 0.5, Phase::Full);
        let expected = Utc.with_ymd_and_hms(2000, 1, 21, 4, 40, 0).unwrap();
        assert!(days_off(jd, expected) < 0.05, "off by {} days", days_off(jd, expected));

        let k = lunation_near(datetime_to_jd(
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        ));
        let jd = phase_jd(k + 0.5, Phase::Full);
        let expected = Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap();
        assert!(days_off(jd, expected) < 0.05, "off by {} days", days_off(jd, expected));
    }

    #[test]
    fn test_consecutive_phases_one_synodic_month_apart() {
        let k = lunation_near(datetime_to_jd(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        ));
        let gap = phase_jd(k + 1.0, Phase::New) - phase_jd(k, Phase::New);
        assert!((gap - SYNODIC_MONTH).abs() < 0.6);
    }
}
