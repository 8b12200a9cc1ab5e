//! Mock data source.
//!
//! Static tables for the record pages live in [`fixtures`]; the analytics
//! series are generated here from a seedable RNG so exports can be
//! reproduced.

pub mod fixtures;

use crate::models::{DailyReading, HourlyReading};
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::debug;

/// Daily target generation in kWh.
pub const DAILY_TARGET_KWH: f64 = 500.0;

/// Peak of the simulated intraday curve in W.
pub const HOURLY_PEAK_W: f64 = 2800.0;

/// Analytics time range selector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
pub enum TimeRange {
    #[value(name = "7d")]
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[value(name = "30d")]
    #[serde(rename = "30d")]
    Month,
    #[value(name = "90d")]
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    pub fn days(&self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }
}

/// Build the RNG for a run: seeded when a seed is configured, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Using seeded RNG: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

/// Generate `days` daily readings ending on `today`, oldest first.
pub fn generate_power_data<R: Rng>(days: u32, today: NaiveDate, rng: &mut R) -> Vec<DailyReading> {
    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset as i64);

            let base = 450.0 + rng.random::<f64>() * 200.0;
            // One day in five is overcast.
            let weather = if rng.random::<f64>() > 0.8 { 0.4 } else { 1.0 };
            let seasonal = 0.8 + 0.4 * (date.month0() as f64 / 12.0 * PI * 2.0).sin();

            DailyReading {
                date,
                generation: (base * weather * seasonal).round(),
                target: DAILY_TARGET_KWH,
                efficiency: 85.0 + rng.random::<f64>() * 10.0,
                irradiance: 300.0 + rng.random::<f64>() * 500.0,
                temperature: 20.0 + rng.random::<f64>() * 15.0,
            }
        })
        .collect()
}

/// Generate the 24-hour power curve.
///
/// Power is non-zero only between 06:00 and 18:00 inclusive.
pub fn generate_hourly_data<R: Rng>(rng: &mut R) -> Vec<HourlyReading> {
    (0..24u32)
        .map(|hour| {
            if !(6..=18).contains(&hour) {
                return HourlyReading {
                    hour,
                    power: 0.0,
                    voltage: 0.0,
                    current: 0.0,
                    efficiency: 0.0,
                };
            }

            let factor = 0.8 + rng.random::<f64>() * 0.3;
            let power = HOURLY_PEAK_W * ((hour as f64 - 6.0) / 12.0 * PI).sin() * factor;
            let voltage = 380.0 + rng.random::<f64>() * 40.0;
            let current = if power > 0.0 { power / voltage } else { 0.0 };
            let efficiency = if power > 0.0 {
                85.0 + rng.random::<f64>() * 10.0
            } else {
                0.0
            };

            HourlyReading {
                hour,
                power: power.max(0.0).round(),
                voltage: round2(voltage),
                current: round2(current),
                efficiency,
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    #[test]
    fn test_time_range_days() {
        assert_eq!(TimeRange::Week.days(), 7);
        assert_eq!(TimeRange::Month.days(), 30);
        assert_eq!(TimeRange::Quarter.days(), 90);
        assert_eq!(TimeRange::default(), TimeRange::Month);
    }

    #[test]
    fn test_power_data_dates_are_ascending_and_end_today() {
        let mut rng = rng_from_seed(Some(7));
        let data = generate_power_data(30, today(), &mut rng);

        assert_eq!(data.len(), 30);
        assert_eq!(data.last().map(|d| d.date), Some(today()));
        assert_eq!(data[0].date, today() - Duration::days(29));
        assert!(data.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_power_data_ranges() {
        let mut rng = rng_from_seed(Some(42));
        let data = generate_power_data(90, today(), &mut rng);

        for day in &data {
            assert!(day.generation >= 0.0);
            assert!(day.generation <= 650.0 * 1.2);
            assert_eq!(day.target, DAILY_TARGET_KWH);
            assert!((85.0..95.0).contains(&day.efficiency));
            assert!((300.0..800.0).contains(&day.irradiance));
            assert!((20.0..35.0).contains(&day.temperature));
            assert_eq!(day.generation.fract(), 0.0);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_power_data(14, today(), &mut rng_from_seed(Some(1234)));
        let b = generate_power_data(14, today(), &mut rng_from_seed(Some(1234)));
        assert_eq!(a, b);

        let c = generate_hourly_data(&mut rng_from_seed(Some(1234)));
        let d = generate_hourly_data(&mut rng_from_seed(Some(1234)));
        assert_eq!(c, d);
    }

    #[test]
    fn test_hourly_curve_is_dark_at_night() {
        let mut rng = rng_from_seed(Some(3));
        let data = generate_hourly_data(&mut rng);

        assert_eq!(data.len(), 24);
        for hour in &data {
            if hour.hour < 6 || hour.hour > 18 {
                assert_eq!(hour.power, 0.0);
                assert_eq!(hour.voltage, 0.0);
                assert_eq!(hour.current, 0.0);
            }
        }

        let noon = &data[12];
        assert!(noon.power >= HOURLY_PEAK_W * 0.8 - 1.0);
        assert!(noon.power <= HOURLY_PEAK_W * 1.1 + 1.0);
        assert!(noon.current > 0.0);
    }

    #[test]
    fn test_zero_days() {
        let mut rng = rng_from_seed(Some(0));
        assert!(generate_power_data(0, today(), &mut rng).is_empty());
    }
}
