//! Reading aggregation and trend computation.
//!
//! This module reduces an ordered reading series into a [`MetricSummary`]
//! and provides the period and window helpers the summary is built from.

use crate::models::{MetricSummary, Reading};
use chrono::{DateTime, Duration, Utc};
use std::num::NonZeroUsize;

/// A contiguous run of readings bounded by `[start, end)`.
#[derive(Debug, Clone, Copy)]
pub struct Period<'a> {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub readings: &'a [Reading],
}

impl<'a> Period<'a> {
    /// Select the readings of an ascending series that fall in `[start, end)`.
    pub fn between(readings: &'a [Reading], start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let lo = readings.partition_point(|r| r.timestamp < start);
        let hi = readings.partition_point(|r| r.timestamp < end).max(lo);

        Self {
            start,
            end,
            readings: &readings[lo..hi],
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Mean value over the period, 0 when empty.
    pub fn average(&self) -> f64 {
        average(self.readings)
    }

    /// Summarize this period with the given trend window.
    pub fn summarize(&self, window_size: NonZeroUsize) -> MetricSummary {
        aggregate(self.readings, window_size)
    }
}

/// Totals of the last `days` days of a series and of the `days` days before them.
///
/// Days are counted back from the end of the day of the last reading, so
/// gaps in the series shrink a period rather than shifting it.
pub fn compare_periods(readings: &[Reading], days: NonZeroUsize) -> (MetricSummary, MetricSummary) {
    let Some(last) = readings.last() else {
        return (MetricSummary::default(), MetricSummary::default());
    };

    let span = Duration::days(days.get() as i64);
    let end = last.timestamp + Duration::days(1);
    let recent = Period::between(readings, end - span, end);
    let previous = Period::between(readings, end - span - span, end - span);

    (recent.summarize(days), previous.summarize(days))
}

/// Summarize a reading series.
///
/// Never fails: an empty series yields zero totals, no peak and a zero trend.
pub fn aggregate(readings: &[Reading], window_size: NonZeroUsize) -> MetricSummary {
    if readings.is_empty() {
        return MetricSummary::default();
    }

    let total: f64 = readings.iter().map(|r| r.value).sum();
    let peak = readings
        .iter()
        .map(|r| r.value)
        .fold(f64::NEG_INFINITY, f64::max);

    MetricSummary {
        count: readings.len(),
        total,
        average: total / readings.len() as f64,
        peak: Some(peak),
        trend_percent: trend_percent(readings, window_size),
    }
}

/// Split a series into `(previous, recent)` trend windows.
///
/// The recent window is the last `min(len, w)` readings; the previous window
/// is at most `w` readings immediately before it and may be shorter or empty.
pub fn trend_windows(readings: &[Reading], window_size: NonZeroUsize) -> (&[Reading], &[Reading]) {
    let w = window_size.get();
    let n = readings.len();
    let recent_start = n.saturating_sub(w);
    let previous_start = recent_start.saturating_sub(w);

    (
        &readings[previous_start..recent_start],
        &readings[recent_start..],
    )
}

/// Percent change between the recent and previous window averages.
///
/// Returns 0 when the previous window is empty or its average is not positive.
pub fn trend_percent(readings: &[Reading], window_size: NonZeroUsize) -> f64 {
    let (previous, recent) = trend_windows(readings, window_size);
    if previous.is_empty() || recent.is_empty() {
        return 0.0;
    }

    percent_change(average(previous), average(recent))
}

/// `(current - previous) / previous * 100`.
///
/// 0 when `previous` is not positive or the result is not a finite number.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous <= 0.0 || previous.is_nan() {
        return 0.0;
    }

    let change = (current - previous) / previous * 100.0;
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

/// Mean of the values, 0 for an empty slice.
pub fn average(readings: &[Reading]) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| r.value).sum::<f64>() / readings.len() as f64
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingCategory;
    use chrono::TimeZone;

    fn window(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn series(values: &[f64]) -> Vec<Reading> {
        let start = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Reading::new(start + Duration::hours(i as i64), *v, ReadingCategory::Power))
            .collect()
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[], window(7));

        assert_eq!(summary.count, 0);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.peak, None);
        assert_eq!(summary.trend_percent, 0.0);
    }

    #[test]
    fn test_aggregate_worked_example() {
        let readings = series(&[100.0, 200.0, 0.0, 300.0, 400.0]);
        let summary = aggregate(&readings, window(2));

        assert_eq!(summary.count, 5);
        assert_eq!(summary.total, 1000.0);
        assert_eq!(summary.average, 200.0);
        assert_eq!(summary.peak, Some(400.0));
        assert_eq!(summary.trend_percent, 250.0);
    }

    #[test]
    fn test_aggregate_single_reading() {
        let readings = series(&[42.5]);
        let summary = aggregate(&readings, window(7));

        assert_eq!(summary.average, 42.5);
        assert_eq!(summary.peak, Some(42.5));
        assert_eq!(summary.trend_percent, 0.0);
    }

    #[test]
    fn test_total_independent_of_order() {
        let values = [3.0, 1.5, 8.0, 0.25, 6.0];
        let expected: f64 = values.iter().sum();

        let mut permuted = values.to_vec();
        for rotation in 0..values.len() {
            permuted.rotate_left(1);
            let summary = aggregate(&series(&permuted), window(2));
            assert_eq!(summary.total, expected, "rotation {}", rotation);
            assert_eq!(summary.peak, Some(8.0));
            assert_eq!(summary.average, expected / values.len() as f64);
        }

        permuted.reverse();
        assert_eq!(aggregate(&series(&permuted), window(3)).total, expected);
    }

    #[test]
    fn test_trend_zero_previous_average() {
        let readings = series(&[0.0, 0.0, 5.0, 10.0]);
        let summary = aggregate(&readings, window(2));

        assert_eq!(summary.trend_percent, 0.0);
        assert!(summary.trend_percent.is_finite());
    }

    #[test]
    fn test_trend_windows_clamp_short_history() {
        let readings = series(&[1.0, 2.0, 3.0]);
        let (previous, recent) = trend_windows(&readings, window(2));

        assert_eq!(previous.len(), 1);
        assert_eq!(recent.len(), 2);
        assert_eq!(previous[0].value, 1.0);

        // recent = 2.5, previous = 1.0
        assert_eq!(trend_percent(&readings, window(2)), 150.0);
    }

    #[test]
    fn test_trend_windows_history_shorter_than_window() {
        let readings = series(&[10.0, 20.0, 30.0]);
        let (previous, recent) = trend_windows(&readings, window(7));

        assert!(previous.is_empty());
        assert_eq!(recent.len(), 3);
        assert_eq!(trend_percent(&readings, window(7)), 0.0);
    }

    #[test]
    fn test_trend_negative() {
        let readings = series(&[200.0, 200.0, 100.0, 100.0]);
        assert_eq!(trend_percent(&readings, window(2)), -50.0);
    }

    #[test]
    fn test_period_between() {
        let readings = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let start = readings[1].timestamp;
        let end = readings[4].timestamp;

        let period = Period::between(&readings, start, end);

        assert_eq!(period.len(), 3);
        assert_eq!(period.average(), 3.0);
        assert_eq!(period.summarize(window(1)).total, 9.0);
    }

    #[test]
    fn test_period_between_inverted_bounds() {
        let readings = series(&[1.0, 2.0, 3.0]);
        let period = Period::between(&readings, readings[2].timestamp, readings[0].timestamp);

        assert!(period.is_empty());
        assert_eq!(period.average(), 0.0);
    }

    #[test]
    fn test_trend_negative_previous_average() {
        let readings = series(&[-4.0, -2.0, 5.0, 10.0]);
        assert_eq!(trend_percent(&readings, window(2)), 0.0);
        assert_eq!(percent_change(-3.0, 7.5), 0.0);
        assert_eq!(percent_change(f64::NAN, 7.5), 0.0);
    }

    #[test]
    fn test_compare_periods_by_day() {
        let start = Utc.with_ymd_and_hms(2024, 11, 20, 0, 0, 0).unwrap();
        let readings: Vec<Reading> = (0..10)
            .map(|d| {
                Reading::new(
                    start + Duration::days(d),
                    (d + 1) as f64,
                    ReadingCategory::Generation,
                )
            })
            .collect();

        let (recent, previous) = compare_periods(&readings, window(3));

        // days 8..=10 and 5..=7
        assert_eq!(recent.count, 3);
        assert_eq!(recent.total, 27.0);
        assert_eq!(previous.count, 3);
        assert_eq!(previous.total, 18.0);
    }

    #[test]
    fn test_compare_periods_short_history() {
        let start = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let readings = vec![
            Reading::new(start, 5.0, ReadingCategory::Generation),
            Reading::new(start + Duration::days(1), 7.0, ReadingCategory::Generation),
        ];

        let (recent, previous) = compare_periods(&readings, window(7));
        assert_eq!(recent.total, 12.0);
        assert_eq!(previous.count, 0);

        let (recent, previous) = compare_periods(&[], window(7));
        assert_eq!(recent, MetricSummary::default());
        assert_eq!(previous.peak, None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(12.35, 0), 12.0);
        assert_eq!(round_to(-3.14159, 2), -3.14);
    }
}
