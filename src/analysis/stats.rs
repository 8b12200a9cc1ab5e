//! Per-page statistics over the record tables.

use super::aggregator::{aggregate, compare_periods, round_to};
use crate::models::{
    Alert, AlertSeverity, AlertStatus, DailyReading, Device, DeviceStatus, DeviceType,
    HourlyReading, MetricSummary, Reading, ReadingCategory, Record, ReportEntry, ReportStatus,
    Site, SiteStatus, User, UserStatus,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::num::NonZeroUsize;

/// Headline figures for the analytics page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsKpis {
    /// Total generation over the range in kWh.
    pub total_generation: f64,
    /// Average efficiency in percent, 1 dp.
    pub avg_efficiency: f64,
    /// Power at the current hour in W.
    pub current_power: f64,
    /// Highest hourly power in W.
    pub peak_power: f64,
    /// Generation trend in percent, 1 dp.
    pub trend: f64,
    /// Length in days of the two compared periods.
    pub period_days: usize,
    /// Generation over the last `period_days` days in kWh.
    pub recent_generation: f64,
    /// Generation over the `period_days` days before those in kWh.
    pub previous_generation: f64,
    /// Raw generation summary the figures above are derived from.
    pub generation: MetricSummary,
}

impl AnalyticsKpis {
    pub fn compute(
        daily: &[DailyReading],
        hourly: &[HourlyReading],
        current_hour: u32,
        window: NonZeroUsize,
    ) -> Self {
        let generation_series = daily_series(daily, ReadingCategory::Generation);
        let generation = aggregate(&generation_series, window);
        let (recent, previous) = compare_periods(&generation_series, window);
        let efficiency = aggregate(&daily_series(daily, ReadingCategory::Efficiency), window);
        let power = aggregate(&hourly_series(hourly), window);

        let current_power = hourly
            .iter()
            .find(|h| h.hour == current_hour)
            .map(|h| h.power)
            .unwrap_or(0.0);

        Self {
            total_generation: generation.total.round(),
            avg_efficiency: round_to(efficiency.average, 1),
            current_power: current_power.round(),
            peak_power: power.peak.unwrap_or(0.0).round(),
            trend: round_to(generation.trend_percent, 1),
            period_days: window.get(),
            recent_generation: recent.total.round(),
            previous_generation: previous.total.round(),
            generation,
        }
    }

    /// KPI lines as printed in the analytics document.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "Total Generation: {:.1} MWh",
                self.total_generation / 1000.0
            ),
            format!("Average Efficiency: {}%", self.avg_efficiency),
            format!("Current Power: {:.1} MW", self.current_power / 1000.0),
            format!("Peak Power: {:.1} MW", self.peak_power / 1000.0),
            format!("Generation Trend: {:+.1}%", self.trend),
            format!(
                "Last {n} Days: {:.1} MWh | Previous {n} Days: {:.1} MWh",
                self.recent_generation / 1000.0,
                self.previous_generation / 1000.0,
                n = self.period_days
            ),
        ]
    }
}

/// Convert daily rows into a reading series of one category.
pub fn daily_series(daily: &[DailyReading], category: ReadingCategory) -> Vec<Reading> {
    daily
        .iter()
        .map(|d| {
            let value = match category {
                ReadingCategory::Efficiency => d.efficiency,
                ReadingCategory::Irradiance => d.irradiance,
                ReadingCategory::Temperature => d.temperature,
                _ => d.generation,
            };
            Reading::new(start_of_day(d.date), value, category)
        })
        .collect()
}

/// Convert the intraday curve into a power reading series.
pub fn hourly_series(hourly: &[HourlyReading]) -> Vec<Reading> {
    let day = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
    hourly
        .iter()
        .map(|h| {
            Reading::new(
                day + chrono::Duration::hours(h.hour as i64),
                h.power,
                ReadingCategory::Power,
            )
        })
        .collect()
}

fn start_of_day(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub clients: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total: users.len(),
            active: users
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            admins: users.iter().filter(|u| u.role.is_admin()).count(),
            clients: users
                .iter()
                .filter(|u| u.role == crate::models::Role::Client)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceStats {
    pub total: usize,
    pub online: usize,
    pub inverters: usize,
    /// Sum of rated capacity in W.
    pub total_capacity: f64,
    /// Sum of current output in W.
    pub current_output: f64,
}

impl DeviceStats {
    pub fn from_devices(devices: &[Device]) -> Self {
        Self {
            total: devices.len(),
            online: devices
                .iter()
                .filter(|d| d.status == DeviceStatus::Online)
                .count(),
            inverters: devices
                .iter()
                .filter(|d| d.device_type == DeviceType::Inverter)
                .count(),
            total_capacity: devices.iter().map(|d| d.capacity).sum(),
            current_output: devices.iter().map(|d| d.power).sum(),
        }
    }

    /// Output as a share of rated capacity, 0 without capacity.
    pub fn utilization_percent(&self) -> f64 {
        if self.total_capacity > 0.0 {
            round_to(self.current_output / self.total_capacity * 100.0, 1)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteStats {
    pub total: usize,
    pub active: usize,
    /// Sum of installed capacity in kW.
    pub total_capacity: f64,
    pub total_alerts: u32,
}

impl SiteStats {
    pub fn from_sites(sites: &[Site]) -> Self {
        Self {
            total: sites.len(),
            active: sites
                .iter()
                .filter(|s| s.status == SiteStatus::Active)
                .count(),
            total_capacity: sites.iter().map(|s| s.capacity).sum(),
            total_alerts: sites.iter().map(|s| s.alerts).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertStats {
    pub total: usize,
    pub open: usize,
    pub acknowledged: usize,
    pub critical: usize,
}

impl AlertStats {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        Self {
            total: alerts.len(),
            open: alerts
                .iter()
                .filter(|a| a.status == AlertStatus::Open)
                .count(),
            acknowledged: alerts
                .iter()
                .filter(|a| a.status == AlertStatus::Acknowledged)
                .count(),
            critical: alerts
                .iter()
                .filter(|a| a.severity == AlertSeverity::Critical)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub completed: usize,
}

impl ReportStats {
    pub fn from_reports(reports: &[ReportEntry]) -> Self {
        Self {
            total: reports.len(),
            completed: reports
                .iter()
                .filter(|r| r.status == ReportStatus::Completed)
                .count(),
        }
    }
}

/// Keep the records matching a search query; an empty query keeps everything.
pub fn search<R: Record + Clone>(records: &[R], query: &str) -> Vec<R> {
    let query = query.trim();
    if query.is_empty() {
        return records.to_vec();
    }
    records.iter().filter(|r| r.matches(query)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::fixtures;

    fn window(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn day(d: u32, generation: f64, efficiency: f64) -> DailyReading {
        DailyReading {
            date: NaiveDate::from_ymd_opt(2024, 12, d).unwrap(),
            generation,
            target: 500.0,
            efficiency,
            irradiance: 500.0,
            temperature: 25.0,
        }
    }

    fn hour(h: u32, power: f64) -> HourlyReading {
        HourlyReading {
            hour: h,
            power,
            voltage: 400.0,
            current: power / 400.0,
            efficiency: 90.0,
        }
    }

    #[test]
    fn test_analytics_kpis() {
        let daily = vec![
            day(1, 400.0, 90.0),
            day(2, 400.0, 92.0),
            day(3, 600.0, 88.0),
            day(4, 600.0, 86.0),
        ];
        let hourly = vec![hour(11, 2400.0), hour(12, 2800.0), hour(13, 2500.0)];

        let kpis = AnalyticsKpis::compute(&daily, &hourly, 13, window(2));

        assert_eq!(kpis.total_generation, 2000.0);
        assert_eq!(kpis.avg_efficiency, 89.0);
        assert_eq!(kpis.current_power, 2500.0);
        assert_eq!(kpis.peak_power, 2800.0);
        assert_eq!(kpis.trend, 50.0);
        assert_eq!(kpis.period_days, 2);
        assert_eq!(kpis.recent_generation, 1200.0);
        assert_eq!(kpis.previous_generation, 800.0);
    }

    #[test]
    fn test_analytics_kpis_empty() {
        let kpis = AnalyticsKpis::compute(&[], &[], 12, window(7));

        assert_eq!(kpis.total_generation, 0.0);
        assert_eq!(kpis.avg_efficiency, 0.0);
        assert_eq!(kpis.current_power, 0.0);
        assert_eq!(kpis.peak_power, 0.0);
        assert_eq!(kpis.trend, 0.0);
        assert_eq!(kpis.recent_generation, 0.0);
    }

    #[test]
    fn test_kpi_lines() {
        let daily = vec![day(1, 1500.0, 90.0)];
        let kpis = AnalyticsKpis::compute(&daily, &[hour(12, 2800.0)], 12, window(7));
        let lines = kpis.lines();

        assert_eq!(lines[0], "Total Generation: 1.5 MWh");
        assert_eq!(lines[1], "Average Efficiency: 90%");
        assert_eq!(lines[2], "Current Power: 2.8 MW");
        assert_eq!(lines[4], "Generation Trend: +0.0%");
        assert_eq!(lines[5], "Last 7 Days: 1.5 MWh | Previous 7 Days: 0.0 MWh");
    }

    #[test]
    fn test_user_stats_from_fixtures() {
        let stats = UserStats::from_users(&fixtures::users());

        assert_eq!(stats.total, 6);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.admins, 3);
        assert_eq!(stats.clients, 2);
    }

    #[test]
    fn test_device_stats() {
        let devices = fixtures::devices();
        let stats = DeviceStats::from_devices(&devices);

        assert_eq!(stats.total, devices.len());
        assert!(stats.online <= stats.total);
        assert!(stats.inverters > 0);
        assert!(stats.utilization_percent() > 0.0);
        assert!(stats.utilization_percent() <= 100.0);
    }

    #[test]
    fn test_device_stats_empty() {
        let stats = DeviceStats::from_devices(&[]);
        assert_eq!(stats.utilization_percent(), 0.0);
    }

    #[test]
    fn test_site_stats() {
        let sites = fixtures::sites();
        let stats = SiteStats::from_sites(&sites);

        assert_eq!(stats.total, sites.len());
        assert_eq!(
            stats.total_alerts,
            sites.iter().map(|s| s.alerts).sum::<u32>()
        );
        assert!(stats.active < stats.total);
    }

    #[test]
    fn test_alert_and_report_stats() {
        let alerts = AlertStats::from_alerts(&fixtures::alerts());
        assert!(alerts.open >= 1);
        assert!(alerts.critical >= 1);
        assert!(alerts.open + alerts.acknowledged <= alerts.total);

        let reports = ReportStats::from_reports(&fixtures::reports());
        assert_eq!(reports.total, 4);
        assert_eq!(reports.completed, 2);
    }

    #[test]
    fn test_search() {
        let users = fixtures::users();

        assert_eq!(search(&users, "").len(), users.len());
        assert_eq!(search(&users, "   ").len(), users.len());

        let found = search(&users, "priya");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Priya Sharma");

        assert!(search(&users, "no-such-user").is_empty());
    }
}
