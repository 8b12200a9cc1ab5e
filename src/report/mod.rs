//! Report assembly.
//!
//! A [`Report`] bundles everything one export needs: the title, the summary
//! lines shown above the table, the analytics KPIs, and the record rows
//! projected onto the delimited-text and document column sets.

pub mod generator;

pub use generator::*;

use crate::analysis::{
    search, AlertStats, AnalyticsKpis, DeviceStats, ReportStats, SiteStats, UserStats,
};
use crate::export::{Column, Table};
use crate::mock::{self, fixtures, TimeRange};
use crate::models::{
    Alert, AsOf, DailyReading, Device, HourlyReading, Record, ReportEntry, Site, User,
};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use tracing::debug;

/// Which page's table is exported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Daily generation, efficiency and irradiance (default)
    #[default]
    Analytics,
    /// User accounts
    Users,
    /// Inverters, loggers, sensors and meters
    Devices,
    /// Installations
    Sites,
    /// Generated report history
    Reports,
    /// Alert log
    Alerts,
}

const ANALYTICS_CSV: &[Column<'static>] = &[
    Column::new("date", "Date"),
    Column::new("generation", "Generation (kWh)"),
    Column::new("target", "Target (kWh)"),
    Column::new("efficiency", "Efficiency (%)"),
    Column::new("irradiance", "Irradiance (W/m²)"),
];

const ANALYTICS_DOCUMENT: &[Column<'static>] = &[
    Column::new("date", "Date"),
    Column::new("generation", "Generation (kWh)"),
    Column::new("target", "Target (kWh)"),
    Column::new("efficiency_pct", "Efficiency"),
    Column::new("irradiance_unit", "Irradiance"),
];

const USERS_CSV: &[Column<'static>] = &[
    Column::new("name", "Name"),
    Column::new("email", "Email"),
    Column::new("role", "Role"),
    Column::new("company", "Company"),
    Column::new("status", "Status"),
    Column::new("sites_access", "Sites Access"),
    Column::new("last_login", "Last Login"),
];

const USERS_DOCUMENT: &[Column<'static>] = &[
    Column::new("name", "Name"),
    Column::new("email", "Email"),
    Column::new("role", "Role"),
    Column::new("company", "Company"),
    Column::new("status", "Status"),
    Column::new("sites_access", "Sites Access"),
    Column::new("last_login_ago", "Last Login"),
];

const DEVICES_CSV: &[Column<'static>] = &[
    Column::new("name", "Name"),
    Column::new("type", "Type"),
    Column::new("brand", "Brand"),
    Column::new("model", "Model"),
    Column::new("serial_number", "Serial Number"),
    Column::new("site", "Site"),
    Column::new("capacity", "Capacity (W)"),
    Column::new("status", "Status"),
    Column::new("power", "Power (W)"),
    Column::new("efficiency", "Efficiency (%)"),
    Column::new("temperature", "Temperature (°C)"),
    Column::new("protocol", "Protocol"),
    Column::new("last_seen", "Last Seen"),
];

const DEVICES_DOCUMENT: &[Column<'static>] = &[
    Column::new("name", "Name"),
    Column::new("type", "Type"),
    Column::new("site", "Site"),
    Column::new("status", "Status"),
    Column::new("power", "Power (W)"),
    Column::new("efficiency", "Efficiency (%)"),
    Column::new("last_seen_ago", "Last Seen"),
];

const SITES_CSV: &[Column<'static>] = &[
    Column::new("name", "Name"),
    Column::new("location", "Location"),
    Column::new("capacity", "Capacity (kW)"),
    Column::new("status", "Status"),
    Column::new("devices", "Devices"),
    Column::new("monthly_generation", "Monthly Generation (MWh)"),
    Column::new("efficiency", "Efficiency (%)"),
    Column::new("alerts", "Alerts"),
    Column::new("commissioned", "Commissioned"),
    Column::new("company", "Company"),
];

const SITES_DOCUMENT: &[Column<'static>] = &[
    Column::new("name", "Name"),
    Column::new("location", "Location"),
    Column::new("capacity", "Capacity (kW)"),
    Column::new("status", "Status"),
    Column::new("monthly_generation", "Generation (MWh)"),
    Column::new("efficiency", "Efficiency (%)"),
    Column::new("alerts", "Alerts"),
];

const REPORTS_COLUMNS: &[Column<'static>] = &[
    Column::new("name", "Report Name"),
    Column::new("type", "Type"),
    Column::new("site", "Site"),
    Column::new("period", "Period"),
    Column::new("generated_date", "Generated Date"),
    Column::new("status", "Status"),
    Column::new("size", "Size"),
];

const ALERTS_CSV: &[Column<'static>] = &[
    Column::new("id", "ID"),
    Column::new("type", "Type"),
    Column::new("severity", "Severity"),
    Column::new("device", "Device"),
    Column::new("site", "Site"),
    Column::new("description", "Description"),
    Column::new("triggered_at", "Triggered At"),
    Column::new("status", "Status"),
    Column::new("acknowledged_by", "Acknowledged By"),
];

const ALERTS_DOCUMENT: &[Column<'static>] = &[
    Column::new("type", "Type"),
    Column::new("severity", "Severity"),
    Column::new("device", "Device"),
    Column::new("site", "Site"),
    Column::new("triggered_at_ago", "Triggered"),
    Column::new("status", "Status"),
];

impl ReportKind {
    /// Lowercase name used in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Analytics => "analytics",
            ReportKind::Users => "users",
            ReportKind::Devices => "devices",
            ReportKind::Sites => "sites",
            ReportKind::Reports => "reports",
            ReportKind::Alerts => "alerts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Analytics => "Solar Analytics Report",
            ReportKind::Users => "User Management Report",
            ReportKind::Devices => "Devices Report",
            ReportKind::Sites => "Sites Report",
            ReportKind::Reports => "Reports Summary",
            ReportKind::Alerts => "Alerts Report",
        }
    }

    /// Columns written to delimited text.
    pub fn csv_columns(&self) -> &'static [Column<'static>] {
        match self {
            ReportKind::Analytics => ANALYTICS_CSV,
            ReportKind::Users => USERS_CSV,
            ReportKind::Devices => DEVICES_CSV,
            ReportKind::Sites => SITES_CSV,
            ReportKind::Reports => REPORTS_COLUMNS,
            ReportKind::Alerts => ALERTS_CSV,
        }
    }

    /// Columns laid out in the PDF document; narrower than the CSV set.
    pub fn document_columns(&self) -> &'static [Column<'static>] {
        match self {
            ReportKind::Analytics => ANALYTICS_DOCUMENT,
            ReportKind::Users => USERS_DOCUMENT,
            ReportKind::Devices => DEVICES_DOCUMENT,
            ReportKind::Sites => SITES_DOCUMENT,
            ReportKind::Reports => REPORTS_COLUMNS,
            ReportKind::Alerts => ALERTS_DOCUMENT,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Every table the dashboard pages show, for one run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub range: TimeRange,
    pub daily: Vec<DailyReading>,
    pub hourly: Vec<HourlyReading>,
    pub users: Vec<User>,
    pub devices: Vec<Device>,
    pub sites: Vec<Site>,
    pub reports: Vec<ReportEntry>,
    pub alerts: Vec<Alert>,
}

impl Dataset {
    /// Generate the analytics series for `range` ending `today` and load the static tables.
    pub fn generate<R: Rng>(range: TimeRange, today: NaiveDate, rng: &mut R) -> Self {
        let daily = mock::generate_power_data(range.days(), today, rng);
        let hourly = mock::generate_hourly_data(rng);
        debug!(
            "Generated {} daily and {} hourly readings",
            daily.len(),
            hourly.len()
        );

        Self {
            range,
            daily,
            hourly,
            users: fixtures::users(),
            devices: fixtures::devices(),
            sites: fixtures::sites(),
            reports: fixtures::reports(),
            alerts: fixtures::alerts(),
        }
    }
}

/// Inputs to [`assemble`] besides the data itself.
#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions<'a> {
    /// Trend window, in readings.
    pub window: NonZeroUsize,
    /// Search filter applied to the rows before export.
    pub query: Option<&'a str>,
    /// Instant the report is generated at; drives relative times and the current hour.
    pub now: DateTime<Utc>,
}

/// One report kind, ready for export.
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub summary_lines: Vec<String>,
    pub kpis: Option<AnalyticsKpis>,
    /// Rows under the delimited-text column set.
    pub csv: Table,
    /// Rows under the document column set.
    pub document: Table,
}

impl Report {
    pub fn row_count(&self) -> usize {
        self.csv.len()
    }
}

/// Build the report for `kind` from the dataset.
///
/// The search filter is applied first; summary figures describe the
/// filtered rows, i.e. what is actually exported.
pub fn assemble(kind: ReportKind, data: &Dataset, options: &AssembleOptions<'_>) -> Report {
    let query = options.query.unwrap_or("");
    let now = options.now;

    let (summary_lines, kpis, (csv, document)) = match kind {
        ReportKind::Analytics => {
            let daily = search(&data.daily, query);
            let kpis = AnalyticsKpis::compute(&daily, &data.hourly, now.hour(), options.window);
            let summary = vec![format!(
                "Time Range: Last {} days | Days: {}",
                data.range.days(),
                daily.len()
            )];
            (summary, Some(kpis), tables(kind, &daily))
        }
        ReportKind::Users => {
            let users = search(&data.users, query);
            let stats = UserStats::from_users(&users);
            let rows: Vec<_> = users.iter().map(|u| AsOf::new(u, now)).collect();
            let summary = vec![format!(
                "Total Users: {} | Active: {} | Admins: {}",
                stats.total, stats.active, stats.admins
            )];
            (summary, None, tables(kind, &rows))
        }
        ReportKind::Devices => {
            let devices = search(&data.devices, query);
            let stats = DeviceStats::from_devices(&devices);
            let rows: Vec<_> = devices.iter().map(|d| AsOf::new(d, now)).collect();
            let summary = vec![
                format!(
                    "Total Devices: {} | Online: {} | Inverters: {}",
                    stats.total, stats.online, stats.inverters
                ),
                format!(
                    "Total Capacity: {:.1} kW | Current Output: {:.1} kW ({}%)",
                    stats.total_capacity / 1000.0,
                    stats.current_output / 1000.0,
                    stats.utilization_percent()
                ),
            ];
            (summary, None, tables(kind, &rows))
        }
        ReportKind::Sites => {
            let sites = search(&data.sites, query);
            let stats = SiteStats::from_sites(&sites);
            let summary = vec![format!(
                "Total Sites: {} | Active: {} | Total Capacity: {:.1} MW | Alerts: {}",
                stats.total,
                stats.active,
                stats.total_capacity / 1000.0,
                stats.total_alerts
            )];
            (summary, None, tables(kind, &sites))
        }
        ReportKind::Reports => {
            let reports = search(&data.reports, query);
            let stats = ReportStats::from_reports(&reports);
            let summary = vec![format!(
                "Total Reports: {} | Completed: {}",
                stats.total, stats.completed
            )];
            (summary, None, tables(kind, &reports))
        }
        ReportKind::Alerts => {
            let alerts = search(&data.alerts, query);
            let stats = AlertStats::from_alerts(&alerts);
            let rows: Vec<_> = alerts.iter().map(|a| AsOf::new(a, now)).collect();
            let summary = vec![format!(
                "Total Alerts: {} | Open: {} | Acknowledged: {} | Critical: {}",
                stats.total, stats.open, stats.acknowledged, stats.critical
            )];
            (summary, None, tables(kind, &rows))
        }
    };

    debug!(
        "Assembled {} report: {} rows (query: {:?})",
        kind,
        csv.len(),
        options.query
    );

    Report {
        kind,
        title: kind.title().to_string(),
        generated_at: now,
        summary_lines,
        kpis,
        csv,
        document,
    }
}

fn tables<R: Record>(kind: ReportKind, rows: &[R]) -> (Table, Table) {
    (
        Table::from_records(rows, kind.csv_columns()),
        Table::from_records(rows, kind.document_columns()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap()
    }

    fn dataset() -> Dataset {
        let mut rng = mock::rng_from_seed(Some(42));
        Dataset::generate(TimeRange::Month, now().date_naive(), &mut rng)
    }

    fn options(query: Option<&str>) -> AssembleOptions<'_> {
        AssembleOptions {
            window: NonZeroUsize::new(7).unwrap(),
            query,
            now: now(),
        }
    }

    #[test]
    fn test_kind_slugs_and_titles() {
        assert_eq!(ReportKind::Analytics.slug(), "analytics");
        assert_eq!(ReportKind::Reports.title(), "Reports Summary");
        assert_eq!(ReportKind::Users.to_string(), "users");
    }

    #[test]
    fn test_every_kind_has_columns() {
        for kind in [
            ReportKind::Analytics,
            ReportKind::Users,
            ReportKind::Devices,
            ReportKind::Sites,
            ReportKind::Reports,
            ReportKind::Alerts,
        ] {
            assert!(!kind.csv_columns().is_empty());
            assert!(!kind.document_columns().is_empty());
        }
    }

    #[test]
    fn test_analytics_report() {
        let data = dataset();
        let report = assemble(ReportKind::Analytics, &data, &options(None));

        assert_eq!(report.title, "Solar Analytics Report");
        assert_eq!(report.row_count(), 30);
        assert_eq!(report.csv.headers[4], "Irradiance (W/m²)");
        assert!(report.document.rows[0][3].ends_with('%'));

        let kpis = report.kpis.unwrap();
        let expected: f64 = data.daily.iter().map(|d| d.generation).sum();
        assert_eq!(kpis.total_generation, expected.round());
        assert_eq!(kpis.generation.count, 30);
    }

    #[test]
    fn test_users_report_summary() {
        let report = assemble(ReportKind::Users, &dataset(), &options(None));

        assert_eq!(report.summary_lines, vec!["Total Users: 6 | Active: 4 | Admins: 3"]);
        assert!(report.kpis.is_none());
        assert_eq!(report.document.headers.last().unwrap(), "Last Login");
        assert_eq!(report.document.rows[0].last().unwrap(), "30 minutes ago");
    }

    #[test]
    fn test_reports_report() {
        let report = assemble(ReportKind::Reports, &dataset(), &options(None));

        assert_eq!(report.summary_lines, vec!["Total Reports: 4 | Completed: 2"]);
        assert_eq!(
            report.csv.headers,
            vec!["Report Name", "Type", "Site", "Period", "Generated Date", "Status", "Size"]
        );
        assert_eq!(report.csv, report.document);
    }

    #[test]
    fn test_search_filters_rows_and_summary() {
        let data = dataset();
        let all = assemble(ReportKind::Devices, &data, &options(None));
        let filtered = assemble(ReportKind::Devices, &data, &options(Some("no-such-device")));

        assert_eq!(all.row_count(), data.devices.len());
        assert_eq!(filtered.row_count(), 0);
        assert!(filtered.summary_lines[0].starts_with("Total Devices: 0"));
    }

    #[test]
    fn test_alerts_report_uses_relative_times() {
        let report = assemble(ReportKind::Alerts, &dataset(), &options(None));

        assert_eq!(report.row_count(), 5);
        let triggered = report
            .document
            .headers
            .iter()
            .position(|h| h == "Triggered")
            .unwrap();
        for row in &report.document.rows {
            assert!(row[triggered].ends_with("ago") || row[triggered] == "Just now");
        }
    }
}
