//! Data models for the reporting tool.
//!
//! This module contains the reading series types, the derived metric
//! summary, and one typed record per report kind. Every record type
//! implements [`Record`] so the exporters can look fields up by column key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field lookup by column key, shared by every exportable row type.
pub trait Record {
    /// Returns the display string for `column`, or `None` if the record has no such field.
    fn field(&self, column: &str) -> Option<String>;

    /// Case-insensitive substring match used by the search filter.
    fn matches(&self, query: &str) -> bool {
        let _ = query;
        true
    }

    /// Raw timestamp behind a date-valued column, if any.
    fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        let _ = column;
        None
    }
}

/// Loosely shaped rows (JSON objects) are accepted as records too.
impl Record for serde_json::Value {
    fn field(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, column: &str) -> Option<String> {
        (**self).field(column)
    }

    fn matches(&self, query: &str) -> bool {
        (**self).matches(query)
    }

    fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        (**self).timestamp(column)
    }
}

/// A record viewed at a fixed instant.
///
/// Adds `<column>_ago` keys that render the record's timestamp columns as
/// relative times ("2 hours ago"); every other key is passed through.
#[derive(Debug, Clone, Copy)]
pub struct AsOf<'a, R> {
    pub record: &'a R,
    pub now: DateTime<Utc>,
}

impl<'a, R> AsOf<'a, R> {
    pub fn new(record: &'a R, now: DateTime<Utc>) -> Self {
        Self { record, now }
    }
}

impl<R: Record> Record for AsOf<'_, R> {
    fn field(&self, column: &str) -> Option<String> {
        match column.strip_suffix("_ago") {
            Some(base) => self
                .record
                .timestamp(base)
                .map(|then| time_ago(then, self.now)),
            None => self.record.field(column),
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.record.matches(query)
    }

    fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        self.record.timestamp(column)
    }
}

/// Coarse relative time: `Just now`, `5 minutes ago`, `2 hours ago`, `3 days ago`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if elapsed.num_minutes() < 1 {
        "Just now".to_string()
    } else if elapsed.num_hours() < 1 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        plural(elapsed.num_hours(), "hour")
    } else {
        plural(elapsed.num_days(), "day")
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Kind of quantity a reading measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingCategory {
    Power,
    Generation,
    Efficiency,
    Irradiance,
    Temperature,
    Voltage,
    Current,
}

impl ReadingCategory {
    /// Unit of the raw values, as reported next to JSON metrics.
    pub fn unit(&self) -> &'static str {
        match self {
            ReadingCategory::Power => "W",
            ReadingCategory::Generation => "kWh",
            ReadingCategory::Efficiency => "%",
            ReadingCategory::Irradiance => "W/m²",
            ReadingCategory::Temperature => "°C",
            ReadingCategory::Voltage => "V",
            ReadingCategory::Current => "A",
        }
    }
}

impl fmt::Display for ReadingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingCategory::Power => write!(f, "Power"),
            ReadingCategory::Generation => write!(f, "Generation"),
            ReadingCategory::Efficiency => write!(f, "Efficiency"),
            ReadingCategory::Irradiance => write!(f, "Irradiance"),
            ReadingCategory::Temperature => write!(f, "Temperature"),
            ReadingCategory::Voltage => write!(f, "Voltage"),
            ReadingCategory::Current => write!(f, "Current"),
        }
    }
}

/// A single timestamped numeric observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub category: ReadingCategory,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, value: f64, category: ReadingCategory) -> Self {
        Self {
            timestamp,
            value,
            category,
        }
    }
}

impl Record for Reading {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "timestamp" => Some(self.timestamp.to_rfc3339()),
            "value" => Some(self.value.to_string()),
            "category" => Some(self.category.to_string()),
            _ => None,
        }
    }
}

/// Scalar aggregates over a reading series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Number of readings aggregated.
    pub count: usize,
    /// Sum of all values.
    pub total: f64,
    /// Mean value, 0 for an empty series.
    pub average: f64,
    /// Largest value, `None` for an empty series.
    pub peak: Option<f64>,
    /// Percent change of the recent window average against the previous window.
    pub trend_percent: f64,
}

/// One day of generation data on the analytics page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    /// Energy generated in kWh.
    pub generation: f64,
    /// Daily target in kWh.
    pub target: f64,
    /// Efficiency in percent.
    pub efficiency: f64,
    /// Irradiance in W/m².
    pub irradiance: f64,
    /// Ambient temperature in °C.
    pub temperature: f64,
}

impl Record for DailyReading {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "date" => Some(self.date.format("%Y-%m-%d").to_string()),
            "generation" => Some(format!("{}", self.generation)),
            "target" => Some(format!("{}", self.target)),
            "efficiency" => Some(format!("{:.1}", self.efficiency)),
            "efficiency_pct" => Some(format!("{:.1}%", self.efficiency)),
            "irradiance" => Some(format!("{:.0}", self.irradiance)),
            "irradiance_unit" => Some(format!("{:.0} W/m²", self.irradiance)),
            "temperature" => Some(format!("{:.1}", self.temperature)),
            _ => None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.date.format("%Y-%m-%d").to_string().contains(query)
    }
}

/// One hour of the intraday power curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Power in W.
    pub power: f64,
    pub voltage: f64,
    pub current: f64,
    pub efficiency: f64,
}

impl HourlyReading {
    /// Label in `HH:00` form.
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

impl Record for HourlyReading {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "hour" => Some(self.label()),
            "power" => Some(format!("{}", self.power)),
            "voltage" => Some(format!("{}", self.voltage)),
            "current" => Some(format!("{}", self.current)),
            "efficiency" => Some(format!("{:.1}", self.efficiency)),
            _ => None,
        }
    }
}

/// Access level of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    EpcAdmin,
    Client,
    Technician,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::EpcAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "Super Admin"),
            Role::EpcAdmin => write!(f, "EPC Admin"),
            Role::Client => write!(f, "Client"),
            Role::Technician => write!(f, "Technician"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Pending => write!(f, "pending"),
        }
    }
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company: String,
    pub status: UserStatus,
    pub last_login: DateTime<Utc>,
    pub sites_access: u32,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "role" => Some(self.role.to_string()),
            "company" => Some(self.company.clone()),
            "status" => Some(self.status.to_string()),
            "sites_access" => Some(self.sites_access.to_string()),
            "last_login" => Some(self.last_login.to_rfc3339()),
            "created_at" => Some(self.created_at.to_rfc3339()),
            _ => None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ignore_case(&self.name, &query)
            || contains_ignore_case(&self.email, &query)
            || contains_ignore_case(&self.company, &query)
    }

    fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        match column {
            "last_login" => Some(self.last_login),
            "created_at" => Some(self.created_at),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Inverter,
    Logger,
    Sensor,
    Meter,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Inverter => write!(f, "inverter"),
            DeviceType::Logger => write!(f, "logger"),
            DeviceType::Sensor => write!(f, "sensor"),
            DeviceType::Meter => write!(f, "meter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Warning,
    Offline,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "online"),
            DeviceStatus::Warning => write!(f, "warning"),
            DeviceStatus::Offline => write!(f, "offline"),
        }
    }
}

/// A field device reporting into a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub site: String,
    /// Rated capacity in W.
    pub capacity: f64,
    pub status: DeviceStatus,
    /// Current output in W.
    pub power: f64,
    pub voltage: f64,
    pub current: f64,
    pub efficiency: f64,
    pub temperature: f64,
    pub last_seen: DateTime<Utc>,
    pub protocol: String,
}

impl Record for Device {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "type" => Some(self.device_type.to_string()),
            "brand" => Some(self.brand.clone()),
            "model" => Some(self.model.clone()),
            "serial_number" => Some(self.serial_number.clone()),
            "site" => Some(self.site.clone()),
            "capacity" => Some(format!("{}", self.capacity)),
            "status" => Some(self.status.to_string()),
            "power" => Some(format!("{}", self.power)),
            "voltage" => Some(format!("{:.1}", self.voltage)),
            "current" => Some(format!("{:.1}", self.current)),
            "efficiency" => Some(format!("{:.1}", self.efficiency)),
            "temperature" => Some(format!("{:.1}", self.temperature)),
            "last_seen" => Some(self.last_seen.to_rfc3339()),
            "protocol" => Some(self.protocol.clone()),
            _ => None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ignore_case(&self.name, &query)
            || contains_ignore_case(&self.serial_number, &query)
            || contains_ignore_case(&self.site, &query)
            || contains_ignore_case(&self.brand, &query)
    }

    fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        (column == "last_seen").then_some(self.last_seen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Active,
    Maintenance,
    Offline,
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteStatus::Active => write!(f, "active"),
            SiteStatus::Maintenance => write!(f, "maintenance"),
            SiteStatus::Offline => write!(f, "offline"),
        }
    }
}

/// An installation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Installed capacity in kW.
    pub capacity: f64,
    pub status: SiteStatus,
    pub devices: u32,
    /// Generation this month in MWh.
    pub monthly_generation: f64,
    pub efficiency: f64,
    pub alerts: u32,
    pub commissioned: NaiveDate,
    pub company: String,
}

impl Record for Site {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "location" => Some(self.location.clone()),
            "capacity" => Some(format!("{}", self.capacity)),
            "status" => Some(self.status.to_string()),
            "devices" => Some(self.devices.to_string()),
            "monthly_generation" => Some(format!("{:.1}", self.monthly_generation)),
            "efficiency" => Some(format!("{:.1}", self.efficiency)),
            "alerts" => Some(self.alerts.to_string()),
            "commissioned" => Some(self.commissioned.format("%Y-%m-%d").to_string()),
            "company" => Some(self.company.clone()),
            _ => None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ignore_case(&self.name, &query) || contains_ignore_case(&self.location, &query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Daily,
    Weekly,
    Monthly,
    Annual,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Daily => write!(f, "daily"),
            ReportType::Weekly => write!(f, "weekly"),
            ReportType::Monthly => write!(f, "monthly"),
            ReportType::Annual => write!(f, "annual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Completed,
    Generating,
    Sent,
    Failed,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Completed => write!(f, "completed"),
            ReportStatus::Generating => write!(f, "generating"),
            ReportStatus::Sent => write!(f, "sent"),
            ReportStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A previously generated performance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub name: String,
    pub report_type: ReportType,
    pub site: String,
    pub period: String,
    pub generated_date: NaiveDate,
    pub status: ReportStatus,
    pub size: String,
}

impl Record for ReportEntry {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "type" => Some(self.report_type.to_string()),
            "site" => Some(self.site.clone()),
            "period" => Some(self.period.clone()),
            "generated_date" => Some(self.generated_date.format("%Y-%m-%d").to_string()),
            "status" => Some(self.status.to_string()),
            "size" => Some(self.size.clone()),
            _ => None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ignore_case(&self.name, &query) || contains_ignore_case(&self.site, &query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Medium,
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Medium => write!(f, "medium"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Open,
    Acknowledged,
    Resolved,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertStatus::Open => write!(f, "open"),
            AlertStatus::Acknowledged => write!(f, "acknowledged"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// An alert raised against a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub device: String,
    pub site: String,
    pub description: String,
    pub triggered_at: DateTime<Utc>,
    pub status: AlertStatus,
    pub acknowledged_by: Option<String>,
}

impl Record for Alert {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.clone()),
            "type" => Some(self.alert_type.clone()),
            "severity" => Some(self.severity.to_string()),
            "device" => Some(self.device.clone()),
            "site" => Some(self.site.clone()),
            "description" => Some(self.description.clone()),
            "triggered_at" => Some(self.triggered_at.format("%Y-%m-%d %H:%M").to_string()),
            "status" => Some(self.status.to_string()),
            "acknowledged_by" => Some(self.acknowledged_by.clone().unwrap_or_default()),
            _ => None,
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ignore_case(&self.alert_type, &query)
            || contains_ignore_case(&self.device, &query)
            || contains_ignore_case(&self.site, &query)
            || contains_ignore_case(&self.description, &query)
    }

    fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        (column == "triggered_at").then_some(self.triggered_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            email: "sarah@solarflow.com".to_string(),
            role: Role::SuperAdmin,
            company: "SolarFlow".to_string(),
            status: UserStatus::Active,
            last_login: Utc.with_ymd_and_hms(2024, 12, 1, 11, 30, 0).unwrap(),
            sites_access: 25,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_json_value_record() {
        let row = json!({"name": "A", "val": 1, "missing": null});
        assert_eq!(row.field("name"), Some("A".to_string()));
        assert_eq!(row.field("val"), Some("1".to_string()));
        assert_eq!(row.field("missing"), Some(String::new()));
        assert_eq!(row.field("nope"), None);
    }

    #[test]
    fn test_user_fields() {
        let user = sample_user();
        assert_eq!(user.field("role"), Some("Super Admin".to_string()));
        assert_eq!(user.field("status"), Some("active".to_string()));
        assert_eq!(user.field("sites_access"), Some("25".to_string()));
        assert_eq!(user.field("unknown"), None);
    }

    #[test]
    fn test_user_search_is_case_insensitive() {
        let user = sample_user();
        assert!(user.matches("SARAH"));
        assert!(user.matches("solarflow"));
        assert!(!user.matches("michael"));
    }

    #[test]
    fn test_daily_reading_formatting() {
        let day = DailyReading {
            date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            generation: 512.0,
            target: 500.0,
            efficiency: 91.26,
            irradiance: 642.7,
            temperature: 24.0,
        };
        assert_eq!(day.field("date"), Some("2024-12-01".to_string()));
        assert_eq!(day.field("generation"), Some("512".to_string()));
        assert_eq!(day.field("efficiency"), Some("91.3".to_string()));
        assert_eq!(day.field("efficiency_pct"), Some("91.3%".to_string()));
        assert_eq!(day.field("irradiance"), Some("643".to_string()));
        assert_eq!(day.field("irradiance_unit"), Some("643 W/m²".to_string()));
    }

    #[test]
    fn test_role_admin() {
        assert!(Role::SuperAdmin.is_admin());
        assert!(Role::EpcAdmin.is_admin());
        assert!(!Role::Client.is_admin());
        assert!(!Role::Technician.is_admin());
    }

    #[test]
    fn test_hourly_label() {
        let hour = HourlyReading {
            hour: 7,
            power: 0.0,
            voltage: 0.0,
            current: 0.0,
            efficiency: 0.0,
        };
        assert_eq!(hour.label(), "07:00");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap();

        assert_eq!(time_ago(now, now), "Just now");
        assert_eq!(time_ago(now - chrono::Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - chrono::Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(time_ago(now - chrono::Duration::hours(5), now), "5 hours ago");
        assert_eq!(time_ago(now - chrono::Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn test_as_of_adds_relative_columns() {
        let user = sample_user();
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap();
        let row = AsOf::new(&user, now);

        assert_eq!(row.field("last_login_ago"), Some("30 minutes ago".to_string()));
        assert_eq!(row.field("name"), Some("Sarah Johnson".to_string()));
        assert_eq!(row.field("email_ago"), None);
        assert!(row.matches("solarflow"));
    }
}
