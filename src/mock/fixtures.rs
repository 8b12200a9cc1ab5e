//! Static record tables for the users, devices, sites, reports and alerts pages.

use crate::models::{
    Alert, AlertSeverity, AlertStatus, Device, DeviceStatus, DeviceType, ReportEntry, ReportStatus,
    ReportType, Role, Site, SiteStatus, User, UserStatus,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    company: &str,
    status: UserStatus,
    last_login: DateTime<Utc>,
    sites_access: u32,
    created_at: DateTime<Utc>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        company: company.to_string(),
        status,
        last_login,
        sites_access,
        created_at,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(
            "1",
            "Sarah Johnson",
            "sarah@solarflow.com",
            Role::SuperAdmin,
            "SolarFlow",
            UserStatus::Active,
            ts(2024, 12, 1, 11, 30),
            25,
            ts(2024, 1, 1, 0, 0),
        ),
        user(
            "2",
            "Michael Chen",
            "michael@adanisolar.com",
            Role::EpcAdmin,
            "Adani Solar",
            UserStatus::Active,
            ts(2024, 12, 1, 10, 15),
            12,
            ts(2024, 2, 15, 0, 0),
        ),
        user(
            "3",
            "Priya Sharma",
            "priya@greenenergy.com",
            Role::Client,
            "Green Energy Corp",
            UserStatus::Active,
            ts(2024, 12, 1, 9, 45),
            3,
            ts(2024, 3, 20, 0, 0),
        ),
        user(
            "4",
            "David Rodriguez",
            "david@techsolar.com",
            Role::Technician,
            "TechSolar Services",
            UserStatus::Active,
            ts(2024, 11, 30, 16, 30),
            8,
            ts(2024, 4, 10, 0, 0),
        ),
        user(
            "5",
            "Lisa Wang",
            "lisa@renewables.com",
            Role::EpcAdmin,
            "Renewables Inc",
            UserStatus::Inactive,
            ts(2024, 11, 25, 14, 20),
            5,
            ts(2024, 5, 5, 0, 0),
        ),
        user(
            "6",
            "Ahmed Hassan",
            "ahmed@solartechme.com",
            Role::Client,
            "SolarTech Middle East",
            UserStatus::Pending,
            ts(2024, 11, 28, 12, 0),
            0,
            ts(2024, 11, 28, 0, 0),
        ),
    ]
}

struct DeviceEntry {
    id: &'static str,
    name: &'static str,
    device_type: DeviceType,
    brand: &'static str,
    model: &'static str,
    serial_number: &'static str,
    site: &'static str,
    capacity: f64,
    status: DeviceStatus,
    power: f64,
    voltage: f64,
    current: f64,
    efficiency: f64,
    temperature: f64,
    last_seen: DateTime<Utc>,
    protocol: &'static str,
}

impl From<DeviceEntry> for Device {
    fn from(entry: DeviceEntry) -> Self {
        Device {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            device_type: entry.device_type,
            brand: entry.brand.to_string(),
            model: entry.model.to_string(),
            serial_number: entry.serial_number.to_string(),
            site: entry.site.to_string(),
            capacity: entry.capacity,
            status: entry.status,
            power: entry.power,
            voltage: entry.voltage,
            current: entry.current,
            efficiency: entry.efficiency,
            temperature: entry.temperature,
            last_seen: entry.last_seen,
            protocol: entry.protocol.to_string(),
        }
    }
}

pub fn devices() -> Vec<Device> {
    vec![
        DeviceEntry {
            id: "1",
            name: "Inverter 1",
            device_type: DeviceType::Inverter,
            brand: "SolarEdge",
            model: "SE10K",
            serial_number: "SE1001234567",
            site: "Suntech Industrial Park",
            capacity: 10000.0,
            status: DeviceStatus::Online,
            power: 8500.0,
            voltage: 385.2,
            current: 22.1,
            efficiency: 92.3,
            temperature: 48.5,
            last_seen: ts(2024, 12, 1, 11, 30),
            protocol: "Modbus TCP",
        },
        DeviceEntry {
            id: "2",
            name: "Inverter 2",
            device_type: DeviceType::Inverter,
            brand: "Huawei",
            model: "SUN2000-8KTL",
            serial_number: "HW2001234567",
            site: "Green Valley Mall",
            capacity: 8000.0,
            status: DeviceStatus::Online,
            power: 7200.0,
            voltage: 380.1,
            current: 18.9,
            efficiency: 90.8,
            temperature: 52.1,
            last_seen: ts(2024, 12, 1, 11, 29),
            protocol: "Modbus TCP",
        },
        DeviceEntry {
            id: "3",
            name: "Data Logger 1",
            device_type: DeviceType::Logger,
            brand: "SolarLog",
            model: "SL1200",
            serial_number: "SL1001234567",
            site: "Suntech Industrial Park",
            capacity: 0.0,
            status: DeviceStatus::Online,
            power: 0.0,
            voltage: 0.0,
            current: 0.0,
            efficiency: 0.0,
            temperature: 35.2,
            last_seen: ts(2024, 12, 1, 11, 30),
            protocol: "HTTP API",
        },
        DeviceEntry {
            id: "4",
            name: "Inverter 3",
            device_type: DeviceType::Inverter,
            brand: "Fronius",
            model: "Primo 6.0-1",
            serial_number: "FR3001234567",
            site: "Textile Factory Rooftop",
            capacity: 6000.0,
            status: DeviceStatus::Warning,
            power: 4200.0,
            voltage: 375.8,
            current: 11.2,
            efficiency: 85.3,
            temperature: 65.8,
            last_seen: ts(2024, 12, 1, 11, 25),
            protocol: "Modbus TCP",
        },
        DeviceEntry {
            id: "5",
            name: "Weather Station",
            device_type: DeviceType::Sensor,
            brand: "Campbell Scientific",
            model: "CR1000X",
            serial_number: "CS4001234567",
            site: "Airport Terminal Solar",
            capacity: 0.0,
            status: DeviceStatus::Online,
            power: 0.0,
            voltage: 0.0,
            current: 0.0,
            efficiency: 0.0,
            temperature: 28.5,
            last_seen: ts(2024, 12, 1, 11, 30),
            protocol: "MQTT",
        },
        DeviceEntry {
            id: "6",
            name: "Inverter 4",
            device_type: DeviceType::Inverter,
            brand: "ABB",
            model: "PVS-50-TL",
            serial_number: "AB5001234567",
            site: "Residential Complex A",
            capacity: 50000.0,
            status: DeviceStatus::Offline,
            power: 0.0,
            voltage: 0.0,
            current: 0.0,
            efficiency: 0.0,
            temperature: 0.0,
            last_seen: ts(2024, 11, 30, 14, 20),
            protocol: "Modbus TCP",
        },
    ]
    .into_iter()
    .map(Device::from)
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn site(
    id: &str,
    name: &str,
    location: &str,
    capacity: f64,
    status: SiteStatus,
    devices: u32,
    monthly_generation: f64,
    efficiency: f64,
    alerts: u32,
    commissioned: NaiveDate,
    company: &str,
) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        capacity,
        status,
        devices,
        monthly_generation,
        efficiency,
        alerts,
        commissioned,
        company: company.to_string(),
    }
}

pub fn sites() -> Vec<Site> {
    vec![
        site(
            "1",
            "Suntech Industrial Park",
            "Mumbai, Maharashtra",
            2500.0,
            SiteStatus::Active,
            8,
            485.2,
            89.5,
            0,
            date(2023, 3, 15),
            "Adani Solar",
        ),
        site(
            "2",
            "Green Valley Mall",
            "Pune, Maharashtra",
            1800.0,
            SiteStatus::Active,
            6,
            342.8,
            91.2,
            1,
            date(2023, 1, 20),
            "Tata Solar",
        ),
        site(
            "3",
            "Textile Factory Rooftop",
            "Coimbatore, Tamil Nadu",
            3200.0,
            SiteStatus::Maintenance,
            12,
            0.0,
            0.0,
            3,
            date(2022, 11, 10),
            "Solar Power India",
        ),
        site(
            "4",
            "Residential Complex A",
            "Bangalore, Karnataka",
            950.0,
            SiteStatus::Active,
            4,
            198.7,
            87.3,
            0,
            date(2023, 6, 5),
            "Vikram Solar",
        ),
        site(
            "5",
            "Airport Terminal Solar",
            "Delhi, NCR",
            5000.0,
            SiteStatus::Active,
            20,
            892.1,
            92.8,
            0,
            date(2022, 8, 12),
            "Waaree Energies",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn report(
    id: &str,
    name: &str,
    report_type: ReportType,
    site: &str,
    period: &str,
    generated_date: NaiveDate,
    status: ReportStatus,
    size: &str,
) -> ReportEntry {
    ReportEntry {
        id: id.to_string(),
        name: name.to_string(),
        report_type,
        site: site.to_string(),
        period: period.to_string(),
        generated_date,
        status,
        size: size.to_string(),
    }
}

pub fn reports() -> Vec<ReportEntry> {
    vec![
        report(
            "1",
            "Monthly Performance Report - November 2024",
            ReportType::Monthly,
            "Suntech Industrial Park",
            "Nov 2024",
            date(2024, 12, 1),
            ReportStatus::Completed,
            "2.3 MB",
        ),
        report(
            "2",
            "Daily Generation Report - December 2024",
            ReportType::Daily,
            "Green Valley Mall",
            "Dec 1, 2024",
            date(2024, 12, 1),
            ReportStatus::Completed,
            "856 KB",
        ),
        report(
            "3",
            "Annual Summary Report - 2024",
            ReportType::Annual,
            "All Sites",
            "2024",
            date(2024, 11, 30),
            ReportStatus::Generating,
            "-",
        ),
        report(
            "4",
            "Weekly Performance Analysis",
            ReportType::Weekly,
            "Airport Terminal Solar",
            "Nov 25-Dec 1, 2024",
            date(2024, 12, 1),
            ReportStatus::Sent,
            "1.8 MB",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn alert(
    id: &str,
    alert_type: &str,
    severity: AlertSeverity,
    device: &str,
    site: &str,
    description: &str,
    triggered_at: DateTime<Utc>,
    status: AlertStatus,
    acknowledged_by: Option<&str>,
) -> Alert {
    Alert {
        id: id.to_string(),
        alert_type: alert_type.to_string(),
        severity,
        device: device.to_string(),
        site: site.to_string(),
        description: description.to_string(),
        triggered_at,
        status,
        acknowledged_by: acknowledged_by.map(String::from),
    }
}

pub fn alerts() -> Vec<Alert> {
    vec![
        alert(
            "1",
            "Device Offline",
            AlertSeverity::Critical,
            "Inverter 4",
            "Suntech Industrial Park",
            "Inverter has been offline for over 2 hours during daylight",
            ts(2024, 12, 1, 14, 30),
            AlertStatus::Open,
            None,
        ),
        alert(
            "2",
            "Low Performance",
            AlertSeverity::Warning,
            "Inverter 3",
            "Green Valley Mall",
            "Power output 25% below expected for current conditions",
            ts(2024, 12, 1, 12, 15),
            AlertStatus::Acknowledged,
            Some("John Doe"),
        ),
        alert(
            "3",
            "Temperature High",
            AlertSeverity::Warning,
            "Inverter 2",
            "Airport Terminal Solar",
            "Inverter temperature exceeded 75°C threshold",
            ts(2024, 12, 1, 11, 20),
            AlertStatus::Resolved,
            Some("Jane Smith"),
        ),
        alert(
            "4",
            "Communication Error",
            AlertSeverity::Medium,
            "Data Logger",
            "Textile Factory Rooftop",
            "Intermittent communication failures detected",
            ts(2024, 12, 1, 9, 45),
            AlertStatus::Open,
            None,
        ),
        alert(
            "5",
            "Voltage Anomaly",
            AlertSeverity::Critical,
            "Inverter 1",
            "Residential Complex A",
            "DC voltage reading outside normal range (850V detected)",
            ts(2024, 11, 30, 16, 30),
            AlertStatus::Acknowledged,
            Some("Mike Johnson"),
        ),
    ]
}
