//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.solarmon.toml` files.

use crate::export::{DocumentLayout, PageSize, QuoteStyle, DEFAULT_DATE_FORMAT};
use crate::mock::TimeRange;
use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".solarmon.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Analytics data settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Delimited-text export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// PDF document settings.
    #[serde(default)]
    pub document: DocumentConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Directory exports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Analytics series settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Time range of the daily series.
    #[serde(default)]
    pub range: TimeRange,

    /// Trend window in readings.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// RNG seed for reproducible series. Unset draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            range: TimeRange::default(),
            trend_window: default_trend_window(),
            seed: None,
        }
    }
}

fn default_trend_window() -> usize {
    7
}

/// Delimited-text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Single-byte field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Quote fields containing the delimiter, quotes or line breaks.
    #[serde(default = "default_true")]
    pub quote_fields: bool,

    /// strftime format of the `Generated on` line.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            quote_fields: true,
            date_format: default_date_format(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// PDF document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// `a4` or `letter`.
    #[serde(default)]
    pub page_size: PageSize,

    /// Table body font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// RGB fill of the table header row.
    #[serde(default = "default_header_fill")]
    pub header_fill: [u8; 3],

    /// Shade every other table row.
    #[serde(default = "default_true")]
    pub striped_rows: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            font_size: default_font_size(),
            header_fill: default_header_fill(),
            striped_rows: true,
        }
    }
}

fn default_font_size() -> f32 {
    8.0
}

fn default_header_fill() -> [u8; 3] {
    [59, 130, 246]
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only flags the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.verbose {
            self.general.verbose = true;
        }
        if let Some(ref dir) = args.output_dir {
            self.general.output_dir = dir.clone();
        }

        if let Some(range) = args.range {
            self.analytics.range = range;
        }
        if let Some(window) = args.window {
            self.analytics.trend_window = window;
        }
        if let Some(seed) = args.seed {
            self.analytics.seed = Some(seed);
        }

        if let Some(ref delimiter) = args.delimiter {
            self.export.delimiter = delimiter.clone();
        }
        if args.no_quote {
            self.export.quote_fields = false;
        }
    }

    /// The trend window, rejecting zero.
    pub fn trend_window(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.analytics.trend_window)
            .context("Trend window must be at least 1 reading")
    }

    /// The delimiter as a single byte.
    pub fn delimiter(&self) -> Result<u8> {
        match self.export.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => bail!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.export.delimiter
            ),
        }
    }

    /// The `Generated on` date format, rejecting unknown strftime specifiers.
    pub fn date_format(&self) -> Result<&str> {
        let format = self.export.date_format.as_str();
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid date format '{}' in [export] date_format", format);
        }
        Ok(format)
    }

    pub fn quote_style(&self) -> QuoteStyle {
        if self.export.quote_fields {
            QuoteStyle::Necessary
        } else {
            QuoteStyle::Never
        }
    }

    /// Document layout with the configured page size, font and colours.
    pub fn layout(&self) -> DocumentLayout {
        DocumentLayout {
            page_size: self.document.page_size,
            body_font_size: self.document.font_size,
            row_height: (self.document.font_size * 1.75).max(10.0),
            header_fill: self.document.header_fill,
            ..DocumentLayout::default()
        }
    }

    /// Generate a default config file as a TOML string.
    pub fn default_toml() -> String {
        r#"# SolarMon Configuration
# Place this file in your working directory as .solarmon.toml

[general]
# Enable verbose logging
verbose = false
# Directory exports are written to
output_dir = "."

[analytics]
# Time range of the daily series: "7d", "30d" or "90d"
range = "30d"
# Trend window in readings (recent window vs the one before it)
trend_window = 7
# Fixed RNG seed for reproducible exports (omit for random data)
# seed = 42

[export]
# Field delimiter for CSV output (single character)
delimiter = ","
# Quote fields that contain the delimiter, quotes or line breaks
quote_fields = true
# Date format of the "Generated on" line
date_format = "%Y-%m-%d"

[document]
# Page size: "a4" or "letter"
page_size = "a4"
# Table body font size in points
font_size = 8.0
# RGB colour of the table header row
header_fill = [59, 130, 246]
# Shade every other table row
striped_rows = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.range, TimeRange::Month);
        assert_eq!(config.analytics.trend_window, 7);
        assert_eq!(config.export.delimiter, ",");
        assert!(config.export.quote_fields);
        assert_eq!(config.document.page_size, PageSize::A4);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[general]
verbose = true
output_dir = "exports"

[analytics]
range = "90d"
trend_window = 14
seed = 42

[export]
delimiter = ";"
quote_fields = false

[document]
page_size = "letter"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.general.output_dir, PathBuf::from("exports"));
        assert_eq!(config.analytics.range, TimeRange::Quarter);
        assert_eq!(config.analytics.trend_window, 14);
        assert_eq!(config.analytics.seed, Some(42));
        assert_eq!(config.delimiter().unwrap(), b';');
        assert_eq!(config.quote_style(), QuoteStyle::Never);
        assert_eq!(config.layout().page_size, PageSize::Letter);
        assert_eq!(config.document.header_fill, [59, 130, 246]);
    }

    #[test]
    fn test_default_toml_round_trips() {
        let config: Config = toml::from_str(&Config::default_toml()).unwrap();
        assert_eq!(config.analytics.trend_window, 7);
        assert_eq!(config.analytics.seed, None);
        assert_eq!(config.export.date_format, "%Y-%m-%d");
        assert!(config.document.striped_rows);
    }

    #[test]
    fn test_invalid_delimiter() {
        let mut config = Config::default();
        config.export.delimiter = "::".to_string();
        assert!(config.delimiter().is_err());

        config.export.delimiter = String::new();
        assert!(config.delimiter().is_err());
    }

    #[test]
    fn test_date_format_validation() {
        let mut config = Config::default();
        assert_eq!(config.date_format().unwrap(), "%Y-%m-%d");

        config.export.date_format = "%d %B %Y".to_string();
        assert_eq!(config.date_format().unwrap(), "%d %B %Y");

        config.export.date_format = "%Q".to_string();
        assert!(config.date_format().is_err());

        config.export.date_format = "%Y-%".to_string();
        assert!(config.date_format().is_err());
    }

    #[test]
    fn test_zero_trend_window_rejected() {
        let mut config = Config::default();
        config.analytics.trend_window = 0;
        assert!(config.trend_window().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[analytics]\nrange = \"7d\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.analytics.range, TimeRange::Week);
        assert_eq!(config.analytics.trend_window, 7);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[analytics\nrange = ").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
