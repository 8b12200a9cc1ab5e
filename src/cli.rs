//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::export::OutputFormat;
use crate::mock::TimeRange;
use crate::report::ReportKind;
use clap::Parser;
use std::path::PathBuf;

/// SolarMon - solar fleet reporting
///
/// Export the analytics, users, devices, sites, reports and alerts tables
/// as CSV, paginated PDF or a JSON summary, with derived metrics.
///
/// Examples:
///   solarmon --kind analytics --range 90d --format pdf
///   solarmon --kind users --search solarflow
///   solarmon --kind reports --format csv --output reports.csv
///   solarmon --kind devices --dry-run
///   solarmon --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Which table to export
    #[arg(short, long, default_value = "analytics", value_name = "KIND")]
    pub kind: ReportKind,

    /// Output format (csv, pdf, json)
    #[arg(short, long, default_value = "csv", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Time range of the analytics series (7d, 30d, 90d)
    ///
    /// Defaults to the config file value, or 30d.
    #[arg(short, long, value_name = "RANGE")]
    pub range: Option<TimeRange>,

    /// Trend window in readings
    ///
    /// The trend compares the average of the last WINDOW readings with the
    /// WINDOW readings before them.
    #[arg(short, long, value_name = "N")]
    pub window: Option<usize>,

    /// RNG seed for reproducible analytics data
    #[arg(long, value_name = "SEED", env = "SOLARMON_SEED")]
    pub seed: Option<u64>,

    /// Only export rows matching this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Output file path
    ///
    /// If not specified, writes <kind>_export_<date>.csv,
    /// <kind>_report_<date>.pdf or <kind>_summary_<date>.json
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for default-named output files
    ///
    /// Ignored when --output is given.
    #[arg(long, value_name = "DIR", env = "SOLARMON_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// CSV field delimiter (single character)
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Write CSV fields verbatim, never quoted
    #[arg(long)]
    pub no_quote: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .solarmon.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: print the summary and a preview table without writing a file
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .solarmon.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.window == Some(0) {
            return Err("Trend window must be at least 1".to_string());
        }

        if let Some(ref delimiter) = self.delimiter {
            if delimiter.len() != 1 {
                return Err(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    delimiter
                ));
            }
        }

        if let Some(ref output) = self.output {
            if output.is_dir() {
                return Err(format!(
                    "Output path is a directory: {}",
                    output.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// The search query, if one with content was given.
    pub fn query(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            kind: ReportKind::Analytics,
            format: OutputFormat::Csv,
            range: None,
            window: None,
            seed: None,
            search: None,
            output: None,
            output_dir: None,
            delimiter: None,
            no_quote: false,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_window() {
        let mut args = make_args();
        args.window = Some(0);
        assert!(args.validate().is_err());

        args.window = Some(1);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_delimiter() {
        let mut args = make_args();
        args.delimiter = Some(";;".to_string());
        assert!(args.validate().is_err());

        args.delimiter = Some("\t".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_output_with_output_dir_from_environment() {
        let mut args = make_args();
        args.output = Some(PathBuf::from("out.csv"));
        args.output_dir = Some(PathBuf::from("exports"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_query_ignores_blank_search() {
        let mut args = make_args();
        assert_eq!(args.query(), None);

        args.search = Some("   ".to_string());
        assert_eq!(args.query(), None);

        args.search = Some(" solar ".to_string());
        assert_eq!(args.query(), Some("solar"));
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "solarmon", "--kind", "users", "--format", "pdf", "--range", "7d", "--window", "3",
        ])
        .unwrap();

        assert_eq!(args.kind, ReportKind::Users);
        assert_eq!(args.format, OutputFormat::Pdf);
        assert_eq!(args.range, Some(TimeRange::Week));
        assert_eq!(args.window, Some(3));
    }
}
