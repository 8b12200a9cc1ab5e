//! SolarMon - solar fleet reporting
//!
//! A CLI tool that builds the dashboard tables (analytics, users, devices,
//! sites, reports, alerts), computes their summary metrics, and exports
//! them as CSV, paginated PDF or a JSON summary.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (invalid arguments, config, rendering, I/O)

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use solarmon::cli::Args;
use solarmon::config::{Config, CONFIG_FILE};
use solarmon::export::{self, DelimitedOptions, OutputFormat, PdfRenderer};
use solarmon::mock;
use solarmon::report::{self, AssembleOptions, Dataset, Report};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Rows shown by `--dry-run`.
const PREVIEW_ROWS: usize = 10;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // The config can turn on verbose logging, so it is read before the subscriber exists.
    let (config, source) = load_config(&args);
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config)?;

    info!("SolarMon v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    if let Err(e) = run(args, config).await {
        error!("Export failed: {:#}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .solarmon.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the time range, trend window, delimiter and page size.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) -> Result<()> {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Run one export. Any error maps to exit code 1.
async fn run(args: Args, mut config: Config) -> Result<()> {
    let start_time = Instant::now();
    config.merge_with_args(&args);

    let window = config.trend_window()?;
    let date_format = config.date_format()?.to_string();
    let now = Utc::now();

    // Step 1: Build the dataset
    let mut rng = mock::rng_from_seed(config.analytics.seed);
    let data = Dataset::generate(config.analytics.range, now.date_naive(), &mut rng);

    // Step 2: Assemble the report
    let report = report::assemble(
        args.kind,
        &data,
        &AssembleOptions {
            window,
            query: args.query(),
            now,
        },
    );
    info!("Assembled {} report with {} rows", report.kind, report.row_count());

    if !args.quiet {
        println!("📊 {}", report.title);
        for line in &report.summary_lines {
            println!("   {}", line);
        }
        if let Some(ref kpis) = report.kpis {
            for line in kpis.lines() {
                println!("   {}", line);
            }
        }
    }

    // Handle --dry-run: preview and exit
    if args.dry_run {
        return handle_dry_run(&report);
    }

    // Step 3: Render
    let path = report::output_path(
        &report,
        args.format,
        args.output.as_deref(),
        &config.general.output_dir,
    );

    let bytes = match args.format {
        OutputFormat::Csv => {
            let options = DelimitedOptions::new(config.delimiter()?, config.quote_style());
            report::generate_csv_report(&report, &options)
                .context("Failed to generate CSV export")?
                .into_bytes()
        }
        OutputFormat::Json => report::generate_json_report(&report)
            .context("Failed to generate JSON summary")?
            .into_bytes(),
        OutputFormat::Pdf => render_pdf(&report, &config, &date_format, args.quiet).await?,
    };

    // Step 4: Save
    report::write_output(&path, &bytes)?;
    debug!(
        "Wrote {} bytes of {} to {}",
        bytes.len(),
        args.format.mime_type(),
        path.display()
    );

    if !args.quiet {
        println!("   Rows: {}", report.row_count());
        println!("   Duration: {:.2}s", start_time.elapsed().as_secs_f64());
        println!("\n✅ Export complete! Saved to: {}", path.display());
    }

    Ok(())
}

/// Lay out and render the PDF on the blocking pool, with a spinner.
async fn render_pdf(
    report: &Report,
    config: &Config,
    date_format: &str,
    quiet: bool,
) -> Result<Vec<u8>> {
    let document = report::build_document(report, config.layout(), date_format);
    debug!(
        "Document '{}' laid out on {} pages",
        document.title,
        document.page_count()
    );

    let renderer = Arc::new(PdfRenderer {
        plain_rows: !config.document.striped_rows,
    });

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Generating PDF report...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let result = export::render_document(renderer, document).await;
    spinner.finish_and_clear();

    result.map_err(|e| {
        error!("PDF generation failed: {}", e);
        anyhow!("Error generating PDF report. Please try again.")
    })
}

/// Handle --dry-run: print a preview table, write nothing.
fn handle_dry_run(report: &Report) -> Result<()> {
    println!("\n🔍 Dry run: previewing {} rows (nothing written)...\n", report.row_count());

    if report.document.is_empty() {
        println!("   No rows match.");
    } else {
        println!("{}", report::preview_table(report, PREVIEW_ROWS));
    }

    println!("\n✅ Dry run complete. No files were written.");
    Ok(())
}

/// Where the configuration came from, logged once the subscriber is up.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Defaults,
    Fallback(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Fallback(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` path must load; a broken default file falls back to defaults.
fn load_config(args: &Args) -> (Result<Config>, ConfigSource) {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return (
            Config::load(config_path),
            ConfigSource::Explicit(config_path.clone()),
        );
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => (Ok(config), ConfigSource::DefaultFile),
        Ok(None) => (Ok(Config::default()), ConfigSource::Defaults),
        Err(e) => (Ok(Config::default()), ConfigSource::Fallback(e)),
    }
}
