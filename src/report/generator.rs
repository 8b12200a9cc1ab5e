//! Report output generation.
//!
//! Turns an assembled [`Report`] into delimited text, a laid-out document,
//! a JSON summary, or a terminal preview, and writes the result to disk.

use super::Report;
use crate::export::{
    export_file_name, DelimitedOptions, DocumentBuilder, DocumentLayout, ExportError,
    OutputFormat, TabularDocument,
};
use crate::models::{MetricSummary, ReadingCategory};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tabled::settings::Style;

/// Render the delimited-text export.
pub fn generate_csv_report(report: &Report, options: &DelimitedOptions) -> Result<String, ExportError> {
    options.render(&report.csv)
}

/// Lay out the PDF document: title, generation line, summary, KPIs, table.
pub fn build_document(report: &Report, layout: DocumentLayout, date_format: &str) -> TabularDocument {
    let mut builder = DocumentBuilder::new(&report.title, report.generated_at)
        .date_format(date_format)
        .layout(layout);

    for line in &report.summary_lines {
        builder = builder.summary_line(line);
    }
    if let Some(kpis) = &report.kpis {
        builder = builder.kpis(kpis.lines());
    }

    builder.build(report.document.clone())
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    kind: &'a str,
    title: &'a str,
    generated_at: DateTime<Utc>,
    summary: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    kpis: Option<&'a crate::analysis::AnalyticsKpis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<&'a MetricSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics_unit: Option<&'static str>,
    columns: &'a [String],
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Generate the JSON summary: metadata, summary lines, metrics and rows keyed by column label.
pub fn generate_json_report(report: &Report) -> Result<String> {
    let rows = report
        .csv
        .rows
        .iter()
        .map(|row| {
            report
                .csv
                .headers
                .iter()
                .cloned()
                .zip(row.iter().cloned().map(serde_json::Value::String))
                .collect()
        })
        .collect();

    let json = JsonReport {
        kind: report.kind.slug(),
        title: &report.title,
        generated_at: report.generated_at,
        summary: &report.summary_lines,
        kpis: report.kpis.as_ref(),
        metrics: report.kpis.as_ref().map(|k| &k.generation),
        metrics_unit: report
            .kpis
            .as_ref()
            .map(|_| ReadingCategory::Generation.unit()),
        columns: &report.csv.headers,
        rows,
    };

    serde_json::to_string_pretty(&json).map_err(Into::into)
}

/// Terminal preview of the first `limit` rows.
pub fn preview_table(report: &Report, limit: usize) -> String {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(report.document.headers.iter().map(String::as_str));
    for row in report.document.rows.iter().take(limit) {
        builder.push_record(row.iter().map(String::as_str));
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    let mut output = table.to_string();
    if report.document.rows.len() > limit {
        output.push_str(&format!(
            "\n... and {} more rows",
            report.document.rows.len() - limit
        ));
    }
    output
}

/// Where the export lands: an explicit output path, or the default file name in `dir`.
pub fn output_path(
    report: &Report,
    format: OutputFormat,
    explicit: Option<&Path>,
    dir: &Path,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dir.join(export_file_name(
            report.kind.slug(),
            format,
            report.generated_at.date_naive(),
        )),
    }
}

/// Write the export to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
