//! Export formats.
//!
//! Records are first projected onto a [`Table`] of display strings, which
//! the delimited-text writer and the paginated document layout both consume.

pub mod delimited;
pub mod document;
pub mod pdf;

pub use delimited::{to_delimited_text, DelimitedOptions, QuoteStyle};
pub use document::{
    paginate, to_tabular_document, wrap_text, DocumentBuilder, DocumentLayout, Page, PageSize,
    TabularDocument, DEFAULT_DATE_FORMAT,
};
pub use pdf::{DocumentRenderer, PdfRenderer};

use crate::models::Record;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while producing an export payload.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("delimited output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document rendering failed: {0}")]
    Render(String),

    #[error("document rendering task failed: {0}")]
    RenderTask(#[from] tokio::task::JoinError),
}

/// A column selected for export: the record field key and its header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    pub key: &'a str,
    pub label: &'a str,
}

impl<'a> Column<'a> {
    pub const fn new(key: &'a str, label: &'a str) -> Self {
        Self { key, label }
    }

    /// A column whose header is its key.
    pub const fn bare(key: &'a str) -> Self {
        Self { key, label: key }
    }
}

/// Rows of display strings under a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Project records onto the given columns. Fields a record lacks become empty cells.
    pub fn from_records<R: Record>(records: &[R], columns: &[Column<'_>]) -> Self {
        let headers = columns.iter().map(|c| c.label.to_string()).collect();
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        record.field(column.key).unwrap_or_else(|| {
                            debug!("Record has no field '{}'", column.key);
                            String::new()
                        })
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Delimited text (default)
    #[default]
    Csv,
    /// Paginated PDF document
    Pdf,
    /// JSON summary with rows
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Json => "application/json",
        }
    }

    /// File name infix: `export` for data dumps, `report` for documents.
    fn infix(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "export",
            OutputFormat::Pdf => "report",
            OutputFormat::Json => "summary",
        }
    }
}

/// `<kind>_export_<date>.csv`, `<kind>_report_<date>.pdf` or `<kind>_summary_<date>.json`.
pub fn export_file_name(kind: &str, format: OutputFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.{}",
        kind,
        format.infix(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render a document on the blocking pool.
pub async fn render_document(
    renderer: Arc<dyn DocumentRenderer + Send + Sync>,
    document: TabularDocument,
) -> Result<Vec<u8>, ExportError> {
    tokio::task::spawn_blocking(move || renderer.render(&document)).await?
}
