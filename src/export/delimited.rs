//! Delimited-text (CSV) export.

use super::{Column, ExportError, Table};
use crate::models::Record;
use serde::{Deserialize, Serialize};

/// Field quoting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Fields are written verbatim, even if they contain the delimiter.
    #[default]
    Never,
    /// Fields containing the delimiter, a quote or a line break are quoted.
    Necessary,
}

impl From<QuoteStyle> for csv::QuoteStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Never => csv::QuoteStyle::Never,
            QuoteStyle::Necessary => csv::QuoteStyle::Necessary,
        }
    }
}

/// Writer settings for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub delimiter: u8,
    pub quote: QuoteStyle,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: QuoteStyle::Never,
        }
    }
}

impl DelimitedOptions {
    pub fn new(delimiter: u8, quote: QuoteStyle) -> Self {
        Self { delimiter, quote }
    }

    /// Render a header line and one line per row, joined by `\n` with no trailing newline.
    pub fn render(&self, table: &Table) -> Result<String, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(self.quote.into())
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        // The csv writer marks an empty record with `""` even when quoting is off.
        let mut blank_offsets = Vec::new();
        for record in std::iter::once(&table.headers).chain(&table.rows) {
            if self.quote == QuoteStyle::Never && is_blank(record) {
                writer.flush()?;
                blank_offsets.push(writer.get_ref().len());
            }
            writer.write_record(record)?;
        }

        let mut bytes = writer.into_inner().map_err(|e| e.into_error())?;
        for &offset in blank_offsets.iter().rev() {
            if bytes[offset..].starts_with(b"\"\"") {
                bytes.drain(offset..offset + 2);
            }
        }
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }

        Ok(String::from_utf8(bytes)?)
    }

    /// Project records onto `columns` and render them.
    pub fn render_records<R: Record>(
        &self,
        rows: &[R],
        columns: &[Column<'_>],
    ) -> Result<String, ExportError> {
        self.render(&Table::from_records(rows, columns))
    }
}

/// A record with no fields, or with a single empty one.
fn is_blank(record: &[String]) -> bool {
    record.len() <= 1 && record.iter().all(String::is_empty)
}

/// Comma-joined header of `columns` followed by one comma-joined line per row.
///
/// Fields are not quoted or escaped.
pub fn to_delimited_text<R: Record>(rows: &[R], columns: &[&str]) -> Result<String, ExportError> {
    let columns: Vec<Column<'_>> = columns.iter().copied().map(Column::bare).collect();
    DelimitedOptions::default().render_records(rows, &columns)
}
