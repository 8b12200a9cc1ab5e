//! Paginated table document layout.
//!
//! Layout is computed here and kept independent of the output format:
//! a [`TabularDocument`] holds the title block and the table rows already
//! split into pages, and a [`super::DocumentRenderer`] turns it into bytes.
//!
//! All measurements are PDF points (1/72 inch), measured from the top edge.
//! Text widths are estimated from an average Helvetica glyph width, and cell
//! text that does not fit its column is wrapped onto more lines.

use super::pdf::{DocumentRenderer, PdfRenderer};
use super::{Column, ExportError, Table};
use crate::models::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{debug, warn};

/// Average Helvetica glyph width as a fraction of the font size.
pub(crate) const AVG_GLYPH_WIDTH: f32 = 0.55;

/// Horizontal padding on each side of a table cell.
pub(crate) const CELL_PADDING: f32 = 2.0;

/// Format of the `Generated on` date when none is given.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// `(width, height)` in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Geometry and styling of a document page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentLayout {
    pub page_size: PageSize,
    /// Left and right page margin.
    pub margin_x: f32,
    /// Top margin of continuation pages.
    pub margin_top: f32,
    /// Space kept free at the bottom of every page (page number lives here).
    pub margin_bottom: f32,
    /// Baseline of the title on the first page.
    pub title_y: f32,
    pub title_font_size: f32,
    pub text_font_size: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    /// Distance between lines of the title block.
    pub line_spacing: f32,
    pub row_height: f32,
    /// RGB fill of the table header row.
    pub header_fill: [u8; 3],
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_x: 40.0,
            margin_top: 40.0,
            margin_bottom: 40.0,
            title_y: 57.0,
            title_font_size: 20.0,
            text_font_size: 10.0,
            heading_font_size: 14.0,
            body_font_size: 8.0,
            line_spacing: 20.0,
            row_height: 14.0,
            header_fill: [59, 130, 246],
        }
    }
}

impl DocumentLayout {
    /// Baseline of the `Generated on` line.
    pub fn generated_y(&self) -> f32 {
        self.title_y + 28.0
    }

    /// Top of the table on the first page, below the title block.
    pub fn first_table_top(&self, summary_lines: usize, kpi_lines: usize) -> f32 {
        let mut y = self.generated_y() + summary_lines as f32 * self.line_spacing;
        if kpi_lines > 0 {
            // heading plus its lines
            y += self.line_spacing + 2.0 + kpi_lines as f32 * self.line_spacing;
        }
        y + 22.0
    }

    /// Distance between wrapped lines inside a cell.
    pub fn cell_line_height(&self) -> f32 {
        self.body_font_size * 1.2
    }

    /// Height of a table row whose tallest cell has `lines` lines.
    pub fn row_height_for(&self, lines: usize) -> f32 {
        self.row_height + lines.saturating_sub(1) as f32 * self.cell_line_height()
    }

    /// Vertical space left for body rows under a header of `header_height`
    /// starting at `table_top`. Negative when the header itself does not fit.
    pub fn table_space(&self, table_top: f32, header_height: f32) -> f32 {
        let (_, height) = self.page_size.dimensions();
        height - self.margin_bottom - table_top - header_height
    }

    pub fn usable_width(&self) -> f32 {
        let (width, _) = self.page_size.dimensions();
        width - 2.0 * self.margin_x
    }
}

pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH
}

/// Break `text` into lines that fit in `width`.
///
/// Lines break at whitespace; a word wider than a whole line is split
/// between characters. Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, width: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((width / (font_size * AVG_GLYPH_WIDTH)).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(max_chars) {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }
            current = chunk.iter().collect();
            current_len = chunk.len();
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Column widths proportional to the longest cell of each column, filling `usable`.
pub fn column_widths(headers: &[String], rows: &[Vec<String>], usable: f32) -> Vec<f32> {
    if headers.is_empty() {
        return Vec::new();
    }

    let mut lengths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (length, cell) in lengths.iter_mut().zip(row) {
            *length = (*length).max(cell.chars().count());
        }
    }

    // Very long cells wrap rather than starving the other columns.
    let weights: Vec<f32> = lengths.iter().map(|&l| l.clamp(4, 40) as f32).collect();
    let total: f32 = weights.iter().sum();

    weights.iter().map(|w| usable * w / total).collect()
}

/// One page of table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub rows: Vec<Vec<String>>,
    /// Height of each row in `rows`.
    pub row_heights: Vec<f32>,
    /// False for a first page filled by the title block alone.
    pub has_table: bool,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            rows: Vec::new(),
            row_heights: Vec::new(),
            has_table: true,
        }
    }
}

/// Split rows into pages by height: `first` points of table space on page
/// one, `rest` on every page after.
///
/// Rows keep their order and each appears exactly once. A page always takes
/// at least one row, so a row taller than a page still gets placed. When the
/// first row does not fit on page one, the table starts on page two. At
/// least one page with a table is always produced, so an empty table still
/// renders its header.
pub fn paginate(rows: Vec<Vec<String>>, heights: Vec<f32>, first: f32, rest: f32) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page::new(1);
    let mut space = first;

    let first_fits = match heights.first() {
        Some(&height) => height <= first,
        None => first >= 0.0,
    };
    if !first_fits {
        current.has_table = false;
        pages.push(current);
        current = Page::new(2);
        space = rest;
    }

    let mut used = 0.0;
    for (row, height) in rows.into_iter().zip(heights) {
        if !current.rows.is_empty() && used + height > space {
            let next = Page::new(current.number + 1);
            pages.push(std::mem::replace(&mut current, next));
            space = rest;
            used = 0.0;
        }
        used += height;
        current.rows.push(row);
        current.row_heights.push(height);
    }

    pages.push(current);
    pages
}

/// A laid-out table document ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// Rendered `Generated on` line.
    pub generated_line: String,
    pub summary_lines: Vec<String>,
    pub kpi_heading: String,
    pub kpi_lines: Vec<String>,
    pub headers: Vec<String>,
    pub column_widths: Vec<f32>,
    pub header_height: f32,
    pub pages: Vec<Page>,
    pub layout: DocumentLayout,
}

impl TabularDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    /// All body rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.pages.iter().flat_map(|p| p.rows.iter())
    }

    /// A cell's text wrapped to the width of `column`.
    pub fn cell_lines(&self, column: usize, text: &str) -> Vec<String> {
        let width = self.column_widths.get(column).copied().unwrap_or(0.0);
        wrap_text(text, width - 2.0 * CELL_PADDING, self.layout.body_font_size)
    }

    /// Top of the table on the given page.
    pub fn table_top(&self, page_number: usize) -> f32 {
        if page_number <= 1 {
            self.layout
                .first_table_top(self.summary_lines.len(), self.kpi_lines.len())
        } else {
            self.layout.margin_top
        }
    }
}

/// Assembles the title block and lays out a table.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    title: String,
    generated_at: DateTime<Utc>,
    date_format: String,
    summary_lines: Vec<String>,
    kpi_lines: Vec<String>,
    layout: DocumentLayout,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            generated_at,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            summary_lines: Vec::new(),
            kpi_lines: Vec::new(),
            layout: DocumentLayout::default(),
        }
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn summary_line(mut self, line: impl Into<String>) -> Self {
        self.summary_lines.push(line.into());
        self
    }

    /// Add a "Key Performance Indicators" block under the summary lines.
    pub fn kpis(mut self, lines: Vec<String>) -> Self {
        self.kpi_lines = lines;
        self
    }

    pub fn layout(mut self, layout: DocumentLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self, table: Table) -> TabularDocument {
        let layout = self.layout;
        let widths = column_widths(&table.headers, &table.rows, layout.usable_width());
        let height_of = |cells: &[String]| {
            let lines = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    wrap_text(cell, width - 2.0 * CELL_PADDING, layout.body_font_size).len()
                })
                .max()
                .unwrap_or(1);
            layout.row_height_for(lines)
        };

        let header_height = height_of(table.headers.as_slice());
        let heights: Vec<f32> = table.rows.iter().map(|row| height_of(row.as_slice())).collect();

        let first_top = layout.first_table_top(self.summary_lines.len(), self.kpi_lines.len());
        let first = layout.table_space(first_top, header_height);
        let rest = layout.table_space(layout.margin_top, header_height);

        let row_count = table.rows.len();
        let pages = paginate(table.rows, heights, first, rest);
        debug!(
            "Laid out {} rows on {} pages ({:.0}pt on first, {:.0}pt per page after)",
            row_count,
            pages.len(),
            first,
            rest
        );

        TabularDocument {
            generated_line: generated_line(self.generated_at, &self.date_format),
            title: self.title,
            generated_at: self.generated_at,
            summary_lines: self.summary_lines,
            kpi_heading: "Key Performance Indicators".to_string(),
            kpi_lines: self.kpi_lines,
            headers: table.headers,
            column_widths: widths,
            header_height,
            pages,
            layout,
        }
    }
}

/// `Generated on: <date>`, falling back to the default format when `format`
/// has an invalid specifier.
fn generated_line(at: DateTime<Utc>, format: &str) -> String {
    let mut date = String::new();
    if write!(date, "{}", at.format(format)).is_err() {
        warn!(
            "Invalid date format '{}', using {}",
            format, DEFAULT_DATE_FORMAT
        );
        date = at.format(DEFAULT_DATE_FORMAT).to_string();
    }
    format!("Generated on: {}", date)
}

/// Render records as a paginated PDF with a title and generation line.
pub fn to_tabular_document<R: Record>(
    rows: &[R],
    columns: &[&str],
    title: &str,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ExportError> {
    let columns: Vec<Column<'_>> = columns.iter().copied().map(Column::bare).collect();
    let document = DocumentBuilder::new(title, generated_at).build(Table::from_records(rows, &columns));
    PdfRenderer::default().render(&document)
}
