//! PDF rendering of tabular documents.
//!
//! Writes a single-file PDF 1.4 using the standard Helvetica fonts, so no
//! font data has to be embedded. Text is encoded as WinAnsi.

use super::document::{text_width, Page, TabularDocument, CELL_PADDING};
use super::ExportError;
use std::io::Write;
use tracing::debug;

/// Turns a laid-out document into file bytes.
pub trait DocumentRenderer {
    fn render(&self, document: &TabularDocument) -> Result<Vec<u8>, ExportError>;
}

/// Gray level of striped table rows.
const STRIPE_GRAY: f32 = 0.96;

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer {
    /// Disable alternating row shading.
    pub plain_rows: bool,
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &TabularDocument) -> Result<Vec<u8>, ExportError> {
        let page_count = document.page_count();

        let mut pdf = PdfWriter::new()?;

        // Fixed objects: 1 catalog, 2 page tree, 3-4 fonts, 5 info.
        // Page k (0-based) uses objects 6 + 2k and its content stream 7 + 2k.
        let kids: Vec<String> = (0..page_count)
            .map(|k| format!("{} 0 R", 6 + 2 * k))
            .collect();
        let (width, height) = document.layout.page_size.dimensions();

        pdf.object(1, b"<< /Type /Catalog /Pages 2 0 R >>")?;
        pdf.object(
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            )
            .as_bytes(),
        )?;
        pdf.object(3, font_dict("Helvetica").as_bytes())?;
        pdf.object(4, font_dict("Helvetica-Bold").as_bytes())?;
        pdf.object(5, &info_dict(document))?;

        for (k, page) in document.pages.iter().enumerate() {
            let page_id = 6 + 2 * k;
            let content_id = page_id + 1;

            pdf.object(
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Resources << /Font << /{} 3 0 R /{} 4 0 R >> >> /Contents {} 0 R >>",
                    width, height, FONT_REGULAR, FONT_BOLD, content_id
                )
                .as_bytes(),
            )?;

            let content = self.page_content(document, page)?;
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend_from_slice(&content);
            stream.extend_from_slice(b"\nendstream");
            pdf.object(content_id, &stream)?;
        }

        let bytes = pdf.finish(5 + 2 * page_count)?;
        debug!(
            "Rendered PDF '{}': {} pages, {} bytes",
            document.title,
            page_count,
            bytes.len()
        );
        Ok(bytes)
    }
}

impl PdfRenderer {
    fn page_content(&self, document: &TabularDocument, page: &Page) -> Result<Vec<u8>, ExportError> {
        let layout = &document.layout;
        let (_, height) = layout.page_size.dimensions();
        let x = layout.margin_x;
        let table_width = layout.usable_width();
        let mut canvas = Canvas::new(height);

        if page.number == 1 {
            canvas.text(x, layout.title_y, FONT_BOLD, layout.title_font_size, &document.title)?;
            let mut y = layout.generated_y();
            canvas.text(x, y, FONT_REGULAR, layout.text_font_size, &document.generated_line)?;

            for line in &document.summary_lines {
                y += layout.line_spacing;
                canvas.text(x, y, FONT_REGULAR, layout.text_font_size, line)?;
            }

            if !document.kpi_lines.is_empty() {
                y += layout.line_spacing + 2.0;
                canvas.text(x, y, FONT_BOLD, layout.heading_font_size, &document.kpi_heading)?;
                for line in &document.kpi_lines {
                    y += layout.line_spacing;
                    canvas.text(x, y, FONT_REGULAR, layout.text_font_size, line)?;
                }
            }
        }

        if page.has_table {
            let top = document.table_top(page.number);

            let [r, g, b] = layout.header_fill;
            canvas.fill_rect(x, top, table_width, document.header_height, rgb(r, g, b))?;
            canvas.fill_color((1.0, 1.0, 1.0))?;
            draw_row(&mut canvas, document, top, FONT_BOLD, &document.headers)?;

            let mut row_top = top + document.header_height;
            for (i, (row, &row_height)) in page.rows.iter().zip(&page.row_heights).enumerate() {
                if !self.plain_rows && i % 2 == 0 {
                    canvas.fill_rect(
                        x,
                        row_top,
                        table_width,
                        row_height,
                        (STRIPE_GRAY, STRIPE_GRAY, STRIPE_GRAY),
                    )?;
                }
                canvas.fill_color((0.0, 0.0, 0.0))?;
                draw_row(&mut canvas, document, row_top, FONT_REGULAR, row)?;
                row_top += row_height;
            }
        }

        canvas.fill_color((0.4, 0.4, 0.4))?;
        let footer = format!("Page {} of {}", page.number, document.page_count());
        let footer_x = x + table_width / 2.0 - text_width(&footer, layout.body_font_size) / 2.0;
        canvas.text(
            footer_x,
            height - layout.margin_bottom / 2.0,
            FONT_REGULAR,
            layout.body_font_size,
            &footer,
        )?;

        Ok(canvas.into_bytes())
    }
}

/// Draw one table row starting at `top`, each cell wrapped to its column.
fn draw_row(
    canvas: &mut Canvas,
    document: &TabularDocument,
    top: f32,
    font: &str,
    cells: &[String],
) -> std::io::Result<()> {
    let layout = &document.layout;
    let mut cell_x = layout.margin_x;

    for (column, (cell, &width)) in cells.iter().zip(&document.column_widths).enumerate() {
        let mut baseline = top + layout.row_height - 4.0;
        for line in document.cell_lines(column, cell) {
            canvas.text(cell_x + CELL_PADDING, baseline, font, layout.body_font_size, &line)?;
            baseline += layout.cell_line_height();
        }
        cell_x += width;
    }
    Ok(())
}

fn rgb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

fn font_dict(base_font: &str) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base_font
    )
}

fn info_dict(document: &TabularDocument) -> Vec<u8> {
    let mut dict = b"<< /Title (".to_vec();
    dict.extend_from_slice(&encode_text(&document.title));
    dict.extend_from_slice(b") /Producer (SolarMon) /CreationDate (");
    dict.extend_from_slice(
        document
            .generated_at
            .format("D:%Y%m%d%H%M%SZ")
            .to_string()
            .as_bytes(),
    );
    dict.extend_from_slice(b") >>");
    dict
}

/// Encode text for a PDF string literal: WinAnsi bytes, with delimiters
/// escaped and non-ASCII bytes written as octal escapes.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            ' '..='~' => out.push(ch as u8),
            _ => {
                let byte = win_ansi_byte(ch);
                out.extend_from_slice(format!("\\{:03o}", byte).as_bytes());
            }
        }
    }
    out
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

/// Content stream builder with a top-left origin.
struct Canvas {
    height: f32,
    ops: Vec<u8>,
}

impl Canvas {
    fn new(height: f32) -> Self {
        Self {
            height,
            ops: Vec::new(),
        }
    }

    fn fill_color(&mut self, (r, g, b): (f32, f32, f32)) -> std::io::Result<()> {
        writeln!(self.ops, "{:.3} {:.3} {:.3} rg", r, g, b)
    }

    fn fill_rect(
        &mut self,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        color: (f32, f32, f32),
    ) -> std::io::Result<()> {
        self.fill_color(color)?;
        writeln!(
            self.ops,
            "{:.2} {:.2} {:.2} {:.2} re f",
            x,
            self.height - top - height,
            width,
            height
        )
    }

    fn text(&mut self, x: f32, y: f32, font: &str, size: f32, text: &str) -> std::io::Result<()> {
        write!(
            self.ops,
            "BT /{} {:.1} Tf {:.2} {:.2} Td (",
            font,
            size,
            x,
            self.height - y
        )?;
        self.ops.extend_from_slice(&encode_text(text));
        self.ops.extend_from_slice(b") Tj ET\n");
        Ok(())
    }

    fn into_bytes(self) -> Vec<u8> {
        self.ops
    }
}

/// Serializes numbered objects and the cross-reference table.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> std::io::Result<Self> {
        let mut buf = Vec::new();
        buf.write_all(b"%PDF-1.4\n")?;
        Ok(Self {
            buf,
            offsets: Vec::new(),
        })
    }

    /// Objects must be added in id order starting at 1.
    fn object(&mut self, id: usize, body: &[u8]) -> Result<(), ExportError> {
        if id != self.offsets.len() + 1 {
            return Err(ExportError::Render(format!(
                "object {} written out of order",
                id
            )));
        }
        self.offsets.push(self.buf.len());
        writeln!(self.buf, "{} 0 obj", id)?;
        self.buf.write_all(body)?;
        self.buf.write_all(b"\nendobj\n")?;
        Ok(())
    }

    fn finish(mut self, expected_objects: usize) -> Result<Vec<u8>, ExportError> {
        if self.offsets.len() != expected_objects {
            return Err(ExportError::Render(format!(
                "expected {} objects, wrote {}",
                expected_objects,
                self.offsets.len()
            )));
        }

        let xref_offset = self.buf.len();
        write!(self.buf, "xref\n0 {}\n", self.offsets.len() + 1)?;
        self.buf.write_all(b"0000000000 65535 f \n")?;
        for offset in &self.offsets {
            write!(self.buf, "{:010} 00000 n \n", offset)?;
        }
        write!(
            self.buf,
            "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            xref_offset
        )?;

        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{DocumentBuilder, Table};
    use chrono::{TimeZone, Utc};

    fn document(rows: usize) -> TabularDocument {
        let generated_at = Utc.with_ymd_and_hms(2024, 12, 1, 8, 30, 0).unwrap();
        let table = Table {
            headers: vec!["Name".to_string(), "Value".to_string()],
            rows: (0..rows)
                .map(|i| vec![format!("item {}", i), i.to_string()])
                .collect(),
        };
        DocumentBuilder::new("Test Report", generated_at)
            .summary_line("Total Items: 3")
            .build(table)
    }

    fn render(document: &TabularDocument) -> String {
        let bytes = PdfRenderer::default().render(document).unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_pdf_structure() {
        let text = render(&document(3));

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("(Test Report) Tj"));
        assert!(text.contains("(Total Items: 3) Tj"));
        assert!(text.contains("(item 2) Tj"));
        assert!(text.contains("(Page 1 of 1) Tj"));
        assert!(text.contains("/CreationDate (D:20241201083000Z)"));
    }

    #[test]
    fn test_multi_page_count() {
        let doc = document(300);
        assert!(doc.page_count() > 1);

        let text = render(&doc);
        assert!(text.contains(&format!("/Count {}", doc.page_count())));
        assert!(text.contains(&format!(
            "(Page {} of {}) Tj",
            doc.page_count(),
            doc.page_count()
        )));
        assert!(text.contains("(item 299) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = PdfRenderer::default().render(&document(2)).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        let start = text.rfind("startxref\n").unwrap() + "startxref\n".len();
        let xref_offset: usize = text[start..].lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_offset..].starts_with(b"xref"));

        let entries: Vec<&str> = text[xref_offset..].lines().skip(3).take(7).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_encode_text_escapes_delimiters() {
        assert_eq!(encode_text("a (b) c\\d"), b"a \\(b\\) c\\\\d".to_vec());
    }

    #[test]
    fn test_encode_text_uses_win_ansi_octal() {
        assert_eq!(encode_text("W/m²"), b"W/m\\262".to_vec());
        assert_eq!(encode_text("25°C"), b"25\\260C".to_vec());
        assert_eq!(encode_text("€"), b"\\200".to_vec());
        assert_eq!(encode_text("日"), b"\\077".to_vec());
    }

    #[test]
    fn test_long_cells_wrap_instead_of_truncating() {
        let generated_at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let table = Table {
            headers: vec!["Id".to_string(), "Description".to_string()],
            rows: vec![vec![
                "A-1".to_string(),
                "insulation resistance below the configured limit ".repeat(5),
            ]],
        };
        let doc = DocumentBuilder::new("Alerts", generated_at).build(table);
        let text = render(&doc);

        let lines = doc.cell_lines(1, &doc.pages[0].rows[0][1]);
        assert!(lines.len() > 1);
        assert!(!text.contains("...) Tj"));
        for line in lines {
            assert!(text.contains(&format!("({}) Tj", line)));
        }
    }

    #[test]
    fn test_title_only_first_page_has_no_table() {
        let generated_at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let mut builder = DocumentBuilder::new("Crowded", generated_at);
        for i in 0..40 {
            builder = builder.summary_line(format!("Note {}", i));
        }
        let doc = builder.build(Table {
            headers: vec!["Column".to_string()],
            rows: vec![vec!["cell".to_string()]],
        });
        let text = render(&doc);

        assert_eq!(doc.page_count(), 2);
        assert!(text.contains("/Count 2"));
        assert_eq!(text.matches("(Column) Tj").count(), 1);
        assert!(text.contains("(cell) Tj"));
    }

    #[test]
    fn test_column_widths_fill_usable_width() {
        let doc = document(5);

        assert_eq!(doc.column_widths.len(), 2);
        let total: f32 = doc.column_widths.iter().sum();
        assert!((total - doc.layout.usable_width()).abs() < 0.01);
    }

    #[test]
    fn test_no_columns_still_renders() {
        let generated_at = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let doc = DocumentBuilder::new("Nothing", generated_at).build(Table::default());
        let text = render(&doc);

        assert!(text.contains("/Count 1"));
    }
}
