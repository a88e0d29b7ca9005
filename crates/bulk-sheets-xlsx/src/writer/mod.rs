//! Streaming XLSX writer
//!
//! [`XlsxSink`] receives rows one block at a time from
//! [`bulk_sheets_core::stream_workbook`] and serializes them straight into
//! the worksheet part being deflated. Text cells go through a disk-backed
//! [`StringInterner`], whose `sharedStrings.xml` part is written after the
//! last sheet together with the package parts.

mod package;
mod sheet;

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use bulk_sheets_core::{
    stream_workbook, CellRefBuffer, CellValue, Row, RowBlock, SheetSink, StreamStats, Workbook,
    Worksheet,
};
use bulk_sheets_sst::xml::{escape_text, needs_preserve};
use bulk_sheets_sst::{InternerOptions, InternerStats, StringInterner, INLINE};
use log::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{CellFormat, STYLES_XML};
use package::{content_types, workbook_rels, workbook_xml, SheetPart, ROOT_RELS};

/// Options for a single XLSX write
#[derive(Debug, Clone, Default)]
pub struct XlsxWriteOptions {
    /// Shared string table tuning
    pub interner: InternerOptions,
    /// Use ZIP64 entries (parts above 4 GiB)
    pub large_file: bool,
    /// Deflate level, `None` for the library default
    pub compression_level: Option<i64>,
}

/// Outcome of a workbook write
#[derive(Debug, Clone)]
pub struct XlsxReport {
    /// Sheet and row totals
    pub stats: StreamStats,
    /// Shared string table counters
    pub strings: InternerStats,
}

/// [`SheetSink`] that writes SpreadsheetML into a ZIP archive
pub struct XlsxSink<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    interner: StringInterner,
    refs: CellRefBuffer,
    buf: String,
    parts: Vec<SheetPart>,
    tab_selected: bool,
    binary_cells: u64,
}

impl<W: Write + Seek> XlsxSink<W> {
    /// Create a sink writing the archive into `writer`
    pub fn new(writer: W, options: &XlsxWriteOptions) -> XlsxResult<Self> {
        let interner = StringInterner::new(options.interner.clone())?;
        let file_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(options.compression_level)
            .large_file(options.large_file);

        Ok(Self {
            zip: ZipWriter::new(writer),
            options: file_options,
            interner,
            refs: CellRefBuffer::default(),
            buf: String::with_capacity(64 * 1024),
            parts: Vec::new(),
            tab_selected: false,
            binary_cells: 0,
        })
    }

    /// The shared string interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Physical sheets written so far
    pub fn sheet_count(&self) -> usize {
        self.parts.len()
    }

    /// Write the shared strings and package parts and close the archive
    pub fn finish(mut self) -> XlsxResult<(W, InternerStats)> {
        if self.parts.is_empty() {
            return Err(XlsxError::EmptyWorkbook);
        }

        self.zip
            .start_file("xl/sharedStrings.xml", self.options)?;
        self.interner.finalize_and_write(&mut self.zip)?;
        let strings = self.interner.stats();

        self.zip.start_file("xl/styles.xml", self.options)?;
        self.zip.write_all(STYLES_XML.as_bytes())?;

        self.zip.start_file("xl/workbook.xml", self.options)?;
        self.zip.write_all(workbook_xml(&self.parts).as_bytes())?;

        self.zip
            .start_file("xl/_rels/workbook.xml.rels", self.options)?;
        self.zip
            .write_all(workbook_rels(self.parts.len()).as_bytes())?;

        self.zip.start_file("_rels/.rels", self.options)?;
        self.zip.write_all(ROOT_RELS.as_bytes())?;

        self.zip.start_file("[Content_Types].xml", self.options)?;
        self.zip
            .write_all(content_types(self.parts.len()).as_bytes())?;

        if self.binary_cells > 0 {
            debug!("skipped {} binary cells", self.binary_cells);
        }

        self.interner.close()?;
        let writer = self.zip.finish()?;
        Ok((writer, strings))
    }

    fn flush_buf(&mut self) -> XlsxResult<()> {
        self.zip.write_all(self.buf.as_bytes())?;
        self.buf.clear();
        Ok(())
    }
}

impl<W: Write + Seek> SheetSink for XlsxSink<W> {
    type Error = XlsxError;

    fn begin_sheet(&mut self, position: usize, sheet: &Worksheet) -> XlsxResult<()> {
        let part = self.parts.len() + 1;
        self.zip
            .start_file(format!("xl/worksheets/sheet{}.xml", part), self.options)?;
        self.refs.ensure_width(sheet.width());

        // The first visible sheet is the one selected on open
        let selected = !self.tab_selected && sheet.config().visible;
        self.tab_selected |= selected;
        sheet::sheet_start(&mut self.buf, sheet, selected);
        self.flush_buf()?;

        self.parts.push(SheetPart {
            name: sheet.name().to_string(),
            hidden: !sheet.config().visible,
        });
        debug!("sheet #{} '{}' -> sheet{}.xml", position, sheet.name(), part);
        Ok(())
    }

    fn write_rows(&mut self, sheet: &Worksheet, block: &mut RowBlock) -> XlsxResult<()> {
        while let Some(row) = block.advance() {
            if row.is_empty() && !row.has_custom_settings() {
                continue;
            }
            encode_row(
                &mut self.buf,
                &mut self.refs,
                &mut self.interner,
                &mut self.binary_cells,
                sheet,
                row,
            )?;
        }
        self.flush_buf()
    }

    fn end_sheet(&mut self, position: usize, sheet: &Worksheet, rows: u64) -> XlsxResult<()> {
        sheet::sheet_end(&mut self.buf);
        self.flush_buf()?;
        debug!("sheet #{} '{}' complete: {} rows", position, sheet.name(), rows);
        Ok(())
    }
}

fn encode_row(
    out: &mut String,
    refs: &mut CellRefBuffer,
    interner: &mut StringInterner,
    binary_cells: &mut u64,
    sheet: &Worksheet,
    row: &Row,
) -> XlsxResult<()> {
    sheet::row_start(out, row);

    for (col, cell) in row.cells().iter().enumerate() {
        let value = cell.value();
        if value.is_blank() {
            continue;
        }
        let share = sheet
            .columns()
            .get(col)
            .map_or(true, |column| column.share_strings);
        let cell_ref = refs.format(row.index, col as u16);

        match value {
            CellValue::Blank => {}
            CellValue::String(s) => {
                let index = if share {
                    interner.intern_string(s)?
                } else {
                    INLINE
                };
                push_text_cell(out, cell_ref, s, index);
            }
            CellValue::Char(c) => {
                let index = if share {
                    interner.intern_char(*c)?
                } else {
                    INLINE
                };
                let mut utf8 = [0u8; 4];
                push_text_cell(out, cell_ref, c.encode_utf8(&mut utf8), index);
            }
            CellValue::SharedString(index) => {
                let count = interner.unique_count();
                if *index >= count {
                    return Err(XlsxError::SharedStringOutOfRange {
                        cell: cell_ref.to_string(),
                        index: *index,
                        count,
                    });
                }
                push_cell(out, cell_ref, r#" t="s""#, *index);
            }
            CellValue::Int(n) => push_cell(out, cell_ref, "", *n),
            CellValue::Long(n) => push_cell(out, cell_ref, "", *n),
            CellValue::Float(n) if n.is_finite() => push_cell(out, cell_ref, "", *n),
            CellValue::Double(n) if n.is_finite() => push_cell(out, cell_ref, "", *n),
            CellValue::Float(_) | CellValue::Double(_) => {
                push_cell(out, cell_ref, r#" t="e""#, "#NUM!");
            }
            CellValue::Boolean(b) => {
                push_cell(out, cell_ref, r#" t="b""#, u8::from(*b));
            }
            CellValue::Date(date) => match sheet::date_serial(*date) {
                Some(serial) => push_cell(out, cell_ref, CellFormat::Date.style_attr(), serial),
                None => push_text_cell(out, cell_ref, &date.to_string(), INLINE),
            },
            CellValue::DateTime(datetime) => match sheet::datetime_serial(*datetime) {
                Some(serial) => {
                    push_cell(out, cell_ref, CellFormat::DateTime.style_attr(), serial)
                }
                None => push_text_cell(
                    out,
                    cell_ref,
                    &datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    INLINE,
                ),
            },
            CellValue::Time(time) => push_cell(
                out,
                cell_ref,
                CellFormat::Time.style_attr(),
                sheet::time_fraction(*time),
            ),
            CellValue::Binary(bytes) => {
                if *binary_cells == 0 {
                    warn!(
                        "binary cell {} ({} bytes) in sheet '{}' has no XLSX form; skipping binary cells",
                        cell_ref,
                        bytes.len(),
                        sheet.name()
                    );
                }
                *binary_cells += 1;
            }
        }
    }

    out.push_str("</row>");
    Ok(())
}

fn push_cell(out: &mut String, cell_ref: &str, attrs: &str, value: impl std::fmt::Display) {
    use std::fmt::Write as _;
    let _ = write!(out, r#"<c r="{}"{}><v>{}</v></c>"#, cell_ref, attrs, value);
}

/// Shared string reference, or an inline string when `index` is [`INLINE`]
fn push_text_cell(out: &mut String, cell_ref: &str, text: &str, index: i64) {
    if index != INLINE {
        push_cell(out, cell_ref, r#" t="s""#, index);
        return;
    }
    out.push_str(r#"<c r=""#);
    out.push_str(cell_ref);
    out.push_str(r#"" t="inlineStr"><is>"#);
    if needs_preserve(text) {
        out.push_str(r#"<t xml:space="preserve">"#);
    } else {
        out.push_str("<t>");
    }
    out.push_str(&escape_text(text));
    out.push_str("</t></is></c>");
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Stream a workbook into a file at `path`
    pub fn write_file<P: AsRef<Path>>(
        workbook: &mut Workbook,
        path: P,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<XlsxReport> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        let report = Self::write(workbook, &mut writer, options)?;
        writer.flush()?;
        info!(
            "wrote {}: {} sheets, {} rows, {} shared strings",
            path.as_ref().display(),
            report.stats.sheets,
            report.stats.rows,
            report.strings.unique_count
        );
        Ok(report)
    }

    /// Stream a workbook into `writer`
    pub fn write<W: Write + Seek>(
        workbook: &mut Workbook,
        writer: W,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<XlsxReport> {
        if workbook.is_empty() {
            return Err(XlsxError::EmptyWorkbook);
        }

        let mut sink = XlsxSink::new(writer, options)?;
        let stats = stream_workbook(workbook, &mut sink)?;
        let (_, strings) = sink.finish()?;
        Ok(XlsxReport { stats, strings })
    }
}
