//! Common utilities for E2E tests.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use bulk_sheets_core::{CellValue, Record, Workbook, WorkbookSettings};
use bulk_sheets_xlsx::{XlsxReport, XlsxWriteOptions, XlsxWriter};
use quick_xml::events::Event;
use quick_xml::Reader;

/// An XLSX archive written to memory, with every part decoded as text
pub struct Written {
    pub report: XlsxReport,
    pub parts: BTreeMap<String, String>,
}

impl Written {
    /// Part contents by archive path
    pub fn part(&self, name: &str) -> &str {
        self.parts
            .get(name)
            .unwrap_or_else(|| panic!("missing part {}, have {:?}", name, self.parts.keys()))
    }

    /// Worksheet part for the 1-based sheet number
    pub fn sheet(&self, n: usize) -> &str {
        self.part(&format!("xl/worksheets/sheet{}.xml", n))
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        attribute_values(self.part("xl/workbook.xml"), "sheet", "name")
    }

    /// Shared string items in index order
    pub fn shared_strings(&self) -> Vec<String> {
        text_of(self.part("xl/sharedStrings.xml"), "si")
    }

    /// Count of `<row>` elements in sheet `n`
    pub fn row_count(&self, n: usize) -> usize {
        attribute_values(self.sheet(n), "row", "r").len()
    }
}

/// Stream `workbook` into memory with default options
pub fn write_to_memory(workbook: &mut Workbook) -> Written {
    write_with(workbook, &XlsxWriteOptions::default())
}

/// Stream `workbook` into memory with `options`
pub fn write_with(workbook: &mut Workbook, options: &XlsxWriteOptions) -> Written {
    let mut cursor = Cursor::new(Vec::new());
    let report = XlsxWriter::write(workbook, &mut cursor, options).expect("write xlsx");

    cursor.set_position(0);
    let mut archive = zip::ZipArchive::new(cursor).expect("valid zip");
    let mut parts = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("zip entry");
        let mut content = String::new();
        file.read_to_string(&mut content).expect("utf-8 part");
        assert_well_formed(file.name(), &content);
        parts.insert(file.name().to_string(), content);
    }
    Written { report, parts }
}

/// Workbook with the given page limit and row block size
pub fn workbook_with_limit(max_rows_per_sheet: usize, row_block_size: usize) -> Workbook {
    Workbook::with_settings(WorkbookSettings {
        max_rows_per_sheet,
        row_block_size,
        ..Default::default()
    })
}

/// `n` records of `[Long(i), String("row i")]`
pub fn numbered_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| vec![CellValue::Long(i as i64), CellValue::from(format!("row {}", i))])
        .collect()
}

/// Panic unless `xml` parses to the end
pub fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("{} is not well-formed at {}: {}", name, reader.buffer_position(), e),
        }
    }
}

/// Values of `attr` on every `<tag>` element, in document order
pub fn attribute_values(xml: &str, tag: &str, attr: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event().expect("xml event") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == tag.as_bytes() => {
                if let Some(a) = e.try_get_attribute(attr).expect("attribute") {
                    values.push(a.unescape_value().expect("unescape").into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    values
}

/// Concatenated unescaped text inside every `<tag>` element, in document order
pub fn text_of(xml: &str, tag: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    let mut current: Option<String> = None;
    loop {
        match reader.read_event().expect("xml event") {
            Event::Start(e) if e.name().as_ref() == tag.as_bytes() => current = Some(String::new()),
            Event::Empty(e) if e.name().as_ref() == tag.as_bytes() => items.push(String::new()),
            Event::End(e) if e.name().as_ref() == tag.as_bytes() => {
                items.extend(current.take());
            }
            Event::Text(t) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&t.unescape().expect("unescape"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    items
}
