//! CSV sources streamed through the core write loop.

use std::io::Write;

use bulk_sheets_core::{
    stream_workbook, CellValue, RowBlock, SheetSink, Workbook, WorkbookSettings, Worksheet,
};
use bulk_sheets_csv::{CsvReadOptions, CsvSource};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Collect {
    sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

impl SheetSink for Collect {
    type Error = bulk_sheets_core::Error;

    fn begin_sheet(&mut self, _: usize, sheet: &Worksheet) -> bulk_sheets_core::Result<()> {
        self.sheets.push((sheet.name().to_string(), Vec::new()));
        Ok(())
    }

    fn write_rows(&mut self, _: &Worksheet, block: &mut RowBlock) -> bulk_sheets_core::Result<()> {
        let rows = &mut self.sheets.last_mut().unwrap().1;
        while let Some(row) = block.advance() {
            rows.push(row.cells().iter().map(|c| c.value().clone()).collect());
        }
        Ok(())
    }

    fn end_sheet(&mut self, _: usize, _: &Worksheet, _: u64) -> bulk_sheets_core::Result<()> {
        Ok(())
    }
}

#[test]
fn test_csv_file_paginates_incrementally() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,name").unwrap();
    for i in 0..9 {
        writeln!(file, "{},name {}", i, i).unwrap();
    }
    file.flush().unwrap();

    let options = CsvReadOptions {
        batch_size: 2,
        ..Default::default()
    };
    let mut source = CsvSource::open(file.path(), &options).unwrap();
    let columns = source.columns().unwrap();

    let mut wb = Workbook::with_settings(WorkbookSettings {
        max_rows_per_sheet: 4,
        row_block_size: 2,
        ..Default::default()
    });
    wb.add_sheet("Import", columns, source).unwrap();

    let mut sink = Collect::default();
    let stats = stream_workbook(&mut wb, &mut sink).unwrap();

    let names: Vec<&str> = sink.sheets.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Import", "Import (1)", "Import (2)"]);
    assert_eq!(stats.records, 9);
    for (_, rows) in &sink.sheets {
        assert_eq!(rows[0], vec![CellValue::from("id"), CellValue::from("name")]);
    }
    assert_eq!(
        sink.sheets[2].1[3],
        vec![CellValue::Long(8), CellValue::from("name 8")]
    );
}

#[test]
fn test_ragged_rows_are_padded() {
    let input = "a,b,c\n1\n1,2,3,4\n";
    let mut source = CsvSource::from_reader(input.as_bytes(), &CsvReadOptions::default()).unwrap();
    let columns = source.columns().unwrap();

    let mut wb = Workbook::new();
    wb.add_sheet("S", columns, source).unwrap();

    let mut sink = Collect::default();
    stream_workbook(&mut wb, &mut sink).unwrap();

    let rows = &sink.sheets[0].1;
    assert_eq!(rows[1], vec![CellValue::Long(1), CellValue::Blank, CellValue::Blank]);
    assert_eq!(
        rows[2],
        vec![CellValue::Long(1), CellValue::Long(2), CellValue::Long(3)]
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = CsvSource::open(dir.path().join("absent.csv"), &CsvReadOptions::default());
    assert!(matches!(result, Err(bulk_sheets_csv::CsvError::Io(_))));
}
