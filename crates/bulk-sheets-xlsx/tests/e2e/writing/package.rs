//! Package structure: required parts, relationships, sheet metadata.

use bulk_sheets_core::{Column, SheetConfig, VecSource, Workbook};
use bulk_sheets_xlsx::{XlsxError, XlsxWriteOptions, XlsxWriter};
use pretty_assertions::assert_eq;
use std::io::Cursor;

use crate::{attribute_values, numbered_records, write_to_memory};

#[test]
fn test_required_parts_present() {
    let mut wb = Workbook::new();
    wb.add_sheet(
        "Data",
        vec![Column::new("id"), Column::new("name")],
        VecSource::new(numbered_records(3)),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    let names: Vec<&str> = written.parts.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/_rels/workbook.xml.rels",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
    assert_eq!(written.sheet_names(), vec!["Data"]);
    assert_eq!(written.report.stats.sheets, 1);
    assert_eq!(written.report.stats.rows, 4);
}

#[test]
fn test_sheet_order_and_hidden_state() {
    let mut wb = Workbook::new();
    wb.add_sheet("First", vec![Column::new("a")], VecSource::new(numbered_records(1)))
        .unwrap();
    let hidden = SheetConfig {
        visible: false,
        ..Default::default()
    };
    wb.add_sheet_with_config(
        "Second",
        vec![Column::new("a")],
        hidden,
        VecSource::new(numbered_records(1)),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    let workbook_xml = written.part("xl/workbook.xml");
    assert_eq!(written.sheet_names(), vec!["First", "Second"]);
    assert_eq!(attribute_values(workbook_xml, "sheet", "state"), vec!["hidden"]);
    assert_eq!(
        attribute_values(workbook_xml, "sheet", "r:id"),
        vec!["rId1", "rId2"]
    );

    let rels = written.part("xl/_rels/workbook.xml.rels");
    assert_eq!(
        attribute_values(rels, "Relationship", "Target"),
        vec![
            "worksheets/sheet1.xml",
            "worksheets/sheet2.xml",
            "styles.xml",
            "sharedStrings.xml",
        ]
    );
    assert!(written.sheet(1).contains(r#"tabSelected="1""#));
    assert!(!written.sheet(2).contains("tabSelected"));
}

#[test]
fn test_hidden_first_sheet_is_not_selected() {
    let mut wb = Workbook::new();
    let hidden = SheetConfig {
        visible: false,
        ..Default::default()
    };
    wb.add_sheet_with_config(
        "Lookup",
        vec![Column::new("a")],
        hidden,
        VecSource::new(numbered_records(1)),
    )
    .unwrap();
    wb.add_sheet("Report", vec![Column::new("a")], VecSource::new(numbered_records(1)))
        .unwrap();
    wb.add_sheet("Extra", vec![Column::new("a")], VecSource::new(numbered_records(1)))
        .unwrap();

    let written = write_to_memory(&mut wb);
    assert!(!written.sheet(1).contains("tabSelected"));
    assert!(written.sheet(2).contains(r#"tabSelected="1""#));
    assert!(!written.sheet(3).contains("tabSelected"));
    assert_eq!(
        attribute_values(written.part("xl/workbook.xml"), "workbookView", "activeTab"),
        vec!["1"]
    );
}

#[test]
fn test_frozen_header_and_columns() {
    let mut wb = Workbook::new();
    let config = SheetConfig {
        freeze_header: true,
        ..Default::default()
    };
    wb.add_sheet_with_config(
        "Data",
        vec![Column::new("id").with_width(12.5), Column::new("secret").with_hidden(true)],
        config,
        VecSource::new(numbered_records(2)),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    let sheet = written.sheet(1);
    assert!(sheet.contains(r#"<pane ySplit="1" topLeftCell="A2""#));
    assert_eq!(attribute_values(sheet, "col", "width"), vec!["12.5"]);
    assert_eq!(attribute_values(sheet, "col", "hidden"), vec!["1"]);
}

#[test]
fn test_sheet_name_is_escaped() {
    let mut wb = Workbook::new();
    wb.add_sheet("R&D <2024>", vec![Column::new("a")], VecSource::new(numbered_records(1)))
        .unwrap();

    let written = write_to_memory(&mut wb);
    assert_eq!(written.sheet_names(), vec!["R&D <2024>"]);
}

#[test]
fn test_empty_workbook_is_rejected() {
    let mut wb = Workbook::new();
    let err = XlsxWriter::write(&mut wb, Cursor::new(Vec::new()), &XlsxWriteOptions::default())
        .unwrap_err();
    assert!(matches!(err, XlsxError::EmptyWorkbook));
}

#[test]
fn test_write_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let mut wb = Workbook::new();
    wb.add_sheet("Data", vec![Column::new("n")], VecSource::new(numbered_records(5)))
        .unwrap();
    let report = XlsxWriter::write_file(&mut wb, &path, &XlsxWriteOptions::default()).unwrap();
    assert_eq!(report.stats.records, 5);

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("xl/worksheets/sheet1.xml").is_ok());
}

#[test]
fn test_interner_temp_files_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = XlsxWriteOptions::default();
    options.interner.temp_dir = Some(dir.path().to_path_buf());

    let mut wb = Workbook::new();
    wb.add_sheet("Data", vec![Column::new("n")], VecSource::new(numbered_records(50)))
        .unwrap();
    XlsxWriter::write(&mut wb, Cursor::new(Vec::new()), &options).unwrap();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
