//! Cell encoding: types, references, row attributes.

use std::io::Cursor;

use bulk_sheets_core::{CellValue, Column, SheetConfig, VecSource, Workbook};
use bulk_sheets_xlsx::{XlsxError, XlsxWriteOptions, XlsxWriter};
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

use crate::{attribute_values, text_of, write_to_memory};

fn single_row(values: Vec<CellValue>) -> String {
    let columns = (0..values.len()).map(|_| Column::unnamed()).collect();
    let config = SheetConfig {
        header: false,
        ..Default::default()
    };
    let mut wb = Workbook::new();
    wb.add_sheet_with_config("S", columns, config, VecSource::new(vec![values]))
        .unwrap();
    write_to_memory(&mut wb).sheet(1).to_string()
}

#[test]
fn test_cell_references_and_types() {
    let sheet = single_row(vec![
        CellValue::Int(-3),
        CellValue::Long(9_007_199_254_740_993),
        CellValue::Float(0.25),
        CellValue::Double(6.02e23),
        CellValue::Boolean(false),
    ]);

    assert_eq!(
        attribute_values(&sheet, "c", "r"),
        vec!["A1", "B1", "C1", "D1", "E1"]
    );
    assert_eq!(
        text_of(&sheet, "v"),
        vec!["-3", "9007199254740993", "0.25", "602000000000000000000000", "0"]
    );
    assert_eq!(attribute_values(&sheet, "c", "t"), vec!["b"]);
}

#[test]
fn test_blank_cells_are_omitted() {
    let sheet = single_row(vec![CellValue::Int(1), CellValue::Blank, CellValue::Int(3)]);
    assert_eq!(attribute_values(&sheet, "c", "r"), vec!["A1", "C1"]);
}

#[test]
fn test_temporal_cells_use_date_styles() {
    let sheet = single_row(vec![
        CellValue::Date(NaiveDate::from_ymd_opt(1900, 3, 1).unwrap()),
        CellValue::DateTime(
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
        ),
        CellValue::Time(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
    ]);

    assert_eq!(attribute_values(&sheet, "c", "s"), vec!["1", "2", "3"]);
    assert_eq!(text_of(&sheet, "v"), vec!["61", "25569.25", "0.75"]);
}

#[test]
fn test_non_finite_numbers_become_errors() {
    let sheet = single_row(vec![
        CellValue::Double(f64::INFINITY),
        CellValue::Float(f32::NAN),
    ]);
    assert_eq!(attribute_values(&sheet, "c", "t"), vec!["e", "e"]);
    assert_eq!(text_of(&sheet, "v"), vec!["#NUM!", "#NUM!"]);
}

#[test]
fn test_inline_text_escaping() {
    let mut wb = Workbook::new();
    let config = SheetConfig {
        header: false,
        ..Default::default()
    };
    wb.add_sheet_with_config(
        "S",
        vec![Column::unnamed().with_share_strings(false)],
        config,
        VecSource::new(vec![
            vec![CellValue::from("a & b < c")],
            vec![CellValue::from("bell\u{7}")],
            vec![CellValue::from("  padded")],
        ]),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    let sheet = written.sheet(1);
    assert_eq!(attribute_values(sheet, "c", "t"), vec!["inlineStr"; 3]);
    assert_eq!(
        text_of(sheet, "t"),
        vec!["a & b < c", "bell_x0007_", "  padded"]
    );
    assert!(sheet.contains(r#"<t xml:space="preserve">  padded</t>"#));
    assert!(written.shared_strings().is_empty());
}

#[test]
fn test_binary_cells_are_skipped() {
    let sheet = single_row(vec![CellValue::Binary(vec![0xde, 0xad]), CellValue::Int(1)]);
    assert_eq!(attribute_values(&sheet, "c", "r"), vec!["B1"]);
}

#[test]
fn test_unknown_shared_string_index_is_rejected() {
    let config = SheetConfig {
        header: false,
        ..Default::default()
    };
    let mut wb = Workbook::new();
    wb.add_sheet_with_config(
        "S",
        vec![Column::unnamed()],
        config,
        VecSource::new(vec![vec![CellValue::SharedString(5)]]),
    )
    .unwrap();

    let mut cursor = Cursor::new(Vec::new());
    match XlsxWriter::write(&mut wb, &mut cursor, &XlsxWriteOptions::default()) {
        Err(XlsxError::SharedStringOutOfRange { cell, index, count }) => {
            assert_eq!(cell, "A1");
            assert_eq!(index, 5);
            assert_eq!(count, 0);
        }
        other => panic!("expected SharedStringOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_header_row_uses_shared_strings() {
    let mut wb = Workbook::new();
    wb.add_sheet(
        "S",
        vec![Column::new("id"), Column::unnamed(), Column::new("name")],
        VecSource::new(vec![vec![
            CellValue::Int(1),
            CellValue::Int(2),
            CellValue::from("id"),
        ]]),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    let sheet = written.sheet(1);
    assert_eq!(attribute_values(sheet, "row", "r"), vec!["1", "2"]);
    assert_eq!(
        attribute_values(sheet, "c", "r"),
        vec!["A1", "C1", "A2", "B2", "C2"]
    );
    assert_eq!(written.shared_strings(), vec!["id", "name"]);
}
