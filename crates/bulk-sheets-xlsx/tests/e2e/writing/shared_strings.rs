//! Shared string table: dedup, ordering, counts and the inline ceiling.

use bulk_sheets_core::{CellValue, Column, SheetConfig, VecSource, Workbook};
use bulk_sheets_sst::InternerOptions;
use bulk_sheets_xlsx::XlsxWriteOptions;
use pretty_assertions::assert_eq;

use crate::{attribute_values, text_of, write_to_memory, write_with};

fn text_sheet(values: &[&str]) -> Workbook {
    let records = values.iter().map(|v| vec![CellValue::from(*v)]).collect();
    let config = SheetConfig {
        header: false,
        ..Default::default()
    };
    let mut wb = Workbook::new();
    wb.add_sheet_with_config("S", vec![Column::unnamed()], config, VecSource::new(records))
        .unwrap();
    wb
}

#[test]
fn test_duplicates_share_an_index() {
    let mut wb = text_sheet(&["abc", "中文", "abc"]);
    let written = write_to_memory(&mut wb);

    assert_eq!(text_of(written.sheet(1), "v"), vec!["0", "1", "0"]);
    assert_eq!(written.shared_strings(), vec!["abc", "中文"]);

    let sst = written.part("xl/sharedStrings.xml");
    assert_eq!(attribute_values(sst, "sst", "count"), vec!["3"]);
    assert_eq!(attribute_values(sst, "sst", "uniqueCount"), vec!["2"]);
    assert_eq!(written.report.strings.unique_count, 2);
    assert_eq!(written.report.strings.total_references, 3);
}

#[test]
fn test_chars_and_strings_are_distinct_entries() {
    let config = SheetConfig {
        header: false,
        ..Default::default()
    };
    let mut wb = Workbook::new();
    wb.add_sheet_with_config(
        "S",
        vec![Column::unnamed(), Column::unnamed()],
        config,
        VecSource::new(vec![
            vec![CellValue::Char('x'), CellValue::from("x")],
            vec![CellValue::Char('x'), CellValue::Char('😀')],
        ]),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    assert_eq!(text_of(written.sheet(1), "v"), vec!["0", "1", "0", "2"]);
    assert_eq!(written.shared_strings(), vec!["x", "x", "😀"]);
}

#[test]
fn test_ceiling_writes_new_values_inline() {
    let mut wb = text_sheet(&["a", "b", "c", "a", "d"]);
    let options = XlsxWriteOptions {
        interner: InternerOptions {
            max_entries: 2,
            ..Default::default()
        },
        ..Default::default()
    };

    let written = write_with(&mut wb, &options);
    let sheet = written.sheet(1);
    assert_eq!(
        attribute_values(sheet, "c", "t"),
        vec!["s", "s", "inlineStr", "s", "inlineStr"]
    );
    assert_eq!(written.shared_strings(), vec!["a", "b"]);
    assert_eq!(written.report.strings.inline_values, 2);
}

#[test]
fn test_many_strings_survive_cache_eviction() {
    let values: Vec<String> = (0..2_000).map(|i| format!("value-{}", i % 700)).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    let mut wb = text_sheet(&refs);
    let options = XlsxWriteOptions {
        interner: InternerOptions {
            expected_entries: 64,
            cache_capacity: 16,
            ..Default::default()
        },
        ..Default::default()
    };

    let written = write_with(&mut wb, &options);
    let indices: Vec<String> = text_of(written.sheet(1), "v");
    let expected: Vec<String> = (0..2_000).map(|i| (i % 700).to_string()).collect();
    assert_eq!(indices, expected);
    assert_eq!(written.shared_strings().len(), 700);
    assert!(written.report.strings.filter_rebuilds > 0);
}
