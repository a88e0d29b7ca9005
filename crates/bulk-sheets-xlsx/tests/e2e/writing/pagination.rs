//! Oversized sheets split into numbered siblings.

use bulk_sheets_core::{CellValue, Column, IterSource, SheetConfig, VecSource};
use pretty_assertions::assert_eq;

use crate::{attribute_values, numbered_records, text_of, workbook_with_limit, write_to_memory};

fn no_header() -> SheetConfig {
    SheetConfig {
        header: false,
        ..Default::default()
    }
}

#[test]
fn test_eager_source_paginates() {
    let mut wb = workbook_with_limit(10, 4);
    wb.add_sheet_with_config(
        "Data",
        vec![Column::new("n"), Column::new("label")],
        no_header(),
        VecSource::new(numbered_records(25)),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    assert_eq!(written.sheet_names(), vec!["Data", "Data (1)", "Data (2)"]);
    assert_eq!(
        (1..=3).map(|n| written.row_count(n)).collect::<Vec<_>>(),
        vec![10, 10, 5]
    );
    assert_eq!(written.report.stats.pages_added, 2);
    assert_eq!(written.report.stats.records, 25);

    // Every page restarts at row 1
    let rows = attribute_values(written.sheet(3), "row", "r");
    assert_eq!(rows, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_incremental_source_repeats_header() {
    let mut wb = workbook_with_limit(5, 3);
    wb.add_sheet(
        "Feed",
        vec![Column::new("n"), Column::new("label")],
        IterSource::new(numbered_records(10).into_iter(), 2),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    assert_eq!(written.sheet_names(), vec!["Feed", "Feed (1)", "Feed (2)"]);
    assert_eq!(
        (1..=3).map(|n| written.row_count(n)).collect::<Vec<_>>(),
        vec![5, 5, 3]
    );
    for n in 1..=3 {
        assert!(written.sheet(n).contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
    }

    // Header strings are interned once and referenced from every page
    let strings = written.shared_strings();
    assert_eq!(&strings[..2], &["n".to_string(), "label".to_string()]);
    assert_eq!(strings.len(), 12);
}

#[test]
fn test_records_are_written_once_in_order() {
    let mut wb = workbook_with_limit(7, 2);
    wb.add_sheet_with_config(
        "Data",
        vec![Column::new("n")],
        no_header(),
        IterSource::new(
            (0..20).map(|i| vec![CellValue::Long(i)]),
            3,
        ),
    )
    .unwrap();

    let written = write_to_memory(&mut wb);
    let values: Vec<String> = (1..=written.parts.len())
        .filter(|n| written.parts.contains_key(&format!("xl/worksheets/sheet{}.xml", n)))
        .flat_map(|n| text_of(written.sheet(n), "v"))
        .collect();
    let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_following_sheets_keep_their_order() {
    let mut wb = workbook_with_limit(4, 4);
    wb.add_sheet_with_config(
        "Big",
        vec![Column::new("n")],
        no_header(),
        VecSource::new(numbered_records(9)),
    )
    .unwrap();
    wb.add_sheet("Small", vec![Column::new("n")], VecSource::new(numbered_records(1)))
        .unwrap();

    let written = write_to_memory(&mut wb);
    assert_eq!(
        written.sheet_names(),
        vec!["Big", "Big (1)", "Big (2)", "Small"]
    );
    assert_eq!(written.row_count(4), 2);
}
