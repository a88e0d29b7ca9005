//! Example: stream a generated dataset into a paginated xlsx file

use bulk_sheets::prelude::*;

fn main() -> Result<()> {
    let mut workbook = Workbook::with_settings(WorkbookSettings {
        max_rows_per_sheet: 50_000,
        ..Default::default()
    });

    // 120k rows produced on demand; never held in memory at once
    let regions = ["north", "south", "east", "west"];
    let rows = (0..120_000i64).map(move |i| {
        vec![
            CellValue::from(i),
            CellValue::from(regions[(i % 4) as usize]),
            CellValue::from(i as f64 * 0.01),
        ]
    });

    let columns = vec![
        Column::new("id"),
        Column::new("region").with_width(12.0),
        Column::new("amount"),
    ];
    let config = SheetConfig {
        freeze_header: true,
        ..Default::default()
    };
    workbook.add_sheet_with_config("Sales", columns, config, IterSource::new(rows, 1_000))?;

    let report = workbook.save("/tmp/sales.xlsx")?;
    println!(
        "Wrote {} rows across {} sheets ({} shared strings)",
        report.stats.rows, report.stats.sheets, report.strings.unique_count
    );
    for sheet in workbook.worksheets() {
        println!("  {} {:?}", sheet.name(), sheet.range());
    }
    Ok(())
}
