//! Worksheet part fragments and cell value encoding helpers

use std::fmt::Write;

use bulk_sheets_core::{Row, Worksheet};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// `num_days_from_ce` of 1899-12-30, day zero of the 1900 date system
const EXCEL_EPOCH_DAYS_FROM_CE: i64 = 693_594;

/// First serial after Excel's phantom 1900-02-29
const FIRST_SERIAL_AFTER_LEAP_BUG: i64 = 61;

/// Everything up to and including `<sheetData>`
pub(crate) fn sheet_start(out: &mut String, sheet: &Worksheet, selected: bool) {
    out.push_str(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    let config = sheet.config();
    if let Some(argb) = config.tab_color {
        let _ = write!(out, r#"<sheetPr><tabColor rgb="{:08X}"/></sheetPr>"#, argb);
    }

    out.push_str(r#"<sheetViews><sheetView workbookViewId="0""#);
    if selected {
        out.push_str(r#" tabSelected="1""#);
    }
    if let Some(zoom) = config.zoom {
        let _ = write!(out, r#" zoomScale="{}""#, zoom.clamp(10, 400));
    }
    if config.freeze_header && sheet.has_header() {
        out.push_str(
            r#"><pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/></sheetView></sheetViews>"#,
        );
    } else {
        out.push_str("/></sheetViews>");
    }

    out.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

    if sheet.columns().iter().any(|c| c.has_custom_settings()) {
        out.push_str("<cols>");
        for (i, column) in sheet.columns().iter().enumerate() {
            if !column.has_custom_settings() {
                continue;
            }
            let _ = write!(out, r#"<col min="{0}" max="{0}""#, i + 1);
            if let Some(width) = column.width {
                let _ = write!(out, r#" width="{}" customWidth="1""#, width);
            }
            if column.hidden {
                out.push_str(r#" hidden="1""#);
            }
            out.push_str("/>");
        }
        out.push_str("</cols>");
    }

    out.push_str("<sheetData>");
}

/// Everything after the last row
pub(crate) fn sheet_end(out: &mut String) {
    out.push_str("</sheetData></worksheet>");
}

/// Opening `<row>` tag with the row's attributes
pub(crate) fn row_start(out: &mut String, row: &Row) {
    let _ = write!(out, r#"<row r="{}""#, row.index + 1);
    if let Some(height) = row.height {
        let _ = write!(out, r#" ht="{}" customHeight="1""#, height);
    }
    if row.hidden {
        out.push_str(r#" hidden="1""#);
    }
    if row.outline_level > 0 {
        let _ = write!(out, r#" outlineLevel="{}""#, row.outline_level.min(7));
    }
    out.push('>');
}

/// Excel serial day number (1900 date system), `None` before 1900-01-01
pub(crate) fn date_serial(date: NaiveDate) -> Option<f64> {
    let mut serial = date.num_days_from_ce() as i64 - EXCEL_EPOCH_DAYS_FROM_CE;
    if serial < FIRST_SERIAL_AFTER_LEAP_BUG {
        serial -= 1;
    }
    (serial >= 1).then_some(serial as f64)
}

/// Fraction of a day
pub(crate) fn time_fraction(time: NaiveTime) -> f64 {
    let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9;
    seconds / 86_400.0
}

/// Serial date plus time fraction, `None` before 1900-01-01
pub(crate) fn datetime_serial(datetime: NaiveDateTime) -> Option<f64> {
    date_serial(datetime.date()).map(|d| d + time_fraction(datetime.time()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulk_sheets_core::{Column, SheetConfig, VecSource, Workbook};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_serials() {
        assert_eq!(date_serial(ymd(1900, 1, 1)), Some(1.0));
        assert_eq!(date_serial(ymd(1900, 2, 28)), Some(59.0));
        assert_eq!(date_serial(ymd(1900, 3, 1)), Some(61.0));
        assert_eq!(date_serial(ymd(1970, 1, 1)), Some(25_569.0));
        assert_eq!(date_serial(ymd(2024, 1, 15)), Some(45_306.0));
        assert_eq!(date_serial(ymd(1899, 12, 31)), None);
    }

    #[test]
    fn test_time_fraction() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(time_fraction(noon), 0.5);
        let dt = ymd(1970, 1, 1).and_time(noon);
        assert_eq!(datetime_serial(dt), Some(25_569.5));
    }

    #[test]
    fn test_sheet_start() {
        let mut wb = Workbook::new();
        let config = SheetConfig {
            freeze_header: true,
            tab_color: Some(0xFF00B050),
            zoom: Some(120),
            ..Default::default()
        };
        wb.add_sheet_with_config(
            "Data",
            vec![Column::new("a").with_width(20.0), Column::new("b")],
            config,
            VecSource::new(Vec::new()),
        )
        .unwrap();

        let mut out = String::new();
        sheet_start(&mut out, wb.worksheet(0).unwrap(), true);
        assert!(out.contains(r#"<tabColor rgb="FF00B050"/>"#));
        assert!(out.contains(r#"tabSelected="1" zoomScale="120""#));
        assert!(out.contains(r#"state="frozen""#));
        assert!(out.contains(r#"<cols><col min="1" max="1" width="20" customWidth="1"/></cols>"#));
        assert!(out.ends_with("<sheetData>"));
    }

    #[test]
    fn test_row_start() {
        let mut row = Row::new(1);
        row.index = 4;
        row.height = Some(30.0);
        row.hidden = true;
        row.outline_level = 2;

        let mut out = String::new();
        row_start(&mut out, &row);
        assert_eq!(
            out,
            r#"<row r="5" ht="30" customHeight="1" hidden="1" outlineLevel="2">"#
        );
    }
}
