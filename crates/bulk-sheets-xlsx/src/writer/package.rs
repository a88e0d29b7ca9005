//! Package-level parts: content types, relationships and workbook.xml

use quick_xml::escape::escape;

/// A physical sheet already written to the archive
#[derive(Debug, Clone)]
pub(crate) struct SheetPart {
    pub name: String,
    pub hidden: bool,
}

pub(crate) fn content_types(sheet_count: usize) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    );

    for i in 0..sheet_count {
        content.push_str(&format!(
            r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }

    content.push_str("\n</Types>");
    content
}

pub(crate) const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

pub(crate) fn workbook_xml(sheets: &[SheetPart]) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <bookViews>"#,
    );

    // Excel refuses workbooks without a visible sheet, so the first one is
    // shown when every sheet is hidden
    let active = sheets.iter().position(|s| !s.hidden).unwrap_or(0);
    if active > 0 {
        content.push_str(&format!(r#"<workbookView activeTab="{}"/>"#, active));
    } else {
        content.push_str("<workbookView/>");
    }
    content.push_str(
        r#"</bookViews>
    <sheets>"#,
    );

    for (i, sheet) in sheets.iter().enumerate() {
        let state = if sheet.hidden && i != active {
            r#" state="hidden""#
        } else {
            ""
        };
        content.push_str(&format!(
            r#"
        <sheet name="{}" sheetId="{}"{} r:id="rId{}"/>"#,
            escape(sheet.name.as_str()),
            i + 1,
            state,
            i + 1
        ));
    }

    content.push_str(
        r#"
    </sheets>
</workbook>"#,
    );
    content
}

pub(crate) fn workbook_rels(sheet_count: usize) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    for i in 0..sheet_count {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }

    content.push_str(&format!(
        r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheet_count + 1,
        sheet_count + 2
    ));

    content.push_str("\n</Relationships>");
    content
}
