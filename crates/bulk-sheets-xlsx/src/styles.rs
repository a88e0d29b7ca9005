//! Fixed stylesheet (styles.xml)
//!
//! Style resolution happens outside this crate; the streaming writer only
//! needs a default format plus built-in number formats for temporal cells.

/// Cell format (index into `cellXfs`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// General format
    General = 0,
    /// Built-in numFmt 14 (`m/d/yyyy`)
    Date = 1,
    /// Built-in numFmt 22 (`m/d/yyyy h:mm`)
    DateTime = 2,
    /// Built-in numFmt 21 (`h:mm:ss`)
    Time = 3,
}

impl CellFormat {
    /// `s` attribute for a cell, or `""` for the default format
    pub fn style_attr(self) -> &'static str {
        match self {
            CellFormat::General => "",
            CellFormat::Date => r#" s="1""#,
            CellFormat::DateTime => r#" s="2""#,
            CellFormat::Time => r#" s="3""#,
        }
    }
}

/// The complete styles part
pub(crate) const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1">
        <font><sz val="11"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font>
    </fonts>
    <fills count="2">
        <fill><patternFill patternType="none"/></fill>
        <fill><patternFill patternType="gray125"/></fill>
    </fills>
    <borders count="1">
        <border><left/><right/><top/><bottom/><diagonal/></border>
    </borders>
    <cellStyleXfs count="1">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    </cellStyleXfs>
    <cellXfs count="4">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
        <xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
        <xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
        <xf numFmtId="21" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    </cellXfs>
    <cellStyles count="1">
        <cellStyle name="Normal" xfId="0" builtinId="0"/>
    </cellStyles>
</styleSheet>"#;
