//! Workbook type - the ordered sheet list and its data sources

use crate::column::Column;
use crate::error::{Error, Result};
use crate::source::{DataSource, SourceRegistry};
use crate::worksheet::{SheetConfig, Worksheet};
use crate::{DEFAULT_ROW_BLOCK_SIZE, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

/// A workbook being written: logical sheets in document order plus the
/// data sources that feed them.
///
/// Paginated siblings are inserted directly after the sheet they were split
/// from, so iterating the sheet list during a write visits them in order.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in document order
    sheets: Vec<Worksheet>,
    /// Registered data sources
    sources: SourceRegistry,
    /// Workbook settings
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create an empty workbook with default settings
    pub fn new() -> Self {
        Self::with_settings(WorkbookSettings::default())
    }

    /// Create an empty workbook with the given settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            sheets: Vec::new(),
            sources: SourceRegistry::new(),
            settings,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.sheets.iter()
    }

    /// Registered data sources
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub(crate) fn sources_mut(&mut self) -> &mut SourceRegistry {
        &mut self.sources
    }

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Get mutable workbook settings
    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }

    /// Add a sheet fed by `source`, with default configuration
    pub fn add_sheet<D>(&mut self, name: &str, columns: Vec<Column>, source: D) -> Result<usize>
    where
        D: DataSource + 'static,
    {
        self.add_sheet_with_config(name, columns, SheetConfig::default(), source)
    }

    /// Add a sheet fed by `source`
    pub fn add_sheet_with_config<D>(
        &mut self,
        name: &str,
        columns: Vec<Column>,
        config: SheetConfig,
        source: D,
    ) -> Result<usize>
    where
        D: DataSource + 'static,
    {
        self.validate_sheet_name(name)?;
        self.validate_columns(columns.len())?;

        let id = self.sources.register(Box::new(source));
        let index = self.sheets.len();
        self.sheets
            .push(Worksheet::new(name.to_string(), columns, config, id));
        Ok(index)
    }

    /// Insert an already-built sheet (e.g. a paginated sibling) at `index`
    pub(crate) fn insert_sheet(&mut self, index: usize, sheet: Worksheet) -> Result<()> {
        if index > self.sheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.sheets.len()));
        }
        self.validate_sheet_name(sheet.name())?;
        self.sheets.insert(index, sheet);
        Ok(())
    }

    /// Check if a sheet name is taken (case-insensitive)
    pub fn contains_name(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.sheets.iter().any(|ws| ws.name().to_lowercase() == lower)
    }

    /// Reject sheets wider than the configured column limit
    pub(crate) fn validate_columns(&self, count: usize) -> Result<()> {
        let limit = self.settings.max_columns.min(MAX_COLS as usize);
        if count > limit {
            return Err(Error::TooManyColumns { count, limit });
        }
        Ok(())
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        for c in INVALID_SHEET_NAME_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Duplicate names are compared case-insensitively
        let name_lower = name.to_lowercase();
        if self.sheets.iter().any(|ws| ws.name().to_lowercase() == name_lower) {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Characters Excel rejects in sheet names
const INVALID_SHEET_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Workbook-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookSettings {
    /// Physical row limit per sheet, header rows included
    pub max_rows_per_sheet: usize,
    /// Column limit per sheet (columns are never split)
    pub max_columns: usize,
    /// Rows per fill/drain cycle
    pub row_block_size: usize,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            max_rows_per_sheet: MAX_ROWS as usize,
            max_columns: MAX_COLS as usize,
            row_block_size: DEFAULT_ROW_BLOCK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::VecSource;

    fn empty() -> VecSource {
        VecSource::new(Vec::new())
    }

    #[test]
    fn test_add_sheets() {
        let mut wb = Workbook::new();
        assert!(wb.is_empty());

        let idx = wb.add_sheet("Data", vec![Column::new("A")], empty()).unwrap();
        assert_eq!(idx, 0);
        let idx = wb.add_sheet("More", vec![Column::new("B")], empty()).unwrap();
        assert_eq!(idx, 1);

        assert_eq!(wb.sheet_count(), 2);
        assert_eq!(wb.sheet_index("More"), Some(1));
        assert!(wb.worksheet_by_name("Missing").is_none());
        assert_eq!(wb.sources().live_count(), 2);
        assert!(wb.worksheet(0).unwrap().owns_shared_resources());
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();
        wb.add_sheet("Sheet1", vec![], empty()).unwrap();

        // Case-insensitive duplicate check
        assert!(wb.add_sheet("SHEET1", vec![], empty()).is_err());
        assert!(wb.add_sheet("sheet1", vec![], empty()).is_err());
        assert!(wb.contains_name("sHeEt1"));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_sheet("", vec![], empty()).is_err());
        assert!(wb.add_sheet("Sheet/1", vec![], empty()).is_err());
        assert!(wb.add_sheet("Sheet:1", vec![], empty()).is_err());
        assert!(wb.add_sheet("Sheet[1]", vec![], empty()).is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(wb.add_sheet(&long_name, vec![], empty()).is_err());
    }

    #[test]
    fn test_too_many_columns() {
        let mut wb = Workbook::with_settings(WorkbookSettings {
            max_columns: 2,
            ..Default::default()
        });
        let columns = vec![Column::unnamed(); 3];
        match wb.add_sheet("Wide", columns, empty()) {
            Err(Error::TooManyColumns { count, limit }) => {
                assert_eq!(count, 3);
                assert_eq!(limit, 2);
            }
            other => panic!("expected TooManyColumns, got {:?}", other),
        }
    }
}
