//! Worksheet type

use crate::column::Column;
use crate::source::SourceId;

/// Half-open range of logical record indices `[start, end)`.
///
/// `end == None` means "until the source is exhausted".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    /// First record index (inclusive)
    pub start: usize,
    /// Last record index (exclusive), if fixed
    pub end: Option<usize>,
}

impl RowRange {
    /// Range with no upper bound yet
    pub fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Range with both bounds fixed
    pub fn bounded(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Number of records covered, if bounded
    pub fn len(&self) -> Option<usize> {
        self.end.map(|end| end - self.start)
    }

    /// Check if the range is bounded and covers no records
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Shift both bounds by `offset`
    pub fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end.map(|end| end + offset),
        }
    }
}

/// Sheet-level configuration copied onto every paginated sibling
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Write the column headers as the first row
    pub header: bool,
    /// Freeze the header row when scrolling
    pub freeze_header: bool,
    /// Sheet is visible
    pub visible: bool,
    /// Tab color as ARGB (e.g. 0xFF00B050)
    pub tab_color: Option<u32>,
    /// Zoom percentage (10-400)
    pub zoom: Option<u16>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            header: true,
            freeze_header: false,
            visible: true,
            tab_color: None,
            zoom: None,
        }
    }
}

/// A logical worksheet: configuration plus a window onto a data source.
///
/// A worksheet whose data exceeds the physical row limit is split into
/// siblings produced by [`Worksheet::page_clone`]. Siblings share the data
/// source; exactly one of them owns it and releases it when finished.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    columns: Vec<Column>,
    config: SheetConfig,
    source: SourceId,
    range: RowRange,
    owns_shared_resources: bool,
}

impl Worksheet {
    pub(crate) fn new(name: String, columns: Vec<Column>, config: SheetConfig, source: SourceId) -> Self {
        Self {
            name,
            columns,
            config,
            source,
            range: RowRange::open(0),
            owns_shared_resources: true,
        }
    }

    /// Copy configuration into a sibling covering `range`.
    ///
    /// In-flight state is not copied, and the sibling starts out without
    /// ownership of the shared source.
    pub fn page_clone(&self, name: String, range: RowRange) -> Self {
        Self {
            name,
            columns: self.columns.clone(),
            config: self.config.clone(),
            source: self.source,
            range,
            owns_shared_resources: false,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column descriptors
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns (cells per row)
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Sheet configuration
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Mutable sheet configuration
    pub fn config_mut(&mut self) -> &mut SheetConfig {
        &mut self.config
    }

    /// The data source this sheet reads from
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Record range this sheet covers
    pub fn range(&self) -> RowRange {
        self.range
    }

    pub(crate) fn set_range(&mut self, range: RowRange) {
        self.range = range;
    }

    /// Whether this sheet releases the shared data source when it finishes
    pub fn owns_shared_resources(&self) -> bool {
        self.owns_shared_resources
    }

    pub(crate) fn set_owns_shared_resources(&mut self, owns: bool) {
        self.owns_shared_resources = owns;
    }

    /// Check if the sheet writes a header row
    pub fn has_header(&self) -> bool {
        self.config.header && self.columns.iter().any(|c| c.header.is_some())
    }

    /// Rows consumed on the physical sheet before the first data row
    pub fn header_rows(&self) -> usize {
        usize::from(self.has_header())
    }
}
