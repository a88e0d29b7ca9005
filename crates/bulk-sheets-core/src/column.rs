//! Column descriptors

/// Column descriptor, built ahead of time.
///
/// Field `i` of every record maps to the `i`-th column of the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text (None = no header cell)
    pub header: Option<String>,
    /// Custom width (None = default)
    pub width: Option<f64>,
    /// Column is hidden
    pub hidden: bool,
    /// Text in this column goes through the shared string table
    pub share_strings: bool,
}

impl Column {
    /// Create a column with a header
    pub fn new<S: Into<String>>(header: S) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::unnamed()
        }
    }

    /// Create a column without a header cell
    pub fn unnamed() -> Self {
        Self {
            header: None,
            width: None,
            hidden: false,
            share_strings: true,
        }
    }

    /// Set width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set hidden
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Whether text is interned (true, default) or always written inline
    pub fn with_share_strings(mut self, share: bool) -> Self {
        self.share_strings = share;
        self
    }

    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.hidden
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::unnamed()
    }
}

impl From<&str> for Column {
    fn from(header: &str) -> Self {
        Column::new(header)
    }
}

impl From<String> for Column {
    fn from(header: String) -> Self {
        Column::new(header)
    }
}
