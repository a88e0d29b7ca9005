//! Cell value types

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Blank,

    /// Text that the serializer may intern into the shared string table
    String(String),

    /// Text already interned by the producer (index into the shared string table)
    SharedString(u32),

    /// Single character
    Char(char),

    /// 32-bit integer
    Int(i32),

    /// 64-bit integer
    Long(i64),

    /// Single-precision float
    Float(f32),

    /// Double-precision float
    Double(f64),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Calendar date
    Date(NaiveDate),

    /// Date and time of day
    DateTime(NaiveDateTime),

    /// Time of day
    Time(NaiveTime),

    /// Raw bytes (images and other blobs)
    Binary(Vec<u8>),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Check if the cell is blank
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Check if the value carries text (literal, shared or single character)
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            CellValue::String(_) | CellValue::SharedString(_) | CellValue::Char(_)
        )
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Long(n) => Some(*n as f64),
            CellValue::Float(n) => Some(*n as f64),
            CellValue::Double(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Blank => "blank",
            CellValue::String(_) => "string",
            CellValue::SharedString(_) => "shared_string",
            CellValue::Char(_) => "char",
            CellValue::Int(_) => "int",
            CellValue::Long(_) => "long",
            CellValue::Float(_) => "float",
            CellValue::Double(_) => "double",
            CellValue::Boolean(_) => "boolean",
            CellValue::Date(_) => "date",
            CellValue::DateTime(_) => "datetime",
            CellValue::Time(_) => "time",
            CellValue::Binary(_) => "binary",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Blank => Ok(()),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::SharedString(idx) => write!(f, "#{}", idx),
            CellValue::Char(c) => write!(f, "{}", c),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Long(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Double(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
            CellValue::Time(t) => write!(f, "{}", t),
            CellValue::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Long(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Float(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Double(n)
    }
}

impl From<char> for CellValue {
    fn from(c: char) -> Self {
        CellValue::Char(c)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveTime> for CellValue {
    fn from(t: NaiveTime) -> Self {
        CellValue::Time(t)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
