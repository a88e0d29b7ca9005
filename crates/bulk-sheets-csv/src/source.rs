//! Incremental CSV data source

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bulk_sheets_core::{CellValue, Column, DataSource, Record};
use log::debug;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;

/// A [`DataSource`] reading records from CSV in batches.
///
/// Records may have differing lengths; the streaming writer pads short ones
/// with blank cells and drops fields past the sheet width.
pub struct CsvSource<R: Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    headers: Option<Vec<String>>,
    peeked: Option<Record>,
    options: CsvReadOptions,
    records_read: u64,
}

impl CsvSource<File> {
    /// Open a CSV file
    pub fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Self> {
        let file = File::open(path.as_ref())?;
        debug!("reading CSV from {}", path.as_ref().display());
        Self::from_reader(file, options)
    }
}

impl<R: Read> CsvSource<R> {
    /// Read CSV from any reader; the header row (if any) is consumed here
    pub fn from_reader(reader: R, options: &CsvReadOptions) -> CsvResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let headers = if options.has_header {
            Some(reader.headers()?.iter().map(str::to_string).collect())
        } else {
            None
        };

        Ok(Self {
            reader,
            record: csv::StringRecord::new(),
            headers,
            peeked: None,
            options: options.clone(),
            records_read: 0,
        })
    }

    /// Header names, when the input has a header row
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Column descriptors for a sheet fed by this source.
    ///
    /// Without a header row the first record is read ahead to learn the
    /// width, and its columns are unnamed.
    pub fn columns(&mut self) -> CsvResult<Vec<Column>> {
        if let Some(headers) = &self.headers {
            return Ok(headers.iter().map(Column::new).collect());
        }
        if self.peeked.is_none() {
            self.peeked = self.read_record()?;
        }
        let width = self.peeked.as_ref().map_or(0, Vec::len);
        Ok((0..width).map(|_| Column::unnamed()).collect())
    }

    /// Data records handed out so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn read_record(&mut self) -> CsvResult<Option<Record>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        let auto_detect = self.options.auto_detect_types;
        let record = self
            .record
            .iter()
            .map(|field| {
                if auto_detect {
                    detect_type(field)
                } else if field.is_empty() {
                    CellValue::Blank
                } else {
                    CellValue::string(field)
                }
            })
            .collect();
        Ok(Some(record))
    }
}

impl<R: Read> DataSource for CsvSource<R> {
    fn fetch_more(&mut self, buf: &mut Vec<Record>) -> bulk_sheets_core::Result<usize> {
        let mut fetched = 0;
        if let Some(record) = self.peeked.take() {
            buf.push(record);
            fetched += 1;
        }
        while fetched < self.options.batch_size.max(1) {
            match self.read_record()? {
                Some(record) => {
                    buf.push(record);
                    fetched += 1;
                }
                None => break,
            }
        }
        self.records_read += fetched as u64;
        Ok(fetched)
    }
}

/// Detect the type of a field value.
///
/// `true`/`false` (any case) become booleans, integers become `Long` and
/// other finite numbers `Double`. Digit strings with a leading zero stay
/// text so identifiers like `007` keep their form.
pub fn detect_type(field: &str) -> CellValue {
    let trimmed = field.trim();

    if trimmed.is_empty() {
        return CellValue::Blank;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }

    let unsigned = trimmed.strip_prefix(&['-', '+'][..]).unwrap_or(trimmed);
    let leading_zero = unsigned.len() > 1
        && unsigned.starts_with('0')
        && unsigned.as_bytes()[1].is_ascii_digit();
    let numeric = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');

    if numeric && !leading_zero {
        if let Ok(n) = trimmed.parse::<i64>() {
            return CellValue::Long(n);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Double(n);
            }
        }
    }

    CellValue::string(field)
}
