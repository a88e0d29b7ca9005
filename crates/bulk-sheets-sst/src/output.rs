//! Encoded shared-string log
//!
//! Every distinct entry is written here once, already encoded as a
//! `<si>` item, so finalizing the string table is a plain copy.

use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::entry::EntryRef;
use crate::error::{IoContext, SstResult};
use crate::xml::{escape_text, needs_preserve, push_code_unit};

/// Temp-file-backed sequence of `<si>` items
#[derive(Debug)]
pub struct OutputLog {
    writer: BufWriter<NamedTempFile>,
    /// Reused encoding buffer
    scratch: String,
    records: u32,
}

impl OutputLog {
    /// Create an empty log in `temp_dir` (or the system temp dir)
    pub fn create(temp_dir: Option<&Path>) -> SstResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bulk-sst-").suffix(".xml");
        let file = match temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("create shared string log")?;

        Ok(Self {
            writer: BufWriter::new(file),
            scratch: String::with_capacity(256),
            records: 0,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    /// Number of items written
    pub fn len(&self) -> u32 {
        self.records
    }

    /// Check if no item has been written
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Append the `<si>` item for `entry`
    pub fn push(&mut self, entry: EntryRef<'_>) -> SstResult<()> {
        self.scratch.clear();
        match entry {
            EntryRef::Text(s) => {
                if needs_preserve(s) {
                    self.scratch.push_str(r#"<si><t xml:space="preserve">"#);
                } else {
                    self.scratch.push_str("<si><t>");
                }
                self.scratch.push_str(&escape_text(s));
                self.scratch.push_str("</t></si>");
            }
            EntryRef::Char(c) => {
                let whitespace = char::from_u32(c as u32).map_or(false, char::is_whitespace);
                if whitespace {
                    self.scratch.push_str(r#"<si><t xml:space="preserve">"#);
                } else {
                    self.scratch.push_str("<si><t>");
                }
                push_code_unit(&mut self.scratch, c);
                self.scratch.push_str("</t></si>");
            }
            EntryRef::Null => self.scratch.push_str("<si><t/></si>"),
        }
        self.writer
            .write_all(self.scratch.as_bytes())
            .context("append to shared string log")?;
        self.records += 1;
        Ok(())
    }

    /// Copy every item written so far into `out`, returning the byte count.
    ///
    /// The log stays usable; later pushes append after the copied items.
    pub fn copy_to<W: Write + ?Sized>(&mut self, out: &mut W) -> SstResult<u64> {
        self.writer.flush().context("flush shared string log")?;
        let file = self.writer.get_mut();
        file.seek(SeekFrom::Start(0))
            .context("rewind shared string log")?;
        let copied = io::copy(file, out).context("copy shared string log")?;
        file.seek(SeekFrom::End(0))
            .context("seek shared string log")?;
        Ok(copied)
    }

    /// Delete the backing file
    pub fn close(self) -> SstResult<()> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("flush shared string log")?;
        file.close().context("remove shared string log")
    }
}
