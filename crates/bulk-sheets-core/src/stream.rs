//! Streaming write loop
//!
//! [`stream_workbook`] walks the sheet list in order and, for each sheet,
//! repeatedly fills a [`RowBlock`] from the sheet's data source and hands it
//! to a [`SheetSink`]. Only one block of rows (plus whatever batch the source
//! fetched) is resident at a time. Pagination happens on the way: eagerly
//! before the first row when the source knows its size, incrementally when a
//! page fills up while the source still has records.

use std::result::Result as StdResult;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::paginate::data_rows_per_page;
use crate::row_block::RowBlock;
use crate::workbook::Workbook;
use crate::worksheet::{RowRange, Worksheet};

/// Consumer of materialized rows, one physical sheet at a time
pub trait SheetSink {
    /// Error type of the sink; core errors must convert into it
    type Error: From<Error>;

    /// A new physical sheet starts at `position` in the sheet list
    fn begin_sheet(&mut self, position: usize, sheet: &Worksheet) -> StdResult<(), Self::Error>;

    /// Serialize the flipped rows of `block`
    fn write_rows(&mut self, sheet: &Worksheet, block: &mut RowBlock)
        -> StdResult<(), Self::Error>;

    /// The sheet at `position` is complete after `rows` physical rows
    fn end_sheet(&mut self, position: usize, sheet: &Worksheet, rows: u64)
        -> StdResult<(), Self::Error>;
}

/// Totals collected while streaming a workbook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Physical sheets written
    pub sheets: usize,
    /// Physical rows written, header rows included
    pub rows: u64,
    /// Data records written
    pub records: u64,
    /// Siblings created by pagination
    pub pages_added: usize,
}

/// Write every sheet of `workbook` into `sink`.
///
/// Data sources are released by their owning sheet as soon as it completes.
pub fn stream_workbook<S>(workbook: &mut Workbook, sink: &mut S) -> StdResult<StreamStats, S::Error>
where
    S: SheetSink,
{
    let mut stats = StreamStats::default();
    let mut position = 0;

    // Siblings inserted by pagination land after `position`, so the sheet
    // count is re-read on every iteration.
    while position < workbook.sheet_count() {
        stats.pages_added += workbook.paginate(position)?;
        write_sheet(workbook, position, sink, &mut stats)?;
        stats.sheets += 1;
        position += 1;
    }

    debug!(
        "streamed {} sheets, {} rows ({} records)",
        stats.sheets, stats.rows, stats.records
    );
    Ok(stats)
}

fn sheet_at(workbook: &Workbook, position: usize) -> Result<&Worksheet> {
    workbook
        .worksheet(position)
        .ok_or(Error::SheetOutOfBounds(position, workbook.sheet_count()))
}

fn write_sheet<S>(
    workbook: &mut Workbook,
    position: usize,
    sink: &mut S,
    stats: &mut StreamStats,
) -> StdResult<(), S::Error>
where
    S: SheetSink,
{
    let limit = workbook.settings().max_rows_per_sheet;
    let block_size = workbook.settings().row_block_size;

    let sheet = sheet_at(workbook, position)?;
    workbook.validate_columns(sheet.width())?;
    let header_rows = sheet.header_rows();
    let per_page = data_rows_per_page(limit, header_rows)?;
    let source = sheet.source();
    let range = sheet.range();

    sink.begin_sheet(position, sheet)?;

    let mut block = RowBlock::new(block_size, sheet.width());
    if header_rows > 0 {
        let row = block.next_row();
        row.index = 0;
        for (cell, column) in row.cells_mut().iter_mut().zip(sheet.columns()) {
            match &column.header {
                Some(text) => cell.set_string(text),
                None => cell.clear(),
            }
        }
    }

    let mut next = range.start;
    let mut data_rows = 0usize;
    let at_page_end = |next: usize, data_rows: usize| {
        data_rows >= per_page || range.end.map_or(false, |end| next >= end)
    };

    loop {
        let slot = workbook.sources_mut().slot_mut(source)?;
        while !block.is_full() && !at_page_end(next, data_rows) {
            let Some(record) = slot.record(next)? else {
                break;
            };
            let row = block.next_row();
            row.index = (header_rows + data_rows) as u32;
            row.fill_from(record);
            next += 1;
            data_rows += 1;
        }
        let finished = at_page_end(next, data_rows) || !slot.has_record(next)?;
        slot.compact(next);

        block.flip();
        if finished {
            block.mark_eof();
        }
        if !block.is_empty() {
            trace!("sheet #{}: writing {} rows", position, block.len());
            sink.write_rows(sheet_at(workbook, position)?, &mut block)?;
        }
        if finished {
            break;
        }
        block.clear();
    }

    // A full page on an open-ended range with records left over continues
    // on a new sibling; otherwise the range is closed where the data ended.
    if sheet_at(workbook, position)?.range().end.is_none() {
        let more =
            data_rows >= per_page && workbook.sources_mut().slot_mut(source)?.has_record(next)?;
        if more {
            workbook.split_page(position, next)?;
            stats.pages_added += 1;
        } else if let Some(sheet) = workbook.worksheet_mut(position) {
            sheet.set_range(RowRange::bounded(range.start, next));
        }
    }

    let rows = block.total_emitted();
    let sheet = sheet_at(workbook, position)?;
    sink.end_sheet(position, sheet, rows)?;
    stats.rows += rows;
    stats.records += data_rows as u64;

    if sheet.owns_shared_resources() {
        workbook.sources_mut().release(source)?;
        debug!("released data source #{} after sheet #{}", source.index(), position);
    }
    Ok(())
}
