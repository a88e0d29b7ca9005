//! Worksheet pagination
//!
//! A physical sheet holds at most `max_rows_per_sheet` rows. When a logical
//! sheet's data does not fit, it is split into siblings named
//! `"{base} ({n})"`, each covering a disjoint record range of the same data
//! source, inserted right after the sheet being split. The last sibling in
//! the chain owns the shared source.
//!
//! Two modes exist:
//!
//! - **eager**: the source reports its size up front, so every split point
//!   is computed before the first row is written ([`Workbook::paginate`]);
//! - **incremental**: the fill loop discovers that the page is full while
//!   the source still has records, and splits off the remainder
//!   ([`Workbook::split_page`]).

use log::debug;

use crate::error::{Error, Result};
use crate::workbook::Workbook;
use crate::worksheet::RowRange;
use crate::{MAX_ROWS, MAX_SHEET_NAME_LEN};

/// Data rows that fit on one physical sheet after `header_rows`.
///
/// `limit` is clamped to [`MAX_ROWS`], the most rows a worksheet can hold.
pub fn data_rows_per_page(limit: usize, header_rows: usize) -> Result<usize> {
    let limit = limit.min(MAX_ROWS as usize);
    if header_rows >= limit {
        return Err(Error::InvalidRowLimit { limit, header_rows });
    }
    Ok(limit - header_rows)
}

/// Split `total` records into page ranges.
///
/// `consumed` is the number of rows each physical sheet spends before its
/// first data row and `limit` the physical row limit. An exact multiple of
/// the page size yields full pages only, never a trailing empty one; an
/// empty dataset yields a single empty page.
pub fn plan_pages(total: usize, consumed: usize, limit: usize) -> Result<Vec<RowRange>> {
    let per_page = data_rows_per_page(limit, consumed)?;
    if total <= per_page {
        return Ok(vec![RowRange::bounded(0, total)]);
    }

    let mut pages = Vec::with_capacity((total + per_page - 1) / per_page);
    let mut start = 0;
    while start < total {
        let end = (start + per_page).min(total);
        pages.push(RowRange::bounded(start, end));
        start = end;
    }
    Ok(pages)
}

/// Split a trailing `" (k)"` suffix off a sheet name
pub fn split_suffix(name: &str) -> (&str, Option<usize>) {
    let Some(inner) = name.strip_suffix(')') else {
        return (name, None);
    };
    let Some(open) = inner.rfind('(') else {
        return (name, None);
    };
    let digits = &inner[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (name, None);
    }
    match digits.parse::<usize>() {
        Ok(k) => (inner[..open].trim_end(), Some(k)),
        Err(_) => (name, None),
    }
}

/// Format a sibling name, shortening the base so the result fits Excel's limit
pub fn page_name(base: &str, n: usize) -> String {
    let suffix = format!(" ({})", n);
    let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
    let base: String = base.chars().take(room).collect();
    format!("{}{}", base.trim_end(), suffix)
}

/// Hands out sibling names for one pagination chain
#[derive(Debug, Clone)]
pub struct SheetPaginator {
    base: String,
    next: usize,
}

impl SheetPaginator {
    /// Start numbering after any `"(k)"` suffix already on `name`
    pub fn new(name: &str) -> Self {
        let (base, k) = split_suffix(name);
        Self {
            base: base.to_string(),
            next: k.map_or(1, |k| k + 1),
        }
    }

    /// Next name not rejected by `taken`
    pub fn next_name<F>(&mut self, taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let name = page_name(&self.base, self.next);
            self.next += 1;
            if !taken(&name) {
                return name;
            }
        }
    }
}

impl Workbook {
    /// Eagerly paginate the sheet at `position` if its source knows its size.
    ///
    /// Fixes the sheet's range to the first page and inserts one sibling per
    /// remaining page directly after it. Returns the number of siblings added.
    /// Sheets that already have a fixed range, or whose source cannot report
    /// its size, are left alone.
    pub fn paginate(&mut self, position: usize) -> Result<usize> {
        let count = self.sheet_count();
        let sheet = self
            .worksheet(position)
            .ok_or(Error::SheetOutOfBounds(position, count))?;
        if sheet.range().end.is_some() {
            return Ok(0);
        }
        let Some(size) = self.sources().data_size(sheet.source())? else {
            return Ok(0);
        };

        let start = sheet.range().start;
        let limit = self.settings().max_rows_per_sheet;
        let pages = plan_pages(size.saturating_sub(start), sheet.header_rows(), limit)?;
        let mut pages = pages.into_iter().map(|r| r.offset(start));

        if let Some(first) = pages.next() {
            if let Some(sheet) = self.worksheet_mut(position) {
                sheet.set_range(first);
            }
        }

        let mut paginator = SheetPaginator::new(self.sheets_name(position));
        let mut insert_at = position + 1;
        for range in pages {
            let name = paginator.next_name(|n| self.contains_name(n));
            let sibling = self.sheet_at(position)?.page_clone(name, range);
            self.insert_sheet(insert_at, sibling)?;
            insert_at += 1;
        }

        let added = insert_at - position - 1;
        if added > 0 {
            self.transfer_ownership(position, insert_at - 1)?;
            debug!(
                "paginated sheet '{}' into {} pages ({} records, limit {})",
                self.sheets_name(position),
                added + 1,
                size - start,
                limit
            );
        }
        Ok(added)
    }

    /// Split the sheet at `position` so that it ends before record `next_start`.
    ///
    /// The remainder (up to the sheet's previous end) becomes a sibling
    /// inserted at `position + 1`, and ownership of the source moves to it.
    /// Returns the sibling's position.
    pub fn split_page(&mut self, position: usize, next_start: usize) -> Result<usize> {
        let sheet = self.sheet_at(position)?;
        let range = sheet.range();
        if next_start < range.start || range.end.map_or(false, |end| next_start > end) {
            return Err(Error::other(format!(
                "split point {} outside sheet range {:?}",
                next_start, range
            )));
        }

        let mut paginator = SheetPaginator::new(sheet.name());
        let name = paginator.next_name(|n| self.contains_name(n));
        let sibling = self.sheet_at(position)?.page_clone(
            name,
            RowRange {
                start: next_start,
                end: range.end,
            },
        );

        if let Some(sheet) = self.worksheet_mut(position) {
            sheet.set_range(RowRange::bounded(range.start, next_start));
        }
        self.insert_sheet(position + 1, sibling)?;
        self.transfer_ownership(position, position + 1)?;

        debug!(
            "split sheet '{}' at record {}, continuing on '{}'",
            self.sheets_name(position),
            next_start,
            self.sheets_name(position + 1)
        );
        Ok(position + 1)
    }

    /// Move source ownership from one sheet of a chain to another
    fn transfer_ownership(&mut self, from: usize, to: usize) -> Result<()> {
        let owned = self.sheet_at(from)?.owns_shared_resources();
        if let Some(sheet) = self.worksheet_mut(from) {
            sheet.set_owns_shared_resources(false);
        }
        if let Some(sheet) = self.worksheet_mut(to) {
            sheet.set_owns_shared_resources(owned);
        }
        Ok(())
    }

    fn sheet_at(&self, position: usize) -> Result<&crate::Worksheet> {
        self.worksheet(position)
            .ok_or(Error::SheetOutOfBounds(position, self.sheet_count()))
    }

    fn sheets_name(&self, position: usize) -> &str {
        self.worksheet(position).map(|s| s.name()).unwrap_or_default()
    }
}
