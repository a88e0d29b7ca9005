//! Tests that stream workbooks into XLSX archives and inspect the parts.

mod cells;
mod package;
mod pagination;
mod shared_strings;
