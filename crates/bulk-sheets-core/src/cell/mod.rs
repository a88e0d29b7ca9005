//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`Cell`] - A pooled, reusable cell slot
//! - [`CellRefBuffer`] - Scratch context for A1-style references

mod address;
mod slot;
mod value;

pub use address::{column_to_letters, CellRefBuffer};
pub use slot::Cell;
pub use value::CellValue;
