//! Workbook export.
//!
//! The [`Exporter`] takes an immutable [`WorkbookSpec`] and writes one sheet
//! per report section: a styled header row, then one row per record in
//! document order. [`to_json`] dumps the same result for inspection.

mod json;
mod spec;
mod xlsx;

pub use json::{to_json, JsonFormat};
pub use spec::{
    ColumnSpec, HeaderStyle, SheetSpec, WorkbookSpec, COLUMN_WIDTH_NARROW, COLUMN_WIDTH_WIDE,
};
pub use xlsx::{ExportSummary, Exporter};
