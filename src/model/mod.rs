//! Data model shared by the extractor and the exporter.
//!
//! The extractor produces an [`ExtractionResult`]: one [`RecordTable`] per
//! report section, each holding [`ShipmentRecord`]s in document order. The
//! exporter only reads these types.

mod extraction;
mod record;
mod sheet;

pub use extraction::{ExtractionResult, RecordTable, ReportInfo, SkippedLine};
pub use record::{FieldValue, ShipmentRecord};
pub use sheet::{SheetKind, PACKAGE_FIELDS, SUMMARY_FIELDS};
