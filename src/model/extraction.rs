//! Extraction output: report info, per-section tables and skipped lines.

use super::{SheetKind, ShipmentRecord};
use serde::Serialize;

/// Report header found on the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportInfo {
    /// Header text before the date range (e.g., store name), "Report" if absent
    pub title: String,

    /// Raw date range, e.g. "01 Oct 2025 - 07 Oct 2025"
    pub date_range: Option<String>,
}

impl ReportInfo {
    /// Create report info.
    pub fn new(title: impl Into<String>, date_range: Option<String>) -> Self {
        Self {
            title: title.into(),
            date_range,
        }
    }
}

impl Default for ReportInfo {
    fn default() -> Self {
        Self::new("Report", None)
    }
}

/// Records of one report section, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTable {
    /// Section the records belong to
    pub kind: SheetKind,

    /// Records in document order
    pub records: Vec<ShipmentRecord>,
}

impl RecordTable {
    /// Create an empty table.
    pub fn new(kind: SheetKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A line that looked like a shipment entry but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// Section the line was found in
    pub kind: SheetKind,

    /// 1-indexed page
    pub page: u32,

    /// The raw line
    pub line: String,

    /// Why it was rejected
    pub reason: String,
}

/// Everything the extractor produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Report header info
    pub report: ReportInfo,

    /// Number of pages in the source document
    pub page_count: u32,

    /// One table per section, in workbook order
    pub tables: Vec<RecordTable>,

    /// Lines dropped as partial records
    pub skipped: Vec<SkippedLine>,
}

impl ExtractionResult {
    /// Create a result with an empty table for every section.
    pub fn new(report: ReportInfo, page_count: u32) -> Self {
        Self {
            report,
            page_count,
            tables: SheetKind::ALL.iter().map(|k| RecordTable::new(*k)).collect(),
            skipped: Vec::new(),
        }
    }

    /// Get the table for a section.
    pub fn table(&self, kind: SheetKind) -> Option<&RecordTable> {
        self.tables.iter().find(|t| t.kind == kind)
    }

    /// Records of a section (empty slice if the section is absent).
    pub fn records(&self, kind: SheetKind) -> &[ShipmentRecord] {
        self.table(kind).map(|t| t.records.as_slice()).unwrap_or(&[])
    }

    /// Replace the records of a section, adding the table if needed.
    pub fn set_records(&mut self, kind: SheetKind, records: Vec<ShipmentRecord>) {
        match self.tables.iter_mut().find(|t| t.kind == kind) {
            Some(table) => table.records = records,
            None => self.tables.push(RecordTable { kind, records }),
        }
    }

    /// Number of package entries across the drop-off sections.
    pub fn package_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| t.kind.is_package_section())
            .map(|t| t.len())
            .sum()
    }

    /// Number of records across all sections.
    pub fn total_records(&self) -> usize {
        self.tables.iter().map(|t| t.len()).sum()
    }

    /// Check if no section produced any record.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.is_empty())
    }
}
