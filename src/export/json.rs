//! JSON dump of extraction results.
//!
//! Records are grouped under their sheet title, in workbook order, so the
//! output reads like the workbook it stands in for:
//!
//! ```json
//! {
//!   "report": { "title": "Store 42", "date_range": null },
//!   "page_count": 2,
//!   "package_count": 1,
//!   "sheets": {
//!     "Mobile Drop Off": [ { "page": 1, "Tracking Number": "1Z999AA10123456784" } ]
//!   },
//!   "skipped": { "count": 0, "lines": [] }
//! }
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::model::{ExtractionResult, RecordTable, ReportInfo, SkippedLine};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a ReportInfo,
    page_count: u32,
    package_count: usize,
    sheets: Sheets<'a>,
    skipped: Skipped<'a>,
}

/// Populated tables keyed by sheet title; a plain map would reorder them.
struct Sheets<'a>(&'a [RecordTable]);

impl Serialize for Sheets<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let populated: Vec<&RecordTable> = self.0.iter().filter(|t| !t.records.is_empty()).collect();
        let mut map = serializer.serialize_map(Some(populated.len()))?;
        for table in populated {
            map.serialize_entry(table.kind.title(), &table.records)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Skipped<'a> {
    count: usize,
    lines: &'a [SkippedLine],
}

/// Serialize an extraction result to JSON.
pub fn to_json(result: &ExtractionResult, format: JsonFormat) -> Result<String> {
    let doc = JsonReport {
        report: &result.report,
        page_count: result.page_count,
        package_count: result.package_count(),
        sheets: Sheets(&result.tables),
        skipped: Skipped {
            count: result.skipped.len(),
            lines: &result.skipped,
        },
    };

    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&doc),
        JsonFormat::Compact => serde_json::to_string(&doc),
    };

    json.map_err(|e| Error::Other(format!("JSON serialization error: {}", e)))
}
