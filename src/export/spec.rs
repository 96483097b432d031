//! Workbook layout: sheets, columns and header styling.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::SheetKind;

/// Narrow column width used by the drop-off sheet.
pub const COLUMN_WIDTH_NARROW: f64 = 20.0;

/// Column width used by every other sheet.
pub const COLUMN_WIDTH_WIDE: f64 = 25.0;

const MAX_SHEET_NAME_LEN: usize = 31;
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Styling of the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStyle {
    /// Font color as 0xRRGGBB
    pub font_color: u32,
    /// Solid fill color as 0xRRGGBB
    pub fill_color: u32,
    /// Bold font
    pub bold: bool,
    /// Center horizontally and vertically
    pub centered: bool,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            font_color: 0xFFFFFF,
            fill_color: 0x4472C4,
            bold: true,
            centered: true,
        }
    }
}

/// One output column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Header text; also the record field written into the column
    pub name: String,
    /// Column width in character units
    pub width: f64,
}

/// One output sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSpec {
    /// Sheet tab name
    pub name: String,
    /// Which records fill the sheet
    pub source: SheetKind,
    /// Columns in order
    pub columns: Vec<ColumnSpec>,
}

impl SheetSpec {
    /// Create a sheet without columns.
    pub fn new(name: impl Into<String>, source: SheetKind) -> Self {
        Self {
            name: name.into(),
            source,
            columns: Vec::new(),
        }
    }

    /// Sheet named after `source` with its standard field set, all columns `width` wide.
    pub fn standard(source: SheetKind, width: f64) -> Self {
        source
            .fields()
            .iter()
            .fold(Self::new(source.title(), source), |sheet, field| {
                sheet.column(*field, width)
            })
    }

    /// Append a column.
    pub fn column(mut self, name: impl Into<String>, width: f64) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            width,
        });
        self
    }

    /// Column header names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Output schema of the workbook.
///
/// Static configuration handed to the exporter; nothing in it is derived
/// from the input document.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSpec {
    /// Sheets in order
    pub sheets: Vec<SheetSpec>,
    /// Header row style
    pub header: HeaderStyle,
    /// Excel number format for date cells
    pub date_format: String,
    /// Write sheets whose source section has no records
    pub keep_empty_sheets: bool,
}

impl WorkbookSpec {
    /// Create a spec without sheets.
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            header: HeaderStyle::default(),
            date_format: "dd-mm-yyyy".to_string(),
            keep_empty_sheets: false,
        }
    }

    /// Layout of the shipping report workbook.
    pub fn shipping_report() -> Self {
        SheetKind::ALL.iter().fold(Self::new(), |spec, kind| {
            let width = if *kind == SheetKind::DropOff {
                COLUMN_WIDTH_NARROW
            } else {
                COLUMN_WIDTH_WIDE
            };
            spec.with_sheet(SheetSpec::standard(*kind, width))
        })
    }

    /// Append a sheet.
    pub fn with_sheet(mut self, sheet: SheetSpec) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Set the header style.
    pub fn with_header_style(mut self, header: HeaderStyle) -> Self {
        self.header = header;
        self
    }

    /// Set the date number format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Write sheets even when their section is empty.
    pub fn with_empty_sheets(mut self, keep: bool) -> Self {
        self.keep_empty_sheets = keep;
        self
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Check the layout can be written as a workbook.
    pub fn validate(&self) -> Result<()> {
        if self.sheets.is_empty() {
            return Err(Error::InvalidSpec("no sheets defined".to_string()));
        }

        let mut seen = HashSet::new();
        for sheet in &self.sheets {
            let name = sheet.name.as_str();
            if name.trim().is_empty() {
                return Err(Error::InvalidSpec("empty sheet name".to_string()));
            }
            if name.chars().count() > MAX_SHEET_NAME_LEN {
                return Err(Error::InvalidSpec(format!(
                    "sheet name '{}' exceeds {} characters",
                    name, MAX_SHEET_NAME_LEN
                )));
            }
            if name.contains(INVALID_SHEET_CHARS) {
                return Err(Error::InvalidSpec(format!(
                    "sheet name '{}' contains one of []:*?/\\",
                    name
                )));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(Error::InvalidSpec(format!("duplicate sheet name '{}'", name)));
            }
            if sheet.columns.is_empty() {
                return Err(Error::InvalidSpec(format!("sheet '{}' has no columns", name)));
            }
        }

        Ok(())
    }
}

impl Default for WorkbookSpec {
    fn default() -> Self {
        Self::shipping_report()
    }
}
