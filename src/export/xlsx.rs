//! XLSX workbook writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{
    Color, ExcelDateTime, Format, FormatAlign, FormatPattern, Workbook, Worksheet, XlsxError,
};

use crate::error::{Error, Result};
use crate::model::{ExtractionResult, FieldValue, ShipmentRecord};

use super::spec::{HeaderStyle, SheetSpec, WorkbookSpec};

/// What the exporter wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Output file (empty when exported to a buffer)
    pub path: PathBuf,
    /// Sheet names with their data row counts, in workbook order
    pub sheets: Vec<(String, usize)>,
    /// Total data rows
    pub rows: usize,
    /// No records were available; every sheet was written header-only
    pub empty_input: bool,
}

/// Writes extraction results as styled workbooks.
#[derive(Debug, Clone)]
pub struct Exporter {
    spec: WorkbookSpec,
}

impl Exporter {
    /// Create an exporter for a validated layout.
    pub fn new(spec: WorkbookSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    /// The layout in use.
    pub fn spec(&self) -> &WorkbookSpec {
        &self.spec
    }

    /// Write `result` to `path`.
    ///
    /// The workbook is assembled in memory and persisted through a temporary
    /// file in the destination directory, so a failed write leaves no
    /// partial file at `path`.
    pub fn export(&self, result: &ExtractionResult, path: &Path) -> Result<ExportSummary> {
        let (bytes, mut summary) = self.to_bytes(result).map_err(|e| match e {
            Error::WriteFailure { reason, .. } => Error::write_failure(path, reason),
            other => other,
        })?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(".shipsheet-")
            .suffix(".xlsx")
            .tempfile_in(dir)
            .map_err(|e| Error::write_failure(path, e))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.flush())
            .map_err(|e| Error::write_failure(path, e))?;
        tmp.persist(path)
            .map_err(|e| Error::write_failure(path, e.error))?;

        log::info!("Wrote {} rows to {}", summary.rows, path.display());
        summary.path = path.to_path_buf();
        Ok(summary)
    }

    /// Serialize `result` into XLSX bytes.
    pub fn to_bytes(&self, result: &ExtractionResult) -> Result<(Vec<u8>, ExportSummary)> {
        let selected: Vec<&SheetSpec> = self
            .spec
            .sheets
            .iter()
            .filter(|s| self.spec.keep_empty_sheets || !result.records(s.source).is_empty())
            .collect();

        let empty_input = selected
            .iter()
            .all(|s| result.records(s.source).is_empty());
        let sheets: Vec<&SheetSpec> = if empty_input {
            log::warn!("No records to export; writing header-only workbook");
            self.spec.sheets.iter().collect()
        } else {
            selected
        };

        let header_format = header_format(&self.spec.header);
        let date_format = Format::new().set_num_format(&self.spec.date_format);

        let mut workbook = Workbook::new();
        let mut written = Vec::with_capacity(sheets.len());

        for sheet in sheets {
            let records = result.records(sheet.source);
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, sheet, records, &header_format, &date_format)
                .map_err(|e| Error::write_failure("", e))?;
            log::debug!("Sheet '{}': {} rows", sheet.name, records.len());
            written.push((sheet.name.clone(), records.len()));
        }

        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| Error::write_failure("", e))?;

        let rows = written.iter().map(|(_, n)| n).sum();
        Ok((
            bytes,
            ExportSummary {
                path: PathBuf::new(),
                sheets: written,
                rows,
                empty_input,
            },
        ))
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            spec: WorkbookSpec::shipping_report(),
        }
    }
}

fn header_format(style: &HeaderStyle) -> Format {
    let mut format = Format::new()
        .set_font_color(Color::RGB(style.font_color))
        .set_background_color(Color::RGB(style.fill_color))
        .set_pattern(FormatPattern::Solid);
    if style.bold {
        format = format.set_bold();
    }
    if style.centered {
        format = format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
    }
    format
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetSpec,
    records: &[ShipmentRecord],
    header_format: &Format,
    date_format: &Format,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(&sheet.name)?;

    for (col, column) in sheet.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, &column.name, header_format)?;
        worksheet.set_column_width(col, column.width)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, column) in sheet.columns.iter().enumerate() {
            let col = col as u16;
            match record.get(&column.name) {
                None | Some(FieldValue::Empty) => {}
                Some(FieldValue::Text(s)) => {
                    worksheet.write_string(row, col, s)?;
                }
                Some(FieldValue::Integer(n)) => {
                    worksheet.write_number(row, col, *n as f64)?;
                }
                Some(FieldValue::Number(n)) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Some(FieldValue::Date(d)) => match excel_date(d) {
                    Some(date) => {
                        worksheet.write_datetime_with_format(row, col, &date, date_format)?;
                    }
                    None => {
                        log::debug!("Date {} outside Excel range, written as text", d);
                        worksheet.write_string(row, col, d.to_string())?;
                    }
                },
            }
        }
    }

    Ok(())
}

/// Excel serial dates only cover years 1900 through 9999.
fn excel_date(date: &NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}
