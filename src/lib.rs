//! # shipsheet
//!
//! Convert PDF shipping reports into styled Excel workbooks.
//!
//! The library reads the drop-off report PDF, recognizes package entries
//! and summary tables by their layout, and writes one sheet per report
//! section with a styled header row.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> shipsheet::Result<()> {
//!     let report = shipsheet::convert_file("ActiveReports Document.pdf")?;
//!     println!("Excel file created: {}", report.output_path.display());
//!     println!("Total packages extracted: {}", report.package_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`ShipmentExtractor`] reads every page once, in order, and returns an
//!   [`ExtractionResult`]. Unparseable entry lines are skipped and recorded.
//! - [`Exporter`] writes the result using an immutable [`WorkbookSpec`].
//! - Progress is reported as [`ProgressEvent`]s through a [`ProgressSink`]
//!   (a closure or a channel); the pipeline knows nothing about any UI.

pub mod convert;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod progress;

// Re-export commonly used types
pub use convert::{ConversionReport, ConvertOptions, OutputTarget};
pub use error::{Error, Result, Warning};
pub use export::{
    to_json, ColumnSpec, ExportSummary, Exporter, HeaderStyle, JsonFormat, SheetSpec, WorkbookSpec,
};
pub use model::{
    ExtractionResult, FieldValue, RecordTable, ReportInfo, SheetKind, ShipmentRecord, SkippedLine,
};
pub use parser::{ErrorMode, ExtractOptions, PdfBackend, PlainTextBackend, ShipmentExtractor};
pub use progress::{CancelToken, ChannelSink, NoProgress, ProgressEvent, ProgressSink};

use std::path::{Path, PathBuf};

/// Extract shipment records from a PDF file.
///
/// # Example
///
/// ```no_run
/// use shipsheet::{extract_file, SheetKind};
///
/// let result = extract_file("report.pdf").unwrap();
/// println!("Drop-off packages: {}", result.records(SheetKind::DropOff).len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    ShipmentExtractor::open(path)?.extract()
}

/// Extract shipment records from a PDF file with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    ShipmentExtractor::open_with_options(path, options)?.extract()
}

/// Extract shipment records from PDF bytes.
pub fn extract_bytes(data: &[u8]) -> Result<ExtractionResult> {
    ShipmentExtractor::from_bytes(data)?.extract()
}

/// Write an extraction result to `path` with the standard layout.
///
/// An empty result still produces a valid, header-only workbook.
pub fn export_workbook<P: AsRef<Path>>(result: &ExtractionResult, path: P) -> Result<ExportSummary> {
    Exporter::default().export(result, path.as_ref())
}

/// Convert a PDF into a workbook next to it.
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConversionReport> {
    Converter::new().convert(path)
}

/// Convert a PDF into a workbook next to it, reporting progress to `sink`.
pub fn convert_file_with_progress<P: AsRef<Path>>(
    path: P,
    sink: &mut dyn ProgressSink,
) -> Result<ConversionReport> {
    Converter::new().convert_with_progress(path, sink)
}

/// Run a conversion on tokio's blocking pool, forwarding progress over `sink`.
///
/// Lets an async event loop stay responsive while the synchronous pipeline
/// runs.
#[cfg(feature = "async")]
pub async fn convert_file_async(
    path: PathBuf,
    converter: Converter,
    mut sink: ChannelSink,
) -> Result<ConversionReport> {
    tokio::task::spawn_blocking(move || converter.convert_with_progress(&path, &mut sink))
        .await
        .map_err(|e| Error::Other(format!("conversion task failed: {}", e)))?
}

/// Builder for converting PDF shipping reports.
///
/// # Example
///
/// ```no_run
/// use shipsheet::Converter;
///
/// let report = Converter::new()
///     .lenient()
///     .with_output_dir("./exports")
///     .convert("report.pdf")?;
/// println!("{}", report.output_path.display());
/// # Ok::<(), shipsheet::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a new converter with the standard layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat unreadable pages as empty instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options.extract = self.options.extract.lenient();
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.options.extract = options;
        self
    }

    /// Set the workbook layout.
    pub fn with_workbook_spec(mut self, spec: WorkbookSpec) -> Self {
        self.options.workbook = spec;
        self
    }

    /// Write the workbook into `dir` under its default name.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.output = OutputTarget::Directory(dir.into());
        self
    }

    /// Write the workbook to exactly `path`.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = OutputTarget::File(path.into());
        self
    }

    /// Stop before the next page once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.options.extract = self.options.extract.with_cancel(token);
        self
    }

    /// The accumulated options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a PDF file.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConversionReport> {
        self.convert_with_progress(path, &mut NoProgress)
    }

    /// Convert a PDF file, reporting progress to `sink`.
    pub fn convert_with_progress<P: AsRef<Path>>(
        &self,
        path: P,
        sink: &mut dyn ProgressSink,
    ) -> Result<ConversionReport> {
        convert::convert(path.as_ref(), &self.options, sink)
    }
}
