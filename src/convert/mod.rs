//! The conversion pipeline: extract once, then export once.
//!
//! # Example
//!
//! ```no_run
//! use shipsheet::convert::{convert, ConvertOptions, OutputTarget};
//! use shipsheet::progress::NoProgress;
//! use std::path::Path;
//!
//! fn main() -> shipsheet::Result<()> {
//!     let options = ConvertOptions::new().with_output(OutputTarget::Directory("out".into()));
//!     let report = convert(Path::new("report.pdf"), &options, &mut NoProgress)?;
//!     println!("{}", report.output_path.display());
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, Warning};
use crate::export::{Exporter, WorkbookSpec};
use crate::model::{ExtractionResult, ReportInfo};
use crate::parser::{default_output_path, ExtractOptions, ShipmentExtractor};
use crate::progress::{ProgressEvent, ProgressSink};

/// Where the workbook goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Same directory as the input, default file name
    #[default]
    NextToInput,
    /// Given directory, default file name
    Directory(PathBuf),
    /// Exact file path
    File(PathBuf),
}

impl OutputTarget {
    /// Resolve the output path for `input` once the report header is known.
    pub fn resolve(&self, input: &Path, report: &ReportInfo) -> PathBuf {
        match self {
            OutputTarget::NextToInput => default_output_path(input, report, None),
            OutputTarget::Directory(dir) => default_output_path(input, report, Some(dir)),
            OutputTarget::File(path) => path.clone(),
        }
    }
}

/// Options for one conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub extract: ExtractOptions,

    /// Workbook layout
    pub workbook: WorkbookSpec,

    /// Output location
    pub output: OutputTarget,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set the workbook layout.
    pub fn with_workbook_spec(mut self, spec: WorkbookSpec) -> Self {
        self.workbook = spec;
        self
    }

    /// Set the output location.
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Workbook written
    pub output_path: PathBuf,

    /// Report header info
    pub report: ReportInfo,

    /// Pages in the source document
    pub page_count: u32,

    /// Sheet names with their row counts
    pub sheets: Vec<(String, usize)>,

    /// Package entries across the drop-off sections
    pub package_count: usize,

    /// Non-fatal conditions met on the way
    pub warnings: Vec<Warning>,
}

/// Convert the PDF at `input` into a workbook.
pub fn convert(
    input: &Path,
    options: &ConvertOptions,
    sink: &mut dyn ProgressSink,
) -> Result<ConversionReport> {
    let exporter = Exporter::new(options.workbook.clone())?;

    log::info!("Reading PDF: {}", input.display());
    let extractor = ShipmentExtractor::open_with_options(input, options.extract.clone())?;
    let result = extractor.extract_with_progress(sink)?;

    if let OutputTarget::Directory(dir) = &options.output {
        fs::create_dir_all(dir)?;
    }
    let output_path = options.output.resolve(input, &result.report);
    log::debug!("Output path: {}", output_path.display());
    export_result(&result, &exporter, output_path, sink)
}

/// Export an already extracted result and build the conversion report.
pub fn export_result(
    result: &ExtractionResult,
    exporter: &Exporter,
    output_path: PathBuf,
    sink: &mut dyn ProgressSink,
) -> Result<ConversionReport> {
    let summary = exporter.export(result, &output_path)?;
    sink.emit(&ProgressEvent::WorkbookWritten {
        path: output_path.clone(),
        rows: summary.rows,
    });

    let mut warnings: Vec<Warning> = result
        .skipped
        .iter()
        .map(|s| Warning::PartialRecordSkipped {
            page: s.page,
            reason: s.reason.clone(),
        })
        .collect();
    if summary.empty_input {
        warnings.push(Warning::EmptyInput);
    }

    Ok(ConversionReport {
        output_path,
        report: result.report.clone(),
        page_count: result.page_count,
        sheets: summary.sheets,
        package_count: result.package_count(),
        warnings,
    })
}
