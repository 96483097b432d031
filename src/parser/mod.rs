//! Shipping report parsing: PDF access, section scanning and field heuristics.

mod backend;
mod extractor;
mod line;
mod options;
mod report;
mod sections;
mod services;
mod summary;
mod text;

pub use backend::{LopdfBackend, PdfBackend, PlainTextBackend};
pub use extractor::ShipmentExtractor;
pub use line::{parse_line, LineOutcome};
pub use options::{ErrorMode, ExtractOptions};
pub use report::{default_output_path, detect_report_info, format_date_range, output_file_name};
pub use sections::{ReportSections, SectionEnd, SectionPattern};
pub use services::{ServiceTypes, SERVICE_PREFIXES};
pub use summary::parse_summary;
pub use text::{normalize, DocumentText};
