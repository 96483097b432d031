//! The extractor: PDF pages in, shipment records out.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{ExtractionResult, SkippedLine};
use crate::progress::{NoProgress, ProgressEvent, ProgressSink};

use super::backend::{LopdfBackend, PdfBackend};
use super::line::{parse_line, LineOutcome};
use super::options::{ErrorMode, ExtractOptions};
use super::report::detect_report_info;
use super::sections::ReportSections;
use super::services::ServiceTypes;
use super::summary::parse_summary;
use super::text::{normalize, DocumentText};

/// Shipping report extractor.
///
/// Reads every page once, in order, then scans the joined text for report
/// sections. Lines that look like entries but cannot be parsed are skipped
/// and recorded; only unreadable documents and documents without any
/// recognizable entry fail.
pub struct ShipmentExtractor<B = LopdfBackend> {
    backend: B,
    options: ExtractOptions,
}

impl ShipmentExtractor<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }
}

impl<B: PdfBackend> ShipmentExtractor<B> {
    /// Create an extractor over any backend.
    pub fn with_backend(backend: B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    /// Extract without progress reporting.
    pub fn extract(&self) -> Result<ExtractionResult> {
        self.extract_with_progress(&mut NoProgress)
    }

    /// Extract, reporting progress to `sink`.
    pub fn extract_with_progress(&self, sink: &mut dyn ProgressSink) -> Result<ExtractionResult> {
        let text = self.read_pages(sink)?;
        let total = text.page_count();

        let report = detect_report_info(text.page(1).unwrap_or(""), self.options.header_scan_lines);
        sink.emit(&ProgressEvent::ReportDetected {
            title: report.title.clone(),
            date_range: report.date_range.clone(),
        });

        let scan_pages = total.min(self.options.service_scan_pages);
        let services = ServiceTypes::discover((1..=scan_pages).filter_map(|p| text.page(p)));
        log::debug!("Service types: {:?}", services.names());
        sink.emit(&ProgressEvent::ServiceTypesFound {
            count: services.len(),
        });

        let mut result = ExtractionResult::new(report, total);
        let sections = ReportSections::shipping_report();

        for (kind, pattern, tracking) in &sections.packages {
            let mut records = Vec::new();

            for body in pattern.bodies(text.as_str()) {
                for (offset, line) in text.lines_in(body.start, body.end) {
                    let page = text.page_at(offset);
                    match parse_line(line, page, &services, tracking) {
                        LineOutcome::Record(record) => records.push(record),
                        LineOutcome::Partial(reason) => {
                            log::warn!("{}: skipping line on page {}: {}", kind, page, reason);
                            sink.emit(&ProgressEvent::RecordSkipped {
                                page,
                                reason: reason.clone(),
                            });
                            result.skipped.push(SkippedLine {
                                kind: *kind,
                                page,
                                line: line.trim().to_string(),
                                reason,
                            });
                        }
                        LineOutcome::Noise => {}
                    }
                }
            }

            log::debug!("{}: {} records", kind, records.len());
            sink.emit(&ProgressEvent::SectionParsed {
                kind: *kind,
                records: records.len(),
            });
            result.set_records(*kind, records);
        }

        for (kind, pattern) in &sections.summaries {
            let records: Vec<_> = pattern
                .bodies(text.as_str())
                .into_iter()
                .flat_map(|body| {
                    let page = text.page_at(body.start);
                    parse_summary(&text.as_str()[body], page)
                })
                .collect();

            log::debug!("{}: {} rows", kind, records.len());
            sink.emit(&ProgressEvent::SectionParsed {
                kind: *kind,
                records: records.len(),
            });
            result.set_records(*kind, records);
        }

        if result.is_empty() {
            return Err(Error::UnrecognizedLayout { pages: total });
        }

        log::info!(
            "Extracted {} packages and {} summary rows from {} pages ({} lines skipped)",
            result.package_count(),
            result.total_records() - result.package_count(),
            total,
            result.skipped.len()
        );

        Ok(result)
    }

    /// Read all pages in order, honoring cancellation and the error mode.
    fn read_pages(&self, sink: &mut dyn ProgressSink) -> Result<DocumentText> {
        let total = self.backend.page_count();
        sink.emit(&ProgressEvent::DocumentOpened { page_count: total });

        let mut text = DocumentText::new();
        for page in 1..=total {
            if self.options.is_cancelled() {
                log::info!("Extraction cancelled before page {}", page);
                return Err(Error::Cancelled);
            }

            let page_text = match self.backend.page_text(page) {
                Ok(t) => t,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", page, e);
                    String::new()
                }
                Err(e) => return Err(e),
            };

            if self.options.normalize_text {
                text.push_page(&normalize(&page_text));
            } else {
                text.push_page(&page_text);
            }
            sink.emit(&ProgressEvent::PageRead {
                current: page,
                total,
            });
        }

        Ok(text)
    }
}
