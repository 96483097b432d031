//! Extraction options and configuration.

use crate::progress::CancelToken;

/// Options for extracting shipment records.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// What to do when a page's text cannot be read
    pub error_mode: ErrorMode,

    /// How many leading pages to scan for service types
    pub service_scan_pages: u32,

    /// How many leading lines of page 1 to scan for the report header
    pub header_scan_lines: usize,

    /// Apply NFKC normalization to page text (folds ligatures, full-width forms)
    pub normalize_text: bool,

    /// Cancellation flag checked before each page
    pub cancel: Option<CancelToken>,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set how many pages are scanned for service types.
    pub fn with_service_scan_pages(mut self, pages: u32) -> Self {
        self.service_scan_pages = pages;
        self
    }

    /// Set how many header lines are scanned for the report date range.
    pub fn with_header_scan_lines(mut self, lines: usize) -> Self {
        self.header_scan_lines = lines;
        self
    }

    /// Enable or disable text normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            service_scan_pages: 30,
            header_scan_lines: 10,
            normalize_text: true,
            cancel: None,
        }
    }
}

/// Error handling mode for page text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any unreadable page
    #[default]
    Strict,
    /// Treat unreadable pages as empty and continue
    Lenient,
}
