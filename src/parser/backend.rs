//! PDF backend abstraction layer.
//!
//! The extractor only needs page enumeration and per-page text. This trait
//! isolates the concrete PDF library (lopdf) from the field heuristics, and
//! lets text that was obtained elsewhere be fed through the same pipeline.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_pdf_path;
use crate::error::{Error, Result};

/// Abstract interface for reading page text.
pub trait PdfBackend {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text of a page (1-indexed), lines separated by `\n`.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    page_numbers: Vec<u32>,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_pdf_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            other => Error::UnreadableDocument(format!("{}: {}", path.display(), other)),
        })?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        crate::detect::detect_pdf_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; page text may be unreadable");
        }
        let page_numbers = doc.get_pages().keys().copied().collect();
        Ok(Self { doc, page_numbers })
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.page_numbers.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let number = page
            .checked_sub(1)
            .and_then(|i| self.page_numbers.get(i as usize))
            .copied()
            .ok_or_else(|| Error::PageText {
                page,
                reason: format!("document has {} pages", self.page_count()),
            })?;

        self.doc
            .extract_text(&[number])
            .map_err(|e| Error::PageText {
                page,
                reason: e.to_string(),
            })
    }
}

/// [`PdfBackend`] over text that has already been extracted, one string per page.
#[derive(Debug, Clone, Default)]
pub struct PlainTextBackend {
    pages: Vec<String>,
}

impl PlainTextBackend {
    /// Create a backend from page texts in page order.
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PdfBackend for PlainTextBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or_else(|| Error::PageText {
                page,
                reason: format!("document has {} pages", self.pages.len()),
            })
    }
}
