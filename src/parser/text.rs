//! Joined document text with page boundaries.

use unicode_normalization::UnicodeNormalization;

/// Text of every page joined with `\n`, remembering where each page starts.
///
/// Section patterns run over the whole text because a section can continue
/// across page breaks; byte offsets map back to page numbers for reporting.
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
    text: String,
    page_starts: Vec<usize>,
}

impl DocumentText {
    /// Create empty document text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from page texts in page order.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = Self::new();
        for page in pages {
            text.push_page(page.as_ref());
        }
        text
    }

    /// Append the next page.
    pub fn push_page(&mut self, page: &str) {
        if !self.page_starts.is_empty() {
            self.text.push('\n');
        }
        self.page_starts.push(self.text.len());
        self.text.push_str(page);
    }

    /// The joined text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of pages pushed.
    pub fn page_count(&self) -> u32 {
        self.page_starts.len() as u32
    }

    /// Text of a single page (1-indexed).
    pub fn page(&self, page: u32) -> Option<&str> {
        let index = (page as usize).checked_sub(1)?;
        let start = *self.page_starts.get(index)?;
        let end = self
            .page_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        self.text.get(start..end)
    }

    /// 1-indexed page containing the byte at `offset`.
    pub fn page_at(&self, offset: usize) -> u32 {
        self.page_starts
            .partition_point(|&start| start <= offset)
            .max(1) as u32
    }

    /// Iterate over lines of `self.as_str()[start..end]` with their absolute byte offsets.
    pub fn lines_in(&self, start: usize, end: usize) -> impl Iterator<Item = (usize, &str)> {
        let body = self.text.get(start..end).unwrap_or("");
        body.split('\n').scan(start, |offset, line| {
            let at = *offset;
            *offset += line.len() + 1;
            Some((at, line.trim_end_matches('\r')))
        })
    }
}

/// Normalize page text before pattern matching.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect()
}
