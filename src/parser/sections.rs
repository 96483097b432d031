//! Locating report sections in the joined document text.
//!
//! A section starts at a header marker and runs up to the first terminator
//! that follows it. The terminator is not consumed, so it can open the next
//! section.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::SheetKind;

/// Where a section body ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd {
    /// A terminator must follow; a start marker without one is ignored
    Required,
    /// The body may run to the end of the text
    EndOfText,
}

/// Start and terminator patterns of one kind of section.
#[derive(Debug, Clone)]
pub struct SectionPattern {
    start: Regex,
    terminator: Regex,
    end: SectionEnd,
    first_only: bool,
}

impl SectionPattern {
    /// Create a pattern. Both expressions are compiled in `(?s)` mode.
    pub fn new(start: &str, terminator: &str, end: SectionEnd) -> Result<Self, regex::Error> {
        Ok(Self {
            start: Regex::new(&format!("(?s){}", start))?,
            terminator: Regex::new(&format!("(?s){}", terminator))?,
            end,
            first_only: false,
        })
    }

    /// Only report the first section found.
    pub fn first_only(mut self) -> Self {
        self.first_only = true;
        self
    }

    /// Byte ranges of every section body in `text`, in document order.
    pub fn bodies(&self, text: &str) -> Vec<Range<usize>> {
        let mut bodies = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(start) = self.start.find_at(text, pos) else {
                break;
            };
            let body_start = start.end();

            let body_end = match self.terminator.find_at(text, body_start) {
                Some(term) => term.start(),
                None if self.end == SectionEnd::EndOfText => text.len(),
                // Later start markers cannot find a terminator either.
                None => break,
            };

            bodies.push(body_start..body_end);
            if self.first_only {
                break;
            }
            // Start markers never match empty, so this always advances.
            pos = body_end.max(start.start() + 1);
        }

        bodies
    }
}

/// Section layouts of the shipping report.
#[derive(Debug)]
pub struct ReportSections {
    /// Package section patterns with the tracking formats valid in each
    pub packages: Vec<(SheetKind, SectionPattern, Vec<Regex>)>,
    /// Summary table patterns
    pub summaries: Vec<(SheetKind, SectionPattern)>,
}

const PAGE_FOOTER: &str = r"Page \d+ of \d+";
const UPS_TRACKING: &str = r"^1Z[A-Z0-9]{16}";
const HR_TRACKING: &str = r"^HR[A-Z0-9]{6,8}-\d{4}-\d+";
const SUMMARY_COLUMNS: &str =
    r"Type\s+International\s+Ground\s+Air\s+.*?Total Packages\s+Weight\s+";

impl ReportSections {
    /// Patterns of the drop-off shipping report.
    pub fn shipping_report() -> &'static ReportSections {
        static SECTIONS: OnceLock<ReportSections> = OnceLock::new();
        SECTIONS.get_or_init(|| Self::build().expect("valid section patterns"))
    }

    fn build() -> Result<Self, regex::Error> {
        let ups = Regex::new(UPS_TRACKING)?;
        let hr = Regex::new(HR_TRACKING)?;

        let drop_off = SectionPattern::new(
            r"(?:Drop Off Packages\s+4x6 Pre-printed Shipping Label|Waybill \(Air/Ground Shipping Doc\)|Return Service \(UPS Only\))\s+Drop Off Date\s+Time Pickup Date Customer Service",
            &format!(
                r"Waybill \(Air/Ground|Return Service \(UPS Only\)|Enhanced Drop Off|Mobile Drop Off|Amazon\s+Drop Off|{}",
                PAGE_FOOTER
            ),
            SectionEnd::Required,
        )?;
        let enhanced = SectionPattern::new(
            r"Enhanced Drop Off Packages",
            &format!(
                r"Enhanced Drop Off Packages|Mobile Drop Off|Summary|{}",
                PAGE_FOOTER
            ),
            SectionEnd::Required,
        )?;
        let mobile = SectionPattern::new(
            r"Mobile Drop Off",
            r"Summary|Kiosk Summary",
            SectionEnd::EndOfText,
        )?;

        let summary = SectionPattern::new(
            &format!(r"Summary\s+Unknown service.*?{}", SUMMARY_COLUMNS),
            &format!(r"Kiosk Summary|{}", PAGE_FOOTER),
            SectionEnd::Required,
        )?
        .first_only();
        let kiosk = SectionPattern::new(
            &format!(r"Kiosk Summary.*?{}", SUMMARY_COLUMNS),
            PAGE_FOOTER,
            SectionEnd::Required,
        )?
        .first_only();

        Ok(Self {
            packages: vec![
                (SheetKind::DropOff, drop_off, vec![ups.clone()]),
                (SheetKind::EnhancedDropOff, enhanced, vec![ups.clone(), hr]),
                (SheetKind::MobileDropOff, mobile, vec![ups]),
            ],
            summaries: vec![(SheetKind::Summary, summary), (SheetKind::KioskSummary, kiosk)],
        })
    }
}
