//! Report sections and the fixed field sets each one produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field names of a package entry, in column order.
pub const PACKAGE_FIELDS: &[&str] = &[
    "Time",
    "Pickup Date",
    "Customer",
    "Service",
    "Tracking Number",
    "Weight",
];

/// Field names of a summary row, in column order.
pub const SUMMARY_FIELDS: &[&str] = &[
    "Type",
    "International",
    "Ground",
    "Air",
    "Unknown service, not specified",
    "Total Packages",
    "Weight",
];

/// A section of the shipping report; each becomes one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    /// Regular drop-off packages (pre-printed labels, waybills, returns)
    DropOff,
    /// Enhanced drop-off packages
    EnhancedDropOff,
    /// Mobile drop-off packages
    MobileDropOff,
    /// Per-type package summary
    Summary,
    /// Kiosk package summary
    KioskSummary,
}

impl SheetKind {
    /// All sections in workbook order.
    pub const ALL: [SheetKind; 5] = [
        SheetKind::DropOff,
        SheetKind::EnhancedDropOff,
        SheetKind::MobileDropOff,
        SheetKind::Summary,
        SheetKind::KioskSummary,
    ];

    /// Section title as printed in the report.
    pub fn title(&self) -> &'static str {
        match self {
            SheetKind::DropOff => "Drop Off Packages",
            SheetKind::EnhancedDropOff => "Enhanced Drop Off Packages",
            SheetKind::MobileDropOff => "Mobile Drop Off",
            SheetKind::Summary => "Summary",
            SheetKind::KioskSummary => "Kiosk Summary",
        }
    }

    /// Whether rows of this section are individual packages.
    pub fn is_package_section(&self) -> bool {
        matches!(
            self,
            SheetKind::DropOff | SheetKind::EnhancedDropOff | SheetKind::MobileDropOff
        )
    }

    /// The field set every record of this section carries.
    pub fn fields(&self) -> &'static [&'static str] {
        if self.is_package_section() {
            PACKAGE_FIELDS
        } else {
            SUMMARY_FIELDS
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_sections() {
        assert!(SheetKind::DropOff.is_package_section());
        assert!(SheetKind::MobileDropOff.is_package_section());
        assert!(!SheetKind::KioskSummary.is_package_section());
        assert_eq!(SheetKind::Summary.fields().len(), 7);
        assert_eq!(SheetKind::EnhancedDropOff.fields()[4], "Tracking Number");
    }

    #[test]
    fn test_titles_are_unique() {
        let mut titles: Vec<_> = SheetKind::ALL.iter().map(|k| k.title()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), SheetKind::ALL.len());
    }
}
