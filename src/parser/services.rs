//! Service type discovery and the customer/service column split.
//!
//! The report prints customer and service in one column. Lines without a
//! customer name show the bare service, so the set of service names is
//! learned from those lines and then used to split the others.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Words a service name starts with.
pub const SERVICE_PREFIXES: &[&str] = &[
    "Ground",
    "Next",
    "2nd",
    "3rd",
    "3 Day",
    "Standard",
    "Worldwide",
    "Express",
    "Economy",
    "Expedited",
];

struct Patterns {
    time: Regex,
    ups_tracking: Regex,
    trailing_noise: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        time: Regex::new(r"\d{1,2}:\d{2} (AM|PM)").expect("valid regex"),
        ups_tracking: Regex::new(r"1Z[A-Z0-9]{16}").expect("valid regex"),
        trailing_noise: Regex::new(r"\s*\d+\.?\d*lb$|\s*1Z[A-Z0-9]+$").expect("valid regex"),
    })
}

/// Known service names, longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTypes {
    names: Vec<String>,
}

impl ServiceTypes {
    /// Build from names; duplicates are removed and the longest names come first.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        let mut names: Vec<String> = unique.into_iter().collect();
        // Stable sort keeps alphabetical order among equal lengths.
        names.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { names }
    }

    /// Collect service names from package lines of the given pages.
    pub fn discover<'a, I>(pages: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let p = patterns();
        let mut candidates = BTreeSet::new();

        for page in pages {
            for line in page.lines() {
                if !(p.time.is_match(line) && p.ups_tracking.is_match(line)) {
                    continue;
                }
                if let Some(candidate) = bare_service_text(line) {
                    if SERVICE_PREFIXES.iter().any(|pre| candidate.starts_with(pre)) {
                        candidates.insert(candidate);
                    }
                }
            }
        }

        let cleaned = candidates
            .into_iter()
            .filter(|s| (4..=50).contains(&s.len()))
            .map(|s| p.trailing_noise.replace(&s, "").trim().to_string())
            .filter(|s| !s.is_empty());

        Self::new(cleaned)
    }

    /// Names, longest first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of known services.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no service is known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Split a combined customer/service column into `(customer, service)`.
    ///
    /// The longest known service that ends the text is split off; without a
    /// match the whole text is the customer.
    pub fn split<'t>(&self, combined: &'t str) -> (&'t str, &'t str) {
        if combined.is_empty() {
            return ("", "");
        }
        for service in &self.names {
            if let Some(customer) = combined.strip_suffix(service.as_str()) {
                let service_part = &combined[customer.len()..];
                return (customer.trim(), service_part);
            }
        }
        (combined, "")
    }
}

/// Words between the pickup date and the tracking number of a package line.
///
/// Mirrors the record layout: time ending in AM/PM, up to three date words,
/// then the customer/service column up to the tracking number.
fn bare_service_text(line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let time_idx = parts.iter().position(|p| *p == "AM" || *p == "PM")?;
    if time_idx == 0 {
        return None;
    }
    let tracking_idx = parts
        .iter()
        .position(|p| p.starts_with("1Z") && p.len() == 18)?;

    let date_start = time_idx + 1;
    let date_end = (date_start + 3).min(parts.len());
    let date_count = parts[date_start..date_end]
        .iter()
        .filter(|p| !p.starts_with("1Z"))
        .count();

    let customer_start = date_start + date_count;
    if tracking_idx > customer_start {
        Some(parts[customer_start..tracking_idx].join(" "))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_from_bare_lines() {
        let page = "\
10:15 AM Oct 01 2025 Ground 1Z999AA10123456784 2.3lb
11:00 AM Oct 01 2025 Next Day Air 1Z999AA10123456785 1.0lb
11:30 AM Oct 01 2025 ACME Corp Ground 1Z999AA10123456786 4lb
no time here Ground 1Z999AA10123456787";
        let services = ServiceTypes::discover([page]);
        assert_eq!(services.names(), &["Next Day Air", "Ground"]);
    }

    #[test]
    fn test_discover_ignores_short_and_unprefixed() {
        let page = "\
9:00 AM Oct 01 2025 Bob 1Z999AA10123456784 2lb
9:05 AM Oct 01 2025 2nd 1Z999AA10123456785 2lb";
        let services = ServiceTypes::discover([page]);
        assert!(services.is_empty());
    }

    #[test]
    fn test_new_orders_longest_first() {
        let services = ServiceTypes::new(["Ground", "Next Day Air", "Express", "Ground"]);
        assert_eq!(services.names(), &["Next Day Air", "Express", "Ground"]);
    }

    #[test]
    fn test_split_customer_service() {
        let services = ServiceTypes::new(["Ground", "Next Day Air Saver", "Next Day Air"]);
        assert_eq!(services.split("ACME Corp Ground"), ("ACME Corp", "Ground"));
        assert_eq!(
            services.split("Jane Doe Next Day Air Saver"),
            ("Jane Doe", "Next Day Air Saver")
        );
        assert_eq!(services.split("Ground"), ("", "Ground"));
        assert_eq!(services.split("Unknown Person"), ("Unknown Person", ""));
        assert_eq!(services.split(""), ("", ""));
    }

    #[test]
    fn test_bare_service_text() {
        assert_eq!(
            bare_service_text("10:15 AM Oct 01 2025 Ground 1Z999AA10123456784 2.3lb").as_deref(),
            Some("Ground")
        );
        assert_eq!(
            bare_service_text("10:15 AM Oct 01 1Z999AA10123456784 2.3lb"),
            None
        );
    }
}
