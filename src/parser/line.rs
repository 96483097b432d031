//! Package line parsing.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::model::{FieldValue, ShipmentRecord};

use super::services::ServiceTypes;

/// Date layouts seen in the pickup date column.
///
/// Two-digit years come first: chrono's `%Y` also accepts `25` and would
/// read it as year 25.
const DATE_FORMATS: &[&str] = &[
    "%b %d %y",
    "%d %b %y",
    "%m/%d/%y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%Y-%m-%d",
];

/// Years a workbook date cell can hold.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Outcome of parsing one line of a package section.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A complete package entry
    Record(ShipmentRecord),
    /// The line carries a tracking number but is not a complete entry
    Partial(String),
    /// Headers, footers and other text
    Noise,
}

/// Parse a package line into a record.
///
/// Layout: `<time> AM|PM <pickup date, up to 3 words> <customer> <service>
/// <tracking number> <weight>`.
pub fn parse_line(
    line: &str,
    page: u32,
    services: &ServiceTypes,
    tracking_patterns: &[Regex],
) -> LineOutcome {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some(tracking) = find_tracking(&parts, tracking_patterns) else {
        return LineOutcome::Noise;
    };

    if parts.len() < 4 {
        return LineOutcome::Partial(format!(
            "tracking number {} without time, date and weight",
            tracking
        ));
    }

    let Some(time_idx) = parts.iter().position(|p| *p == "AM" || *p == "PM") else {
        return LineOutcome::Partial(format!("tracking number {} without AM/PM time", tracking));
    };

    let time = parts[..=time_idx].join(" ");
    let date_parts = date_parts(&parts, time_idx);
    let pickup_date = date_parts.join(" ");
    let weight = weight(&parts);

    let customer_start = time_idx + 1 + date_parts.len();
    let customer_end = parts.iter().position(|p| *p == tracking).unwrap_or(0);
    let combined = if customer_end > customer_start {
        parts[customer_start..customer_end].join(" ")
    } else {
        String::new()
    };
    let (customer, service) = services.split(&combined);

    LineOutcome::Record(
        ShipmentRecord::new(page)
            .with("Time", time)
            .with("Pickup Date", pickup_date_value(&pickup_date))
            .with("Customer", customer)
            .with("Service", service)
            .with("Tracking Number", tracking)
            .with("Weight", weight),
    )
}

/// First token matching a tracking pattern; patterns are tried in order.
fn find_tracking<'a>(parts: &[&'a str], patterns: &[Regex]) -> Option<&'a str> {
    patterns
        .iter()
        .find_map(|re| parts.iter().find(|p| re.is_match(p)).copied())
}

/// Up to three words after the time, stopping at a tracking number.
fn date_parts<'a>(parts: &[&'a str], time_idx: usize) -> Vec<&'a str> {
    parts
        .iter()
        .skip(time_idx + 1)
        .take(3)
        .take_while(|p| !(p.starts_with("1Z") || p.starts_with("HR")))
        .copied()
        .collect()
}

/// Last word, or `<weight> ManWt|Com` when the weight was entered manually.
fn weight(parts: &[&str]) -> String {
    let last = parts[parts.len() - 1];
    if last != "ManWt" && last != "Com" {
        return last.to_string();
    }
    match parts.len().checked_sub(2).map(|i| parts[i]) {
        Some(prev) if prev.contains("lb") || prev.contains("kg") || prev == "N/A" => {
            format!("{} {}", prev, last)
        }
        _ => "N/A".to_string(),
    }
}

fn pickup_date_value(text: &str) -> FieldValue {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .filter(|date| YEAR_RANGE.contains(&date.year()))
        .map(FieldValue::Date)
        .unwrap_or_else(|| FieldValue::text(text))
}
