//! Summary table parsing.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{FieldValue, ShipmentRecord};

struct Patterns {
    row: Regex,
    numeric: Regex,
    address: Regex,
    region: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        row: Regex::new(
            r"^(.*?)\s+(\d+)\s+([\d,]+)\s+(\d+)\s+(\d+)\s+([\d,]+)\s*([\d.,]+(?:lb|kg)?)?",
        )
        .expect("valid regex"),
        numeric: Regex::new(r"^[\d.,]+$").expect("valid regex"),
        address: Regex::new(r"^\d+\.\d+\.\d+\.\d+$").expect("valid regex"),
        region: Regex::new(r"^\(\w{2}-\w{2}\)").expect("valid regex"),
    })
}

/// Parse the body of a summary table into rows.
///
/// The weight column is sometimes printed on its own line below the row; a
/// purely numeric line that follows a row is merged back as `<value>lb`.
/// `page` is the page the table body starts on.
pub fn parse_summary(body: &str, page: u32) -> Vec<ShipmentRecord> {
    let p = patterns();
    let lines: Vec<&str> = body.trim().lines().collect();
    let mut rows = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() || line.starts_with("Total:") {
            i += 1;
            continue;
        }
        if p.address.is_match(line) || p.region.is_match(line) {
            i += 1;
            continue;
        }

        let mut merged = line.to_string();
        match lines.get(i + 1).map(|l| l.trim()) {
            Some(next) if p.numeric.is_match(next) && is_weight_value(next) => {
                merged = format!("{} {}lb", line, next);
                i += 2;
            }
            _ => i += 1,
        }

        if let Some(row) = parse_row(&merged, page) {
            rows.push(row);
        }
    }

    rows
}

/// Decimal values and values below 100000 are weights; larger integers are not.
fn is_weight_value(value: &str) -> bool {
    if value.contains('.') {
        return true;
    }
    value
        .replace(',', "")
        .parse::<f64>()
        .is_ok_and(|n| n < 100_000.0)
}

fn parse_row(line: &str, page: u32) -> Option<ShipmentRecord> {
    let caps = patterns().row.captures(line)?;
    let type_desc = caps.get(1)?.as_str().trim();
    if type_desc.is_empty() || type_desc == "Total:" {
        return None;
    }

    let count = |idx: usize| -> FieldValue {
        let raw = caps.get(idx).map(|m| m.as_str()).unwrap_or("");
        FieldValue::Integer(raw.replace(',', "").parse().unwrap_or(0))
    };
    let weight = caps.get(7).map(|m| m.as_str()).unwrap_or("");

    Some(
        ShipmentRecord::new(page)
            .with("Type", type_desc)
            .with("International", count(2))
            .with("Ground", count(3))
            .with("Air", count(4))
            .with("Unknown service, not specified", count(5))
            .with("Total Packages", count(6))
            .with("Weight", weight),
    )
}
