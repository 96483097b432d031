//! Report header detection and output file naming.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::ReportInfo;

fn date_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+ \w+ \d+ - \d+ \w+ \d+)").expect("valid regex"))
}

/// Find the report title and date range in the first `max_lines` lines of page 1.
///
/// The first line holding a `DD Mon YYYY - DD Mon YYYY` range wins; the text
/// before the range is the title.
pub fn detect_report_info(first_page: &str, max_lines: usize) -> ReportInfo {
    for line in first_page.lines().take(max_lines) {
        if let Some(m) = date_range_re().find(line) {
            let title = line[..m.start()].trim();
            let title = if title.is_empty() { "Report" } else { title };
            return ReportInfo::new(title, Some(m.as_str().to_string()));
        }
    }
    ReportInfo::default()
}

/// Reformat `DD Mon YYYY - DD Mon YYYY` as `DD-MM-YYYY to DD-MM-YYYY`.
///
/// Input that does not parse is returned unchanged.
pub fn format_date_range(range: &str) -> String {
    let parts: Vec<&str> = range.split(" - ").collect();
    if parts.len() != 2 {
        return range.to_string();
    }

    let parsed: Option<Vec<NaiveDate>> = parts
        .iter()
        .map(|p| NaiveDate::parse_from_str(p.trim(), "%d %b %Y").ok())
        .collect();

    match parsed.as_deref() {
        Some([start, end]) => format!(
            "{} to {}",
            start.format("%d-%m-%Y"),
            end.format("%d-%m-%Y")
        ),
        _ => range.to_string(),
    }
}

/// Default workbook file name for `input`: its stem, plus the formatted date range if any.
pub fn output_file_name(input: &Path, report: &ReportInfo) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());

    match report.date_range.as_deref() {
        Some(range) => format!("{} {}.xlsx", stem, format_date_range(range)).replace("  ", " "),
        None => format!("{}.xlsx", stem),
    }
}

/// Default workbook path: next to the input, or inside `output_dir` when given.
pub fn default_output_path(input: &Path, report: &ReportInfo, output_dir: Option<&Path>) -> PathBuf {
    let name = output_file_name(input, report);
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}
