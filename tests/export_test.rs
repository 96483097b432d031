//! Integration tests for workbook export, read back with calamine.

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use shipsheet::{
    Error, Exporter, ExtractionResult, ReportInfo, SheetKind, SheetSpec, ShipmentRecord,
    WorkbookSpec,
};

fn read_sheet(path: &Path, name: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(name).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names().to_vec()
}

fn strings(row: &[Data]) -> Vec<String> {
    row.iter()
        .map(|cell| match cell {
            Data::String(s) => s.clone(),
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect()
}

/// Raw XML of one part of an XLSX package.
fn xml_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn sample_result() -> ExtractionResult {
    let mut result = ExtractionResult::new(
        ReportInfo::new("Store 42", Some("01 Oct 2025 - 07 Oct 2025".to_string())),
        2,
    );
    result.set_records(
        SheetKind::DropOff,
        vec![
            ShipmentRecord::new(1)
                .with("Time", "10:15 AM")
                .with("Pickup Date", NaiveDate::from_ymd_opt(2025, 10, 2).unwrap())
                .with("Customer", "ACME Corp")
                .with("Service", "Ground")
                .with("Tracking Number", "1Z999AA10123456784")
                .with("Weight", "2.3lb"),
            ShipmentRecord::new(1)
                .with("Time", "11:00 AM")
                .with("Pickup Date", "Tue 10/14")
                .with("Customer", "")
                .with("Service", "Next Day Air")
                .with("Tracking Number", "1Z999AA10123456785")
                .with("Weight", "1.1lb"),
        ],
    );
    result.set_records(
        SheetKind::Summary,
        vec![ShipmentRecord::new(2)
            .with("Type", "Drop Off")
            .with("International", 1i64)
            .with("Ground", 1234i64)
            .with("Air", 3i64)
            .with("Unknown service, not specified", 0i64)
            .with("Total Packages", 1238i64)
            .with("Weight", "456.7lb")],
    );
    result
}

#[test]
fn test_headers_match_spec_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    let spec = WorkbookSpec::shipping_report();

    Exporter::new(spec.clone())
        .unwrap()
        .export(&sample_result(), &path)
        .unwrap();

    assert_eq!(sheet_names(&path), vec!["Drop Off Packages", "Summary"]);
    for name in ["Drop Off Packages", "Summary"] {
        let rows = read_sheet(&path, name);
        assert_eq!(strings(&rows[0]), spec.sheet(name).unwrap().column_names());
    }
}

#[test]
fn test_rows_follow_record_order_and_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    let summary = Exporter::default().export(&sample_result(), &path).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.path, path);

    let rows = read_sheet(&path, "Drop Off Packages");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][4], Data::String("1Z999AA10123456784".to_string()));
    assert_eq!(rows[2][4], Data::String("1Z999AA10123456785".to_string()));

    // 2025-10-02 as an Excel serial date
    let serial = match &rows[1][1] {
        Data::DateTime(dt) => dt.as_f64(),
        Data::Float(f) => *f,
        other => panic!("expected a date cell, got {:?}", other),
    };
    assert_eq!(serial, 45932.0);
    assert_eq!(rows[2][1], Data::String("Tue 10/14".to_string()));
    assert_eq!(rows[2][2], Data::Empty);

    let summary_rows = read_sheet(&path, "Summary");
    assert_eq!(summary_rows[1][0], Data::String("Drop Off".to_string()));
    assert_eq!(summary_rows[1][2], Data::Float(1234.0));
    assert_eq!(summary_rows[1][6], Data::String("456.7lb".to_string()));
}

#[test]
fn test_header_style_and_column_widths() {
    let (bytes, summary) = Exporter::default().to_bytes(&sample_result()).unwrap();
    assert_eq!(
        summary.sheets,
        vec![("Drop Off Packages".to_string(), 2), ("Summary".to_string(), 1)]
    );

    let styles = xml_part(&bytes, "xl/styles.xml");
    assert!(styles.contains(r#"<patternFill patternType="solid">"#));
    assert!(styles.contains(r#"<fgColor rgb="FF4472C4"/>"#));
    assert!(styles.contains("<font><b/>"));
    assert!(styles.contains(r#"<color rgb="FFFFFFFF"/>"#));
    assert!(styles.contains(r#"horizontal="center""#));

    // Widths are stored with Excel's cell padding added
    let drop_off = xml_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(drop_off.contains(r#"<col min="1" max="1" width="20.7109375""#));
    assert!(!drop_off.contains(r#"width="25."#));
    let summary_sheet = xml_part(&bytes, "xl/worksheets/sheet2.xml");
    assert!(summary_sheet.contains(r#"<col min="1" max="1" width="25.7109375""#));
}

#[test]
fn test_empty_input_writes_header_only_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    let result = ExtractionResult::new(ReportInfo::default(), 0);

    let summary = Exporter::default().export(&result, &path).unwrap();
    assert!(summary.empty_input);
    assert_eq!(summary.rows, 0);

    let names = sheet_names(&path);
    assert_eq!(names.len(), SheetKind::ALL.len());
    for kind in SheetKind::ALL {
        let rows = read_sheet(&path, kind.title());
        assert_eq!(rows.len(), 1);
        assert_eq!(strings(&rows[0]), kind.fields());
    }
}

#[test]
fn test_custom_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.xlsx");

    let spec = WorkbookSpec::new().with_sheet(
        SheetSpec::new("Shipments", SheetKind::DropOff)
            .column("tracking", 20.0)
            .column("weight", 12.0)
            .column("dest", 15.0),
    );
    let mut result = ExtractionResult::new(ReportInfo::default(), 1);
    result.set_records(
        SheetKind::DropOff,
        vec![
            ShipmentRecord::new(1)
                .with("tracking", "1Z9999")
                .with("weight", "2.3kg")
                .with("dest", "Berlin"),
            ShipmentRecord::new(1)
                .with("tracking", "1Z8888")
                .with("weight", "1.1kg")
                .with("dest", "Paris"),
        ],
    );

    Exporter::new(spec).unwrap().export(&result, &path).unwrap();

    assert_eq!(sheet_names(&path), vec!["Shipments"]);
    let rows: Vec<Vec<String>> = read_sheet(&path, "Shipments")
        .iter()
        .map(|row| strings(row))
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["tracking", "weight", "dest"],
            vec!["1Z9999", "2.3kg", "Berlin"],
            vec!["1Z8888", "1.1kg", "Paris"],
        ]
    );
}

#[test]
fn test_export_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    std::fs::write(&path, b"stale").unwrap();

    Exporter::default().export(&sample_result(), &path).unwrap();

    assert_eq!(sheet_names(&path), vec!["Drop Off Packages", "Summary"]);
    // No temporary files left behind
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_invalid_layout_is_rejected_before_writing() {
    let spec = WorkbookSpec::new().with_sheet(
        SheetSpec::new("Bad:Name", SheetKind::DropOff).column("tracking", 20.0),
    );
    assert!(matches!(Exporter::new(spec), Err(Error::InvalidSpec(_))));
}
