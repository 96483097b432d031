//! End-to-end tests: generated PDF in, workbook out.

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use shipsheet::{
    convert_file, convert_file_with_progress, Converter, Error, ProgressEvent, SheetKind, Warning,
};

const PAGE_ONE: &[&str] = &[
    "Store 42 01 Oct 2025 - 07 Oct 2025",
    "Drop Off Packages 4x6 Pre-printed Shipping Label",
    "Drop Off Date",
    "Time Pickup Date Customer Service",
    "10:15 AM Oct 01 2025 Ground 1Z999AA10123456784 2.3lb",
    "11:00 AM Oct 01 2025 ACME Corp Ground 1Z999AA10123456785 1.1lb",
    "Oct 01 2025 Broken Row 1Z999AA10123456786 9lb",
    "Page 1 of 2",
];

const PAGE_TWO: &[&str] = &[
    "Mobile Drop Off",
    "Time Pickup Date Customer Service",
    "3:10 PM Oct 04 2025 Carol Ground 1Z999AA10123456789 1.5lb",
    "Page 2 of 2",
];

/// Write a PDF with one text object per line, so extracted text keeps the lines.
fn write_pdf(path: &Path, pages: &[&[&str]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 800 - 14 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![40.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn sample_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("ActiveReports Document.pdf");
    write_pdf(&path, &[PAGE_ONE, PAGE_TWO]);
    path
}

#[test]
fn test_convert_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());

    let report = convert_file(&input).unwrap();

    assert_eq!(
        report.output_path,
        dir.path()
            .join("ActiveReports Document 01-10-2025 to 07-10-2025.xlsx")
    );
    assert!(report.output_path.exists());
    assert_eq!(report.page_count, 2);
    assert_eq!(report.package_count, 3);
    assert_eq!(
        report.sheets,
        vec![
            ("Drop Off Packages".to_string(), 2),
            ("Mobile Drop Off".to_string(), 1),
        ]
    );
    assert_eq!(
        report.warnings,
        vec![Warning::PartialRecordSkipped {
            page: 1,
            reason: "tracking number 1Z999AA10123456786 without AM/PM time".to_string(),
        }]
    );

    let workbook: Xlsx<_> = open_workbook(&report.output_path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Drop Off Packages", "Mobile Drop Off"]);
}

#[test]
fn test_convert_to_directory_with_progress() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());
    let out_dir = dir.path().join("exports");
    std::fs::create_dir(&out_dir).unwrap();

    let mut events = Vec::new();
    let mut sink = |event: &ProgressEvent| events.push(event.clone());
    let report = Converter::new()
        .with_output_dir(&out_dir)
        .convert_with_progress(&input, &mut sink)
        .unwrap();

    assert_eq!(report.output_path.parent(), Some(out_dir.as_path()));
    assert_eq!(report.report.title, "Store 42");

    assert_eq!(events.first(), Some(&ProgressEvent::DocumentOpened { page_count: 2 }));
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::WorkbookWritten {
            path: report.output_path.clone(),
            rows: 3,
        })
    );
    assert!(events.contains(&ProgressEvent::SectionParsed {
        kind: SheetKind::MobileDropOff,
        records: 1,
    }));
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::RecordSkipped { page: 1, .. })));
}

#[test]
fn test_convert_to_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());
    let output = dir.path().join("out.xlsx");

    let report = Converter::new().with_output_file(&output).convert(&input).unwrap();
    assert_eq!(report.output_path, output);
    assert!(output.exists());
}

#[test]
fn test_missing_output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());
    let out_dir = dir.path().join("exports").join("october");

    let report = Converter::new().with_output_dir(&out_dir).convert(&input).unwrap();
    assert_eq!(report.output_path.parent(), Some(out_dir.as_path()));
    assert!(report.output_path.exists());
}

#[test]
fn test_output_dir_blocked_by_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());
    let blocker = dir.path().join("exports");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = Converter::new().with_output_dir(&blocker).convert(&input);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_garbage_input_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("garbage.pdf");
    std::fs::write(&input, b"this is definitely not a pdf document").unwrap();

    let mut events = Vec::new();
    let mut sink = |event: &ProgressEvent| events.push(event.clone());
    let result = convert_file_with_progress(&input, &mut sink);

    assert!(matches!(result, Err(Error::UnreadableDocument(_))));
    assert!(events.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_pdf_without_shipments_is_unrecognized() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("letter.pdf");
    write_pdf(&input, &[&["Dear customer,", "Thank you for your business."]]);

    let result = convert_file(&input);
    assert!(matches!(result, Err(Error::UnrecognizedLayout { pages: 1 })));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_convert_async_forwards_progress() {
    use shipsheet::{convert_file_async, ChannelSink};

    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());
    let (sink, receiver) = ChannelSink::unbounded();

    let report = convert_file_async(input, Converter::new(), sink).await.unwrap();

    assert_eq!(report.package_count, 3);
    let events: Vec<ProgressEvent> = receiver.try_iter().collect();
    assert_eq!(events.first(), Some(&ProgressEvent::DocumentOpened { page_count: 2 }));
    assert!(matches!(events.last(), Some(ProgressEvent::WorkbookWritten { rows: 3, .. })));
}
