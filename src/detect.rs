//! Input sniffing: reject files that are not PDFs before handing them to the parser.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Check the header of the file at `path` and return its PDF version.
///
/// Missing files, unreadable files and files without a `%PDF-x.y` header
/// all fail with [`Error::UnreadableDocument`].
///
/// # Example
/// ```no_run
/// use shipsheet::detect::detect_pdf_path;
///
/// let version = detect_pdf_path("report.pdf").unwrap();
/// println!("PDF version: {}", version);
/// ```
pub fn detect_pdf_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| unreadable(path, e))?;

    let mut header = [0u8; 16];
    let read = read_up_to(&mut file, &mut header).map_err(|e| unreadable(path, e))?;

    detect_pdf_bytes(&header[..read])
}

/// Check that `data` starts with a PDF header and return its version string.
pub fn detect_pdf_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnreadableDocument("not a PDF file".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnreadableDocument(format!(
            "unsupported PDF version '{}'",
            version
        )));
    }

    Ok(version)
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_pdf_bytes(data).is_ok()
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

// Short files are valid input to the check; `read_exact` would turn them into I/O errors.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn unreadable(path: &Path, err: io::Error) -> Error {
    Error::UnreadableDocument(format!("{}: {}", path.display(), err))
}
