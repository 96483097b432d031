//! Error types for shipsheet library.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shipsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// The output directory could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is missing, not a PDF, or its structure cannot be parsed.
    #[error("Unreadable PDF document: {0}")]
    UnreadableDocument(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text of a single page could not be extracted.
    #[error("Text extraction failed on page {page}: {reason}")]
    PageText {
        /// 1-indexed page number
        page: u32,
        /// Underlying failure
        reason: String,
    },

    /// No shipment or summary fields were recognized on any page.
    #[error("Unrecognized layout: no shipment records found in {pages} page(s)")]
    UnrecognizedLayout {
        /// Number of pages scanned
        pages: u32,
    },

    /// The workbook could not be written.
    #[error("Failed to write workbook '{}': {reason}", .path.display())]
    WriteFailure {
        /// Destination path
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// The workbook layout is invalid.
    #[error("Invalid workbook spec: {0}")]
    InvalidSpec(String),

    /// The caller cancelled the conversion.
    #[error("Conversion cancelled")]
    Cancelled,

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::WriteFailure`] for `path`.
    pub fn write_failure(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Error::WriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::UnreadableDocument(err.to_string()),
        }
    }
}

/// Conditions that are reported but do not abort a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line carrying a tracking number could not be parsed into a record.
    PartialRecordSkipped {
        /// 1-indexed page the line was found on
        page: u32,
        /// Why the line was rejected
        reason: String,
    },

    /// Nothing to export; a header-only workbook was written.
    EmptyInput,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::PartialRecordSkipped { page, reason } => {
                write!(f, "Skipped partial record on page {}: {}", page, reason)
            }
            Warning::EmptyInput => write!(f, "No records to export; wrote header-only workbook"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::UnrecognizedLayout { pages: 3 };
        assert_eq!(
            err.to_string(),
            "Unrecognized layout: no shipment records found in 3 page(s)"
        );

        let err = Error::write_failure("/nope/out.xlsx", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to write workbook '/nope/out.xlsx': permission denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::PartialRecordSkipped {
            page: 2,
            reason: "no AM/PM time".into(),
        };
        assert_eq!(w.to_string(), "Skipped partial record on page 2: no AM/PM time");
        assert!(Warning::EmptyInput.to_string().contains("header-only"));
    }
}
