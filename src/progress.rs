//! Progress events emitted while a conversion runs.
//!
//! The pipeline reports what it is doing through a [`ProgressSink`] and knows
//! nothing about who is listening. A closure works as a sink, and
//! [`ChannelSink`] forwards events over a channel to another thread (e.g. a
//! GUI event loop).
//!
//! # Example
//!
//! ```no_run
//! use shipsheet::progress::ProgressEvent;
//!
//! let mut on_event = |event: &ProgressEvent| println!("{}", event);
//! let report = shipsheet::convert_file_with_progress("report.pdf", &mut on_event)?;
//! println!("{}", report.output_path.display());
//! # Ok::<(), shipsheet::Error>(())
//! ```

use crate::model::SheetKind;
use crossbeam_channel::{Receiver, Sender};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Events emitted during extraction and export, in pipeline order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The document was opened.
    DocumentOpened {
        /// Total number of pages
        page_count: u32,
    },

    /// Text of a page has been read.
    PageRead {
        /// 1-indexed page number
        current: u32,
        /// Total number of pages
        total: u32,
    },

    /// Report header was analysed.
    ReportDetected {
        /// Header text
        title: String,
        /// Raw date range, if the header carries one
        date_range: Option<String>,
    },

    /// Service types were collected from package lines.
    ServiceTypesFound {
        /// Number of distinct service types
        count: usize,
    },

    /// A report section has been parsed.
    SectionParsed {
        /// Which section
        kind: SheetKind,
        /// Number of records extracted
        records: usize,
    },

    /// A candidate line was dropped.
    RecordSkipped {
        /// 1-indexed page
        page: u32,
        /// Why it was dropped
        reason: String,
    },

    /// The workbook has been written.
    WorkbookWritten {
        /// Output file
        path: PathBuf,
        /// Number of data rows written
        rows: usize,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::DocumentOpened { page_count } => {
                write!(f, "Opened document ({} pages)", page_count)
            }
            ProgressEvent::PageRead { current, total } => {
                write!(f, "Read page {}/{}", current, total)
            }
            ProgressEvent::ReportDetected { title, date_range } => match date_range {
                Some(range) => write!(f, "Report: {} {}", title, range),
                None => write!(f, "Report: {}", title),
            },
            ProgressEvent::ServiceTypesFound { count } => {
                write!(f, "Found {} service types", count)
            }
            ProgressEvent::SectionParsed { kind, records } => {
                write!(f, "{}: extracted {} entries", kind, records)
            }
            ProgressEvent::RecordSkipped { page, reason } => {
                write!(f, "Skipped line on page {}: {}", page, reason)
            }
            ProgressEvent::WorkbookWritten { path, rows } => {
                write!(f, "Wrote {} rows to {}", rows, path.display())
            }
        }
    }
}

/// Receiver of progress events.
///
/// Called synchronously on the converting thread, in pipeline order.
pub trait ProgressSink {
    /// Handle one event.
    fn emit(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn emit(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&mut self, _event: &ProgressEvent) {}
}

/// Sink that forwards events over a crossbeam channel.
///
/// A disconnected receiver is ignored; conversion continues.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<ProgressEvent>,
}

impl ChannelSink {
    /// Wrap an existing sender.
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }

    /// Create an unbounded channel and return the sink with its receiver.
    pub fn unbounded() -> (Self, Receiver<ProgressEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&mut self, event: &ProgressEvent) {
        if self.sender.send(event.clone()).is_err() {
            log::debug!("progress receiver dropped; event discarded");
        }
    }
}

/// Shared flag asking a running conversion to stop.
///
/// Checked before each page; a cancelled run fails with
/// [`Error::Cancelled`](crate::Error::Cancelled).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
