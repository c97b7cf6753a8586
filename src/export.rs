//! One-shot CSV export of the board.
//!
//! The column order matches the on-screen table exactly; dates render
//! day/month/year. There is no partial-write recovery: a failure is
//! surfaced to the caller and the file is left as-is.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::{format_date, PaRecord};

/// Export column headers, in the fixed on-screen order.
pub const COLUMNS: [&str; 14] = [
    "TICKET",
    "CITY",
    "BASE",
    "BOX MAP",
    "BOX SYSTEM",
    "QTY",
    "PA",
    "OPENED BY",
    "OPENED",
    "DUE",
    "DAYS LEFT",
    "STATUS",
    "DONE",
    "REQUIREMENT",
];

/// The error type for export failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The destination file could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        /// The destination path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A row could not be written.
    #[error("failed to write export: {0}")]
    Write(#[from] csv::Error),

    /// Buffered output could not be flushed.
    #[error("failed to flush export: {0}")]
    Flush(#[source] io::Error),
}

/// Writes the records as CSV, one row per record.
///
/// # Errors
///
/// Returns an [`Error`] when a row cannot be written or the output
/// cannot be flushed.
pub fn write_csv<W: io::Write>(records: &[PaRecord], writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(row(record))?;
    }
    writer.flush().map_err(Error::Flush)
}

/// Exports the records to a file at the given path.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be created or written.
pub fn export_to_path(records: &[PaRecord], path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(records, file)
}

/// The cells for one record, in [`COLUMNS`] order. Shared by the on-screen
/// table and the CSV rows so the two can never drift apart.
#[must_use]
pub fn row(record: &PaRecord) -> [String; 14] {
    [
        record.ticket.clone(),
        record.city.clone(),
        record.base.clone(),
        record.box_map.clone(),
        record.box_system.clone(),
        record.quantity.to_string(),
        record.pa_code.clone(),
        record.opened_by.clone(),
        format_date(record.opened_on),
        format_date(record.due_on),
        record.days_remaining.to_string(),
        record.status.to_string(),
        record.completed.to_string(),
        record.requirement.to_string(),
    ]
}
