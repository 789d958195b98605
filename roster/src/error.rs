//! Error taxonomy for roster operations.
//!
//! Every operation returns [`RosterError`]. The menu loop catches these at the
//! operation boundary and prints them; none of them end the process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the record store and the operations built on it.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The store file does not exist.
    #[error("File not found: {}", .path.display())]
    StoreNotFound { path: PathBuf },

    /// A row in the store could not be interpreted as a record.
    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },

    /// User input was rejected before anything was written.
    #[error("{0}")]
    Validation(String),

    /// No record matched the requested name.
    #[error("Student {name} not found")]
    StudentNotFound { name: String },

    /// No record carries the requested course label.
    #[error("{course} does not exist.")]
    CourseNotFound { course: String },

    /// Reading or writing the store failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV encoder failed while writing rows.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl RosterError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RosterError> = std::result::Result<T, E>;
