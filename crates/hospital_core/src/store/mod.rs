//! Bulk persistence of the four record collections.
//!
//! # Responsibility
//! - Define the load-all/save-all contract consumed by callers.
//! - Keep file layout and line handling inside the store boundary.
//!
//! # Invariants
//! - A malformed row never aborts a load; it becomes a `LineDiagnostic`.
//! - A missing file loads as an empty collection.
//! - `save_all` overwrites every file in full; there is no merge step.
//!
//! # See also
//! - `crate::codec` for the per-line format.

use crate::codec::CodecError;
use crate::model::appointment::Appointment;
use crate::model::user::{Admin, Doctor, Patient};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod config;
mod flat_file;

pub use config::{StoreConfig, DATA_DIR_ENV, DEFAULT_DATA_DIR_NAME};
pub use flat_file::FlatFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Fatal storage failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error at `{}`: {source}", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// One skipped row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// File name without directory, e.g. `patients.txt`.
    pub file: String,
    /// 1-based physical line number.
    pub line_number: usize,
    /// Trimmed raw content of the rejected line.
    pub content: String,
    pub error: CodecError,
}

impl Display for LineDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to parse line {} in {}: \"{}\" ({})",
            self.line_number, self.file, self.content, self.error
        )
    }
}

/// Result of a full load: four order-preserving collections plus the rows
/// that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedRecords {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub admins: Vec<Admin>,
    pub appointments: Vec<Appointment>,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Load-all/save-all contract for hospital records.
pub trait RecordStore {
    /// Loads every record file. Malformed rows are reported, not returned as errors.
    fn load_all(&self) -> StoreResult<LoadedRecords>;

    /// Overwrites every record file with the given collections.
    fn save_all(
        &self,
        patients: &[Patient],
        doctors: &[Doctor],
        admins: &[Admin],
        appointments: &[Appointment],
    ) -> StoreResult<()>;
}
