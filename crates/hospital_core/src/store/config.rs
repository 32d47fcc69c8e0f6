//! Data directory configuration.

use super::{StoreError, StoreResult};
use crate::codec::RecordCodec;
use crate::model::appointment::Appointment;
use crate::model::user::{Admin, Doctor, Patient};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HOSPITAL_DATA_DIR";
/// Directory created next to the executable when no override is set.
pub const DEFAULT_DATA_DIR_NAME: &str = "Data";

/// Location of the four record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory from `HOSPITAL_DATA_DIR`, falling back to
    /// `Data/` beside the running executable.
    ///
    /// # Errors
    /// - Returns `StoreError::Io` when the executable path cannot be resolved.
    pub fn from_env() -> StoreResult<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::new(dir));
        }

        let exe =
            std::env::current_exe().map_err(|err| StoreError::io(DEFAULT_DATA_DIR_NAME, err))?;
        let base = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(base.join(DEFAULT_DATA_DIR_NAME)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for<T: RecordCodec>(&self) -> PathBuf {
        self.data_dir.join(T::FILE_NAME)
    }

    pub fn patients_path(&self) -> PathBuf {
        self.path_for::<Patient>()
    }

    pub fn doctors_path(&self) -> PathBuf {
        self.path_for::<Doctor>()
    }

    pub fn admins_path(&self) -> PathBuf {
        self.path_for::<Admin>()
    }

    pub fn appointments_path(&self) -> PathBuf {
        self.path_for::<Appointment>()
    }
}
