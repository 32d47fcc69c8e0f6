//! Flat text file implementation of `RecordStore`.
//!
//! # Invariants
//! - File order is collection order on both load and save.
//! - Each save writes a sibling `.tmp` file and renames it over the target,
//!   so a crash leaves either the old or the new file, never a torn one.
//! - There is no transaction across the four files.

use super::{LineDiagnostic, LoadedRecords, RecordStore, StoreConfig, StoreError, StoreResult};
use crate::codec::{data_line, header_line, RecordCodec};
use crate::logging::sanitize_message;
use crate::model::appointment::Appointment;
use crate::model::user::{Admin, Doctor, Patient};
use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = "tmp";
const MAX_LOGGED_LINE_CHARS: usize = 120;

/// Record store backed by one text file per record type.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    config: StoreConfig,
}

impl FlatFileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn ensure_data_dir(&self) -> StoreResult<()> {
        let dir = self.config.data_dir();
        fs::create_dir_all(dir).map_err(|err| {
            error!(
                "event=store_init module=store status=error path={} error={}",
                dir.display(),
                err
            );
            StoreError::io(dir, err)
        })
    }

    fn load_file<T: RecordCodec>(
        &self,
        diagnostics: &mut Vec<LineDiagnostic>,
    ) -> StoreResult<Vec<T>> {
        let started_at = Instant::now();
        let path = self.config.path_for::<T>();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok file={} records=0 missing=true",
                    T::FILE_NAME
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error file={} error={}",
                    T::FILE_NAME,
                    err
                );
                return Err(StoreError::io(path, err));
            }
        };

        let skipped_before = diagnostics.len();
        let records = decode_lines::<T>(&text, diagnostics);
        info!(
            "event=store_load module=store status=ok file={} records={} skipped={} duration_ms={}",
            T::FILE_NAME,
            records.len(),
            diagnostics.len() - skipped_before,
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    fn save_file<T: RecordCodec>(&self, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        let path = self.config.path_for::<T>();

        let mut contents = header_line::<T>();
        contents.push('\n');
        for record in records {
            contents.push_str(&record.encode());
            contents.push('\n');
        }

        match write_replace(&path, &contents) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok file={} records={} duration_ms={}",
                    T::FILE_NAME,
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error file={} error={}",
                    T::FILE_NAME,
                    err
                );
                Err(err)
            }
        }
    }
}

impl RecordStore for FlatFileStore {
    fn load_all(&self) -> StoreResult<LoadedRecords> {
        self.ensure_data_dir()?;

        let mut diagnostics = Vec::new();
        let patients = self.load_file::<Patient>(&mut diagnostics)?;
        let doctors = self.load_file::<Doctor>(&mut diagnostics)?;
        let admins = self.load_file::<Admin>(&mut diagnostics)?;
        let appointments = self.load_file::<Appointment>(&mut diagnostics)?;

        Ok(LoadedRecords {
            patients,
            doctors,
            admins,
            appointments,
            diagnostics,
        })
    }

    fn save_all(
        &self,
        patients: &[Patient],
        doctors: &[Doctor],
        admins: &[Admin],
        appointments: &[Appointment],
    ) -> StoreResult<()> {
        self.ensure_data_dir()?;
        self.save_file(patients)?;
        self.save_file(doctors)?;
        self.save_file(admins)?;
        self.save_file(appointments)?;
        Ok(())
    }
}

/// Decodes every data line, collecting one diagnostic per rejected line.
fn decode_lines<T: RecordCodec>(text: &str, diagnostics: &mut Vec<LineDiagnostic>) -> Vec<T> {
    let mut records = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let Some(line) = data_line(raw) else {
            continue;
        };

        match T::decode(line) {
            Ok(record) => records.push(record),
            Err(err) => {
                let diagnostic = LineDiagnostic {
                    file: T::FILE_NAME.to_string(),
                    line_number: index + 1,
                    content: line.to_string(),
                    error: err,
                };
                warn!(
                    "event=record_skipped module=store status=error file={} line={} content=\"{}\" error={}",
                    diagnostic.file,
                    diagnostic.line_number,
                    sanitize_message(&diagnostic.content, MAX_LOGGED_LINE_CHARS),
                    diagnostic.error
                );
                diagnostics.push(diagnostic);
            }
        }
    }

    records
}

fn write_replace(path: &Path, contents: &str) -> StoreResult<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents).map_err(|err| StoreError::io(&temp_path, err))?;
    fs::rename(&temp_path, path).map_err(|err| {
        let _ = fs::remove_file(&temp_path);
        StoreError::io(path, err)
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
