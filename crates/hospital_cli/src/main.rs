//! CLI smoke entry point.
//!
//! # Responsibility
//! - Resolve the data directory, load every record file once and report
//!   skipped rows and per-type counts.
//! - Exit non-zero on fatal storage errors.

use hospital_core::{
    core_version, default_log_level, init_logging, FlatFileStore, RecordStore, StoreConfig,
};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "HOSPITAL_LOG_LEVEL";
const LOG_DIR_NAME: &str = "logs";

fn main() -> ExitCode {
    println!("hospital_core version={}", core_version());

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("data_dir={}", config.data_dir().display());

    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = config.data_dir().join(LOG_DIR_NAME);
    match log_dir.to_str() {
        Some(dir) => {
            if let Err(err) = init_logging(&level, dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        None => eprintln!("warning: logging disabled: log directory is not valid UTF-8"),
    }

    let store = FlatFileStore::new(config);
    let records = match store.load_all() {
        Ok(records) => records,
        Err(err) => {
            log::error!("event=cli_load module=cli status=error error={err}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &records.diagnostics {
        println!("[WARNING] {diagnostic}");
    }
    println!(
        "counts patients={} doctors={} admins={} appointments={}",
        records.patients.len(),
        records.doctors.len(),
        records.admins.len(),
        records.appointments.len()
    );
    ExitCode::SUCCESS
}
