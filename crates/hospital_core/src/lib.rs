//! Core domain logic for the hospital records tool.
//! This crate owns the record invariants and the flat-file persistence layer;
//! console rendering lives with its callers.

pub mod codec;
pub mod ids;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use codec::{parse_timestamp, CodecError, CodecResult, RecordCodec};
pub use ids::{
    derive_password, new_admin_id, new_appointment_id, new_doctor_id, new_patient_id, next_id,
    IdError, IdPartition, IdResult, APPOINTMENT_ID_FLOOR,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentId, ParseAppointmentIdError};
pub use model::user::{
    Account, Admin, ContactInfo, Doctor, NewAdmin, NewDoctor, NewPatient, Patient, Role, User,
    UserId, UserProfile,
};
pub use service::hospital_service::{HospitalService, ServiceError, ServiceResult};
pub use store::{
    FlatFileStore, LineDiagnostic, LoadedRecords, RecordStore, StoreConfig, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
