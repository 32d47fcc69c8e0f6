//! Hospital use-case service.
//!
//! # Responsibility
//! - Hold the full in-memory record set loaded from a `RecordStore`.
//! - Run "mutate in memory, save full state" for registration, doctor
//!   assignment and booking.
//! - Answer lookups used by the console layer.
//!
//! # Invariants
//! - Every mutation is followed by a full `save_all` before returning; a
//!   failed save rolls the in-memory change back.
//! - New identifiers are minted against the complete in-memory collections.
//! - Dangling appointment references are rendered, never rejected on read.

use crate::ids::IdError;
use crate::model::appointment::Appointment;
use crate::model::user::{
    Account, Admin, Doctor, NewAdmin, NewDoctor, NewPatient, Patient, User, UserId,
};
use crate::store::{LineDiagnostic, LoadedRecords, RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const UNKNOWN_PATIENT: &str = "Unknown patient";
const UNKNOWN_DOCTOR: &str = "Unknown doctor";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for hospital use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No account matches the id/password pair.
    InvalidCredentials,
    PatientNotFound(UserId),
    DoctorNotFound(UserId),
    Id(IdError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::PatientNotFound(id) => write!(f, "patient not found: {id}"),
            Self::DoctorNotFound(id) => write!(f, "doctor not found: {id}"),
            Self::Id(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Id(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IdError> for ServiceError {
    fn from(value: IdError) -> Self {
        Self::Id(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case facade over a record store and its loaded state.
pub struct HospitalService<S: RecordStore> {
    store: S,
    records: LoadedRecords,
}

impl<S: RecordStore> HospitalService<S> {
    /// Loads the full record set from `store`.
    pub fn load(store: S) -> ServiceResult<Self> {
        let records = store.load_all()?;
        Ok(Self { store, records })
    }

    /// Discards in-memory state and reloads from the store.
    pub fn reload(&mut self) -> ServiceResult<()> {
        self.records = self.store.load_all()?;
        Ok(())
    }

    pub fn records(&self) -> &LoadedRecords {
        &self.records
    }

    /// Rows skipped during the most recent load.
    pub fn diagnostics(&self) -> &[LineDiagnostic] {
        &self.records.diagnostics
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finds the account for `id` and checks the password by equality.
    ///
    /// Patients, then doctors, then admins are searched regardless of the id
    /// range, so accounts minted outside the partitions still sign in.
    pub fn authenticate(&self, id: UserId, password: &str) -> ServiceResult<User> {
        let user = self
            .find_patient(id)
            .cloned()
            .map(User::from)
            .or_else(|| self.find_doctor(id).cloned().map(User::from))
            .or_else(|| self.find_admin(id).cloned().map(User::from));

        match user {
            Some(user) if user.profile().password_matches(password) => {
                info!(
                    "event=auth module=service status=ok role={} id={}",
                    user.role().as_str(),
                    id
                );
                Ok(user)
            }
            _ => {
                warn!("event=auth_failed module=service status=error id={id}");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    pub fn find_patient(&self, id: UserId) -> Option<&Patient> {
        self.records.patients.iter().find(|patient| patient.id() == id)
    }

    pub fn find_doctor(&self, id: UserId) -> Option<&Doctor> {
        self.records.doctors.iter().find(|doctor| doctor.id() == id)
    }

    pub fn find_admin(&self, id: UserId) -> Option<&Admin> {
        self.records.admins.iter().find(|admin| admin.id() == id)
    }

    /// Patients whose assigned doctor is `doctor_id`, in file order.
    pub fn patients_of_doctor(&self, doctor_id: UserId) -> Vec<&Patient> {
        self.records
            .patients
            .iter()
            .filter(|patient| patient.is_assigned_to(doctor_id))
            .collect()
    }

    pub fn appointments_for_patient(&self, patient_id: UserId) -> Vec<&Appointment> {
        self.records
            .appointments
            .iter()
            .filter(|appointment| appointment.patient_id == patient_id)
            .collect()
    }

    pub fn appointments_for_doctor(&self, doctor_id: UserId) -> Vec<&Appointment> {
        self.records
            .appointments
            .iter()
            .filter(|appointment| appointment.doctor_id == doctor_id)
            .collect()
    }

    /// `"<id> | <patient> | <doctor> | <note>"` with dangling references
    /// shown as unknown.
    pub fn appointment_summary(&self, appointment: &Appointment) -> String {
        let patient = self
            .find_patient(appointment.patient_id)
            .map(|patient| patient.profile.name.clone())
            .unwrap_or_else(|| UNKNOWN_PATIENT.to_string());
        let doctor = self
            .find_doctor(appointment.doctor_id)
            .map(Doctor::display_name)
            .unwrap_or_else(|| UNKNOWN_DOCTOR.to_string());
        format!(
            "{} | {} | {} | {}",
            appointment.id, patient, doctor, appointment.note
        )
    }

    /// Mints, appends and persists a new patient.
    pub fn register_patient(&mut self, request: NewPatient) -> ServiceResult<Patient> {
        let patient = Patient::create_new(request, &self.records.patients)?;
        self.records.patients.push(patient.clone());
        if let Err(err) = self.persist() {
            self.records.patients.pop();
            return Err(err);
        }
        info!(
            "event=user_registered module=service status=ok role=patient id={}",
            patient.id()
        );
        Ok(patient)
    }

    /// Mints, appends and persists a new doctor.
    pub fn register_doctor(&mut self, request: NewDoctor) -> ServiceResult<Doctor> {
        let doctor = Doctor::create_new(request, &self.records.doctors)?;
        self.records.doctors.push(doctor.clone());
        if let Err(err) = self.persist() {
            self.records.doctors.pop();
            return Err(err);
        }
        info!(
            "event=user_registered module=service status=ok role=doctor id={}",
            doctor.id()
        );
        Ok(doctor)
    }

    /// Mints, appends and persists a new administrator.
    pub fn register_admin(&mut self, request: NewAdmin) -> ServiceResult<Admin> {
        let admin = Admin::create_new(request, &self.records.admins)?;
        self.records.admins.push(admin.clone());
        if let Err(err) = self.persist() {
            self.records.admins.pop();
            return Err(err);
        }
        info!(
            "event=user_registered module=service status=ok role=admin id={}",
            admin.id()
        );
        Ok(admin)
    }

    /// Assigns `doctor_id` to a patient and persists.
    ///
    /// # Errors
    /// - `DoctorNotFound` / `PatientNotFound` when either id is not loaded.
    pub fn assign_doctor(&mut self, patient_id: UserId, doctor_id: UserId) -> ServiceResult<()> {
        if self.find_doctor(doctor_id).is_none() {
            return Err(ServiceError::DoctorNotFound(doctor_id));
        }
        let patient = self
            .records
            .patients
            .iter_mut()
            .find(|patient| patient.profile.id == patient_id)
            .ok_or(ServiceError::PatientNotFound(patient_id))?;
        let previous = patient.doctor_id.replace(doctor_id);

        if let Err(err) = self.persist() {
            if let Some(patient) = self
                .records
                .patients
                .iter_mut()
                .find(|patient| patient.profile.id == patient_id)
            {
                patient.doctor_id = previous;
            }
            return Err(err);
        }
        info!(
            "event=doctor_assigned module=service status=ok patient_id={patient_id} doctor_id={doctor_id}"
        );
        Ok(())
    }

    /// Books an appointment between two loaded records and persists.
    ///
    /// References are checked here at booking time only; later loads still
    /// tolerate dangling references.
    pub fn book_appointment(
        &mut self,
        patient_id: UserId,
        doctor_id: UserId,
        scheduled_at: Option<i64>,
        note: impl Into<String>,
    ) -> ServiceResult<Appointment> {
        if self.find_patient(patient_id).is_none() {
            return Err(ServiceError::PatientNotFound(patient_id));
        }
        if self.find_doctor(doctor_id).is_none() {
            return Err(ServiceError::DoctorNotFound(doctor_id));
        }

        let appointment = Appointment::create_new(
            patient_id,
            doctor_id,
            scheduled_at,
            note,
            &self.records.appointments,
        )?;
        self.records.appointments.push(appointment.clone());
        if let Err(err) = self.persist() {
            self.records.appointments.pop();
            return Err(err);
        }
        info!(
            "event=appointment_booked module=service status=ok id={} patient_id={} doctor_id={}",
            appointment.id, patient_id, doctor_id
        );
        Ok(appointment)
    }

    fn persist(&self) -> ServiceResult<()> {
        self.store.save_all(
            &self.records.patients,
            &self.records.doctors,
            &self.records.admins,
            &self.records.appointments,
        )?;
        Ok(())
    }
}
