//! `RecordCodec` implementations for every persisted record type.

use super::fields::{join_fields, Row};
use super::timestamp::parse_timestamp;
use super::{CodecResult, RecordCodec, FIELD_DELIMITER};
use crate::model::appointment::{Appointment, AppointmentId};
use crate::model::user::{Admin, ContactInfo, Doctor, Patient, UserProfile};

const PATIENT_CONTACT_START: usize = 6;
const DOCTOR_CONTACT_START: usize = 4;
const ADMIN_CONTACT_START: usize = 3;

/// Appointment rows before the `scheduledAt` column existed.
const LEGACY_APPOINTMENT_COLUMNS: usize = 4;

impl RecordCodec for Patient {
    const FILE_NAME: &'static str = "patients.txt";
    const HEADER: &'static str =
        "id,name,password,age,gender,doctorId,email,phone,streetNumber,street,city,state";

    fn encode(&self) -> String {
        let mut columns = vec![
            self.profile.id.to_string(),
            self.profile.name.clone(),
            self.profile.password.clone(),
            self.age.to_string(),
            self.gender.clone(),
            self.doctor_id.map(|id| id.to_string()).unwrap_or_default(),
        ];
        columns.extend(contact_columns(&self.profile.contact));
        join_fields(columns)
    }

    fn decode(line: &str) -> CodecResult<Self> {
        let row = Row::parse(line);
        let profile = profile_from(&row, PATIENT_CONTACT_START)?;
        let age = row.required_number::<i32>(3, "age")?;
        let gender = row.required(4, "gender")?;
        let doctor_id = row.optional_number(5, "doctorId")?;
        Ok(Patient::with_id(profile, age, gender, doctor_id))
    }
}

impl RecordCodec for Doctor {
    const FILE_NAME: &'static str = "doctors.txt";
    const HEADER: &'static str =
        "id,name,password,specialty,email,phone,streetNumber,street,city,state";

    fn encode(&self) -> String {
        let mut columns = vec![
            self.profile.id.to_string(),
            self.profile.name.clone(),
            self.profile.password.clone(),
            self.specialty.clone(),
        ];
        columns.extend(contact_columns(&self.profile.contact));
        join_fields(columns)
    }

    fn decode(line: &str) -> CodecResult<Self> {
        let row = Row::parse(line);
        let profile = profile_from(&row, DOCTOR_CONTACT_START)?;
        let specialty = row.required(3, "specialty")?;
        Ok(Doctor::with_id(profile, specialty))
    }
}

impl RecordCodec for Admin {
    const FILE_NAME: &'static str = "admins.txt";
    const HEADER: &'static str = "id,name,password,email,phone,streetNumber,street,city,state";

    fn encode(&self) -> String {
        let mut columns = vec![
            self.profile.id.to_string(),
            self.profile.name.clone(),
            self.profile.password.clone(),
        ];
        columns.extend(contact_columns(&self.profile.contact));
        join_fields(columns)
    }

    fn decode(line: &str) -> CodecResult<Self> {
        let row = Row::parse(line);
        Ok(Admin::with_id(profile_from(&row, ADMIN_CONTACT_START)?))
    }
}

impl RecordCodec for Appointment {
    const FILE_NAME: &'static str = "appointments.txt";
    const HEADER: &'static str = "id,patientId,doctorId,scheduledAt,note";

    fn encode(&self) -> String {
        join_fields([
            self.id.to_string(),
            self.patient_id.to_string(),
            self.doctor_id.to_string(),
            self.scheduled_at.map(|ms| ms.to_string()).unwrap_or_default(),
            self.note.clone(),
        ])
    }

    /// Accepts the current five-column layout, whose schedule column may hold
    /// epoch milliseconds or a date string, and the legacy
    /// `id,patientId,doctorId,note` layout whose note is raw, unescaped text.
    fn decode(line: &str) -> CodecResult<Self> {
        let row = Row::parse(line);
        let id: AppointmentId = row.required(0, "id")?.parse()?;
        let patient_id = row.required_number(1, "patientId")?;
        let doctor_id = row.required_number(2, "doctorId")?;
        row.required(3, "note")?;

        let fourth = row.optional(3);
        let scheduled_at = parse_timestamp(fourth);
        let has_schedule_column = row.len() > LEGACY_APPOINTMENT_COLUMNS
            && (fourth.trim().is_empty() || scheduled_at.is_some());

        let (scheduled_at, note) = if has_schedule_column {
            (scheduled_at, row.remainder(4))
        } else {
            (None, legacy_note(line).to_string())
        };

        Ok(Appointment::with_id(
            id,
            patient_id,
            doctor_id,
            scheduled_at,
            note,
        ))
    }
}

/// Everything after the third delimiter, exactly as written.
fn legacy_note(line: &str) -> &str {
    line.splitn(LEGACY_APPOINTMENT_COLUMNS, FIELD_DELIMITER)
        .nth(LEGACY_APPOINTMENT_COLUMNS - 1)
        .unwrap_or("")
}

fn profile_from(row: &Row, contact_start: usize) -> CodecResult<UserProfile> {
    let id = row.required_number(0, "id")?;
    let name = row.required(1, "name")?;
    let password = row.required(2, "password")?;
    Ok(UserProfile::new(
        id,
        name,
        password,
        contact_from(row, contact_start),
    ))
}

fn contact_from(row: &Row, start: usize) -> ContactInfo {
    ContactInfo {
        email: row.optional(start).to_string(),
        phone: row.optional(start + 1).to_string(),
        street_number: row.optional(start + 2).to_string(),
        street: row.optional(start + 3).to_string(),
        city: row.optional(start + 4).to_string(),
        state: row.optional(start + 5).to_string(),
    }
}

fn contact_columns(contact: &ContactInfo) -> [String; 6] {
    [
        contact.email.clone(),
        contact.phone.clone(),
        contact.street_number.clone(),
        contact.street.clone(),
        contact.city.clone(),
        contact.state.clone(),
    ]
}
