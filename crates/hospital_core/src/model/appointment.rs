//! Appointment domain model.
//!
//! # Invariants
//! - `patient_id`/`doctor_id` are not validated against loaded records;
//!   readers must tolerate dangling references.
//! - Appointment ids live in their own `A<number>` namespace.

use super::user::UserId;
use crate::ids::{new_appointment_id, IdResult};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const APPOINTMENT_ID_PREFIX: char = 'A';

/// Appointment identifier rendered as `A` plus a zero-padded counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(u32);

impl AppointmentId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Display for AppointmentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{APPOINTMENT_ID_PREFIX}{:05}", self.0)
    }
}

/// Error for appointment id text that is neither `A<digits>` nor `<digits>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAppointmentIdError(pub String);

impl Display for ParseAppointmentIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid appointment id `{}`", self.0)
    }
}

impl Error for ParseAppointmentIdError {}

impl FromStr for AppointmentId {
    type Err = ParseAppointmentIdError;

    /// Accepts `A00012`, `a12` and bare legacy integers such as `12`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix(APPOINTMENT_ID_PREFIX)
            .or_else(|| trimmed.strip_prefix(APPOINTMENT_ID_PREFIX.to_ascii_lowercase()))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseAppointmentIdError(value.to_string()));
        }
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ParseAppointmentIdError(value.to_string()))
    }
}

/// Scheduled visit between one patient and one doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: UserId,
    pub doctor_id: UserId,
    /// Unix epoch milliseconds. `None` for rows written before the column existed.
    pub scheduled_at: Option<i64>,
    /// Free text; may contain the field delimiter.
    pub note: String,
}

impl Appointment {
    /// Rehydrates an appointment with a known identifier.
    pub fn with_id(
        id: AppointmentId,
        patient_id: UserId,
        doctor_id: UserId,
        scheduled_at: Option<i64>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            patient_id,
            doctor_id,
            scheduled_at,
            note: note.into(),
        }
    }

    /// Creates an appointment with the next free appointment id.
    pub fn create_new(
        patient_id: UserId,
        doctor_id: UserId,
        scheduled_at: Option<i64>,
        note: impl Into<String>,
        existing: &[Appointment],
    ) -> IdResult<Self> {
        let id = new_appointment_id(existing)?;
        Ok(Self::with_id(id, patient_id, doctor_id, scheduled_at, note))
    }

    /// Raw summary; resolve names through the service for display.
    pub fn summary(&self) -> String {
        format!(
            "{} | P:{} | D:{} | {}",
            self.id, self.patient_id, self.doctor_id, self.note
        )
    }
}
