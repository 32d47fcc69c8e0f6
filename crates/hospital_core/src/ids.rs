//! Identifier allocation for hospital records.
//!
//! # Responsibility
//! - Mint the next free identifier per record type from the current
//!   in-memory collection.
//! - Derive default passwords from identifiers.
//!
//! # Invariants
//! - Partitions never overlap: patient `[10000, 19999]`, doctor
//!   `[20000, 89999]`, admin `[90000, u32::MAX]`.
//! - Appointment numbers are a separate counter starting after
//!   `APPOINTMENT_ID_FLOOR`; they share no range with user ids.
//! - Allocation is `max(ids in partition, floor) + 1`; identifiers are
//!   high-water marks and are never recycled.
//! - Allocation is only collision-free when the collection passed in is
//!   complete and current.

use crate::model::appointment::{Appointment, AppointmentId};
use crate::model::user::{Account, Admin, Doctor, Patient, UserId};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type IdResult<T> = Result<T, IdError>;

/// Exclusive lower bound of the appointment counter.
pub const APPOINTMENT_ID_FLOOR: u32 = 0;

/// Reserved numeric range for one user-like record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPartition {
    Patient,
    Doctor,
    Admin,
}

impl IdPartition {
    /// Exclusive lower bound. The first allocated id is `floor() + 1`.
    pub fn floor(self) -> u32 {
        match self {
            Self::Patient => 10_000,
            Self::Doctor => 20_000,
            Self::Admin => 90_000,
        }
    }

    /// Inclusive upper bound.
    pub fn ceiling(self) -> u32 {
        match self {
            Self::Patient => 19_999,
            Self::Doctor => 89_999,
            Self::Admin => u32::MAX,
        }
    }

    pub fn contains(self, id: u32) -> bool {
        (self.floor()..=self.ceiling()).contains(&id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }
}

/// Allocation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    /// The highest id in the partition is already the ceiling.
    PartitionExhausted(IdPartition),
    /// The appointment counter has reached `u32::MAX`.
    AppointmentIdsExhausted,
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PartitionExhausted(partition) => write!(
                f,
                "{} id range exhausted (ceiling {})",
                partition.as_str(),
                partition.ceiling()
            ),
            Self::AppointmentIdsExhausted => {
                write!(f, "appointment id range exhausted (ceiling {})", u32::MAX)
            }
        }
    }
}

impl Error for IdError {}

/// Returns the next free id in `partition`.
///
/// Ids outside the partition are ignored, so a mixed collection is safe.
/// An empty collection (or one with no id in range) yields `floor + 1`.
///
/// # Errors
/// - `IdError::PartitionExhausted` when the ceiling is already taken.
pub fn next_id<I>(partition: IdPartition, existing: I) -> IdResult<u32>
where
    I: IntoIterator<Item = u32>,
{
    next_in_range(
        partition.floor(),
        partition.ceiling(),
        partition.as_str(),
        existing,
    )
    .ok_or(IdError::PartitionExhausted(partition))
}

fn next_in_range<I>(floor: u32, ceiling: u32, label: &str, existing: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    let high_water = existing
        .into_iter()
        .filter(|id| (floor..=ceiling).contains(id))
        .max()
        .unwrap_or(floor);

    let next = high_water.checked_add(1).filter(|id| *id <= ceiling)?;
    debug!("event=id_allocated module=ids status=ok partition={label} id={next}");
    Some(next)
}

pub fn new_patient_id(existing: &[Patient]) -> IdResult<UserId> {
    next_id(IdPartition::Patient, existing.iter().map(Account::id))
}

pub fn new_doctor_id(existing: &[Doctor]) -> IdResult<UserId> {
    next_id(IdPartition::Doctor, existing.iter().map(Account::id))
}

pub fn new_admin_id(existing: &[Admin]) -> IdResult<UserId> {
    next_id(IdPartition::Admin, existing.iter().map(Account::id))
}

/// Next appointment id using the same scan-max-increment discipline.
///
/// # Errors
/// - `IdError::AppointmentIdsExhausted` when `A4294967295` is already taken.
pub fn new_appointment_id(existing: &[Appointment]) -> IdResult<AppointmentId> {
    next_in_range(
        APPOINTMENT_ID_FLOOR,
        u32::MAX,
        "appointment",
        existing.iter().map(|appointment| appointment.id.value()),
    )
    .map(AppointmentId::new)
    .ok_or(IdError::AppointmentIdsExhausted)
}

/// Default password for a freshly minted account. Not a security property.
pub fn derive_password(id: UserId) -> String {
    format!("pw{id}")
}
