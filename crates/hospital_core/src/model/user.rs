//! User-like records: patients, doctors and administrators.
//!
//! # Responsibility
//! - Hold the shared profile fields and per-role extensions.
//! - Offer rehydration constructors (`with_id`) and minting factories
//!   (`create_new`) backed by the identifier allocator.
//!
//! # Invariants
//! - `with_id` never consults the allocator.
//! - `create_new` always yields an id inside the role partition and the
//!   derived `"pw<id>"` password.

use crate::ids::{derive_password, new_admin_id, new_doctor_id, new_patient_id, IdResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Numeric identifier shared by every user-like record.
pub type UserId = u32;

const ADDRESS_NOT_PROVIDED: &str = "Not provided";
const DOCTOR_PREFIX: &str = "Dr.";

static EDGE_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s,]+|[\s,]+$").expect("valid separator regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Optional contact and postal fields.
///
/// Every field defaults to an empty string when absent from input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub street_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
}

impl ContactInfo {
    /// Formats `"<number> <street>, <city>, <state>"`.
    ///
    /// Blank components are dropped without leaving dangling separators.
    /// Returns `"Not provided"` when no component has content.
    pub fn formatted_address(&self) -> String {
        let street_line = join_present(&[self.street_number.as_str(), self.street.as_str()], " ");
        let address = join_present(
            &[street_line.as_str(), self.city.as_str(), self.state.as_str()],
            ", ",
        );
        if address.is_empty() {
            return ADDRESS_NOT_PROVIDED.to_string();
        }
        address
    }
}

/// Joins the non-blank parts after stripping edge separators and collapsing
/// inner whitespace.
fn join_present(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|&part| {
            let part = EDGE_SEPARATOR_RE.replace_all(part, "");
            WHITESPACE_RE.replace_all(&part, " ").into_owned()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Fields shared by every user-like record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl UserProfile {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        password: impl Into<String>,
        contact: ContactInfo,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            password: password.into(),
            contact,
        }
    }

    /// See [`ContactInfo::formatted_address`].
    pub fn formatted_address(&self) -> String {
        self.contact.formatted_address()
    }

    /// Plain equality check; no hashing is applied to stored passwords.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Read access to the shared profile of a concrete record.
pub trait Account {
    fn profile(&self) -> &UserProfile;

    fn id(&self) -> UserId {
        self.profile().id
    }

    fn name(&self) -> &str {
        self.profile().name.as_str()
    }
}

/// Patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub profile: UserProfile,
    /// Not range-checked; callers validate numeric input before construction.
    pub age: i32,
    /// Free-form code. `M` and `W` have dedicated display labels.
    pub gender: String,
    /// Assigned doctor, if any. Not checked against loaded doctors.
    pub doctor_id: Option<UserId>,
}

/// Input for minting a new patient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub doctor_id: Option<UserId>,
    pub contact: ContactInfo,
}

impl Patient {
    /// Rehydrates a patient with a known identifier.
    pub fn with_id(
        profile: UserProfile,
        age: i32,
        gender: impl Into<String>,
        doctor_id: Option<UserId>,
    ) -> Self {
        Self {
            profile,
            age,
            gender: gender.into(),
            doctor_id,
        }
    }

    /// Mints a patient with the next free patient id and derived password.
    ///
    /// # Errors
    /// - Returns `IdError::PartitionExhausted` when the patient range is full.
    pub fn create_new(request: NewPatient, existing: &[Patient]) -> IdResult<Self> {
        let id = new_patient_id(existing)?;
        let profile = UserProfile::new(id, request.name, derive_password(id), request.contact);
        Ok(Self::with_id(
            profile,
            request.age,
            request.gender,
            request.doctor_id,
        ))
    }

    /// Display label for the stored gender code.
    ///
    /// - `M` -> `Man`, `W` -> `Woman`
    /// - blank -> `Unknown`
    /// - anything else is returned verbatim
    pub fn gender_label(&self) -> &str {
        match self.gender.trim() {
            "" => "Unknown",
            "M" => "Man",
            "W" => "Woman",
            _ => self.gender.as_str(),
        }
    }

    pub fn is_assigned_to(&self, doctor_id: UserId) -> bool {
        self.doctor_id == Some(doctor_id)
    }
}

impl Account for Patient {
    fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

/// Doctor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub profile: UserProfile,
    pub specialty: String,
}

/// Input for minting a new doctor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub contact: ContactInfo,
}

impl Doctor {
    pub fn with_id(profile: UserProfile, specialty: impl Into<String>) -> Self {
        Self {
            profile,
            specialty: specialty.into(),
        }
    }

    /// Mints a doctor with the next free doctor id and derived password.
    ///
    /// # Errors
    /// - Returns `IdError::PartitionExhausted` when the doctor range is full.
    pub fn create_new(request: NewDoctor, existing: &[Doctor]) -> IdResult<Self> {
        let id = new_doctor_id(existing)?;
        let profile = UserProfile::new(id, request.name, derive_password(id), request.contact);
        Ok(Self::with_id(profile, request.specialty))
    }

    /// Returns the name with exactly one `Dr.` prefix.
    ///
    /// Names already starting with `dr.` (any case, leading whitespace
    /// ignored) are returned unchanged.
    pub fn display_name(&self) -> String {
        let name = self.profile.name.as_str();
        let head = name.trim_start();
        let has_prefix = head
            .get(..DOCTOR_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DOCTOR_PREFIX));
        if has_prefix {
            name.to_string()
        } else {
            format!("{DOCTOR_PREFIX} {name}")
        }
    }
}

impl Account for Doctor {
    fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

/// Administrator record. Carries only the shared profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub profile: UserProfile,
}

/// Input for minting a new administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAdmin {
    pub name: String,
    pub contact: ContactInfo,
}

impl Admin {
    pub fn with_id(profile: UserProfile) -> Self {
        Self { profile }
    }

    /// Mints an admin with the next free admin id and derived password.
    pub fn create_new(request: NewAdmin, existing: &[Admin]) -> IdResult<Self> {
        let id = new_admin_id(existing)?;
        let profile = UserProfile::new(id, request.name, derive_password(id), request.contact);
        Ok(Self::with_id(profile))
    }
}

impl Account for Admin {
    fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

/// Role tag for a user-like record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }
}

/// Closed set of user-like records sharing one profile shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum User {
    Patient(Patient),
    Doctor(Doctor),
    Admin(Admin),
}

impl User {
    pub fn role(&self) -> Role {
        match self {
            Self::Patient(_) => Role::Patient,
            Self::Doctor(_) => Role::Doctor,
            Self::Admin(_) => Role::Admin,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        match self {
            Self::Patient(patient) => &patient.profile,
            Self::Doctor(doctor) => &doctor.profile,
            Self::Admin(admin) => &admin.profile,
        }
    }

    /// One-line summary used by list views.
    pub fn summary(&self) -> String {
        match self {
            Self::Patient(patient) => format!(
                "{} | {} | Age:{} | Gender:{} | Doctor:{}",
                patient.profile.id,
                patient.profile.name,
                patient.age,
                patient.gender_label(),
                patient
                    .doctor_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ),
            Self::Doctor(doctor) => format!(
                "{} | {} | {}",
                doctor.profile.id,
                doctor.display_name(),
                doctor.specialty
            ),
            Self::Admin(admin) => format!("{} | {}", admin.profile.id, admin.profile.name),
        }
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl From<Patient> for User {
    fn from(value: Patient) -> Self {
        Self::Patient(value)
    }
}

impl From<Doctor> for User {
    fn from(value: Doctor) -> Self {
        Self::Doctor(value)
    }
}

impl From<Admin> for User {
    fn from(value: Admin) -> Self {
        Self::Admin(value)
    }
}
