//! Domain entities for hospital records.
//!
//! # Responsibility
//! - Define the record shapes persisted by the store layer.
//! - Provide derived display values (doctor label, gender label, address).
//!
//! # Invariants
//! - Every user-like record carries one shared `UserProfile`.
//! - Optional contact fields are empty strings, never absent.
//! - This layer performs no I/O and never rejects input.

pub mod appointment;
pub mod user;
