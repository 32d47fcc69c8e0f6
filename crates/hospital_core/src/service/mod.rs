//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate allocator, model and store calls into use-case APIs.
//! - Keep console callers decoupled from file layout details.

pub mod hospital_service;
