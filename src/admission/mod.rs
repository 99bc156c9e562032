//! Admission Module
//!
//! Concurrency ceiling applied around request handling.

mod gate;

pub use gate::{AdmissionGate, AdmissionPermit};
