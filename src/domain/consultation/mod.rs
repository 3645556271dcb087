//! Consultation module - the per-patient traversal of a pathway.
//!
//! Owns the state machine (cursor, history, audit log, outcome), the
//! patient intake context, and the report serializer.

#[allow(clippy::module_inception)]
mod consultation;
mod log;
mod patient;
mod report;

pub use consultation::{Consultation, Outcome, Progress, Selection};
pub use log::LogEntry;
pub use patient::{Gender, PatientContext};
pub use report::render_report;
