//! Intake record types
//!
//! The leaf data the session controller owns: the phase-to-stage mapping,
//! the message transcript, and the patient-state snapshot store.

pub mod patient;
pub mod phase;
mod store;
mod transcript;

pub use patient::PatientState;
pub use phase::{stage, Phase, StepStatus, STAGE_NOT_STARTED};
pub use store::PatientStateStore;
pub use transcript::{Message, Role, Transcript};
