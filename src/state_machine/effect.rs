//! Effects produced by state transitions

use crate::intake::{Message, PatientState};
use crate::state_machine::state::RequestTicket;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append to the transcript
    AppendMessage(Message),

    /// Install a new patient-state snapshot, replacing the old one
    ReplacePatientState(PatientState),

    ClearTranscript,

    ClearPatientState,

    /// Open a session with the dialogue service
    RequestStart { ticket: RequestTicket },

    /// Send a user turn to the dialogue service
    RequestReply {
        ticket: RequestTicket,
        message: String,
    },
}

impl Effect {
    pub fn append_user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage(Message::user(text))
    }

    pub fn append_assistant_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage(Message::assistant(text))
    }
}
