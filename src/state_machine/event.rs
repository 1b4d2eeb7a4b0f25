//! Events that can occur in a session

use crate::api::{ApiErrorKind, ChatResponse};
use crate::state_machine::state::RequestTicket;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User intents
    Start {
        request_id: u64,
    },
    Send {
        text: String,
        request_id: u64,
    },
    Reset,

    // Exchange completions
    StartSucceeded {
        ticket: RequestTicket,
        response: ChatResponse,
    },
    StartFailed {
        ticket: RequestTicket,
        message: String,
        error_kind: ApiErrorKind,
    },
    ReplySucceeded {
        ticket: RequestTicket,
        response: ChatResponse,
    },
    ReplyFailed {
        ticket: RequestTicket,
        message: String,
        error_kind: ApiErrorKind,
    },
}

impl Event {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start { .. } => "start",
            Event::Send { .. } => "send",
            Event::Reset => "reset",
            Event::StartSucceeded { .. } => "start_succeeded",
            Event::StartFailed { .. } => "start_failed",
            Event::ReplySucceeded { .. } => "reply_succeeded",
            Event::ReplyFailed { .. } => "reply_failed",
        }
    }
}
