//! Pure state transition function

use super::state::{RequestTicket, Session};
use super::{Effect, Event, SessionState};
use crate::api::ChatResponse;
use thiserror::Error;

/// Opening line when the service supplies none
pub const FALLBACK_GREETING: &str = "Hello! Let's get started.";

/// Assistant turn appended when a reply exchange fails
pub const REPLY_FAILURE_MESSAGE: &str = "Sorry, there was an error processing your message.";

/// Notice shown while Idle after a failed start
pub const START_FAILURE_NOTICE: &str =
    "Failed to start conversation. Make sure the backend is running.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Why an event was not applied.
///
/// None of these are user-facing: invalid intents are dropped on purpose and
/// stale completions are discarded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A session is already open or starting")]
    NotIdle,
    #[error("No active session")]
    NotActive,
    #[error("An exchange is already in flight")]
    RequestInFlight,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Stale response for request {request_id}")]
    StaleResponse { request_id: u64 },
}

/// Pure transition function.
///
/// Given the same state and event it always produces the same result; all
/// I/O is described by the returned effects.
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Intents
        // ============================================================
        (_, Event::Reset) => Ok(TransitionResult::new(SessionState::default())
            .with_effect(Effect::ClearTranscript)
            .with_effect(Effect::ClearPatientState)),

        (SessionState::Idle { .. }, Event::Start { request_id }) => {
            let ticket = RequestTicket::start(request_id);
            Ok(TransitionResult::new(SessionState::Starting {
                ticket: ticket.clone(),
            })
            .with_effect(Effect::RequestStart { ticket }))
        }

        (SessionState::Starting { .. }, Event::Start { .. }) => Err(TransitionError::RequestInFlight),

        (_, Event::Start { .. }) => Err(TransitionError::NotIdle),

        (
            SessionState::Active {
                pending: Some(_), ..
            },
            Event::Send { .. },
        ) => Err(TransitionError::RequestInFlight),

        (
            SessionState::Active {
                session,
                pending: None,
            },
            Event::Send { text, request_id },
        ) => {
            let message = text.trim();
            if message.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }

            let ticket = RequestTicket::reply(request_id, session.id.clone());
            Ok(TransitionResult::new(SessionState::Active {
                session: session.clone(),
                pending: Some(ticket.clone()),
            })
            .with_effect(Effect::append_user_message(message))
            .with_effect(Effect::RequestReply {
                ticket,
                message: message.to_string(),
            }))
        }

        (_, Event::Send { .. }) => Err(TransitionError::NotActive),

        // ============================================================
        // Start completion
        // ============================================================
        (SessionState::Starting { ticket }, Event::StartSucceeded { ticket: done, response })
            if *ticket == done =>
        {
            let ChatResponse {
                session_id,
                assistant_message,
                state: patient_state,
                phase,
                is_complete,
            } = response;

            let greeting = non_empty(assistant_message).unwrap_or_else(|| FALLBACK_GREETING.to_string());
            let session = Session {
                id: session_id,
                phase,
                complete: is_complete,
            };

            Ok(TransitionResult::new(settle(session))
                .with_effect(Effect::append_assistant_message(greeting))
                .with_effect(Effect::ReplacePatientState(patient_state)))
        }

        (SessionState::Starting { ticket }, Event::StartFailed { ticket: done, .. })
            if *ticket == done =>
        {
            Ok(TransitionResult::new(SessionState::Idle {
                notice: Some(START_FAILURE_NOTICE.to_string()),
            }))
        }

        // ============================================================
        // Reply completion
        // ============================================================
        (
            SessionState::Active {
                session,
                pending: Some(ticket),
            },
            Event::ReplySucceeded { ticket: done, response },
        ) if *ticket == done => {
            let ChatResponse {
                assistant_message,
                state: patient_state,
                phase,
                is_complete,
                ..
            } = response;

            let session = Session {
                id: session.id.clone(),
                phase,
                complete: session.complete || is_complete,
            };

            Ok(TransitionResult::new(settle(session))
                .with_effects(non_empty(assistant_message).map(Effect::append_assistant_message))
                .with_effect(Effect::ReplacePatientState(patient_state)))
        }

        (
            SessionState::Active {
                session,
                pending: Some(ticket),
            },
            Event::ReplyFailed { ticket: done, .. },
        ) if *ticket == done => Ok(TransitionResult::new(SessionState::Active {
            session: session.clone(),
            pending: None,
        })
        .with_effect(Effect::append_assistant_message(REPLY_FAILURE_MESSAGE))),

        // Anything else is a completion nobody is waiting for
        (
            _,
            Event::StartSucceeded { ticket, .. }
            | Event::StartFailed { ticket, .. }
            | Event::ReplySucceeded { ticket, .. }
            | Event::ReplyFailed { ticket, .. },
        ) => Err(TransitionError::StaleResponse {
            request_id: ticket.request_id,
        }),
    }
}

/// Active, or Complete once the service says so
fn settle(session: Session) -> SessionState {
    if session.complete {
        SessionState::Complete { session }
    } else {
        SessionState::Active {
            session,
            pending: None,
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}
