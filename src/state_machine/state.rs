//! Session state types

use serde::{Deserialize, Serialize};

/// Identity of one network exchange.
///
/// A completion is applied only when the state is still waiting on exactly
/// this ticket; anything else is a stale response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    /// Monotonic per controller, never reused across resets
    pub request_id: u64,
    /// Session the request was issued for (`None` for the start exchange)
    pub session_id: Option<String>,
}

impl RequestTicket {
    pub fn start(request_id: u64) -> Self {
        Self {
            request_id,
            session_id: None,
        }
    }

    pub fn reply(request_id: u64, session_id: impl Into<String>) -> Self {
        Self {
            request_id,
            session_id: Some(session_id.into()),
        }
    }
}

/// An open intake session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Issued by the dialogue service; fixed for the session's life
    pub id: String,
    pub phase: String,
    /// Only ever goes from false to true
    pub complete: bool,
}

/// Conversation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// No session. Carries the notice from a failed start, if any.
    Idle { notice: Option<String> },

    /// Start exchange in flight, no session yet
    Starting { ticket: RequestTicket },

    /// Session open; `pending` is the in-flight reply, if any
    Active {
        session: Session,
        pending: Option<RequestTicket>,
    },

    /// Terminal: no further turns accepted
    Complete { session: Session },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle { notice: None }
    }
}

/// Coarse status exposed to presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Active,
    Complete,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Idle { .. } | SessionState::Starting { .. } => SessionStatus::Idle,
            SessionState::Active { .. } => SessionStatus::Active,
            SessionState::Complete { .. } => SessionStatus::Complete,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Active { session, .. } | SessionState::Complete { session } => {
                Some(session)
            }
            SessionState::Idle { .. } | SessionState::Starting { .. } => None,
        }
    }

    /// The exchange currently awaited, if any
    pub fn in_flight(&self) -> Option<&RequestTicket> {
        match self {
            SessionState::Starting { ticket } => Some(ticket),
            SessionState::Active {
                pending: Some(ticket),
                ..
            } => Some(ticket),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight().is_some()
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            SessionState::Idle { notice } => notice.as_deref(),
            _ => None,
        }
    }
}
