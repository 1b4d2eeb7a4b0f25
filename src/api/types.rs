//! Wire types for the dialogue service

use crate::intake::PatientState;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/reply`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub session_id: String,
    pub message: String,
}

/// Response body of both the start and the reply exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    /// `None` means the service had nothing to say this turn
    #[serde(default)]
    pub assistant_message: Option<String>,
    pub state: PatientState,
    pub phase: String,
    pub is_complete: bool,
}
