//! Runtime for driving an intake session
//!
//! The controller task owns all mutable session data. Presentation talks to
//! it through a cloneable `SessionHandle`: intents go in over a channel and
//! immutable snapshots come back through a watch channel.

mod controller;
pub mod traits;


pub use controller::SessionController;
pub use traits::*;

use crate::intake::{stage, Message, PatientState, PatientStateStore, Transcript, STAGE_NOT_STARTED};
use crate::state_machine::{SessionState, SessionStatus};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Default upper bound on a single exchange
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Controller settings
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub request_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// What presentation can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Send(String),
    Reset,
}

/// Immutable view of the session published after every transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: Option<String>,
    pub status: SessionStatus,
    pub transcript: Vec<Message>,
    pub patient_state: PatientState,
    pub phase: Option<String>,
    pub stage: u8,
    pub complete: bool,
    /// An exchange is in flight
    pub pending: bool,
    /// User-visible notice from a failed start
    pub notice: Option<String>,
}

impl SessionSnapshot {
    pub fn capture(state: &SessionState, transcript: &Transcript, patient: &PatientStateStore) -> Self {
        let session = state.session();
        Self {
            session_id: session.map(|s| s.id.clone()),
            status: state.status(),
            transcript: transcript.messages().to_vec(),
            patient_state: patient.current().clone(),
            phase: session.map(|s| s.phase.clone()),
            stage: session.map_or(STAGE_NOT_STARTED, |s| stage(&s.phase, s.complete)),
            complete: session.is_some_and(|s| s.complete),
            pending: state.is_pending(),
            notice: state.notice().map(str::to_string),
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::capture(
            &SessionState::default(),
            &Transcript::new(),
            &PatientStateStore::new(),
        )
    }
}

/// The controller task has stopped
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Session controller is no longer running")]
    Closed,
}

/// Handle to interact with a running session controller
#[derive(Clone)]
pub struct SessionHandle {
    intent_tx: mpsc::Sender<Intent>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub async fn start(&self) -> Result<(), ControllerError> {
        self.dispatch(Intent::Start).await
    }

    /// Invalid sends (blank text, pending exchange, no active session) are dropped
    pub async fn send(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.dispatch(Intent::Send(text.into())).await
    }

    pub async fn reset(&self) -> Result<(), ControllerError> {
        self.dispatch(Intent::Reset).await
    }

    pub async fn dispatch(&self, intent: Intent) -> Result<(), ControllerError> {
        self.intent_tx
            .send(intent)
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }
}

/// Spawn a controller on the current tokio runtime
pub fn spawn_session<C>(client: C, config: ControllerConfig) -> SessionHandle
where
    C: DialogueClient + 'static,
{
    let (intent_tx, intent_rx) = mpsc::channel(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

    let controller = SessionController::new(client, config, intent_rx, snapshot_tx);
    tokio::spawn(controller.run());

    SessionHandle {
        intent_tx,
        snapshot_rx,
    }
}
