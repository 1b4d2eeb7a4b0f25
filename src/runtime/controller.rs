//! Session controller event loop

use super::traits::DialogueClient;
use super::{ControllerConfig, Intent, SessionSnapshot};

use crate::api::{ApiError, ChatResponse, ReplyRequest};
use crate::intake::{PatientStateStore, Phase, Transcript};
use crate::state_machine::{transition, Effect, Event, RequestTicket, SessionState};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Owns the session state, transcript and patient record.
///
/// Intents and exchange completions are processed one at a time; network
/// exchanges run on spawned tasks and report back through `event_tx`.
pub struct SessionController<C>
where
    C: DialogueClient + 'static,
{
    state: SessionState,
    transcript: Transcript,
    patient: PatientStateStore,
    client: Arc<C>,
    config: ControllerConfig,
    next_request_id: u64,
    intent_rx: mpsc::Receiver<Intent>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<C> SessionController<C>
where
    C: DialogueClient + 'static,
{
    pub fn new(
        client: C,
        config: ControllerConfig,
        intent_rx: mpsc::Receiver<Intent>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(8);
        Self {
            state: SessionState::default(),
            transcript: Transcript::new(),
            patient: PatientStateStore::new(),
            client: Arc::new(client),
            config,
            next_request_id: 0,
            intent_rx,
            event_rx,
            event_tx,
            snapshot_tx,
        }
    }

    /// Run until every handle has been dropped
    pub async fn run(mut self) {
        tracing::info!("Starting session controller");

        loop {
            tokio::select! {
                // Intents first, so they are handled in the order issued
                biased;
                intent = self.intent_rx.recv() => match intent {
                    Some(intent) => {
                        let event = self.intent_event(intent);
                        self.process_event(event);
                    }
                    None => break,
                },
                Some(event) = self.event_rx.recv() => self.process_event(event),
            }
        }

        tracing::info!("Session controller stopped");
    }

    fn intent_event(&mut self, intent: Intent) -> Event {
        match intent {
            Intent::Start => Event::Start {
                request_id: self.next_request_id(),
            },
            Intent::Send(text) => Event::Send {
                text,
                request_id: self.next_request_id(),
            },
            Intent::Reset => Event::Reset,
        }
    }

    fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    fn process_event(&mut self, event: Event) {
        let name = event.name();
        if let Event::StartFailed {
            message, error_kind, ..
        }
        | Event::ReplyFailed {
            message, error_kind, ..
        } = &event
        {
            tracing::warn!(event = name, kind = ?error_kind, error = %message, "Exchange failed");
        }

        // Pure state transition
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                // Invalid intents and stale completions are dropped silently
                tracing::debug!(event = name, reason = %e, "Event ignored");
                return;
            }
        };

        let old_phase = self.state.session().map(|s| s.phase.clone());
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }

        if let Some(session) = self.state.session() {
            if old_phase.as_deref() != Some(session.phase.as_str()) {
                let phase = Phase::from_label(&session.phase);
                if phase.is_recognized() {
                    tracing::info!(session_id = %session.id, phase = %session.phase, "Phase changed");
                } else {
                    tracing::debug!(session_id = %session.id, phase = %session.phase, "Unrecognized phase label");
                }
            }
        }

        self.publish();
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage(message) => self.transcript.append(message),
            Effect::ReplacePatientState(snapshot) => self.patient.replace(snapshot),
            Effect::ClearTranscript => self.transcript.clear(),
            Effect::ClearPatientState => self.patient.clear(),
            Effect::RequestStart { ticket } => self.spawn_start(ticket),
            Effect::RequestReply { ticket, message } => self.spawn_reply(ticket, message),
        }
    }

    fn spawn_start(&self, ticket: RequestTicket) {
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        let limit = self.config.request_timeout;

        tokio::spawn(async move {
            let event = match bounded(limit, client.start()).await {
                Ok(response) => Event::StartSucceeded { ticket, response },
                Err(e) => Event::StartFailed {
                    ticket,
                    message: e.message,
                    error_kind: e.kind,
                },
            };
            // Controller gone means nobody is left to show the result to
            let _ = event_tx.send(event).await;
        });
    }

    fn spawn_reply(&self, ticket: RequestTicket, message: String) {
        let Some(session_id) = ticket.session_id.clone() else {
            tracing::error!(request_id = ticket.request_id, "Reply requested without a session");
            return;
        };
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        let limit = self.config.request_timeout;

        tokio::spawn(async move {
            let request = ReplyRequest {
                session_id,
                message,
            };
            let event = match bounded(limit, client.reply(&request)).await {
                Ok(response) => Event::ReplySucceeded { ticket, response },
                Err(e) => Event::ReplyFailed {
                    ticket,
                    message: e.message,
                    error_kind: e.kind,
                },
            };
            let _ = event_tx.send(event).await;
        });
    }

    fn publish(&self) {
        let snapshot = SessionSnapshot::capture(&self.state, &self.transcript, &self.patient);
        self.snapshot_tx.send_replace(snapshot);
    }
}

/// Apply the exchange timeout; expiry is an ordinary classified failure
async fn bounded<F>(limit: Duration, exchange: F) -> Result<ChatResponse, ApiError>
where
    F: Future<Output = Result<ChatResponse, ApiError>>,
{
    if let Ok(result) = tokio::time::timeout(limit, exchange).await {
        result
    } else {
        tracing::warn!(timeout_ms = %limit.as_millis(), "Dialogue exchange timed out");
        Err(ApiError::timeout(format!(
            "No response within {}ms",
            limit.as_millis()
        )))
    }
}
