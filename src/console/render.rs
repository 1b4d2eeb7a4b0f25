//! Plain-text rendering of session snapshots

use crate::intake::patient::{MedHistoryFact, TriageSummary};
use crate::intake::{Message, PatientState, Phase, Role, StepStatus};
use crate::runtime::SessionSnapshot;
use crate::state_machine::SessionStatus;
use std::fmt::Write;

pub const WELCOME: &str = "Welcome to ClinicAssist\n\
Your AI-powered clinical assistant for patient intake and triage.\n\
Type /start to begin, /help for commands.";

pub const HELP: &str = "Commands:\n  \
/start    begin a conversation\n  \
/reset    discard this session and start over (alias /new)\n  \
/summary  show the patient summary\n  \
/quit     exit\n\
Anything else is sent as your reply.";

pub const COMPLETE_BANNER: &str = "✓ Conversation complete! All information has been collected.";

const NOT_KNOWN: &str = "—";

/// Four-step progress line, e.g. `✓ Patient Info ── [2] Symptoms ── 3 Medical History ── 4 Triage`
pub fn progress_bar(stage: u8) -> String {
    Phase::STEPS
        .iter()
        .zip(1u8..)
        .map(|(phase, step)| match StepStatus::for_step(step, stage) {
            StepStatus::Done => format!("✓ {}", phase.display_name()),
            StepStatus::Current => format!("[{step}] {}", phase.display_name()),
            StepStatus::Upcoming => format!("{step} {}", phase.display_name()),
        })
        .collect::<Vec<_>>()
        .join(" ── ")
}

pub fn message_line(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    format!("{speaker}: {}", message.content)
}

/// Sidebar-style summary; unknown fields read "Awaiting ..." rather than failing
pub fn patient_summary(state: &PatientState) -> String {
    let mut out = String::from("== Patient Summary ==\n");

    out.push_str("Demographics\n");
    if state.has_demographics() {
        let age = state.age.map(|a| format!("{a} years"));
        let sex = state.sex.map(|s| s.to_string());
        let _ = writeln!(out, "  Name: {}", state.name.as_deref().unwrap_or(NOT_KNOWN));
        let _ = writeln!(out, "  Age: {}", age.as_deref().unwrap_or(NOT_KNOWN));
        let _ = writeln!(out, "  Sex: {}", sex.as_deref().unwrap_or(NOT_KNOWN));
    } else {
        out.push_str("  Awaiting patient information...\n");
    }

    out.push_str("Chief Complaint\n");
    if state.has_symptoms() {
        push_list(&mut out, "Presenting symptoms", state.main_symptoms.as_deref());
        if let Some(onset) = &state.symptom_onset {
            let _ = writeln!(out, "  Onset: {onset}");
        }
        push_list(&mut out, "Associated symptoms", state.associated_symptoms.as_deref());
        push_list(&mut out, "Clinical notes", state.additional_symptom_info.as_deref());
    } else {
        out.push_str("  Awaiting symptom details...\n");
    }

    out.push_str("Medical History\n");
    if state.has_medical_history() {
        for fact in state.medical_history.iter().flatten() {
            push_fact(&mut out, fact);
        }
    } else {
        out.push_str("  Awaiting medical history...\n");
    }

    if let Some(summary) = &state.generated_summary {
        out.push_str("Clinical Assessment\n");
        push_assessment(&mut out, summary);
    }

    out
}

fn push_list(out: &mut String, title: &str, items: Option<&[String]>) {
    let Some(items) = items.filter(|items| !items.is_empty()) else {
        return;
    };
    let _ = writeln!(out, "  {title}:");
    for item in items {
        let _ = writeln!(out, "    - {item}");
    }
}

fn push_fact(out: &mut String, fact: &MedHistoryFact) {
    let _ = writeln!(out, "  [{}] {}", fact.category, fact.question);
    let _ = writeln!(out, "    {}", fact.answer);
    if let Some(details) = &fact.additional_details {
        let _ = writeln!(out, "    ({details})");
    }
}

fn push_assessment(out: &mut String, summary: &TriageSummary) {
    let _ = writeln!(out, "  Urgency: {}", summary.urgency);
    let _ = writeln!(out, "    {}", summary.reason_for_urgency);
    let _ = writeln!(out, "  Probable diagnosis: {}", summary.probable_diagnosis);
    let _ = writeln!(out, "    {}", summary.reason_for_diagnosis);
}

/// Tracks what has already been printed so each snapshot only adds the delta
#[derive(Debug, Default)]
pub struct ConsoleView {
    printed_messages: usize,
    stage: Option<u8>,
    pending: bool,
    complete: bool,
    session_id: Option<String>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to print for the move from the previous snapshot to `snapshot`
    pub fn update(&mut self, snapshot: &SessionSnapshot) -> String {
        let mut out = String::new();

        if snapshot.session_id != self.session_id {
            if self.session_id.is_some() {
                out.push_str("-- session ended --\n");
            }
            self.printed_messages = 0;
            self.stage = None;
            self.complete = false;
            self.session_id.clone_from(&snapshot.session_id);
        }

        if snapshot.status == SessionStatus::Idle {
            if snapshot.pending && !self.pending {
                out.push_str("Starting...\n");
            }
            if let Some(notice) = &snapshot.notice {
                let _ = writeln!(out, "! {notice}");
            }
            self.pending = snapshot.pending;
            return out;
        }

        if self.stage != Some(snapshot.stage) {
            let _ = writeln!(out, "{}", progress_bar(snapshot.stage));
            self.stage = Some(snapshot.stage);
        }

        // Transcript entries are append-only within a session
        for message in snapshot.transcript.iter().skip(self.printed_messages) {
            let _ = writeln!(out, "{}", message_line(message));
        }
        self.printed_messages = snapshot.transcript.len();

        if snapshot.pending && !self.pending {
            out.push_str("...\n");
        }
        self.pending = snapshot.pending;

        if snapshot.complete && !self.complete {
            let _ = writeln!(out, "{COMPLETE_BANNER}");
            out.push_str(&patient_summary(&snapshot.patient_state));
            self.complete = true;
        }

        out
    }
}
