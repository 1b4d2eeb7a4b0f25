//! Phase label to progress stage mapping
//!
//! The dialogue service reports which part of the intake is active as a
//! free-text label. Only four labels are recognized; anything else is an
//! explicit `Unrecognized` case rather than a guess.

/// Stage shown before any recognized phase has been reported
pub const STAGE_NOT_STARTED: u8 = 0;

/// Terminal stage: every step is shown as done
pub const STAGE_COMPLETE: u8 = 5;

const COMPLETE_LABEL: &str = "Complete";

/// A phase of the intake dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    PatientInfo,
    Symptoms,
    MedicalHistory,
    Triage,
    Complete,
    /// A label the client does not know about
    Unrecognized(String),
}

impl Phase {
    /// The recognized in-progress phases, in dialogue order
    pub const STEPS: [Phase; 4] = [
        Phase::PatientInfo,
        Phase::Symptoms,
        Phase::MedicalHistory,
        Phase::Triage,
    ];

    /// Parse a label by exact comparison
    pub fn from_label(label: &str) -> Self {
        match label {
            "Gathering patient demographic details" => Phase::PatientInfo,
            "Symptoms collection" => Phase::Symptoms,
            "Medical/health history" => Phase::MedicalHistory,
            "Triage & summary" => Phase::Triage,
            COMPLETE_LABEL => Phase::Complete,
            other => Phase::Unrecognized(other.to_string()),
        }
    }

    /// The label the service uses for this phase
    #[allow(dead_code)] // API completeness
    pub fn label(&self) -> &str {
        match self {
            Phase::PatientInfo => "Gathering patient demographic details",
            Phase::Symptoms => "Symptoms collection",
            Phase::MedicalHistory => "Medical/health history",
            Phase::Triage => "Triage & summary",
            Phase::Complete => COMPLETE_LABEL,
            Phase::Unrecognized(label) => label,
        }
    }

    /// Short name for progress displays
    pub fn display_name(&self) -> &str {
        match self {
            Phase::PatientInfo => "Patient Info",
            Phase::Symptoms => "Symptoms",
            Phase::MedicalHistory => "Medical History",
            Phase::Triage => "Triage",
            Phase::Complete => "Complete",
            Phase::Unrecognized(_) => "Not started",
        }
    }

    /// Stage ordinal for this phase, ignoring the completion flag
    pub fn stage(&self) -> u8 {
        match self {
            Phase::PatientInfo => 1,
            Phase::Symptoms => 2,
            Phase::MedicalHistory => 3,
            Phase::Triage => 4,
            Phase::Complete => STAGE_COMPLETE,
            Phase::Unrecognized(_) => STAGE_NOT_STARTED,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Phase::Unrecognized(_))
    }
}

/// Map a phase label and completion flag to a stage in `0..=5`.
///
/// Completion wins over the label. Unknown labels are "not started".
pub fn stage(phase_label: &str, complete: bool) -> u8 {
    if complete {
        return STAGE_COMPLETE;
    }
    Phase::from_label(phase_label).stage()
}

/// How a progress step relates to the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Upcoming,
}

impl StepStatus {
    /// Status of the step with 1-based ordinal `step` when the dialogue is at `current`
    pub fn for_step(step: u8, current: u8) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }
}
