//! Holder for the latest patient-state snapshot

use super::PatientState;

/// Holds exactly one patient-state snapshot.
///
/// There is deliberately no patch or merge operation: the dialogue service
/// always returns the complete current view, and `replace` installs it as-is.
#[derive(Debug, Clone, Default)]
pub struct PatientStateStore {
    current: PatientState,
}

impl PatientStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the held snapshot
    pub fn replace(&mut self, snapshot: PatientState) {
        self.current = snapshot;
    }

    pub fn current(&self) -> &PatientState {
        &self.current
    }

    /// Back to the all-absent snapshot
    pub fn clear(&mut self) {
        self.current = PatientState::default();
    }
}
