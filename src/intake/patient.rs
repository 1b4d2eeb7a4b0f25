//! Structured patient record returned by the dialogue service
//!
//! Every field is optional: `null`, a missing key and `{}` all mean "not yet
//! known". Wire names follow the service's JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("Male"),
            Sex::Female => f.write_str("Female"),
        }
    }
}

/// Category of a medical/health history fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedHistoryCategory {
    Allergy,
    Medication,
    PastCondition,
    Surgery,
    FamilyHistory,
    Social,
    Immunization,
    Obgyn,
    Other,
}

impl MedHistoryCategory {
    /// Wire name, e.g. `past_condition`
    pub fn as_str(self) -> &'static str {
        match self {
            MedHistoryCategory::Allergy => "allergy",
            MedHistoryCategory::Medication => "medication",
            MedHistoryCategory::PastCondition => "past_condition",
            MedHistoryCategory::Surgery => "surgery",
            MedHistoryCategory::FamilyHistory => "family_history",
            MedHistoryCategory::Social => "social",
            MedHistoryCategory::Immunization => "immunization",
            MedHistoryCategory::Obgyn => "obgyn",
            MedHistoryCategory::Other => "other",
        }
    }
}

impl fmt::Display for MedHistoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// One question/answer pair from the history phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedHistoryFact {
    pub category: MedHistoryCategory,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

/// Triage urgency, most urgent first.
///
/// The derived ordering follows declaration order, so `Emergency < NonUrgent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "EMERGENCY")]
    Emergency,
    #[serde(rename = "URGENT")]
    Urgent,
    #[serde(rename = "SEMI-URGENT")]
    SemiUrgent,
    #[serde(rename = "NON-URGENT")]
    NonUrgent,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Emergency => "EMERGENCY",
            Urgency::Urgent => "URGENT",
            Urgency::SemiUrgent => "SEMI-URGENT",
            Urgency::NonUrgent => "NON-URGENT",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated assessment from the triage phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSummary {
    pub probable_diagnosis: String,
    pub reason_for_diagnosis: String,
    pub urgency: Urgency,
    pub reason_for_urgency: String,
}

/// Complete current view of what has been collected about the patient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientState {
    #[serde(rename = "patient_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "patient_age", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "patient_sex", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_symptoms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom_onset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_symptoms: Option<Vec<String>>,
    /// Free-text clinical notes: severity, triggers, alleviating factors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_symptom_info: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<MedHistoryFact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_summary: Option<TriageSummary>,
}

impl PatientState {
    /// True when nothing at all is known
    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_demographics(&self) -> bool {
        self.name.is_some() || self.age.is_some() || self.sex.is_some()
    }

    pub fn has_symptoms(&self) -> bool {
        non_empty(self.main_symptoms.as_deref())
    }

    pub fn has_medical_history(&self) -> bool {
        non_empty(self.medical_history.as_deref())
    }

    #[allow(dead_code)] // API completeness
    pub fn has_summary(&self) -> bool {
        self.generated_summary.is_some()
    }
}

fn non_empty<T>(items: Option<&[T]>) -> bool {
    items.is_some_and(|items| !items.is_empty())
}
