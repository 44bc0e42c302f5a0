use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::{PersonId, Role};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub date_of_birth: String,
    /// Raw value of the doctor selector.
    pub doctor_id: String,
}

/// Raw vital-sign input. Numbers stay `f64` until validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignForm {
    pub temperature: f64,
    pub heart_rate: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub pain_level: f64,
    pub description: String,
    #[serde(default)]
    pub is_emergency: bool,
}

impl Default for VitalSignForm {
    fn default() -> Self {
        Self {
            temperature: 36.5,
            heart_rate: 72.0,
            systolic: 120.0,
            diastolic: 80.0,
            pain_level: 0.0,
            description: String::new(),
            is_emergency: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RehabilitationForm {
    pub plan: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub password: String,
    pub role: Role,
    pub doctor_id: PersonId,
}

/// Vital-sign values that passed every range check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalMeasurements {
    pub temperature: f64,
    pub heart_rate: u16,
    pub systolic: u16,
    pub diastolic: u16,
    pub pain_level: u8,
    pub description: String,
    pub is_emergency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVitalSign {
    #[serde(flatten)]
    pub measurements: VitalMeasurements,
    pub timestamp: DateTime<Utc>,
    pub patient_id: PersonId,
    pub doctor_id: Option<PersonId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRehabilitationPlan {
    pub doctor_id: Option<PersonId>,
    pub plan: String,
}

/// Lifecycle of one form dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Editing,
    Validating,
    ValidationFailed,
    Submitting,
    Succeeded,
    BackendRejected,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Succeeded)
    }

    pub fn can_transition_to(&self, target: &FlowState) -> bool {
        use FlowState::*;
        matches!(
            (self, target),
            (Editing, Validating)
                | (Validating, ValidationFailed)
                | (Validating, Submitting)
                | (ValidationFailed, Editing)
                | (Submitting, Succeeded)
                | (Submitting, BackendRejected)
                | (BackendRejected, Editing)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Backend accepted the record; carries its response.
    Succeeded(serde_json::Value),
    /// Nothing was attempted: the target record has no id, or the form already succeeded.
    Skipped,
}
