use serde::Serialize;

use shared_models::{Person, RecoveryPlan, VitalSign};

/// Overall status of one vital-sign entry. Exactly one applies per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalStatus {
    Emergency,
    High,
    Medium,
    Normal,
}

impl VitalStatus {
    pub fn label(self) -> &'static str {
        match self {
            VitalStatus::Emergency => "Emergency",
            VitalStatus::High => "High",
            VitalStatus::Medium => "Medium",
            VitalStatus::Normal => "Normal",
        }
    }
}

/// Where a single measurement sits relative to its normal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reading {
    Low,
    Normal,
    High,
}

impl Reading {
    pub fn as_str(self) -> &'static str {
        match self {
            Reading::Low => "low",
            Reading::Normal => "normal",
            Reading::High => "high",
        }
    }

    pub fn is_normal(self) -> bool {
        self == Reading::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PainSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl PainSeverity {
    pub fn label(self) -> &'static str {
        match self {
            PainSeverity::None => "No Pain",
            PainSeverity::Mild => "Mild Pain",
            PainSeverity::Moderate => "Moderate Pain",
            PainSeverity::Severe => "Severe Pain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalReadings {
    pub temperature: Reading,
    pub heart_rate: Reading,
    pub systolic: Reading,
    pub diastolic: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignView {
    pub entry: VitalSign,
    pub status: VitalStatus,
    pub readings: VitalReadings,
    pub pain: PainSeverity,
}

/// One labelled line of the demographics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoItem {
    pub label: &'static str,
    pub value: String,
}

/// Raw history as fetched for one patient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicalHistory {
    pub vitals: Vec<VitalSign>,
    pub plans: Vec<RecoveryPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub vitals: Vec<VitalSignView>,
    pub recovery_plans: Vec<RecoveryPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetailView {
    pub patient: Person,
    pub info: Vec<InfoItem>,
    /// `None` for a demographic-only view.
    pub history: Option<HistoryView>,
    pub history_error: Option<String>,
}
