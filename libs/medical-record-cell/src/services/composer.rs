use chrono::{DateTime, NaiveDate, NaiveDateTime};

use shared_models::{Person, RecoveryPlan, VitalSign};

use crate::models::{HistoryView, InfoItem, PatientDetailView, VitalSignView};
use crate::services::classification::{pain_severity, readings, vital_status};

/// Merges demographics with vital-sign and recovery-plan history.
///
/// A patient without an id gets a demographic-only view; the history arguments
/// are ignored. History keeps the order it was received in.
pub fn compose_detail(
    patient: &Person,
    vitals: &[VitalSign],
    plans: &[RecoveryPlan],
) -> PatientDetailView {
    let history = patient.id.map(|_| HistoryView {
        vitals: vitals.iter().map(describe_vital).collect(),
        recovery_plans: plans.to_vec(),
    });

    PatientDetailView {
        patient: patient.clone(),
        info: demographic_info(patient),
        history,
        history_error: None,
    }
}

pub fn compose_demographics(patient: &Person) -> PatientDetailView {
    PatientDetailView {
        patient: patient.clone(),
        info: demographic_info(patient),
        history: None,
        history_error: None,
    }
}

pub fn describe_vital(vital: &VitalSign) -> VitalSignView {
    VitalSignView {
        entry: vital.clone(),
        status: vital_status(vital),
        readings: readings(vital),
        pain: pain_severity(vital.pain_level),
    }
}

pub fn demographic_info(patient: &Person) -> Vec<InfoItem> {
    let mut info = Vec::new();

    if !patient.full_name.is_empty() {
        info.push(item("Full Name", patient.full_name.clone()));
    }
    if !patient.email.is_empty() {
        info.push(item("Email", patient.email.clone()));
    }
    if let Some(phone) = non_empty(patient.phone.as_deref()) {
        info.push(item("Phone", phone.to_string()));
    }
    if let Some(dob) = non_empty(patient.date_of_birth.as_deref()) {
        info.push(item("Date of Birth", format_date(dob)));
    }
    info.push(item("Role", patient.role.label().to_string()));
    if let Some(doctor_id) = patient.doctor_id {
        info.push(item("Doctor ID", doctor_id.to_string()));
    }

    info
}

/// `Apr 12, 1990` for anything that parses as a date; the raw text otherwise.
pub fn format_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn item(label: &'static str, value: String) -> InfoItem {
    InfoItem { label, value }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
