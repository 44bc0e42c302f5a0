use shared_models::VitalSign;

use crate::models::{PainSeverity, Reading, VitalReadings, VitalStatus};

pub const TEMPERATURE_NORMAL: (f64, f64) = (36.0, 37.5);
pub const HEART_RATE_NORMAL: (f64, f64) = (60.0, 100.0);
pub const SYSTOLIC_NORMAL: (f64, f64) = (90.0, 140.0);
pub const DIASTOLIC_NORMAL: (f64, f64) = (60.0, 90.0);

const HIGH_PAIN: f64 = 7.0;
const MEDIUM_PAIN: f64 = 4.0;

/// Emergency flag first, then pain level.
pub fn vital_status(vital: &VitalSign) -> VitalStatus {
    if vital.is_emergency {
        VitalStatus::Emergency
    } else if vital.pain_level >= HIGH_PAIN {
        VitalStatus::High
    } else if vital.pain_level >= MEDIUM_PAIN {
        VitalStatus::Medium
    } else {
        VitalStatus::Normal
    }
}

/// Anything at or below zero reads as no pain.
pub fn pain_severity(pain_level: f64) -> PainSeverity {
    if pain_level <= 0.0 {
        PainSeverity::None
    } else if pain_level < MEDIUM_PAIN {
        PainSeverity::Mild
    } else if pain_level < HIGH_PAIN {
        PainSeverity::Moderate
    } else {
        PainSeverity::Severe
    }
}

/// Values on either edge of `(low, high)` are normal.
fn classify(value: f64, (low, high): (f64, f64)) -> Reading {
    if value < low {
        Reading::Low
    } else if value > high {
        Reading::High
    } else {
        Reading::Normal
    }
}

pub fn temperature_reading(celsius: f64) -> Reading {
    classify(celsius, TEMPERATURE_NORMAL)
}

pub fn heart_rate_reading(bpm: f64) -> Reading {
    classify(bpm, HEART_RATE_NORMAL)
}

pub fn systolic_reading(mm_hg: f64) -> Reading {
    classify(mm_hg, SYSTOLIC_NORMAL)
}

pub fn diastolic_reading(mm_hg: f64) -> Reading {
    classify(mm_hg, DIASTOLIC_NORMAL)
}

pub fn readings(vital: &VitalSign) -> VitalReadings {
    VitalReadings {
        temperature: temperature_reading(vital.temperature),
        heart_rate: heart_rate_reading(vital.heart_rate),
        systolic: systolic_reading(vital.systolic),
        diastolic: diastolic_reading(vital.diastolic),
    }
}
