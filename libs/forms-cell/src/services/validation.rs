use std::sync::OnceLock;

use regex::Regex;

use shared_models::{Person, PersonId, Role, ValidationErrors};

use crate::models::{
    DoctorForm, NewDoctor, NewPatient, PatientForm, RehabilitationForm, VitalMeasurements,
    VitalSignForm,
};

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 6;
const MIN_PHONE_LEN: usize = 5;
const MAX_PAIN_LEVEL: f64 = 10.0;

const EMAIL_REGEX: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const MAX_EMAIL_LEN: usize = 254;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Inclusive range for one numeric vital-sign field.
struct Bound {
    field: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
}

const TEMPERATURE: Bound = Bound { field: "temperature", label: "Temperature", min: 30.0, max: 45.0 };
const HEART_RATE: Bound = Bound { field: "heartRate", label: "Heart rate", min: 30.0, max: 200.0 };
const SYSTOLIC: Bound = Bound { field: "systolic", label: "Systolic pressure", min: 70.0, max: 250.0 };
const DIASTOLIC: Bound = Bound { field: "diastolic", label: "Diastolic pressure", min: 40.0, max: 150.0 };

pub fn is_valid_email(email: &str) -> bool {
    let pattern = EMAIL_PATTERN
        .get_or_init(|| Regex::new(EMAIL_REGEX).expect("email pattern is a valid regex"));
    email.len() <= MAX_EMAIL_LEN && pattern.is_match(email)
}

fn check_identity(errors: &mut ValidationErrors, full_name: &str, email: &str, password: &str) {
    if full_name.trim().chars().count() < MIN_NAME_LEN {
        errors.add("fullName", "Name must be at least 2 characters");
    }
    if !is_valid_email(email.trim()) {
        errors.add("email", "Please enter a valid email address");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }
}

pub fn validate_doctor(form: &DoctorForm) -> Result<NewDoctor, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_identity(&mut errors, &form.full_name, &form.email, &form.password);

    errors.into_result(NewDoctor {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        role: Role::Doctor,
    })
}

/// `doctors` is the list the selector was populated from; the chosen id must be one of them.
pub fn validate_patient(form: &PatientForm, doctors: &[Person]) -> Result<NewPatient, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_identity(&mut errors, &form.full_name, &form.email, &form.password);

    if form.phone.trim().chars().count() < MIN_PHONE_LEN {
        errors.add("phone", "Phone number is required");
    }
    if form.date_of_birth.trim().is_empty() {
        errors.add("dateOfBirth", "Date of birth is required");
    }

    let doctor_id = selected_doctor(&form.doctor_id, doctors);
    if doctor_id.is_none() {
        errors.add("doctorId", "Please select a doctor");
    }

    match doctor_id {
        Some(doctor_id) if errors.is_empty() => Ok(NewPatient {
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            date_of_birth: form.date_of_birth.trim().to_string(),
            password: form.password.clone(),
            role: Role::Patient,
            doctor_id,
        }),
        _ => Err(errors),
    }
}

fn selected_doctor(raw: &str, doctors: &[Person]) -> Option<PersonId> {
    let id = raw.trim().parse::<PersonId>().ok()?;
    doctors
        .iter()
        .any(|d| d.role == Role::Doctor && d.id == Some(id))
        .then_some(id)
}

/// Checks `value` against `bound`, recording at most one error. Returns whether it passed.
fn check_bound(errors: &mut ValidationErrors, bound: &Bound, value: f64) -> bool {
    if !value.is_finite() {
        errors.add(bound.field, format!("{} is required", bound.label));
        false
    } else if value < bound.min {
        errors.add(bound.field, format!("{} too low", bound.label));
        false
    } else if value > bound.max {
        errors.add(bound.field, format!("{} too high", bound.label));
        false
    } else {
        true
    }
}

fn check_pain_level(errors: &mut ValidationErrors, value: f64) -> bool {
    let message = if !value.is_finite() {
        "Pain level is required"
    } else if value < 0.0 {
        "Pain level cannot be negative"
    } else if value > MAX_PAIN_LEVEL {
        "Pain level cannot exceed 10"
    } else if value.fract() != 0.0 {
        "Pain level must be a whole number"
    } else {
        return true;
    };
    errors.add("painLevel", message);
    false
}

pub fn validate_vital_sign(form: &VitalSignForm) -> Result<VitalMeasurements, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_bound(&mut errors, &TEMPERATURE, form.temperature);
    check_bound(&mut errors, &HEART_RATE, form.heart_rate);
    check_bound(&mut errors, &SYSTOLIC, form.systolic);
    check_bound(&mut errors, &DIASTOLIC, form.diastolic);
    check_pain_level(&mut errors, form.pain_level);

    if form.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }

    // Ranges are already enforced, so the integer casts cannot overflow.
    errors.into_result(VitalMeasurements {
        temperature: form.temperature,
        heart_rate: form.heart_rate.round() as u16,
        systolic: form.systolic.round() as u16,
        diastolic: form.diastolic.round() as u16,
        pain_level: form.pain_level as u8,
        description: form.description.trim().to_string(),
        is_emergency: form.is_emergency,
    })
}

pub fn validate_rehabilitation(form: &RehabilitationForm) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let plan = form.plan.trim();
    if plan.is_empty() {
        errors.add("plan", "Rehabilitation plan is required");
    }
    errors.into_result(plan.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::PersonStatus;

    fn vitals() -> VitalSignForm {
        VitalSignForm {
            description: "Routine check".to_string(),
            ..Default::default()
        }
    }

    fn doctors() -> Vec<Person> {
        vec![
            Person::new(Role::Doctor, "Dr. House", "house@example.com")
                .with_id(3)
                .with_status(PersonStatus::Active),
            Person::new(Role::Patient, "Not A Doctor", "p@example.com").with_id(9),
        ]
    }

    fn patient_form() -> PatientForm {
        PatientForm {
            full_name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            password: "secret1".to_string(),
            phone: "555-0101".to_string(),
            date_of_birth: "1990-04-12".to_string(),
            doctor_id: "3".to_string(),
        }
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert!(Regex::new(EMAIL_REGEX).is_ok());
    }

    #[test]
    fn test_email_length_limit() {
        let local = "a".repeat(64);
        let domain = format!("{}.com", "b".repeat(MAX_EMAIL_LEN - 64 - 5));
        let at_limit = format!("{}@{}", local, domain);
        assert_eq!(at_limit.len(), MAX_EMAIL_LEN);
        assert!(is_valid_email(&at_limit));
        assert!(!is_valid_email(&format!("a{}", at_limit)));
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example.c"));
    }

    #[test]
    fn test_doctor_collects_all_errors() {
        let errors = validate_doctor(&DoctorForm {
            full_name: "J".to_string(),
            email: "nope".to_string(),
            password: "123".to_string(),
        })
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.for_field("fullName"), Some("Name must be at least 2 characters"));
        assert_eq!(errors.for_field("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.for_field("password"), Some("Password must be at least 6 characters"));
    }

    #[test]
    fn test_valid_doctor_is_trimmed() {
        let doctor = validate_doctor(&DoctorForm {
            full_name: "  Gregory House ".to_string(),
            email: " house@example.com".to_string(),
            password: "vicodin".to_string(),
        })
        .unwrap();

        assert_eq!(doctor.full_name, "Gregory House");
        assert_eq!(doctor.email, "house@example.com");
        assert_eq!(doctor.role, Role::Doctor);
    }

    #[test]
    fn test_valid_patient() {
        let patient = validate_patient(&patient_form(), &doctors()).unwrap();
        assert_eq!(patient.doctor_id, 3);
        assert_eq!(patient.role, Role::Patient);
    }

    #[test]
    fn test_patient_must_reference_loaded_doctor() {
        for raw in ["", "abc", "42", "9"] {
            let form = PatientForm {
                doctor_id: raw.to_string(),
                ..patient_form()
            };
            let errors = validate_patient(&form, &doctors()).unwrap_err();
            assert_eq!(errors.for_field("doctorId"), Some("Please select a doctor"), "raw={raw:?}");
        }

        let errors = validate_patient(&patient_form(), &[]).unwrap_err();
        assert!(errors.has_field("doctorId"));
    }

    #[test]
    fn test_patient_contact_fields() {
        let form = PatientForm {
            phone: "123".to_string(),
            date_of_birth: "   ".to_string(),
            ..patient_form()
        };
        let errors = validate_patient(&form, &doctors()).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("phone"), Some("Phone number is required"));
        assert_eq!(errors.for_field("dateOfBirth"), Some("Date of birth is required"));
    }

    #[test]
    fn test_heart_rate_bounds_are_inclusive() {
        for (rate, ok) in [(200.0, true), (201.0, false), (30.0, true), (29.0, false)] {
            let form = VitalSignForm { heart_rate: rate, ..vitals() };
            assert_eq!(validate_vital_sign(&form).is_ok(), ok, "heart rate {rate}");
        }

        let form = VitalSignForm { heart_rate: 201.0, ..vitals() };
        let errors = validate_vital_sign(&form).unwrap_err();
        assert_eq!(errors.for_field("heartRate"), Some("Heart rate too high"));

        let form = VitalSignForm { heart_rate: 29.0, ..vitals() };
        let errors = validate_vital_sign(&form).unwrap_err();
        assert_eq!(errors.for_field("heartRate"), Some("Heart rate too low"));
    }

    #[test]
    fn test_vital_range_messages() {
        let form = VitalSignForm {
            temperature: 50.0,
            systolic: 60.0,
            diastolic: 151.0,
            pain_level: -1.0,
            description: " ".to_string(),
            ..Default::default()
        };
        let errors = validate_vital_sign(&form).unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.for_field("temperature"), Some("Temperature too high"));
        assert_eq!(errors.for_field("systolic"), Some("Systolic pressure too low"));
        assert_eq!(errors.for_field("diastolic"), Some("Diastolic pressure too high"));
        assert_eq!(errors.for_field("painLevel"), Some("Pain level cannot be negative"));
        assert_eq!(errors.for_field("description"), Some("Description is required"));
    }

    #[test]
    fn test_pain_level_rules() {
        let cases = [
            (11.0, Some("Pain level cannot exceed 10")),
            (2.5, Some("Pain level must be a whole number")),
            (f64::NAN, Some("Pain level is required")),
            (10.0, None),
            (0.0, None),
        ];
        for (pain, expected) in cases {
            let form = VitalSignForm { pain_level: pain, ..vitals() };
            match validate_vital_sign(&form) {
                Ok(m) => {
                    assert!(expected.is_none(), "pain {pain} should fail");
                    assert_eq!(m.pain_level as f64, pain);
                }
                Err(errors) => assert_eq!(errors.for_field("painLevel"), expected),
            }
        }
    }

    #[test]
    fn test_non_finite_is_required() {
        let form = VitalSignForm { temperature: f64::INFINITY, ..vitals() };
        let errors = validate_vital_sign(&form).unwrap_err();
        assert_eq!(errors.for_field("temperature"), Some("Temperature is required"));
    }

    #[test]
    fn test_defaults_only_need_description() {
        let errors = validate_vital_sign(&VitalSignForm::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("description"));

        let measurements = validate_vital_sign(&vitals()).unwrap();
        assert_eq!(measurements.heart_rate, 72);
        assert_eq!(measurements.systolic, 120);
        assert!(!measurements.is_emergency);
    }

    #[test]
    fn test_rehabilitation_plan_required() {
        let errors = validate_rehabilitation(&RehabilitationForm { plan: "  ".to_string() }).unwrap_err();
        assert_eq!(errors.for_field("plan"), Some("Rehabilitation plan is required"));

        let plan = validate_rehabilitation(&RehabilitationForm {
            plan: " Walk 20 minutes daily ".to_string(),
        })
        .unwrap();
        assert_eq!(plan, "Walk 20 minutes daily");
    }
}
