use chrono::Utc;
use serde_json::Value;
use tracing::{error, instrument};

use shared_gateway::ApiGateway;
use shared_models::{AppError, Person, PersonId, Resource, Role, ValidationErrors};
use shared_utils::Notifier;

use crate::models::{
    DoctorForm, NewRehabilitationPlan, NewVitalSign, PatientForm, RehabilitationForm,
    VitalSignForm,
};
use crate::services::validation::{
    validate_doctor, validate_patient, validate_rehabilitation, validate_vital_sign,
};

pub const DOCTORS_LOAD_FAILED: &str = "Failed to load doctors. Please try again.";

/// Where a validated form is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create(Resource),
    CreateById(Resource, PersonId),
}

/// One kind of form dialog: its input, how it validates and where it goes.
pub trait FormKind: Send + Sync {
    type Input: Clone + Default + Send + Sync;

    /// Pure; never performs I/O.
    fn validate(&self, input: &Self::Input) -> Result<Value, ValidationErrors>;

    /// `None` when the record this form attaches to has no id.
    fn target(&self) -> Option<SubmitTarget>;

    fn success_message(&self) -> &'static str;

    fn failure_message(&self) -> &'static str;
}

fn to_body<T: serde::Serialize>(payload: T) -> Result<Value, ValidationErrors> {
    serde_json::to_value(payload).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("form", e.to_string());
        errors
    })
}

#[derive(Debug, Clone, Default)]
pub struct CreateDoctor;

impl FormKind for CreateDoctor {
    type Input = DoctorForm;

    fn validate(&self, input: &DoctorForm) -> Result<Value, ValidationErrors> {
        to_body(validate_doctor(input)?)
    }

    fn target(&self) -> Option<SubmitTarget> {
        Some(SubmitTarget::Create(Role::Doctor.resource()))
    }

    fn success_message(&self) -> &'static str {
        "Doctor created successfully"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to create doctor. Please try again."
    }
}

/// Patient creation, checked against the doctors the selector offered.
#[derive(Debug, Clone, Default)]
pub struct CreatePatient {
    pub doctors: Vec<Person>,
}

impl CreatePatient {
    pub fn new(doctors: Vec<Person>) -> Self {
        Self { doctors }
    }
}

impl FormKind for CreatePatient {
    type Input = PatientForm;

    fn validate(&self, input: &PatientForm) -> Result<Value, ValidationErrors> {
        to_body(validate_patient(input, &self.doctors)?)
    }

    fn target(&self) -> Option<SubmitTarget> {
        Some(SubmitTarget::Create(Role::Patient.resource()))
    }

    fn success_message(&self) -> &'static str {
        "Patient created successfully"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to create patient. Please try again."
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordVitalSign {
    pub patient_id: Option<PersonId>,
    pub doctor_id: Option<PersonId>,
}

impl RecordVitalSign {
    pub fn for_patient(patient: &Person) -> Self {
        Self {
            patient_id: patient.id,
            doctor_id: patient.doctor_id,
        }
    }
}

impl FormKind for RecordVitalSign {
    type Input = VitalSignForm;

    fn validate(&self, input: &VitalSignForm) -> Result<Value, ValidationErrors> {
        let measurements = validate_vital_sign(input)?;
        // target() gates submission on the id, so the fallback is never sent.
        to_body(NewVitalSign {
            measurements,
            timestamp: Utc::now(),
            patient_id: self.patient_id.unwrap_or_default(),
            doctor_id: self.doctor_id,
        })
    }

    fn target(&self) -> Option<SubmitTarget> {
        self.patient_id
            .map(|id| SubmitTarget::CreateById(Resource::RecoveryLog, id))
    }

    fn success_message(&self) -> &'static str {
        "Medical information added successfully"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to add medical information. Please try again."
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssignRehabilitation {
    pub patient_id: Option<PersonId>,
    pub doctor_id: Option<PersonId>,
}

impl AssignRehabilitation {
    pub fn for_patient(patient: &Person) -> Self {
        Self {
            patient_id: patient.id,
            doctor_id: patient.doctor_id,
        }
    }
}

impl FormKind for AssignRehabilitation {
    type Input = RehabilitationForm;

    fn validate(&self, input: &RehabilitationForm) -> Result<Value, ValidationErrors> {
        to_body(NewRehabilitationPlan {
            doctor_id: self.doctor_id,
            plan: validate_rehabilitation(input)?,
        })
    }

    fn target(&self) -> Option<SubmitTarget> {
        self.patient_id
            .map(|id| SubmitTarget::CreateById(Resource::RehabilitationPlan, id))
    }

    fn success_message(&self) -> &'static str {
        "Rehabilitation plan added successfully"
    }

    fn failure_message(&self) -> &'static str {
        "Failed to add rehabilitation plan"
    }
}

/// Doctors for the patient form's selector.
#[instrument(skip_all)]
pub async fn load_doctor_choices<G>(gateway: &G, notifier: &dyn Notifier) -> Result<Vec<Person>, AppError>
where
    G: ApiGateway + ?Sized,
{
    match gateway.load_all(Role::Doctor.resource()).await {
        Ok(collection) => Ok(collection.items),
        Err(e) => {
            error!("Error fetching doctors: {:#}", e);
            notifier.error(DOCTORS_LOAD_FAILED);
            Err(AppError::Fetch(DOCTORS_LOAD_FAILED.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert_eq!(CreateDoctor.target(), Some(SubmitTarget::Create(Resource::Doctor)));
        assert_eq!(
            CreatePatient::default().target(),
            Some(SubmitTarget::Create(Resource::Patient))
        );
        assert_eq!(RecordVitalSign::default().target(), None);
        assert_eq!(
            AssignRehabilitation { patient_id: Some(5), doctor_id: None }.target(),
            Some(SubmitTarget::CreateById(Resource::RehabilitationPlan, 5))
        );
    }

    #[test]
    fn test_vital_sign_body_is_stamped() {
        let kind = RecordVitalSign { patient_id: Some(12), doctor_id: Some(4) };
        let before = Utc::now();
        let body = kind
            .validate(&VitalSignForm {
                description: "Dizziness".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(body["patientId"], 12);
        assert_eq!(body["doctorId"], 4);
        assert_eq!(body["heartRate"], 72);
        let stamped: chrono::DateTime<Utc> =
            serde_json::from_value(body["timestamp"].clone()).unwrap();
        assert!(stamped >= before);
    }

    #[test]
    fn test_rehabilitation_body() {
        let patient = Person::new(Role::Patient, "Jane Doe", "jane@example.com")
            .with_id(8)
            .with_doctor(3);
        let body = AssignRehabilitation::for_patient(&patient)
            .validate(&RehabilitationForm { plan: "Daily walks".to_string() })
            .unwrap();

        assert_eq!(body, serde_json::json!({ "doctorId": 3, "plan": "Daily walks" }));
    }
}
