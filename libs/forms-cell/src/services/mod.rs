pub mod kinds;
pub mod submission;
pub mod validation;

pub use kinds::{
    load_doctor_choices, AssignRehabilitation, CreateDoctor, CreatePatient, FormKind,
    RecordVitalSign, SubmitTarget,
};
pub use submission::{SubmissionFlow, SuccessCallback};
pub use validation::{
    is_valid_email, validate_doctor, validate_patient, validate_rehabilitation,
    validate_vital_sign,
};
