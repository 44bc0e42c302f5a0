use std::fmt;

/// Named backend resource. The string form is the routing key the API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Doctor,
    Patient,
    PatientsByDoctor,
    RecoveryLog,
    RecoveryLogByPatient,
    RehabilitationPlan,
    RehabilitationProgress,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Doctor => "Doctor",
            Resource::Patient => "Patient",
            Resource::PatientsByDoctor => "Patient/doctor",
            Resource::RecoveryLog => "RecoveryLog",
            Resource::RecoveryLogByPatient => "RecoveryLog/patient",
            Resource::RehabilitationPlan => "Rehabilitation/plan",
            Resource::RehabilitationProgress => "Rehabilitation/progress",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
