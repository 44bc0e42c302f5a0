use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

pub type PersonId = i64;

/// Account role. Travels over the wire as the backend's integer enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    /// Resource every record of this role is created, updated and removed through.
    pub fn resource(self) -> Resource {
        match self {
            Role::Patient => Resource::Patient,
            Role::Doctor => Resource::Doctor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Role::Patient => "patients",
            Role::Doctor => "doctors",
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        match role {
            Role::Patient => 0,
            Role::Doctor => 1,
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Role::Patient),
            1 => Ok(Role::Doctor),
            other => Err(format!("unknown role value {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonStatus {
    Active,
    Inactive,
    Critical,
    OnLeave,
}

impl PersonStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonStatus::Active => "active",
            PersonStatus::Inactive => "inactive",
            PersonStatus::Critical => "critical",
            PersonStatus::OnLeave => "on-leave",
        }
    }
}

impl fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A doctor or patient record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PersonStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<PersonId>,
}

impl Person {
    pub fn new(role: Role, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            role,
            status: None,
            date_of_birth: None,
            doctor_id: None,
        }
    }

    pub fn with_id(mut self, id: PersonId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: PersonStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_doctor(mut self, doctor_id: PersonId) -> Self {
        self.doctor_id = Some(doctor_id);
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_resource_mapping() {
        assert_eq!(Role::Doctor.resource(), Resource::Doctor);
        assert_eq!(Role::Patient.resource(), Resource::Patient);
    }

    #[test]
    fn test_person_deserializes_backend_shape() {
        let person: Person = serde_json::from_value(json!({
            "id": 7,
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "555-0101",
            "role": 0,
            "status": "on-leave",
            "dateOfBirth": "1990-04-12",
            "doctorId": 3
        }))
        .unwrap();

        assert_eq!(person.id, Some(7));
        assert_eq!(person.role, Role::Patient);
        assert_eq!(person.status, Some(PersonStatus::OnLeave));
        assert_eq!(person.doctor_id, Some(3));
    }

    #[test]
    fn test_person_tolerates_missing_optional_fields() {
        let person: Person = serde_json::from_value(json!({
            "fullName": "Dr. Who",
            "email": "who@example.com",
            "role": 1
        }))
        .unwrap();

        assert_eq!(person.id, None);
        assert_eq!(person.role, Role::Doctor);
        assert_eq!(person.status, None);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Person, _> = serde_json::from_value(json!({
            "fullName": "Nobody",
            "email": "nobody@example.com",
            "role": 9
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_role_serializes_as_integer() {
        let doctor = Person::new(Role::Doctor, "Dr. A", "a@example.com").with_id(1);
        let value = serde_json::to_value(&doctor).unwrap();
        assert_eq!(value["role"], 1);
        assert_eq!(value["fullName"], "Dr. A");
        assert!(value.get("status").is_none());
    }
}
