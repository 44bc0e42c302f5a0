pub mod error;
pub mod medical;
pub mod person;
pub mod resource;

pub use error::{AppError, FieldError, ValidationErrors};
pub use medical::{Collection, RecoveryPlan, VitalSign};
pub use person::{Person, PersonId, PersonStatus, Role};
pub use resource::Resource;
