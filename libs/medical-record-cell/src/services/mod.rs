pub mod classification;
pub mod composer;
pub mod history;

pub use classification::{pain_severity, readings, vital_status};
pub use composer::{compose_demographics, compose_detail, demographic_info};
pub use history::MedicalHistoryService;
