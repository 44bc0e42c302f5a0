use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use shared_gateway::ApiGateway;
use shared_models::{AppError, Person, RecoveryPlan, Resource, VitalSign};

use crate::models::{MedicalHistory, PatientDetailView};
use crate::services::composer::{compose_demographics, compose_detail};

pub const HISTORY_LOAD_FAILED: &str = "Failed to load medical data. Please try again.";

pub struct MedicalHistoryService<G: ?Sized> {
    gateway: Arc<G>,
}

impl<G> MedicalHistoryService<G>
where
    G: ApiGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Vital signs and recovery plans for `patient`, fetched side by side.
    /// Returns `Ok(None)` without touching the backend when the record has no id.
    #[instrument(skip(self, patient), fields(id = ?patient.id))]
    pub async fn load_history(&self, patient: &Person) -> Result<Option<MedicalHistory>, AppError> {
        let Some(id) = patient.id else {
            debug!("patient has no id, skipping history fetch");
            return Ok(None);
        };

        let fetched = futures::try_join!(
            self.gateway.load_all_by_id(Resource::RecoveryLogByPatient, id),
            self.gateway.load_all_by_id(Resource::RehabilitationProgress, id),
        )
        .map(|(vitals, plans)| MedicalHistory {
            vitals: decode::<VitalSign>("vital sign", vitals),
            plans: decode::<RecoveryPlan>("recovery plan", plans),
        });

        match fetched {
            Ok(history) => {
                debug!(
                    vitals = history.vitals.len(),
                    plans = history.plans.len(),
                    "medical history loaded"
                );
                Ok(Some(history))
            }
            Err(e) => {
                error!("Error fetching medical data: {:#}", e);
                Err(AppError::Fetch(HISTORY_LOAD_FAILED.to_string()))
            }
        }
    }

    /// Always produces a view; a failed history fetch is reported on the view itself.
    pub async fn load_detail(&self, patient: &Person) -> PatientDetailView {
        match self.load_history(patient).await {
            Ok(Some(history)) => compose_detail(patient, &history.vitals, &history.plans),
            Ok(None) => compose_demographics(patient),
            Err(e) => {
                let mut view = compose_demographics(patient);
                view.history_error = Some(match e {
                    AppError::Fetch(message) => message,
                    other => other.to_string(),
                });
                view
            }
        }
    }
}

/// Entries that cannot be read are logged and left out; the rest are kept in order.
fn decode<T: DeserializeOwned>(kind: &str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(index, "skipping unreadable {} entry: {}", kind, e);
                None
            }
        })
        .collect()
}
