use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

use shared_gateway::ApiGateway;
use shared_models::{AppError, Person, Resource};
use shared_utils::Notifier;

use crate::models::{RefreshOutcome, ScreenSource, ScreenView, TabKey, ViewFilter};
use crate::services::aggregator::{select_view, tab_counts};

/// State owned by one list screen. Nothing else reads or writes it.
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub loading: bool,
    pub error: Option<String>,
    pub records: Vec<Person>,
    pub filter: ViewFilter,
    pub mounted: bool,
    latest_request: u64,
}

/// View state behind an admin directory or a doctor's patient list.
///
/// Loads go through the gateway; tab and search changes only re-filter what is
/// already loaded. When loads overlap, only the most recently issued one is
/// applied. Nothing resolves into a screen after `unmount`.
pub struct DirectoryScreen<G: ?Sized> {
    gateway: Arc<G>,
    source: ScreenSource,
    notifier: Arc<dyn Notifier>,
    state: RwLock<ScreenState>,
}

impl<G> DirectoryScreen<G>
where
    G: ApiGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, source: ScreenSource, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            source,
            notifier,
            state: RwLock::new(ScreenState::default()),
        }
    }

    pub fn source(&self) -> ScreenSource {
        self.source
    }

    pub async fn mount(&self) -> Result<RefreshOutcome, AppError> {
        self.state.write().await.mounted = true;
        self.refresh().await
    }

    pub async fn unmount(&self) {
        let mut state = self.state.write().await;
        state.mounted = false;
        state.loading = false;
    }

    #[instrument(skip(self), fields(source = ?self.source))]
    pub async fn refresh(&self) -> Result<RefreshOutcome, AppError> {
        let request = {
            let mut state = self.state.write().await;
            if !state.mounted {
                debug!("screen not mounted, skipping refresh");
                return Ok(RefreshOutcome::Discarded);
            }
            state.latest_request += 1;
            state.loading = true;
            state.error = None;
            state.latest_request
        };

        let result = self.fetch().await;

        let mut state = self.state.write().await;
        if !state.mounted {
            debug!(request, "screen unmounted, dropping response");
            return Ok(RefreshOutcome::Discarded);
        }
        if request != state.latest_request {
            debug!(request, latest = state.latest_request, "dropping stale response");
            return Ok(RefreshOutcome::Discarded);
        }

        state.loading = false;
        match result {
            Ok(records) => {
                debug!(count = records.len(), "records loaded");
                state.records = records;
                state.error = None;
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                error!("Failed to load {}: {}", self.source.role().plural(), e);
                let message = format!(
                    "Failed to load {}. Please try again.",
                    self.source.role().plural()
                );
                // Previously loaded records stay on screen.
                state.error = Some(message.clone());
                Err(AppError::Fetch(message))
            }
        }
    }

    /// Refresh triggered from the screen's action menu.
    pub async fn reload(&self) -> Result<RefreshOutcome, AppError> {
        let outcome = self.refresh().await?;
        if outcome == RefreshOutcome::Applied {
            self.notifier
                .success(&format!("{} data refreshed", self.source.role().label()));
        }
        Ok(outcome)
    }

    async fn fetch(&self) -> Result<Vec<Person>> {
        match self.source {
            ScreenSource::All(role) => Ok(self.gateway.load_all(role.resource()).await?.items),
            ScreenSource::AssignedTo { doctor_id } => self
                .gateway
                .load_all_by_id(Resource::PatientsByDoctor, doctor_id)
                .await?
                .into_iter()
                .map(|value| serde_json::from_value(value).map_err(anyhow::Error::from))
                .collect(),
        }
    }

    /// Switches tab. Tabs the screen does not offer are ignored.
    pub async fn set_tab(&self, tab: TabKey) -> bool {
        if !TabKey::for_role(self.source.role()).contains(&tab) {
            warn!(%tab, "tab not offered for {}", self.source.role().plural());
            return false;
        }
        self.state.write().await.filter.tab = tab;
        true
    }

    pub async fn set_search(&self, query: impl Into<String>) {
        self.state.write().await.filter.query = query.into();
    }

    pub async fn clear_search(&self) {
        self.state.write().await.filter.query.clear();
    }

    pub async fn view(&self) -> ScreenView {
        let state = self.state.read().await;
        ScreenView {
            loading: state.loading,
            error: state.error.clone(),
            tab: state.filter.tab,
            query: state.filter.query.clone(),
            visible: select_view(&state.records, state.filter.tab, &state.filter.query),
            counts: tab_counts(&state.records),
            total: state.records.len(),
        }
    }

    pub async fn state(&self) -> ScreenState {
        self.state.read().await.clone()
    }

    pub async fn empty_message(&self) -> String {
        let plural = self.source.role().plural();
        if self.state.read().await.filter.has_query() {
            format!("No {} found", plural)
        } else {
            format!("No {} yet", plural)
        }
    }

    /// Deletes `person` through the gateway. Records without an id are skipped.
    #[instrument(skip(self, person), fields(id = ?person.id))]
    pub async fn remove(&self, person: &Person) -> Result<bool, AppError> {
        let Some(id) = person.id else {
            debug!("record has no id, nothing to delete");
            return Ok(false);
        };

        match self.gateway.remove(person.role.resource(), id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if state.mounted {
                    state.records.retain(|record| record.id != Some(id));
                }
                drop(state);

                self.notifier
                    .success(&format!("{} deleted successfully", person.role.label()));
                Ok(true)
            }
            Err(e) => {
                error!("Delete failed: {}", e);
                self.notifier.error(&format!(
                    "Failed to delete {}. Please try again.",
                    person.role.noun()
                ));
                Err(AppError::Submission(e.to_string()))
            }
        }
    }
}
