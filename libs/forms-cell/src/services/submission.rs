use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use shared_gateway::ApiGateway;
use shared_models::{AppError, ValidationErrors};
use shared_utils::Notifier;

use crate::models::{FlowState, SubmitOutcome};
use crate::services::kinds::{FormKind, SubmitTarget};

pub type SuccessCallback = Box<dyn Fn(&Value) + Send + Sync>;

#[derive(Debug, Clone)]
struct FlowInner<I> {
    state: FlowState,
    input: I,
    errors: ValidationErrors,
    last_failure: Option<FlowState>,
    open: bool,
}

impl<I: Default> Default for FlowInner<I> {
    fn default() -> Self {
        Self {
            state: FlowState::Editing,
            input: I::default(),
            errors: ValidationErrors::new(),
            last_failure: None,
            open: true,
        }
    }
}

impl<I> FlowInner<I> {
    /// Moves to `next` if the table allows it. Illegal moves are logged and ignored.
    fn transition(&mut self, next: FlowState) -> bool {
        if !self.state.can_transition_to(&next) {
            warn!(from = ?self.state, to = ?next, "ignoring invalid form transition");
            return false;
        }
        debug!(from = ?self.state, to = ?next, "form transition");
        self.state = next;
        true
    }
}

/// Drives one form dialog from editing through submission.
pub struct SubmissionFlow<K: FormKind, G: ?Sized> {
    kind: K,
    gateway: Arc<G>,
    notifier: Arc<dyn Notifier>,
    on_success: Option<SuccessCallback>,
    inner: RwLock<FlowInner<K::Input>>,
}

impl<K, G> SubmissionFlow<K, G>
where
    K: FormKind,
    G: ApiGateway + ?Sized,
{
    pub fn new(kind: K, gateway: Arc<G>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            kind,
            gateway,
            notifier,
            on_success: None,
            inner: RwLock::new(FlowInner::default()),
        }
    }

    pub fn with_on_success(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub async fn state(&self) -> FlowState {
        self.inner.read().await.state
    }

    pub async fn input(&self) -> K::Input {
        self.inner.read().await.input.clone()
    }

    /// Field errors from the most recent failed validation.
    pub async fn errors(&self) -> ValidationErrors {
        self.inner.read().await.errors.clone()
    }

    /// How the most recent attempt failed, if it did.
    pub async fn last_failure(&self) -> Option<FlowState> {
        self.inner.read().await.last_failure
    }

    pub async fn is_open(&self) -> bool {
        self.inner.read().await.open
    }

    /// Applies `change` to the input. Returns `Ok(false)` once the form has succeeded.
    pub async fn edit(&self, change: impl FnOnce(&mut K::Input)) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        match inner.state {
            FlowState::Submitting => Err(AppError::SubmissionInFlight),
            FlowState::Succeeded => Ok(false),
            _ => {
                change(&mut inner.input);
                Ok(true)
            }
        }
    }

    /// Restores default input and reopens the dialog. Refused while a submission is in flight.
    pub async fn reset(&self) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        if inner.state == FlowState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }
        *inner = FlowInner::default();
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<SubmitOutcome, AppError> {
        let Some(target) = self.kind.target() else {
            debug!("form target has no id, skipping submission");
            return Ok(SubmitOutcome::Skipped);
        };

        let body = {
            let mut inner = self.inner.write().await;
            match inner.state {
                FlowState::Submitting => return Err(AppError::SubmissionInFlight),
                FlowState::Succeeded => {
                    debug!("form already submitted");
                    return Ok(SubmitOutcome::Skipped);
                }
                _ => {}
            }

            inner.transition(FlowState::Validating);
            match self.kind.validate(&inner.input) {
                Ok(body) => {
                    inner.errors = ValidationErrors::new();
                    inner.transition(FlowState::Submitting);
                    body
                }
                Err(errors) => {
                    debug!(errors = errors.len(), "form validation failed");
                    inner.errors = errors.clone();
                    inner.transition(FlowState::ValidationFailed);
                    inner.last_failure = Some(FlowState::ValidationFailed);
                    inner.transition(FlowState::Editing);
                    return Err(AppError::Validation(errors));
                }
            }
        };

        let result = self.send(target, body).await;

        let mut inner = self.inner.write().await;
        match result {
            Ok(response) => {
                inner.transition(FlowState::Succeeded);
                inner.last_failure = None;
                inner.open = false;
                drop(inner);

                info!("{}", self.kind.success_message());
                self.notifier.success(self.kind.success_message());
                if let Some(callback) = &self.on_success {
                    callback(&response);
                }
                Ok(SubmitOutcome::Succeeded(response))
            }
            Err(e) => {
                error!("Error submitting form: {:#}", e);
                inner.transition(FlowState::BackendRejected);
                inner.last_failure = Some(FlowState::BackendRejected);
                inner.transition(FlowState::Editing);
                drop(inner);

                self.notifier.error(self.kind.failure_message());
                Err(AppError::Submission(e.to_string()))
            }
        }
    }

    async fn send(&self, target: SubmitTarget, body: Value) -> Result<Value> {
        match target {
            SubmitTarget::Create(resource) => {
                let created = self.gateway.create(resource, body).await?;
                Ok(serde_json::to_value(created)?)
            }
            SubmitTarget::CreateById(resource, id) => {
                self.gateway.create_by_id(resource, id, body).await
            }
        }
    }
}
