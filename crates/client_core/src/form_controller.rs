use std::collections::VecDeque;

use shared::{
    domain::{Credentials, Field},
    error::ErrorCode,
};
use storage::{CredentialRepository, CredentialStore};
use tracing::{debug, info, warn};

use crate::{
    state_machine::{reduce, Effect, FormEvent, Notice, UiState},
    BiometricGate, PromptConfig,
};

/// Owns the form state and runs the capability calls the state machine asks for.
///
/// Operations run to completion one at a time; nothing debounces a second
/// registration queued before the first one returns, so two presses write the
/// record twice.
pub struct FormController<S, B> {
    state: UiState,
    repository: CredentialRepository<S>,
    gate: B,
}

impl<S, B> FormController<S, B>
where
    S: CredentialStore,
    B: BiometricGate,
{
    pub fn new(store: S, gate: B) -> Self {
        Self {
            state: UiState::default(),
            repository: CredentialRepository::new(store),
            gate,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Current contents of the two inputs.
    pub fn submission(&self) -> Credentials {
        Credentials::new(self.state.first_name.clone(), self.state.last_name.clone())
    }

    pub async fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(FormEvent::FieldEdited {
            field,
            value: value.into(),
        })
        .await;
    }

    pub async fn register(&mut self) -> Vec<Notice> {
        let submitted = self.submission();
        self.register_submitted(submitted).await
    }

    /// Registers the names captured when the button was pressed, whatever the
    /// inputs hold by the time the request is processed.
    pub async fn register_submitted(&mut self, submitted: Credentials) -> Vec<Notice> {
        let notices = self.dispatch(FormEvent::RegisterRequested(submitted)).await;
        if !self.state.errors.is_empty() {
            debug!(
                operation = "register",
                code = ?ErrorCode::Validation,
                fields = self.state.errors.len(),
                "registration rejected by validation"
            );
        }
        notices
    }

    pub async fn login(&mut self) -> Vec<Notice> {
        self.dispatch(FormEvent::LoginRequested).await
    }

    /// First step of clear-all: asks for confirmation, changes nothing else.
    pub async fn clear_all(&mut self) -> Vec<Notice> {
        self.dispatch(FormEvent::ClearRequested).await
    }

    pub async fn confirm_clear_all(&mut self) -> Vec<Notice> {
        self.dispatch(FormEvent::ClearConfirmed).await
    }

    pub async fn cancel_clear_all(&mut self) -> Vec<Notice> {
        self.dispatch(FormEvent::ClearCancelled).await
    }

    /// Applies `event`, then every follow-up event produced by capability
    /// calls, until the machine settles.
    pub async fn dispatch(&mut self, event: FormEvent) -> Vec<Notice> {
        let mut notices = Vec::new();
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (next, effects) = reduce(std::mem::take(&mut self.state), event);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::Alert(alert) => {
                        debug!(code = ?alert.error_code(), "alert: {}", alert.message());
                        notices.push(Notice::Alert(alert))
                    }
                    Effect::RequestClearConfirmation(dialog) => {
                        notices.push(Notice::ConfirmClear(dialog))
                    }
                    Effect::SaveCredentials(credentials) => {
                        queue.push_back(self.save_credentials(&credentials).await)
                    }
                    Effect::PromptBiometric(config) => {
                        queue.push_back(self.prompt_biometric(&config).await)
                    }
                    Effect::LoadCredentials => queue.push_back(self.load_credentials().await),
                    Effect::ClearStore => queue.push_back(self.clear_store().await),
                }
            }
        }

        notices
    }

    async fn save_credentials(&self, credentials: &Credentials) -> FormEvent {
        match self.repository.save(credentials).await {
            Ok(()) => {
                info!(operation = "register", "credentials saved");
                FormEvent::RegisterSaved
            }
            Err(err) => {
                warn!(operation = "register", code = ?err.code(), "credentials write failed: {err}");
                FormEvent::RegisterFailed(err)
            }
        }
    }

    async fn prompt_biometric(&self, config: &PromptConfig) -> FormEvent {
        debug!(operation = "login", "prompting for biometric confirmation");
        let outcome = self.gate.prompt(config).await;
        match &outcome {
            Ok(result) => {
                info!(operation = "login", success = result.success, "biometric prompt resolved")
            }
            Err(err) => {
                warn!(operation = "login", code = ?err.code(), "biometric prompt failed: {err}")
            }
        }
        FormEvent::BiometricResolved(outcome)
    }

    async fn load_credentials(&self) -> FormEvent {
        let loaded = self.repository.load().await;
        match &loaded {
            Ok(credentials) if credentials.is_complete() => {
                info!(operation = "login", "stored credentials loaded")
            }
            Ok(_) => warn!(operation = "login", "stored credentials are incomplete"),
            Err(err) => {
                warn!(operation = "login", code = ?err.code(), "credentials read failed: {err}")
            }
        }
        FormEvent::CredentialsLoaded(loaded)
    }

    async fn clear_store(&self) -> FormEvent {
        match self.repository.clear_all().await {
            Ok(()) => {
                info!(operation = "clear_all", "all stored data removed");
                FormEvent::ClearCompleted
            }
            Err(err) => {
                warn!(operation = "clear_all", code = ?err.code(), "clearing store failed: {err}");
                FormEvent::ClearFailed(err)
            }
        }
    }
}
