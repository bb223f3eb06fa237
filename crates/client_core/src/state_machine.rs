//! Registration/login/clear-all state machine as pure transitions.
//!
//! [`reduce`] never touches storage or the biometric sensor; it returns the
//! capability calls to make as [`Effect`]s and the caller feeds their outcome
//! back as a new [`FormEvent`].

use shared::{
    domain::{Credentials, Field, ValidationErrors},
    error::{BiometricError, ErrorCode, StoreError},
    text,
};

use crate::{PromptConfig, PromptResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Empty,
    Registered,
    LoggedIn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub first_name: String,
    pub last_name: String,
    pub errors: ValidationErrors,
    pub loaded_credentials: Option<Credentials>,
    pub show_login_button: bool,
    pub phase: Phase,
    /// The clear-all dialog is open and waiting for an answer.
    pub clear_confirmation_pending: bool,
}

impl UiState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldEdited { field: Field, value: String },
    /// Names as they were when the button was pressed.
    RegisterRequested(Credentials),
    RegisterSaved,
    RegisterFailed(StoreError),
    LoginRequested,
    BiometricResolved(Result<PromptResult, BiometricError>),
    CredentialsLoaded(Result<Credentials, StoreError>),
    ClearRequested,
    ClearConfirmed,
    ClearCancelled,
    ClearCompleted,
    ClearFailed(StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SaveCredentials(Credentials),
    PromptBiometric(PromptConfig),
    LoadCredentials,
    ClearStore,
    RequestClearConfirmation(ConfirmationDialog),
    Alert(Alert),
}

/// One-shot message the user acknowledges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    RegisterSucceeded,
    RegisterFailed,
    LoginFailed,
    BiometricCancelled,
    BiometricFailed,
    ClearSucceeded,
    ClearFailed,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Alert::RegisterSucceeded => text::REGISTER_SUCCEEDED,
            Alert::RegisterFailed => text::REGISTER_FAILED,
            Alert::LoginFailed => text::LOGIN_FAILED,
            Alert::BiometricCancelled => text::BIOMETRIC_CANCELLED,
            Alert::BiometricFailed => text::BIOMETRIC_FAILED,
            Alert::ClearSucceeded => text::CLEAR_SUCCEEDED,
            Alert::ClearFailed => text::CLEAR_FAILED,
        }
    }

    /// `None` for confirmations of success.
    pub fn error_code(self) -> Option<ErrorCode> {
        match self {
            Alert::RegisterSucceeded | Alert::ClearSucceeded => None,
            Alert::RegisterFailed | Alert::LoginFailed | Alert::ClearFailed => {
                Some(ErrorCode::Storage)
            }
            Alert::BiometricCancelled | Alert::BiometricFailed => Some(ErrorCode::Biometric),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog {
    pub title: &'static str,
    pub body: &'static str,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

impl ConfirmationDialog {
    pub fn clear_all() -> Self {
        Self {
            title: text::CLEAR_CONFIRM_TITLE,
            body: text::CLEAR_CONFIRM_BODY,
            cancel_label: text::CANCEL,
            confirm_label: text::CONFIRM,
        }
    }
}

/// What the UI has to show after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Alert(Alert),
    ConfirmClear(ConfirmationDialog),
}

/// Required-field check. Only the empty string fails: whitespace is kept as typed.
pub fn validate(first_name: &str, last_name: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if first_name.is_empty() {
        errors.insert(Field::FirstName, text::FIELD_REQUIRED);
    }
    if last_name.is_empty() {
        errors.insert(Field::LastName, text::FIELD_REQUIRED);
    }
    errors
}

pub fn reduce(mut state: UiState, event: FormEvent) -> (UiState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        FormEvent::FieldEdited { field, value } => match field {
            Field::FirstName => state.first_name = value,
            Field::LastName => state.last_name = value,
        },
        FormEvent::RegisterRequested(submitted) => {
            state.errors = validate(&submitted.first_name, &submitted.last_name);
            if state.errors.is_empty() {
                effects.push(Effect::SaveCredentials(submitted));
            }
        }
        FormEvent::RegisterSaved => {
            state.first_name.clear();
            state.last_name.clear();
            state.show_login_button = true;
            state.phase = Phase::Registered;
            effects.push(Effect::Alert(Alert::RegisterSucceeded));
        }
        FormEvent::RegisterFailed(_) => effects.push(Effect::Alert(Alert::RegisterFailed)),
        FormEvent::LoginRequested => {
            // The sign-in button only exists once something was registered.
            if state.show_login_button {
                effects.push(Effect::PromptBiometric(PromptConfig::default()));
            }
        }
        FormEvent::BiometricResolved(Ok(PromptResult { success: true })) => {
            effects.push(Effect::LoadCredentials)
        }
        FormEvent::BiometricResolved(Ok(PromptResult { success: false })) => {
            effects.push(Effect::Alert(Alert::BiometricCancelled))
        }
        FormEvent::BiometricResolved(Err(_)) => effects.push(Effect::Alert(Alert::BiometricFailed)),
        FormEvent::CredentialsLoaded(Ok(credentials)) => {
            if credentials.is_complete() {
                state.loaded_credentials = Some(credentials);
                state.phase = Phase::LoggedIn;
            }
        }
        FormEvent::CredentialsLoaded(Err(_)) => effects.push(Effect::Alert(Alert::LoginFailed)),
        FormEvent::ClearRequested => {
            state.clear_confirmation_pending = true;
            effects.push(Effect::RequestClearConfirmation(
                ConfirmationDialog::clear_all(),
            ));
        }
        FormEvent::ClearConfirmed => {
            if state.clear_confirmation_pending {
                state.clear_confirmation_pending = false;
                effects.push(Effect::ClearStore);
            }
        }
        FormEvent::ClearCancelled => state.clear_confirmation_pending = false,
        FormEvent::ClearCompleted => {
            state = UiState::default();
            effects.push(Effect::Alert(Alert::ClearSucceeded));
        }
        FormEvent::ClearFailed(_) => effects.push(Effect::Alert(Alert::ClearFailed)),
    }

    (state, effects)
}

#[cfg(test)]
#[path = "tests/state_machine_tests.rs"]
mod tests;
