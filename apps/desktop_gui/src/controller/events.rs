//! Backend-to-UI events and error modeling for the form screen.

use client_core::{Alert, ConfirmationDialog, PromptConfig, PromptResult, UiState};
use tokio::sync::oneshot;

pub enum UiEvent {
    /// Controller state after a command. `edit_seq` is the last field edit
    /// the backend had applied when the snapshot was taken.
    StateChanged {
        state: UiState,
        edit_seq: u64,
    },
    Alert(Alert),
    ConfirmClear(ConfirmationDialog),
    BiometricPrompt(BiometricPromptRequest),
    Error(UiError),
}

/// Open prompt; dropping it without answering fails the login attempt.
pub struct BiometricPromptRequest {
    pub config: PromptConfig,
    pub reply: oneshot::Sender<PromptResult>,
}

impl BiometricPromptRequest {
    pub fn answer(self, success: bool) {
        if self.reply.send(PromptResult { success }).is_err() {
            tracing::warn!("biometric answer dropped: backend no longer waiting");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    Biometric,
    Validation,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Register,
    Login,
    ClearAll,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_lowercase();
        let category = if message_lower.contains("sqlite")
            || message_lower.contains("database")
            || message_lower.contains("storage")
            || message_lower.contains("stockage")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("biometric")
            || message_lower.contains("biométrique")
            || message_lower.contains("empreinte")
            || message_lower.contains("sensor")
        {
            UiErrorCategory::Biometric
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("requis")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("queue")
            || message_lower.contains("disconnected")
            || message_lower.contains("channel")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Storage => "Stockage",
        UiErrorCategory::Biometric => "Biométrie",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Communication",
        UiErrorCategory::Unknown => "Erreur",
    }
}
