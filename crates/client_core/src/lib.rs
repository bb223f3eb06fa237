use std::sync::Arc;

use async_trait::async_trait;
use shared::{error::BiometricError, text};
use tracing::warn;

mod form_controller;
pub mod state_machine;

pub use form_controller::FormController;
pub use state_machine::{
    reduce, validate, Alert, ConfirmationDialog, Effect, FormEvent, Notice, Phase, UiState,
};

/// Text shown by the platform prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub message: String,
    pub cancel_label: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            message: text::BIOMETRIC_PROMPT_MESSAGE.to_string(),
            cancel_label: text::CANCEL.to_string(),
        }
    }
}

/// `success == false` means the user dismissed the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptResult {
    pub success: bool,
}

impl PromptResult {
    pub fn confirmed() -> Self {
        Self { success: true }
    }

    pub fn cancelled() -> Self {
        Self { success: false }
    }
}

/// Confirms the device owner's identity before stored credentials are read.
/// Errors are reserved for hardware or availability failures.
#[async_trait]
pub trait BiometricGate: Send + Sync {
    async fn prompt(&self, config: &PromptConfig) -> Result<PromptResult, BiometricError>;
}

#[async_trait]
impl<T: BiometricGate + ?Sized> BiometricGate for Arc<T> {
    async fn prompt(&self, config: &PromptConfig) -> Result<PromptResult, BiometricError> {
        (**self).prompt(config).await
    }
}

/// Gate for devices without a biometric sensor: every prompt is rejected.
pub struct UnavailableBiometricGate;

#[async_trait]
impl BiometricGate for UnavailableBiometricGate {
    async fn prompt(&self, _config: &PromptConfig) -> Result<PromptResult, BiometricError> {
        warn!("biometric prompt requested but no sensor is available");
        Err(BiometricError::Unavailable(
            "biometric authentication is not supported on this device".to_string(),
        ))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
