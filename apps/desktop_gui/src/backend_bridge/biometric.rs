use async_trait::async_trait;
use client_core::{BiometricGate, PromptConfig, PromptResult};
use crossbeam_channel::Sender;
use shared::error::BiometricError;
use tokio::sync::oneshot;

use crate::controller::events::{BiometricPromptRequest, UiEvent};

/// Desktop stand-in for the fingerprint sensor: the UI thread shows the
/// prompt as a modal and answers over a oneshot channel.
pub struct ModalBiometricGate {
    ui_tx: Sender<UiEvent>,
}

impl ModalBiometricGate {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

#[async_trait]
impl BiometricGate for ModalBiometricGate {
    async fn prompt(&self, config: &PromptConfig) -> Result<PromptResult, BiometricError> {
        let (reply, answer) = oneshot::channel();
        self.ui_tx
            .try_send(UiEvent::BiometricPrompt(BiometricPromptRequest {
                config: config.clone(),
                reply,
            }))
            .map_err(|err| {
                BiometricError::Unavailable(format!("prompt could not be displayed: {err}"))
            })?;

        answer.await.map_err(|_| {
            BiometricError::PromptFailed("prompt closed without an answer".to_string())
        })
    }
}
