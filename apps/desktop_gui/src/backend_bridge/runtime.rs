//! Runtime bridge between UI command queue and the form controller.

use std::{sync::Arc, thread};

use client_core::{BiometricGate, FormController, Notice, UnavailableBiometricGate};
use crossbeam_channel::{Receiver, Sender};
use storage::{CredentialStore, MemoryKeyValueStore, SqliteKeyValueStore};

use crate::backend_bridge::{biometric::ModalBiometricGate, commands::BackendCommand};
use crate::config::{AppPaths, BiometricMode, StartupConfig};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub type DynFormController = FormController<Arc<dyn CredentialStore>, Arc<dyn BiometricGate>>;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, startup: StartupConfig) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let store = open_store(&startup, &ui_tx).await;
            let gate: Arc<dyn BiometricGate> = match startup.biometrics {
                BiometricMode::Prompt => Arc::new(ModalBiometricGate::new(ui_tx.clone())),
                BiometricMode::Unavailable => Arc::new(UnavailableBiometricGate),
            };
            tracing::info!(biometrics = ?startup.biometrics, "backend worker ready");

            let mut controller: DynFormController = FormController::new(store, gate);
            let mut edit_seq = 0;
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&mut controller, cmd, &ui_tx, &mut edit_seq).await;
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn open_store(startup: &StartupConfig, ui_tx: &Sender<UiEvent>) -> Arc<dyn CredentialStore> {
    match open_sqlite_store(startup).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::error!("falling back to in-memory storage: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!(
                    "stockage local indisponible, les données ne survivront pas au redémarrage ({err})"
                ),
            )));
            Arc::new(MemoryKeyValueStore::new())
        }
    }
}

async fn open_sqlite_store(startup: &StartupConfig) -> anyhow::Result<SqliteKeyValueStore> {
    let paths = AppPaths::from_startup(startup)?;
    tracing::info!(data_root = %paths.data_root.display(), "opening credential store");
    let store = SqliteKeyValueStore::new(&paths.database_url()).await?;
    store.health_check().await?;
    Ok(store)
}

/// Runs one command to completion and reports the outcome to the UI.
pub async fn handle_command<S, B>(
    controller: &mut FormController<S, B>,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
    edit_seq: &mut u64,
) where
    S: CredentialStore,
    B: BiometricGate,
{
    tracing::debug!(command = cmd.name(), "backend: handling command");
    let notices = match cmd {
        BackendCommand::EditField { field, value, seq } => {
            controller.edit_field(field, value).await;
            *edit_seq = seq;
            Vec::new()
        }
        BackendCommand::Register(submitted) => controller.register_submitted(submitted).await,
        BackendCommand::Login => controller.login().await,
        BackendCommand::ClearAll => controller.clear_all().await,
        BackendCommand::ConfirmClearAll => controller.confirm_clear_all().await,
        BackendCommand::CancelClearAll => controller.cancel_clear_all().await,
    };

    if ui_tx
        .try_send(UiEvent::StateChanged {
            state: controller.state().clone(),
            edit_seq: *edit_seq,
        })
        .is_err()
    {
        tracing::warn!("ui event queue unavailable; state snapshot dropped");
    }
    for notice in notices {
        let event = match notice {
            Notice::Alert(alert) => UiEvent::Alert(alert),
            Notice::ConfirmClear(dialog) => UiEvent::ConfirmClear(dialog),
        };
        if ui_tx.try_send(event).is_err() {
            tracing::warn!("ui event queue unavailable; notice dropped");
        }
    }
}
