//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    let context = match &cmd {
        BackendCommand::Register(_) => UiErrorContext::Register,
        BackendCommand::Login => UiErrorContext::Login,
        BackendCommand::ClearAll
        | BackendCommand::ConfirmClearAll
        | BackendCommand::CancelClearAll => UiErrorContext::ClearAll,
        BackendCommand::EditField { .. } => UiErrorContext::General,
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::from_message(
            context,
            "UI command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => Err(UiError::from_message(
            context,
            "Backend command processor disconnected (possible startup/runtime failure); restart the app",
        )),
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use shared::domain::Credentials;

    use super::*;
    use crate::controller::events::UiErrorCategory;

    #[test]
    fn queues_commands_in_order() {
        let (cmd_tx, cmd_rx) = bounded(4);
        dispatch_backend_command(&cmd_tx, BackendCommand::Register(Credentials::default())).expect("register");
        dispatch_backend_command(&cmd_tx, BackendCommand::Login).expect("login");

        assert_eq!(cmd_rx.try_recv().expect("first").name(), "register");
        assert_eq!(cmd_rx.try_recv().expect("second").name(), "login");
    }

    #[test]
    fn full_queue_is_reported_not_dropped_silently() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        dispatch_backend_command(&cmd_tx, BackendCommand::Register(Credentials::default())).expect("first fits");

        let err = dispatch_backend_command(&cmd_tx, BackendCommand::Register(Credentials::default()))
            .expect_err("queue is full");
        assert_eq!(err.context(), UiErrorContext::Register);
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn disconnected_backend_is_reported() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);

        let err = dispatch_backend_command(&cmd_tx, BackendCommand::ClearAll)
            .expect_err("no backend");
        assert_eq!(err.context(), UiErrorContext::ClearAll);
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }
}
