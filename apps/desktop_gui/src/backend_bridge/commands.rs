//! Backend commands queued from UI to backend worker.

use shared::domain::{Credentials, Field};

pub enum BackendCommand {
    EditField { field: Field, value: String, seq: u64 },
    /// Carries the inputs as they were when the button was pressed.
    Register(Credentials),
    Login,
    ClearAll,
    ConfirmClearAll,
    CancelClearAll,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::EditField { .. } => "edit_field",
            BackendCommand::Register(_) => "register",
            BackendCommand::Login => "login",
            BackendCommand::ClearAll => "clear_all",
            BackendCommand::ConfirmClearAll => "confirm_clear_all",
            BackendCommand::CancelClearAll => "cancel_clear_all",
        }
    }
}
