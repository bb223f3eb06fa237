use std::collections::VecDeque;

use client_core::{Alert, ConfirmationDialog, UiState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Credentials, Field},
    text,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, BiometricPromptRequest, UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::theme;

#[derive(Debug, Clone)]
struct StatusBanner {
    title: &'static str,
    message: String,
}

pub struct FormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    /// Last snapshot reported by the backend.
    form: UiState,
    first_name: String,
    last_name: String,
    /// Sequence number of the last field edit sent to the backend.
    edit_seq: u64,
    alerts: VecDeque<Alert>,
    confirmation: Option<ConfirmationDialog>,
    biometric_prompt: Option<BiometricPromptRequest>,
    status_banner: Option<StatusBanner>,
}

impl FormApp {
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: UiState::default(),
            first_name: String::new(),
            last_name: String::new(),
            edit_seq: 0,
            alerts: VecDeque::new(),
            confirmation: None,
            biometric_prompt: None,
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::StateChanged { state, edit_seq } => {
                    // Older snapshots would wipe out keystrokes still in flight.
                    if edit_seq >= self.edit_seq {
                        self.first_name = state.first_name.clone();
                        self.last_name = state.last_name.clone();
                    }
                    self.form = state;
                }
                UiEvent::Alert(alert) => self.alerts.push_back(alert),
                UiEvent::ConfirmClear(dialog) => self.confirmation = Some(dialog),
                UiEvent::BiometricPrompt(request) => {
                    if let Some(stale) = self.biometric_prompt.replace(request) {
                        stale.answer(false);
                    }
                }
                UiEvent::Error(err) => self.show_error(err),
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(
            context = ?err.context(),
            category = ?err.category(),
            "{}",
            err.message()
        );
        self.status_banner = Some(StatusBanner {
            title: err_label(err.category()),
            message: err.message().to_string(),
        });
    }

    fn send(&mut self, cmd: BackendCommand) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.show_error(err);
        }
    }

    fn send_field_edit(&mut self, field: Field) {
        let value = match field {
            Field::FirstName => self.first_name.clone(),
            Field::LastName => self.last_name.clone(),
        };
        self.edit_seq += 1;
        let seq = self.edit_seq;
        self.send(BackendCommand::EditField { field, value, seq });
    }

    fn send_register(&mut self) {
        let submitted = Credentials::new(self.first_name.clone(), self.last_name.clone());
        self.send(BackendCommand::Register(submitted));
    }

    fn answer_biometric_prompt(&mut self, success: bool) {
        if let Some(request) = self.biometric_prompt.take() {
            request.answer(success);
        }
    }

    fn resolve_confirmation(&mut self, confirmed: bool) {
        if self.confirmation.take().is_none() {
            return;
        }
        self.send(if confirmed {
            BackendCommand::ConfirmClearAll
        } else {
            BackendCommand::CancelClearAll
        });
    }

    fn dialog_open(&self) -> bool {
        self.biometric_prompt.is_some() || self.confirmation.is_some() || !self.alerts.is_empty()
    }

    fn show_form_screen(&mut self, ctx: &egui::Context) {
        let enabled = !self.dialog_open();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_width(theme::CONTENT_WIDTH);
                    ui.add_space(24.0);
                    self.show_status_banner(ui);
                    ui.add_enabled_ui(enabled, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        self.show_identity_panel(ui);
                        if self.form.show_login_button {
                            if ui
                                .add(theme::filled_button(text::LOGIN_BUTTON, theme::PRIMARY_BUTTON))
                                .clicked()
                            {
                                self.send(BackendCommand::Login);
                            }
                            ui.separator();
                        }

                        self.field_input(ui, Field::FirstName);
                        self.field_input(ui, Field::LastName);

                        if ui
                            .add(theme::filled_button(text::REGISTER_BUTTON, theme::PRIMARY_BUTTON))
                            .clicked()
                        {
                            self.send_register();
                        }
                        ui.separator();
                        if ui
                            .add(theme::filled_button(text::CLEAR_BUTTON, theme::DANGER_BUTTON))
                            .clicked()
                        {
                            self.send(BackendCommand::ClearAll);
                        }
                    });
                });
            });
        });
    }

    fn show_identity_panel(&self, ui: &mut egui::Ui) {
        let Some(credentials) = &self.form.loaded_credentials else {
            return;
        };
        egui::Frame::NONE
            .fill(theme::IDENTITY_PANEL_FILL)
            .stroke(egui::Stroke::new(1.0, theme::INPUT_BORDER))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_width(theme::CONTENT_WIDTH - 24.0);
                ui.horizontal(|ui| {
                    ui.strong(text::FIRST_NAME_LABEL);
                    ui.label(&credentials.first_name);
                });
                ui.horizontal(|ui| {
                    ui.strong(text::LAST_NAME_LABEL);
                    ui.label(&credentials.last_name);
                });
            });
    }

    fn field_input(&mut self, ui: &mut egui::Ui, field: Field) {
        let (buffer, hint) = match field {
            Field::FirstName => (&mut self.first_name, text::FIRST_NAME_PLACEHOLDER),
            Field::LastName => (&mut self.last_name, text::LAST_NAME_PLACEHOLDER),
        };
        let response = ui.add(
            egui::TextEdit::singleline(buffer)
                .id_salt(field.key())
                .hint_text(hint)
                .desired_width(theme::CONTENT_WIDTH),
        );
        if response.changed() {
            self.send_field_edit(field);
        }
        if let Some(message) = self.form.errors.get(field) {
            ui.colored_label(theme::FIELD_ERROR_TEXT, message);
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(theme::BANNER_FILL)
            .stroke(egui::Stroke::new(1.0, theme::BANNER_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{} : {}", banner.title, banner.message))
                            .color(egui::Color32::WHITE),
                    );
                    if ui.button(text::OK).clicked() {
                        self.status_banner = None;
                    }
                });
            });
        ui.add_space(8.0);
    }

    fn modal_window(title: &str) -> egui::Window<'static> {
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
    }

    /// Shows at most one dialog per frame: the biometric prompt, then the
    /// clear-all confirmation, then queued alerts.
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(request) = &self.biometric_prompt {
            let mut answer = None;
            Self::modal_window(text::BIOMETRIC_PROMPT_MESSAGE).show(ctx, |ui| {
                ui.label(&request.config.message);
                ui.horizontal(|ui| {
                    if ui.button(request.config.cancel_label.as_str()).clicked() {
                        answer = Some(false);
                    }
                    if ui.button(text::BIOMETRIC_CONFIRM).clicked() {
                        answer = Some(true);
                    }
                });
            });
            if let Some(success) = answer {
                self.answer_biometric_prompt(success);
            }
            return;
        }

        if let Some(dialog) = &self.confirmation {
            let mut choice = None;
            Self::modal_window(dialog.title).show(ctx, |ui| {
                ui.label(dialog.body);
                ui.horizontal(|ui| {
                    if ui.button(dialog.cancel_label).clicked() {
                        choice = Some(false);
                    }
                    if ui
                        .add(egui::Button::new(dialog.confirm_label).fill(theme::DANGER_BUTTON))
                        .clicked()
                    {
                        choice = Some(true);
                    }
                });
            });
            if let Some(confirmed) = choice {
                self.resolve_confirmation(confirmed);
            }
            return;
        }

        if let Some(alert) = self.alerts.front().copied() {
            let mut acknowledged = false;
            Self::modal_window("empreinte_alert")
                .title_bar(false)
                .show(ctx, |ui| {
                    ui.label(alert.message());
                    if ui.button(text::OK).clicked() {
                        acknowledged = true;
                    }
                });
            if acknowledged {
                self.alerts.pop_front();
            }
        }
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form_screen(ctx);
        self.show_dialogs(ctx);
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
