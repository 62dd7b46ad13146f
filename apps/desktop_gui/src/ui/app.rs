use std::time::Duration;

use client_core::{ConversationSession, QuickAction};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::MessageId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::submit_draft;
use crate::controller::reducer::apply_ui_event;
use crate::ui::theme::{
    phone_palette, visuals_for_phone, PhonePalette, COMPOSER_HEIGHT, NOTCH_HEIGHT, PHONE_BEZEL,
    PHONE_HEIGHT, PHONE_WIDTH,
};
use crate::ui::widgets::{error_banner, message_bubble, quick_action_button, typing_indicator};

fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.set_clip_rect(rect);
    add(&mut child);
}

/// Enter submits; shift+Enter is reserved and does nothing.
pub(crate) fn should_submit_on_enter(enter_pressed: bool, shift_held: bool) -> bool {
    enter_pressed && !shift_held
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: ConversationSession,
    draft: String,
    status: String,
    palette: PhonePalette,
    theme_applied: bool,
    last_rendered_message: Option<MessageId>,
}

impl DesktopGuiApp {
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: ConversationSession::new(),
            draft: String::new(),
            status: "Backend worker starting...".to_string(),
            palette: phone_palette(),
            theme_applied: false,
            last_rendered_message: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.session, &mut self.status, event);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.theme_applied {
            ctx.set_visuals(visuals_for_phone(self.palette));
            self.theme_applied = true;
        }
    }

    fn show_quick_actions(&mut self, ui: &mut egui::Ui) {
        let spacing = ui.spacing().item_spacing.x;
        let row_width = QuickAction::ALL.len() as f32 * (84.0 + spacing);
        ui.horizontal(|ui| {
            ui.add_space(((ui.available_width() - row_width) * 0.5).max(0.0));
            for action in QuickAction::ALL {
                if ui
                    .add(quick_action_button(action.label(), self.palette))
                    .clicked()
                {
                    self.session.apply_quick_action(action);
                }
            }
        });
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(&self.status)
                    .size(11.0)
                    .color(self.palette.status_text),
            );
        });
    }

    fn show_phone(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_rect_before_wrap();
        let phone_rect = egui::Rect::from_min_size(
            egui::pos2(
                available.center().x - PHONE_WIDTH * 0.5,
                available.top() + 8.0,
            ),
            egui::vec2(PHONE_WIDTH, PHONE_HEIGHT),
        );
        ui.allocate_rect(phone_rect, egui::Sense::hover());

        let painter = ui.painter();
        painter.rect_filled(
            phone_rect,
            egui::CornerRadius::same(60),
            self.palette.phone_body,
        );
        let screen_rect = phone_rect.shrink(PHONE_BEZEL);
        painter.rect_filled(screen_rect, egui::CornerRadius::same(55), self.palette.screen);
        let notch_rect = egui::Rect::from_center_size(
            egui::pos2(screen_rect.center().x, screen_rect.top() + NOTCH_HEIGHT * 0.5),
            egui::vec2(PHONE_WIDTH * 0.4, NOTCH_HEIGHT - 5.0),
        );
        painter.rect_filled(notch_rect, egui::CornerRadius::same(12), self.palette.phone_body);

        let transcript_rect = egui::Rect::from_min_max(
            egui::pos2(screen_rect.left(), screen_rect.top() + NOTCH_HEIGHT + 8.0),
            egui::pos2(screen_rect.right(), screen_rect.bottom() - COMPOSER_HEIGHT - 24.0),
        );
        let composer_rect = egui::Rect::from_min_max(
            egui::pos2(screen_rect.left(), transcript_rect.bottom()),
            screen_rect.right_bottom(),
        );

        ui_in_rect(ui, transcript_rect, |ui| self.show_transcript(ui));
        ui_in_rect(ui, composer_rect, |ui| self.show_composer(ui));
    }

    fn show_transcript(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        let newest = self.session.messages().last().map(|m| m.id);
        let scroll_to_latest = newest != self.last_rendered_message;

        egui::ScrollArea::vertical()
            .id_salt("phone_transcript")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                egui::Frame::new()
                    .inner_margin(egui::Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        for message in self.session.messages() {
                            message_bubble(ui, message, palette);
                        }
                        if self.session.is_awaiting_reply() {
                            typing_indicator(ui, palette);
                        }
                        if let Some(error) = self.session.last_error() {
                            error_banner(ui, error, palette);
                        }
                    });
                if scroll_to_latest {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });

        self.last_rendered_message = newest;
    }

    fn show_composer(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        let awaiting = self.session.is_awaiting_reply();

        egui::Frame::new()
            .fill(palette.composer_background)
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                egui::Frame::new()
                    .fill(palette.input_background)
                    .corner_radius(egui::CornerRadius::same(20))
                    .inner_margin(egui::Margin::symmetric(10, 6))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let input_width = ui.available_width() - 44.0;
                            let input = ui.add_enabled(
                                !awaiting,
                                egui::TextEdit::singleline(&mut self.draft)
                                    .id_salt("phone_composer")
                                    .frame(false)
                                    .hint_text("Type a message...")
                                    .desired_width(input_width),
                            );
                            let enter_submit = input.lost_focus()
                                && ui.input(|i| {
                                    should_submit_on_enter(
                                        i.key_pressed(egui::Key::Enter),
                                        i.modifiers.shift,
                                    )
                                });

                            let send_button = egui::Button::new(
                                egui::RichText::new("➤").color(palette.bubble_text),
                            )
                            .fill(palette.send_button)
                            .corner_radius(egui::CornerRadius::same(16))
                            .min_size(egui::vec2(32.0, 32.0));
                            let send_clicked = ui.add_enabled(!awaiting, send_button).clicked();

                            if (enter_submit || send_clicked)
                                && submit_draft(&mut self.session, &mut self.draft, &self.cmd_tx)
                            {
                                input.request_focus();
                            }
                        });
                    });
            });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.palette.backdrop)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.show_quick_actions(ui);
                ui.add_space(8.0);
                self.show_phone(ui);
            });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
