use chrono::Local;
use eframe::egui;
use shared::domain::ChatMessage;

use crate::ui::theme::PhonePalette;

pub fn bubble_timestamp(message: &ChatMessage) -> String {
    message
        .created_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

/// One chat bubble: user messages hug the right edge, responder messages the left.
pub fn message_bubble(ui: &mut egui::Ui, message: &ChatMessage, palette: PhonePalette) {
    let max_bubble_width = ui.available_width() * 0.7;
    let (layout, fill) = if message.is_from_user() {
        (
            egui::Layout::right_to_left(egui::Align::TOP),
            palette.user_bubble,
        )
    } else {
        (
            egui::Layout::left_to_right(egui::Align::TOP),
            palette.responder_bubble,
        )
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_max_width(max_bubble_width);
                ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&message.text).color(palette.bubble_text),
                        )
                        .wrap(),
                    );
                    ui.add_space(4.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(bubble_timestamp(message))
                                .size(10.0)
                                .color(palette.timestamp_text),
                        )
                        .selectable(false),
                    );
                });
            });
    });
    ui.add_space(8.0);
}

pub fn typing_indicator(ui: &mut egui::Ui, palette: PhonePalette) {
    ui.with_layout(egui::Layout::left_to_right(egui::Align::TOP), |ui| {
        egui::Frame::new()
            .fill(palette.responder_bubble)
            .corner_radius(egui::CornerRadius::same(24))
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.add(
                    egui::Spinner::new()
                        .size(24.0)
                        .color(palette.spinner_accent),
                );
            });
    });
    ui.add_space(8.0);
}

pub fn error_banner(ui: &mut egui::Ui, message: &str, palette: PhonePalette) {
    egui::Frame::new()
        .fill(palette.error_fill)
        .stroke(egui::Stroke::new(1.0, palette.error_stroke))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    egui::RichText::new("Error!")
                        .strong()
                        .color(palette.error_text),
                );
                ui.label(egui::RichText::new(message).color(palette.error_text));
            });
        });
}

pub fn quick_action_button(label: &str, palette: PhonePalette) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(label)
            .strong()
            .color(palette.quick_action_text),
    )
    .fill(palette.quick_action_fill)
    .corner_radius(egui::CornerRadius::same(18))
    .min_size(egui::vec2(84.0, 34.0))
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone, Utc};
    use shared::domain::{ChatMessage, MessageId, Sender};

    use super::bubble_timestamp;

    #[test]
    fn timestamp_is_local_hour_and_minute() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 13, 7, 0).single().expect("valid");
        let message = ChatMessage {
            id: MessageId(1),
            text: "hi".to_string(),
            sender: Sender::User,
            created_at,
        };
        let expected = created_at.with_timezone(&Local).format("%H:%M").to_string();
        assert_eq!(bubble_timestamp(&message), expected);
        assert_eq!(bubble_timestamp(&message).len(), 5);
    }
}
