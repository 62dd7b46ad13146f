use eframe::egui;

pub const PHONE_WIDTH: f32 = 375.0;
pub const PHONE_HEIGHT: f32 = 667.0;
pub const PHONE_BEZEL: f32 = 5.0;
pub const NOTCH_HEIGHT: f32 = 30.0;
pub const COMPOSER_HEIGHT: f32 = 64.0;

#[derive(Debug, Clone, Copy)]
pub struct PhonePalette {
    pub backdrop: egui::Color32,
    pub phone_body: egui::Color32,
    pub screen: egui::Color32,
    pub user_bubble: egui::Color32,
    pub responder_bubble: egui::Color32,
    pub bubble_text: egui::Color32,
    pub timestamp_text: egui::Color32,
    pub composer_background: egui::Color32,
    pub input_background: egui::Color32,
    pub send_button: egui::Color32,
    pub spinner_accent: egui::Color32,
    pub error_fill: egui::Color32,
    pub error_stroke: egui::Color32,
    pub error_text: egui::Color32,
    pub quick_action_fill: egui::Color32,
    pub quick_action_text: egui::Color32,
    pub status_text: egui::Color32,
}

pub fn phone_palette() -> PhonePalette {
    PhonePalette {
        backdrop: egui::Color32::from_rgb(42, 52, 57),
        phone_body: egui::Color32::BLACK,
        screen: egui::Color32::from_rgb(10, 10, 12),
        user_bubble: egui::Color32::from_rgb(59, 130, 246),
        responder_bubble: egui::Color32::from_rgb(55, 65, 81),
        bubble_text: egui::Color32::WHITE,
        timestamp_text: egui::Color32::from_rgba_unmultiplied(255, 255, 255, 178),
        composer_background: egui::Color32::from_rgb(31, 41, 55),
        input_background: egui::Color32::from_rgb(55, 65, 81),
        send_button: egui::Color32::from_rgb(59, 130, 246),
        spinner_accent: egui::Color32::from_rgb(59, 130, 246),
        error_fill: egui::Color32::from_rgb(127, 29, 29),
        error_stroke: egui::Color32::from_rgb(185, 28, 28),
        error_text: egui::Color32::from_rgb(254, 226, 226),
        quick_action_fill: egui::Color32::from_rgb(229, 231, 235),
        quick_action_text: egui::Color32::from_rgb(31, 41, 55),
        status_text: egui::Color32::from_rgb(156, 163, 175),
    }
}

pub fn visuals_for_phone(palette: PhonePalette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = palette.backdrop;
    visuals.window_fill = palette.backdrop;
    visuals.extreme_bg_color = palette.input_background;
    visuals.override_text_color = Some(palette.bubble_text);
    visuals.selection.stroke = egui::Stroke::new(1.0, palette.spinner_accent);
    visuals
}
