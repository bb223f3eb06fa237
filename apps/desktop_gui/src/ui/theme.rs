use egui::Color32;

pub const PRIMARY_BUTTON: Color32 = Color32::from_rgb(0x03, 0xac, 0x13);
pub const DANGER_BUTTON: Color32 = Color32::from_rgb(0x99, 0x0f, 0x02);
pub const BUTTON_TEXT: Color32 = Color32::WHITE;
pub const FIELD_ERROR_TEXT: Color32 = Color32::from_rgb(0xd3, 0x2f, 0x2f);
pub const INPUT_BORDER: Color32 = Color32::from_rgb(0x9e, 0x9e, 0x9e);
pub const IDENTITY_PANEL_FILL: Color32 = Color32::from_rgb(0xf2, 0xf7, 0xf2);

pub const BANNER_FILL: Color32 = Color32::from_rgb(111, 53, 53);
pub const BANNER_STROKE: Color32 = Color32::from_rgb(175, 96, 96);

pub const CONTENT_WIDTH: f32 = 360.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

pub fn filled_button(label: &str, fill: Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label.to_owned()).color(BUTTON_TEXT).strong())
        .fill(fill)
        .corner_radius(6.0)
        .min_size(egui::vec2(CONTENT_WIDTH, BUTTON_HEIGHT))
}
