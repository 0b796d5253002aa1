use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};

pub const PRIMARY: Color32 = Color32::from_rgb(0x1a, 0x23, 0x7e); // dark navy
pub const SECONDARY: Color32 = Color32::from_rgb(0x30, 0x3f, 0x9f);
pub const BACKGROUND: Color32 = Color32::from_rgb(0xe8, 0xea, 0xf6);
pub const ACCENT: Color32 = Color32::from_rgb(0xc5, 0xca, 0xe9);
pub const LIGHT_TEXT: Color32 = Color32::WHITE;
pub const DARK_TEXT: Color32 = Color32::from_rgb(0x26, 0x32, 0x38);
pub const LIST_FILL: Color32 = Color32::WHITE;
pub const DONE_TEXT: Color32 = Color32::from_rgb(0x78, 0x86, 0x8f);

pub const HEADER_SIZE: f32 = 24.0;
pub const NORMAL_SIZE: f32 = 12.0;
pub const LIST_SIZE: f32 = 14.0;
pub const STATUS_SIZE: f32 = 10.0;

pub const HEADER_HEIGHT: f32 = 80.0;
pub const STATUS_HEIGHT: f32 = 30.0;
pub const BUTTON_ROW_HEIGHT: f32 = 60.0;

pub fn font(size: f32) -> FontId {
    FontId::new(size, FontFamily::Proportional)
}

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles.insert(TextStyle::Heading, font(HEADER_SIZE));
    style.text_styles.insert(TextStyle::Body, font(NORMAL_SIZE));
    style.text_styles.insert(TextStyle::Button, font(NORMAL_SIZE));
    style.text_styles.insert(TextStyle::Small, font(STATUS_SIZE));

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BACKGROUND;
    style.visuals.window_fill = BACKGROUND;
    style.visuals.extreme_bg_color = LIST_FILL;
    style.visuals.override_text_color = Some(DARK_TEXT);
    style.visuals.selection.bg_fill = SECONDARY;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, LIGHT_TEXT);
    style.visuals.widgets.hovered.weak_bg_fill = ACCENT;

    ctx.set_style(style);
}
