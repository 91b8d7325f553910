use egui::{Color32, Context, FontId, Visuals};

// Canvas colors, matching the yellow numbers and blue highlight of the terminal
pub const CANVAS_BG: Color32 = Color32::from_rgb(22, 22, 26);
pub const GUTTER_BG: Color32 = Color32::from_rgb(32, 32, 38);
pub const LINE_NUMBER: Color32 = Color32::from_rgb(255, 215, 0);
pub const CODE_TEXT: Color32 = Color32::WHITE;
pub const SELECTED_LINE_BG: Color32 = Color32::from_rgb(30, 60, 140);
pub const FLASH_TEXT: Color32 = Color32::from_rgb(120, 220, 120);

const CODE_FONT_SIZE: f32 = 14.0;

pub fn code_font() -> FontId {
    FontId::monospace(CODE_FONT_SIZE)
}

// Dark egui chrome around the canvas; the status bar location is drawn with the code font
pub fn apply_theme(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = CANVAS_BG;
    visuals.extreme_bg_color = GUTTER_BG;
    visuals.selection.bg_fill = SELECTED_LINE_BG;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.text_styles.insert(egui::TextStyle::Monospace, code_font());
    });
}
