use egui::{Color32, FontId, Stroke, Visuals};

use crate::model::TaskPriority;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_GROUP_HEADER: Color32 = Color32::from_rgb(28, 30, 40);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const GRID_LINE_MAJOR: Color32 = Color32::from_rgb(58, 61, 76);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);

pub const BAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);
pub const BAR_CRITICAL: Color32 = Color32::from_rgb(229, 86, 74);
pub const MILESTONE_COLOR: Color32 = Color32::from_rgb(255, 165, 0);
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 55);

pub const ARROW_COLOR: Color32 = Color32::from_rgb(120, 126, 148);
pub const ARROW_CRITICAL: Color32 = Color32::from_rgb(240, 110, 100);

pub const WORKLOAD_CELL: Color32 = Color32::from_rgb(80, 140, 220);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const GROUP_HEADER_HEIGHT: f32 = 18.0;
pub const MARKER_HEIGHT: f32 = 26.0;
pub const HEADER_HEIGHT: f32 = GROUP_HEADER_HEIGHT + MARKER_HEIGHT;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch row edges
pub const WORKLOAD_ROW_HEIGHT: f32 = 16.0;

/// Concurrent tasks at or above this count render at full intensity.
pub const WORKLOAD_FULL_INTENSITY: u32 = 3;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(12.5)
}

// ── Semantic colors ──────────────────────────────────────────────────────────

pub fn priority_color(priority: TaskPriority) -> Color32 {
    match priority {
        TaskPriority::Critical => Color32::from_rgb(229, 57, 53),
        TaskPriority::High => Color32::from_rgb(251, 140, 0),
        TaskPriority::Medium => Color32::from_rgb(66, 133, 244),
        TaskPriority::Low => Color32::from_rgb(52, 168, 83),
        TaskPriority::None => TEXT_DIM,
    }
}

/// Workload count → fill alpha, saturating at [`WORKLOAD_FULL_INTENSITY`].
pub fn workload_intensity(count: u32) -> Color32 {
    if count == 0 {
        return Color32::TRANSPARENT;
    }
    let t = (count.min(WORKLOAD_FULL_INTENSITY) as f32) / WORKLOAD_FULL_INTENSITY as f32;
    Color32::from_rgba_unmultiplied(
        WORKLOAD_CELL.r(),
        WORKLOAD_CELL.g(),
        WORKLOAD_CELL.b(),
        (40.0 + 180.0 * t) as u8,
    )
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);

    ctx.set_visuals(visuals);
}
