use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::{Plan, PlanStatus};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);

pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 55);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 52.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch row edges
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 300.0;

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

pub fn font_timer() -> FontId {
    FontId::monospace(56.0)
}

// ── Plan color palette ───────────────────────────────────────────────────────

/// The fixed palette a plan's explicit color is picked from.
pub const PLAN_COLORS: &[(&str, Color32)] = &[
    ("Indigo", Color32::from_rgb(129, 140, 248)),
    ("Blue", Color32::from_rgb(59, 130, 246)),
    ("Green", Color32::from_rgb(34, 197, 94)),
    ("Yellow", Color32::from_rgb(234, 179, 8)),
    ("Red", Color32::from_rgb(239, 68, 68)),
    ("Purple", Color32::from_rgb(168, 85, 247)),
    ("Pink", Color32::from_rgb(236, 72, 153)),
    ("Orange", Color32::from_rgb(249, 115, 22)),
    ("Teal", Color32::from_rgb(20, 184, 166)),
];

const STATUS_COMPLETED: Color32 = Color32::from_rgb(34, 197, 94);
const STATUS_CANCELED: Color32 = Color32::from_rgb(180, 83, 83);
const STATUS_IN_PROGRESS: Color32 = Color32::from_rgb(59, 130, 246);

/// Bar color for a plan. An explicit color wins; otherwise the status
/// decides, and not-started plans fall back to a duration bucket so long
/// plans read differently from short ones.
pub fn plan_color(plan: &Plan) -> Color32 {
    if let Some(color) = plan.color {
        return color;
    }
    match plan.status {
        PlanStatus::Completed => STATUS_COMPLETED,
        PlanStatus::Canceled => STATUS_CANCELED,
        PlanStatus::InProgress => STATUS_IN_PROGRESS,
        PlanStatus::NotStarted => {
            let days = plan.duration_days();
            if days <= 7 {
                Color32::from_rgb(129, 140, 248) // up to a week
            } else if days <= 30 {
                Color32::from_rgb(168, 85, 247) // up to a month
            } else if days <= 90 {
                Color32::from_rgb(139, 92, 246) // up to a quarter
            } else {
                Color32::from_rgb(236, 72, 153) // long running
            }
        }
    }
}

/// Small status badge color pair (background, text).
pub fn status_colors(status: PlanStatus) -> (Color32, Color32) {
    match status {
        PlanStatus::NotStarted => (Color32::from_rgb(55, 58, 70), TEXT_SECONDARY),
        PlanStatus::InProgress => (Color32::from_rgb(34, 52, 86), Color32::from_rgb(140, 180, 250)),
        PlanStatus::Completed => (Color32::from_rgb(26, 58, 40), Color32::from_rgb(120, 220, 160)),
        PlanStatus::Canceled => (Color32::from_rgb(66, 34, 34), Color32::from_rgb(240, 150, 150)),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.widgets.open.bg_fill = Color32::from_rgb(50, 52, 66);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
