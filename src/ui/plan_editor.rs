use egui::{Color32, RichText, Ui};

use crate::model::{Plan, PlanStatus};
use crate::store::PlanPatch;
use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    /// A field changed; apply this patch through the store.
    Edited(PlanPatch),
    AddSubPlan,
    Delete,
}

/// Render an inline editor for the selected plan. The plan itself is not
/// mutated here; every change comes back as a patch so the store stays the
/// single writer.
pub fn show_plan_editor(plan: &Plan, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Edit Plan")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new(
                    RichText::new("✕ Delete").size(10.0).color(theme::TEXT_DIM),
                ))
                .clicked()
            {
                action = EditorAction::Delete;
            }
            if ui
                .add(egui::Button::new(
                    RichText::new("＋ Sub-plan").size(10.0).color(theme::TEXT_SECONDARY),
                ))
                .clicked()
            {
                action = EditorAction::AddSubPlan;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        let field_label = |ui: &mut Ui, text: &str| {
            ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
        };

        // ── Name ──────────────────────────────────────────────────────
        field_label(ui, "Name");
        let mut name = plan.name.clone();
        let name_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut name)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        // Names below the 2-character minimum would bounce off the store;
        // hold the patch until the field is valid again.
        if name_edit.changed() && name.trim().chars().count() >= 2 {
            action = EditorAction::Edited(PlanPatch {
                name: Some(name),
                ..Default::default()
            });
        }

        // ── Description ───────────────────────────────────────────────
        field_label(ui, "Description");
        let mut description = plan.description.clone();
        let desc_edit = ui.add_sized(
            [ui.available_width(), 40.0],
            egui::TextEdit::multiline(&mut description)
                .font(egui::FontId::proportional(11.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        if desc_edit.changed() {
            action = EditorAction::Edited(PlanPatch {
                description: Some(description),
                ..Default::default()
            });
        }

        // ── Dates ─────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                field_label(ui, "Start");
                let mut start = plan.start;
                if ui
                    .add(egui_extras::DatePickerButton::new(&mut start).id_salt("edit_dp_start"))
                    .changed()
                {
                    action = EditorAction::Edited(PlanPatch {
                        start: Some(start),
                        end: Some(plan.end.max(start)),
                        ..Default::default()
                    });
                }
            });
            ui.vertical(|ui| {
                field_label(ui, "End");
                let mut end = plan.end;
                if ui
                    .add(egui_extras::DatePickerButton::new(&mut end).id_salt("edit_dp_end"))
                    .changed()
                {
                    action = EditorAction::Edited(PlanPatch {
                        end: Some(end.max(plan.start)),
                        ..Default::default()
                    });
                }
            });
        });

        // ── Status ────────────────────────────────────────────────────
        field_label(ui, "Status");
        egui::ComboBox::from_id_salt("status_combo")
            .selected_text(RichText::new(plan.status.label()).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for status in PlanStatus::ALL {
                    if ui
                        .selectable_label(plan.status == status, status.label())
                        .clicked()
                        && status != plan.status
                    {
                        action = EditorAction::Edited(PlanPatch {
                            status: Some(status),
                            ..Default::default()
                        });
                    }
                }
            });

        // ── Progress ──────────────────────────────────────────────────
        field_label(ui, "Progress");
        let mut progress = plan.progress;
        if ui
            .add(egui::Slider::new(&mut progress, 0..=100).suffix("%"))
            .changed()
        {
            action = EditorAction::Edited(PlanPatch {
                progress: Some(progress),
                ..Default::default()
            });
        }

        // ── Color ─────────────────────────────────────────────────────
        field_label(ui, "Color");
        ui.horizontal_wrapped(|ui| {
            let auto = ui.add(
                egui::Button::new(RichText::new("auto").size(10.0).color(
                    if plan.color.is_none() {
                        Color32::WHITE
                    } else {
                        theme::TEXT_DIM
                    },
                ))
                .fill(theme::BG_HEADER)
                .rounding(egui::Rounding::same(3.0)),
            );
            if auto.on_hover_text("Derive from status and duration").clicked() {
                action = EditorAction::Edited(PlanPatch {
                    color: Some(None),
                    ..Default::default()
                });
            }
            for &(label, color) in theme::PLAN_COLORS {
                let (rect, resp) =
                    ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::click());
                ui.painter()
                    .rect_filled(rect, egui::Rounding::same(3.0), color);
                if plan.color == Some(color) {
                    ui.painter().rect_stroke(
                        rect.expand(1.0),
                        egui::Rounding::same(4.0),
                        egui::Stroke::new(1.5, Color32::WHITE),
                    );
                }
                if resp.on_hover_text(label).clicked() {
                    action = EditorAction::Edited(PlanPatch {
                        color: Some(Some(color)),
                        ..Default::default()
                    });
                }
            }
        });

        // Status badge footer
        ui.add_space(2.0);
        let (badge_bg, badge_fg) = theme::status_colors(plan.status);
        ui.horizontal(|ui| {
            egui::Frame::default()
                .fill(badge_bg)
                .rounding(egui::Rounding::same(3.0))
                .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                .show(ui, |ui| {
                    ui.label(RichText::new(plan.status.label()).size(9.5).color(badge_fg));
                });
            ui.label(
                RichText::new(format!("{} days", plan.duration_days()))
                    .size(9.5)
                    .color(theme::TEXT_DIM),
            );
        });
    });

    action
}
