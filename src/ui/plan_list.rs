use std::collections::HashSet;

use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::Plan;
use crate::store::PlanStore;
use crate::ui::theme;

/// Actions that the plan list can request.
pub enum PlanListAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    ToggleExpand(Uuid),
    Add,
}

/// Render the left-side plan tree panel.
pub fn show_plan_list(
    store: &PlanStore,
    expanded: &HashSet<Uuid>,
    selected: Option<Uuid>,
    ui: &mut Ui,
) -> PlanListAction {
    let mut action = PlanListAction::None;

    let mut roots: Vec<&Plan> = store.plans().into_iter().filter(|p| p.parent_id.is_none()).collect();
    roots.sort_by_key(|p| p.start);

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Plans")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", store.plans().len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(RichText::new("＋  New Plan").color(Color32::WHITE).size(12.0))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = PlanListAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let mut zebra = 0usize;
            for root in roots {
                show_plan_row(store, root, 0, expanded, selected, &mut zebra, ui, &mut action);
            }
        });

    action
}

#[allow(clippy::too_many_arguments)]
fn show_plan_row(
    store: &PlanStore,
    plan: &Plan,
    depth: usize,
    expanded: &HashSet<Uuid>,
    selected: Option<Uuid>,
    zebra: &mut usize,
    ui: &mut Ui,
    action: &mut PlanListAction,
) {
    let is_selected = selected == Some(plan.id);
    let children = store.children_of(plan.id);
    let is_expanded = expanded.contains(&plan.id);

    let row_bg = if is_selected {
        theme::BG_SELECTED
    } else if *zebra % 2 == 0 {
        theme::BG_PANEL
    } else {
        theme::BG_DARK
    };
    *zebra += 1;

    let frame = egui::Frame {
        fill: row_bg,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::symmetric(6.0, 4.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::NONE,
        shadow: egui::epaint::Shadow::NONE,
    };

    let frame_resp = frame.show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 6.0;
            ui.add_space(depth as f32 * 14.0);

            if children.is_empty() {
                ui.add_space(14.0);
            } else {
                let chevron = if is_expanded {
                    egui_phosphor::regular::CARET_DOWN
                } else {
                    egui_phosphor::regular::CARET_RIGHT
                };
                let toggle = ui.add(
                    egui::Button::new(RichText::new(chevron).size(11.0).color(theme::TEXT_SECONDARY))
                        .frame(false),
                );
                if toggle.clicked() {
                    *action = PlanListAction::ToggleExpand(plan.id);
                }
            }

            // Color dot
            let (dot_rect, _) = ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(dot_rect.center(), 3.0, theme::plan_color(plan));

            let name_text = RichText::new(&plan.name).size(12.0).color(if is_selected {
                Color32::WHITE
            } else {
                theme::TEXT_PRIMARY
            });
            ui.add(egui::Label::new(name_text).truncate());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let del_btn = ui.add(
                    egui::Button::new(RichText::new("✕").size(10.0).color(theme::TEXT_DIM))
                        .frame(false),
                );
                if del_btn.on_hover_text("Delete plan and sub-plans").clicked() {
                    *action = PlanListAction::Delete(plan.id);
                }

                let pbar = egui::ProgressBar::new(f32::from(plan.progress) / 100.0)
                    .desired_width(42.0)
                    .fill(theme::plan_color(plan))
                    .rounding(egui::Rounding::same(3.0));
                ui.add(pbar);

                ui.label(
                    RichText::new(plan.end.format("%m/%d").to_string())
                        .size(10.0)
                        .color(theme::TEXT_SECONDARY),
                );
                ui.label(RichText::new("→").size(9.0).color(theme::TEXT_DIM));
                ui.label(
                    RichText::new(plan.start.format("%m/%d").to_string())
                        .size(10.0)
                        .color(theme::TEXT_SECONDARY),
                );
            });
        });
    });

    // Make the whole row clickable.
    let row_click = ui.interact(
        frame_resp.response.rect,
        egui::Id::new(("plan-row", plan.id)),
        egui::Sense::click(),
    );
    if row_click.clicked() {
        *action = PlanListAction::Select(plan.id);
    }

    ui.add_space(1.0);

    if is_expanded {
        for child in children {
            show_plan_row(store, child, depth + 1, expanded, selected, zebra, ui, action);
        }
    }
}
