use std::collections::HashSet;

use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::layout::{arrange, Bound, PlacedBar, QuarterAxis};
use crate::store::PlanStore;
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Interactions the timeline chart can request. Selection is handled in
/// place via the `selected` handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineAction {
    None,
    ToggleExpand(Uuid),
    AddSubPlan(Uuid),
}

/// Render the timeline chart: quarter header, today line and the plan bars
/// placed by the layout engine. The full layout is recomputed every frame
/// from the current store and expansion state.
pub fn show_timeline(
    store: &PlanStore,
    axis: &mut QuarterAxis,
    expanded: &HashSet<Uuid>,
    selected: &mut Option<Uuid>,
    ui: &mut Ui,
) -> TimelineAction {
    let mut action = TimelineAction::None;

    // Ctrl+scroll zooms by scaling the cell width.
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            axis.cell_width = (axis.cell_width * 1.2).min(900.0);
        } else if scroll_delta.y < 0.0 {
            axis.cell_width = (axis.cell_width / 1.2).max(120.0);
        }
    }

    let plans = store.plans();
    let layout = arrange(&plans, axis, expanded);

    let available = ui.available_size();
    let chart_width = axis.total_width().max(available.x);
    let chart_height = (HEADER_HEIGHT + layout.height + 40.0).max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click());
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_header(&painter, origin, axis, chart_height);
            draw_today_line(&painter, origin, axis, chart_height);

            if layout.bars.is_empty() {
                painter.text(
                    Pos2::new(origin.x + 24.0, origin.y + HEADER_HEIGHT + 30.0),
                    egui::Align2::LEFT_CENTER,
                    "No plans yet — create one to get started",
                    theme::font_bar(),
                    theme::TEXT_DIM,
                );
            }

            for placed in &layout.bars {
                let Some(plan) = store.plan(placed.id) else {
                    continue;
                };
                let is_selected = *selected == Some(placed.id);
                let is_expanded = expanded.contains(&placed.id);

                let bar_rect = draw_plan_bar(&painter, origin, placed, plan, is_selected, is_expanded);

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("plan-bar", placed.id)),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    *selected = Some(placed.id);
                    consumed_click = true;
                }

                if placed.has_children {
                    let chevron_rect = Rect::from_min_size(
                        bar_rect.min,
                        Vec2::new(16.0_f32.min(bar_rect.width()), bar_rect.height()),
                    );
                    let chevron_response = ui.interact(
                        chevron_rect,
                        ui.make_persistent_id(("plan-chevron", placed.id)),
                        Sense::click(),
                    );
                    if chevron_response.clicked() {
                        action = TimelineAction::ToggleExpand(placed.id);
                        consumed_click = true;
                    }
                }

                // Add-sub-plan affordance on hover, right edge of the bar.
                if bar_response.hovered() || is_selected {
                    let add_rect = Rect::from_center_size(
                        Pos2::new(bar_rect.right() + 12.0, bar_rect.center().y),
                        Vec2::splat(16.0),
                    );
                    let add_response = ui.interact(
                        add_rect,
                        ui.make_persistent_id(("plan-add-sub", placed.id)),
                        Sense::click(),
                    );
                    let add_color = if add_response.hovered() {
                        theme::TEXT_PRIMARY
                    } else {
                        theme::TEXT_DIM
                    };
                    painter.circle_filled(add_rect.center(), 8.0, theme::BG_HEADER);
                    painter.text(
                        add_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        egui_phosphor::regular::PLUS,
                        theme::font_sub(),
                        add_color,
                    );
                    if add_response.clicked() {
                        action = TimelineAction::AddSubPlan(placed.id);
                        consumed_click = true;
                    }
                }

                if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("plan-tip", placed.id)),
                        |ui| {
                            ui.strong(&plan.name);
                            if !plan.description.is_empty() {
                                ui.label(&plan.description);
                            }
                            ui.label(format!(
                                "{} → {}  ({} days)",
                                plan.start.format("%Y-%m-%d"),
                                plan.end.format("%Y-%m-%d"),
                                plan.duration_days(),
                            ));
                            ui.label(format!("{} · {}%", plan.status.label(), plan.progress));
                        },
                    );
                }
            }

            // Empty click on the background clears the selection.
            if response.clicked() && !consumed_click {
                *selected = None;
            }
        });

    action
}

fn month_abbr(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

fn draw_header(painter: &egui::Painter, origin: Pos2, axis: &QuarterAxis, height: f32) {
    let width = axis.total_width();
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for cell in axis.cells() {
        let x = origin.x + cell.origin;

        // Grid line for the cell, stronger on year boundaries.
        let year_edge = cell.quarter == 1;
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(
                if year_edge { 1.0 } else { 0.5 },
                if year_edge {
                    theme::BORDER_SUBTLE
                } else {
                    theme::GRID_LINE
                },
            ),
        );

        if year_edge {
            painter.text(
                Pos2::new(x + 5.0, origin.y + 13.0),
                egui::Align2::LEFT_CENTER,
                cell.year.to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
        painter.text(
            Pos2::new(x + 5.0, origin.y + 32.0),
            egui::Align2::LEFT_CENTER,
            format!(
                "{} · {}–{}",
                cell.label(),
                month_abbr(cell.months[0]),
                month_abbr(cell.months[2]),
            ),
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, axis: &QuarterAxis, height: f32) {
    let today = chrono::Local::now().date_naive();
    // Today may be off-axis; then there is simply no line.
    let Some(x) = axis.x_of(today, Bound::Start) else {
        return;
    };
    let x = origin.x + x;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_plan_bar(
    painter: &egui::Painter,
    origin: Pos2,
    placed: &PlacedBar,
    plan: &crate::model::Plan,
    is_selected: bool,
    is_expanded: bool,
) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(
            origin.x + placed.left,
            origin.y + HEADER_HEIGHT + placed.top + inset,
        ),
        Vec2::new(placed.width, placed.height - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = theme::plan_color(plan);

    // Soft shadow under root bars only; nested bars stay flat.
    if placed.depth == 0 {
        let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
        painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    }

    painter.rect_filled(bar_rect, rounding, color);

    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Progress fill (darkened overlay)
    if plan.progress > 0 {
        let fraction = f32::from(plan.progress.min(100)) / 100.0;
        let progress_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width() * fraction, bar_rect.height()),
        );
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
        if plan.progress < 98 {
            let tick_x = bar_rect.left() + bar_rect.width() * fraction;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Chevron + name, clipped to the bar.
    let mut text_x = bar_rect.left() + 6.0;
    if placed.has_children {
        let chevron = if is_expanded {
            egui_phosphor::regular::CARET_DOWN
        } else {
            egui_phosphor::regular::CARET_RIGHT
        };
        painter.text(
            Pos2::new(bar_rect.left() + 4.0, bar_rect.center().y),
            egui::Align2::LEFT_CENTER,
            chevron,
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        text_x += 12.0;
    }
    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(plan.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.center().y - galley.size().y / 2.0;
        clipped.galley(Pos2::new(text_x, text_y), galley, Color32::TRANSPARENT);
    }

    bar_rect
}
