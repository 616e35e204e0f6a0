use egui::{Color32, Context, RichText, Window};

use crate::app::StudyApp;
use crate::ui::theme;

/// Render the "New Plan" dialog, also used for sub-plans when a parent is
/// pending.
pub fn show_add_plan_dialog(app: &mut StudyApp, ctx: &Context) {
    let mut should_close = false;
    let parent_name = app
        .sub_plan_parent
        .and_then(|id| app.store.plan(id))
        .map(|p| p.name.clone());
    let title = match &parent_name {
        Some(name) => format!("New Sub-plan of '{name}'"),
        None => "New Plan".to_string(),
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([330.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("add_plan_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_plan_name)
                            .hint_text("Plan name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Description").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 40.0],
                        egui::TextEdit::multiline(&mut app.new_plan_description)
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_plan_start)
                            .id_salt("dlg_dp_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_plan_end)
                            .id_salt("dlg_dp_end"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Color").color(theme::TEXT_SECONDARY));
                    ui.horizontal_wrapped(|ui| {
                        let auto_selected = app.new_plan_color.is_none();
                        if ui
                            .add(
                                egui::Button::new(RichText::new("auto").size(10.0).color(
                                    if auto_selected {
                                        Color32::WHITE
                                    } else {
                                        theme::TEXT_DIM
                                    },
                                ))
                                .fill(theme::BG_HEADER)
                                .rounding(egui::Rounding::same(3.0)),
                            )
                            .clicked()
                        {
                            app.new_plan_color = None;
                        }
                        for &(label, color) in theme::PLAN_COLORS {
                            let (rect, resp) = ui
                                .allocate_exact_size(egui::vec2(15.0, 15.0), egui::Sense::click());
                            ui.painter()
                                .rect_filled(rect, egui::Rounding::same(3.0), color);
                            if app.new_plan_color == Some(color) {
                                ui.painter().rect_stroke(
                                    rect.expand(1.0),
                                    egui::Rounding::same(4.0),
                                    egui::Stroke::new(1.5, Color32::WHITE),
                                );
                            }
                            if resp.on_hover_text(label).clicked() {
                                app.new_plan_color = Some(color);
                            }
                        }
                    });
                    ui.end_row();
                });

            let name_ok = app.new_plan_name.trim().chars().count() >= 2;
            if !name_ok && !app.new_plan_name.is_empty() {
                ui.label(
                    RichText::new("Name needs at least 2 characters")
                        .size(10.0)
                        .color(theme::TODAY_LINE),
                );
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled(name_ok, create_btn).clicked() {
                    app.create_plan_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_plan = false;
        app.sub_plan_parent = None;
    }
}

/// Render the About dialog.
pub fn show_about_dialog(app: &mut StudyApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("About").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new("Study Planner")
                    .strong()
                    .size(16.0)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(
                    "Plan your studies on a quarter timeline, log sessions, \
                     and keep focus with the pomodoro timer.",
                )
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                should_close = true;
            }
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
