use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::store::{LogDraft, LogPatch, PlanStore};
use crate::ui::theme;

/// Actions from the study log view.
pub enum StudyLogAction {
    None,
    Add(LogDraft),
    Update(Uuid, LogPatch),
    Delete(Uuid),
}

/// Form buffer for adding or editing a log entry.
pub struct LogForm {
    pub editing: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub minutes_text: String,
    pub plan_id: Option<Uuid>,
}

impl LogForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            editing: None,
            title: String::new(),
            content: String::new(),
            date: today,
            minutes_text: "30".to_string(),
            plan_id: None,
        }
    }

    /// Load an existing log into the form for editing.
    pub fn load(&mut self, log: &crate::model::StudyLog) {
        self.editing = Some(log.id);
        self.title = log.title.clone();
        self.content = log.content.clone();
        self.date = log.date;
        self.minutes_text = log.minutes.to_string();
        self.plan_id = log.plan_id;
    }

    pub fn clear(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    fn minutes(&self) -> Option<u32> {
        self.minutes_text.trim().parse().ok().filter(|m| *m > 0)
    }
}

/// Render the study log view: entry form on top, history below.
pub fn show_study_log(store: &PlanStore, form: &mut LogForm, ui: &mut Ui) -> StudyLogAction {
    let mut action = StudyLogAction::None;

    ui.add_space(4.0);
    ui.label(
        RichText::new(if form.editing.is_some() {
            "Edit Session"
        } else {
            "Log a Session"
        })
        .strong()
        .size(14.0)
        .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_PANEL,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::same(10.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
        egui::Grid::new("log_form_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                ui.add_sized(
                    [260.0, 24.0],
                    egui::TextEdit::singleline(&mut form.title).hint_text("What did you study?"),
                );
                ui.end_row();

                ui.label(RichText::new("Notes").color(theme::TEXT_SECONDARY));
                ui.add_sized([260.0, 40.0], egui::TextEdit::multiline(&mut form.content));
                ui.end_row();

                ui.label(RichText::new("Date").color(theme::TEXT_SECONDARY));
                ui.add(egui_extras::DatePickerButton::new(&mut form.date).id_salt("log_dp"));
                ui.end_row();

                ui.label(RichText::new("Minutes").color(theme::TEXT_SECONDARY));
                ui.add_sized([80.0, 24.0], egui::TextEdit::singleline(&mut form.minutes_text));
                ui.end_row();

                ui.label(RichText::new("Plan").color(theme::TEXT_SECONDARY));
                let selected_name = form
                    .plan_id
                    .and_then(|id| store.plan(id))
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "—".to_string());
                egui::ComboBox::from_id_salt("log_plan_combo")
                    .selected_text(RichText::new(selected_name).size(11.0))
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(form.plan_id.is_none(), "—").clicked() {
                            form.plan_id = None;
                        }
                        for plan in store.plans() {
                            if ui
                                .selectable_label(form.plan_id == Some(plan.id), &plan.name)
                                .clicked()
                            {
                                form.plan_id = Some(plan.id);
                            }
                        }
                    });
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let can_submit = !form.title.trim().is_empty() && form.minutes().is_some();
            let label = if form.editing.is_some() { "Save" } else { "Add" };
            let submit = egui::Button::new(RichText::new(label).color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_enabled(can_submit, submit).clicked() {
                let minutes = form.minutes().unwrap_or(1);
                action = match form.editing {
                    Some(id) => StudyLogAction::Update(
                        id,
                        LogPatch {
                            title: Some(form.title.clone()),
                            content: Some(form.content.clone()),
                            date: Some(form.date),
                            minutes: Some(minutes),
                            plan_id: Some(form.plan_id),
                        },
                    ),
                    None => StudyLogAction::Add(LogDraft {
                        title: form.title.clone(),
                        content: form.content.clone(),
                        date: form.date,
                        minutes,
                        plan_id: form.plan_id,
                    }),
                };
            }
            if form.editing.is_some() && ui.button("Cancel").clicked() {
                form.clear(chrono::Local::now().date_naive());
            }
        });
    });

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(4.0);
    ui.label(
        RichText::new("History")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let logs = store.logs();
            if logs.is_empty() {
                ui.label(RichText::new("No sessions logged yet.").color(theme::TEXT_DIM));
            }
            for (i, log) in logs.iter().enumerate() {
                let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(8.0, 5.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };
                frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(log.date.format("%Y-%m-%d").to_string())
                                .size(10.5)
                                .color(theme::TEXT_SECONDARY),
                        );
                        ui.label(RichText::new(&log.title).size(12.0).color(theme::TEXT_PRIMARY));
                        if let Some(plan) = log.plan_id.and_then(|id| store.plan(id)) {
                            let (bg, fg) = theme::status_colors(plan.status);
                            egui::Frame::default()
                                .fill(bg)
                                .rounding(egui::Rounding::same(3.0))
                                .inner_margin(egui::Margin::symmetric(5.0, 1.0))
                                .show(ui, |ui| {
                                    ui.label(RichText::new(&plan.name).size(9.5).color(fg));
                                });
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            let del = ui.add(
                                egui::Button::new(
                                    RichText::new("✕").size(10.0).color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if del.on_hover_text("Delete entry").clicked() {
                                action = StudyLogAction::Delete(log.id);
                            }
                            let edit = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::PENCIL_SIMPLE)
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if edit.on_hover_text("Edit entry").clicked() {
                                form.load(log);
                            }
                            ui.label(
                                RichText::new(format!("{} min", log.minutes))
                                    .size(10.5)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                    if !log.content.is_empty() {
                        ui.label(RichText::new(&log.content).size(10.5).color(theme::TEXT_DIM));
                    }
                });
                ui.add_space(1.0);
            }
        });

    action
}
