use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate};
use egui::Color32;
use tracing::{info, warn};
use uuid::Uuid;

use crate::layout::{axis::DEFAULT_CELL_WIDTH, QuarterAxis};
use crate::model::{PomodoroTimer, TimerMode, TimerState};
use crate::store::{LogDraft, PlanDraft, PlanStore};
use crate::ui;
use crate::ui::study_log::LogForm;

/// Which main view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Timeline,
    StudyLog,
    Pomodoro,
    Stats,
}

/// Main application state.
pub struct StudyApp {
    pub store: PlanStore,
    pub axis: QuarterAxis,
    /// Expanded plan ids; everything starts collapsed.
    pub expanded: HashSet<Uuid>,
    pub view: View,
    pub selected_plan: Option<Uuid>,
    pub file_path: Option<PathBuf>,

    // Dialog state
    pub show_add_plan: bool,
    pub show_about: bool,
    pub new_plan_name: String,
    pub new_plan_description: String,
    pub new_plan_start: NaiveDate,
    pub new_plan_end: NaiveDate,
    pub new_plan_color: Option<Color32>,
    /// Parent for the pending sub-plan dialog, if any.
    pub sub_plan_parent: Option<Uuid>,

    // Study log form
    pub log_form: LogForm,

    // Pomodoro runtime
    pub timer: PomodoroTimer,
    last_tick: Option<Instant>,
    /// Minutes of a finished focus session waiting to be logged.
    pub pending_session: Option<u32>,

    // Status message
    pub status_message: String,
}

impl StudyApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();
        let default_path = crate::io::default_data_path();

        let (store, file_path, status_message) = match &default_path {
            Some(path) if path.exists() => match crate::io::load_data(path) {
                Ok(data) => {
                    info!(path = %path.display(), "loaded data file");
                    (
                        PlanStore::from_data(data),
                        Some(path.clone()),
                        "Data loaded".to_string(),
                    )
                }
                Err(e) => {
                    warn!(path = %path.display(), "failed to load data file: {e}");
                    (
                        Self::sample_store(today),
                        None,
                        format!("Could not load data file: {e}"),
                    )
                }
            },
            _ => (Self::sample_store(today), None, "Ready".to_string()),
        };

        let timer = PomodoroTimer::new(store.pomodoro());

        Self {
            store,
            axis: QuarterAxis::new(today.year() - 1, 5, DEFAULT_CELL_WIDTH),
            expanded: HashSet::new(),
            view: View::Timeline,
            selected_plan: None,
            file_path,
            show_add_plan: false,
            show_about: false,
            new_plan_name: String::new(),
            new_plan_description: String::new(),
            new_plan_start: today,
            new_plan_end: today + chrono::Duration::days(7),
            new_plan_color: None,
            sub_plan_parent: None,
            log_form: LogForm::new(today),
            timer,
            last_tick: None,
            pending_session: None,
            status_message,
        }
    }

    /// Seed a fresh store with a small demonstration data set.
    fn sample_store(today: NaiveDate) -> PlanStore {
        let mut store = PlanStore::new(Uuid::new_v4());

        let semester = store
            .create_plan(PlanDraft {
                name: "Spring Semester".into(),
                description: "Core coursework".into(),
                start: today - chrono::Duration::days(40),
                end: today + chrono::Duration::days(60),
                color: None,
                parent_id: None,
            })
            .ok();

        if let Some(semester) = semester {
            let _ = store.create_plan(PlanDraft {
                name: "Linear Algebra".into(),
                description: String::new(),
                start: today - chrono::Duration::days(40),
                end: today - chrono::Duration::days(5),
                color: None,
                parent_id: Some(semester),
            });
            let os = store
                .create_plan(PlanDraft {
                    name: "Operating Systems".into(),
                    description: "Lectures plus lab work".into(),
                    start: today - chrono::Duration::days(10),
                    end: today + chrono::Duration::days(30),
                    color: None,
                    parent_id: Some(semester),
                })
                .ok();
            let _ = store.create_plan(PlanDraft {
                name: "Algorithms Practice".into(),
                description: String::new(),
                start: today - chrono::Duration::days(15),
                end: today + chrono::Duration::days(20),
                color: None,
                parent_id: Some(semester),
            });
            if let Some(os) = os {
                let _ = store.create_plan(PlanDraft {
                    name: "Scheduler lab".into(),
                    description: String::new(),
                    start: today + chrono::Duration::days(5),
                    end: today + chrono::Duration::days(15),
                    color: None,
                    parent_id: Some(os),
                });
            }
        }

        let _ = store.create_plan(PlanDraft {
            name: "The Rust Book".into(),
            description: "One chapter per week".into(),
            start: today + chrono::Duration::days(10),
            end: today + chrono::Duration::days(80),
            color: Some(Color32::from_rgb(20, 184, 166)),
            parent_id: None,
        });

        let _ = store.add_log(LogDraft {
            title: "Matrix decompositions".into(),
            content: String::new(),
            date: today - chrono::Duration::days(1),
            minutes: 90,
            plan_id: None,
        });
        let _ = store.add_log(LogDraft {
            title: "Paging and virtual memory".into(),
            content: "Chapters 18-20".into(),
            date: today,
            minutes: 45,
            plan_id: None,
        });

        store
    }

    // --- File operations ---

    pub fn new_data(&mut self) {
        self.store = PlanStore::new(Uuid::new_v4());
        self.file_path = None;
        self.selected_plan = None;
        self.expanded.clear();
        self.status_message = "New data file created".to_string();
    }

    pub fn open_data(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Study Planner Data", &["json"])
            .pick_file()
        {
            match crate::io::load_data(&path) {
                Ok(data) => {
                    self.store = PlanStore::from_data(data);
                    self.file_path = Some(path);
                    self.selected_plan = None;
                    self.expanded.clear();
                    self.timer = PomodoroTimer::new(self.store.pomodoro());
                    self.status_message = "Data loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {e}");
                }
            }
        }
    }

    pub fn save_data(&mut self) {
        let path = self.file_path.clone().or_else(crate::io::default_data_path);
        let Some(path) = path else {
            self.save_data_as();
            return;
        };
        match crate::io::save_data(&self.store.to_data(), &path) {
            Ok(()) => {
                info!(path = %path.display(), "saved data file");
                self.file_path = Some(path);
                self.status_message = "Data saved".to_string();
            }
            Err(e) => self.status_message = format!("Error saving: {e}"),
        }
    }

    pub fn save_data_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Study Planner Data", &["json"])
            .set_file_name("study-planner.json")
            .save_file()
        {
            match crate::io::save_data(&self.store.to_data(), &path) {
                Ok(()) => {
                    self.file_path = Some(path);
                    self.status_message = "Data saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {e}"),
            }
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_plans(&path) {
                Ok((plans, skipped)) => {
                    let count = self.store.import_plans(plans);
                    info!(count, skipped, "imported plans from CSV");
                    self.status_message = if skipped > 0 {
                        format!("Imported {count} plans ({skipped} rows skipped)")
                    } else {
                        format!("Imported {count} plans")
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {e}");
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        let plans = self.store.plans();
        if plans.is_empty() {
            self.status_message = "Nothing to export — no plans".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("plans.csv")
            .save_file()
        {
            match crate::io::csv_export::export_plans(&plans, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {count} plans to CSV");
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {e}");
                }
            }
        }
    }

    // --- Plan operations ---

    pub fn create_plan_from_dialog(&mut self) {
        let draft = PlanDraft {
            name: self.new_plan_name.clone(),
            description: self.new_plan_description.clone(),
            start: self.new_plan_start,
            end: self.new_plan_end.max(self.new_plan_start),
            color: self.new_plan_color,
            parent_id: self.sub_plan_parent,
        };
        match self.store.create_plan(draft) {
            Ok(id) => {
                if let Some(parent) = self.sub_plan_parent {
                    self.expanded.insert(parent);
                }
                self.selected_plan = Some(id);
                self.status_message = "Plan created".to_string();
                self.reset_plan_dialog();
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    /// Open the new-plan dialog pre-filled from the parent's range.
    pub fn open_sub_plan_dialog(&mut self, parent_id: Uuid) {
        let Some(parent) = self.store.plan(parent_id) else {
            return;
        };
        let today = chrono::Local::now().date_naive();
        self.new_plan_name = String::new();
        self.new_plan_description = String::new();
        self.new_plan_start = parent.start.max(today.min(parent.end));
        self.new_plan_end = parent.end;
        self.new_plan_color = None;
        self.sub_plan_parent = Some(parent_id);
        self.show_add_plan = true;
    }

    pub fn delete_plan(&mut self, id: Uuid) {
        match self.store.delete_plan(id) {
            Ok(removed) => {
                if self
                    .selected_plan
                    .is_some_and(|sel| self.store.plan(sel).is_none())
                {
                    self.selected_plan = None;
                }
                self.status_message = if removed > 1 {
                    format!("Deleted plan and {} sub-plans", removed - 1)
                } else {
                    "Plan deleted".to_string()
                };
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    pub fn toggle_expand(&mut self, id: Uuid) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    fn reset_plan_dialog(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_plan_name = String::new();
        self.new_plan_description = String::new();
        self.new_plan_start = today;
        self.new_plan_end = today + chrono::Duration::days(7);
        self.new_plan_color = None;
        self.sub_plan_parent = None;
    }

    /// Pre-fill the study log form for a finished pomodoro session and jump
    /// to the log view.
    fn log_pomodoro_session(&mut self, minutes: u32) {
        let today = chrono::Local::now().date_naive();
        self.log_form.clear(today);
        self.log_form.title = "Pomodoro session".to_string();
        self.log_form.minutes_text = minutes.to_string();
        self.log_form.plan_id = self.selected_plan;
        self.pending_session = None;
        self.view = View::StudyLog;
    }

    fn tick_timer(&mut self, ctx: &egui::Context) {
        if self.timer.state == TimerState::Running {
            let now = Instant::now();
            let last = self.last_tick.get_or_insert(now);
            let elapsed = now.duration_since(*last).as_secs() as u32;
            if elapsed > 0 {
                *last += Duration::from_secs(u64::from(elapsed));
                let settings = self.store.pomodoro().clone();
                if let Some(TimerMode::Work) = self.timer.tick(&settings, elapsed) {
                    self.pending_session = Some(settings.work_minutes);
                }
            }
            ctx.request_repaint_after(Duration::from_millis(250));
        } else {
            self.last_tick = None;
        }
    }
}

impl eframe::App for StudyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_data();
        }

        self.tick_timer(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(10.5)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Plans: {}", self.store.plans().len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.axis.cell_width / DEFAULT_CELL_WIDTH * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        match self.view {
            View::Timeline => self.show_timeline_view(ctx),
            View::StudyLog => self.show_study_log_view(ctx),
            View::Pomodoro => self.show_pomodoro_view(ctx),
            View::Stats => self.show_stats_view(ctx),
        }

        // Dialogs
        if self.show_add_plan {
            ui::dialogs::show_add_plan_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

impl StudyApp {
    fn show_timeline_view(&mut self, ctx: &egui::Context) {
        // Left panel: plan tree + editor
        let mut list_action = ui::plan_list::PlanListAction::None;
        let mut editor_action = ui::plan_editor::EditorAction::None;
        egui::SidePanel::left("plan_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .max_width(ui::theme::SIDE_PANEL_WIDTH * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(plan) = self.selected_plan.and_then(|id| self.store.plan(id)) {
                    editor_action = ui::plan_editor::show_plan_editor(plan, ui);
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }
                list_action =
                    ui::plan_list::show_plan_list(&self.store, &self.expanded, self.selected_plan, ui);
            });

        match list_action {
            ui::plan_list::PlanListAction::Select(id) => self.selected_plan = Some(id),
            ui::plan_list::PlanListAction::Delete(id) => self.delete_plan(id),
            ui::plan_list::PlanListAction::ToggleExpand(id) => self.toggle_expand(id),
            ui::plan_list::PlanListAction::Add => {
                self.reset_plan_dialog();
                self.show_add_plan = true;
            }
            ui::plan_list::PlanListAction::None => {}
        }

        match editor_action {
            ui::plan_editor::EditorAction::Edited(patch) => {
                if let Some(id) = self.selected_plan {
                    match self.store.update_plan(id, patch) {
                        Ok(()) => self.status_message = "Plan updated".to_string(),
                        Err(e) => self.status_message = e.to_string(),
                    }
                }
            }
            ui::plan_editor::EditorAction::AddSubPlan => {
                if let Some(id) = self.selected_plan {
                    self.open_sub_plan_dialog(id);
                }
            }
            ui::plan_editor::EditorAction::Delete => {
                if let Some(id) = self.selected_plan {
                    self.delete_plan(id);
                }
            }
            ui::plan_editor::EditorAction::None => {}
        }

        // Central panel: the timeline chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let mut chart_action = ui::timeline::TimelineAction::None;
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            chart_action = ui::timeline::show_timeline(
                &self.store,
                &mut self.axis,
                &self.expanded,
                &mut self.selected_plan,
                ui,
            );
        });

        match chart_action {
            ui::timeline::TimelineAction::ToggleExpand(id) => self.toggle_expand(id),
            ui::timeline::TimelineAction::AddSubPlan(id) => self.open_sub_plan_dialog(id),
            ui::timeline::TimelineAction::None => {}
        }
    }

    fn show_study_log_view(&mut self, ctx: &egui::Context) {
        let mut action = ui::study_log::StudyLogAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = ui::study_log::show_study_log(&self.store, &mut self.log_form, ui);
        });

        let today = chrono::Local::now().date_naive();
        match action {
            ui::study_log::StudyLogAction::Add(draft) => match self.store.add_log(draft) {
                Ok(_) => {
                    self.log_form.clear(today);
                    self.status_message = "Session logged".to_string();
                }
                Err(e) => self.status_message = e.to_string(),
            },
            ui::study_log::StudyLogAction::Update(id, patch) => {
                match self.store.update_log(id, patch) {
                    Ok(()) => {
                        self.log_form.clear(today);
                        self.status_message = "Session updated".to_string();
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
            }
            ui::study_log::StudyLogAction::Delete(id) => {
                let title = self.store.log(id).map(|l| l.title.clone());
                match self.store.delete_log(id) {
                    Ok(()) => {
                        if self.log_form.editing == Some(id) {
                            self.log_form.clear(today);
                        }
                        self.status_message = match title {
                            Some(title) => format!("Deleted '{title}'"),
                            None => "Session deleted".to_string(),
                        };
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
            }
            ui::study_log::StudyLogAction::None => {}
        }
    }

    fn show_pomodoro_view(&mut self, ctx: &egui::Context) {
        let mut action = ui::pomodoro::PomodoroAction::None;
        let settings = self.store.pomodoro().clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            action = ui::pomodoro::show_pomodoro(&mut self.timer, &settings, self.pending_session, ui);
        });

        match action {
            ui::pomodoro::PomodoroAction::Settings(patch) => {
                match self.store.update_pomodoro(patch) {
                    Ok(()) => {
                        // Idle timers adopt new lengths immediately.
                        if self.timer.state == TimerState::Idle {
                            self.timer.reset(self.store.pomodoro());
                        }
                        self.status_message = "Pomodoro settings updated".to_string();
                    }
                    Err(e) => self.status_message = e.to_string(),
                }
            }
            ui::pomodoro::PomodoroAction::LogSession(minutes) => {
                self.log_pomodoro_session(minutes);
            }
            ui::pomodoro::PomodoroAction::DismissSession => {
                self.pending_session = None;
            }
            ui::pomodoro::PomodoroAction::None => {}
        }
    }

    fn show_stats_view(&mut self, ctx: &egui::Context) {
        let today = chrono::Local::now().date_naive();
        let stats = self.store.stats(today);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::stats::show_stats(&stats, ui);
        });
    }
}
