use egui::{Color32, RichText, Ui};

use crate::model::{PomodoroPatch, PomodoroSettings, PomodoroTimer, TimerMode, TimerState};
use crate::ui::theme;

/// Actions from the pomodoro view that must go through the store or app.
pub enum PomodoroAction {
    None,
    Settings(PomodoroPatch),
    /// A finished focus session of this many minutes should be logged.
    LogSession(u32),
    DismissSession,
}

fn mode_color(mode: TimerMode) -> Color32 {
    match mode {
        TimerMode::Work => theme::ACCENT,
        TimerMode::Break => Color32::from_rgb(34, 197, 94),
        TimerMode::LongBreak => Color32::from_rgb(20, 184, 166),
    }
}

/// Render the pomodoro timer view. The countdown itself is ticked by the
/// app loop; this only draws state and forwards interactions.
pub fn show_pomodoro(
    timer: &mut PomodoroTimer,
    settings: &PomodoroSettings,
    pending_session: Option<u32>,
    ui: &mut Ui,
) -> PomodoroAction {
    let mut action = PomodoroAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);

        ui.label(
            RichText::new(timer.mode.label())
                .size(16.0)
                .strong()
                .color(mode_color(timer.mode)),
        );
        ui.add_space(4.0);

        let minutes = timer.remaining_secs / 60;
        let seconds = timer.remaining_secs % 60;
        ui.label(
            RichText::new(format!("{minutes:02}:{seconds:02}"))
                .font(theme::font_timer())
                .color(theme::TEXT_PRIMARY),
        );

        let total = timer.total_secs(settings).max(1);
        let fraction = 1.0 - timer.remaining_secs as f32 / total as f32;
        ui.add_space(8.0);
        ui.add(
            egui::ProgressBar::new(fraction)
                .desired_width(280.0)
                .fill(mode_color(timer.mode))
                .rounding(egui::Rounding::same(4.0)),
        );

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            // Center the control row by padding half the leftover width.
            let controls_width = 230.0;
            ui.add_space((ui.available_width() - controls_width).max(0.0) / 2.0);

            match timer.state {
                TimerState::Running => {
                    if ui.add_sized([70.0, 30.0], egui::Button::new("Pause")).clicked() {
                        timer.pause();
                    }
                }
                TimerState::Paused => {
                    if ui.add_sized([70.0, 30.0], egui::Button::new("Resume")).clicked() {
                        timer.start();
                    }
                }
                TimerState::Idle => {
                    let start = egui::Button::new(RichText::new("Start").color(Color32::WHITE))
                        .fill(theme::ACCENT)
                        .rounding(egui::Rounding::same(4.0));
                    if ui.add_sized([70.0, 30.0], start).clicked() {
                        timer.start();
                    }
                }
            }
            if ui.add_sized([70.0, 30.0], egui::Button::new("Skip")).clicked() {
                // Settings may have shrunk mid-session; never go negative.
                let elapsed_secs = timer.total_secs(settings).saturating_sub(timer.remaining_secs);
                let finished = timer.skip(settings);
                if finished == TimerMode::Work && elapsed_secs >= 60 {
                    action = PomodoroAction::LogSession(elapsed_secs / 60);
                }
            }
            if ui.add_sized([70.0, 30.0], egui::Button::new("Reset")).clicked() {
                timer.reset(settings);
            }
        });

        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Sessions completed: {}", timer.completed_sessions))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
        let until_long = settings.long_break_interval.max(1);
        let into_cycle = timer.completed_sessions % until_long;
        ui.label(
            RichText::new(format!("Long break after {} more", until_long - into_cycle))
                .size(10.0)
                .color(theme::TEXT_DIM),
        );
    });

    if let Some(minutes) = pending_session {
        ui.add_space(14.0);
        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(theme::BG_PANEL)
                .rounding(egui::Rounding::same(6.0))
                .stroke(egui::Stroke::new(1.0, theme::BORDER_ACCENT))
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("Focus session finished — {minutes} min"))
                            .size(12.0)
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        let log = egui::Button::new(
                            RichText::new("Log it").color(Color32::WHITE),
                        )
                        .fill(theme::ACCENT)
                        .rounding(egui::Rounding::same(4.0));
                        if ui.add(log).clicked() {
                            action = PomodoroAction::LogSession(minutes);
                        }
                        if ui.button("Dismiss").clicked() {
                            action = PomodoroAction::DismissSession;
                        }
                    });
                });
        });
    }

    ui.add_space(20.0);
    ui.separator();

    egui::CollapsingHeader::new(
        RichText::new("Settings").size(12.0).color(theme::TEXT_SECONDARY),
    )
    .default_open(false)
    .show(ui, |ui| {
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
        egui::Grid::new("pomodoro_settings_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                let drag = |ui: &mut Ui, label: &str, value: u32, max: u32| -> Option<u32> {
                    ui.label(RichText::new(label).size(11.0).color(theme::TEXT_SECONDARY));
                    let mut v = value;
                    let changed = ui
                        .add(egui::DragValue::new(&mut v).range(1..=max).speed(1))
                        .changed();
                    ui.end_row();
                    (changed && v != value).then_some(v)
                };

                if let Some(v) = drag(ui, "Focus minutes", settings.work_minutes, 240) {
                    action = PomodoroAction::Settings(PomodoroPatch {
                        work_minutes: Some(v),
                        ..Default::default()
                    });
                }
                if let Some(v) = drag(ui, "Break minutes", settings.break_minutes, 60) {
                    action = PomodoroAction::Settings(PomodoroPatch {
                        break_minutes: Some(v),
                        ..Default::default()
                    });
                }
                if let Some(v) = drag(ui, "Long break minutes", settings.long_break_minutes, 120) {
                    action = PomodoroAction::Settings(PomodoroPatch {
                        long_break_minutes: Some(v),
                        ..Default::default()
                    });
                }
                if let Some(v) = drag(ui, "Long break every", settings.long_break_interval, 12) {
                    action = PomodoroAction::Settings(PomodoroPatch {
                        long_break_interval: Some(v),
                        ..Default::default()
                    });
                }
            });
    });

    action
}
