use egui::{Pos2, Rect, RichText, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::Stats;
use crate::ui::theme;

/// Render the stats view: stat tiles plus a 7-day trend chart.
pub fn show_stats(stats: &Stats, ui: &mut Ui) {
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        stat_tile(ui, "Total study time", &format_minutes(stats.total_minutes));
        stat_tile(ui, "Completed plans", &stats.completed_plans.to_string());
        stat_tile(ui, "In progress", &stats.in_progress_plans.to_string());
        stat_tile(ui, "Daily average", &format!("{} min", stats.daily_average));
    });

    ui.add_space(16.0);
    ui.label(
        RichText::new("This week")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    draw_weekly_chart(stats, ui);
}

fn format_minutes(total: u32) -> String {
    if total >= 60 {
        format!("{}h {:02}m", total / 60, total % 60)
    } else {
        format!("{total} min")
    }
}

fn stat_tile(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::default()
        .fill(theme::BG_PANEL)
        .rounding(Rounding::same(6.0))
        .stroke(Stroke::new(1.0, theme::BORDER_SUBTLE))
        .inner_margin(egui::Margin::symmetric(14.0, 10.0))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(value).size(20.0).strong().color(theme::TEXT_PRIMARY));
                ui.label(RichText::new(label).size(10.0).color(theme::TEXT_DIM));
            });
        });
}

fn draw_weekly_chart(stats: &Stats, ui: &mut Ui) {
    let chart_height = 140.0;
    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width().min(520.0), chart_height),
        Sense::hover(),
    );
    let rect = response.rect;
    painter.rect_filled(rect, Rounding::same(6.0), theme::BG_PANEL);

    let max_minutes = stats
        .weekly_trend
        .iter()
        .map(|d| d.minutes)
        .max()
        .unwrap_or(0)
        .max(1);

    let n = stats.weekly_trend.len().max(1) as f32;
    let slot = rect.width() / n;
    let bar_width = (slot * 0.55).min(42.0);
    let base_y = rect.bottom() - 20.0;
    let plot_height = base_y - rect.top() - 14.0;

    for (i, day) in stats.weekly_trend.iter().enumerate() {
        let cx = rect.left() + slot * (i as f32 + 0.5);
        let h = plot_height * day.minutes as f32 / max_minutes as f32;
        let bar = Rect::from_min_max(
            Pos2::new(cx - bar_width / 2.0, base_y - h),
            Pos2::new(cx + bar_width / 2.0, base_y),
        );
        let color = if day.minutes == 0 {
            theme::GRID_LINE
        } else {
            theme::ACCENT
        };
        // Zero days still get a sliver so the axis reads as seven slots.
        let bar = if day.minutes == 0 {
            Rect::from_min_max(Pos2::new(bar.left(), base_y - 2.0), bar.max)
        } else {
            bar
        };
        painter.rect_filled(bar, Rounding::same(3.0), color);

        if day.minutes > 0 {
            painter.text(
                Pos2::new(cx, bar.top() - 8.0),
                egui::Align2::CENTER_CENTER,
                day.minutes.to_string(),
                theme::font_small(),
                theme::TEXT_SECONDARY,
            );
        }
        painter.text(
            Pos2::new(cx, base_y + 10.0),
            egui::Align2::CENTER_CENTER,
            &day.day,
            theme::font_sub(),
            theme::TEXT_DIM,
        );
    }
}
