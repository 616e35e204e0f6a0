use egui::{menu, RichText, Ui};

use crate::app::{StudyApp, View};
use crate::ui::theme;

/// Render the top toolbar: menus plus the view switcher.
pub fn show_toolbar(app: &mut StudyApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_header()), |ui| {
            if ui.button("  New Data File").clicked() {
                app.new_data();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_data();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_data();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_data_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import Plans CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export Plans CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                if let Some(path) = crate::io::default_data_path() {
                    if let Some(dir) = path.parent() {
                        let _ = open::that(dir);
                    }
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_header()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.axis.cell_width = (app.axis.cell_width * 1.2).min(900.0);
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.axis.cell_width = (app.axis.cell_width / 1.2).max(120.0);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Collapse All").clicked() {
                app.expanded.clear();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_header()), |ui| {
            if ui.button("  About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        for (view, label) in [
            (View::Timeline, "Timeline"),
            (View::StudyLog, "Study Log"),
            (View::Pomodoro, "Pomodoro"),
            (View::Stats, "Stats"),
        ] {
            let selected = app.view == view;
            let text = RichText::new(label).size(12.0).color(if selected {
                theme::TEXT_PRIMARY
            } else {
                theme::TEXT_SECONDARY
            });
            if ui.selectable_label(selected, text).clicked() {
                app.view = view;
            }
        }
    });
}
