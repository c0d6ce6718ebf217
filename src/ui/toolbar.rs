use egui::{menu, RichText, Ui};

use crate::app::PlannerApp;
use crate::model::ZoomLevel;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Plan").clicked() {
                app.new_plan();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_file();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_file();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_file_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Zoom").small().weak());
            for zoom in [
                ZoomLevel::Day,
                ZoomLevel::Week,
                ZoomLevel::Month,
                ZoomLevel::Quarter,
            ] {
                if ui
                    .radio(app.view.zoom == zoom, zoom.label())
                    .clicked()
                {
                    app.set_zoom(zoom);
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Overlays").small().weak());
            let mut dirty = false;
            dirty |= ui
                .checkbox(&mut app.view.show_dependencies, "Dependencies")
                .changed();
            dirty |= ui
                .checkbox(&mut app.view.show_critical_path, "Critical path")
                .changed();
            dirty |= ui
                .checkbox(&mut app.view.show_workload, "Workload")
                .changed();
            if dirty {
                app.view_changed();
            }
        });

        // Window navigation lives directly on the bar
        if ui.button("◀").clicked() {
            app.navigate(-1);
        }
        if ui.button("Today").clicked() {
            app.jump_to_today();
        }
        if ui.button("▶").clicked() {
            app.navigate(1);
        }

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
            if ui.button("Open Config Folder").clicked() {
                if let Some(dir) = crate::app::config_dir() {
                    let _ = open::that(&dir);
                }
                ui.close_menu();
            }
        });
    });
}
