use crate::app::PlannerApp;

/// About dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &egui::Context) {
    let mut open = app.show_about;
    egui::Window::new("About Taskline")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Taskline");
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            ui.add_space(6.0);
            ui.label("Task timeline with critical-path analysis.");
            ui.label("Drag bar edges to reschedule. Milestones are fixed points.");
        });
    app.show_about = open;
}
