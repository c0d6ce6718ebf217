use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{
    build_snapshot, CriticalPathCache, OverlayToggles, RenderSnapshot, ResizeController,
};
use crate::model::{TaskPriority, TaskRecord, TaskStatus, TimelineWindow, ZoomLevel};
use crate::store::{InMemoryStore, TaskStore};
use crate::ui;

/// View settings that survive restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub zoom: ZoomLevel,
    pub window_start: NaiveDate,
    pub show_dependencies: bool,
    pub show_critical_path: bool,
    pub show_workload: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLevel::Week,
            window_start: chrono::Local::now().date_naive() - chrono::Duration::days(14),
            show_dependencies: true,
            show_critical_path: true,
            show_workload: false,
        }
    }
}

/// Per-user config directory.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "Taskline")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

fn view_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("view.json"))
}

fn load_view_config() -> ViewConfig {
    let Some(path) = view_config_path() else {
        return ViewConfig::default();
    };
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn save_view_config(config: &ViewConfig) {
    let Some(path) = view_config_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match serde_json::to_string_pretty(config) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                log::warn!("could not persist view config: {e}");
            }
        }
        Err(e) => log::warn!("could not serialize view config: {e}"),
    }
}

/// Main application state.
pub struct PlannerApp {
    pub store: InMemoryStore,
    pub view: ViewConfig,
    pub snapshot: RenderSnapshot,
    pub selected_task: Option<Uuid>,
    pub file_path: Option<PathBuf>,
    pub status_message: String,
    pub show_about: bool,

    cp_cache: CriticalPathCache,
    resize: ResizeController,
    resize_task: Option<Uuid>,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icons as a font fallback
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut app = Self {
            store: InMemoryStore::new(Self::sample_records()),
            view: load_view_config(),
            snapshot: RenderSnapshot::default(),
            selected_task: None,
            file_path: None,
            status_message: "Ready".to_string(),
            show_about: false,
            cp_cache: CriticalPathCache::new(),
            resize: ResizeController::new(),
            resize_task: None,
        };
        app.refresh();
        app
    }

    /// Demo plan shown on first launch.
    fn sample_records() -> Vec<TaskRecord> {
        let today = chrono::Local::now().date_naive();
        let day = |offset: i64| today + chrono::Duration::days(offset);

        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let carol = Uuid::new_v4();

        let mut kickoff = TaskRecord::new("Project Kickoff");
        kickoff.created_at = Some(day(-10));
        kickoff.due_date = Some(day(-7));
        kickoff.status = TaskStatus::Done;
        kickoff.priority = TaskPriority::High;

        let mut requirements = TaskRecord::new("Requirements");
        requirements.created_at = Some(day(-7));
        requirements.due_date = Some(day(-1));
        requirements.status = TaskStatus::Done;
        requirements.depends_on = vec![kickoff.id];
        requirements.assignee_id = Some(alice);
        requirements.assignee_name = Some("Alice".to_string());

        let mut design = TaskRecord::new("UI Design");
        design.created_at = Some(day(-1));
        design.due_date = Some(day(6));
        design.status = TaskStatus::InProgress;
        design.depends_on = vec![requirements.id];
        design.assignee_id = Some(alice);
        design.assignee_name = Some("Alice".to_string());

        let mut backend = TaskRecord::new("Backend Development");
        backend.created_at = Some(day(-1));
        backend.due_date = Some(day(14));
        backend.status = TaskStatus::InProgress;
        backend.priority = TaskPriority::High;
        backend.depends_on = vec![requirements.id];
        backend.assignee_id = Some(bob);
        backend.assignee_name = Some("Bob".to_string());

        let mut frontend = TaskRecord::new("Frontend Development");
        frontend.created_at = Some(day(6));
        frontend.due_date = Some(day(18));
        frontend.depends_on = vec![design.id];
        frontend.assignee_id = Some(bob);
        frontend.assignee_name = Some("Bob".to_string());

        let mut docs = TaskRecord::new("User Documentation");
        docs.created_at = Some(day(8));
        docs.due_date = Some(day(16));
        docs.priority = TaskPriority::Low;
        docs.assignee_id = Some(carol);
        docs.assignee_name = Some("Carol".to_string());

        let mut qa = TaskRecord::new("Testing & QA");
        qa.created_at = Some(day(18));
        qa.due_date = Some(day(24));
        qa.priority = TaskPriority::Critical;
        qa.depends_on = vec![backend.id, frontend.id];
        qa.assignee_id = Some(carol);
        qa.assignee_name = Some("Carol".to_string());

        let mut launch = TaskRecord::new("Launch");
        launch.created_at = Some(day(25));
        launch.due_date = Some(day(25));
        launch.depends_on = vec![qa.id];
        launch.priority = TaskPriority::Critical;

        // No due date: stays in the store but never shows on the timeline
        let mut backlog = TaskRecord::new("Backlog Grooming");
        backlog.created_at = Some(day(-10));

        vec![
            kickoff,
            requirements,
            design,
            backend,
            frontend,
            docs,
            qa,
            launch,
            backlog,
        ]
    }

    /// Current visible window derived from the view config.
    pub fn window(&self) -> TimelineWindow {
        TimelineWindow::new(
            self.view.window_start,
            self.view.zoom,
            self.view.zoom.window_days(),
        )
    }

    /// Re-list the store and rebuild the whole render model.
    pub fn refresh(&mut self) {
        let records = self.store.list_tasks();
        let window = self.window();
        let today = chrono::Local::now().date_naive();
        self.snapshot = build_snapshot(
            &records,
            &window,
            self.view.zoom,
            today,
            ui::gantt_chart::ROW_PITCH,
            OverlayToggles {
                dependencies: self.view.show_dependencies,
                critical_path: self.view.show_critical_path,
                workload: self.view.show_workload,
            },
            &mut self.cp_cache,
        );
    }

    /// A view setting changed: persist it and recompute.
    pub fn view_changed(&mut self) {
        save_view_config(&self.view);
        self.refresh();
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        if self.view.zoom != zoom {
            self.view.zoom = zoom;
            self.view_changed();
        }
    }

    /// Move the window by one zoom-sized step in either direction.
    pub fn navigate(&mut self, direction: i64) {
        let step = self.view.zoom.scroll_step_days();
        self.view.window_start += chrono::Duration::days(direction.signum() * step);
        self.view_changed();
    }

    pub fn jump_to_today(&mut self) {
        self.view.window_start = chrono::Local::now().date_naive() - chrono::Duration::days(7);
        self.view_changed();
    }

    // ── File operations ──────────────────────────────────────────────────

    pub fn new_plan(&mut self) {
        self.store.replace_all(Vec::new());
        self.file_path = None;
        self.selected_task = None;
        self.refresh();
        self.status_message = "New plan created".to_string();
    }

    pub fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Taskline Plan", &["json"])
            .pick_file()
        {
            match crate::io::load_records(&path) {
                Ok(records) => {
                    let count = records.len();
                    self.store.replace_all(records);
                    self.file_path = Some(path);
                    self.selected_task = None;
                    self.refresh();
                    self.status_message = format!("Loaded {} tasks", count);
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_file(&mut self) {
        if let Some(path) = self.file_path.clone() {
            match crate::io::save_records(self.store.records(), &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_file_as();
        }
    }

    pub fn save_file_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Taskline Plan", &["json"])
            .set_file_name("plan.json")
            .save_file()
        {
            self.file_path = Some(path.clone());
            match crate::io::save_records(self.store.records(), &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        if !self.store.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current plan. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((records, skipped)) => {
                    let count = records.len();
                    self.store.replace_all(records);
                    self.file_path = None;
                    self.selected_task = None;
                    self.refresh();
                    self.status_message = if skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.store.is_empty() {
            self.status_message = "Nothing to export — plan has no tasks".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("plan.csv")
            .save_file()
        {
            match crate::io::csv_export::export_csv(self.store.records(), &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_file();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Scheduled: {} / {}",
                                self.snapshot.tasks.len(),
                                self.store.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(self.view.zoom.label())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let window = self.window();
            let interaction = ui::gantt_chart::show_gantt_chart(
                &self.snapshot,
                &window,
                &mut self.resize,
                &mut self.resize_task,
                &mut self.selected_task,
                ui,
            );

            if let Some((task_id, patch)) = interaction.commit {
                match self.store.update_task_dates(task_id, patch) {
                    Ok(()) => {
                        let title = self
                            .snapshot
                            .tasks
                            .iter()
                            .find(|t| t.id == task_id)
                            .map(|t| t.title.clone())
                            .unwrap_or_default();
                        self.status_message = format!("Rescheduled '{}'", title);
                    }
                    Err(e) => {
                        log::warn!("reschedule of {task_id} failed: {e}");
                        self.status_message = format!("Reschedule failed: {}", e);
                    }
                }
                // Success or failure, the snapshot is rebuilt from the
                // store; a failed commit therefore reverts visually.
                self.refresh();
            }
        });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
