use std::collections::HashMap;

use uuid::Uuid;

use crate::model::{ScheduledTask, TimelineWindow};

/// Endpoint geometry for one dependency edge, in window pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyArrow {
    pub from_task: Uuid,
    pub to_task: Uuid,
    /// End of the dependency bar.
    pub from_x: f32,
    pub from_y: f32,
    /// Start of the dependent bar.
    pub to_x: f32,
    pub to_y: f32,
}

/// One arrow per (dependency → dependent) edge whose source id resolves in
/// the current task list. Row index is the task's position in the sorted
/// slice; the y is that row's vertical center.
pub fn build_dependency_arrows(
    tasks: &[ScheduledTask],
    window: &TimelineWindow,
    row_height: f32,
) -> Vec<DependencyArrow> {
    let rows: HashMap<Uuid, usize> = tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    let mut arrows = Vec::new();
    for (row, task) in tasks.iter().enumerate() {
        for dep in &task.depends_on {
            let Some(&from_row) = rows.get(dep) else {
                continue; // dangling reference, no edge
            };
            let from = &tasks[from_row];
            arrows.push(DependencyArrow {
                from_task: from.id,
                to_task: task.id,
                from_x: window.date_to_x(from.end),
                from_y: (from_row as f32 + 0.5) * row_height,
                to_x: window.date_to_x(task.start),
                to_y: (row as f32 + 0.5) * row_height,
            });
        }
    }
    arrows
}

/// Control points for a smooth horizontal S-curve between the endpoints.
/// Both points push horizontally away from their anchor.
pub fn curve_control_points(arrow: &DependencyArrow) -> ((f32, f32), (f32, f32)) {
    let reach = ((arrow.to_x - arrow.from_x).abs() * 0.5).max(24.0);
    (
        (arrow.from_x + reach, arrow.from_y),
        (arrow.to_x - reach, arrow.to_y),
    )
}
