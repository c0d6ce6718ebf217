pub mod arrows;
pub mod calendar;
pub mod critical_path;
pub mod layout;
pub mod resize;
pub mod schedule;
pub mod workload;

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{ScheduledTask, TaskRecord, TimelineWindow, ZoomLevel};

pub use arrows::{build_dependency_arrows, curve_control_points, DependencyArrow};
pub use critical_path::{critical_path, CriticalPathCache};
pub use layout::{layout_group_headers, layout_markers, today_offset, GroupHeader, TimelineMarker};
pub use resize::{HandleSide, ResizeController, ResizeOutcome, ResizePreview};
pub use schedule::build_schedule;
pub use workload::{workload_rows, WorkloadRow};

/// Which overlays the view currently wants computed.
#[derive(Debug, Clone, Copy)]
pub struct OverlayToggles {
    pub dependencies: bool,
    pub critical_path: bool,
    pub workload: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            dependencies: true,
            critical_path: true,
            workload: false,
        }
    }
}

/// The complete render model: pure data, recomputed whenever the task
/// list, zoom, window start or toggles change. Nothing in here survives
/// a render cycle.
#[derive(Debug, Clone, Default)]
pub struct RenderSnapshot {
    /// Schedulable tasks sorted by start date; row index = slice index.
    pub tasks: Vec<ScheduledTask>,
    /// Empty when the critical-path overlay is off or the graph is empty.
    pub critical: HashSet<Uuid>,
    pub arrows: Vec<DependencyArrow>,
    pub markers: Vec<TimelineMarker>,
    pub group_headers: Vec<GroupHeader>,
    pub today_x: Option<f32>,
    pub workload: Vec<WorkloadRow>,
}

/// Run the whole pipeline: graph build, then critical path, layout,
/// arrow routing and workload off the same sorted task list.
pub fn build_snapshot(
    records: &[TaskRecord],
    window: &TimelineWindow,
    zoom: ZoomLevel,
    today: NaiveDate,
    row_height: f32,
    toggles: OverlayToggles,
    cache: &mut CriticalPathCache,
) -> RenderSnapshot {
    let tasks = build_schedule(records, today);

    let critical = if toggles.critical_path {
        cache.path_for(&tasks).clone()
    } else {
        HashSet::new()
    };
    let arrows = if toggles.dependencies {
        build_dependency_arrows(&tasks, window, row_height)
    } else {
        Vec::new()
    };
    let workload = if toggles.workload {
        workload_rows(&tasks, window)
    } else {
        Vec::new()
    };

    RenderSnapshot {
        markers: layout_markers(window, zoom),
        group_headers: layout_group_headers(window, zoom),
        today_x: today_offset(window, today),
        tasks,
        critical,
        arrows,
        workload,
    }
}
