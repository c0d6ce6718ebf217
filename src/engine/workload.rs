use std::collections::BTreeMap;

use uuid::Uuid;

use crate::engine::calendar::days_between;
use crate::model::{ScheduledTask, TimelineWindow};

/// Per-day task counts for one assignee across the window.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadRow {
    pub assignee_id: Uuid,
    pub assignee_name: String,
    /// `counts[i]` = tasks overlapping day `window.start + i`. Raw counts;
    /// intensity capping is the renderer's business.
    pub counts: Vec<u32>,
}

/// Aggregate assigned tasks into per-assignee day densities, clipped to
/// the window. Unassigned tasks do not contribute. Rows come back sorted
/// by assignee name.
pub fn workload_rows(tasks: &[ScheduledTask], window: &TimelineWindow) -> Vec<WorkloadRow> {
    let days = window.total_days.max(0) as usize;
    let mut by_assignee: BTreeMap<(String, Uuid), Vec<u32>> = BTreeMap::new();

    for task in tasks {
        let Some(assignee_id) = task.assignee_id else {
            continue;
        };
        let name = task
            .assignee_name
            .clone()
            .unwrap_or_else(|| assignee_id.to_string());

        let first = days_between(window.start, task.start).max(0);
        let last = days_between(window.start, task.end).min(window.total_days - 1);
        if last < 0 || first >= window.total_days {
            continue; // entirely off-window
        }

        let counts = by_assignee
            .entry((name, assignee_id))
            .or_insert_with(|| vec![0; days]);
        for day in first..=last {
            counts[day as usize] += 1;
        }
    }

    by_assignee
        .into_iter()
        .map(|((assignee_name, assignee_id), counts)| WorkloadRow {
            assignee_id,
            assignee_name,
            counts,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskPriority, TaskStatus, ZoomLevel};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + chrono::Duration::days(day as i64)
    }

    fn task(start: i64, end: i64, assignee: Option<(Uuid, &str)>) -> ScheduledTask {
        ScheduledTask {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            start: d(0) + chrono::Duration::days(start),
            end: d(0) + chrono::Duration::days(end),
            is_milestone: false,
            progress: 0,
            depends_on: Vec::new(),
            assignee_id: assignee.map(|(id, _)| id),
            assignee_name: assignee.map(|(_, n)| n.to_string()),
            priority: TaskPriority::None,
            status: TaskStatus::Todo,
        }
    }

    fn window(total_days: i64) -> TimelineWindow {
        TimelineWindow::new(d(0), ZoomLevel::Day, total_days)
    }

    #[test]
    fn counts_overlapping_tasks_per_day() {
        let alice = Uuid::new_v4();
        let tasks = vec![
            task(0, 3, Some((alice, "Alice"))),
            task(2, 5, Some((alice, "Alice"))),
            task(1, 2, None), // unassigned, ignored
        ];
        let rows = workload_rows(&tasks, &window(7));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assignee_name, "Alice");
        assert_eq!(rows[0].counts, vec![1, 1, 2, 2, 1, 1, 0]);
    }

    #[test]
    fn clips_to_the_window() {
        let bob = Uuid::new_v4();
        let tasks = vec![
            task(-3, 2, Some((bob, "Bob"))),  // starts before the window
            task(4, 99, Some((bob, "Bob"))),  // runs past the window
            task(-9, -5, Some((bob, "Bob"))), // entirely before
        ];
        let rows = workload_rows(&tasks, &window(6));
        assert_eq!(rows[0].counts, vec![1, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn rows_sorted_by_assignee_name() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let tasks = vec![
            task(0, 1, Some((b, "Zoe"))),
            task(0, 1, Some((a, "Ann"))),
        ];
        let rows = workload_rows(&tasks, &window(3));
        let names: Vec<&str> = rows.iter().map(|r| r.assignee_name.as_str()).collect();
        assert_eq!(names, ["Ann", "Zoe"]);
    }

    #[test]
    fn no_assignees_means_no_rows() {
        let tasks = vec![task(0, 2, None)];
        assert!(workload_rows(&tasks, &window(5)).is_empty());
    }
}
