use chrono::NaiveDate;

use crate::engine::calendar::days_between;
use crate::model::{ScheduledTask, TaskRecord, TaskStatus};

/// Convert one raw record into a schedulable task.
///
/// Returns `None` when the record has no due date — such tasks are not
/// rendered and take no part in the dependency graph.
pub fn schedule_task(record: &TaskRecord, today: NaiveDate) -> Option<ScheduledTask> {
    let end = record.due_date?;
    // Start from the creation date when known, otherwise anchor at today.
    // A creation date after the due date would invert the bar; clamp it.
    let start = record.created_at.unwrap_or(today).min(end);

    Some(ScheduledTask {
        id: record.id,
        title: record.title.clone(),
        start,
        end,
        is_milestone: days_between(start, end) <= 1,
        progress: match record.status {
            TaskStatus::Done => 100,
            TaskStatus::InProgress => 50,
            _ => 0,
        },
        depends_on: record.depends_on.clone(),
        assignee_id: record.assignee_id,
        assignee_name: record.assignee_name.clone(),
        priority: record.priority,
        status: record.status,
    })
}

/// Build the full schedule: drop undateable records, sort ascending by
/// start date (title as a deterministic tie-break).
///
/// No cycle detection happens here; downstream consumers tolerate cycles.
pub fn build_schedule(records: &[TaskRecord], today: NaiveDate) -> Vec<ScheduledTask> {
    let mut tasks: Vec<ScheduledTask> = records
        .iter()
        .filter_map(|r| schedule_task(r, today))
        .collect();
    tasks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.title.cmp(&b.title)));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskPriority;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(title: &str, created: Option<NaiveDate>, due: Option<NaiveDate>) -> TaskRecord {
        TaskRecord {
            created_at: created,
            due_date: due,
            ..TaskRecord::new(title)
        }
    }

    #[test]
    fn record_without_due_date_is_dropped() {
        let today = d(2026, 3, 2);
        let records = vec![
            record("dated", Some(d(2026, 3, 1)), Some(d(2026, 3, 10))),
            record("dateless", Some(d(2026, 3, 1)), None),
        ];
        let tasks = build_schedule(&records, today);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "dated");
    }

    #[test]
    fn start_falls_back_to_today() {
        let today = d(2026, 3, 2);
        let task = schedule_task(&record("t", None, Some(d(2026, 3, 9))), today).unwrap();
        assert_eq!(task.start, today);
        assert_eq!(task.end, d(2026, 3, 9));
        assert!(!task.is_milestone);
    }

    #[test]
    fn inverted_range_is_clamped() {
        let today = d(2026, 3, 2);
        // created after due: bar collapses onto the due date
        let task =
            schedule_task(&record("t", Some(d(2026, 3, 20)), Some(d(2026, 3, 5))), today).unwrap();
        assert_eq!(task.start, task.end);
        assert!(task.is_milestone);
    }

    #[test]
    fn one_day_tasks_are_milestones() {
        let today = d(2026, 3, 2);
        let same = schedule_task(&record("m0", Some(d(2026, 3, 5)), Some(d(2026, 3, 5))), today)
            .unwrap();
        let one = schedule_task(&record("m1", Some(d(2026, 3, 5)), Some(d(2026, 3, 6))), today)
            .unwrap();
        let two = schedule_task(&record("b", Some(d(2026, 3, 5)), Some(d(2026, 3, 7))), today)
            .unwrap();
        assert!(same.is_milestone);
        assert!(one.is_milestone);
        assert!(!two.is_milestone);
    }

    #[test]
    fn progress_maps_from_status() {
        let today = d(2026, 3, 2);
        let mut r = record("t", Some(d(2026, 3, 1)), Some(d(2026, 3, 10)));
        r.status = TaskStatus::Done;
        assert_eq!(schedule_task(&r, today).unwrap().progress, 100);
        r.status = TaskStatus::InProgress;
        assert_eq!(schedule_task(&r, today).unwrap().progress, 50);
        r.status = TaskStatus::Blocked;
        assert_eq!(schedule_task(&r, today).unwrap().progress, 0);
        r.status = TaskStatus::Todo;
        assert_eq!(schedule_task(&r, today).unwrap().progress, 0);
    }

    #[test]
    fn schedule_sorts_by_start_date() {
        let today = d(2026, 3, 2);
        let records = vec![
            record("late", Some(d(2026, 3, 10)), Some(d(2026, 3, 20))),
            record("early", Some(d(2026, 3, 1)), Some(d(2026, 3, 5))),
            record("also early", Some(d(2026, 3, 1)), Some(d(2026, 3, 8))),
        ];
        let tasks = build_schedule(&records, today);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["also early", "early", "late"]);
        // fields carried through
        assert_eq!(tasks[0].priority, TaskPriority::None);
    }
}
