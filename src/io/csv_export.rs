use std::collections::HashMap;
use std::path::Path;

use uuid::Uuid;

use crate::model::{TaskPriority, TaskRecord, TaskStatus};

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Done => "Done",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Blocked => "Blocked",
        TaskStatus::Todo => "Todo",
    }
}

fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Critical => "Critical",
        TaskPriority::High => "High",
        TaskPriority::Medium => "Medium",
        TaskPriority::Low => "Low",
        TaskPriority::None => "",
    }
}

/// Export task records to a semicolon-delimited CSV file matching the
/// import format. Dependencies are written as pipe-separated task titles.
/// Dates are ISO (`YYYY-MM-DD`). Returns the number of rows written.
pub fn export_csv(records: &[TaskRecord], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Start", "Due", "Status", "Priority", "Assignee", "Depends On"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    let titles: HashMap<Uuid, &str> = records.iter().map(|r| (r.id, r.title.as_str())).collect();

    for record in records {
        let deps = record
            .depends_on
            .iter()
            .filter_map(|id| titles.get(id).copied())
            .collect::<Vec<_>>()
            .join("|");

        wtr.write_record([
            record.title.as_str(),
            &record
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            &record
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status_label(record.status),
            priority_label(record.priority),
            record.assignee_name.as_deref().unwrap_or(""),
            &deps,
        ])
        .map_err(|e| format!("Failed to write task '{}': {}", record.title, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_import::import_csv;
    use chrono::NaiveDate;

    #[test]
    fn export_survives_a_reimport() {
        let mut design = TaskRecord::new("Design");
        design.created_at = NaiveDate::from_ymd_opt(2026, 3, 1);
        design.due_date = NaiveDate::from_ymd_opt(2026, 3, 5);
        design.status = TaskStatus::Done;
        let mut build = TaskRecord::new("Build");
        build.due_date = NaiveDate::from_ymd_opt(2026, 3, 12);
        build.priority = TaskPriority::High;
        build.depends_on = vec![design.id];
        build.assignee_name = Some("Alice".to_string());
        build.assignee_id = Some(Uuid::new_v4());

        let path = std::env::temp_dir().join(format!("taskline-export-{}.csv", Uuid::new_v4()));
        let written = export_csv(&[design, build], &path).unwrap();
        assert_eq!(written, 2);

        let (records, skipped) = import_csv(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "Build");
        assert_eq!(records[1].priority, TaskPriority::High);
        assert_eq!(records[1].depends_on, vec![records[0].id]);
        assert_eq!(records[1].assignee_name.as_deref(), Some("Alice"));
    }
}
