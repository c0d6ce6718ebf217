use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{TaskPriority, TaskRecord, TaskStatus};

/// Map a status string to a [`TaskStatus`].
fn parse_status(status: &str) -> TaskStatus {
    match status.trim().to_lowercase().as_str() {
        "finished" | "done" | "complete" | "completed" => TaskStatus::Done,
        "in progress" | "in-progress" | "in_progress" | "active" | "started" => {
            TaskStatus::InProgress
        }
        "blocked" | "stuck" | "on hold" | "on-hold" => TaskStatus::Blocked,
        _ => TaskStatus::Todo,
    }
}

fn parse_priority(priority: &str) -> TaskPriority {
    match priority.trim().to_lowercase().as_str() {
        "critical" | "urgent" => TaskPriority::Critical,
        "high" => TaskPriority::High,
        "medium" | "med" | "normal" => TaskPriority::Medium,
        "low" => TaskPriority::Low,
        _ => TaskPriority::None,
    }
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = title, 1 = created/start, 2 = due, 3 = status, 4 = priority,
///   5 = assignee, 6 = depends-on (semicolon- or pipe-separated titles)
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "title" | "name" | "task" | "taskname" | "label" | "activity" => Some(0),

        "created" | "createdat" | "start" | "startdate" | "from" | "begin" => Some(1),

        "due" | "duedate" | "end" | "enddate" | "to" | "finish" | "deadline" => Some(2),

        "status" | "state" | "stage" => Some(3),

        "priority" | "pri" | "importance" => Some(4),

        "assignee" | "assignedto" | "owner" | "resource" => Some(5),

        "dependson" | "dependencies" | "deps" | "after" | "predecessors" => Some(6),

        _ => None,
    }
}

/// Import task records from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches headers
/// flexibly. Rows with an unparsable due date are still imported with no
/// due date — the schedule simply leaves them out. Dependency references
/// are given as task titles and resolved to ids in a second pass; unknown
/// titles are dropped with a warning. Returns `(records, skipped_rows)`.
pub fn import_csv(path: &Path) -> Result<(Vec<TaskRecord>, usize), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();

    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    if !col_map.iter().any(|c| *c == Some(0)) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing a task title column. Found headers: {:?}",
            found
        ));
    }

    // Accumulate records plus their raw dependency strings; resolve titles
    // to ids in a second pass once every row is known.
    let mut records: Vec<TaskRecord> = Vec::new();
    let mut dep_titles: Vec<Vec<String>> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut fields: [Option<String>; 7] = Default::default();
        for (col_idx, field) in row.iter().enumerate() {
            if let Some(Some(slot)) = col_map.get(col_idx) {
                fields[*slot] = Some(field.trim().to_string());
            }
        }

        let title = match fields[0].take() {
            Some(t) if !t.is_empty() => t,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let mut record = TaskRecord::new(title);
        record.created_at = fields[1].as_deref().and_then(parse_date);
        record.due_date = fields[2].as_deref().and_then(parse_date);
        record.status = fields[3].as_deref().map(parse_status).unwrap_or(TaskStatus::Todo);
        record.priority = fields[4]
            .as_deref()
            .map(parse_priority)
            .unwrap_or(TaskPriority::None);
        if let Some(name) = fields[5].take().filter(|s| !s.is_empty()) {
            // Stable id per assignee name so workload rows aggregate
            record.assignee_id = Some(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()));
            record.assignee_name = Some(name);
        }

        dep_titles.push(
            fields[6]
                .take()
                .map(|s| {
                    s.split(['|', ';'])
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        );
        records.push(record);
    }

    if records.is_empty() {
        return Err(if skipped > 0 {
            format!("No valid tasks found in CSV ({} rows skipped)", skipped)
        } else {
            "CSV file is empty or has no data rows".to_string()
        });
    }

    // Second pass: resolve dependency titles to ids.
    let title_to_id: HashMap<String, Uuid> = records
        .iter()
        .map(|r| (r.title.to_lowercase(), r.id))
        .collect();

    for (record, titles) in records.iter_mut().zip(dep_titles.iter()) {
        for title in titles {
            match title_to_id.get(&title.to_lowercase()) {
                Some(&id) if id != record.id => record.depends_on.push(id),
                Some(_) => {} // self-reference, drop
                None => log::warn!(
                    "dependency '{}' of task '{}' not found in CSV",
                    title,
                    record.title
                ),
            }
        }
    }

    Ok((records, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import_str(content: &str) -> (Vec<TaskRecord>, usize) {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("taskline-csv-test-{}.csv", Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        let out = import_csv(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        out
    }

    #[test]
    fn imports_and_resolves_dependencies_by_title() {
        let (records, skipped) = import_str(
            "Title,Start,Due,Status,Assignee,Depends On\n\
             Design,2026-03-01,2026-03-05,done,Alice,\n\
             Build,2026-03-05,2026-03-12,in progress,Bob,Design\n\
             Ship,2026-03-12,2026-03-13,todo,,Build|Design\n",
        );
        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].status, TaskStatus::Done);
        assert_eq!(records[1].depends_on, vec![records[0].id]);
        assert_eq!(records[2].depends_on, vec![records[1].id, records[0].id]);
        assert_eq!(records[0].assignee_name.as_deref(), Some("Alice"));
        assert!(records[2].assignee_id.is_none());
    }

    #[test]
    fn semicolon_delimiter_and_bad_dates() {
        let (records, skipped) = import_str(
            "Name;Due Date\n\
             ok;05/03/2026\n\
             fuzzy;sometime soon\n\
             ;2026-03-09\n",
        );
        // a blank title is skipped; a bad date is kept without a due date
        assert_eq!(skipped, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].due_date,
            Some(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap())
        );
        assert_eq!(records[1].due_date, None);
    }

    #[test]
    fn same_assignee_name_shares_an_id() {
        let (records, _) = import_str(
            "Title,Assignee\n\
             one,Alice\n\
             two,Alice\n",
        );
        assert_eq!(records[0].assignee_id, records[1].assignee_id);
    }
}
