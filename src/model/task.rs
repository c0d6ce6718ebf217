use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow status of a task, as stored in the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Blocked,
}

/// Priority ladder for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::None => "None",
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }
}

/// A raw task row as the task store hands it out.
///
/// Dates are optional: a record with no due date exists in the store but
/// never participates in the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDate>,
    /// Ids of tasks this task depends on (must finish before this starts).
    #[serde(default)]
    pub depends_on: Vec<Uuid>,
    #[serde(default)]
    pub assignee_id: Option<Uuid>,
    #[serde(default)]
    pub assignee_name: Option<String>,
}

impl TaskRecord {
    /// Create a new record with sensible defaults.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::None,
            due_date: None,
            created_at: None,
            depends_on: Vec::new(),
            assignee_id: None,
            assignee_name: None,
        }
    }
}

/// A task that made it into the schedule: both endpoints resolved,
/// `end >= start` guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    pub id: Uuid,
    pub title: String,
    /// Inclusive start of the bar.
    pub start: NaiveDate,
    /// Inclusive end of the bar.
    pub end: NaiveDate,
    /// Tasks spanning at most one day render as diamonds, not bars.
    pub is_milestone: bool,
    /// Discrete progress: 0, 50 or 100.
    pub progress: u8,
    pub depends_on: Vec<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub assignee_name: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl ScheduledTask {
    /// Bar length in whole days (`end - start`); 0 for same-day milestones.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
