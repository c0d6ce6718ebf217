use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::TaskRecord;

/// A date mutation for one task. A resize commit sets exactly one field:
/// right-handle → `due_date`, left-handle → `start_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePatch {
    pub due_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

impl DatePatch {
    pub fn due(date: NaiveDate) -> Self {
        Self {
            due_date: Some(date),
            start_date: None,
        }
    }

    pub fn start(date: NaiveDate) -> Self {
        Self {
            due_date: None,
            start_date: Some(date),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    TaskNotFound(Uuid),
}

/// The task store collaborator: the only owner of task state that outlives
/// a render cycle.
pub trait TaskStore {
    /// All records, sorted by due date ascending; records without a due
    /// date sort last (stable).
    fn list_tasks(&self) -> Vec<TaskRecord>;

    /// Apply a date mutation to one task.
    fn update_task_dates(&mut self, id: Uuid, patch: DatePatch) -> Result<(), StoreError>;
}

/// Vec-backed store used by the desktop app.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Vec<TaskRecord>,
}

impl InMemoryStore {
    pub fn new(records: Vec<TaskRecord>) -> Self {
        Self { records }
    }

    pub fn replace_all(&mut self, records: Vec<TaskRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl TaskStore for InMemoryStore {
    fn list_tasks(&self) -> Vec<TaskRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        records
    }

    fn update_task_dates(&mut self, id: Uuid, patch: DatePatch) -> Result<(), StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        if let Some(due) = patch.due_date {
            record.due_date = Some(due);
        }
        if let Some(start) = patch.start_date {
            record.created_at = Some(start);
        }
        log::debug!("updated dates of task {id}: {patch:?}");
        Ok(())
    }
}
