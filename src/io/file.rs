use std::path::Path;

use crate::model::TaskRecord;

/// Save task records to a JSON file.
pub fn save_records(records: &[TaskRecord], path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(records).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Load task records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<TaskRecord>, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&json).map_err(|e| e.to_string())
}
