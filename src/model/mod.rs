pub mod task;
pub mod timeline;

pub use task::{ScheduledTask, TaskPriority, TaskRecord, TaskStatus};
pub use timeline::{TimelineWindow, ZoomLevel};
