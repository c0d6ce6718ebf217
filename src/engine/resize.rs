use chrono::NaiveDate;

use crate::model::ScheduledTask;
use crate::store::DatePatch;

/// Which edge of the bar is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

/// Resize gesture state for one bar: `Idle → Resizing → Idle`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ResizeState {
    Idle,
    Resizing {
        side: HandleSide,
        /// Pointer x at drag start.
        origin_x: f32,
        /// Task dates captured at drag start; the task itself is never
        /// touched until commit.
        origin_start: NaiveDate,
        origin_end: NaiveDate,
    },
}

/// Proposed dates while a drag is in flight. Visual-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePreview {
    pub delta_days: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// What a pointer release produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// Nothing in flight, or the pointer never left the original day.
    NoChange,
    /// Proposal would invert the bar; snapped back, nothing surfaced.
    Rejected,
    /// Valid proposal: submit this patch to the task store.
    Apply(DatePatch),
}

/// Translates pointer movement into day-granularity date proposals.
/// Scoped to a single bar; the host keeps at most one live controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeController {
    state: ResizeState,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeController {
    pub fn new() -> Self {
        Self {
            state: ResizeState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, ResizeState::Idle)
    }

    /// Enter `Resizing`, capturing the original geometry. Milestones carry
    /// no handles and are refused outright; a second `begin` while already
    /// resizing is ignored.
    pub fn begin(&mut self, side: HandleSide, pointer_x: f32, task: &ScheduledTask) {
        if task.is_milestone || self.is_active() {
            return;
        }
        self.state = ResizeState::Resizing {
            side,
            origin_x: pointer_x,
            origin_start: task.start,
            origin_end: task.end,
        };
    }

    /// The dates the bar would take if released at `pointer_x`. Does not
    /// mutate anything.
    pub fn preview(&self, pointer_x: f32, day_width: f32) -> Option<ResizePreview> {
        let ResizeState::Resizing {
            side,
            origin_x,
            origin_start,
            origin_end,
        } = self.state
        else {
            return None;
        };
        let delta_days = ((pointer_x - origin_x) / day_width).round() as i64;
        let (start, end) = match side {
            HandleSide::Right => (origin_start, origin_end + chrono::Duration::days(delta_days)),
            HandleSide::Left => (origin_start + chrono::Duration::days(delta_days), origin_end),
        };
        Some(ResizePreview {
            delta_days,
            start,
            end,
        })
    }

    /// Pointer release: validate the proposal and return to `Idle` either
    /// way. A right resize must keep the end strictly after the original
    /// start; a left resize must keep the start strictly before the
    /// original end. Invalid proposals are discarded silently.
    pub fn commit(&mut self, pointer_x: f32, day_width: f32) -> ResizeOutcome {
        let Some(preview) = self.preview(pointer_x, day_width) else {
            return ResizeOutcome::NoChange;
        };
        let ResizeState::Resizing { side, .. } = self.state else {
            return ResizeOutcome::NoChange;
        };
        self.state = ResizeState::Idle;

        if preview.delta_days == 0 {
            return ResizeOutcome::NoChange;
        }
        match side {
            HandleSide::Right if preview.end > preview.start => {
                ResizeOutcome::Apply(DatePatch::due(preview.end))
            }
            HandleSide::Left if preview.start < preview.end => {
                ResizeOutcome::Apply(DatePatch::start(preview.start))
            }
            _ => ResizeOutcome::Rejected,
        }
    }

    /// Drop any in-flight gesture (pointer capture loss).
    pub fn cancel(&mut self) {
        self.state = ResizeState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskPriority, TaskStatus};
    use uuid::Uuid;

    const DAY_WIDTH: f32 = 36.0;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + chrono::Duration::days(day as i64)
    }

    fn task(start: u32, end: u32) -> ScheduledTask {
        ScheduledTask {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            start: d(start),
            end: d(end),
            is_milestone: end - start <= 1,
            progress: 0,
            depends_on: Vec::new(),
            assignee_id: None,
            assignee_name: None,
            priority: TaskPriority::None,
            status: TaskStatus::Todo,
        }
    }

    #[test]
    fn right_resize_proposes_and_commits_only_the_end_date() {
        let task = task(0, 5);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 100.0, &task);

        let preview = ctl.preview(100.0 + 3.0 * DAY_WIDTH, DAY_WIDTH).unwrap();
        assert_eq!(preview.delta_days, 3);
        assert_eq!(preview.end, d(8));
        assert_eq!(preview.start, d(0)); // start untouched

        match ctl.commit(100.0 + 3.0 * DAY_WIDTH, DAY_WIDTH) {
            ResizeOutcome::Apply(patch) => {
                assert_eq!(patch.due_date, Some(d(8)));
                assert_eq!(patch.start_date, None);
            }
            other => panic!("expected Apply, got {other:?}"),
        }
        assert!(!ctl.is_active());
    }

    #[test]
    fn left_resize_commits_only_the_start_date() {
        let task = task(2, 9);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Left, 50.0, &task);

        match ctl.commit(50.0 + 2.0 * DAY_WIDTH, DAY_WIDTH) {
            ResizeOutcome::Apply(patch) => {
                assert_eq!(patch.start_date, Some(d(4)));
                assert_eq!(patch.due_date, None);
            }
            other => panic!("expected Apply, got {other:?}"),
        }
    }

    #[test]
    fn inverting_proposal_is_rejected_and_snaps_back() {
        let task = task(0, 5);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 100.0, &task);

        // dragging the end 6 days left would put it before the start
        let outcome = ctl.commit(100.0 - 6.0 * DAY_WIDTH, DAY_WIDTH);
        assert_eq!(outcome, ResizeOutcome::Rejected);
        assert!(!ctl.is_active());
    }

    #[test]
    fn collapsing_to_zero_duration_is_rejected() {
        // end == start is not strictly after: rejected
        let task = task(0, 5);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 0.0, &task);
        assert_eq!(
            ctl.commit(-5.0 * DAY_WIDTH, DAY_WIDTH),
            ResizeOutcome::Rejected
        );
    }

    #[test]
    fn milestones_take_no_handles() {
        let milestone = task(3, 3);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 10.0, &milestone);
        assert!(!ctl.is_active());
        assert_eq!(ctl.commit(200.0, DAY_WIDTH), ResizeOutcome::NoChange);
    }

    #[test]
    fn sub_half_day_movement_is_no_change() {
        let task = task(0, 5);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 100.0, &task);
        // less than half a day of travel rounds to zero
        assert_eq!(
            ctl.commit(100.0 + DAY_WIDTH * 0.4, DAY_WIDTH),
            ResizeOutcome::NoChange
        );
        assert!(!ctl.is_active());
    }

    #[test]
    fn preview_is_visual_only() {
        let task = task(0, 5);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 0.0, &task);
        let _ = ctl.preview(10.0 * DAY_WIDTH, DAY_WIDTH);
        // original snapshot still in place: committing at origin is NoChange
        assert_eq!(ctl.commit(0.0, DAY_WIDTH), ResizeOutcome::NoChange);
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let task = task(0, 5);
        let mut ctl = ResizeController::new();
        ctl.begin(HandleSide::Right, 0.0, &task);
        ctl.cancel();
        assert_eq!(ctl.commit(5.0 * DAY_WIDTH, DAY_WIDTH), ResizeOutcome::NoChange);
    }
}
