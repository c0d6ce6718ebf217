use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar granularity of the timeline header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Day,
    Week,
    Month,
    Quarter,
}

impl ZoomLevel {
    /// Pixels per day at this zoom.
    pub fn day_width(self) -> f32 {
        match self {
            ZoomLevel::Day => 36.0,
            ZoomLevel::Week => 18.0,
            ZoomLevel::Month => 6.0,
            ZoomLevel::Quarter => 3.0,
        }
    }

    /// Default window length at this zoom, in days.
    pub fn window_days(self) -> i64 {
        match self {
            ZoomLevel::Day => 60,
            ZoomLevel::Week => 180,
            ZoomLevel::Month => 365,
            ZoomLevel::Quarter => 730,
        }
    }

    /// How far the ◀ / ▶ navigation buttons move the window, in days.
    pub fn scroll_step_days(self) -> i64 {
        match self {
            ZoomLevel::Day => 7,
            ZoomLevel::Week => 30,
            ZoomLevel::Month => 90,
            ZoomLevel::Quarter => 180,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Day => "Day",
            ZoomLevel::Week => "Week",
            ZoomLevel::Month => "Month",
            ZoomLevel::Quarter => "Quarter",
        }
    }
}

/// The visible slice of the calendar and its pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineWindow {
    /// Leftmost visible date.
    pub start: NaiveDate,
    /// Pixels per day.
    pub day_width: f32,
    /// Window length in days.
    pub total_days: i64,
}

impl TimelineWindow {
    pub fn new(start: NaiveDate, zoom: ZoomLevel, total_days: i64) -> Self {
        Self {
            start,
            day_width: zoom.day_width(),
            total_days,
        }
    }

    /// Exclusive right edge of the window.
    pub fn end(&self) -> NaiveDate {
        self.start + chrono::Duration::days(self.total_days)
    }

    /// Convert a date to an x-pixel offset from the window start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        (date - self.start).num_days() as f32 * self.day_width
    }

    /// Whether a date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Total width in pixels.
    pub fn total_width(&self) -> f32 {
        self.total_days as f32 * self.day_width
    }
}
