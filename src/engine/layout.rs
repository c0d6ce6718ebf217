use chrono::{Datelike, NaiveDate};

use crate::engine::calendar::{
    days_between, is_major_day, iso_week, month_start, next_month, quarter, week_start,
};
use crate::model::{TimelineWindow, ZoomLevel};

/// One cell of the timeline header.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineMarker {
    /// Pixel offset from the window's left edge; the first week marker may
    /// sit left of it (negative) because weeks align to Monday.
    pub offset_x: f32,
    pub width: f32,
    pub label: String,
    pub is_major: bool,
}

/// A month or quarter band rendered above the markers.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupHeader {
    pub offset_x: f32,
    pub width: f32,
    pub label: String,
}

/// Calendar markers for the header row at the given zoom.
pub fn layout_markers(window: &TimelineWindow, zoom: ZoomLevel) -> Vec<TimelineMarker> {
    match zoom {
        ZoomLevel::Day => day_markers(window),
        ZoomLevel::Week => week_markers(window),
        ZoomLevel::Month => month_markers(window, false),
        ZoomLevel::Quarter => month_markers(window, true),
    }
}

/// Group-header bands above the markers: months for day/week zoom,
/// merged quarters for month/quarter zoom.
pub fn layout_group_headers(window: &TimelineWindow, zoom: ZoomLevel) -> Vec<GroupHeader> {
    match zoom {
        ZoomLevel::Day | ZoomLevel::Week => month_headers(window),
        ZoomLevel::Month | ZoomLevel::Quarter => quarter_headers(window),
    }
}

/// Pixel offset of the today line, or `None` when today is off-window.
pub fn today_offset(window: &TimelineWindow, today: NaiveDate) -> Option<f32> {
    window
        .contains(today)
        .then(|| days_between(window.start, today) as f32 * window.day_width)
}

fn day_markers(window: &TimelineWindow) -> Vec<TimelineMarker> {
    (0..window.total_days)
        .map(|i| {
            let date = window.start + chrono::Duration::days(i);
            TimelineMarker {
                offset_x: i as f32 * window.day_width,
                width: window.day_width,
                label: date.format("%d").to_string(),
                is_major: is_major_day(date),
            }
        })
        .collect()
}

fn week_markers(window: &TimelineWindow) -> Vec<TimelineMarker> {
    let mut markers = Vec::new();
    let mut monday = week_start(window.start);
    while monday < window.end() {
        markers.push(TimelineMarker {
            offset_x: days_between(window.start, monday) as f32 * window.day_width,
            width: 7.0 * window.day_width,
            label: format!("W{}", iso_week(monday)),
            is_major: monday.day() <= 7,
        });
        monday += chrono::Duration::days(7);
    }
    markers
}

/// Walk the months overlapping the window, clipped to visible days.
/// Yields (month start, visible offset px, visible width px).
fn visible_months(window: &TimelineWindow) -> Vec<(NaiveDate, f32, f32)> {
    let mut months = Vec::new();
    let mut month = month_start(window.start);
    while month < window.end() {
        let from = month.max(window.start);
        let to = next_month(month).min(window.end());
        let days = days_between(from, to);
        if days > 0 {
            months.push((
                month,
                days_between(window.start, from) as f32 * window.day_width,
                days as f32 * window.day_width,
            ));
        }
        month = next_month(month);
    }
    months
}

fn month_markers(window: &TimelineWindow, quarter_labels: bool) -> Vec<TimelineMarker> {
    visible_months(window)
        .into_iter()
        .map(|(month, offset_x, width)| TimelineMarker {
            offset_x,
            width,
            label: if quarter_labels {
                format!("Q{} {}", quarter(month), month.format("%b"))
            } else {
                month.format("%b %Y").to_string()
            },
            is_major: matches!(month.month(), 1 | 4 | 7 | 10),
        })
        .collect()
}

fn month_headers(window: &TimelineWindow) -> Vec<GroupHeader> {
    visible_months(window)
        .into_iter()
        .map(|(month, offset_x, width)| GroupHeader {
            offset_x,
            width,
            label: month.format("%b %Y").to_string(),
        })
        .collect()
}

/// Merge consecutive visible months sharing a quarter+year into one band.
fn quarter_headers(window: &TimelineWindow) -> Vec<GroupHeader> {
    let mut headers: Vec<(i32, u32, GroupHeader)> = Vec::new();
    for (month, offset_x, width) in visible_months(window) {
        let q = quarter(month);
        match headers.last_mut() {
            Some((year, qq, header)) if *year == month.year() && *qq == q => {
                header.width += width;
            }
            _ => headers.push((
                month.year(),
                q,
                GroupHeader {
                    offset_x,
                    width,
                    label: format!("Q{} {}", q, month.year()),
                },
            )),
        }
    }
    headers.into_iter().map(|(_, _, h)| h).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(start: NaiveDate, zoom: ZoomLevel, total_days: i64) -> TimelineWindow {
        TimelineWindow::new(start, zoom, total_days)
    }

    #[test]
    fn day_zoom_yields_one_fixed_marker_per_day() {
        let w = window(d(2026, 2, 25), ZoomLevel::Day, 14);
        let markers = layout_markers(&w, ZoomLevel::Day);
        assert_eq!(markers.len(), 14);
        for (i, m) in markers.iter().enumerate() {
            assert_eq!(m.width, w.day_width);
            assert_eq!(m.offset_x, i as f32 * w.day_width);
            let date = w.start + chrono::Duration::days(i as i64);
            let expect_major = date.weekday() == Weekday::Mon || date.day() == 1;
            assert_eq!(m.is_major, expect_major, "marker {} ({})", i, date);
        }
    }

    #[test]
    fn week_markers_align_to_monday() {
        // 2026-03-04 is a Wednesday; first marker belongs to Monday 03-02
        let w = window(d(2026, 3, 4), ZoomLevel::Week, 28);
        let markers = layout_markers(&w, ZoomLevel::Week);
        assert_eq!(markers[0].offset_x, -2.0 * w.day_width);
        assert_eq!(markers[0].width, 7.0 * w.day_width);
        assert_eq!(markers[0].label, format!("W{}", iso_week(d(2026, 3, 2))));
        // Monday 03-02 is within the first 7 days of March
        assert!(markers[0].is_major);
        // consecutive markers are a week apart
        for pair in markers.windows(2) {
            assert_eq!(pair[1].offset_x - pair[0].offset_x, 7.0 * w.day_width);
        }
    }

    #[test]
    fn month_markers_clip_partial_months() {
        // Feb 15 .. Apr 15 2026: Feb shows 14 visible days, Mar all 31,
        // Apr the first 14
        let w = window(d(2026, 2, 15), ZoomLevel::Month, 59);
        let markers = layout_markers(&w, ZoomLevel::Month);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].label, "Feb 2026");
        assert_eq!(markers[0].offset_x, 0.0);
        assert_eq!(markers[0].width, 14.0 * w.day_width);
        assert_eq!(markers[1].width, 31.0 * w.day_width);
        assert_eq!(markers[1].offset_x, 14.0 * w.day_width);
        assert_eq!(markers[2].width, 14.0 * w.day_width);
    }

    #[test]
    fn quarter_zoom_labels_months_with_quarters() {
        let w = window(d(2026, 3, 1), ZoomLevel::Quarter, 92);
        let markers = layout_markers(&w, ZoomLevel::Quarter);
        assert_eq!(markers[0].label, "Q1 Mar");
        assert_eq!(markers[1].label, "Q2 Apr");
        assert!(markers[1].is_major);
    }

    #[test]
    fn quarter_headers_merge_months_and_sum_widths() {
        // Mar 1 .. May 31 2026: Q1 covers Mar (31d), Q2 covers Apr+May (61d)
        let w = window(d(2026, 3, 1), ZoomLevel::Quarter, 91);
        let headers = layout_group_headers(&w, ZoomLevel::Quarter);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].label, "Q1 2026");
        assert_eq!(headers[0].width, 31.0 * w.day_width);
        assert_eq!(headers[1].label, "Q2 2026");
        assert_eq!(headers[1].width, 60.0 * w.day_width);
        assert_eq!(headers[1].offset_x, 31.0 * w.day_width);
    }

    #[test]
    fn month_headers_back_day_and_week_zooms() {
        let w = window(d(2026, 2, 25), ZoomLevel::Day, 10);
        let headers = layout_group_headers(&w, ZoomLevel::Day);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].label, "Feb 2026");
        assert_eq!(headers[1].label, "Mar 2026");
    }

    #[test]
    fn today_marker_only_inside_the_window() {
        let w = window(d(2026, 3, 1), ZoomLevel::Day, 30);
        assert_eq!(today_offset(&w, d(2026, 3, 11)), Some(10.0 * w.day_width));
        assert_eq!(today_offset(&w, d(2026, 2, 28)), None);
        assert_eq!(today_offset(&w, d(2026, 4, 15)), None);
    }
}
