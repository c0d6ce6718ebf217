use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::engine::{
    curve_control_points, HandleSide, RenderSnapshot, ResizeController, ResizeOutcome,
};
use crate::model::{ScheduledTask, TimelineWindow};
use crate::store::DatePatch;
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Full row pitch; also the row height the arrow router is given.
pub const ROW_PITCH: f32 = ROW_HEIGHT + ROW_GAP;

/// What the chart wants the host to do after this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A resize was released with a valid proposal: persist it.
    pub commit: Option<(Uuid, DatePatch)>,
}

/// Render the timeline area and run the resize interaction.
pub fn show_gantt_chart(
    snapshot: &RenderSnapshot,
    window: &TimelineWindow,
    resize: &mut ResizeController,
    resize_task: &mut Option<Uuid>,
    selected_task: &mut Option<Uuid>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let chart_width = window.total_width().max(available.x);
    let rows_height = snapshot.tasks.len() as f32 * ROW_PITCH;
    let workload_height = if snapshot.workload.is_empty() {
        0.0
    } else {
        snapshot.workload.len() as f32 * theme::WORKLOAD_ROW_HEIGHT + 12.0
    };
    let chart_height = HEADER_HEIGHT + rows_height + workload_height + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            // Alternating row backgrounds under everything else
            for i in 0..snapshot.tasks.len() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * ROW_PITCH;
                if i % 2 == 0 {
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(origin.x, y),
                            Vec2::new(chart_width, ROW_PITCH),
                        ),
                        0.0,
                        theme::BG_PANEL,
                    );
                }
            }

            draw_header(&painter, origin, snapshot, chart_width, chart_height);
            draw_today_line(&painter, origin, snapshot, chart_height);

            // Dependency arrows go under the bars
            for arrow in &snapshot.arrows {
                let on_critical = snapshot.critical.contains(&arrow.from_task)
                    && snapshot.critical.contains(&arrow.to_task);
                draw_arrow(&painter, origin, arrow, on_critical);
            }

            for (i, task) in snapshot.tasks.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * ROW_PITCH + ROW_GAP;
                let is_selected = *selected_task == Some(task.id);
                let is_critical = snapshot.critical.contains(&task.id);

                if task.is_milestone {
                    let rect = draw_milestone(&painter, origin, window, task, y, is_selected);
                    let resp = ui.interact(
                        rect.expand(6.0),
                        ui.make_persistent_id(("milestone", task.id)),
                        Sense::click(),
                    );
                    if resp.clicked() {
                        *selected_task = Some(task.id);
                        consumed_click = true;
                    }
                    if resp.hovered() {
                        task_tooltip(ui, task, is_critical);
                    }
                    continue;
                }

                // Base geometry from committed dates; handles interact on it
                // even while a drag is in flight (egui pins the drag to the
                // widget id, not the rect).
                let mut start = task.start;
                let mut end = task.end;

                let base_rect = bar_rect(origin, window, start, end, y);
                let left_rect = Rect::from_min_max(
                    Pos2::new(base_rect.left() - HANDLE_WIDTH * 0.5, base_rect.top()),
                    Pos2::new(base_rect.left() + HANDLE_WIDTH * 0.5, base_rect.bottom()),
                );
                let right_rect = Rect::from_min_max(
                    Pos2::new(base_rect.right() - HANDLE_WIDTH * 0.5, base_rect.top()),
                    Pos2::new(base_rect.right() + HANDLE_WIDTH * 0.5, base_rect.bottom()),
                );

                let bar_resp = ui.interact(
                    base_rect,
                    ui.make_persistent_id(("task-bar", task.id)),
                    Sense::click(),
                );
                let left_resp = ui.interact(
                    left_rect.expand(4.0),
                    ui.make_persistent_id(("task-resize-left", task.id)),
                    Sense::drag(),
                );
                let right_resp = ui.interact(
                    right_rect.expand(4.0),
                    ui.make_persistent_id(("task-resize-right", task.id)),
                    Sense::drag(),
                );

                if bar_resp.clicked() {
                    *selected_task = Some(task.id);
                    consumed_click = true;
                }

                if left_resp.drag_started() {
                    let x = left_resp.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    resize.begin(HandleSide::Left, x, task);
                    *resize_task = Some(task.id);
                    *selected_task = Some(task.id);
                }
                if right_resp.drag_started() {
                    let x = right_resp.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    resize.begin(HandleSide::Right, x, task);
                    *resize_task = Some(task.id);
                    *selected_task = Some(task.id);
                }

                if *resize_task == Some(task.id) {
                    let pointer_x = left_resp
                        .interact_pointer_pos()
                        .or(right_resp.interact_pointer_pos())
                        .map(|p| p.x);

                    if left_resp.dragged() || right_resp.dragged() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                        if let Some(x) = pointer_x {
                            // visual-only offset; the task itself is untouched
                            if let Some(preview) = resize.preview(x, window.day_width) {
                                start = preview.start;
                                end = preview.end;
                            }
                        }
                    }

                    if left_resp.drag_stopped() || right_resp.drag_stopped() {
                        let x = pointer_x
                            .or_else(|| ui.input(|i| i.pointer.latest_pos()).map(|p| p.x));
                        match x {
                            Some(x) => match resize.commit(x, window.day_width) {
                                ResizeOutcome::Apply(patch) => {
                                    interaction.commit = Some((task.id, patch));
                                }
                                // invalid or unchanged: snaps back on redraw
                                ResizeOutcome::Rejected | ResizeOutcome::NoChange => {}
                            },
                            None => resize.cancel(),
                        }
                        *resize_task = None;
                    }
                }

                let rect = bar_rect(origin, window, start, end, y);
                draw_task_bar(&painter, rect, task, is_selected, is_critical);

                // Handle affordances
                if is_selected || left_resp.hovered() || right_resp.hovered() {
                    if left_resp.hovered() || right_resp.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    }
                    let handle_h = rect.height() * 0.55;
                    let handle_y = rect.center().y - handle_h / 2.0;
                    let lh = Rect::from_min_size(
                        Pos2::new(rect.left() - 1.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    let rh = Rect::from_min_size(
                        Pos2::new(rect.right() - 2.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
                    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
                }

                if bar_resp.hovered() || left_resp.hovered() || right_resp.hovered() {
                    task_tooltip(ui, task, is_critical);
                }
            }

            if !snapshot.workload.is_empty() {
                draw_workload_band(
                    &painter,
                    origin,
                    snapshot,
                    window,
                    HEADER_HEIGHT + rows_height + 8.0,
                );
            }

            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn bar_rect(
    origin: Pos2,
    window: &TimelineWindow,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    y: f32,
) -> Rect {
    let x_start = origin.x + window.date_to_x(start);
    let x_end = origin.x + window.date_to_x(end);
    let inset = theme::BAR_INSET;
    Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new((x_end - x_start).max(6.0), ROW_HEIGHT - inset * 2.0),
    )
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    snapshot: &RenderSnapshot,
    chart_width: f32,
    chart_height: f32,
) {
    let group_h = theme::GROUP_HEADER_HEIGHT;

    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(chart_width, group_h)),
        0.0,
        theme::BG_GROUP_HEADER,
    );
    painter.rect_filled(
        Rect::from_min_size(
            Pos2::new(origin.x, origin.y + group_h),
            Vec2::new(chart_width, theme::MARKER_HEIGHT),
        ),
        0.0,
        theme::BG_HEADER,
    );

    for header in &snapshot.group_headers {
        let x = origin.x + header.offset_x;
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + group_h)],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
        painter.text(
            Pos2::new(x + 4.0, origin.y + group_h / 2.0),
            egui::Align2::LEFT_CENTER,
            &header.label,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }

    for marker in &snapshot.markers {
        let x = origin.x + marker.offset_x;
        let (stroke, color) = if marker.is_major {
            (1.0, theme::GRID_LINE_MAJOR)
        } else {
            (0.5, theme::GRID_LINE)
        };
        painter.line_segment(
            [
                Pos2::new(x, origin.y + group_h),
                Pos2::new(x, origin.y + chart_height),
            ],
            Stroke::new(stroke, color),
        );
        let text_color = if marker.is_major {
            theme::TEXT_SECONDARY
        } else {
            theme::TEXT_DIM
        };
        painter.text(
            Pos2::new(x + 3.0, origin.y + group_h + theme::MARKER_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            &marker.label,
            theme::font_sub(),
            text_color,
        );
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + chart_width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    snapshot: &RenderSnapshot,
    height: f32,
) {
    let Some(today_x) = snapshot.today_x else {
        return; // today is off-window
    };
    let x = origin.x + today_x;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_arrow(
    painter: &egui::Painter,
    origin: Pos2,
    arrow: &crate::engine::DependencyArrow,
    on_critical: bool,
) {
    let from = Pos2::new(origin.x + arrow.from_x, origin.y + HEADER_HEIGHT + arrow.from_y);
    let to = Pos2::new(origin.x + arrow.to_x, origin.y + HEADER_HEIGHT + arrow.to_y);
    let ((c1x, c1y), (c2x, c2y)) = curve_control_points(arrow);
    let c1 = Pos2::new(origin.x + c1x, origin.y + HEADER_HEIGHT + c1y);
    let c2 = Pos2::new(origin.x + c2x, origin.y + HEADER_HEIGHT + c2y);

    let stroke = if on_critical {
        Stroke::new(2.5, theme::ARROW_CRITICAL)
    } else {
        Stroke::new(1.5, theme::ARROW_COLOR)
    };

    painter.add(egui::epaint::CubicBezierShape::from_points_stroke(
        [from, c1, c2, to],
        false,
        Color32::TRANSPARENT,
        stroke,
    ));

    // Arrowhead at the target
    let size = 5.0;
    painter.add(egui::Shape::convex_polygon(
        vec![
            to,
            Pos2::new(to.x - size, to.y - size * 0.7),
            Pos2::new(to.x - size, to.y + size * 0.7),
        ],
        stroke.color,
        Stroke::NONE,
    ));
}

fn draw_task_bar(
    painter: &egui::Painter,
    rect: Rect,
    task: &ScheduledTask,
    is_selected: bool,
    is_critical: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = if is_critical {
        theme::BAR_CRITICAL
    } else {
        theme::BAR_COLOR
    };

    let shadow = rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(rect, rounding, color);

    // Progress fill (darkened overlay)
    if task.progress > 0 {
        let progress_width = rect.width() * (task.progress as f32 / 100.0).clamp(0.0, 1.0);
        painter.rect_filled(
            Rect::from_min_size(rect.min, Vec2::new(progress_width, rect.height())),
            rounding,
            theme::PROGRESS_OVERLAY,
        );
        if task.progress < 100 {
            let tick_x = rect.left() + progress_width;
            painter.line_segment(
                [
                    Pos2::new(tick_x, rect.top() + 2.0),
                    Pos2::new(tick_x, rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(
            task.title.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let clipped = painter.with_clip_rect(rect);
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_milestone(
    painter: &egui::Painter,
    origin: Pos2,
    window: &TimelineWindow,
    task: &ScheduledTask,
    y: f32,
    is_selected: bool,
) -> Rect {
    let x = origin.x + window.date_to_x(task.start);
    let center = Pos2::new(x, y + ROW_HEIGHT / 2.0);
    let size = (ROW_HEIGHT / 2.0 - 3.0).max(6.0);

    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(
        points.clone(),
        theme::MILESTONE_COLOR,
        Stroke::NONE,
    ));

    if is_selected {
        painter.add(egui::Shape::convex_polygon(
            points,
            Color32::TRANSPARENT,
            Stroke::new(2.0, theme::BORDER_ACCENT),
        ));
    }

    painter.text(
        Pos2::new(x + size + 6.0, y + ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        &task.title,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    Rect::from_center_size(center, Vec2::splat(size * 2.0 + 2.0))
}

fn draw_workload_band(
    painter: &egui::Painter,
    origin: Pos2,
    snapshot: &RenderSnapshot,
    window: &TimelineWindow,
    band_top: f32,
) {
    for (i, row) in snapshot.workload.iter().enumerate() {
        let y = origin.y + band_top + i as f32 * theme::WORKLOAD_ROW_HEIGHT;

        for (day, &count) in row.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(origin.x + day as f32 * window.day_width, y + 1.0),
                    Vec2::new(window.day_width, theme::WORKLOAD_ROW_HEIGHT - 2.0),
                ),
                0.0,
                theme::workload_intensity(count),
            );
        }

        painter.text(
            Pos2::new(origin.x + 4.0, y + theme::WORKLOAD_ROW_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            &row.assignee_name,
            theme::font_small(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn task_tooltip(ui: &Ui, task: &ScheduledTask, is_critical: bool) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", task.id)),
        |ui| {
            ui.strong(&task.title);
            if task.is_milestone {
                ui.label(task.start.format("%d/%m/%Y").to_string());
            } else {
                ui.label(format!(
                    "{} → {}",
                    task.start.format("%d/%m/%Y"),
                    task.end.format("%d/%m/%Y"),
                ));
            }
            ui.label(format!("Progress: {}%", task.progress));
            if task.priority != crate::model::TaskPriority::None {
                ui.colored_label(
                    theme::priority_color(task.priority),
                    format!("Priority: {}", task.priority.label()),
                );
            }
            if let Some(name) = &task.assignee_name {
                ui.label(format!("Assignee: {}", name));
            }
            if is_critical {
                ui.colored_label(theme::BAR_CRITICAL, "On critical path");
            }
        },
    );
}
