//! The marker-driven transform algebra.
//!
//! A drag is committed (and previewed) by computing the figure's focus
//! rectangle before and after the drag offset, then remapping every point so
//! its fractional position within the old rectangle is preserved in the new
//! one. Node drags bypass the remap and move a single point directly.

use crate::figure::Figure;
use crate::marker::{MARKER_BODY, node_index_of};
use kurbo::{Point, Rect, Vec2};

/// Compute the focus rectangle for a drag `offset` applied at `marker`.
///
/// Marker 0 translates the rectangle. Markers touching the left edge
/// (7, 8, 1) shift x and shrink the width; markers touching the right edge
/// (3, 4, 5) grow the width; top markers (1, 2, 3) shift y and shrink the
/// height; bottom markers (5, 6, 7) grow it. A change that would drive
/// width or height to zero or below leaves the rectangle unchanged on that
/// axis, so the result is never inverted or degenerate.
pub fn calc_focus_rect(offset: Vec2, bounds: Rect, marker: i32) -> Rect {
    let mut x = bounds.x0;
    let mut y = bounds.y0;
    let mut w = bounds.width();
    let mut h = bounds.height();
    let (dx, dy) = (offset.x, offset.y);
    match marker {
        MARKER_BODY => {
            x += dx;
            y += dy;
        }
        1 => {
            // top-left
            if h - dy > 0.0 && w - dx > 0.0 {
                w -= dx;
                h -= dy;
                x += dx;
                y += dy;
            }
        }
        2 => {
            // top
            if h - dy > 0.0 {
                h -= dy;
                y += dy;
            }
        }
        3 => {
            // top-right
            if h - dy > 0.0 && w + dx > 0.0 {
                w += dx;
                h -= dy;
                y += dy;
            }
        }
        4 => {
            // right
            if w + dx > 0.0 {
                w += dx;
            }
        }
        5 => {
            // bottom-right
            if w + dx > 0.0 && h + dy > 0.0 {
                w += dx;
                h += dy;
            }
        }
        6 => {
            // bottom
            if h + dy > 0.0 {
                h += dy;
            }
        }
        7 => {
            // bottom-left
            if h + dy > 0.0 && w - dx > 0.0 {
                w -= dx;
                h += dy;
                x += dx;
            }
        }
        8 => {
            // left
            if w - dx > 0.0 {
                w -= dx;
                x += dx;
            }
        }
        _ => {}
    }
    Rect::new(x, y, x + w, y + h)
}

/// Remap points so each one keeps its fractional position within `old` when
/// placed inside `new`. Both rectangles come from [`calc_focus_rect`] over
/// inflated figure bounds, so their extents are never zero.
pub fn remap_bounds_relative(points: &[Point], old: Rect, new: Rect) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            Point::new(
                new.x0 + (p.x - old.x0) / old.width() * new.width(),
                new.y0 + (p.y - old.y0) / old.height() * new.height(),
            )
        })
        .collect()
}

/// Point sequence of `figure` after a whole-figure move by `offset`.
pub fn moved_points(figure: &Figure, offset: Vec2) -> Vec<Point> {
    let bounds = figure.bounds();
    let old = calc_focus_rect(Vec2::ZERO, bounds, MARKER_BODY);
    let new = calc_focus_rect(offset, bounds, MARKER_BODY);
    remap_bounds_relative(&figure.points, old, new)
}

/// Point sequence of `figure` after a bound-marker resize by `offset`.
pub fn resized_points(figure: &Figure, offset: Vec2, marker: i32) -> Vec<Point> {
    let bounds = figure.bounds();
    let old = calc_focus_rect(Vec2::ZERO, bounds, marker);
    let new = calc_focus_rect(offset, bounds, marker);
    remap_bounds_relative(&figure.points, old, new)
}

/// Point sequence of `figure` after dragging one node marker by `offset`.
/// The offset is added to that node alone; out-of-range markers leave the
/// points unchanged.
pub fn node_moved_points(figure: &Figure, offset: Vec2, marker: i32) -> Vec<Point> {
    let mut points = figure.points.clone();
    if let Some(index) = node_index_of(marker) {
        if index < points.len() {
            points[index] += offset;
        }
    }
    points
}
