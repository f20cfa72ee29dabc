//! Marker geometry and the signed marker-index encoding.
//!
//! A marker index is the single channel through which the interaction state
//! machine and the transform functions agree on what is being dragged:
//! `0` is the whole figure, `1..=8` are the bounding-box handles clockwise
//! from top-left (TL, T, TR, R, BR, B, BL, L), and `-(i+1)` is node `i` of
//! the figure's point sequence.

use crate::figure::Figure;
use kurbo::{Point, Rect};

/// Marker index for dragging the whole figure.
pub const MARKER_BODY: i32 = 0;

/// Half-extent of a marker hit square.
const MARKER_HALF_EXTENT: f64 = 3.0;

/// Bounds at or below this extent are inflated before placing handles.
const THIN_BOUNDS_EXTENT: f64 = 10.0;
const THIN_BOUNDS_INFLATE: f64 = 5.0;

/// Encode node `i` (0-based) as a marker index.
pub fn node_marker_index(i: usize) -> i32 {
    -(i as i32 + 1)
}

/// Decode a marker index into a node index, if it names one.
pub fn node_index_of(marker: i32) -> Option<usize> {
    (marker < 0).then(|| (-marker - 1) as usize)
}

/// One small square per figure point, centered on the point.
pub fn node_marker_rects(figure: &Figure) -> Vec<Rect> {
    figure
        .points
        .iter()
        .map(|p| {
            Rect::new(
                p.x - MARKER_HALF_EXTENT,
                p.y - MARKER_HALF_EXTENT,
                p.x + MARKER_HALF_EXTENT,
                p.y + MARKER_HALF_EXTENT,
            )
        })
        .collect()
}

/// The eight resize handles at the corners and edge midpoints of `bounds`.
///
/// Thin bounds are inflated on the thin axis so the handles do not overlap,
/// and edge-midpoint handles shrink to a 1-unit hit radius on an axis whose
/// remaining extent is small, keeping them from swallowing the corners.
pub fn bound_marker_rects(bounds: Rect) -> [Rect; 8] {
    let mut rect = bounds;
    if rect.width() <= THIN_BOUNDS_EXTENT {
        rect = rect.inflate(THIN_BOUNDS_INFLATE, 0.0);
    }
    if rect.height() <= THIN_BOUNDS_EXTENT {
        rect = rect.inflate(0.0, THIN_BOUNDS_INFLATE);
    }
    let cx = rect.x0 + rect.width() * 0.5;
    let cy = rect.y0 + rect.height() * 0.5;
    let pts = [
        Point::new(rect.x0, rect.y0), // 1: top-left
        Point::new(cx, rect.y0),      // 2: top
        Point::new(rect.x1, rect.y0), // 3: top-right
        Point::new(rect.x1, cy),      // 4: right
        Point::new(rect.x1, rect.y1), // 5: bottom-right
        Point::new(cx, rect.y1),      // 6: bottom
        Point::new(rect.x0, rect.y1), // 7: bottom-left
        Point::new(rect.x0, cy),      // 8: left
    ];
    let shrunk = rect.inflate(-THIN_BOUNDS_INFLATE, -THIN_BOUNDS_INFLATE);
    let mut rects = [Rect::ZERO; 8];
    for (i, pt) in pts.iter().enumerate() {
        let k = if shrunk.width() <= 5.0 && (i == 1 || i == 5) {
            1.0
        } else if shrunk.height() <= 5.0 && (i == 3 || i == 7) {
            1.0
        } else {
            MARKER_HALF_EXTENT
        };
        rects[i] = Rect::new(pt.x - k, pt.y - k, pt.x + k, pt.y + k);
    }
    rects
}

/// Resolve which marker of `figure` lies under `point`.
///
/// In node-changing mode only node markers are tested, index ascending;
/// otherwise the eight bound markers are tested in order 1..=8. Ties are
/// broken by first match in enumeration order, never by proximity.
pub fn resolve_marker(point: Point, figure: &Figure, node_changing: bool) -> Option<i32> {
    if node_changing {
        for (i, rect) in node_marker_rects(figure).iter().enumerate() {
            if rect.contains(point) {
                return Some(node_marker_index(i));
            }
        }
    } else {
        for (i, rect) in bound_marker_rects(figure.bounds()).iter().enumerate() {
            if rect.contains(point) {
                return Some(i as i32 + 1);
            }
        }
    }
    None
}

/// Pointer glyph shown while hovering a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorGlyph {
    #[default]
    Default,
    /// Whole-figure hover.
    Move,
    /// Diagonal resize, top-left/bottom-right.
    SizeNwse,
    /// Diagonal resize, top-right/bottom-left.
    SizeNesw,
    /// Vertical resize.
    SizeNs,
    /// Horizontal resize.
    SizeWe,
}

/// Glyph for a resolved marker index over a figure.
pub fn cursor_for_marker(marker: i32) -> CursorGlyph {
    match marker {
        1 | 5 => CursorGlyph::SizeNwse,
        3 | 7 => CursorGlyph::SizeNesw,
        2 | 6 => CursorGlyph::SizeNs,
        4 | 8 => CursorGlyph::SizeWe,
        _ => CursorGlyph::Move,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::FigureKind;

    fn square(size: f64) -> Figure {
        Figure::new(
            FigureKind::Polygon,
            vec![
                Point::new(0.0, 0.0),
                Point::new(size, 0.0),
                Point::new(size, size),
                Point::new(0.0, size),
            ],
        )
    }

    #[test]
    fn test_bound_marker_positions() {
        let rects = bound_marker_rects(Rect::new(0.0, 0.0, 100.0, 50.0));
        // Top-left handle is centered on the corner.
        assert!((rects[0].center().x - 0.0).abs() < f64::EPSILON);
        assert!((rects[0].center().y - 0.0).abs() < f64::EPSILON);
        // Right handle sits on the edge midpoint.
        assert!((rects[3].center().x - 100.0).abs() < f64::EPSILON);
        assert!((rects[3].center().y - 25.0).abs() < f64::EPSILON);
        // Bottom handle.
        assert!((rects[5].center().x - 50.0).abs() < f64::EPSILON);
        assert!((rects[5].center().y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_thin_bounds_inflated() {
        let rects = bound_marker_rects(Rect::new(10.0, 0.0, 14.0, 100.0));
        // Width is 4, inflated by 5 per side before placing handles.
        assert!((rects[0].center().x - 5.0).abs() < f64::EPSILON);
        assert!((rects[2].center().x - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_midpoint_handles_shrink_on_sliver() {
        // Width 4 inflates to 14, then deflating by 10 leaves 4 <= 5, so the
        // top/bottom midpoint handles shrink to a 1-unit half extent.
        let rects = bound_marker_rects(Rect::new(0.0, 0.0, 4.0, 100.0));
        assert!((rects[1].width() - 2.0).abs() < f64::EPSILON);
        assert!((rects[5].width() - 2.0).abs() < f64::EPSILON);
        // Corners keep the full extent.
        assert!((rects[0].width() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_bound_marker() {
        let fig = square(100.0);
        assert_eq!(resolve_marker(Point::new(0.0, 0.0), &fig, false), Some(1));
        assert_eq!(resolve_marker(Point::new(50.0, 0.0), &fig, false), Some(2));
        assert_eq!(
            resolve_marker(Point::new(100.0, 100.0), &fig, false),
            Some(5)
        );
        assert_eq!(resolve_marker(Point::new(0.0, 50.0), &fig, false), Some(8));
        assert_eq!(resolve_marker(Point::new(50.0, 50.0), &fig, false), None);
    }

    #[test]
    fn test_resolve_node_marker() {
        let fig = square(100.0);
        assert_eq!(resolve_marker(Point::new(0.0, 0.0), &fig, true), Some(-1));
        assert_eq!(
            resolve_marker(Point::new(100.0, 100.0), &fig, true),
            Some(-3)
        );
        assert_eq!(resolve_marker(Point::new(50.0, 50.0), &fig, true), None);
    }

    #[test]
    fn test_first_match_wins() {
        // Two nodes close enough that their hit squares overlap: the lower
        // index in enumeration order wins, not the nearer one.
        let fig = Figure::new(
            FigureKind::Polyline,
            vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)],
        );
        let hit = resolve_marker(Point::new(1.5, 0.0), &fig, true);
        assert_eq!(hit, Some(-1));
    }

    #[test]
    fn test_node_index_encoding() {
        assert_eq!(node_marker_index(0), -1);
        assert_eq!(node_marker_index(4), -5);
        assert_eq!(node_index_of(-1), Some(0));
        assert_eq!(node_index_of(-5), Some(4));
        assert_eq!(node_index_of(0), None);
        assert_eq!(node_index_of(3), None);
    }

    #[test]
    fn test_cursor_glyphs() {
        assert_eq!(cursor_for_marker(1), CursorGlyph::SizeNwse);
        assert_eq!(cursor_for_marker(5), CursorGlyph::SizeNwse);
        assert_eq!(cursor_for_marker(3), CursorGlyph::SizeNesw);
        assert_eq!(cursor_for_marker(2), CursorGlyph::SizeNs);
        assert_eq!(cursor_for_marker(4), CursorGlyph::SizeWe);
        assert_eq!(cursor_for_marker(MARKER_BODY), CursorGlyph::Move);
    }
}
