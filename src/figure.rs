//! Figure definition: a polygon or polyline with stroke and fill.

use crate::style::{Fill, Stroke};
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for figures.
pub type FigureId = Uuid;

/// Margin added on a degenerate bounds axis so resize markers stay usable.
const DEGENERATE_BOUNDS_MARGIN: f64 = 2.0;

/// Pick tolerance for polylines is the stroke width times this factor.
pub(crate) const POLYLINE_PICK_FACTOR: f64 = 5.0;

/// The two figure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FigureKind {
    /// Closed region; filled, requires at least 3 points.
    Polygon,
    /// Open point chain; stroke only, requires at least 2 points.
    Polyline,
}

impl FigureKind {
    /// Smallest point count a figure of this kind may shrink to.
    pub fn min_points(self) -> usize {
        match self {
            FigureKind::Polygon => 3,
            FigureKind::Polyline => 2,
        }
    }
}

/// A drawable figure: an ordered point sequence plus style.
///
/// Points are stored in drawing order. The document owns every live figure;
/// selection and clipboard refer to figures by [`FigureId`] or hold copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub id: FigureId,
    pub kind: FigureKind,
    pub points: Vec<Point>,
    pub stroke: Stroke,
    pub fill: Fill,
}

impl Figure {
    /// Create a figure with default style.
    pub fn new(kind: FigureKind, points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points,
            stroke: Stroke::default(),
            fill: Fill::default(),
        }
    }

    /// Give the figure a fresh identity, used when pasting copies.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Smallest enclosing rectangle over the points.
    ///
    /// A near-zero extent on either axis is inflated by a fixed margin so
    /// the eight resize markers do not collapse onto each other.
    pub fn bounds(&self) -> Rect {
        let (min_x, max_x) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.x), mx.max(p.x)));
        let (min_y, max_y) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.y), mx.max(p.y)));
        let mut rect = Rect::new(min_x, min_y, max_x, max_y);
        if rect.width().abs() < f64::EPSILON {
            rect.x0 -= DEGENERATE_BOUNDS_MARGIN;
            rect.x1 += DEGENERATE_BOUNDS_MARGIN;
        }
        if rect.height().abs() < f64::EPSILON {
            rect.y0 -= DEGENERATE_BOUNDS_MARGIN;
            rect.y1 += DEGENERATE_BOUNDS_MARGIN;
        }
        rect
    }

    /// Check whether a point hits this figure.
    ///
    /// Polygons use even-odd containment of the closed region. Polylines hit
    /// when the point is within `stroke.width * 5` of any segment, a
    /// deliberately generous pick distance.
    pub fn point_inside(&self, point: Point) -> bool {
        match self.kind {
            FigureKind::Polygon => polygon_contains(&self.points, point),
            FigureKind::Polyline => {
                point_to_polyline_dist(point, &self.points)
                    <= self.stroke.width * POLYLINE_PICK_FACTOR
            }
        }
    }

    /// Translate every point by a constant vector.
    pub fn offset(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    /// Mirror across the vertical center line of the figure's own bounds
    /// (swaps left and right).
    pub fn flip_horizontal(&mut self) {
        let cx = self.bounds().center().x;
        for p in &mut self.points {
            p.x = 2.0 * cx - p.x;
        }
    }

    /// Mirror across the horizontal center line of the figure's own bounds
    /// (swaps top and bottom).
    pub fn flip_vertical(&mut self) {
        let cy = self.bounds().center().y;
        for p in &mut self.points {
            p.y = 2.0 * cy - p.y;
        }
    }

    /// Rotate about the figure's own bounding-box center.
    pub fn rotate(&mut self, angle_degrees: f64) {
        let center = self.bounds().center();
        self.rotate_at(angle_degrees, center.x, center.y);
    }

    /// Rotate every point about an arbitrary pivot.
    ///
    /// The point sequence is replaced with the rotated result; repeated
    /// rotations accumulate floating-point error.
    pub fn rotate_at(&mut self, angle_degrees: f64, cx: f64, cy: f64) {
        let pivot = Vec2::new(cx, cy);
        let rotation = Affine::translate(pivot)
            * Affine::rotate(angle_degrees.to_radians())
            * Affine::translate(-pivot);
        for p in &mut self.points {
            *p = rotation * *p;
        }
    }

    /// Path representation for rendering; closed for polygons.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.points.len() < 2 {
            return path;
        }
        path.move_to(self.points[0]);
        for p in &self.points[1..] {
            path.line_to(*p);
        }
        if self.kind == FigureKind::Polygon {
            path.close_path();
        }
        path
    }

    /// Structural equality: kind, points, stroke and fill, ignoring identity.
    pub fn same_shape(&self, other: &Figure) -> bool {
        self.kind == other.kind
            && self.points == other.points
            && self.stroke == other.stroke
            && self.fill == other.fill
    }
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    point.distance(proj)
}

/// Minimum distance from a point to an open polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd ray-crossing containment test for a closed polygon.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Figure {
        Figure::new(
            FigureKind::Polygon,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        )
    }

    fn assert_points_close(a: &[Point], b: &[Point], eps: f64) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            assert!(
                (p.x - q.x).abs() < eps && (p.y - q.y).abs() < eps,
                "{p:?} != {q:?}"
            );
        }
    }

    #[test]
    fn test_bounds() {
        let fig = square();
        let bounds = fig.bounds();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_bounds_inflated() {
        // Vertical line has zero width; bounds gain a 2-unit margin per side.
        let fig = Figure::new(
            FigureKind::Polyline,
            vec![Point::new(5.0, 0.0), Point::new(5.0, 20.0)],
        );
        let bounds = fig.bounds();
        assert!((bounds.x0 - 3.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 7.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polygon_containment() {
        let fig = square();
        assert!(fig.point_inside(Point::new(5.0, 5.0)));
        assert!(!fig.point_inside(Point::new(50.0, 50.0)));
        assert!(!fig.point_inside(Point::new(-1.0, 5.0)));
    }

    #[test]
    fn test_polyline_pick_tolerance() {
        let mut fig = Figure::new(
            FigureKind::Polyline,
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        );
        fig.stroke.width = 1.0;
        // Tolerance is width * 5.
        assert!(fig.point_inside(Point::new(50.0, 4.0)));
        assert!(!fig.point_inside(Point::new(50.0, 6.0)));
    }

    #[test]
    fn test_offset() {
        let mut fig = square();
        fig.offset(Vec2::new(3.0, -2.0));
        assert_eq!(fig.points[0], Point::new(3.0, -2.0));
        assert_eq!(fig.points[2], Point::new(13.0, 8.0));
    }

    #[test]
    fn test_flip_horizontal_swaps_left_right() {
        let mut fig = Figure::new(
            FigureKind::Polygon,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ],
        );
        fig.flip_horizontal();
        assert_points_close(
            &fig.points,
            &[
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(10.0, 10.0),
            ],
            1e-9,
        );
    }

    #[test]
    fn test_flip_involution() {
        let original = square();
        let mut fig = original.clone();
        fig.flip_horizontal();
        fig.flip_horizontal();
        assert_points_close(&fig.points, &original.points, 1e-9);
        fig.flip_vertical();
        fig.flip_vertical();
        assert_points_close(&fig.points, &original.points, 1e-9);
    }

    #[test]
    fn test_point_on_flip_axis_unchanged() {
        let mut fig = square();
        fig.points.push(Point::new(5.0, 5.0));
        fig.flip_horizontal();
        let center = *fig.points.last().unwrap();
        assert!((center.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_closure() {
        let original = square();
        let mut fig = original.clone();
        for _ in 0..4 {
            fig.rotate(90.0);
        }
        assert_points_close(&fig.points, &original.points, 1e-6);
    }

    #[test]
    fn test_rotate_at_pivot() {
        let mut fig = Figure::new(
            FigureKind::Polyline,
            vec![Point::new(10.0, 0.0), Point::new(20.0, 0.0)],
        );
        fig.rotate_at(90.0, 0.0, 0.0);
        assert_points_close(
            &fig.points,
            &[Point::new(0.0, 10.0), Point::new(0.0, 20.0)],
            1e-9,
        );
    }

    #[test]
    fn test_polygon_path_is_closed() {
        let fig = square();
        let svg = fig.to_path().to_svg();
        assert!(svg.ends_with('Z'));
    }

    #[test]
    fn test_same_shape_ignores_id() {
        let fig = square();
        let mut copy = fig.clone();
        copy.regenerate_id();
        assert_ne!(fig.id, copy.id);
        assert!(fig.same_shape(&copy));
    }
}
