//! Point arithmetic shared by shapes, knobs and views.

use kurbo::{Point, Vec2};

/// Convenience operations on [`Point`] used throughout the editor.
pub trait PointExt {
    /// Vector from `self` to `to`.
    fn delta_to(self, to: Point) -> Vec2;

    /// A copy of this point translated by `delta`.
    fn moved_by(self, delta: Vec2) -> Point;
}

impl PointExt for Point {
    fn delta_to(self, to: Point) -> Vec2 {
        to - self
    }

    fn moved_by(self, delta: Vec2) -> Point {
        self + delta
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// A single point polyline degenerates to point distance; an empty one is infinitely far.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_and_move() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -2.0);
        let delta = a.delta_to(b);
        assert_eq!(delta, Vec2::new(3.0, -4.0));
        assert_eq!(a.moved_by(delta), b);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        // Beyond the end clamps to the endpoint
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
        // Degenerate segment
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!((point_to_polyline_dist(Point::new(12.0, 5.0), &pts) - 2.0).abs() < 1e-9);
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
        assert!((point_to_polyline_dist(Point::new(0.0, 1.0), &pts[..1]) - 1.0).abs() < 1e-9);
    }
}
