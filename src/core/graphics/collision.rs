//=========================================================================
// Collision
//=========================================================================
//
// 2D overlap tests between rectangles, circles, points, triangles,
// polygons and line segments. Rectangles are half-open: a point on the
// right or bottom edge is outside.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::Rect;

const PARALLEL_EPSILON: f32 = 1e-6;

//=== Shapes ==============================================================

pub fn check_recs(a: Rect, b: Rect) -> bool {
    a.intersects(&b)
}

/// Circles touching at one point collide.
pub fn check_circles(center1: Vec2, radius1: f32, center2: Vec2, radius2: f32) -> bool {
    center1.distance_squared(center2) <= (radius1 + radius2) * (radius1 + radius2)
}

pub fn check_circle_rec(center: Vec2, radius: f32, rec: Rect) -> bool {
    let half = rec.size() / 2.0;
    let d = (center - (rec.position() + half)).abs();

    if d.x > half.x + radius || d.y > half.y + radius {
        return false;
    }
    if d.x <= half.x || d.y <= half.y {
        return true;
    }

    (d - half).length_squared() <= radius * radius
}

/// Overlapping area of two rectangles, or an empty rect at the origin.
pub fn get_rec(a: Rect, b: Rect) -> Rect {
    if !check_recs(a, b) {
        return Rect::default();
    }
    let min = a.position().max(b.position());
    let max = (a.position() + a.size()).min(b.position() + b.size());
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

//=== Points ==============================================================

pub fn check_point_rec(point: Vec2, rec: Rect) -> bool {
    rec.contains(point)
}

pub fn check_point_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    check_circles(point, 0.0, center, radius)
}

/// Strictly inside; points on an edge do not collide.
pub fn check_point_triangle(point: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> bool {
    let denom = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }

    let alpha = ((p2.y - p3.y) * (point.x - p3.x) + (p3.x - p2.x) * (point.y - p3.y)) / denom;
    let beta = ((p3.y - p1.y) * (point.x - p3.x) + (p1.x - p3.x) * (point.y - p3.y)) / denom;
    let gamma = 1.0 - alpha - beta;

    alpha > 0.0 && beta > 0.0 && gamma > 0.0
}

/// Even-odd test against a closed polygon. Fewer than three vertices never
/// collide.
pub fn check_point_poly(point: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Within `threshold` pixels of the segment `p1`-`p2`.
pub fn check_point_line(point: Vec2, p1: Vec2, p2: Vec2, threshold: f32) -> bool {
    let line = p2 - p1;
    let length_sq = line.length_squared();
    let closest = if length_sq < PARALLEL_EPSILON {
        p1
    } else {
        let t = ((point - p1).dot(line) / length_sq).clamp(0.0, 1.0);
        p1 + line * t
    };
    point.distance_squared(closest) <= threshold * threshold
}

//=== Segments ============================================================

/// Intersection point of segments `start1`-`end1` and `start2`-`end2`.
///
/// Parallel segments never intersect, even when collinear.
pub fn check_lines(start1: Vec2, end1: Vec2, start2: Vec2, end2: Vec2) -> Option<Vec2> {
    let r = end1 - start1;
    let s = end2 - start2;
    let denom = r.perp_dot(s);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let offset = start2 - start1;
    let t = offset.perp_dot(s) / denom;
    let u = offset.perp_dot(r) / denom;

    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| start1 + r * t)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    //--- Shapes -----------------------------------------------------------

    #[test]
    fn recs_sharing_an_edge_do_not_collide() {
        assert!(check_recs(unit_square(), Rect::new(9.0, 9.0, 5.0, 5.0)));
        assert!(!check_recs(unit_square(), Rect::new(10.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn touching_circles_collide() {
        assert!(check_circles(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
        assert!(!check_circles(Vec2::ZERO, 1.0, Vec2::new(2.1, 0.0), 1.0));
    }

    #[test]
    fn circle_rec_edges_and_corners() {
        let rec = unit_square();

        // Overlapping the right edge.
        assert!(check_circle_rec(Vec2::new(12.0, 5.0), 2.5, rec));
        // Near a corner but outside the rounded region.
        assert!(!check_circle_rec(Vec2::new(12.0, 12.0), 2.5, rec));
        // Near a corner and within reach of it.
        assert!(check_circle_rec(Vec2::new(11.0, 11.0), 2.0, rec));
        // Centre inside.
        assert!(check_circle_rec(Vec2::new(5.0, 5.0), 0.1, rec));
    }

    #[test]
    fn get_rec_returns_overlap() {
        let overlap = get_rec(unit_square(), Rect::new(5.0, -5.0, 10.0, 10.0));
        assert_eq!(overlap, Rect::new(5.0, 0.0, 5.0, 5.0));

        assert_eq!(get_rec(unit_square(), Rect::new(20.0, 20.0, 1.0, 1.0)), Rect::default());
    }

    //--- Points -----------------------------------------------------------

    #[test]
    fn point_rec_is_half_open() {
        assert!(check_point_rec(Vec2::ZERO, unit_square()));
        assert!(!check_point_rec(Vec2::new(10.0, 5.0), unit_square()));
    }

    #[test]
    fn point_circle_boundary_collides() {
        assert!(check_point_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.0));
        assert!(!check_point_circle(Vec2::new(3.0, 4.1), Vec2::ZERO, 5.0));
    }

    #[test]
    fn point_triangle() {
        let (a, b, c) = (Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        assert!(check_point_triangle(Vec2::new(2.0, 2.0), a, b, c));
        assert!(!check_point_triangle(Vec2::new(6.0, 6.0), a, b, c));
        assert!(!check_point_triangle(Vec2::new(5.0, 0.0), a, b, c));
    }

    #[test]
    fn point_poly_concave() {
        // U shape opening upwards.
        let u = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 3.0),
            Vec2::new(0.0, 3.0),
        ];
        assert!(check_point_poly(Vec2::new(0.5, 2.0), &u));
        assert!(!check_point_poly(Vec2::new(1.5, 2.0), &u));
        assert!(!check_point_poly(Vec2::new(0.5, 0.5), &u[..2]));
    }

    #[test]
    fn point_line_threshold() {
        let (a, b) = (Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!(check_point_line(Vec2::new(5.0, 1.0), a, b, 1.0));
        assert!(!check_point_line(Vec2::new(5.0, 1.5), a, b, 1.0));
        // Past the end of the segment.
        assert!(!check_point_line(Vec2::new(12.0, 0.0), a, b, 1.0));
    }

    //--- Segments ---------------------------------------------------------

    #[test]
    fn crossing_lines_report_point() {
        let hit = check_lines(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        );
        assert_eq!(hit, Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn disjoint_and_parallel_lines_miss() {
        let short = check_lines(Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0));
        assert_eq!(short, None);

        let parallel = check_lines(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(10.0, 1.0));
        assert_eq!(parallel, None);
    }
}
