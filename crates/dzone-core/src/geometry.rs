//! Planar geometry helpers: angle math, hull triangles, bounding circles,
//! and the separating-axis overlap check used for tank hulls.
//!
//! Degenerate input (zero-length vectors, empty polygons) yields a neutral
//! result instead of NaN.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

/// Lengths below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

/// Unit vector in the direction of `v`, or the zero vector if `v` is degenerate.
pub fn normalize_or_zero(v: DVec2) -> DVec2 {
    let len = v.length();
    if len < EPSILON || !len.is_finite() {
        DVec2::ZERO
    } else {
        v / len
    }
}

/// Wrap an angle into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in [-π, π].
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let mut diff = (to - from).rem_euclid(TAU);
    if diff > PI {
        diff -= TAU;
    }
    diff
}

/// Heading of `v` in [0, 2π). Zero vectors face angle 0.
pub fn heading(v: DVec2) -> f64 {
    if v.length_squared() < EPSILON * EPSILON {
        return 0.0;
    }
    normalize_angle(v.y.atan2(v.x))
}

/// Rotate `v` by `angle` radians.
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(v)
}

/// Forward-pointing isosceles triangle for a hull of `size` at `position`
/// facing `angle`: nose, back-left, back-right.
pub fn tank_triangle(position: DVec2, angle: f64, size: f64) -> [DVec2; 3] {
    let local = [
        DVec2::new(size * 0.75, 0.0),
        DVec2::new(-size * 0.5, size * 0.4),
        DVec2::new(-size * 0.5, -size * 0.4),
    ];
    local.map(|p| position + rotate(p, angle))
}

/// Radius of the circle around `tank_triangle` centered on the hull position.
pub fn hull_radius(size: f64) -> f64 {
    size * 0.75
}

/// True if two circles overlap.
pub fn circles_intersect(a: DVec2, radius_a: f64, b: DVec2, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Even-odd point-in-polygon test. Polygons with fewer than 3 vertices contain nothing.
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Project every vertex onto `axis`, returning (min, max).
fn project(polygon: &[DVec2], axis: DVec2) -> (f64, f64) {
    polygon
        .iter()
        .map(|p| p.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}

/// Separating-axis test for two convex polygons.
pub fn polygons_intersect(a: &[DVec2], b: &[DVec2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    for polygon in [a, b] {
        for i in 0..polygon.len() {
            let edge = polygon[(i + 1) % polygon.len()] - polygon[i];
            let axis = normalize_or_zero(edge.perp());
            if axis == DVec2::ZERO {
                continue;
            }
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}
