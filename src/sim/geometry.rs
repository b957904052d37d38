//! Exact integer segment geometry
//!
//! Walls and car paths are straight segments between grid points. Every test
//! here is exact: no floating point, no epsilon. Cross products are widened to
//! i128 so any pair of `i32` points is safe.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Check whether `p` lies inside the bounding box of `a`-`b` (inclusive)
///
/// Only meaningful once `p` is known to be collinear with the segment.
#[inline]
pub fn point_on_segment(p: IVec2, a: IVec2, b: IVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Orientation of the triple (p, q, r)
///
/// Sign of `(q.y - p.y)(r.x - q.x) - (q.x - p.x)(r.y - q.y)`: positive is
/// clockwise, negative counter-clockwise.
pub fn orientation(p: IVec2, q: IVec2, r: IVec2) -> Orientation {
    let dy1 = i128::from(i64::from(q.y) - i64::from(p.y));
    let dx2 = i128::from(i64::from(r.x) - i64::from(q.x));
    let dx1 = i128::from(i64::from(q.x) - i64::from(p.x));
    let dy2 = i128::from(i64::from(r.y) - i64::from(q.y));

    match (dy1 * dx2 - dx1 * dy2).signum() {
        0 => Orientation::Collinear,
        1 => Orientation::Clockwise,
        _ => Orientation::CounterClockwise,
    }
}

/// Check whether segment p1-q1 intersects segment p2-q2
///
/// Touching endpoints and collinear overlap both count as intersections.
pub fn segments_intersect(p1: IVec2, q1: IVec2, p2: IVec2, q2: IVec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General position: each segment straddles the other's line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear special cases, each checked on its own
    (o1 == Orientation::Collinear && point_on_segment(p2, p1, q1))
        || (o2 == Orientation::Collinear && point_on_segment(q2, p1, q1))
        || (o3 == Orientation::Collinear && point_on_segment(p1, p2, q2))
        || (o4 == Orientation::Collinear && point_on_segment(q1, p2, q2))
}

/// Check whether `p` lies in `[0, width) x [0, height)`
#[inline]
pub fn in_bounds(p: IVec2, width: i32, height: i32) -> bool {
    p.x >= 0 && p.x < width && p.y >= 0 && p.y < height
}
