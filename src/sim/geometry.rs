//! 2D geometry primitives for boundary collision
//!
//! Line segments are stored as `tail -> head`. All functions are pure and
//! total over finite floats.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_EPSILON;

/// A line segment from `tail` to `head`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub tail: Vec2,
    pub head: Vec2,
}

impl Segment {
    pub fn new(tail: Vec2, head: Vec2) -> Self {
        Self { tail, head }
    }

    /// Same segment with endpoints ordered so that `tail.x < head.x`.
    ///
    /// Equal x (vertical segments) are swapped, so the result is still
    /// independent of the order the endpoints were supplied in.
    pub fn canonical(tail: Vec2, head: Vec2) -> Self {
        if tail.x < head.x {
            Self { tail, head }
        } else {
            Self {
                tail: head,
                head: tail,
            }
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.head - self.tail
    }

    /// Unit normal: `head - tail` rotated by +90°.
    ///
    /// Zero-length segments yield a zero normal.
    pub fn normal(&self) -> Vec2 {
        self.direction().perp().normalize_or_zero()
    }

    /// Whether `point` lies strictly inside the segment's x-span
    #[inline]
    pub fn spans_x(&self, point: Vec2) -> bool {
        (point.x > self.tail.x && point.x < self.head.x)
            || (point.x > self.head.x && point.x < self.tail.x)
    }

    /// Intersection point with another segment, if any
    pub fn intersection(&self, other: &Segment) -> Option<Vec2> {
        segment_intersection(self.tail, self.head, other.tail, other.head)
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box spanning two arbitrary corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Strict containment (points on the edge are outside)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.y > self.min.y && point.x < self.max.x && point.y < self.max.y
    }

    /// Containment with the box grown by `tolerance` on every side
    pub fn contains_with_tolerance(&self, point: Vec2, tolerance: f32) -> bool {
        let grown = Aabb {
            min: self.min - Vec2::splat(tolerance),
            max: self.max + Vec2::splat(tolerance),
        };
        grown.contains(point)
    }
}

/// 2D cross product (z component of the 3D cross)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Reflect a direction about a unit normal: `r = d - 2(d·n)n`
#[inline]
pub fn reflect(d: Vec2, normal: Vec2) -> Vec2 {
    d - 2.0 * d.dot(normal) * normal
}

/// `|x| + |y|`
#[inline]
pub fn length_manhattan(v: Vec2) -> f32 {
    v.x.abs() + v.y.abs()
}

/// Intersection of segments `p -> p_head` and `q -> q_head`
///
/// Parametric cross-product method. Segments whose direction cross product is
/// within `PARALLEL_EPSILON` of zero (parallel, collinear or degenerate) never
/// intersect. The returned point is `p + t·(p_head - p)`.
pub fn segment_intersection(p: Vec2, p_head: Vec2, q: Vec2, q_head: Vec2) -> Option<Vec2> {
    let r = p_head - p;
    let s = q_head - q;
    let r_cross_s = cross(r, s);
    if r_cross_s.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let q_minus_p = q - p;
    let t = cross(q_minus_p, s) / r_cross_s;
    let u = cross(q_minus_p, r) / r_cross_s;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p + t * r)
    } else {
        None
    }
}

/// Whether segments `p -> p_head` and `q -> q_head` cross
#[inline]
pub fn segments_cross(p: Vec2, p_head: Vec2, q: Vec2, q_head: Vec2) -> bool {
    segment_intersection(p, p_head, q, q_head).is_some()
}

/// Whether `point` is on the side of the segment's line that `normal` points to
#[inline]
pub fn is_above(segment: &Segment, normal: Vec2, point: Vec2) -> bool {
    normal.dot(point - segment.tail) > 0.0
}

/// Perpendicular distance from the segment's infinite line is below `tolerance`
#[inline]
pub fn near_line(segment: &Segment, normal: Vec2, point: Vec2, tolerance: f32) -> bool {
    normal.dot(segment.tail - point).abs() < tolerance
}

/// Within `tolerance` of the line and strictly inside the segment's x-span
pub fn near_segment(segment: &Segment, normal: Vec2, point: Vec2, tolerance: f32) -> bool {
    near_line(segment, normal, point, tolerance) && segment.spans_x(point)
}
