// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight segments in the plane and in space.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::EPSILON;

/// A directed segment in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment2 {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end, or `None` for a zero-length segment.
    pub fn direction(&self) -> Option<Vector2<f64>> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < EPSILON {
            return None;
        }
        Some(d / len)
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::from((self.start.coords + self.end.coords) * 0.5)
    }

    /// Perpendicular distance from `point` to the infinite line through
    /// this segment.
    pub fn distance_to_line(&self, point: &Point2<f64>) -> Option<f64> {
        let d = self.direction()?;
        let rel = point - self.start;
        Some((rel.x * d.y - rel.y * d.x).abs())
    }

    /// Returns `true` if the two segments share at least one point.
    pub fn intersects(&self, other: &Segment2) -> bool {
        let o1 = orientation(&self.start, &self.end, &other.start);
        let o2 = orientation(&self.start, &self.end, &other.end);
        let o3 = orientation(&other.start, &other.end, &self.start);
        let o4 = orientation(&other.start, &other.end, &self.end);

        if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
            return true;
        }

        (o1 == 0.0 && on_segment(&self.start, &self.end, &other.start))
            || (o2 == 0.0 && on_segment(&self.start, &self.end, &other.end))
            || (o3 == 0.0 && on_segment(&other.start, &other.end, &self.start))
            || (o4 == 0.0 && on_segment(&other.start, &other.end, &self.end))
    }
}

/// Signed orientation of `c` relative to the line `a -> b`, snapped to zero
/// within tolerance.
fn orientation(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross.abs() < EPSILON * EPSILON {
        0.0
    } else {
        cross.signum()
    }
}

fn on_segment(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

/// A segment in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end, or `None` for a zero-length line.
    pub fn direction(&self) -> Option<Vector3<f64>> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < EPSILON {
            return None;
        }
        Some(d / len)
    }

    /// Plumb test: both endpoints share X and Y within `tolerance` and differ
    /// in Z by more than it.
    pub fn is_vertical(&self, tolerance: f64) -> bool {
        (self.start.x - self.end.x).abs() <= tolerance
            && (self.start.y - self.end.y).abs() <= tolerance
            && (self.start.z - self.end.z).abs() > tolerance
    }

    /// Elevation of the lower endpoint.
    pub fn min_z(&self) -> f64 {
        self.start.z.min(self.end.z)
    }

    /// The endpoint with the lower elevation.
    pub fn lower_point(&self) -> Point3<f64> {
        if self.end.z < self.start.z {
            self.end
        } else {
            self.start
        }
    }

    /// The endpoint with the higher elevation.
    pub fn upper_point(&self) -> Point3<f64> {
        if self.end.z < self.start.z {
            self.start
        } else {
            self.end
        }
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: &Vector3<f64>) -> Line {
        Line::new(self.start + offset, self.end + offset)
    }
}

/// Unsigned angle between two vectors, in degrees.
///
/// Returns 0.0 when either vector has zero length.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < EPSILON * EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}
