// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Half-infinite rays in the XY plane.

use nalgebra::{Point2, Vector2};

use crate::error::{Error, Result};
use crate::line::Segment2;
use crate::EPSILON;

/// A ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    pub origin: Point2<f64>,
    pub direction: Vector2<f64>,
}

impl Ray2 {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Point2<f64>, direction: Vector2<f64>) -> Result<Self> {
        let len = direction.norm();
        if len < EPSILON {
            return Err(Error::ZeroLength);
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Intersects the ray with a closed segment.
    ///
    /// Only hits strictly in front of the origin count. A ray parallel to the
    /// segment never hits it, even when collinear.
    pub fn intersect_segment(&self, segment: &Segment2) -> Option<Point2<f64>> {
        let e = segment.end - segment.start;
        let d = self.direction;
        let denom = d.x * e.y - d.y * e.x;
        if denom.abs() < EPSILON * EPSILON {
            return None;
        }

        let rel = segment.start - self.origin;
        let t = (rel.x * e.y - rel.y * e.x) / denom;
        let s = (rel.x * d.y - rel.y * d.x) / denom;

        let seg_len = e.norm();
        let s_tol = if seg_len > 0.0 { EPSILON / seg_len } else { 0.0 };

        if t <= EPSILON || s < -s_tol || s > 1.0 + s_tol {
            return None;
        }

        Some(self.origin + d * t)
    }
}
