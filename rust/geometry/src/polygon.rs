// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated simple polygons in the XY plane.
//!
//! A [`Polygon`] can only be constructed from a closed, non-degenerate,
//! non-self-intersecting outline, so every consumer downstream (offset,
//! tessellation, cell extrusion) can rely on a positive area and a
//! well-defined winding.

use nalgebra::{Point2, Vector2};

use crate::error::{Error, Result};
use crate::line::Segment2;
use crate::EPSILON;

/// Minimum area threshold - polygons smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-8;

/// A closed simple polygon. The closing segment from the last vertex back to
/// the first is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2<f64>>,
}

impl Polygon {
    /// Creates a polygon from an outline.
    ///
    /// Consecutive duplicate points (within [`EPSILON`]) and a repeated
    /// closing point are dropped. Fails if fewer than three points remain,
    /// the area is zero, or two non-adjacent segments touch.
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self> {
        let mut vertices: Vec<Point2<f64>> = Vec::with_capacity(points.len());
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(Error::DegeneratePolygon(format!(
                    "non-finite coordinate ({}, {})",
                    p.x, p.y
                )));
            }
            match vertices.last() {
                Some(last) if (p - last).norm() < EPSILON => {}
                _ => vertices.push(p),
            }
        }
        while vertices.len() > 1 && (vertices[0] - vertices[vertices.len() - 1]).norm() < EPSILON
        {
            vertices.pop();
        }

        if vertices.len() < 3 {
            return Err(Error::DegeneratePolygon(format!(
                "{} distinct vertices, at least 3 required",
                vertices.len()
            )));
        }

        let polygon = Self { vertices };

        let area = polygon.signed_area().abs();
        if area < MIN_AREA_THRESHOLD {
            return Err(Error::DegeneratePolygon(format!("zero area ({area:e})")));
        }

        if let Some((i, j)) = polygon.first_self_intersection() {
            return Err(Error::SelfIntersecting(i, j));
        }

        Ok(polygon)
    }

    /// Creates a polygon from `[x, y]` pairs.
    pub fn from_coords(coords: &[[f64; 2]]) -> Result<Self> {
        Self::new(coords.iter().map(|c| Point2::new(c[0], c[1])).collect())
    }

    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed area (shoelace). Positive = counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        compute_signed_area(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns the polygon with counter-clockwise winding.
    pub fn to_ccw(&self) -> Polygon {
        if self.is_ccw() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// Returns the polygon with its winding reversed.
    pub fn reversed(&self) -> Polygon {
        Self {
            vertices: self.vertices.iter().rev().copied().collect(),
        }
    }

    /// Area centroid.
    pub fn centroid(&self) -> Point2<f64> {
        let n = self.vertices.len();
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut twice_area = 0.0;
        for i in 0..n {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            twice_area += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        let factor = 1.0 / (3.0 * twice_area);
        Point2::new(cx * factor, cy * factor)
    }

    /// Boundary segments in winding order; segment `i` runs from vertex `i`
    /// to vertex `i + 1`.
    pub fn segments(&self) -> Vec<Segment2> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Segment2::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Index of the longest boundary segment. Among segments of equal
    /// maximal length the last one wins.
    pub fn longest_segment_index(&self) -> usize {
        let mut best = 0;
        let mut best_len = f64::MIN;
        for (i, seg) in self.segments().iter().enumerate() {
            let len = seg.length();
            if len >= best_len {
                best = i;
                best_len = len;
            }
        }
        best
    }

    /// The longest boundary segment (see [`Polygon::longest_segment_index`]).
    pub fn longest_segment(&self) -> Segment2 {
        self.segments()[self.longest_segment_index()]
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for p in self.vertices.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Check if a point is inside the polygon using ray casting
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = &self.vertices[i];
            let pj = &self.vertices[j];
            if ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Mitred parallel offset. Positive distances grow the polygon, negative
    /// distances shrink it. The result is counter-clockwise.
    ///
    /// Fails when an inward offset collapses an edge, flips the outline or
    /// makes it self-intersect.
    pub fn offset(&self, distance: f64) -> Result<Polygon> {
        let ccw = self.to_ccw();
        let n = ccw.vertices.len();

        let mut dirs: Vec<Vector2<f64>> = Vec::with_capacity(n);
        for seg in ccw.segments() {
            dirs.push(seg.direction().ok_or(Error::ZeroLength)?);
        }

        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let d0 = dirs[prev];
            let d1 = dirs[i];
            // Outward normal of a CCW edge is its right-hand normal
            let n0 = Vector2::new(d0.y, -d0.x);
            let n1 = Vector2::new(d1.y, -d1.x);
            let p = ccw.vertices[i];
            let a = p + n0 * distance;
            let b = p + n1 * distance;

            let cross = d0.x * d1.y - d0.y * d1.x;
            if cross.abs() < EPSILON {
                out.push(b);
                continue;
            }
            let rel = b - a;
            let t = (rel.x * d1.y - rel.y * d1.x) / cross;
            out.push(a + d0 * t);
        }

        let result = Polygon::new(out)
            .map_err(|e| Error::InvalidOffset(format!("offset {distance} collapsed: {e}")))?;

        if !result.is_ccw() {
            return Err(Error::InvalidOffset(format!(
                "offset {distance} flipped the outline"
            )));
        }
        if result.len() != n {
            return Err(Error::InvalidOffset(format!(
                "offset {distance} collapsed an edge"
            )));
        }
        for (seg, dir) in result.segments().iter().zip(&dirs) {
            match seg.direction() {
                Some(d) if d.dot(dir) > 0.0 => {}
                _ => {
                    return Err(Error::InvalidOffset(format!(
                        "offset {distance} reversed an edge"
                    )))
                }
            }
        }

        Ok(result)
    }

    /// Returns the vertices as `[x, y]` pairs.
    pub fn to_coords(&self) -> Vec<[f64; 2]> {
        self.vertices.iter().map(|p| [p.x, p.y]).collect()
    }

    fn first_self_intersection(&self) -> Option<(usize, usize)> {
        let segments = self.segments();
        let n = segments.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                if segments[i].intersects(&segments[j]) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Simplify a contour by removing collinear points
pub fn simplify_contour(contour: &[Point2<f64>], epsilon: f64) -> Vec<Point2<f64>> {
    if contour.len() <= 3 {
        return contour.to_vec();
    }

    let mut result = Vec::with_capacity(contour.len());
    let n = contour.len();

    for i in 0..n {
        let prev = &contour[(i + n - 1) % n];
        let curr = &contour[i];
        let next = &contour[(i + 1) % n];

        let cross = (curr.x - prev.x) * (next.y - prev.y) - (curr.y - prev.y) * (next.x - prev.x);

        if cross.abs() > epsilon {
            result.push(*curr);
        }
    }

    if result.len() < 3 {
        return contour.to_vec();
    }

    result
}
