// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis grids.
//!
//! A [`Grid1d`] is a directed segment divided by ordered separators. Two of
//! them form a [`Grid2d`], which tessellates a footprint polygon into
//! per-tile outlines using 2D boolean intersection (`i_overlay`).

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::{Point2, Vector2};

use crate::error::{Error, Result};
use crate::polygon::{simplify_contour, Polygon};
use crate::EPSILON;

/// Where the leftover length goes when dividing by a fixed span length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixedDivisionMode {
    /// Full spans from the start, remainder as a short last span.
    #[default]
    RemainderAtEnd,
    /// Remainder as a short first span, full spans after it.
    RemainderAtStart,
    /// Remainder split equally into a short first and last span.
    RemainderAtBothEnds,
}

/// A directed segment subdivided into spans.
///
/// Separator parameters are distances from the start, strictly increasing,
/// and always include `0.0` and the full length.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1d {
    start: Point2<f64>,
    direction: Vector2<f64>,
    length: f64,
    parameters: Vec<f64>,
}

impl Grid1d {
    /// Creates an undivided grid from `start` to `end`.
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Result<Self> {
        let d = end - start;
        let length = d.norm();
        if length < EPSILON {
            return Err(Error::ZeroLength);
        }
        Ok(Self {
            start,
            direction: d / length,
            length,
            parameters: vec![0.0, length],
        })
    }

    pub fn start(&self) -> Point2<f64> {
        self.start
    }

    pub fn end(&self) -> Point2<f64> {
        self.point_at(self.length)
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Separator distances from the start, including both ends.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.start + self.direction * t
    }

    /// Separator points, including both ends.
    pub fn separators(&self) -> Vec<Point2<f64>> {
        self.parameters.iter().map(|&t| self.point_at(t)).collect()
    }

    pub fn span_count(&self) -> usize {
        self.parameters.len() - 1
    }

    /// Length of the longest span.
    pub fn longest_span(&self) -> f64 {
        self.parameters
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(0.0, f64::max)
    }

    /// Divides into `count` equal spans.
    pub fn divide_by_count(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(Error::InvalidGrid("span count must be at least 1".into()));
        }
        let step = self.length / count as f64;
        let mut parameters: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();
        parameters.push(self.length);
        self.parameters = parameters;
        Ok(())
    }

    /// Divides into spans of `span` length, placing the remainder per `mode`.
    ///
    /// A grid shorter than one span is left undivided.
    pub fn divide_by_fixed_length(&mut self, span: f64, mode: FixedDivisionMode) -> Result<()> {
        if !span.is_finite() || span < EPSILON {
            return Err(Error::InvalidGrid(format!(
                "fixed span length must be positive, got {span}"
            )));
        }

        let full = ((self.length + EPSILON) / span).floor() as usize;
        let remainder = self.length - full as f64 * span;
        if full == 0 {
            self.parameters = vec![0.0, self.length];
            return Ok(());
        }

        let lead = if remainder < EPSILON {
            0.0
        } else {
            match mode {
                FixedDivisionMode::RemainderAtEnd => 0.0,
                FixedDivisionMode::RemainderAtStart => remainder,
                FixedDivisionMode::RemainderAtBothEnds => remainder / 2.0,
            }
        };

        let mut parameters = vec![0.0];
        for i in 0..=full {
            let t = lead + i as f64 * span;
            if t > EPSILON && t < self.length - EPSILON {
                parameters.push(t);
            }
        }
        parameters.push(self.length);
        self.parameters = parameters;
        Ok(())
    }
}

/// One tile of a tessellated footprint.
#[derive(Debug, Clone)]
pub struct GridCell {
    /// Span index along U.
    pub u_index: usize,
    /// Span index along V.
    pub v_index: usize,
    /// The footprint trimmed to this tile; counter-clockwise.
    pub polygons: Vec<Polygon>,
}

/// A planar grid spanned by a U and a V axis.
///
/// The origin is the start of U. V parameters are measured from V's own
/// start, so V may begin anywhere along the U line.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d {
    u: Grid1d,
    v: Grid1d,
    v_offset: f64,
    det: f64,
}

impl Grid2d {
    /// Creates a grid from two axes. Fails if the axes are parallel.
    pub fn new(u: Grid1d, v: Grid1d) -> Result<Self> {
        let du = u.direction();
        let dv = v.direction();
        let det = du.x * dv.y - du.y * dv.x;
        if det.abs() < EPSILON {
            return Err(Error::InvalidGrid("U and V axes are parallel".into()));
        }
        let mut grid = Self {
            u,
            v,
            v_offset: 0.0,
            det,
        };
        grid.v_offset = grid.to_local(&grid.v.start()).1;
        Ok(grid)
    }

    pub fn u(&self) -> &Grid1d {
        &self.u
    }

    pub fn v(&self) -> &Grid1d {
        &self.v
    }

    pub fn origin(&self) -> Point2<f64> {
        self.u.start()
    }

    /// Coordinates of `p` in the (U, V) frame, measured from the origin.
    pub fn to_local(&self, p: &Point2<f64>) -> (f64, f64) {
        let r = p - self.origin();
        let du = self.u.direction();
        let dv = self.v.direction();
        let a = (r.x * dv.y - r.y * dv.x) / self.det;
        let b = (du.x * r.y - du.y * r.x) / self.det;
        (a, b)
    }

    pub fn to_world(&self, a: f64, b: f64) -> Point2<f64> {
        self.origin() + self.u.direction() * a + self.v.direction() * b
    }

    /// The (U, V) span indices containing `p`. Points outside the grid map
    /// to the nearest outer span.
    pub fn span_indices(&self, p: &Point2<f64>) -> (usize, usize) {
        let (a, b) = self.to_local(p);
        (
            span_index(self.u.parameters(), a),
            span_index(self.v.parameters(), b - self.v_offset),
        )
    }

    /// Trims `boundary` against every grid tile.
    ///
    /// Tiles are bounded by the grid separators that fall strictly inside the
    /// boundary's extent in the grid frame; the outer tiles reach out to that
    /// extent. Tiles the boundary does not touch are omitted, as are slivers
    /// that do not survive polygon validation.
    pub fn tessellate(&self, boundary: &Polygon) -> Vec<GridCell> {
        let local: Vec<(f64, f64)> = boundary.vertices().iter().map(|p| self.to_local(p)).collect();
        let (mut amin, mut amax) = (f64::MAX, f64::MIN);
        let (mut bmin, mut bmax) = (f64::MAX, f64::MIN);
        for &(a, b) in &local {
            amin = amin.min(a);
            amax = amax.max(a);
            bmin = bmin.min(b);
            bmax = bmax.max(b);
        }

        let u_breaks = breaks(self.u.parameters(), 0.0, amin, amax);
        let v_breaks = breaks(self.v.parameters(), self.v_offset, bmin, bmax);

        let subject = vec![boundary.to_ccw().to_coords()];
        let mut cells = Vec::new();

        for u_span in u_breaks.windows(2) {
            let (a0, a1) = (u_span[0], u_span[1]);
            for v_span in v_breaks.windows(2) {
                let (b0, b1) = (v_span[0], v_span[1]);

                let mut tile = vec![
                    self.to_world(a0, b0),
                    self.to_world(a1, b0),
                    self.to_world(a1, b1),
                    self.to_world(a0, b1),
                ];
                if self.det < 0.0 {
                    tile.reverse();
                }
                let clip: Vec<Vec<[f64; 2]>> = vec![tile.iter().map(|p| [p.x, p.y]).collect()];

                let shapes = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);

                let mut polygons = Vec::new();
                for shape in shapes {
                    // First contour of each shape is its outer boundary
                    let Some(outer) = shape.first() else {
                        continue;
                    };
                    let points: Vec<Point2<f64>> =
                        outer.iter().map(|p| Point2::new(p[0], p[1])).collect();
                    let points = simplify_contour(&points, 1e-9);
                    if let Ok(polygon) = Polygon::new(points) {
                        polygons.push(polygon.to_ccw());
                    }
                }

                if polygons.is_empty() {
                    continue;
                }

                cells.push(GridCell {
                    u_index: span_index(self.u.parameters(), (a0 + a1) / 2.0),
                    v_index: span_index(self.v.parameters(), (b0 + b1) / 2.0 - self.v_offset),
                    polygons,
                });
            }
        }

        cells
    }
}

/// Index of the span containing parameter `t`, clamped to the outer spans.
fn span_index(parameters: &[f64], t: f64) -> usize {
    let interior = &parameters[1..parameters.len() - 1];
    interior.partition_point(|&p| p <= t)
}

/// Tile boundaries along one axis: the extent ends plus every separator
/// strictly inside the extent.
fn breaks(parameters: &[f64], offset: f64, min: f64, max: f64) -> Vec<f64> {
    let mut out = vec![min];
    out.extend(
        parameters
            .iter()
            .map(|&p| p + offset)
            .filter(|&p| p > min + EPSILON && p < max - EPSILON),
    );
    out.push(max);
    out
}
