// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bayframe Geometry
//!
//! Planar geometry kernel used to lay out structural bays: validated
//! polygons with inset, segments and rays, and 1D/2D axis grids that
//! tessellate floor footprints into bay outlines.

pub mod error;
pub mod grid;
pub mod line;
pub mod polygon;
pub mod ray;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use grid::{FixedDivisionMode, Grid1d, Grid2d, GridCell};
pub use line::{angle_between, Line, Segment2};
pub use polygon::Polygon;
pub use ray::Ray2;

/// Tolerance for point identity and general geometric comparisons.
pub const EPSILON: f64 = 1e-5;
