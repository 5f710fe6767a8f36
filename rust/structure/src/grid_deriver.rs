// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-fit U/V grid for a footprint without authored grid lines.
//!
//! U runs along the footprint's longest boundary segment. V starts at the
//! same origin, perpendicular to U and pointing into the footprint, and is
//! as long as the farthest vertex is from the U line.

use bayframe_geometry::{Grid1d, Grid2d, Point2, Polygon, Segment2, Vector2, Vector3};

use crate::config::GridDivisions;
use crate::error::Result;

/// A grid derived from a reference footprint.
#[derive(Debug, Clone)]
pub struct DerivedGrid {
    pub grid: Grid2d,
    /// The footprint segment U was laid along.
    pub longest_edge: Segment2,
}

impl DerivedGrid {
    /// Direction of U lifted to 3D.
    pub fn primary_direction(&self) -> Vector3<f64> {
        let d = self.grid.u().direction();
        Vector3::new(d.x, d.y, 0.0)
    }
}

/// Derives the U/V grid of `footprint` and subdivides it.
pub fn derive_grid(footprint: &Polygon, divisions: &GridDivisions) -> Result<DerivedGrid> {
    let longest_edge = footprint.longest_segment();
    let mut u = Grid1d::new(longest_edge.start, longest_edge.end)?;

    let du = u.direction();
    let left = Vector2::new(-du.y, du.x);
    let inward = if (footprint.centroid() - longest_edge.midpoint()).dot(&left) >= 0.0 {
        left
    } else {
        -left
    };

    let depth = footprint
        .vertices()
        .iter()
        .filter_map(|p| longest_edge.distance_to_line(p))
        .fold(0.0, f64::max);
    let origin: Point2<f64> = longest_edge.start;
    let mut v = Grid1d::new(origin, origin + inward * depth)?;

    divisions.u.apply(&mut u)?;
    divisions.v.apply(&mut v)?;

    Ok(DerivedGrid {
        grid: Grid2d::new(u, v)?,
        longest_edge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisDivision;
    use approx::assert_relative_eq;

    fn footprint_20_by_30() -> Polygon {
        Polygon::from_coords(&[[0.0, 0.0], [30.0, 0.0], [30.0, 20.0], [0.0, 20.0]]).unwrap()
    }

    #[test]
    fn u_follows_the_last_longest_segment() {
        let derived = derive_grid(&footprint_20_by_30(), &GridDivisions::default()).unwrap();
        let u = derived.grid.u();
        assert_relative_eq!(u.start().x, 30.0);
        assert_relative_eq!(u.start().y, 20.0);
        assert_relative_eq!(u.direction().x, -1.0);
        assert_relative_eq!(u.length(), 30.0);
        assert_eq!(u.span_count(), 5);
        assert_relative_eq!(u.longest_span(), 6.0, epsilon = 1e-9);

        let p = derived.primary_direction();
        assert_relative_eq!(p.x, -1.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn v_points_into_the_footprint() {
        let derived = derive_grid(&footprint_20_by_30(), &GridDivisions::default()).unwrap();
        let v = derived.grid.v();
        assert_relative_eq!(v.start().x, 30.0);
        assert_relative_eq!(v.start().y, 20.0);
        assert_relative_eq!(v.direction().y, -1.0);
        assert_relative_eq!(v.length(), 20.0);
        assert_eq!(v.span_count(), 7);
    }

    #[test]
    fn v_length_reaches_the_farthest_vertex() {
        // Trapezoid: longest side on y = 0, apex row at y = 8
        let footprint =
            Polygon::from_coords(&[[0.0, 0.0], [20.0, 0.0], [14.0, 8.0], [6.0, 8.0]]).unwrap();
        let derived = derive_grid(&footprint, &GridDivisions::default()).unwrap();
        assert_relative_eq!(derived.grid.v().length(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(derived.grid.v().direction().y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(derived.longest_edge.length(), 20.0);
    }

    #[test]
    fn clockwise_footprint_still_spans_inward() {
        let footprint =
            Polygon::from_coords(&[[0.0, 0.0], [0.0, 10.0], [40.0, 10.0], [40.0, 0.0]]).unwrap();
        let derived = derive_grid(&footprint, &GridDivisions::default()).unwrap();
        let grid = &derived.grid;
        // Every footprint vertex lies in the grid's positive quadrant
        for p in footprint.vertices() {
            let (a, b) = grid.to_local(p);
            assert!(a > -1e-9 && a < 40.0 + 1e-9);
            assert!(b > -1e-9 && b < 10.0 + 1e-9);
        }
    }

    #[test]
    fn fixed_length_divisions() {
        let divisions = GridDivisions {
            u: AxisDivision::FixedLength(6.0),
            v: AxisDivision::FixedLength(6.0),
        };
        let derived = derive_grid(&footprint_20_by_30(), &divisions).unwrap();
        assert_eq!(derived.grid.u().span_count(), 5);
        // 20 = 1 + 3 * 6 + 1
        assert_eq!(derived.grid.v().span_count(), 5);
    }
}
