// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial index for tolerance-based vertex lookup and merging.
//!
//! Uses a grid-based spatial hash for O(1) average-case nearest-vertex queries.
//! Vertices within the complex tolerance are identified as the same point;
//! vertices farther apart are always distinct.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::arena::{CellComplex, VertexData};
use crate::keys::VertexKey;

/// A spatial hash grid for fast tolerance-based vertex lookup.
///
/// The grid divides 3D space into cubic cells of side `cell_size`. Vertex
/// lookups check the 27 neighboring cells (3x3x3 neighborhood) for candidates
/// within tolerance.
#[derive(Debug)]
pub struct SpatialIndex {
    cell_size: f64,
    grid: FxHashMap<(i64, i64, i64), Vec<VertexKey>>,
}

impl SpatialIndex {
    /// Creates a new spatial index with the given cell size.
    ///
    /// `cell_size` should be >= the tolerance used for queries.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            grid: FxHashMap::default(),
        }
    }

    /// Inserts a vertex key at the given coordinates.
    pub fn insert(&mut self, key: VertexKey, x: f64, y: f64, z: f64) {
        let cell = self.cell_coords(x, y, z);
        self.grid.entry(cell).or_default().push(key);
    }

    /// Finds the nearest vertex within `tolerance` of `(x, y, z)`.
    pub fn find_near(
        &self,
        vertices: &SlotMap<VertexKey, VertexData>,
        x: f64,
        y: f64,
        z: f64,
        tolerance: f64,
    ) -> Option<VertexKey> {
        let (cx, cy, cz) = self.cell_coords(x, y, z);
        let tol_sq = tolerance * tolerance;
        let mut best: Option<(VertexKey, f64)> = None;

        // Search 3x3x3 neighborhood
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(keys) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &vk in keys {
                        let Some(v) = vertices.get(vk) else {
                            continue;
                        };
                        let dist_sq = (v.x - x).powi(2) + (v.y - y).powi(2) + (v.z - z).powi(2);
                        if dist_sq <= tol_sq && best.map_or(true, |(_, d)| dist_sq < d) {
                            best = Some((vk, dist_sq));
                        }
                    }
                }
            }
        }

        best.map(|(vk, _)| vk)
    }

    /// Number of indexed vertices.
    pub fn len(&self) -> usize {
        self.grid.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    fn cell_coords(&self, x: f64, y: f64, z: f64) -> (i64, i64, i64) {
        (
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
            (z / self.cell_size).floor() as i64,
        )
    }
}

impl CellComplex {
    /// Returns an existing vertex within tolerance of `(x, y, z)`, or
    /// creates a new one. This is the fundamental "merge-or-create"
    /// operation behind every cell insertion.
    pub fn find_or_add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        if let Some(existing) = self.spatial.find_near(&self.vertices, x, y, z, self.tolerance) {
            return existing;
        }
        self.insert_vertex(x, y, z)
    }

    /// Finds an existing vertex within tolerance of `(x, y, z)`.
    pub fn find_vertex(&self, x: f64, y: f64, z: f64) -> Option<VertexKey> {
        self.spatial.find_near(&self.vertices, x, y, z, self.tolerance)
    }

    /// Adds a vertex without merging and registers it in the spatial index.
    pub(crate) fn insert_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        let key = self.vertices.insert(VertexData { x, y, z });
        self.spatial.insert(key, x, y, z);
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spatial_index_finds_nearby() {
        let mut complex = CellComplex::with_tolerance(0.01);
        let v0 = complex.find_or_add_vertex(0.0, 0.0, 0.0);
        let v1 = complex.find_or_add_vertex(1.0, 0.0, 0.0);

        assert_eq!(complex.find_vertex(0.001, 0.001, 0.0), Some(v0));
        assert_eq!(complex.find_vertex(0.999, 0.0, 0.0), Some(v1));
        assert_eq!(complex.find_vertex(0.5, 0.0, 0.0), None);
    }

    #[test]
    fn merge_within_tolerance() {
        let mut complex = CellComplex::with_tolerance(0.01);
        let v0 = complex.find_or_add_vertex(0.0, 0.0, 0.0);
        let v1 = complex.find_or_add_vertex(0.005, 0.0, 0.0);
        assert_eq!(v0, v1);
        assert_eq!(complex.vertex_count(), 1);
    }

    #[test]
    fn distinct_beyond_tolerance() {
        let mut complex = CellComplex::with_tolerance(0.01);
        let v0 = complex.find_or_add_vertex(0.0, 0.0, 0.0);
        let v1 = complex.find_or_add_vertex(0.02, 0.0, 0.0);
        assert_ne!(v0, v1);
        assert_eq!(complex.vertex_count(), 2);
    }

    #[test]
    fn merge_across_hash_cell_boundary() {
        let mut complex = CellComplex::with_tolerance(0.01);
        // Straddles the hash cell boundary at x = 0.01
        let v0 = complex.find_or_add_vertex(0.0099, 0.0, 0.0);
        let v1 = complex.find_or_add_vertex(0.0101, 0.0, 0.0);
        assert_eq!(v0, v1);
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut complex = CellComplex::with_tolerance(0.01);
        let far = complex.insert_vertex(0.0, 0.0, 0.0);
        let near = complex.insert_vertex(0.015, 0.0, 0.0);
        assert_ne!(far, near);
        assert_eq!(complex.find_vertex(0.009, 0.0, 0.0), Some(near));
    }
}
