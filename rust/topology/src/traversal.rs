// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal methods for navigating the complex.
//!
//! Supports both downward traversal (cell → faces → vertices) and upward
//! traversal (edge → faces → cells) via the adjacency index.

use nalgebra::Point3;

use crate::arena::{CellComplex, CellData, EdgeData};
use crate::keys::*;
use crate::INTERIOR_EDGE_FACE_COUNT;

// =============================================================================
// Entity iteration (insertion order)
// =============================================================================

impl CellComplex {
    /// Iterates all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeData)> + '_ {
        self.edges.iter()
    }

    /// Iterates all cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &CellData)> + '_ {
        self.cells.iter()
    }
}

// =============================================================================
// Downward traversal
// =============================================================================

impl CellComplex {
    /// Returns the start and end vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the start and end points of an edge.
    pub fn edge_endpoints(&self, key: EdgeKey) -> Option<(Point3<f64>, Point3<f64>)> {
        let (start, end) = self.edge_vertices(key)?;
        Some((self.vertex_point(start)?, self.vertex_point(end)?))
    }

    /// Returns the boundary loop of a face as points, in winding order.
    pub fn face_points(&self, key: FaceKey) -> Option<Vec<Point3<f64>>> {
        let face = self.faces.get(key)?;
        face.vertices.iter().map(|&vk| self.vertex_point(vk)).collect()
    }

    /// Returns the edge keys bounding a face.
    pub fn face_edges(&self, key: FaceKey) -> Option<&[EdgeKey]> {
        self.faces.get(key).map(|f| f.edges.as_slice())
    }

    /// Returns every face of a cell: bottom, top, then sides.
    pub fn cell_faces(&self, key: CellKey) -> Option<Vec<FaceKey>> {
        let cell = self.cells.get(key)?;
        let mut faces = Vec::with_capacity(cell.side_faces.len() + 2);
        faces.push(cell.bottom_face);
        faces.push(cell.top_face);
        faces.extend_from_slice(&cell.side_faces);
        Some(faces)
    }

    /// Returns the upper horizontal face of a cell.
    pub fn top_face(&self, key: CellKey) -> Option<FaceKey> {
        self.cells.get(key).map(|c| c.top_face)
    }

    /// Returns the upper horizontal face of a cell as a counter-clockwise
    /// point loop seen from +Z.
    ///
    /// A shared face keeps the winding it was first inserted with, so the
    /// stored loop is reversed when it was created as the bottom of the
    /// cell above.
    pub fn top_face_points(&self, key: CellKey) -> Option<Vec<Point3<f64>>> {
        let mut points = self.face_points(self.top_face(key)?)?;
        let twice_area: f64 = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        if twice_area < 0.0 {
            points.reverse();
        }
        Some(points)
    }
}

// =============================================================================
// Upward traversal: find parent topologies
// =============================================================================

impl CellComplex {
    /// Returns all edges that use a given vertex.
    pub fn vertex_edges(&self, key: VertexKey) -> Vec<EdgeKey> {
        self.vertex_to_edges
            .get(&key)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns all faces that contain a given edge.
    pub fn edge_faces(&self, key: EdgeKey) -> Vec<FaceKey> {
        self.edge_to_faces
            .get(&key)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of faces that contain a given edge.
    pub fn edge_face_count(&self, key: EdgeKey) -> usize {
        self.edge_to_faces.get(&key).map_or(0, |set| set.len())
    }

    /// Returns `true` if the edge lies on the boundary of the complex, that
    /// is it is shared by fewer than [`INTERIOR_EDGE_FACE_COUNT`] faces.
    pub fn is_external_edge(&self, key: EdgeKey) -> bool {
        self.edge_face_count(key) < INTERIOR_EDGE_FACE_COUNT
    }

    /// Returns all cells bounded by a given face.
    pub fn face_cells(&self, key: FaceKey) -> Vec<CellKey> {
        self.face_to_cells
            .get(&key)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns cells sharing at least one face with the given cell.
    pub fn adjacent_cells(&self, key: CellKey) -> Vec<CellKey> {
        let Some(faces) = self.cell_faces(key) else {
            return Vec::new();
        };
        let mut neighbours = Vec::new();
        for fk in faces {
            for ck in self.face_cells(fk) {
                if ck != key && !neighbours.contains(&ck) {
                    neighbours.push(ck);
                }
            }
        }
        neighbours
    }
}
