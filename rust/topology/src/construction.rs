// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for topology entities.
//!
//! Every entity is created through the complex, which merges vertices within
//! tolerance, reuses edges by vertex pair and faces by edge set, and keeps
//! the upward adjacency index current. Inserting the same geometry twice
//! reuses entities instead of duplicating them.

use bayframe_geometry::{Grid2d, Point2, Polygon};

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;

impl CellComplex {
    /// Returns the edge between two existing vertices, creating it if needed.
    ///
    /// Edge identity is undirected. Returns an error if either vertex does
    /// not exist or both keys are the same vertex.
    pub fn add_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        if !self.vertices.contains_key(start) {
            return Err(Error::VertexNotFound(start));
        }
        if !self.vertices.contains_key(end) {
            return Err(Error::VertexNotFound(end));
        }
        if start == end {
            return Err(Error::DegenerateFace);
        }

        // Canonical edge key (ordered by key for deduplication)
        let canonical = if start < end { (start, end) } else { (end, start) };
        if let Some(&existing) = self.edge_lookup.get(&canonical) {
            return Ok(existing);
        }

        let key = self.edges.insert(EdgeData { start, end });
        self.edge_lookup.insert(canonical, key);
        self.link_vertex_edge(start, key);
        self.link_vertex_edge(end, key);
        Ok(key)
    }

    /// Returns the face bounded by a vertex loop, creating it if needed.
    ///
    /// Consecutive repeats of a vertex are collapsed. Face identity is the set
    /// of boundary edges, so the same loop in either winding or from any
    /// starting vertex resolves to the same face. A reused face keeps the
    /// winding and grid coordinate of its first insertion.
    pub fn add_face(
        &mut self,
        loop_vertices: &[VertexKey],
        grid_coord: Option<GridCoord>,
    ) -> Result<FaceKey> {
        let mut vertices: Vec<VertexKey> = Vec::with_capacity(loop_vertices.len());
        for &vk in loop_vertices {
            if vertices.last() != Some(&vk) {
                vertices.push(vk);
            }
        }
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(Error::DegenerateFace);
        }

        let mut edges = Vec::with_capacity(vertices.len());
        for i in 0..vertices.len() {
            let start = vertices[i];
            let end = vertices[(i + 1) % vertices.len()];
            edges.push(self.add_edge(start, end)?);
        }

        // Canonical face key: sorted edge keys (order-independent)
        let mut canonical = edges.clone();
        canonical.sort();
        canonical.dedup();
        if let Some(&existing) = self.face_lookup.get(&canonical) {
            return Ok(existing);
        }

        let key = self.faces.insert(FaceData {
            vertices,
            edges: edges.clone(),
            grid_coord,
        });
        self.face_lookup.insert(canonical, key);
        for ek in edges {
            self.link_edge_face(ek, key);
        }
        Ok(key)
    }

    /// Extrudes a planar outline into a volumetric cell.
    ///
    /// Creates (or reuses) a bottom face at `base_elevation`, a top face at
    /// `base_elevation + height` and one vertical side face per outline
    /// segment. When `grid` is given, faces created here are tagged with the
    /// grid span containing the outline's centroid.
    ///
    /// A new cell record is always appended, even when every face already
    /// existed.
    pub fn add_cell(
        &mut self,
        outline: &[Point2<f64>],
        height: f64,
        base_elevation: f64,
        grid: Option<&Grid2d>,
    ) -> Result<CellKey> {
        if !height.is_finite() || height <= self.tolerance {
            return Err(Error::InvalidHeight(height));
        }
        if !base_elevation.is_finite() {
            return Err(Error::InvalidHeight(base_elevation));
        }

        let polygon = Polygon::new(outline.to_vec())?.to_ccw();
        let grid_coord = grid.map(|g| {
            let (u, v) = g.span_indices(&polygon.centroid());
            GridCoord { u, v }
        });

        let top_elevation = base_elevation + height;
        let bottom: Vec<VertexKey> = polygon
            .vertices()
            .iter()
            .map(|p| self.find_or_add_vertex(p.x, p.y, base_elevation))
            .collect();
        let top: Vec<VertexKey> = polygon
            .vertices()
            .iter()
            .map(|p| self.find_or_add_vertex(p.x, p.y, top_elevation))
            .collect();

        // Bottom winds clockwise seen from above so its normal points down
        let bottom_loop: Vec<VertexKey> = bottom.iter().rev().copied().collect();
        let bottom_face = self.add_face(&bottom_loop, grid_coord)?;
        let top_face = self.add_face(&top, grid_coord)?;

        let n = bottom.len();
        let mut side_faces = Vec::with_capacity(n);
        for i in 0..n {
            let j = (i + 1) % n;
            let side = [bottom[i], bottom[j], top[j], top[i]];
            side_faces.push(self.add_face(&side, grid_coord)?);
        }

        let key = self.cells.insert(CellData {
            bottom_face,
            top_face,
            side_faces: side_faces.clone(),
            base_elevation,
            height,
            grid_coord,
        });

        self.link_face_cell(bottom_face, key);
        self.link_face_cell(top_face, key);
        for fk in side_faces {
            self.link_face_cell(fk, key);
        }

        Ok(key)
    }
}
