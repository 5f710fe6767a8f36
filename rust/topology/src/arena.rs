// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the cell complex.
//!
//! The [`CellComplex`] is the single owner of all topology data. Every entity
//! (vertex, edge, face, cell) lives inside a slot map with stable,
//! generational keys; other entities refer to it by key only. Upward
//! adjacency indices (vertex → edges, edge → faces, face → cells) make the
//! exposure queries used by framing derivation O(1).
//!
//! ## Sharing
//!
//! Cells of neighbouring bays share their common wall face, and cells of
//! consecutive stories share the floor/ceiling face between them. An edge in
//! the middle of a grid therefore collects four faces, while edges on the
//! building boundary collect fewer.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::keys::*;
use crate::spatial::SpatialIndex;

/// Data stored for a vertex: a point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Data stored for an edge: a segment between two vertices.
///
/// Identity is undirected: `{start, end}` and `{end, start}` are the same edge.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
}

/// Span indices of the grid tile a face originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub u: usize,
    pub v: usize,
}

/// Data stored for a face: a planar polygon bounded by a vertex loop.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Boundary loop in winding order (closing edge implicit).
    pub vertices: Vec<VertexKey>,
    /// `edges[i]` joins `vertices[i]` and `vertices[i + 1]`.
    pub edges: Vec<EdgeKey>,
    /// Tile the face was produced from, when built against a grid.
    pub grid_coord: Option<GridCoord>,
}

/// Data stored for a cell: one story of one bay.
#[derive(Debug, Clone)]
pub struct CellData {
    pub bottom_face: FaceKey,
    pub top_face: FaceKey,
    pub side_faces: Vec<FaceKey>,
    pub base_elevation: f64,
    pub height: f64,
    pub grid_coord: Option<GridCoord>,
}

/// The central arena that owns all topology entities and their adjacency indices.
///
/// # Example
///
/// ```
/// use bayframe_topology::CellComplex;
/// use bayframe_geometry::Point2;
///
/// let mut complex = CellComplex::new();
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ];
/// complex.add_cell(&square, 3.0, 0.0, None).unwrap();
///
/// assert_eq!(complex.vertex_count(), 8);
/// assert_eq!(complex.edge_count(), 12);
/// assert_eq!(complex.face_count(), 6);
/// ```
#[derive(Debug)]
pub struct CellComplex {
    // Entity storage
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) cells: SlotMap<CellKey, CellData>,

    // Upward adjacency: child → parents
    pub(crate) vertex_to_edges: FxHashMap<VertexKey, FxHashSet<EdgeKey>>,
    pub(crate) edge_to_faces: FxHashMap<EdgeKey, FxHashSet<FaceKey>>,
    pub(crate) face_to_cells: FxHashMap<FaceKey, FxHashSet<CellKey>>,

    // Deduplication lookups
    pub(crate) spatial: SpatialIndex,
    pub(crate) edge_lookup: FxHashMap<(VertexKey, VertexKey), EdgeKey>,
    pub(crate) face_lookup: FxHashMap<Vec<EdgeKey>, FaceKey>,

    pub(crate) tolerance: f64,
}

impl CellComplex {
    /// Creates an empty complex that merges vertices within
    /// [`bayframe_geometry::EPSILON`].
    pub fn new() -> Self {
        Self::with_tolerance(bayframe_geometry::EPSILON)
    }

    /// Creates an empty complex with a custom vertex merge tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        let tolerance = tolerance.max(1e-10);
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            cells: SlotMap::with_key(),

            vertex_to_edges: FxHashMap::default(),
            edge_to_faces: FxHashMap::default(),
            face_to_cells: FxHashMap::default(),

            spatial: SpatialIndex::new(tolerance),
            edge_lookup: FxHashMap::default(),
            face_lookup: FxHashMap::default(),

            tolerance,
        }
    }

    /// Vertex merge tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    // --- Vertex operations ---

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Returns the number of vertices in the complex.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the coordinates of a vertex as `[x, y, z]`.
    pub fn vertex_coords(&self, key: VertexKey) -> Option<[f64; 3]> {
        self.vertices.get(key).map(|v| [v.x, v.y, v.z])
    }

    // --- Edge operations ---

    /// Returns the edge data for the given key, or `None` if not found.
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Returns the number of edges in the complex.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Face operations ---

    /// Returns the face data for the given key, or `None` if not found.
    pub fn face(&self, key: FaceKey) -> Option<&FaceData> {
        self.faces.get(key)
    }

    /// Returns the number of faces in the complex.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    // --- Cell operations ---

    /// Returns the cell data for the given key, or `None` if not found.
    pub fn cell(&self, key: CellKey) -> Option<&CellData> {
        self.cells.get(key)
    }

    /// Returns the number of cells in the complex.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the complex holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // --- Entity existence checks ---

    /// Returns `true` if the given topology key references a valid entity.
    pub fn contains(&self, key: TopologyKey) -> bool {
        match key {
            TopologyKey::Vertex(k) => self.vertices.contains_key(k),
            TopologyKey::Edge(k) => self.edges.contains_key(k),
            TopologyKey::Face(k) => self.faces.contains_key(k),
            TopologyKey::Cell(k) => self.cells.contains_key(k),
        }
    }

    // --- Adjacency index helpers ---

    /// Register that an edge uses a vertex (upward adjacency).
    pub(crate) fn link_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        self.vertex_to_edges
            .entry(vertex)
            .or_default()
            .insert(edge);
    }

    /// Register that a face uses an edge (upward adjacency).
    pub(crate) fn link_edge_face(&mut self, edge: EdgeKey, face: FaceKey) {
        self.edge_to_faces.entry(edge).or_default().insert(face);
    }

    /// Register that a cell uses a face (upward adjacency).
    pub(crate) fn link_face_cell(&mut self, face: FaceKey, cell: CellKey) {
        self.face_to_cells.entry(face).or_default().insert(cell);
    }
}

impl Default for CellComplex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_complex_is_empty() {
        let complex = CellComplex::new();
        assert_eq!(complex.vertex_count(), 0);
        assert_eq!(complex.edge_count(), 0);
        assert_eq!(complex.face_count(), 0);
        assert_eq!(complex.cell_count(), 0);
        assert!(complex.is_empty());
    }

    #[test]
    fn tolerance_has_a_floor() {
        let complex = CellComplex::with_tolerance(0.0);
        assert!(complex.tolerance() > 0.0);
    }

    #[test]
    fn contains_checks_the_matching_arena() {
        let mut complex = CellComplex::new();
        let v = complex.find_or_add_vertex(1.0, 2.0, 3.0);
        assert!(complex.contains(v.into()));
        assert!(!complex.contains(TopologyKey::Cell(CellKey::default())));
        assert_eq!(complex.vertex_coords(v), Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn default_uses_kernel_epsilon() {
        let complex = CellComplex::default();
        assert_eq!(complex.tolerance(), bayframe_geometry::EPSILON);
    }
}
