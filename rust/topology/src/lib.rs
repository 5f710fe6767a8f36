// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bayframe Topology
//!
//! Cell complex store for stacked structural bays.
//!
//! A [`CellComplex`] partitions a building volume into cells (one per grid
//! bay per story) whose vertices, edges and faces are shared across
//! neighbours. Entities live in slot maps with stable keys; vertices are
//! merged by spatial tolerance, edges by vertex pair and faces by edge set,
//! so adjacency queries such as "how many faces meet at this edge?" reflect
//! the real building topology.

pub mod arena;
pub mod construction;
pub mod error;
pub mod geometry;
pub mod keys;
pub mod serialization;
pub mod spatial;
pub mod traversal;

pub use arena::{CellComplex, CellData, EdgeData, FaceData, GridCoord, VertexData};
pub use error::{Error, Result};
pub use keys::{CellKey, EdgeKey, FaceKey, TopologyKey, TopologyType, VertexKey};

/// Number of faces an edge needs to be fully interior. Edges with fewer
/// adjacent faces sit on the boundary of the complex.
pub const INTERIOR_EDGE_FACE_COUNT: usize = 4;
