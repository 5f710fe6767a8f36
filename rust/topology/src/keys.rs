// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology key types for arena-based storage.
//!
//! Each topology entity gets a unique, type-safe key for O(1) lookup in the
//! complex. Keys are created by `slotmap::SlotMap`; entities are never
//! removed, so iteration order over any entity kind is insertion order.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (segment between two vertices).
    pub struct EdgeKey;

    /// Key for a face (planar polygon bounded by a vertex loop).
    pub struct FaceKey;

    /// Key for a cell (one bay of one story).
    pub struct CellKey;
}

/// A key that can reference any topology entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKey {
    Vertex(VertexKey),
    Edge(EdgeKey),
    Face(FaceKey),
    Cell(CellKey),
}

impl TopologyKey {
    /// Returns the topology type of this key.
    pub fn topology_type(&self) -> TopologyType {
        match self {
            TopologyKey::Vertex(_) => TopologyType::Vertex,
            TopologyKey::Edge(_) => TopologyType::Edge,
            TopologyKey::Face(_) => TopologyType::Face,
            TopologyKey::Cell(_) => TopologyType::Cell,
        }
    }
}

/// Discriminant for topology entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TopologyType {
    Vertex = 0,
    Edge = 1,
    Face = 2,
    Cell = 3,
}

impl TopologyType {
    /// Lower-case entity name, as used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyType::Vertex => "vertex",
            TopologyType::Edge => "edge",
            TopologyType::Face => "face",
            TopologyType::Cell => "cell",
        }
    }
}

impl std::fmt::Display for TopologyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VertexKey> for TopologyKey {
    fn from(k: VertexKey) -> Self {
        TopologyKey::Vertex(k)
    }
}

impl From<EdgeKey> for TopologyKey {
    fn from(k: EdgeKey) -> Self {
        TopologyKey::Edge(k)
    }
}

impl From<FaceKey> for TopologyKey {
    fn from(k: FaceKey) -> Self {
        TopologyKey::Face(k)
    }
}

impl From<CellKey> for TopologyKey {
    fn from(k: CellKey) -> Self {
        TopologyKey::Cell(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn topology_type_names() {
        assert_eq!(TopologyType::Vertex.as_str(), "vertex");
        assert_eq!(TopologyType::Edge.as_str(), "edge");
        assert_eq!(TopologyType::Face.as_str(), "face");
        assert_eq!(TopologyType::Cell.as_str(), "cell");
    }

    #[test]
    fn topology_type_ordering() {
        assert!(TopologyType::Vertex < TopologyType::Edge);
        assert!(TopologyType::Edge < TopologyType::Face);
        assert!(TopologyType::Face < TopologyType::Cell);
    }

    #[test]
    fn topology_key_type_discrimination() {
        let mut faces: SlotMap<FaceKey, ()> = SlotMap::with_key();
        let key: TopologyKey = faces.insert(()).into();
        assert_eq!(key.topology_type(), TopologyType::Face);
        assert_eq!(key.topology_type().to_string(), "face");
    }
}
