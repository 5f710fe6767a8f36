// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for cell complexes.
//!
//! Provides full round-trip serialization of vertices, edges, faces and
//! cells. Slot-map keys are replaced with sequential integer ids; the
//! adjacency index is not stored and is rebuilt on load. This is the format
//! of a pre-built `Bays` model.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;

/// Serializable representation of a full cell complex.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComplexSnapshot {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    pub vertices: Vec<VertexSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub faces: Vec<FaceSnapshot>,
    pub cells: Vec<CellSnapshot>,
}

fn default_tolerance() -> f64 {
    bayframe_geometry::EPSILON
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FaceSnapshot {
    pub id: usize,
    pub vertices: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_coord: Option<GridCoord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: usize,
    pub bottom_face: usize,
    pub top_face: usize,
    pub side_faces: Vec<usize>,
    pub base_elevation: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_coord: Option<GridCoord>,
}

impl CellComplex {
    /// Serializes the complex to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the complex.
    ///
    /// Ids are positions in insertion order.
    pub fn to_snapshot(&self) -> ComplexSnapshot {
        let mut vertex_ids: FxHashMap<VertexKey, usize> = FxHashMap::default();
        let mut face_ids: FxHashMap<FaceKey, usize> = FxHashMap::default();

        let vertices: Vec<VertexSnapshot> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, (k, v))| {
                vertex_ids.insert(k, i);
                VertexSnapshot {
                    id: i,
                    x: v.x,
                    y: v.y,
                    z: v.z,
                }
            })
            .collect();

        let edges: Vec<EdgeSnapshot> = self
            .edges
            .values()
            .enumerate()
            .map(|(i, e)| EdgeSnapshot {
                id: i,
                start: vertex_ids[&e.start],
                end: vertex_ids[&e.end],
            })
            .collect();

        let faces: Vec<FaceSnapshot> = self
            .faces
            .iter()
            .enumerate()
            .map(|(i, (k, f))| {
                face_ids.insert(k, i);
                FaceSnapshot {
                    id: i,
                    vertices: f.vertices.iter().map(|vk| vertex_ids[vk]).collect(),
                    grid_coord: f.grid_coord,
                }
            })
            .collect();

        let cells: Vec<CellSnapshot> = self
            .cells
            .values()
            .enumerate()
            .map(|(i, c)| CellSnapshot {
                id: i,
                bottom_face: face_ids[&c.bottom_face],
                top_face: face_ids[&c.top_face],
                side_faces: c.side_faces.iter().map(|fk| face_ids[fk]).collect(),
                base_elevation: c.base_elevation,
                height: c.height,
                grid_coord: c.grid_coord,
            })
            .collect();

        ComplexSnapshot {
            tolerance: self.tolerance,
            vertices,
            edges,
            faces,
            cells,
        }
    }

    /// Deserializes a complex from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ComplexSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Reconstructs a complex from a snapshot.
    ///
    /// Snapshot ids are resolved by position. Vertices are restored without
    /// merging so every stored vertex keeps its identity; edges are restored
    /// before faces so edge iteration order survives the round trip.
    pub fn from_snapshot(snap: &ComplexSnapshot) -> Result<Self> {
        let mut complex = CellComplex::with_tolerance(snap.tolerance);

        let vertex_keys: Vec<VertexKey> = snap
            .vertices
            .iter()
            .map(|vs| complex.insert_vertex(vs.x, vs.y, vs.z))
            .collect();

        for es in &snap.edges {
            let start = lookup(&vertex_keys, es.start, TopologyType::Vertex)?;
            let end = lookup(&vertex_keys, es.end, TopologyType::Vertex)?;
            complex.add_edge(start, end)?;
        }

        let mut face_keys: Vec<FaceKey> = Vec::with_capacity(snap.faces.len());
        for fs in &snap.faces {
            let loop_vertices = fs
                .vertices
                .iter()
                .map(|&i| lookup(&vertex_keys, i, TopologyType::Vertex))
                .collect::<Result<Vec<_>>>()?;
            face_keys.push(complex.add_face(&loop_vertices, fs.grid_coord)?);
        }

        for cs in &snap.cells {
            if !cs.height.is_finite() || cs.height <= 0.0 {
                return Err(Error::InvalidHeight(cs.height));
            }
            let bottom_face = lookup(&face_keys, cs.bottom_face, TopologyType::Face)?;
            let top_face = lookup(&face_keys, cs.top_face, TopologyType::Face)?;
            let side_faces = cs
                .side_faces
                .iter()
                .map(|&i| lookup(&face_keys, i, TopologyType::Face))
                .collect::<Result<Vec<_>>>()?;

            let key = complex.cells.insert(CellData {
                bottom_face,
                top_face,
                side_faces: side_faces.clone(),
                base_elevation: cs.base_elevation,
                height: cs.height,
                grid_coord: cs.grid_coord,
            });
            complex.link_face_cell(bottom_face, key);
            complex.link_face_cell(top_face, key);
            for fk in side_faces {
                complex.link_face_cell(fk, key);
            }
        }

        Ok(complex)
    }
}

fn lookup<K: Copy>(keys: &[K], index: usize, kind: TopologyType) -> Result<K> {
    keys.get(index)
        .copied()
        .ok_or(Error::InvalidReference { kind, index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayframe_geometry::Point2;

    fn square(x: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x, 0.0),
            Point2::new(x + 2.0, 0.0),
            Point2::new(x + 2.0, 2.0),
            Point2::new(x, 2.0),
        ]
    }

    #[test]
    fn roundtrip_empty_complex() {
        let complex = CellComplex::new();
        let json = complex.to_json().unwrap();
        let restored = CellComplex::from_json(&json).unwrap();
        assert!(restored.is_empty());
        assert_eq!(restored.vertex_count(), 0);
    }

    #[test]
    fn roundtrip_preserves_counts_and_adjacency() {
        let mut complex = CellComplex::new();
        complex.add_cell(&square(0.0), 3.0, 0.0, None).unwrap();
        complex.add_cell(&square(2.0), 3.0, 0.0, None).unwrap();
        complex.add_cell(&square(0.0), 3.0, 3.0, None).unwrap();

        let json = complex.to_json().unwrap();
        let restored = CellComplex::from_json(&json).unwrap();

        assert_eq!(restored.vertex_count(), complex.vertex_count());
        assert_eq!(restored.edge_count(), complex.edge_count());
        assert_eq!(restored.face_count(), complex.face_count());
        assert_eq!(restored.cell_count(), complex.cell_count());

        let original: Vec<usize> = complex
            .edges()
            .map(|(ek, _)| complex.edge_face_count(ek))
            .collect();
        let reloaded: Vec<usize> = restored
            .edges()
            .map(|(ek, _)| restored.edge_face_count(ek))
            .collect();
        assert_eq!(original, reloaded);

        let original_ends: Vec<_> = complex
            .edges()
            .map(|(ek, _)| complex.edge_endpoints(ek).unwrap())
            .collect();
        let reloaded_ends: Vec<_> = restored
            .edges()
            .map(|(ek, _)| restored.edge_endpoints(ek).unwrap())
            .collect();
        assert_eq!(original_ends, reloaded_ends);
    }

    #[test]
    fn roundtrip_keeps_cell_attributes() {
        let mut complex = CellComplex::new();
        complex.add_cell(&square(0.0), 2.5, 7.5, None).unwrap();
        let restored = CellComplex::from_json(&complex.to_json().unwrap()).unwrap();

        let (key, cell) = restored.cells().next().unwrap();
        assert_eq!(cell.base_elevation, 7.5);
        assert_eq!(cell.height, 2.5);
        assert_eq!(cell.side_faces.len(), 4);
        let top = restored.top_face_points(key).unwrap();
        assert!(top.iter().all(|p| p.z == 10.0));
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let json = r#"{
            "vertices": [{"id": 0, "x": 0.0, "y": 0.0, "z": 0.0}],
            "edges": [{"id": 0, "start": 0, "end": 5}],
            "faces": [],
            "cells": []
        }"#;
        let err = CellComplex::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidReference {
                kind: TopologyType::Vertex,
                index: 5
            }
        ));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = CellComplex::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
