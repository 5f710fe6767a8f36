// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric queries on topology entities.
//!
//! Computes lengths, areas, volumes, normals and centroids directly from the
//! stored vertex loops.

use nalgebra::{Point3, Vector3};

use crate::arena::CellComplex;
use crate::keys::*;

impl CellComplex {
    /// Returns the 3D position of a vertex as a nalgebra Point3.
    pub fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices
            .get(key)
            .map(|v| Point3::new(v.x, v.y, v.z))
    }

    /// Computes the Euclidean length of an edge.
    pub fn edge_length(&self, key: EdgeKey) -> Option<f64> {
        let (p0, p1) = self.edge_endpoints(key)?;
        Some((p1 - p0).norm())
    }

    /// Computes the face normal using Newell's method.
    ///
    /// Works for any planar polygon (convex or concave). The normal direction
    /// follows the right-hand rule relative to the vertex winding order.
    pub fn face_normal(&self, key: FaceKey) -> Option<Vector3<f64>> {
        let points = self.face_points(key)?;
        if points.len() < 3 {
            return None;
        }

        let mut normal = Vector3::new(0.0, 0.0, 0.0);
        let n = points.len();
        for i in 0..n {
            let curr = points[i];
            let next = points[(i + 1) % n];

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        let len = normal.norm();
        if len < 1e-15 {
            return None; // degenerate face
        }

        Some(normal / len)
    }

    /// Computes the area of a face from the vector sum of its fan triangles.
    pub fn face_area(&self, key: FaceKey) -> Option<f64> {
        let points = self.face_points(key)?;
        if points.len() < 3 {
            return Some(0.0);
        }

        let p0 = points[0];
        let mut total = Vector3::new(0.0, 0.0, 0.0);
        for i in 1..points.len() - 1 {
            let v1 = points[i] - p0;
            let v2 = points[i + 1] - p0;
            total += v1.cross(&v2);
        }

        Some(total.norm() / 2.0)
    }

    /// Computes the vertex average of a face.
    pub fn face_centroid(&self, key: FaceKey) -> Option<Point3<f64>> {
        let points = self.face_points(key)?;
        if points.is_empty() {
            return None;
        }

        let sum = points
            .iter()
            .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.coords);
        Some(Point3::from(sum / points.len() as f64))
    }

    /// Computes the volume of a cell as its top face area times its height.
    pub fn cell_volume(&self, key: CellKey) -> Option<f64> {
        let cell = self.cells.get(key)?;
        Some(self.face_area(cell.top_face)? * cell.height)
    }
}
