// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology operations.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during topology operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The outline of a cell is not a valid polygon.
    #[error("invalid cell outline: {0}")]
    Geometry(#[from] bayframe_geometry::Error),

    /// A face collapsed to fewer than 3 distinct vertices after tolerance merging.
    #[error("face has fewer than 3 distinct vertices")]
    DegenerateFace,

    /// A cell height must be positive and finite.
    #[error("invalid cell height: {0}")]
    InvalidHeight(f64),

    /// Vertex key not found in the complex.
    #[error("vertex not found: {0:?}")]
    VertexNotFound(crate::keys::VertexKey),

    /// Face key not found in the complex.
    #[error("face not found: {0:?}")]
    FaceNotFound(crate::keys::FaceKey),

    /// A snapshot refers to an entity id that does not exist.
    #[error("snapshot {kind} references missing id {index}")]
    InvalidReference {
        kind: crate::keys::TopologyType,
        index: usize,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
