// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for structure derivation.

use std::path::PathBuf;

/// Result type alias for structure derivation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving a structure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a pre-built `Bays` complex nor `Levels` were supplied.
    #[error("no Bays or Levels model was supplied; a structure needs one of them")]
    MissingLevels,

    /// `Levels` was supplied but holds no level volumes.
    #[error("the Levels model contains no level volumes")]
    NoLevelVolumes,

    /// A profile name is not in the catalog.
    #[error("unknown structural profile: {0}")]
    UnknownProfile(String),

    /// An input value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Geometry(#[from] bayframe_geometry::Error),

    #[error(transparent)]
    Topology(#[from] bayframe_topology::Error),

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` for errors that abort a run before any framing.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingLevels
                | Error::NoLevelVolumes
                | Error::UnknownProfile(_)
                | Error::InvalidConfig(_)
        )
    }
}
