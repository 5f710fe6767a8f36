// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("Self-intersecting polygon: segment {0} crosses segment {1}")]
    SelfIntersecting(usize, usize),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Zero-length segment")]
    ZeroLength,
}
