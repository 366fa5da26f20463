// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for parser facade operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the parser facade
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] bdengine_core::Error),

    #[error(transparent)]
    Geometry(#[from] bdengine_geometry::Error),
}

/// The three failure kinds a caller can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty required input; detected before any I/O
    InvalidArgument,
    /// Unreadable, undecodable or ill-shaped input
    Decode,
    /// Near-zero axis passed to an axis-angle constructor
    InvalidAxis,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Core(bdengine_core::Error::InvalidArgument(_)) => ErrorKind::InvalidArgument,
            Error::Core(bdengine_core::Error::Decode(_)) => ErrorKind::Decode,
            Error::Geometry(bdengine_geometry::Error::InvalidAxis { .. }) => ErrorKind::InvalidAxis,
            // Only reachable by calculating over a hand-built forest
            Error::Geometry(bdengine_geometry::Error::TransformLength { .. }) => ErrorKind::Decode,
        }
    }
}
