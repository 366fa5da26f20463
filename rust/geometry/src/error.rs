// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during transform computation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid rotation axis ({x}, {y}, {z}): axis has near-zero length")]
    InvalidAxis { x: f64, y: f64, z: f64 },

    #[error("Element '{name}' has {len} transform values, expected 16")]
    TransformLength { name: String, len: usize },
}
