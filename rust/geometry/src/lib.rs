// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BDEngine-Lite Geometry
//!
//! 4x4 transform arithmetic over nalgebra and world-transform propagation
//! through BDEngine element trees.

pub mod error;
pub mod transform;
pub mod world;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Vector3};

pub use error::{Error, Result};
pub use transform::{
    approx_equal, default_transform_matrix, from_row_major, identity, local_matrix, multiply,
    rotate_axis_angle, rotate_x, rotate_y, rotate_z, scale, to_row_major, translate,
    AXIS_EPSILON,
};
pub use world::{PropagationPolicy, WorldTransformCalculator};
