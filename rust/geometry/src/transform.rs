// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared transform utilities
//!
//! Elementary 4x4 homogeneous transforms over `nalgebra::Matrix4<f64>`.
//! BDEngine stores matrices row-major, the same layout as the `transformation`
//! attribute of Minecraft display entities; [`from_row_major`] and
//! [`to_row_major`] convert between that layout and nalgebra's storage.

use crate::error::{Error, Result};
use bdengine_core::{DefaultTransform, Element, TRANSFORM_LEN};
use nalgebra::{Matrix4, Rotation3, Unit, Vector3};

/// Squared axis length below which an axis-angle rotation is rejected
pub const AXIS_EPSILON: f64 = 1e-5;

#[inline]
pub fn identity() -> Matrix4<f64> {
    Matrix4::identity()
}

/// Matrix product `a × b`. Not commutative: `b` is applied first.
#[inline]
pub fn multiply(a: &Matrix4<f64>, b: &Matrix4<f64>) -> Matrix4<f64> {
    a * b
}

#[inline]
pub fn scale(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
}

#[inline]
pub fn translate(tx: f64, ty: f64, tz: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(tx, ty, tz))
}

#[inline]
pub fn rotate_x(angle: f64) -> Matrix4<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle).to_homogeneous()
}

#[inline]
pub fn rotate_y(angle: f64) -> Matrix4<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle).to_homogeneous()
}

#[inline]
pub fn rotate_z(angle: f64) -> Matrix4<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle).to_homogeneous()
}

/// Rotation of `angle` radians around `axis` (normalized here).
///
/// Fails with [`Error::InvalidAxis`] when the squared axis length is below
/// [`AXIS_EPSILON`].
pub fn rotate_axis_angle(axis: &Vector3<f64>, angle: f64) -> Result<Matrix4<f64>> {
    let length_squared = axis.norm_squared();
    if length_squared.is_nan() || length_squared < AXIS_EPSILON {
        return Err(Error::InvalidAxis {
            x: axis.x,
            y: axis.y,
            z: axis.z,
        });
    }
    let axis = Unit::new_normalize(*axis);
    Ok(Rotation3::from_axis_angle(&axis, angle).to_homogeneous())
}

/// True iff every component of `a` and `b` differs by at most `tolerance`
pub fn approx_equal(a: &Matrix4<f64>, b: &Matrix4<f64>, tolerance: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}

/// Build a matrix from 16 row-major values
pub fn from_row_major(values: &[f64]) -> Result<Matrix4<f64>> {
    if values.len() != TRANSFORM_LEN {
        return Err(Error::TransformLength {
            name: String::new(),
            len: values.len(),
        });
    }
    Ok(Matrix4::from_row_slice(values))
}

/// Flatten a matrix into 16 row-major values
pub fn to_row_major(matrix: &Matrix4<f64>) -> [f64; TRANSFORM_LEN] {
    let mut out = [0.0; TRANSFORM_LEN];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = matrix[(row, col)];
        }
    }
    out
}

/// Local transform of an element, decoded from its `transforms` array
pub fn local_matrix(element: &Element) -> Result<Matrix4<f64>> {
    let values = element.transforms.as_deref().unwrap_or(&[]);
    from_row_major(values).map_err(|_| Error::TransformLength {
        name: element.name().to_string(),
        len: values.len(),
    })
}

/// Compose a [`DefaultTransform`] into a matrix.
///
/// Order is scale, then rotation (Y, X, Z), then translation, each
/// post-multiplied: `S · Ry · Rx · Rz · T`. Components that are missing or
/// not three values long are skipped.
pub fn default_transform_matrix(transform: &DefaultTransform) -> Matrix4<f64> {
    let mut matrix = identity();

    if let Some(&[sx, sy, sz]) = transform.scale.as_deref() {
        matrix *= scale(sx, sy, sz);
    }

    if let Some(rotation) = transform.rotation {
        matrix *= rotate_y(rotation.y);
        matrix *= rotate_x(rotation.x);
        matrix *= rotate_z(rotation.z);
    }

    if let Some(&[x, y, z]) = transform.position.as_deref() {
        matrix *= translate(x, y, z);
    }

    matrix
}
