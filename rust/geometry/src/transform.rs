// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local-to-world transform utilities
//!
//! Transforms are 4x4 column-vector matrices: a point in a child's local
//! space is taken to its parent's space by `parent * child * p`.

use crate::error::{Error, Result};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Determinants below this are treated as singular
const SINGULAR_EPSILON: f64 = 1e-12;

/// Compose a chain of local transforms, outermost ancestor first
pub fn compose_chain<'a, I>(chain: I) -> Matrix4<f64>
where
    I: IntoIterator<Item = &'a Matrix4<f64>>,
{
    chain
        .into_iter()
        .fold(Matrix4::identity(), |world, local| world * local)
}

/// Transform a position by a full 4x4 matrix (translation included)
#[inline]
pub fn transform_point(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
    matrix.transform_point(point)
}

/// Matrix that maps normals under `matrix`: the inverse-transpose of its linear part
pub fn normal_matrix(matrix: &Matrix4<f64>) -> Result<Matrix3<f64>> {
    let linear: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    let det = linear.determinant();
    if det.abs() < SINGULAR_EPSILON {
        return Err(Error::SingularTransform(det));
    }
    linear
        .try_inverse()
        .map(|inv| inv.transpose())
        .ok_or(Error::SingularTransform(det))
}

/// Transform a normal and re-normalize it
///
/// Zero-length results are returned as-is rather than producing NaNs.
#[inline]
pub fn transform_normal(normal_matrix: &Matrix3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    let n = normal_matrix * normal;
    let len = n.norm();
    if len > 0.0 {
        n / len
    } else {
        n
    }
}

/// Translation matrix
pub fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Non-uniform scale matrix
pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
}
