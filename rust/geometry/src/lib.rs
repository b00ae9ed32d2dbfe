// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OFF-Lite Geometry
//!
//! Flattens transform hierarchies into world space for OFF export, using
//! nalgebra for matrices and rayon for large drawables.

pub mod bounds;
pub mod error;
pub mod scene;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use bounds::{mesh_bounds, Bounds};
pub use error::{Error, Result};
pub use scene::{export_scene, flatten, merge, to_world, Drawable, TransformNode, WorldDrawable};
pub use transform::{
    compose_chain, normal_matrix, scaling, transform_normal, transform_point, translation,
};
