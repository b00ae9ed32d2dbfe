// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while flattening geometry
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transform has no inverse (determinant {0})")]
    SingularTransform(f64),

    #[error("Drawable {channel} channel has {found} entries for {expected} vertices")]
    ChannelLength {
        channel: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Face index {index} out of range for {vertex_count} vertices")]
    FaceIndex { index: u32, vertex_count: usize },

    #[error("Merged geometry has {0} vertices, more than a u32 index can address")]
    TooManyVertices(usize),

    #[error("Core OFF error: {0}")]
    CoreError(#[from] off_lite_core::Error),
}
