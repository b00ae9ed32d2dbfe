// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for file-level OFF processing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for processing operations
pub type Result<T> = std::result::Result<T, ProcessingError>;

/// File-level errors.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("File not handled (extension is not .off): {0}")]
    FileNotHandled(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("OFF format error in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: off_lite_core::Error,
    },

    #[error("Geometry error: {0}")]
    Geometry(#[from] off_lite_geometry::Error),

    #[error("Write error: {0}")]
    Write(#[from] off_lite_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
