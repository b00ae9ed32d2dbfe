// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OFF-Lite file processing
//!
//! File-level entry points around the core reader and writer: extension
//! matching, search-path resolution, scene export and parallel batch reads.

pub mod error;
pub mod options;
pub mod plugin;
pub mod resolve;
pub mod summary;

pub use error::{ProcessingError, Result};
pub use options::Options;
pub use plugin::{ReadResult, ReaderWriterOff, WriteResult};
pub use resolve::{find_data_file, lower_case_extension};
pub use summary::MeshSummary;
