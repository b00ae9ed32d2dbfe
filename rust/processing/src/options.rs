// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Processing options loaded from environment variables.

use off_lite_core::{ReadOptions, WriteOptions};
use std::path::PathBuf;

/// Options shared by read and write entry points.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Directories searched for relative file names.
    pub search_paths: Vec<PathBuf>,
    /// Reader configuration.
    pub read: ReadOptions,
    /// Writer configuration.
    pub write: WriteOptions,
}

impl Options {
    /// Load options from environment variables.
    ///
    /// - `OFF_FILE_PATH`: search path list (platform separator)
    /// - `OFF_VALIDATE_INDICES`: reject out-of-range face indices (default true)
    /// - `OFF_STRICT_FACES`: reject faces beyond the declared count (default false)
    /// - `OFF_WRITE_FACES`: write complete documents instead of vertex blocks (default false)
    pub fn from_env() -> Self {
        let defaults = ReadOptions::default();
        let write_faces = env_flag("OFF_WRITE_FACES", false);

        Self {
            search_paths: std::env::var_os("OFF_FILE_PATH")
                .map(|paths| std::env::split_paths(&paths).collect())
                .unwrap_or_default(),
            read: ReadOptions {
                validate_indices: env_flag("OFF_VALIDATE_INDICES", defaults.validate_indices),
                strict_face_count: env_flag("OFF_STRICT_FACES", defaults.strict_face_count),
            },
            write: if write_faces {
                WriteOptions::document()
            } else {
                WriteOptions::default()
            },
        }
    }

    /// Add a search directory.
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }
}

/// Read a boolean environment variable, falling back to `default`.
fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|value| parse_flag(&value))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
