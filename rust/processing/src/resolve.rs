// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File name resolution and extension matching.

use crate::options::Options;
use std::path::{Path, PathBuf};

/// Lower-cased extension of a file name, without the dot.
pub fn lower_case_extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Locate a data file.
///
/// Existing paths are returned as given. Relative names are then tried
/// against each search path in order. `None` if nothing matches.
pub fn find_data_file(name: impl AsRef<Path>, options: &Options) -> Option<PathBuf> {
    let name = name.as_ref();
    if name.is_file() {
        return Some(name.to_path_buf());
    }
    if name.is_absolute() {
        return None;
    }

    options
        .search_paths
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_case_extension() {
        assert_eq!(lower_case_extension("mesh.OFF").as_deref(), Some("off"));
        assert_eq!(lower_case_extension("dir.v2/mesh.off").as_deref(), Some("off"));
        assert_eq!(lower_case_extension("mesh"), None);
    }

    #[test]
    fn test_missing_absolute_file() {
        let missing = std::env::temp_dir().join("off-lite-definitely-missing.off");
        assert_eq!(find_data_file(&missing, &Options::default()), None);
    }
}
