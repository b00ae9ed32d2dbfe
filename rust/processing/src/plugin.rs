// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File-level OFF reader/writer.
//!
//! Wraps the core reader and writer with extension matching, search-path
//! resolution and scene export. Outcomes are reported as values so hosts
//! can tell "not my file" apart from a hard failure.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use off_lite_core::{Face, Mesh, MeshReader, MeshWriter, VertexRecord};
use off_lite_geometry::{flatten, merge, Drawable, TransformNode};
use rayon::prelude::*;

use crate::error::{ProcessingError, Result};
use crate::options::Options;
use crate::resolve::{find_data_file, lower_case_extension};

/// Outcome of a file read.
#[derive(Debug)]
pub enum ReadResult {
    Mesh(Mesh),
    FileNotHandled,
    FileNotFound,
    Error(ProcessingError),
}

impl ReadResult {
    /// Convert into a `Result`, naming `file` in not-handled/not-found errors.
    pub fn into_result(self, file: impl AsRef<Path>) -> Result<Mesh> {
        let file = file.as_ref().to_path_buf();
        match self {
            ReadResult::Mesh(mesh) => Ok(mesh),
            ReadResult::FileNotHandled => Err(ProcessingError::FileNotHandled(file)),
            ReadResult::FileNotFound => Err(ProcessingError::FileNotFound(file)),
            ReadResult::Error(e) => Err(e),
        }
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self, ReadResult::Mesh(_))
    }
}

/// Outcome of a file write.
#[derive(Debug)]
pub enum WriteResult {
    FileSaved,
    FileNotHandled,
    Error(ProcessingError),
}

impl WriteResult {
    pub fn into_result(self, file: impl AsRef<Path>) -> Result<()> {
        match self {
            WriteResult::FileSaved => Ok(()),
            WriteResult::FileNotHandled => {
                Err(ProcessingError::FileNotHandled(file.as_ref().to_path_buf()))
            }
            WriteResult::Error(e) => Err(e),
        }
    }
}

/// Reader/writer for `.off` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderWriterOff;

impl ReaderWriterOff {
    pub const EXTENSION: &'static str = "off";
    pub const DESCRIPTION: &'static str = "Geomview Object File Format";

    pub fn new() -> Self {
        Self
    }

    /// Case-insensitive extension check.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(Self::EXTENSION)
    }

    fn accepts_file(&self, file: &Path) -> bool {
        lower_case_extension(file).map_or(false, |ext| self.accepts_extension(&ext))
    }

    /// Resolve and read one file.
    pub fn read_node(&self, file: impl AsRef<Path>, options: &Options) -> ReadResult {
        let file = file.as_ref();
        if !self.accepts_file(file) {
            return ReadResult::FileNotHandled;
        }

        let Some(path) = find_data_file(file, options) else {
            return ReadResult::FileNotFound;
        };

        tracing::info!(path = %path.display(), "Reading file");
        match self.read_path(&path, options) {
            Ok(mesh) => ReadResult::Mesh(mesh),
            Err(e) => {
                tracing::info!(path = %path.display(), error = %e, "Error in file");
                ReadResult::Error(e)
            }
        }
    }

    /// Read several files in parallel; results keep input order.
    pub fn read_many(&self, files: &[PathBuf], options: &Options) -> Vec<(PathBuf, ReadResult)> {
        files
            .par_iter()
            .map(|file| (file.clone(), self.read_node(file, options)))
            .collect()
    }

    /// Flatten a transform hierarchy and write it to `file`.
    pub fn write_node(
        &self,
        root: &TransformNode,
        file: impl AsRef<Path>,
        options: &Options,
    ) -> WriteResult {
        let file = file.as_ref();
        if !self.accepts_file(file) {
            return WriteResult::FileNotHandled;
        }

        tracing::info!(path = %file.display(), "Writing file");
        match write_scene_to(root, file, options) {
            Ok(()) => WriteResult::FileSaved,
            Err(e) => WriteResult::Error(e),
        }
    }

    /// Write a single mesh, already in its target space, to `file`.
    pub fn write_mesh(&self, mesh: &Mesh, file: impl AsRef<Path>, options: &Options) -> WriteResult {
        let root = TransformNode::default().with_drawable(Drawable::from_mesh(mesh));
        self.write_node(&root, file, options)
    }

    fn read_path(&self, path: &Path, options: &Options) -> Result<Mesh> {
        let reader = BufReader::new(File::open(path)?);
        MeshReader::with_options(options.read)
            .read(reader)
            .map_err(|source| ProcessingError::Format {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Flatten first so geometry errors never leave a file behind
fn write_scene_to(root: &TransformNode, file: &Path, options: &Options) -> Result<()> {
    let (records, faces) = merge(&flatten(root)?)?;

    let sink = BufWriter::new(File::create(file)?);
    let result = write_records(sink, &records, &faces, options);
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(file) {
            tracing::warn!(path = %file.display(), error = %e, "Could not remove partial output");
        }
    }
    result
}

fn write_records(
    sink: BufWriter<File>,
    records: &[VertexRecord],
    faces: &[Face],
    options: &Options,
) -> Result<()> {
    let mut writer = MeshWriter::with_options(sink, options.write.clone());
    writer.write(records, faces)?;
    writer.into_inner()?;
    Ok(())
}
