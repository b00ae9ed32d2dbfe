// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-oriented OFF reader
//!
//! The reader is a small state machine fed one line at a time:
//!
//! ```text
//! Header -> [Dim] -> Count -> Vertices -> Faces
//! ```
//!
//! Comment lines (`#`) and blank lines are skipped before dispatch. Any error
//! aborts the read; no partial mesh is ever handed out.

use std::fmt;
use std::io::BufRead;

use nalgebra::{Point2, Point3, Vector3};

use crate::error::{Error, Result};
use crate::header::{decode_header, VertexLayout};
use crate::mesh::{Color, Counts, Face, Mesh};
use crate::tokens::{is_blank_or_comment, parse_floats, parse_uints, strip_comment};

/// Upper bound on capacity reserved from the count line, so a corrupt header
/// cannot force a huge allocation before any vertex has been read.
const MAX_PREALLOC: usize = 1 << 20;

/// Minimum number of indices in a face
const MIN_FACE_INDICES: usize = 3;

/// Position of the reader within the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Header,
    Dim,
    Count,
    Vertices,
    Faces,
}

impl fmt::Display for ReaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReaderState::Header => "header",
            ReaderState::Dim => "dimension",
            ReaderState::Count => "counts",
            ReaderState::Vertices => "vertices",
            ReaderState::Faces => "faces",
        };
        f.write_str(name)
    }
}

/// Reader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Reject face indices that do not address a declared vertex
    pub validate_indices: bool,
    /// Reject face lines beyond the declared face count instead of keeping them
    pub strict_face_count: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            validate_indices: true,
            strict_face_count: false,
        }
    }
}

/// Incremental OFF reader
///
/// Feed lines with [`MeshReader::feed_line`] and call [`MeshReader::finish`]
/// once the input is exhausted, or use [`MeshReader::read`] /
/// [`MeshReader::read_str`] for whole streams. After `feed_line` returns an
/// error the reader must be dropped.
#[derive(Debug)]
pub struct MeshReader {
    options: ReadOptions,
    state: ReaderState,
    line_no: usize,
    layout: VertexLayout,
    counts: Counts,
    mesh: Mesh,
    warned_extra_faces: bool,
}

impl Default for MeshReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshReader {
    /// Create a reader with default options
    pub fn new() -> Self {
        Self::with_options(ReadOptions::default())
    }

    /// Create a reader with custom options
    pub fn with_options(options: ReadOptions) -> Self {
        let mesh = Mesh::default();
        let layout = mesh.flags.vertex_layout();
        Self {
            options,
            state: ReaderState::Header,
            line_no: 0,
            layout,
            counts: Counts::default(),
            mesh,
            warned_extra_faces: false,
        }
    }

    /// Current state of the state machine
    #[inline]
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Number of lines fed so far
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Counts from the count line, zero until it has been read
    #[inline]
    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Read a whole stream
    pub fn read<R: BufRead>(mut self, reader: R) -> Result<Mesh> {
        for line in reader.lines() {
            self.feed_line(&line?)?;
        }
        self.finish()
    }

    /// Read a whole in-memory document
    pub fn read_str(mut self, content: &str) -> Result<Mesh> {
        for line in content.lines() {
            self.feed_line(line)?;
        }
        self.finish()
    }

    /// Process one line of input (without its terminator)
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;

        if is_blank_or_comment(line) {
            tracing::trace!(line = self.line_no, "Skipping comment or blank line");
            return Ok(());
        }

        match self.state {
            ReaderState::Header => self.read_header(line),
            ReaderState::Dim => self.read_dimension(line),
            ReaderState::Count => self.read_counts(line),
            ReaderState::Vertices => self.read_vertex(line),
            ReaderState::Faces => self.read_face(line),
        }
    }

    /// Finish reading and check that the declared counts were satisfied
    pub fn finish(self) -> Result<Mesh> {
        let (expected, found) = match self.state {
            ReaderState::Header | ReaderState::Dim => (1, 0),
            ReaderState::Count => (3, 0),
            ReaderState::Vertices => (self.counts.vertex_count, self.mesh.vertex_count()),
            ReaderState::Faces => {
                if self.mesh.face_count() >= self.counts.face_count {
                    tracing::debug!(
                        vertices = self.mesh.vertex_count(),
                        faces = self.mesh.face_count(),
                        "OFF read complete"
                    );
                    return Ok(self.mesh);
                }
                (self.counts.face_count, self.mesh.face_count())
            }
        };

        Err(Error::TruncatedInput {
            state: self.state,
            expected,
            found,
        })
    }

    fn read_header(&mut self, line: &str) -> Result<()> {
        let flags = decode_header(strip_comment(line), self.line_no)?;
        tracing::debug!(keyword = %flags.keyword(), "Decoded OFF header");

        self.layout = flags.vertex_layout();
        self.mesh = Mesh::new(flags);
        self.state = if flags.has_explicit_dimension {
            ReaderState::Dim
        } else {
            ReaderState::Count
        };
        Ok(())
    }

    fn read_dimension(&mut self, line: &str) -> Result<()> {
        let values = parse_uints(line);
        match values.len() {
            1 => {
                let dimension = u32::try_from(values[0]).map_err(|_| Error::MalformedDimension {
                    line: self.line_no,
                    content: line.to_string(),
                })?;
                if dimension != 3 {
                    tracing::warn!(dimension, "Only 3D points are supported, reading as 3D");
                }
                self.mesh.dimension = Some(dimension);
                self.state = ReaderState::Count;
                Ok(())
            }
            // No dimension line, this is already the count line
            n if n >= 3 => {
                self.state = ReaderState::Count;
                self.read_counts(line)
            }
            _ => Err(Error::MalformedDimension {
                line: self.line_no,
                content: line.to_string(),
            }),
        }
    }

    fn read_counts(&mut self, line: &str) -> Result<()> {
        let values = parse_uints(line);
        if values.len() < 3 {
            return Err(Error::MalformedCounts {
                line: self.line_no,
                expected: 3,
                found: values.len(),
            });
        }

        self.counts = Counts {
            vertex_count: values[0] as usize,
            face_count: values[1] as usize,
            edge_count: values[2] as usize,
        };
        tracing::debug!(
            vertices = self.counts.vertex_count,
            faces = self.counts.face_count,
            edges = self.counts.edge_count,
            "Read OFF counts"
        );

        let mut mesh = Mesh::with_capacity(
            self.mesh.flags,
            self.counts.vertex_count.min(MAX_PREALLOC),
            self.counts.face_count.min(MAX_PREALLOC),
        );
        mesh.dimension = self.mesh.dimension;
        mesh.declared_edge_count = self.counts.edge_count;
        self.mesh = mesh;

        self.state = if self.counts.vertex_count == 0 {
            ReaderState::Faces
        } else {
            ReaderState::Vertices
        };
        Ok(())
    }

    fn read_vertex(&mut self, line: &str) -> Result<()> {
        let values = parse_floats(line);
        let layout = self.layout;
        if values.len() < layout.required {
            return Err(Error::MalformedVertex {
                line: self.line_no,
                expected: layout.required,
                found: values.len(),
            });
        }

        let mesh = &mut self.mesh;
        mesh.vertices.push(Point3::new(values[0], values[1], values[2]));
        if let Some(weights) = mesh.weights.as_mut() {
            weights.push(values[3]);
        }
        if let (Some(colors), Some(at)) = (mesh.colors.as_mut(), layout.color_offset) {
            colors.push(Color::from_file_components(
                values[at],
                values[at + 1],
                values[at + 2],
            ));
        }
        if let (Some(normals), Some(at)) = (mesh.normals.as_mut(), layout.normal_offset) {
            normals.push(Vector3::new(values[at], values[at + 1], values[at + 2]));
        }
        if let (Some(tex_coords), Some(at)) = (mesh.tex_coords.as_mut(), layout.texture_offset) {
            tex_coords.push(Point2::new(values[at], values[at + 1]));
        }

        if mesh.vertex_count() == self.counts.vertex_count {
            self.state = ReaderState::Faces;
        }
        Ok(())
    }

    fn read_face(&mut self, line: &str) -> Result<()> {
        let values = parse_uints(line);

        // First value is the polygon size; it is trusted and not re-checked
        let raw = values.get(1..).unwrap_or_default();
        if raw.len() < MIN_FACE_INDICES {
            return Err(Error::MalformedFace {
                line: self.line_no,
                expected: MIN_FACE_INDICES,
                found: raw.len(),
            });
        }

        let vertex_count = self.mesh.vertex_count();
        let mut indices = Vec::with_capacity(raw.len());
        for &value in raw {
            let in_range = !self.options.validate_indices || value < vertex_count as u64;
            match u32::try_from(value) {
                Ok(index) if in_range => indices.push(index),
                _ => {
                    return Err(Error::IndexOutOfRange {
                        line: self.line_no,
                        index: value,
                        vertex_count,
                    });
                }
            }
        }

        if self.mesh.face_count() >= self.counts.face_count {
            if self.options.strict_face_count {
                return Err(Error::ExtraFace {
                    line: self.line_no,
                    declared: self.counts.face_count,
                });
            }
            if !self.warned_extra_faces {
                tracing::warn!(
                    line = self.line_no,
                    declared = self.counts.face_count,
                    "More faces than declared, keeping them"
                );
                self.warned_extra_faces = true;
            }
        }

        self.mesh.faces.push(Face::new(indices));
        Ok(())
    }
}

/// Read a mesh from a buffered stream with default options
pub fn read_off<R: BufRead>(reader: R) -> Result<Mesh> {
    MeshReader::new().read(reader)
}

/// Parse a mesh from an in-memory document with default options
pub fn parse_off(content: &str) -> Result<Mesh> {
    MeshReader::new().read_str(content)
}
