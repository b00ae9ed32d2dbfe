// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OFF-Lite Core
//!
//! Streaming reader and writer for the Geomview Object File Format (OFF).
//!
//! ## Overview
//!
//! - **Header decoding**: `[ST][N][C][4][n]OFF` keywords parsed with [nom](https://docs.rs/nom)
//!   into [`CapabilityFlags`]
//! - **Reading**: a line-oriented state machine ([`MeshReader`]) producing an indexed [`Mesh`]
//! - **Writing**: [`MeshWriter`] emits vertex lines (and optionally a complete document)
//! - **Number parsing**: [fast-float](https://docs.rs/fast-float) and
//!   [lexical-core](https://docs.rs/lexical-core) over per-line `SmallVec` buffers
//!
//! ## Quick Start
//!
//! ```rust
//! use off_lite_core::{parse_off, to_off_string, WriteOptions};
//!
//! let content = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
//! let mesh = parse_off(content).unwrap();
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.faces[0].indices, vec![0, 1, 2]);
//!
//! let text = to_off_string(&mesh, WriteOptions::document()).unwrap();
//! assert!(text.starts_with("NCOFF\n3 1 3\n"));
//! ```
//!
//! ## Feeding lines
//!
//! ```rust
//! use off_lite_core::{MeshReader, ReaderState};
//!
//! let mut reader = MeshReader::new();
//! reader.feed_line("OFF").unwrap();
//! reader.feed_line("0 0 0").unwrap();
//! assert_eq!(reader.state(), ReaderState::Faces);
//! let mesh = reader.finish().unwrap();
//! assert!(mesh.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for flags, counts, faces and colors

pub mod error;
pub mod header;
pub mod mesh;
pub mod reader;
pub mod tokens;
pub mod writer;

pub use error::{Error, Result};
pub use header::{decode_header, CapabilityFlags, VertexLayout};
pub use mesh::{unique_edge_count, Color, Counts, Face, Mesh};
pub use reader::{parse_off, read_off, MeshReader, ReadOptions, ReaderState};
pub use writer::{
    to_off_string, vertex_records, write_off, ColorEncoding, MeshWriter, VertexRecord,
    WriteOptions, DOCUMENT_KEYWORD,
};
