// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OFF writer
//!
//! Emits one line per vertex:
//!
//! ```text
//! x y z r g b nx ny nz
//! ```
//!
//! Colors are written as 0–255 integers, `255 255 255` when a vertex has
//! none, and normals fall back to `0.0 0.0 1.0`. By default only this vertex
//! block is written; [`WriteOptions`] can add the header, count line and
//! face list to produce a complete `NCOFF` document. Documents write colors
//! as 0–1 floats so the reader's scale detection gives them back unchanged.
//!
//! Positions are written as given. Flattening a scene hierarchy into a
//! single coordinate space happens before the writer is called.

use std::io::Write;

use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::mesh::{unique_edge_count, Color, Face, Mesh};

/// Keyword for complete documents; every vertex line carries color and normal fields
pub const DOCUMENT_KEYWORD: &str = "NCOFF";

/// One vertex ready to be written
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    pub position: Point3<f64>,
    pub color: Option<Color>,
    pub normal: Option<Vector3<f64>>,
}

impl VertexRecord {
    /// A bare position without color or normal
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            color: None,
            normal: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = Some(normal);
        self
    }
}

/// How color components are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorEncoding {
    /// 0–255 integers
    #[default]
    Rgb8,
    /// 0–1 floats
    Unit,
}

/// Writer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Prefix the vertex block with the `NCOFF` keyword and a count line
    pub emit_header: bool,
    /// Append face lines after the vertex block
    pub emit_faces: bool,
    /// Banner written as a `#` comment before everything else
    pub comment: Option<String>,
    /// Color component scale
    pub color_encoding: ColorEncoding,
}

impl WriteOptions {
    /// Header, counts, vertices and faces, with 0–1 colors
    pub fn document() -> Self {
        Self {
            emit_header: true,
            emit_faces: true,
            comment: None,
            color_encoding: ColorEncoding::Unit,
        }
    }
}

/// Streaming OFF writer over any [`Write`] sink
pub struct MeshWriter<W: Write> {
    sink: W,
    options: WriteOptions,
}

impl<W: Write> MeshWriter<W> {
    /// Writer that emits the vertex block only
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, WriteOptions::default())
    }

    pub fn with_options(sink: W, options: WriteOptions) -> Self {
        Self { sink, options }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Write one vertex line
    pub fn write_vertex(&mut self, record: &VertexRecord) -> Result<()> {
        let p = record.position;
        write!(self.sink, "{} {} {}", p.x, p.y, p.z)?;

        match (record.color, self.options.color_encoding) {
            (Some(color), ColorEncoding::Rgb8) => {
                let [r, g, b] = color.to_rgb8();
                write!(self.sink, " {} {} {}", r, g, b)?;
            }
            (Some(color), ColorEncoding::Unit) => {
                let c = color.clamped();
                write!(self.sink, " {} {} {}", c.r, c.g, c.b)?;
            }
            (None, ColorEncoding::Rgb8) => self.sink.write_all(b" 255 255 255")?,
            (None, ColorEncoding::Unit) => self.sink.write_all(b" 1 1 1")?,
        }

        match record.normal {
            Some(n) => write!(self.sink, " {} {} {}", n.x, n.y, n.z)?,
            None => self.sink.write_all(b" 0.0 0.0 1.0")?,
        }

        self.sink.write_all(b"\n")?;
        Ok(())
    }

    /// Write a sequence of vertex lines
    pub fn write_vertices<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a VertexRecord>,
    {
        for record in records {
            self.write_vertex(record)?;
        }
        Ok(())
    }

    /// Write world-space vertices and faces according to the options.
    ///
    /// Face indices address `records`. Faces are ignored unless
    /// `emit_faces` is set.
    pub fn write(&mut self, records: &[VertexRecord], faces: &[Face]) -> Result<()> {
        if let Some(comment) = &self.options.comment {
            for line in comment.lines() {
                writeln!(self.sink, "# {}", line)?;
            }
        }

        let faces: &[Face] = if self.options.emit_faces { faces } else { &[] };

        if self.options.emit_header {
            writeln!(self.sink, "{}", DOCUMENT_KEYWORD)?;
            writeln!(
                self.sink,
                "{} {} {}",
                records.len(),
                faces.len(),
                unique_edge_count(faces)
            )?;
        }

        self.write_vertices(records)?;

        for face in faces {
            self.write_face(face)?;
        }

        tracing::debug!(
            vertices = records.len(),
            faces = faces.len(),
            "OFF write complete"
        );
        Ok(())
    }

    /// Write a mesh whose vertices are already in the target space
    pub fn write_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        let records = vertex_records(mesh);
        self.write(&records, &mesh.faces)
    }

    /// Flush and return the sink
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn write_face(&mut self, face: &Face) -> Result<()> {
        write!(self.sink, "{}", face.len())?;
        for index in &face.indices {
            write!(self.sink, " {}", index)?;
        }
        self.sink.write_all(b"\n")?;
        Ok(())
    }
}

/// Vertex records for a mesh, homogeneous weights divided out
pub fn vertex_records(mesh: &Mesh) -> Vec<VertexRecord> {
    mesh.euclidean_vertices()
        .into_iter()
        .enumerate()
        .map(|(i, position)| VertexRecord {
            position,
            color: mesh.colors.as_ref().and_then(|c| c.get(i).copied()),
            normal: mesh.normals.as_ref().and_then(|n| n.get(i).copied()),
        })
        .collect()
}

/// Write the vertex block of a mesh with default options
pub fn write_off<W: Write>(mesh: &Mesh, sink: W) -> Result<()> {
    let mut writer = MeshWriter::new(sink);
    writer.write_mesh(mesh)?;
    writer.into_inner()?;
    Ok(())
}

/// Render a mesh to a string
pub fn to_off_string(mesh: &Mesh, options: WriteOptions) -> Result<String> {
    let mut writer = MeshWriter::with_options(Vec::new(), options);
    writer.write_mesh(mesh)?;
    let bytes = writer.into_inner()?;
    // Numbers, keywords and the caller's comment are all UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::CapabilityFlags;
    use crate::reader::parse_off;

    fn render(records: &[VertexRecord]) -> String {
        let mut out = Vec::new();
        MeshWriter::new(&mut out).write_vertices(records).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_fallback_channels() {
        let out = render(&[VertexRecord::new(Point3::new(1.0, 2.0, 3.0))]);
        assert_eq!(out, "1 2 3 255 255 255 0.0 0.0 1.0\n");
    }

    #[test]
    fn test_color_and_normal() {
        let record = VertexRecord::new(Point3::new(0.5, -1.25, 0.0))
            .with_color(Color::new(1.0, 0.5, 0.0))
            .with_normal(Vector3::new(0.0, 1.0, 0.0));
        let out = render(&[record]);
        assert_eq!(out, "0.5 -1.25 0 255 128 0 0 1 0\n");
    }

    #[test]
    fn test_vertex_block_has_no_faces() {
        let mesh = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
        let out = to_off_string(&mesh, WriteOptions::default()).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(!out.contains("OFF"));
    }

    #[test]
    fn test_vertex_block_round_trip() {
        let mut mesh = Mesh::new(CapabilityFlags::default());
        mesh.vertices = vec![
            Point3::new(0.125, -3.5, 10.0),
            Point3::new(1e-3, 2.0, -7.75),
            Point3::new(123.456, 0.0, 1.0 / 3.0),
        ];
        let out = to_off_string(&mesh, WriteOptions::default()).unwrap();

        // Re-read the vertex block under a header and count line
        let document = format!("NCOFF\n{} 0 0\n{}", mesh.vertex_count(), out);
        let reread = parse_off(&document).unwrap();
        for (a, b) in mesh.vertices.iter().zip(&reread.vertices) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_document_round_trip() {
        let content = "COFF
4 2 0
0 0 0 255 0 0
1 0 0 0 255 0
1 1 0 0 0 255
0 1 0 255 255 255
4 0 1 2 3
3 0 1 2
";
        let mesh = parse_off(content).unwrap();
        let options = WriteOptions {
            comment: Some("written by off-lite".to_string()),
            ..WriteOptions::document()
        };
        let out = to_off_string(&mesh, options).unwrap();

        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("# written by off-lite"));
        assert_eq!(lines.next(), Some("NCOFF"));
        assert_eq!(lines.next(), Some("4 2 5"));
        assert_eq!(lines.next(), Some("0 0 0 1 0 0 0.0 0.0 1.0"));

        let reread = parse_off(&out).unwrap();
        assert_eq!(reread.faces, mesh.faces);
        assert_eq!(reread.colors, mesh.colors);
        assert_eq!(reread.normals.as_ref().unwrap()[0], Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_dark_colors_survive_document() {
        let mut mesh = Mesh::new(CapabilityFlags {
            has_colors: true,
            ..Default::default()
        });
        mesh.vertices = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        mesh.colors = Some(vec![Color::new(0.002, 0.003, 0.001), Color::new(0.25, 1.0, 0.0)]);

        let out = to_off_string(&mesh, WriteOptions::document()).unwrap();
        let reread = parse_off(&out).unwrap();
        for (a, b) in mesh.colors.unwrap().iter().zip(reread.colors.unwrap().iter()) {
            assert!((a.r - b.r).abs() < 1e-6, "{:?} != {:?}", a, b);
            assert!((a.g - b.g).abs() < 1e-6, "{:?} != {:?}", a, b);
            assert!((a.b - b.b).abs() < 1e-6, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_unit_encoding_fallback_and_clamp() {
        let options = WriteOptions {
            color_encoding: ColorEncoding::Unit,
            ..Default::default()
        };
        let mut out = Vec::new();
        let mut writer = MeshWriter::with_options(&mut out, options);
        writer
            .write_vertex(&VertexRecord::new(Point3::new(1.0, 2.0, 3.0)))
            .unwrap();
        writer
            .write_vertex(
                &VertexRecord::new(Point3::new(0.0, 0.0, 0.0))
                    .with_color(Color::new(1.5, -0.5, 0.5)),
            )
            .unwrap();
        drop(writer);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1 2 3 1 1 1 0.0 0.0 1.0\n0 0 0 1 0 0.5 0.0 0.0 1.0\n"
        );
    }

    #[test]
    fn test_header_without_faces() {
        let mesh = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
        let options = WriteOptions {
            emit_header: true,
            ..Default::default()
        };
        let out = to_off_string(&mesh, options).unwrap();
        assert!(out.starts_with("NCOFF\n3 0 0\n"));
        assert_eq!(parse_off(&out).unwrap().face_count(), 0);
    }

    #[test]
    fn test_homogeneous_written_euclidean() {
        let mesh = parse_off("4OFF\n1 0 0\n2 4 6 2\n").unwrap();
        let out = to_off_string(&mesh, WriteOptions::default()).unwrap();
        assert_eq!(out, "1 2 3 255 255 255 0.0 0.0 1.0\n");
    }
}
