// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use off_lite_core::{Color, Error, Face, WriteOptions};
use off_lite_geometry::{translation, Drawable, Point3, TransformNode};
use off_lite_processing::{Options, ProcessingError, ReadResult, ReaderWriterOff, WriteResult};
use std::fs;
use std::path::PathBuf;

const TRIANGLE: &str = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";

/// Fresh scratch directory per test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("off-lite-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_read_via_search_path() {
    let dir = scratch_dir("search");
    fs::write(dir.join("tri.OFF"), TRIANGLE).unwrap();

    let rw = ReaderWriterOff::new();
    assert!(matches!(
        rw.read_node("tri.OFF", &Options::default()),
        ReadResult::FileNotFound
    ));

    let options = Options::default().with_search_path(&dir);
    let mesh = rw.read_node("tri.OFF", &options).into_result("tri.OFF").unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.faces[0].indices, vec![0, 1, 2]);
}

#[test]
fn test_format_error_is_reported() {
    let dir = scratch_dir("format");
    let path = dir.join("bad.off");
    fs::write(&path, "OFF\n3 1\n").unwrap();

    let result = ReaderWriterOff::new().read_node(&path, &Options::default());
    match result {
        ReadResult::Error(ProcessingError::Format { path: p, source }) => {
            assert_eq!(p, path);
            assert!(matches!(source, Error::MalformedCounts { line: 2, .. }));
        }
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_write_then_read_document() {
    let dir = scratch_dir("write");
    let path = dir.join("scene.off");

    let mesh = off_lite_core::parse_off(TRIANGLE).unwrap();
    let root = TransformNode::new(translation(0.0, 0.0, 1.5))
        .with_drawable(Drawable::from_mesh(&mesh));

    let options = Options {
        write: WriteOptions::document(),
        ..Options::default()
    };
    let rw = ReaderWriterOff::new();
    assert!(matches!(
        rw.write_node(&root, &path, &options),
        WriteResult::FileSaved
    ));

    let reread = rw.read_node(&path, &options).into_result(&path).unwrap();
    assert_eq!(reread.vertex_count(), 3);
    assert_eq!(reread.faces, mesh.faces);
    assert_relative_eq!(reread.vertices[1], Point3::new(1.0, 0.0, 1.5));
}

#[test]
fn test_failed_write_leaves_no_file() {
    let dir = scratch_dir("failed-write");
    let rw = ReaderWriterOff::new();

    let mut short_colors = Drawable::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
    short_colors.colors = Some(vec![Color::WHITE]);
    let path = dir.join("colors.off");
    let result = rw.write_node(
        &TransformNode::default().with_drawable(short_colors),
        &path,
        &Options::default(),
    );
    assert!(matches!(
        result,
        WriteResult::Error(ProcessingError::Geometry(
            off_lite_geometry::Error::ChannelLength { channel: "color", .. }
        ))
    ));
    assert!(!path.exists());

    let mut bad_face = Drawable::new(vec![Point3::origin(); 3]);
    bad_face.faces.push(Face::from(vec![0, 1, 4]));
    let path = dir.join("faces.off");
    let result = rw.write_node(
        &TransformNode::default().with_drawable(bad_face),
        &path,
        &Options::default(),
    );
    assert!(matches!(
        result,
        WriteResult::Error(ProcessingError::Geometry(
            off_lite_geometry::Error::FaceIndex { index: 4, .. }
        ))
    ));
    assert!(!path.exists());
}

#[test]
fn test_legacy_vertex_block_output() {
    let dir = scratch_dir("legacy");
    let path = dir.join("points.off");

    let mesh = off_lite_core::parse_off(TRIANGLE).unwrap();
    let result = ReaderWriterOff::new().write_mesh(&mesh, &path, &Options::default());
    assert!(matches!(result, WriteResult::FileSaved));

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "0 0 0 255 255 255 0.0 0.0 1.0\n1 0 0 255 255 255 0.0 0.0 1.0\n0 1 0 255 255 255 0.0 0.0 1.0\n"
    );
}

#[test]
fn test_read_many_keeps_order() {
    let dir = scratch_dir("many");
    let good = dir.join("good.off");
    let bad = dir.join("bad.off");
    fs::write(&good, TRIANGLE).unwrap();
    fs::write(&bad, "COFF\n1 0 0\n0 0 0\n").unwrap();

    let files = vec![
        good.clone(),
        dir.join("missing.off"),
        dir.join("mesh.obj"),
        bad.clone(),
    ];
    let results = ReaderWriterOff::new().read_many(&files, &Options::default());

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].0, good);
    assert!(results[0].1.is_mesh());
    assert!(matches!(results[1].1, ReadResult::FileNotFound));
    assert!(matches!(results[2].1, ReadResult::FileNotHandled));
    assert!(matches!(
        results[3].1,
        ReadResult::Error(ProcessingError::Format {
            source: Error::MalformedVertex { .. },
            ..
        })
    ));
}
