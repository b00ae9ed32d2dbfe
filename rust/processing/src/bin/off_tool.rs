// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: inspect and rewrite Geomview OFF files
//!
//! Usage:
//!   off-tool info <file.off>... [--json]
//!   off-tool convert <input.off> <output.off> [--faces] [--translate x y z]

use anyhow::{bail, Context};
use off_lite_core::WriteOptions;
use off_lite_geometry::{translation, Drawable, Matrix4, TransformNode};
use off_lite_processing::{MeshSummary, Options, ReaderWriterOff};
use std::env;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }

    let options = Options::from_env();
    match args[1].as_str() {
        "info" => info(&args[2..], &options),
        "convert" => convert(&args[2..], options),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn info(args: &[String], options: &Options) -> anyhow::Result<()> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            other => files.push(PathBuf::from(other)),
        }
    }
    if files.is_empty() {
        bail!("info: no input files");
    }

    let rw = ReaderWriterOff::new();
    let mut failed = 0;
    for (file, result) in rw.read_many(&files, options) {
        let mesh = match result.into_result(&file) {
            Ok(mesh) => mesh,
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                failed += 1;
                continue;
            }
        };

        let summary = MeshSummary::from_mesh(&mesh);
        if json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            print_summary(&file, &summary);
        }
    }

    if failed > 0 {
        bail!("{} of {} files could not be read", failed, files.len());
    }
    Ok(())
}

fn convert(args: &[String], mut options: Options) -> anyhow::Result<()> {
    let mut positional: Vec<&str> = Vec::new();
    let mut local = Matrix4::identity();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--faces" => options.write = WriteOptions::document(),
            "--translate" => {
                let values = args
                    .get(i + 1..i + 4)
                    .context("--translate needs three values")?
                    .iter()
                    .map(|v| v.parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .context("Invalid --translate value")?;
                local = translation(values[0], values[1], values[2]);
                i += 3;
            }
            other => positional.push(other),
        }
        i += 1;
    }

    let &[input, output] = positional.as_slice() else {
        bail!("convert: expected <input.off> <output.off>");
    };

    let rw = ReaderWriterOff::new();
    let mesh = rw
        .read_node(input, &options)
        .into_result(input)
        .with_context(|| format!("Cannot read '{}'", input))?;

    options.write.comment = Some(format!("converted from {}", input));
    let root = TransformNode::new(local).with_drawable(Drawable::from_mesh(&mesh));
    rw.write_node(&root, output, &options)
        .into_result(output)
        .with_context(|| format!("Cannot write '{}'", output))?;

    tracing::info!(
        input,
        output,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Converted"
    );
    Ok(())
}

fn print_summary(file: &Path, summary: &MeshSummary) {
    println!("{}", file.display());
    println!("  Header:   {}", summary.keyword);
    if let Some(dimension) = summary.dimension {
        println!("  Dimension: {}", dimension);
    }
    println!("  Vertices: {}", summary.vertex_count);
    println!("  Faces:    {}", summary.face_count);
    println!(
        "  Edges:    {} (declared {})",
        summary.unique_edge_count, summary.declared_edge_count
    );
    for (size, count) in &summary.face_sizes {
        println!("    {}-gons: {}", size, count);
    }
    if let (Some(min), Some(max)) = (summary.bounds_min, summary.bounds_max) {
        println!(
            "  Bounds:   min=({:.3}, {:.3}, {:.3}), max=({:.3}, {:.3}, {:.3})",
            min[0], min[1], min[2], max[0], max[1], max[2]
        );
    }
}

fn print_usage() {
    println!("off-tool - inspect and rewrite Geomview OFF files");
    println!();
    println!("Usage:");
    println!("  off-tool info <file.off>... [--json]");
    println!("  off-tool convert <input.off> <output.off> [--faces] [--translate x y z]");
    println!();
    println!("Environment:");
    println!("  OFF_FILE_PATH         search path for relative file names");
    println!("  OFF_VALIDATE_INDICES  reject out-of-range face indices (default: true)");
    println!("  OFF_STRICT_FACES      reject faces beyond the declared count (default: false)");
    println!("  OFF_WRITE_FACES       write header and faces on convert (default: false)");
    println!("  RUST_LOG              log filter (default: info)");
}
