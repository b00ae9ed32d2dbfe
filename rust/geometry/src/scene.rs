// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transform hierarchy flattening for export
//!
//! A [`TransformNode`] tree carries local transforms and the drawables
//! attached below them. [`flatten`] walks the tree depth-first, composes each
//! node's local-to-world matrix and produces world-space vertex records that
//! the OFF writer can emit directly.

use std::io::Write;

use nalgebra::{Matrix4, Point3, Vector3};
use off_lite_core::{Color, Face, Mesh, MeshWriter, VertexRecord};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::transform::{normal_matrix, transform_normal};

/// Drawables with at least this many vertices are transformed in parallel
const PARALLEL_VERTEX_THRESHOLD: usize = 16_384;

/// One unit of geometry in local coordinates
#[derive(Debug, Clone, Default)]
pub struct Drawable {
    pub positions: Vec<Point3<f64>>,
    pub colors: Option<Vec<Color>>,
    pub normals: Option<Vec<Vector3<f64>>>,
    /// Polygons indexing `positions`
    pub faces: Vec<Face>,
}

impl Drawable {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            ..Default::default()
        }
    }

    /// Wrap a decoded mesh, dividing out homogeneous weights
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            positions: mesh.euclidean_vertices(),
            colors: mesh.colors.clone(),
            normals: mesh.normals.clone(),
            faces: mesh.faces.clone(),
        }
    }

    /// Check that optional channels match the vertex count and that every
    /// face index addresses one of this drawable's positions
    pub fn validate(&self) -> Result<()> {
        let expected = self.positions.len();
        check_face_indices(&self.faces, expected)?;
        if let Some(colors) = &self.colors {
            if colors.len() != expected {
                return Err(Error::ChannelLength {
                    channel: "color",
                    expected,
                    found: colors.len(),
                });
            }
        }
        if let Some(normals) = &self.normals {
            if normals.len() != expected {
                return Err(Error::ChannelLength {
                    channel: "normal",
                    expected,
                    found: normals.len(),
                });
            }
        }
        Ok(())
    }
}

/// Node of a transform hierarchy
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub name: Option<String>,
    /// Transform from this node's space to its parent's
    pub local: Matrix4<f64>,
    pub drawables: Vec<Drawable>,
    pub children: Vec<TransformNode>,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new(Matrix4::identity())
    }
}

impl TransformNode {
    pub fn new(local: Matrix4<f64>) -> Self {
        Self {
            name: None,
            local,
            drawables: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_drawable(mut self, drawable: Drawable) -> Self {
        self.drawables.push(drawable);
        self
    }

    pub fn with_child(mut self, child: TransformNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of drawables in this subtree
    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
            + self
                .children
                .iter()
                .map(TransformNode::drawable_count)
                .sum::<usize>()
    }
}

/// A drawable moved into world space
#[derive(Debug, Clone)]
pub struct WorldDrawable {
    /// Accumulated local-to-world transform
    pub world: Matrix4<f64>,
    pub records: Vec<VertexRecord>,
    pub faces: Vec<Face>,
}

/// Flatten a hierarchy into world-space drawables, in depth-first order
pub fn flatten(root: &TransformNode) -> Result<Vec<WorldDrawable>> {
    let mut out = Vec::with_capacity(root.drawable_count());
    let mut stack: Vec<(&TransformNode, Matrix4<f64>)> = vec![(root, root.local)];

    while let Some((node, world)) = stack.pop() {
        for drawable in &node.drawables {
            out.push(to_world(drawable, &world)?);
        }
        // Reverse so the first child is visited first
        for child in node.children.iter().rev() {
            stack.push((child, world * child.local));
        }
    }

    tracing::debug!(drawables = out.len(), "Flattened transform hierarchy");
    Ok(out)
}

/// Transform one drawable by a local-to-world matrix
pub fn to_world(drawable: &Drawable, world: &Matrix4<f64>) -> Result<WorldDrawable> {
    drawable.validate()?;

    let normal_xform = match (&drawable.normals, normal_matrix(world)) {
        (Some(_), Ok(m)) => Some(m),
        (Some(_), Err(e)) => {
            tracing::warn!(error = %e, "Keeping normals untransformed");
            None
        }
        (None, _) => None,
    };

    let build = |i: usize| {
        let position = world.transform_point(&drawable.positions[i]);
        let normal = drawable.normals.as_ref().map(|normals| match &normal_xform {
            Some(m) => transform_normal(m, &normals[i]),
            None => normals[i],
        });
        VertexRecord {
            position,
            color: drawable.colors.as_ref().map(|c| c[i]),
            normal,
        }
    };

    let n = drawable.positions.len();
    let records: Vec<VertexRecord> = if n >= PARALLEL_VERTEX_THRESHOLD {
        (0..n).into_par_iter().map(build).collect()
    } else {
        (0..n).map(build).collect()
    };

    Ok(WorldDrawable {
        world: *world,
        records,
        faces: drawable.faces.clone(),
    })
}

/// Concatenate world drawables, rebasing face indices by vertex offset
pub fn merge(drawables: &[WorldDrawable]) -> Result<(Vec<VertexRecord>, Vec<Face>)> {
    let vertex_total: usize = drawables.iter().map(|d| d.records.len()).sum();
    if u32::try_from(vertex_total).is_err() {
        return Err(Error::TooManyVertices(vertex_total));
    }

    let face_total = drawables.iter().map(|d| d.faces.len()).sum();
    let mut records = Vec::with_capacity(vertex_total);
    let mut faces = Vec::with_capacity(face_total);

    for drawable in drawables {
        check_face_indices(&drawable.faces, drawable.records.len())?;

        let vertex_offset = records.len() as u32;
        records.extend_from_slice(&drawable.records);
        for face in &drawable.faces {
            let indices = face
                .indices
                .iter()
                .map(|&i| i.checked_add(vertex_offset))
                .collect::<Option<Vec<u32>>>()
                .ok_or(Error::TooManyVertices(vertex_total))?;
            faces.push(Face::new(indices));
        }
    }

    Ok((records, faces))
}

fn check_face_indices(faces: &[Face], vertex_count: usize) -> Result<()> {
    let out_of_range = faces
        .iter()
        .flat_map(|face| face.indices.iter())
        .find(|&&index| index as usize >= vertex_count);
    match out_of_range {
        Some(&index) => Err(Error::FaceIndex {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

/// Flatten a hierarchy and write it through `writer`
pub fn export_scene<W: Write>(root: &TransformNode, writer: &mut MeshWriter<W>) -> Result<()> {
    let drawables = flatten(root)?;
    let (records, faces) = merge(&drawables)?;
    writer.write(&records, &faces)?;
    Ok(())
}
