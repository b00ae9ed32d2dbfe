// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed polygon mesh decoded from OFF

use nalgebra::{Point2, Point3, Vector3};
use rustc_hash::FxHashSet;

use crate::header::CapabilityFlags;

/// Per-vertex color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Fallback color written for vertices without one
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from raw file components.
    ///
    /// OFF files use either 0–1 floats or 0–255 integers. If any component
    /// is above 1.0 the triple is taken as 0–255 and scaled down.
    pub fn from_file_components(r: f64, g: f64, b: f64) -> Self {
        if r > 1.0 || g > 1.0 || b > 1.0 {
            Self::new((r / 255.0) as f32, (g / 255.0) as f32, (b / 255.0) as f32)
        } else {
            Self::new(r as f32, g as f32, b as f32)
        }
    }

    /// Components clamped to 0.0..=1.0
    #[inline]
    pub fn clamped(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Components as 0–255 integers, clamped and rounded
    #[inline]
    pub fn to_rgb8(&self) -> [u8; 3] {
        #[inline]
        fn channel(value: f32) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// One polygon as 0-based indices into the vertex list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face {
    pub indices: Vec<u32>,
}

impl Face {
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Undirected edges of the polygon boundary, smaller index first
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| {
            let a = self.indices[i];
            let b = self.indices[(i + 1) % n];
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        })
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Self::new(indices)
    }
}

/// Number of distinct undirected edges over a set of faces
pub fn unique_edge_count(faces: &[Face]) -> usize {
    let mut edges: FxHashSet<(u32, u32)> = FxHashSet::default();
    for face in faces {
        edges.extend(face.edges());
    }
    edges.len()
}

/// Element counts from the count line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counts {
    pub vertex_count: usize,
    pub face_count: usize,
    /// Required by the format, unused by mesh consumers
    pub edge_count: usize,
}

/// Indexed polygon mesh
///
/// Optional channels are `Some` exactly when the header announced them and,
/// after a successful read, hold one entry per vertex.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Flags the mesh was decoded with
    pub flags: CapabilityFlags,
    /// Value of the dimension line for `nOFF` files
    pub dimension: Option<u32>,
    /// Vertex positions (x, y, z)
    pub vertices: Vec<Point3<f64>>,
    /// Homogeneous weights (w) for `4OFF` files
    pub weights: Option<Vec<f64>>,
    /// Vertex colors
    pub colors: Option<Vec<Color>>,
    /// Vertex normals
    pub normals: Option<Vec<Vector3<f64>>>,
    /// Texture coordinates (s, t)
    pub tex_coords: Option<Vec<Point2<f64>>>,
    /// Polygons
    pub faces: Vec<Face>,
    /// Edge count as declared by the file
    pub declared_edge_count: usize,
}

impl Mesh {
    /// Create an empty mesh whose optional channels follow `flags`
    pub fn new(flags: CapabilityFlags) -> Self {
        Self::with_capacity(flags, 0, 0)
    }

    /// Create a mesh with capacity
    pub fn with_capacity(flags: CapabilityFlags, vertex_count: usize, face_count: usize) -> Self {
        Self {
            flags,
            dimension: None,
            vertices: Vec::with_capacity(vertex_count),
            weights: flags
                .has_homogeneous_coord
                .then(|| Vec::with_capacity(vertex_count)),
            colors: flags.has_colors.then(|| Vec::with_capacity(vertex_count)),
            normals: flags.has_normals.then(|| Vec::with_capacity(vertex_count)),
            tex_coords: flags
                .has_texture_coords
                .then(|| Vec::with_capacity(vertex_count)),
            faces: Vec::with_capacity(face_count),
            declared_edge_count: 0,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Check that every present channel has one entry per vertex
    pub fn channels_consistent(&self) -> bool {
        let n = self.vertices.len();
        self.weights.as_ref().map_or(true, |w| w.len() == n)
            && self.colors.as_ref().map_or(true, |c| c.len() == n)
            && self.normals.as_ref().map_or(true, |v| v.len() == n)
            && self.tex_coords.as_ref().map_or(true, |t| t.len() == n)
    }

    /// Positions with homogeneous weights divided out
    ///
    /// A zero weight denotes a point at infinity; its x y z are returned unchanged.
    pub fn euclidean_vertices(&self) -> Vec<Point3<f64>> {
        match &self.weights {
            None => self.vertices.clone(),
            Some(weights) => self
                .vertices
                .iter()
                .zip(weights)
                .map(|(p, &w)| if w == 0.0 { *p } else { Point3::from(p.coords / w) })
                .collect(),
        }
    }

    /// Number of distinct undirected edges over all faces
    pub fn unique_edge_count(&self) -> usize {
        unique_edge_count(&self.faces)
    }

    /// Element counts as they would appear on a count line
    pub fn counts(&self) -> Counts {
        Counts {
            vertex_count: self.vertices.len(),
            face_count: self.faces.len(),
            edge_count: self.unique_edge_count(),
        }
    }
}
