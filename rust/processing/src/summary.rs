// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable mesh statistics.

use off_lite_core::Mesh;
use off_lite_geometry::mesh_bounds;
use serde::Serialize;

/// Summary of a decoded mesh, suitable for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct MeshSummary {
    pub keyword: String,
    pub dimension: Option<u32>,
    pub vertex_count: usize,
    pub face_count: usize,
    pub declared_edge_count: usize,
    pub unique_edge_count: usize,
    pub has_colors: bool,
    pub has_normals: bool,
    pub has_texture_coords: bool,
    pub has_homogeneous_coord: bool,
    /// Histogram of polygon sizes as (size, count), ascending by size
    pub face_sizes: Vec<(usize, usize)>,
    pub bounds_min: Option<[f64; 3]>,
    pub bounds_max: Option<[f64; 3]>,
}

impl MeshSummary {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut face_sizes: Vec<(usize, usize)> = Vec::new();
        for face in &mesh.faces {
            match face_sizes.binary_search_by_key(&face.len(), |&(size, _)| size) {
                Ok(i) => face_sizes[i].1 += 1,
                Err(i) => face_sizes.insert(i, (face.len(), 1)),
            }
        }

        let bounds = mesh_bounds(mesh);
        let flags = mesh.flags;

        Self {
            keyword: flags.keyword(),
            dimension: mesh.dimension,
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            declared_edge_count: mesh.declared_edge_count,
            unique_edge_count: mesh.unique_edge_count(),
            has_colors: flags.has_colors,
            has_normals: flags.has_normals,
            has_texture_coords: flags.has_texture_coords,
            has_homogeneous_coord: flags.has_homogeneous_coord,
            face_sizes,
            bounds_min: bounds.map(|b| [b.min.x, b.min.y, b.min.z]),
            bounds_max: bounds.map(|b| [b.max.x, b.max.y, b.max.z]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use off_lite_core::parse_off;

    #[test]
    fn test_summary() {
        let mesh = parse_off("OFF\n4 2 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n3 0 1 2\n")
            .unwrap();
        let summary = MeshSummary::from_mesh(&mesh);
        assert_eq!(summary.keyword, "OFF");
        assert_eq!(summary.face_sizes, vec![(3, 1), (4, 1)]);
        assert_eq!(summary.unique_edge_count, 5);
        assert_eq!(summary.bounds_max, Some([1.0, 1.0, 0.0]));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["vertex_count"], 4);
        assert_eq!(json["has_colors"], false);
    }
}
