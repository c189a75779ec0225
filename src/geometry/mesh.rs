// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed triangle mesh used by the scripting kernel

use super::BoundaryMesh;
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex indices, counter-clockwise seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [u32; 3],
}

impl Triangle {
    pub fn new(indices: [u32; 3]) -> Self {
        Self { indices }
    }
}

/// Indexed triangle mesh in CAD coordinates (Z up, millimetres).
///
/// Vertices are shared between adjacent triangles, so normals are not stored
/// here; the render synthesizer derives them from the topology.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        index
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Transform all vertices by a matrix.
    ///
    /// Mirroring transforms flip the winding so faces keep pointing outwards.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for position in &mut self.positions {
            *position = matrix.transform_point(position);
        }

        if matrix.fixed_view::<3, 3>(0, 0).clone_owned().determinant() < 0.0 {
            for triangle in &mut self.triangles {
                triangle.indices.swap(1, 2);
            }
        }
    }

    /// Append another mesh (simple union without CSG)
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.triangles.extend(other.triangles.iter().map(|t| {
            Triangle::new([
                t.indices[0] + offset,
                t.indices[1] + offset,
                t.indices[2] + offset,
            ])
        }));
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.triangles.is_empty()
    }

    /// Flatten into the kernel's boundary mesh layout (positions only, stride 3)
    pub fn to_boundary_mesh(&self) -> BoundaryMesh {
        let mut vert_properties = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            vert_properties.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }

        let tri_verts = self
            .triangles
            .iter()
            .flat_map(|t| t.indices)
            .collect();

        BoundaryMesh::new(3, vert_properties, tri_verts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn single_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_triangle(Triangle::new([a, b, c]));
        mesh
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh = single_triangle();
        mesh.merge(&single_triangle());

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangles[1].indices, [3, 4, 5]);
    }

    #[test]
    fn test_mirror_flips_winding() {
        let mut mesh = single_triangle();
        mesh.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0)));

        assert_eq!(mesh.triangles[0].indices, [0, 2, 1]);
        assert_eq!(mesh.positions[1], Point3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_to_boundary_mesh_layout() {
        let boundary = single_triangle().to_boundary_mesh();

        assert_eq!(boundary.num_prop, 3);
        assert_eq!(boundary.num_vert(), 3);
        assert_eq!(boundary.num_tri(), 1);
        assert_eq!(boundary.position(1), [1.0, 0.0, 0.0]);
        assert_eq!(boundary.tri_verts, vec![0, 1, 2]);
    }
}
