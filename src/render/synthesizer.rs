// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary mesh to render model conversion
//!
//! Remaps CAD coordinates (Z up, millimetres) into the renderer's Y-up frame,
//! estimates smooth vertex normals from the face topology and bakes a single
//! directional light into per-vertex colours.

use super::model::{RenderIndex, RenderModel, MAX_RENDER_VERTICES};
use crate::error::SynthesisError;
use crate::geometry::BoundaryMesh;
use nalgebra::Vector3;
use tracing::debug;

/// Millimetre scene units to renderer units
pub const DEFAULT_SCENE_SCALE: f32 = 0.1;
/// Minimum light intensity so faces turned away from the light are never black
pub const DEFAULT_INTENSITY_FLOOR: f32 = 0.3;
pub const DEFAULT_LIGHT_DIRECTION: [f32; 3] = [0.45, 0.85, 0.35];
/// Light gray-blue
pub const DEFAULT_BASE_COLOR: [u8; 3] = [210, 210, 220];

/// Normal given to vertices whose accumulated face normals cancel out or are
/// missing: the renderer's up axis.
pub const FALLBACK_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Lighting and unit parameters of the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct Shading {
    pub scene_scale: f32,
    light_direction: Vector3<f32>,
    pub intensity_floor: f32,
    pub base_color: [u8; 3],
}

impl Shading {
    pub fn new(
        scene_scale: f32,
        light_direction: [f32; 3],
        intensity_floor: f32,
        base_color: [u8; 3],
    ) -> Self {
        let light_direction = Vector3::from(light_direction)
            .try_normalize(0.0)
            .unwrap_or_else(|| Vector3::from(FALLBACK_NORMAL));
        Self {
            scene_scale,
            light_direction,
            intensity_floor,
            base_color,
        }
    }

    /// Unit vector pointing towards the light
    pub fn light_direction(&self) -> Vector3<f32> {
        self.light_direction
    }

    /// Lambertian term clamped to the intensity floor
    pub fn intensity(&self, normal: &Vector3<f32>) -> f32 {
        normal.dot(&self.light_direction).max(self.intensity_floor)
    }

    fn shade(&self, normal: &Vector3<f32>) -> [u8; 4] {
        let intensity = self.intensity(normal);
        let [r, g, b] = self.base_color.map(|c| (c as f32 * intensity) as u8);
        [r, g, b, u8::MAX]
    }
}

impl Default for Shading {
    fn default() -> Self {
        Self::new(
            DEFAULT_SCENE_SCALE,
            DEFAULT_LIGHT_DIRECTION,
            DEFAULT_INTENSITY_FLOOR,
            DEFAULT_BASE_COLOR,
        )
    }
}

/// Converts kernel boundary meshes into render models.
///
/// Stateless apart from its shading parameters; output never depends on
/// renderer state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshSynthesizer {
    shading: Shading,
}

impl MeshSynthesizer {
    pub fn new(shading: Shading) -> Self {
        Self { shading }
    }

    pub fn shading(&self) -> &Shading {
        &self.shading
    }

    /// Build the render buffers for `mesh`.
    ///
    /// An empty mesh yields an empty model. Meshes the 16-bit index buffer
    /// cannot address are rejected rather than truncated.
    pub fn synthesize(&self, mesh: &BoundaryMesh) -> Result<RenderModel, SynthesisError> {
        if mesh.vert_properties.is_empty() || mesh.tri_verts.is_empty() {
            return Ok(RenderModel::empty());
        }

        let stride = mesh.num_prop;
        validate_layout(mesh)?;

        let vertex_count = mesh.vert_properties.len() / stride;
        if vertex_count > MAX_RENDER_VERTICES {
            return Err(SynthesisError::IndexOverflow {
                vertex_count,
                max: MAX_RENDER_VERTICES,
            });
        }

        let scale = self.shading.scene_scale;
        let positions: Vec<Vector3<f32>> = mesh
            .vert_properties
            .chunks_exact(stride)
            .map(|p| Vector3::new(p[0] * scale, p[2] * scale, -(p[1] * scale)))
            .collect();

        let mut accum = vec![Vector3::<f32>::zeros(); vertex_count];
        for (triangle, tri) in mesh.tri_verts.chunks_exact(3).enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(SynthesisError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }

            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (positions[i1] - positions[i0]).cross(&(positions[i2] - positions[i0]));
            accum[i0] += face;
            accum[i1] += face;
            accum[i2] += face;
        }

        let mut model = RenderModel {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            colors: Vec::with_capacity(vertex_count * 4),
            indices: Vec::with_capacity(mesh.tri_verts.len()),
        };

        for (position, sum) in positions.iter().zip(&accum) {
            let normal = unit_or_fallback(sum);
            model.positions.extend_from_slice(position.as_slice());
            model.normals.extend_from_slice(normal.as_slice());
            model.colors.extend_from_slice(&self.shading.shade(&normal));
        }

        // Every index was checked against vertex_count, which fits the index type
        model
            .indices
            .extend(mesh.tri_verts.iter().map(|&i| i as RenderIndex));

        debug!(
            vertices = model.vertex_count(),
            triangles = model.triangle_count(),
            "synthesized render model"
        );

        Ok(model)
    }
}

fn validate_layout(mesh: &BoundaryMesh) -> Result<(), SynthesisError> {
    let stride = mesh.num_prop;
    if stride < 3 {
        return Err(SynthesisError::InvalidStride { stride });
    }
    if mesh.vert_properties.len() % stride != 0 {
        return Err(SynthesisError::TruncatedBuffer {
            buffer: "vertex property",
            len: mesh.vert_properties.len(),
            stride,
        });
    }
    if mesh.tri_verts.len() % 3 != 0 {
        return Err(SynthesisError::TruncatedBuffer {
            buffer: "triangle index",
            len: mesh.tri_verts.len(),
            stride: 3,
        });
    }
    Ok(())
}

fn unit_or_fallback(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(0.0)
        .filter(|n| n.iter().all(|c| c.is_finite()))
        .unwrap_or_else(|| Vector3::from(FALLBACK_NORMAL))
}
