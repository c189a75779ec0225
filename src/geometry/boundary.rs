// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel-native boundary mesh: the layout solids hand to the renderer

use serde::{Deserialize, Serialize};

/// Flat boundary mesh as produced by a solid-modeling kernel.
///
/// `vert_properties` holds `num_prop` floats per vertex, the first three being
/// the X/Y/Z position in the kernel's Z-up convention. `tri_verts` holds three
/// 0-based vertex indices per triangle. A mesh without vertices or triangles
/// is empty, not invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryMesh {
    pub num_prop: usize,
    pub vert_properties: Vec<f32>,
    pub tri_verts: Vec<u32>,
}

impl BoundaryMesh {
    pub fn new(num_prop: usize, vert_properties: Vec<f32>, tri_verts: Vec<u32>) -> Self {
        Self {
            num_prop,
            vert_properties,
            tri_verts,
        }
    }

    pub fn empty() -> Self {
        Self::new(3, Vec::new(), Vec::new())
    }

    pub fn num_vert(&self) -> usize {
        if self.num_prop == 0 {
            0
        } else {
            self.vert_properties.len() / self.num_prop
        }
    }

    pub fn num_tri(&self) -> usize {
        self.tri_verts.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.num_vert() == 0 || self.num_tri() == 0
    }

    /// Position of vertex `v` in kernel coordinates.
    ///
    /// Panics if `v` is out of range or the stride is below 3.
    pub fn position(&self, v: usize) -> [f32; 3] {
        let base = v * self.num_prop;
        [
            self.vert_properties[base],
            self.vert_properties[base + 1],
            self.vert_properties[base + 2],
        ]
    }
}

impl Default for BoundaryMesh {
    fn default() -> Self {
        Self::empty()
    }
}
