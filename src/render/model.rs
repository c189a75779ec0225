// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Renderer-ready vertex buffers

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// Index type of the render index buffer
pub type RenderIndex = u16;

/// Number of distinct vertices a [`RenderIndex`] can address
pub const MAX_RENDER_VERTICES: usize = RenderIndex::MAX as usize + 1;

/// Packed buffers for one drawable, in the renderer's Y-up convention.
///
/// Replaced wholesale on every reload, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    /// `xyz` per vertex
    pub positions: Vec<f32>,
    /// Unit `xyz` per vertex
    pub normals: Vec<f32>,
    /// `rgba` per vertex
    pub colors: Vec<u8>,
    /// Three per triangle
    pub indices: Vec<RenderIndex>,
}

impl RenderModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    pub fn position(&self, v: usize) -> [f32; 3] {
        [self.positions[v * 3], self.positions[v * 3 + 1], self.positions[v * 3 + 2]]
    }

    pub fn normal(&self, v: usize) -> [f32; 3] {
        [self.normals[v * 3], self.normals[v * 3 + 1], self.normals[v * 3 + 2]]
    }

    pub fn color(&self, v: usize) -> [u8; 4] {
        [
            self.colors[v * 4],
            self.colors[v * 4 + 1],
            self.colors[v * 4 + 2],
            self.colors[v * 4 + 3],
        ]
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_packed(&self.positions)
    }

    pub fn summary(&self) -> ModelSummary {
        let bounds = self.bounds();
        ModelSummary {
            vertex_count: self.vertex_count(),
            triangle_count: self.triangle_count(),
            bounds: (!bounds.is_empty()).then_some(bounds),
        }
    }
}

/// Counts and extent of a model, for status displays and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub bounds: Option<BoundingBox>,
}
