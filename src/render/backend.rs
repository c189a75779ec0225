// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Render backend seam

use super::RenderModel;

/// Draws one frame: the active model plus the status line.
///
/// GPU upload and draw calls live behind this trait; the coordinator only
/// decides what is drawn.
pub trait RenderBackend {
    fn draw_frame(&mut self, model: &RenderModel, status: &str);
}

/// Backend that records what it was asked to draw, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    frames: usize,
    last_vertex_count: usize,
    last_triangle_count: usize,
    last_status: String,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_vertex_count(&self) -> usize {
        self.last_vertex_count
    }

    pub fn last_triangle_count(&self) -> usize {
        self.last_triangle_count
    }

    pub fn last_status(&self) -> &str {
        &self.last_status
    }
}

impl RenderBackend for HeadlessBackend {
    fn draw_frame(&mut self, model: &RenderModel, status: &str) {
        self.frames += 1;
        self.last_vertex_count = model.vertex_count();
        self.last_triangle_count = model.triangle_count();
        status.clone_into(&mut self.last_status);
    }
}
