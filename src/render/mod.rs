// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Render model synthesis and the render backend seam

mod backend;
mod model;
mod synthesizer;

pub use backend::{HeadlessBackend, RenderBackend};
pub use model::{ModelSummary, RenderIndex, RenderModel, MAX_RENDER_VERTICES};
pub use synthesizer::{
    MeshSynthesizer, Shading, DEFAULT_BASE_COLOR, DEFAULT_INTENSITY_FLOOR,
    DEFAULT_LIGHT_DIRECTION, DEFAULT_SCENE_SCALE, FALLBACK_NORMAL,
};
