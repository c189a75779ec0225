// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen
//!
//! The host page owns the canvas; it calls `tick` once per animation frame
//! and uploads the buffers whenever `model_revision` changes.

use crate::render::{HeadlessBackend, MeshSynthesizer};
use crate::scene::MemoryResolver;
use crate::{scene_evaluator_with_modules, LoadRenderCoordinator, ViewerConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Viewer {
    coordinator: LoadRenderCoordinator,
    config: ViewerConfig,
    modules: MemoryResolver,
    backend: HeadlessBackend,
}

#[wasm_bindgen]
impl Viewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Viewer {
        let config = ViewerConfig::default();
        let modules = MemoryResolver::new();
        let coordinator = LoadRenderCoordinator::new(MeshSynthesizer::new(config.shading()))
            .with_loader(scene_evaluator_with_modules(&config, modules.clone()));
        Viewer {
            coordinator,
            config,
            modules,
            backend: HeadlessBackend::new(),
        }
    }

    /// Register a module that scenes can `import`
    pub fn add_module(&mut self, name: &str, source: &str) {
        self.modules.insert(name, source);
        self.coordinator
            .attach_loader(scene_evaluator_with_modules(&self.config, self.modules.clone()));
    }

    pub fn install_scene(&mut self, source: &str) {
        self.coordinator.install_scene(source);
    }

    pub fn mark_window_ready(&mut self) {
        self.coordinator.mark_window_ready();
    }

    pub fn tick(&mut self) {
        self.coordinator.tick(&mut self.backend);
    }

    pub fn status(&self) -> String {
        self.coordinator.status().to_string()
    }

    /// Incremented every time the displayed model is replaced
    pub fn model_revision(&self) -> u32 {
        self.coordinator.model_revision() as u32
    }

    pub fn vertex_count(&self) -> usize {
        self.coordinator.active_model().vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.coordinator.active_model().triangle_count()
    }

    pub fn positions(&self) -> Vec<f32> {
        self.coordinator.active_model().positions.clone()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.coordinator.active_model().normals.clone()
    }

    pub fn colors(&self) -> Vec<u8> {
        self.coordinator.active_model().colors.clone()
    }

    pub fn indices(&self) -> Vec<u16> {
        self.coordinator.active_model().indices.clone()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    crate::version().to_string()
}
