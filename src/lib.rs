// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! DingCAD viewer core
//!
//! Evaluates scene scripts into solid geometry, turns the geometry into
//! shaded render models, and coordinates scene reloads with a render loop.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod script;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use config::ViewerConfig;
pub use coordinator::{LoadRenderCoordinator, StatusChannel};
pub use error::{LoadError, SynthesisError};
pub use render::{MeshSynthesizer, RenderBackend, RenderModel, Shading};
pub use scene::{GeometryHandle, LoadResult, SceneEvaluator, SceneLoader};
pub use script::{RhaiEngine, RhaiHandleExtractor, RhaiSceneEvaluator};

use anyhow::{Context, Result};
use scene::{ChainResolver, FsResolver, MemoryResolver};
use std::path::Path;

/// Crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build a Rhai scene evaluator from `config`.
///
/// Imports resolve below `module_root` when it is set.
pub fn scene_evaluator(config: &ViewerConfig) -> RhaiSceneEvaluator {
    scene_evaluator_with_modules(config, MemoryResolver::new())
}

/// Like [`scene_evaluator`], with in-memory modules that shadow files below
/// `module_root`
pub fn scene_evaluator_with_modules(
    config: &ViewerConfig,
    modules: MemoryResolver,
) -> RhaiSceneEvaluator {
    let mut resolvers = ChainResolver::new().push(modules);
    if let Some(root) = &config.module_root {
        resolvers = resolvers.push(FsResolver::new(root));
    }

    SceneEvaluator::new(
        RhaiEngine::with_limits(config.script_limits()),
        RhaiHandleExtractor,
    )
    .with_scene_module(config.scene_module.as_str())
    .with_scene_export(config.scene_export.as_str())
    .with_resolver(resolvers)
}

/// Main entry point for rendering a scene script to a render model
pub fn render(source: &str) -> Result<RenderModel> {
    render_with(source, &ViewerConfig::default())
}

/// Render a scene script with explicit configuration
pub fn render_with(source: &str, config: &ViewerConfig) -> Result<RenderModel> {
    let handle = match scene_evaluator(config).evaluate(source) {
        LoadResult::Success { handle, .. } => handle,
        LoadResult::Failure(err) => return Err(err.into()),
    };
    let model = MeshSynthesizer::new(config.shading()).synthesize(&handle.boundary_mesh())?;
    Ok(model)
}

/// Render a scene file; imports resolve relative to the file's directory
pub fn render_file(path: impl AsRef<Path>) -> Result<RenderModel> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {:?}", path))?;

    let mut config = ViewerConfig::default();
    config.module_root = path.parent().map(Path::to_path_buf);
    render_with(&source, &config).with_context(|| format!("Failed to render {:?}", path))
}
