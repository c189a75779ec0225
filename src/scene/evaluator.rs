// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene evaluator - script text to geometry handle

use super::engine::{HandleExtractor, ModuleResolver, ScriptContext, ScriptEngine};
use super::resolver::{MemoryResolver, SceneModuleResolver};
use super::GeometryHandle;
use crate::error::LoadError;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_SCENE_MODULE: &str = "scene.rhai";
pub const DEFAULT_SCENE_EXPORT: &str = "scene";
pub const LOAD_SUCCESS_MESSAGE: &str = "scene loaded successfully";

/// Outcome of one scene load
#[derive(Debug, Clone)]
pub enum LoadResult {
    Success {
        handle: GeometryHandle,
        message: String,
    },
    Failure(LoadError),
}

impl LoadResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LoadResult::Success { .. })
    }

    pub fn message(&self) -> String {
        match self {
            LoadResult::Success { message, .. } => message.clone(),
            LoadResult::Failure(err) => err.to_string(),
        }
    }

    pub fn handle(&self) -> Option<&GeometryHandle> {
        match self {
            LoadResult::Success { handle, .. } => Some(handle),
            LoadResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadResult::Success { .. } => None,
            LoadResult::Failure(err) => Some(err),
        }
    }
}

impl From<Result<GeometryHandle, LoadError>> for LoadResult {
    fn from(result: Result<GeometryHandle, LoadError>) -> Self {
        match result {
            Ok(handle) => LoadResult::Success {
                handle,
                message: LOAD_SUCCESS_MESSAGE.to_string(),
            },
            Err(err) => LoadResult::Failure(err),
        }
    }
}

/// Anything that can turn scene text into a load result.
///
/// The coordinator only sees this trait, so the engine types stay out of it.
pub trait SceneLoader {
    fn load(&self, source: &str) -> LoadResult;
}

impl<F> SceneLoader for F
where
    F: Fn(&str) -> LoadResult,
{
    fn load(&self, source: &str) -> LoadResult {
        self(source)
    }
}

/// Rejects blank scene text before any engine work happens
pub fn ensure_source(source: &str) -> Result<(), LoadError> {
    if source.trim().is_empty() {
        Err(LoadError::EmptySource)
    } else {
        Ok(())
    }
}

/// Evaluation context that is handed back to the engine on every exit path
struct ScopedContext<'e, E: ScriptEngine> {
    engine: &'e E,
    ctx: E::Context,
}

impl<'e, E: ScriptEngine> ScopedContext<'e, E> {
    fn new(engine: &'e E) -> Self {
        Self {
            engine,
            ctx: engine.create_context(),
        }
    }
}

impl<E: ScriptEngine> Deref for ScopedContext<'_, E> {
    type Target = E::Context;

    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

impl<E: ScriptEngine> DerefMut for ScopedContext<'_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ctx
    }
}

impl<E: ScriptEngine> Drop for ScopedContext<'_, E> {
    fn drop(&mut self) {
        self.engine.destroy_context(&mut self.ctx);
    }
}

type ValueOf<E> = <<E as ScriptEngine>::Context as ScriptContext>::Value;

/// Drives a script engine through compile, import resolution, execution and
/// export validation.
pub struct SceneEvaluator<E, X> {
    engine: E,
    extractor: X,
    resolver: Arc<dyn ModuleResolver>,
    scene_module: String,
    scene_export: String,
}

impl<E, X> SceneEvaluator<E, X>
where
    E: ScriptEngine,
    X: HandleExtractor<ValueOf<E>>,
{
    pub fn new(engine: E, extractor: X) -> Self {
        Self {
            engine,
            extractor,
            resolver: Arc::new(MemoryResolver::new()),
            scene_module: DEFAULT_SCENE_MODULE.to_string(),
            scene_export: DEFAULT_SCENE_EXPORT.to_string(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Module name the scene is compiled under; imports of it resolve to the scene text
    pub fn with_scene_module(mut self, name: impl Into<String>) -> Self {
        self.scene_module = name.into();
        self
    }

    pub fn with_scene_export(mut self, name: impl Into<String>) -> Self {
        self.scene_export = name.into();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Evaluate a scene script in a fresh context
    pub fn evaluate(&self, source: &str) -> LoadResult {
        debug!(module = %self.scene_module, bytes = source.len(), "evaluating scene");

        let result = LoadResult::from(self.try_evaluate(source));
        match &result {
            LoadResult::Success { .. } => info!(module = %self.scene_module, "scene loaded"),
            LoadResult::Failure(err) => warn!(module = %self.scene_module, error = %err, "scene load failed"),
        }
        result
    }

    fn try_evaluate(&self, source: &str) -> Result<GeometryHandle, LoadError> {
        ensure_source(source)?;

        let mut ctx = ScopedContext::new(&self.engine);
        let resolver: Arc<dyn ModuleResolver> = Arc::new(SceneModuleResolver::new(
            Arc::clone(&self.resolver),
            self.scene_module.as_str(),
            source,
        ));

        let mut module = ctx.compile_module(source, &self.scene_module).map_err(script_error)?;
        ctx.resolve_imports(&mut module, resolver).map_err(script_error)?;
        ctx.run_module(&mut module).map_err(script_error)?;

        let value = ctx
            .module_export(&module, &self.scene_export)
            .ok_or_else(|| LoadError::MissingExport {
                name: self.scene_export.clone(),
            })?;

        self.extractor
            .as_geometry_handle(&value)
            .ok_or_else(|| LoadError::NotAManifold {
                name: self.scene_export.clone(),
            })
    }
}

impl<E, X> SceneLoader for SceneEvaluator<E, X>
where
    E: ScriptEngine,
    X: HandleExtractor<ValueOf<E>>,
{
    fn load(&self, source: &str) -> LoadResult {
        self.evaluate(source)
    }
}

fn script_error(exception: super::ScriptException) -> LoadError {
    LoadError::Script {
        message: exception.to_string(),
    }
}
