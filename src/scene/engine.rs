// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Seams to the external script engine, module resolver and handle extraction

use super::GeometryHandle;
use std::fmt;
use std::sync::Arc;

/// Exception raised by the script engine while compiling, linking or running a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptException {
    description: Option<String>,
}

impl ScriptException {
    /// Exception carrying the engine's trace text; blank text counts as none.
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            description: (!description.trim().is_empty()).then_some(description),
        }
    }

    /// Exception the engine could not describe
    pub fn opaque() -> Self {
        Self { description: None }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for ScriptException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description().unwrap_or("script error"))
    }
}

impl std::error::Error for ScriptException {}

/// Source lookup for `import` statements.
pub trait ModuleResolver: Send + Sync {
    /// Source text of `name`, or `None` when it does not exist
    fn resolve(&self, name: &str) -> Option<String>;
}

/// An embeddable script engine able to create isolated evaluation contexts.
pub trait ScriptEngine {
    type Context: ScriptContext;

    fn create_context(&self) -> Self::Context;

    /// Release engine resources held by `ctx`.
    ///
    /// Called exactly once per context before it is dropped.
    fn destroy_context(&self, _ctx: &mut Self::Context) {}
}

/// One evaluation context; module handles never outlive it.
pub trait ScriptContext {
    type Module;
    type Value;

    fn compile_module(&mut self, source: &str, name: &str) -> Result<Self::Module, ScriptException>;

    fn resolve_imports(
        &mut self,
        module: &mut Self::Module,
        resolver: Arc<dyn ModuleResolver>,
    ) -> Result<(), ScriptException>;

    fn run_module(&mut self, module: &mut Self::Module) -> Result<(), ScriptException>;

    /// Value exported under `name`, `None` when the module has no such export
    fn module_export(&self, module: &Self::Module, name: &str) -> Option<Self::Value>;
}

/// Capability check turning a script value into a geometry handle.
pub trait HandleExtractor<V> {
    fn as_geometry_handle(&self, value: &V) -> Option<GeometryHandle>;
}

impl<V, F> HandleExtractor<V> for F
where
    F: Fn(&V) -> Option<GeometryHandle>,
{
    fn as_geometry_handle(&self, value: &V) -> Option<GeometryHandle> {
        self(value)
    }
}
