// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Module resolvers for scene imports

use super::ModuleResolver;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// In-memory module table, the virtual filesystem of hosts without disk access
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    modules: HashMap<String, String>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.modules.insert(name.into(), source.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.modules.remove(name)
    }
}

impl ModuleResolver for MemoryResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.modules.get(name).cloned()
    }
}

/// Resolves module names as relative paths below a root directory.
///
/// Absolute names and names escaping the root through `..` are not found.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn module_path(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        confined.then(|| self.root.join(relative))
    }
}

impl ModuleResolver for FsResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        let path = self.module_path(name)?;
        match std::fs::read_to_string(&path) {
            Ok(source) => Some(source),
            Err(err) => {
                trace!(module = name, path = %path.display(), error = %err, "module not readable");
                None
            }
        }
    }
}

/// Tries each resolver in order and returns the first hit
#[derive(Clone, Default)]
pub struct ChainResolver {
    resolvers: Vec<Arc<dyn ModuleResolver>>,
}

impl ChainResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }
}

impl ModuleResolver for ChainResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.resolvers.iter().find_map(|r| r.resolve(name))
    }
}

/// Wraps a resolver so the reserved scene module name falls back to the
/// source currently being loaded when nothing else provides it.
pub struct SceneModuleResolver {
    inner: Arc<dyn ModuleResolver>,
    scene_module: String,
    scene_source: Arc<str>,
}

impl SceneModuleResolver {
    pub fn new(
        inner: Arc<dyn ModuleResolver>,
        scene_module: impl Into<String>,
        scene_source: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            inner,
            scene_module: scene_module.into(),
            scene_source: scene_source.into(),
        }
    }
}

impl ModuleResolver for SceneModuleResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.inner.resolve(name).or_else(|| {
            (name == self.scene_module && !self.scene_source.is_empty())
                .then(|| self.scene_source.to_string())
        })
    }
}
