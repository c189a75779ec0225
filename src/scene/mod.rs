// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene evaluation pipeline
//!
//! Turns untrusted scene scripts into geometry handles through a pluggable
//! script engine.

mod engine;
mod evaluator;
mod handle;
mod resolver;

pub use engine::{HandleExtractor, ModuleResolver, ScriptContext, ScriptEngine, ScriptException};
pub use evaluator::{
    ensure_source, LoadResult, SceneEvaluator, SceneLoader, DEFAULT_SCENE_EXPORT,
    DEFAULT_SCENE_MODULE, LOAD_SUCCESS_MESSAGE,
};
pub use handle::{GeometryHandle, Solid};
pub use resolver::{ChainResolver, FsResolver, MemoryResolver, SceneModuleResolver};
