// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rhai scene scripting host

mod bindings;
mod engine;

pub use bindings::{register_kernel_api, ScriptSolid};
pub use engine::{RhaiContext, RhaiEngine, RhaiHandleExtractor, RhaiModule, ScriptLimits};

use crate::scene::SceneEvaluator;

/// Scene evaluator backed by the Rhai host
pub type RhaiSceneEvaluator = SceneEvaluator<RhaiEngine, RhaiHandleExtractor>;
