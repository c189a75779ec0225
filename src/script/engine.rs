// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rhai implementation of the scene engine seam

use super::bindings::{register_kernel_api, ScriptSolid};
use crate::scene::{
    GeometryHandle, HandleExtractor, ModuleResolver, ScriptContext, ScriptEngine, ScriptException,
};
use rhai::{Dynamic, Engine, EvalAltResult, Module, Position, Scope, Shared, AST};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Nesting limit for imports, which also stops self-importing scenes
const MAX_IMPORT_DEPTH: usize = 8;

/// Resource limits applied to every script context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLimits {
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    /// Largest solid, in vertices, a script may build
    pub max_vertices: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_operations: 1_000_000,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_vertices: 1_000_000,
        }
    }
}

/// Creates sandboxed Rhai engines with the solid modeling API registered
#[derive(Debug, Clone, Default)]
pub struct RhaiEngine {
    limits: ScriptLimits,
}

impl RhaiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ScriptLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ScriptLimits {
        self.limits
    }
}

impl ScriptEngine for RhaiEngine {
    type Context = RhaiContext;

    fn create_context(&self) -> RhaiContext {
        let mut engine = Engine::new();
        engine.set_max_operations(self.limits.max_operations);
        engine.set_max_call_levels(self.limits.max_call_levels);
        engine.set_max_expr_depths(self.limits.max_expr_depth, self.limits.max_expr_depth);
        engine.on_print(|text| info!(target: "dingcad::script", "{text}"));
        engine.on_debug(|text, source, pos| {
            debug!(target: "dingcad::script", source = source.unwrap_or("?"), %pos, "{text}")
        });
        register_kernel_api(&mut engine, self.limits.max_vertices);

        trace!("script context created");
        RhaiContext { engine }
    }

    // No destroy_context override: dropping the context releases the engine,
    // its registered API and the resolver bridge.
}

/// A compiled scene module and, once run, its exports
pub struct RhaiModule {
    name: String,
    source: String,
    ast: AST,
    exports: Option<Module>,
}

impl RhaiModule {
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub struct RhaiContext {
    engine: Engine,
}

fn exception(err: impl ToString) -> ScriptException {
    ScriptException::new(err.to_string())
}

impl ScriptContext for RhaiContext {
    type Module = RhaiModule;
    type Value = Dynamic;

    fn compile_module(&mut self, source: &str, name: &str) -> Result<RhaiModule, ScriptException> {
        let mut ast = self.engine.compile(source).map_err(exception)?;
        ast.set_source(name);
        Ok(RhaiModule {
            name: name.to_string(),
            source: source.to_string(),
            ast,
            exports: None,
        })
    }

    fn resolve_imports(
        &mut self,
        module: &mut RhaiModule,
        resolver: Arc<dyn ModuleResolver>,
    ) -> Result<(), ScriptException> {
        self.engine.set_module_resolver(ResolverBridge::new(resolver));
        let mut ast = self
            .engine
            .compile_into_self_contained(&Scope::new(), &module.source)
            .map_err(exception)?;
        ast.set_source(module.name.as_str());
        module.ast = ast;
        Ok(())
    }

    fn run_module(&mut self, module: &mut RhaiModule) -> Result<(), ScriptException> {
        let exports = Module::eval_ast_as_new(Scope::new(), &module.ast, &self.engine).map_err(exception)?;
        module.exports = Some(exports);
        Ok(())
    }

    fn module_export(&self, module: &RhaiModule, name: &str) -> Option<Dynamic> {
        module.exports.as_ref()?.get_var(name)
    }
}

/// Adapts a scene [`ModuleResolver`] to Rhai's `import` machinery.
///
/// `import "parts"` looks up `parts` first, then `parts.rhai`.
struct ResolverBridge {
    resolver: Arc<dyn ModuleResolver>,
    depth: AtomicUsize,
}

impl ResolverBridge {
    fn new(resolver: Arc<dyn ModuleResolver>) -> Self {
        Self {
            resolver,
            depth: AtomicUsize::new(0),
        }
    }

    fn lookup(&self, path: &str) -> Option<String> {
        self.resolver.resolve(path).or_else(|| {
            if Path::new(path).extension().is_some() {
                None
            } else {
                self.resolver.resolve(&format!("{path}.rhai"))
            }
        })
    }

    fn load(&self, engine: &Engine, path: &str, pos: Position) -> Result<Shared<Module>, Box<EvalAltResult>> {
        let source = self
            .lookup(path)
            .ok_or_else(|| EvalAltResult::ErrorModuleNotFound(path.to_string(), pos))?;
        let in_module = |err: Box<EvalAltResult>| EvalAltResult::ErrorInModule(path.to_string(), err, pos);

        let mut ast = engine.compile(&source).map_err(|err| in_module(err.into()))?;
        ast.set_source(path);
        let module = Module::eval_ast_as_new(Scope::new(), &ast, engine).map_err(in_module)?;
        debug!(module = path, "imported module");
        Ok(module.into())
    }
}

impl rhai::ModuleResolver for ResolverBridge {
    fn resolve(
        &self,
        engine: &Engine,
        _source: Option<&str>,
        path: &str,
        pos: Position,
    ) -> Result<Shared<Module>, Box<EvalAltResult>> {
        if self.depth.fetch_add(1, Ordering::SeqCst) >= MAX_IMPORT_DEPTH {
            self.depth.fetch_sub(1, Ordering::SeqCst);
            return Err(format!("import of '{path}' nested too deeply").into());
        }
        let result = self.load(engine, path, pos);
        self.depth.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Accepts exported values that are script solids
#[derive(Debug, Clone, Copy, Default)]
pub struct RhaiHandleExtractor;

impl HandleExtractor<Dynamic> for RhaiHandleExtractor {
    fn as_geometry_handle(&self, value: &Dynamic) -> Option<GeometryHandle> {
        value.clone().try_cast::<ScriptSolid>().map(GeometryHandle::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::scene::{MemoryResolver, SceneEvaluator};

    fn evaluator() -> SceneEvaluator<RhaiEngine, RhaiHandleExtractor> {
        SceneEvaluator::new(RhaiEngine::new(), RhaiHandleExtractor)
    }

    #[test]
    fn test_exported_cube() {
        let result = evaluator().evaluate("export const scene = cube(10);");
        assert!(result.is_success(), "{}", result.message());
        assert_eq!(result.message(), "scene loaded successfully");

        let mesh = result.handle().map(|h| h.boundary_mesh()).unwrap_or_default();
        assert_eq!(mesh.num_vert(), 8);
        assert_eq!(mesh.num_tri(), 12);
    }

    #[test]
    fn test_chained_operations() {
        let source = r#"
            const base = cube(20, 20, 5);
            let post = cylinder(10, 4, 16).translate(10, 10, 5);
            export const scene = base + post.rotate(0, 0, 45).scale(1.0);
        "#;
        let result = evaluator().evaluate(source);
        assert!(result.is_success(), "{}", result.message());

        let mesh = result.handle().map(|h| h.boundary_mesh()).unwrap_or_default();
        assert_eq!(mesh.num_vert(), 8 + 2 * 16 + 2);
    }

    #[test]
    fn test_missing_export() {
        let result = evaluator().evaluate("export const part = sphere(2);");
        assert_eq!(
            result.error(),
            Some(&LoadError::MissingExport {
                name: "scene".to_string()
            })
        );
        assert_eq!(result.message(), "scene module must export 'scene'");
    }

    #[test]
    fn test_unexported_binding_is_not_visible() {
        let result = evaluator().evaluate("let scene = cube(1);");
        assert!(matches!(result.error(), Some(LoadError::MissingExport { .. })));
    }

    #[test]
    fn test_export_must_be_solid() {
        let result = evaluator().evaluate("export const scene = 42;");
        assert_eq!(result.message(), "exported 'scene' is not a manifold");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = evaluator().evaluate("export const scene = cube(10");
        assert!(!result.is_success());
        assert!(matches!(result.error(), Some(LoadError::Script { .. })));
        assert!(!result.message().is_empty());
    }

    #[test]
    fn test_runtime_error_is_reported() {
        let result = evaluator().evaluate("export const scene = cube(-1);");
        assert!(result.message().contains("cube size must be a positive number"));
    }

    #[test]
    fn test_import_from_resolver() {
        let resolver = MemoryResolver::new()
            .with_module("parts.rhai", "export const peg = cylinder(4, 1, 8);");
        let evaluator = evaluator().with_resolver(resolver);

        let result = evaluator.evaluate(
            r#"
            import "parts" as parts;
            export const scene = cube(5) + parts::peg.translate(0, 0, 5);
            "#,
        );
        assert!(result.is_success(), "{}", result.message());
    }

    #[test]
    fn test_unknown_import_fails() {
        let result = evaluator().evaluate(
            r#"
            import "nowhere" as n;
            export const scene = cube(1);
            "#,
        );
        assert!(!result.is_success());
    }

    #[test]
    fn test_self_import_terminates() {
        let result = evaluator().evaluate(
            r#"
            import "scene.rhai" as me;
            export const scene = cube(1);
            "#,
        );
        assert!(!result.is_success());
    }

    #[test]
    fn test_runaway_script_is_stopped() {
        let engine = RhaiEngine::with_limits(ScriptLimits {
            max_operations: 10_000,
            ..ScriptLimits::default()
        });
        let evaluator = SceneEvaluator::new(engine, RhaiHandleExtractor);

        let result = evaluator.evaluate("loop { } export const scene = cube(1);");
        assert!(matches!(result.error(), Some(LoadError::Script { .. })));
    }

    #[test]
    fn test_self_doubling_solid_is_stopped() {
        let result = evaluator().evaluate(
            r#"
            let s = cube(1);
            for i in 0..20 { s = s + s; }
            export const scene = s;
            "#,
        );
        match result.error() {
            Some(LoadError::Script { message }) => {
                assert!(message.contains("more than the limit of 1000000"), "{message}")
            }
            other => panic!("expected a script error, got {other:?}"),
        }
    }

    #[test]
    fn test_vertex_limit_is_configurable() {
        let engine = RhaiEngine::with_limits(ScriptLimits {
            max_vertices: 100,
            ..ScriptLimits::default()
        });
        let evaluator = SceneEvaluator::new(engine, RhaiHandleExtractor);

        assert!(evaluator.evaluate("export const scene = cube(1) + cube(2);").is_success());
        let result = evaluator.evaluate("export const scene = union([sphere(1, 16), cube(1)]);");
        assert!(matches!(result.error(), Some(LoadError::Script { .. })));
    }

    #[test]
    fn test_each_evaluation_starts_fresh() {
        let evaluator = evaluator();
        let first = evaluator.evaluate("export const scene = cube(1);");
        let second = evaluator.evaluate("export const scene = sphere(1, 8);");

        let count = |r: &crate::scene::LoadResult| r.handle().map(|h| h.boundary_mesh().num_vert());
        assert_eq!(count(&first), Some(8));
        assert_eq!(count(&second), Some(3 * 8 + 2));
    }
}
