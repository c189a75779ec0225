// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end scene script to render model tests

use approx::assert_relative_eq;
use dingcad::scene::MemoryResolver;
use dingcad::{render, render_file, render_with, scene_evaluator, LoadError, ViewerConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cube_is_scaled_and_reoriented() {
    let model = render("export const scene = cube(10);").expect("cube renders");

    assert_eq!(model.vertex_count(), 8);
    assert_eq!(model.triangle_count(), 12);

    // Model Z becomes renderer Y, model Y becomes renderer -Z, units scale by 0.1
    let bounds = model.summary().bounds.expect("non-empty model");
    assert_relative_eq!(bounds.min.x, 0.0);
    assert_relative_eq!(bounds.max.x, 1.0);
    assert_relative_eq!(bounds.min.y, 0.0);
    assert_relative_eq!(bounds.max.y, 1.0);
    assert_relative_eq!(bounds.min.z, -1.0);
    assert_relative_eq!(bounds.max.z, 0.0);
}

#[test]
fn test_buffers_are_consistent() {
    let model = render(
        r#"
        export const scene = sphere(5, 24) + cone(8, 3, 0).translate(0, 0, 5);
        "#,
    )
    .expect("assembly renders");

    let n = model.vertex_count();
    assert_eq!(model.positions.len(), n * 3);
    assert_eq!(model.normals.len(), n * 3);
    assert_eq!(model.colors.len(), n * 4);
    assert!(model.indices.iter().all(|&i| (i as usize) < n));

    for v in 0..n {
        let [x, y, z] = model.normal(v);
        assert_relative_eq!((x * x + y * y + z * z).sqrt(), 1.0, epsilon = 1e-5);
        assert_eq!(model.color(v)[3], 255);
    }
}

#[test]
fn test_scene_scale_from_config() {
    let config = ViewerConfig {
        scene_scale: 1.0,
        ..ViewerConfig::default()
    };
    let model = render_with("export const scene = cube(2, 4, 6);", &config).expect("renders");
    let size = model.summary().bounds.expect("bounds").size();

    assert_relative_eq!(size.x, 2.0);
    assert_relative_eq!(size.y, 6.0);
    assert_relative_eq!(size.z, 4.0);
}

#[test]
fn test_render_file_resolves_sibling_imports() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("hardware.rhai"),
        "export const bolt = cylinder(12, 1.5, 12);",
    )?;
    let scene = dir.path().join("bracket.rhai");
    fs::write(
        &scene,
        r#"
        import "hardware" as hw;
        export const scene = cube(20, 20, 3) + hw::bolt.translate(10, 10, 3);
        "#,
    )?;

    let model = render_file(&scene)?;
    assert_eq!(model.vertex_count(), 8 + 2 * 12 + 2);
    Ok(())
}

#[test]
fn test_render_file_reports_load_failures() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let scene = dir.path().join("broken.rhai");
    fs::write(&scene, "export const part = cube(1);")?;

    let err = render_file(&scene).expect_err("missing export must fail");
    assert!(format!("{err:#}").contains("scene module must export 'scene'"));

    assert!(render_file(dir.path().join("absent.rhai")).is_err());
    Ok(())
}

#[test]
fn test_custom_export_and_module_names() {
    let config = ViewerConfig {
        scene_export: "model".to_string(),
        scene_module: "main.rhai".to_string(),
        ..ViewerConfig::default()
    };
    let evaluator = scene_evaluator(&config);

    assert!(evaluator.evaluate("export const model = cube(1);").is_success());

    let result = evaluator.evaluate("export const scene = cube(1);");
    assert_eq!(
        result.error(),
        Some(&LoadError::MissingExport {
            name: "model".to_string()
        })
    );
}

#[test]
fn test_in_memory_modules() {
    let resolver = MemoryResolver::new()
        .with_module("lib/shapes.rhai", "export const knob = sphere(2, 12).scale(1, 1, 0.5);");
    let evaluator = scene_evaluator(&ViewerConfig::default()).with_resolver(resolver);

    let result = evaluator.evaluate(
        r#"
        import "lib/shapes" as shapes;
        export const scene = shapes::knob.mirror(0, 0, 1);
        "#,
    );
    assert!(result.is_success(), "{}", result.message());
}

#[test]
fn test_script_errors_carry_their_description() {
    let evaluator = scene_evaluator(&ViewerConfig::default());

    let result = evaluator.evaluate("export const scene = tube(3);");
    match result.error() {
        Some(LoadError::Script { message }) => assert!(message.contains("tube")),
        other => panic!("expected a script error, got {other:?}"),
    }
}

#[test]
fn test_operation_limit_from_config() {
    let config = ViewerConfig {
        max_operations: 500,
        ..ViewerConfig::default()
    };
    let evaluator = scene_evaluator(&config);

    let result = evaluator.evaluate(
        r#"
        let x = 0;
        while true { x += 1; }
        export const scene = cube(1);
        "#,
    );
    assert!(!result.is_success());
}

#[test]
fn test_vertex_limit_from_config() {
    let config = ViewerConfig {
        max_vertices: 12,
        ..ViewerConfig::default()
    };

    assert!(render_with("export const scene = cube(1);", &config).is_ok());

    let err = render_with("export const scene = cube(1) + cube(1);", &config)
        .expect_err("16 vertices exceed the limit");
    assert!(err.to_string().contains("more than the limit of 12"), "{err}");
}
