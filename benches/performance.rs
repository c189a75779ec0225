// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dingcad::geometry::Primitive;
use dingcad::render::{HeadlessBackend, MeshSynthesizer};
use dingcad::{render, scene_evaluator, LoadRenderCoordinator, ViewerConfig};
use nalgebra::Vector3;

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("cube", |b| {
        b.iter(|| Primitive::cube(black_box(Vector3::new(10.0, 10.0, 10.0)), false).to_mesh());
    });

    group.bench_function("sphere_64", |b| {
        b.iter(|| Primitive::sphere(black_box(10.0), black_box(64)).to_mesh());
    });

    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");
    let synthesizer = MeshSynthesizer::default();

    for segments in [16u32, 64, 128] {
        let mesh = Primitive::sphere(10.0, segments).to_mesh().to_boundary_mesh();
        group.bench_with_input(
            BenchmarkId::new("sphere", mesh.num_vert()),
            &mesh,
            |b, mesh| b.iter(|| synthesizer.synthesize(black_box(mesh))),
        );
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    let evaluator = scene_evaluator(&ViewerConfig::default());

    let simple = "export const scene = cube(10);";
    group.bench_with_input(BenchmarkId::new("simple_cube", ""), &simple, |b, source| {
        b.iter(|| evaluator.evaluate(black_box(source)));
    });

    let assembly = r#"
        let parts = [];
        for i in 0..8 {
            parts.push(cylinder(10, 2, 24).translate(i * 6, 0, 0));
        }
        export const scene = union(parts) + cube(50, 10, 2).translate(-5, -5, -2);
    "#;
    group.bench_with_input(BenchmarkId::new("assembly", ""), &assembly, |b, source| {
        b.iter(|| evaluator.evaluate(black_box(source)));
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    group.bench_function("render_sphere", |b| {
        b.iter(|| render(black_box("export const scene = sphere(10, 64);")));
    });

    group.bench_function("coordinator_reload", |b| {
        let config = ViewerConfig::default();
        let mut coordinator = LoadRenderCoordinator::new(MeshSynthesizer::new(config.shading()))
            .with_loader(scene_evaluator(&config));
        let mut backend = HeadlessBackend::new();
        coordinator.mark_window_ready();

        b.iter(|| {
            coordinator.install_scene(black_box("export const scene = sphere(5, 32);"));
            coordinator.tick(&mut backend);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_primitives,
    bench_synthesis,
    bench_evaluation,
    bench_render
);
criterion_main!(benches);
