// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator
//!
//! All primitives are closed, consistently wound meshes with shared vertices
//! in the kernel's Z-up convention.

use super::{Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

const DEFAULT_SEGMENTS: u32 = 32;

/// Geometric primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, segments: u32 },
    /// Frustum along +Z from `z = 0` to `z = h`; `r2 == 0` gives a cone
    Cylinder { h: f64, r1: f64, r2: f64, segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f64, segments: u32) -> Self {
        Self::Sphere {
            r,
            segments: segments_or_default(segments).max(4),
        }
    }

    pub fn cylinder(h: f64, r: f64, segments: u32) -> Self {
        Self::cone(h, r, r, segments)
    }

    pub fn cone(h: f64, r1: f64, r2: f64, segments: u32) -> Self {
        Self::Cylinder {
            h,
            r1,
            r2,
            segments: segments_or_default(segments).max(3),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
            Self::Cylinder { h, r1, r2, segments } => {
                generate_frustum_mesh(*h, *r1, *r2, *segments)
            }
        }
    }
}

fn segments_or_default(segments: u32) -> u32 {
    if segments > 0 {
        segments
    } else {
        DEFAULT_SEGMENTS
    }
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let min = if center { -size / 2.0 } else { Vector3::zeros() };
    let max = min + size;

    let mut mesh = Mesh::with_capacity(8, 12);
    for z in [min.z, max.z] {
        for (x, y) in [(min.x, min.y), (max.x, min.y), (max.x, max.y), (min.x, max.y)] {
            mesh.add_vertex(Point3::new(x, y, z));
        }
    }

    // 0-3 bottom ring, 4-7 top ring, both counter-clockwise seen from +Z
    let faces = [
        [0, 2, 1], [0, 3, 2], // bottom (-Z)
        [4, 5, 6], [4, 6, 7], // top (+Z)
        [0, 1, 5], [0, 5, 4], // front (-Y)
        [3, 7, 6], [3, 6, 2], // back (+Y)
        [0, 4, 7], [0, 7, 3], // left (-X)
        [1, 2, 6], [1, 6, 5], // right (+X)
    ];
    for indices in faces {
        mesh.add_triangle(Triangle::new(indices));
    }

    mesh
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let slices = segments;
    let stacks = (segments / 2).max(2);
    let ring_count = stacks - 1;

    let mut mesh = Mesh::with_capacity(
        (ring_count * slices + 2) as usize,
        (2 * slices * ring_count) as usize,
    );

    let north = mesh.add_vertex(Point3::new(0.0, 0.0, radius));
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let z = radius * phi.cos();
        let r = radius * phi.sin();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Point3::new(r * theta.cos(), r * theta.sin(), z));
        }
    }
    let south = mesh.add_vertex(Point3::new(0.0, 0.0, -radius));

    let ring = |i: u32, j: u32| 1 + i * slices + j % slices;

    for j in 0..slices {
        mesh.add_triangle(Triangle::new([north, ring(0, j), ring(0, j + 1)]));
    }

    for i in 0..ring_count - 1 {
        for j in 0..slices {
            let (a0, a1) = (ring(i, j), ring(i, j + 1));
            let (b0, b1) = (ring(i + 1, j), ring(i + 1, j + 1));
            mesh.add_triangle(Triangle::new([a0, b0, b1]));
            mesh.add_triangle(Triangle::new([a0, b1, a1]));
        }
    }

    let last = ring_count - 1;
    for j in 0..slices {
        mesh.add_triangle(Triangle::new([south, ring(last, j + 1), ring(last, j)]));
    }

    mesh
}

fn generate_frustum_mesh(height: f64, r1: f64, r2: f64, segments: u32) -> Mesh {
    let n = segments;
    let mut mesh = Mesh::with_capacity((2 * n + 2) as usize, (4 * n) as usize);

    let bottom_center = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    let top_center = mesh.add_vertex(Point3::new(0.0, 0.0, height));
    for (r, z) in [(r1, 0.0), (r2, height)] {
        for j in 0..n {
            let theta = 2.0 * PI * j as f64 / n as f64;
            mesh.add_vertex(Point3::new(r * theta.cos(), r * theta.sin(), z));
        }
    }

    let bottom = |j: u32| 2 + j % n;
    let top = |j: u32| 2 + n + j % n;

    for j in 0..n {
        mesh.add_triangle(Triangle::new([bottom_center, bottom(j + 1), bottom(j)]));
        mesh.add_triangle(Triangle::new([top_center, top(j), top(j + 1)]));
        mesh.add_triangle(Triangle::new([bottom(j), bottom(j + 1), top(j + 1)]));
        mesh.add_triangle(Triangle::new([bottom(j), top(j + 1), top(j)]));
    }

    mesh
}
