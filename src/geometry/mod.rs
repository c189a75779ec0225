// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - solid kernel meshes and the boundary mesh exchange format

mod bbox;
mod boundary;
mod mesh;
mod primitives;
mod transform;

pub use bbox::BoundingBox;
pub use boundary::BoundaryMesh;
pub use mesh::{Mesh, Triangle};
pub use primitives::Primitive;
pub use transform::TransformOp;
