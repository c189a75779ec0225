// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared handles to kernel solids

use crate::geometry::BoundaryMesh;
use std::fmt;
use std::sync::Arc;

/// A solid owned by the modeling kernel, queried for its boundary mesh on demand.
pub trait Solid: fmt::Debug + Send + Sync {
    fn boundary_mesh(&self) -> BoundaryMesh;
}

/// Immutable, cheaply cloneable reference to a kernel solid.
///
/// Produced only by a successful scene load, so it always points at a solid.
#[derive(Clone)]
pub struct GeometryHandle(Arc<dyn Solid>);

impl GeometryHandle {
    pub fn new(solid: impl Solid + 'static) -> Self {
        Self(Arc::new(solid))
    }

    pub fn from_arc(solid: Arc<dyn Solid>) -> Self {
        Self(solid)
    }

    pub fn boundary_mesh(&self) -> BoundaryMesh {
        self.0.boundary_mesh()
    }

    /// Whether both handles refer to the same kernel object
    pub fn ptr_eq(&self, other: &GeometryHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for GeometryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GeometryHandle").field(&self.0).finish()
    }
}

impl Solid for BoundaryMesh {
    fn boundary_mesh(&self) -> BoundaryMesh {
        self.clone()
    }
}
