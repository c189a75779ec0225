// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Solid modeling API exposed to scene scripts
//!
//! ```text
//! export const scene = cube(20, 20, 5)
//!     + cylinder(10, 4).translate(10, 10, 5)
//!     + sphere(3).translate(10, 10, 18);
//! ```

use crate::geometry::{BoundaryMesh, Mesh, Primitive, TransformOp};
use crate::scene::Solid;
use nalgebra::Vector3;
use rhai::{Array, Dynamic, Engine, EvalAltResult, INT};
use std::sync::Arc;

type ScriptResult<T> = Result<T, Box<EvalAltResult>>;

/// Solid value living inside scripts; cloning shares the mesh
#[derive(Debug, Clone)]
pub struct ScriptSolid {
    mesh: Arc<Mesh>,
}

impl ScriptSolid {
    pub fn from_mesh(mesh: Mesh) -> Self {
        Self {
            mesh: Arc::new(mesh),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn transformed(&self, op: TransformOp) -> Self {
        let mut mesh = Mesh::clone(&self.mesh);
        mesh.transform(&op.to_matrix());
        Self::from_mesh(mesh)
    }

    /// Combined boundary of both solids; overlapping volumes are not merged.
    ///
    /// Fails before allocating when the result would exceed `max_vertices`.
    pub fn union(&self, other: &ScriptSolid, max_vertices: usize) -> ScriptResult<Self> {
        check_vertices(self.mesh.vertex_count() + other.mesh.vertex_count(), max_vertices)?;
        let mut mesh = Mesh::clone(&self.mesh);
        mesh.merge(&other.mesh);
        Ok(Self::from_mesh(mesh))
    }
}

impl Solid for ScriptSolid {
    fn boundary_mesh(&self) -> BoundaryMesh {
        self.mesh.to_boundary_mesh()
    }
}

fn number(value: &Dynamic) -> ScriptResult<f64> {
    if let Ok(f) = value.as_float() {
        return Ok(f);
    }
    if let Ok(i) = value.as_int() {
        return Ok(i as f64);
    }
    Err(format!("expected a number, found {}", value.type_name()).into())
}

fn vector(x: &Dynamic, y: &Dynamic, z: &Dynamic) -> ScriptResult<Vector3<f64>> {
    Ok(Vector3::new(number(x)?, number(y)?, number(z)?))
}

fn positive(value: &Dynamic, what: &str) -> ScriptResult<f64> {
    let v = number(value)?;
    if v > 0.0 && v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{what} must be a positive number, got {v}").into())
    }
}

fn segments(value: INT) -> ScriptResult<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&n| (3..=1024).contains(&n))
        .ok_or_else(|| format!("segment count must be between 3 and 1024, got {value}").into())
}

fn check_vertices(count: usize, max_vertices: usize) -> ScriptResult<()> {
    if count > max_vertices {
        Err(format!("solid would have {count} vertices, more than the limit of {max_vertices}").into())
    } else {
        Ok(())
    }
}

fn primitive(p: Primitive, max_vertices: usize) -> ScriptResult<ScriptSolid> {
    let mesh = p.to_mesh();
    check_vertices(mesh.vertex_count(), max_vertices)?;
    Ok(ScriptSolid::from_mesh(mesh))
}

/// Register the `Solid` type, its constructors and its methods on `engine`.
///
/// No solid built by a script may exceed `max_vertices`.
pub fn register_kernel_api(engine: &mut Engine, max_vertices: usize) {
    let max = max_vertices;
    engine.register_type_with_name::<ScriptSolid>("Solid");

    engine.register_fn("cube", move |size: Dynamic| -> ScriptResult<ScriptSolid> {
        let s = positive(&size, "cube size")?;
        primitive(Primitive::cube(Vector3::repeat(s), false), max)
    });
    engine.register_fn(
        "cube",
        move |x: Dynamic, y: Dynamic, z: Dynamic| -> ScriptResult<ScriptSolid> {
            let size = Vector3::new(
                positive(&x, "cube width")?,
                positive(&y, "cube depth")?,
                positive(&z, "cube height")?,
            );
            primitive(Primitive::cube(size, false), max)
        },
    );
    engine.register_fn(
        "centered_cube",
        move |x: Dynamic, y: Dynamic, z: Dynamic| -> ScriptResult<ScriptSolid> {
            let size = Vector3::new(
                positive(&x, "cube width")?,
                positive(&y, "cube depth")?,
                positive(&z, "cube height")?,
            );
            primitive(Primitive::cube(size, true), max)
        },
    );

    engine.register_fn("sphere", move |r: Dynamic| -> ScriptResult<ScriptSolid> {
        primitive(Primitive::sphere(positive(&r, "sphere radius")?, 0), max)
    });
    engine.register_fn("sphere", move |r: Dynamic, n: INT| -> ScriptResult<ScriptSolid> {
        primitive(Primitive::sphere(positive(&r, "sphere radius")?, segments(n)?), max)
    });

    engine.register_fn("cylinder", move |h: Dynamic, r: Dynamic| -> ScriptResult<ScriptSolid> {
        primitive(
            Primitive::cylinder(positive(&h, "cylinder height")?, positive(&r, "cylinder radius")?, 0),
            max,
        )
    });
    engine.register_fn(
        "cylinder",
        move |h: Dynamic, r: Dynamic, n: INT| -> ScriptResult<ScriptSolid> {
            primitive(
                Primitive::cylinder(
                    positive(&h, "cylinder height")?,
                    positive(&r, "cylinder radius")?,
                    segments(n)?,
                ),
                max,
            )
        },
    );
    engine.register_fn(
        "cone",
        move |h: Dynamic, r1: Dynamic, r2: Dynamic| -> ScriptResult<ScriptSolid> {
            let top = number(&r2)?;
            if top < 0.0 {
                return Err(format!("cone top radius must not be negative, got {top}").into());
            }
            primitive(
                Primitive::cone(positive(&h, "cone height")?, positive(&r1, "cone radius")?, top, 0),
                max,
            )
        },
    );

    engine.register_fn(
        "translate",
        |s: ScriptSolid, x: Dynamic, y: Dynamic, z: Dynamic| -> ScriptResult<ScriptSolid> {
            Ok(s.transformed(TransformOp::Translate(vector(&x, &y, &z)?)))
        },
    );
    engine.register_fn(
        "rotate",
        |s: ScriptSolid, x: Dynamic, y: Dynamic, z: Dynamic| -> ScriptResult<ScriptSolid> {
            Ok(s.transformed(TransformOp::Rotate(vector(&x, &y, &z)?)))
        },
    );
    engine.register_fn(
        "scale",
        |s: ScriptSolid, x: Dynamic, y: Dynamic, z: Dynamic| -> ScriptResult<ScriptSolid> {
            Ok(s.transformed(TransformOp::Scale(vector(&x, &y, &z)?)))
        },
    );
    engine.register_fn("scale", |s: ScriptSolid, f: Dynamic| -> ScriptResult<ScriptSolid> {
        Ok(s.transformed(TransformOp::Scale(Vector3::repeat(number(&f)?))))
    });
    engine.register_fn(
        "mirror",
        |s: ScriptSolid, x: Dynamic, y: Dynamic, z: Dynamic| -> ScriptResult<ScriptSolid> {
            let normal = vector(&x, &y, &z)?;
            if normal.norm() == 0.0 {
                return Err("mirror normal must not be zero".into());
            }
            Ok(s.transformed(TransformOp::Mirror(normal)))
        },
    );

    engine.register_fn("union", move |a: ScriptSolid, b: ScriptSolid| a.union(&b, max));
    engine.register_fn("+", move |a: ScriptSolid, b: ScriptSolid| a.union(&b, max));
    engine.register_fn("union", move |parts: Array| -> ScriptResult<ScriptSolid> {
        let mut mesh = Mesh::new();
        for part in parts {
            let type_name = part.type_name();
            let solid = part
                .try_cast::<ScriptSolid>()
                .ok_or_else(|| format!("union expects solids, found {type_name}"))?;
            check_vertices(mesh.vertex_count() + solid.mesh().vertex_count(), max)?;
            mesh.merge(solid.mesh());
        }
        Ok(ScriptSolid::from_mesh(mesh))
    });

    engine.register_get("vertex_count", |s: &mut ScriptSolid| s.mesh.vertex_count() as INT);
    engine.register_get("triangle_count", |s: &mut ScriptSolid| s.mesh.triangle_count() as INT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> ScriptSolid {
        ScriptSolid::from_mesh(Primitive::cube(Vector3::repeat(1.0), false).to_mesh())
    }

    #[test]
    fn test_union_keeps_both_boundaries() {
        let a = unit_cube();
        let b = a.transformed(TransformOp::Translate(Vector3::new(5.0, 0.0, 0.0)));

        let both = a.union(&b, usize::MAX).expect("within limit");
        assert_eq!(both.mesh().vertex_count(), 16);
        assert_eq!(both.mesh().triangle_count(), 24);
        assert_eq!(a.mesh().vertex_count(), 8);
    }

    #[test]
    fn test_union_respects_vertex_limit() {
        let a = unit_cube();

        assert!(a.union(&a, 16).is_ok());
        let err = a.union(&a, 15).err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("16 vertices, more than the limit of 15"), "{err}");
    }

    #[test]
    fn test_primitive_respects_vertex_limit() {
        assert!(primitive(Primitive::sphere(1.0, 8), 26).is_ok());
        assert!(primitive(Primitive::sphere(1.0, 8), 25).is_err());
    }

    #[test]
    fn test_number_accepts_int_and_float() {
        assert_eq!(number(&Dynamic::from(3_i64)).ok(), Some(3.0));
        assert_eq!(number(&Dynamic::from(2.5_f64)).ok(), Some(2.5));
        assert!(number(&Dynamic::from("three")).is_err());
        assert!(segments(2).is_err());
        assert_eq!(segments(16).ok(), Some(16));
    }
}
