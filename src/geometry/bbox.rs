// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingBox {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Bounds of a packed `xyz xyz ...` position buffer
    pub fn from_packed(positions: &[f32]) -> Self {
        let mut bbox = Self::empty();
        for p in positions.chunks_exact(3) {
            bbox.expand_to_include(&Point3::new(p[0], p[1], p[2]));
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f32>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Point3<f32> {
        if self.is_empty() {
            Point3::origin()
        } else {
            nalgebra::center(&self.min, &self.max)
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed() {
        let bbox = BoundingBox::from_packed(&[0.0, -1.0, 2.0, 4.0, 1.0, -2.0]);
        assert_eq!(bbox.min, Point3::new(0.0, -1.0, -2.0));
        assert_eq!(bbox.max, Point3::new(4.0, 1.0, 2.0));
        assert_eq!(bbox.size(), Vector3::new(4.0, 2.0, 4.0));
        assert_eq!(bbox.center(), Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_box() {
        let bbox = BoundingBox::from_packed(&[]);
        assert!(bbox.is_empty());
        assert_eq!(bbox.size(), Vector3::zeros());
    }
}
