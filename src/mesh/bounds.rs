//! Axis-aligned bounds.

use nalgebra::{Point3, Vector3};

/// An axis-aligned box stored as a min corner and a non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Size along each axis.
    pub extent: Vector3<f64>,
}

impl Aabb {
    /// Box spanning `min` to `max`.
    pub fn from_corners(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min,
            extent: max - min,
        }
    }

    /// Maximum corner.
    pub fn max(&self) -> Point3<f64> {
        self.min + self.extent
    }

    /// Centre of the box.
    pub fn center(&self) -> Point3<f64> {
        self.min + self.extent * 0.5
    }

    /// Whether `p` lies inside or on the box.
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        let max = self.max();
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= max[i])
    }
}

/// Running per-axis min/max over inserted points.
#[derive(Debug, Clone, Copy)]
pub struct BoundsAccumulator {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsAccumulator {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Grow the bounds to include `p`.
    pub fn include(&mut self, p: &Point3<f64>) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Whether no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// The accumulated box, or `None` if nothing was included.
    pub fn aabb(&self) -> Option<Aabb> {
        if self.is_empty() {
            None
        } else {
            Some(Aabb::from_corners(self.min, self.max))
        }
    }
}
