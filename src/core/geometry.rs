//! Geometric primitives for rig placement
//!
//! Everything here is plain value math: positions, transform triples, and
//! the centroid used to place row controls at the middle of their points.

use crate::core::error::{Result, RigError};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 3D position or direction in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Uniform vector with all three components equal
    pub fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Component-wise product, used to apply a non-uniform shape scale
    pub fn scale_by(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// True when every component is within `eps` of the other vector
    pub fn approx_eq(self, other: Vec3, eps: f64) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.z - other.z).abs() < eps
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A local transform triple: translate, rotate (degrees), scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trs {
    pub translate: Vec3,
    pub rotate: Vec3,
    pub scale: Vec3,
}

impl Default for Trs {
    fn default() -> Self {
        Self {
            translate: Vec3::ZERO,
            rotate: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Trs {
    pub fn from_translate(translate: Vec3) -> Self {
        Self {
            translate,
            ..Self::default()
        }
    }
}

/// An axis-aligned bounding box as a (min, max) corner pair
pub type Bounds = (Vec3, Vec3);

/// Union of two bounding boxes
pub fn union_bounds(a: Bounds, b: Bounds) -> Bounds {
    (a.0.min(b.0), a.1.max(b.1))
}

/// Per-axis arithmetic mean of a point set
///
/// Undefined for an empty input: returns [`RigError::EmptyPointSet`].
pub fn centroid(points: &[Vec3]) -> Result<Vec3> {
    if points.is_empty() {
        return Err(RigError::EmptyPointSet);
    }
    let sum = points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
    Ok(sum * (1.0 / points.len() as f64))
}
