//! Primitive control-curve geometry
//!
//! Controls are drawn as single wire curves so they select easily in a
//! viewport without rendering. Points are generated in local space on the
//! ground plane (Y up) and scaled per axis before the document stores
//! them on the shape node.

use crate::core::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// Shape of a control curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Cube,
    Sphere,
}

impl ShapeKind {
    /// Parse a shape name (as accepted on the CLI)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(ShapeKind::Circle),
            "square" => Some(ShapeKind::Square),
            "cube" => Some(ShapeKind::Cube),
            "sphere" => Some(ShapeKind::Sphere),
            _ => None,
        }
    }
}

/// Orientation axis for planar shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

fn orient(p: Vec3, axis: Axis) -> Vec3 {
    // base shapes live in the XZ plane (Y normal); permute for X / Z
    match axis {
        Axis::Y => p,
        Axis::X => Vec3::new(p.y, p.x, p.z),
        Axis::Z => Vec3::new(p.x, p.z, p.y),
    }
}

fn circle_points() -> Vec<Vec3> {
    let n = 16;
    (0..=n)
        .map(|i| {
            let t = (i % n) as f64 / n as f64 * std::f64::consts::TAU;
            Vec3::new(t.cos(), 0.0, t.sin())
        })
        .collect()
}

fn square_points() -> Vec<Vec3> {
    vec![
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, -1.0),
    ]
}

// one-stroke cube wire: bottom loop, then each vertical edge with the
// connecting top segments
fn cube_points() -> Vec<Vec3> {
    let c = |x: f64, y: f64, z: f64| Vec3::new(x, y, z);
    vec![
        c(-1.0, -1.0, -1.0),
        c(1.0, -1.0, -1.0),
        c(1.0, -1.0, 1.0),
        c(-1.0, -1.0, 1.0),
        c(-1.0, -1.0, -1.0),
        c(-1.0, 1.0, -1.0),
        c(1.0, 1.0, -1.0),
        c(1.0, -1.0, -1.0),
        c(1.0, 1.0, -1.0),
        c(1.0, 1.0, 1.0),
        c(1.0, -1.0, 1.0),
        c(1.0, 1.0, 1.0),
        c(-1.0, 1.0, 1.0),
        c(-1.0, -1.0, 1.0),
        c(-1.0, 1.0, 1.0),
        c(-1.0, 1.0, -1.0),
    ]
}

fn sphere_points() -> Vec<Vec3> {
    // three orthogonal circles traced as one stroke
    let xz = circle_points();
    let xy: Vec<Vec3> = xz.iter().map(|p| Vec3::new(p.x, p.z, 0.0)).collect();
    let yz: Vec<Vec3> = xz.iter().map(|p| Vec3::new(0.0, p.x, p.z)).collect();
    let mut points = xz;
    points.extend(xy);
    points.extend(yz);
    points
}

/// Generate the curve points for a shape
///
/// `scale` is the per-axis size (already multiplied by the control size),
/// `offset` shifts the shape relative to its pivot, `axis` orients planar
/// shapes.
pub fn curve_points(kind: ShapeKind, scale: Vec3, offset: Vec3, axis: Axis) -> Vec<Vec3> {
    let base = match kind {
        ShapeKind::Circle => circle_points(),
        ShapeKind::Square => square_points(),
        ShapeKind::Cube => cube_points(),
        ShapeKind::Sphere => sphere_points(),
    };
    base.into_iter()
        .map(|p| orient(p, axis).scale_by(scale) + offset)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shape_names() {
        assert_eq!(ShapeKind::parse("cube"), Some(ShapeKind::Cube));
        assert_eq!(ShapeKind::parse("Square"), Some(ShapeKind::Square));
        assert_eq!(ShapeKind::parse("blob"), None);
    }

    #[test]
    fn test_square_is_closed_loop() {
        let pts = curve_points(ShapeKind::Square, Vec3::ONE, Vec3::ZERO, Axis::Y);
        assert_eq!(pts.first(), pts.last());
        assert_eq!(pts.len(), 5);
    }

    #[test]
    fn test_circle_is_closed_and_unit_radius() {
        let pts = curve_points(ShapeKind::Circle, Vec3::ONE, Vec3::ZERO, Axis::Y);
        assert_eq!(pts.first(), pts.last());
        for p in &pts {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 1.0).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_scale_applies_per_axis() {
        let pts = curve_points(
            ShapeKind::Cube,
            Vec3::new(2.0, 1.0, 0.5),
            Vec3::ZERO,
            Axis::Y,
        );
        for p in &pts {
            assert!(p.x.abs() <= 2.0 + 1e-9);
            assert!(p.y.abs() <= 1.0 + 1e-9);
            assert!(p.z.abs() <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn test_offset_shifts_all_points() {
        let off = Vec3::new(0.0, 3.0, 0.0);
        let pts = curve_points(ShapeKind::Square, Vec3::ONE, off, Axis::Y);
        for p in &pts {
            assert_eq!(p.y, 3.0);
        }
    }

    #[test]
    fn test_orient_x_moves_plane_normal() {
        let pts = curve_points(ShapeKind::Square, Vec3::ONE, Vec3::ZERO, Axis::X);
        // square in the YZ plane: every x is zero
        for p in &pts {
            assert_eq!(p.x, 0.0);
        }
    }
}
