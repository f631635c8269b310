//! Geometry primitives for the horizontal (x/z) plane
//!
//! Positions are `glam::Vec3`; everything here ignores `y` unless stated.
//! Walls, camera sight lines and laser beams all reduce to these tests.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the x/z plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Rect {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Footprint of a box given its centre and half extents
    pub fn from_center(center: Vec3, half_extent: Vec3) -> Self {
        Self::new(
            center.x - half_extent.x,
            center.x + half_extent.x,
            center.z - half_extent.z,
            center.z + half_extent.z,
        )
    }

    /// Bounding box of two points
    pub fn bounding(a: Vec3, b: Vec3) -> Self {
        Self::new(a.x.min(b.x), a.x.max(b.x), a.z.min(b.z), a.z.max(b.z))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.min_x - margin,
            self.max_x + margin,
            self.min_z - margin,
            self.max_z + margin,
        )
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    /// Exclusive containment test (touching the edge is outside)
    pub fn contains_strict(&self, p: Vec3) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.z > self.min_z && p.z < self.max_z
    }
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(b.x - a.x, b.z - a.z).length()
}

/// Check whether the chord p1 -> p2 passes through `rect`
///
/// The chord must straddle the rectangle along an axis (one endpoint beyond
/// each side). It is then sampled where it crosses the rectangle's centre
/// line on that axis, and hits if the sample falls inside the perpendicular
/// extent. A chord with no extent along an axis never hits on that axis.
pub fn segment_intersects_rect(p1: Vec3, p2: Vec3, rect: &Rect) -> bool {
    let center = rect.center();

    let straddles_x =
        (p1.x < rect.min_x && p2.x > rect.max_x) || (p1.x > rect.max_x && p2.x < rect.min_x);
    let dx = p2.x - p1.x;
    if straddles_x && dx.abs() > f32::EPSILON {
        let t = (center.x - p1.x) / dx;
        let z = p1.z + t * (p2.z - p1.z);
        if z >= rect.min_z && z <= rect.max_z {
            return true;
        }
    }

    let straddles_z =
        (p1.z < rect.min_z && p2.z > rect.max_z) || (p1.z > rect.max_z && p2.z < rect.min_z);
    let dz = p2.z - p1.z;
    if straddles_z && dz.abs() > f32::EPSILON {
        let t = (center.y - p1.z) / dz;
        let x = p1.x + t * dx;
        if x >= rect.min_x && x <= rect.max_x {
            return true;
        }
    }

    false
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`
///
/// Returns `None` for a degenerate line (`a == b` on the x/z plane).
pub fn line_distance(p: Vec3, a: Vec3, b: Vec3) -> Option<f32> {
    // Line in implicit form: A*x + B*z + C = 0
    let la = b.z - a.z;
    let lb = a.x - b.x;
    let lc = b.x * a.z - a.x * b.z;
    let norm = (la * la + lb * lb).sqrt();
    if norm < f32::EPSILON {
        return None;
    }
    Some((la * p.x + lb * p.z + lc).abs() / norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_wall() -> Rect {
        // 2x2 box centred on the origin
        Rect::from_center(Vec3::ZERO, Vec3::new(1.0, 1.5, 1.0))
    }

    #[test]
    fn test_chord_through_rect_along_x() {
        let rect = unit_wall();
        assert!(segment_intersects_rect(
            Vec3::new(-3.0, 0.0, 0.2),
            Vec3::new(3.0, 0.0, -0.3),
            &rect
        ));
    }

    #[test]
    fn test_chord_through_rect_along_z() {
        let rect = unit_wall();
        assert!(segment_intersects_rect(
            Vec3::new(0.5, 2.0, -4.0),
            Vec3::new(-0.5, 0.5, 4.0),
            &rect
        ));
    }

    #[test]
    fn test_chord_passing_beside_rect() {
        let rect = unit_wall();
        assert!(!segment_intersects_rect(
            Vec3::new(-3.0, 0.0, 2.0),
            Vec3::new(3.0, 0.0, 2.5),
            &rect
        ));
    }

    #[test]
    fn test_chord_ending_inside_does_not_straddle() {
        let rect = unit_wall();
        assert!(!segment_intersects_rect(
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            &rect
        ));
    }

    #[test]
    fn test_degenerate_chord_is_not_an_intersection() {
        let rect = unit_wall();
        let p = Vec3::new(-3.0, 0.0, 0.0);
        assert!(!segment_intersects_rect(p, p, &rect));
        // Vertical chord with zero x extent crosses along z only
        assert!(segment_intersects_rect(
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(0.0, 0.0, 3.0),
            &rect
        ));
    }

    #[test]
    fn test_rect_containment() {
        let rect = unit_wall();
        assert!(rect.contains(Vec3::new(1.0, 9.0, -1.0)));
        assert!(!rect.contains_strict(Vec3::new(1.0, 0.0, 0.0)));
        assert!(rect.expanded(0.5).contains_strict(Vec3::new(1.2, 0.0, 0.0)));
    }

    #[test]
    fn test_line_distance() {
        let a = Vec3::new(-1.0, 0.0, -1.0);
        let b = Vec3::new(1.0, 0.0, -1.0);
        let d = line_distance(Vec3::new(5.0, 3.0, 0.0), a, b).unwrap();
        assert!((d - 1.0).abs() < 1e-6);
        assert!(line_distance(Vec3::ZERO, a, a).is_none());
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let d = horizontal_distance(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, 0.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
