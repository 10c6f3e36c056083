//! 2D vector helpers shared by entities and collision detection

use glam::Vec2;

/// Axis-aligned extents of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Box that contains nothing; any point extends it
    pub const EMPTY: Self = Self {
        left: f32::INFINITY,
        right: f32::NEG_INFINITY,
        top: f32::INFINITY,
        bottom: f32::NEG_INFINITY,
    };

    /// Strict overlap on both axes (shared edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        other.left < self.right
            && self.left < other.right
            && other.top < self.bottom
            && self.top < other.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Rotate `v` counter-clockwise by `angle` radians
#[inline]
pub fn rotate_vector(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

/// Min/max reduction over x and y
pub fn bounding_box(points: &[Vec2]) -> BoundingBox {
    points.iter().fold(BoundingBox::EMPTY, |bb, p| BoundingBox {
        left: bb.left.min(p.x),
        right: bb.right.max(p.x),
        top: bb.top.min(p.y),
        bottom: bb.bottom.max(p.y),
    })
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Wrap a position onto the torus `[0, width) × [0, height)`
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(pos.x.rem_euclid(width), pos.y.rem_euclid(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate_vector(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box_extents() {
        let bb = bounding_box(&[
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            Vec2::new(0.5, 0.5),
        ]);
        assert_eq!(bb.left, -2.0);
        assert_eq!(bb.right, 3.0);
        assert_eq!(bb.top, -1.0);
        assert_eq!(bb.bottom, 4.0);
    }

    #[test]
    fn test_empty_bounding_box_overlaps_nothing() {
        let bb = bounding_box(&[]);
        let unit = bounding_box(&[Vec2::ZERO, Vec2::ONE]);
        assert!(!bb.overlaps(&unit));
        assert!(!unit.overlaps(&bb));
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = bounding_box(&[Vec2::ZERO, Vec2::new(1.0, 1.0)]);
        let b = bounding_box(&[Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0)]);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_wrap_position() {
        let p = wrap_position(Vec2::new(-5.0, 705.0), 960.0, 700.0);
        assert_eq!(p, Vec2::new(955.0, 5.0));
    }

    proptest! {
        #[test]
        fn rotation_preserves_length(x in -500.0f32..500.0, y in -500.0f32..500.0, a in -10.0f32..10.0) {
            let v = Vec2::new(x, y);
            let r = rotate_vector(v, a);
            prop_assert!((r.length() - v.length()).abs() < 1e-2);
        }

        #[test]
        fn bounding_box_contains_all_points(points in proptest::collection::vec((-1e3f32..1e3, -1e3f32..1e3), 1..20)) {
            let points: Vec<Vec2> = points.into_iter().map(|(x, y)| Vec2::new(x, y)).collect();
            let bb = bounding_box(&points);
            for p in &points {
                prop_assert!(p.x >= bb.left && p.x <= bb.right);
                prop_assert!(p.y >= bb.top && p.y <= bb.bottom);
            }
        }
    }
}
