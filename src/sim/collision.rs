//! Collision detection between vector hulls
//!
//! Not an exact polygon intersection: both hulls are moved into a frame
//! anchored on the first hull's first corner and turned by the bearing of its
//! third corner, then their axis-aligned boxes are compared. Grazing contacts
//! at some angles will report differently than a true SAT test would; the
//! arcade feel depends on exactly this behaviour.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::geometry::{bounding_box, rotate_vector};
use super::ship::{Ship, Shot};

/// Anything with a world-space hull that can be hit
pub trait Collider {
    fn corners(&self) -> &[Vec2];
    fn is_dead(&self) -> bool;
}

impl Collider for Ship {
    fn corners(&self) -> &[Vec2] {
        &self.body.corners
    }

    fn is_dead(&self) -> bool {
        self.body.dead
    }
}

impl Collider for Shot {
    fn corners(&self) -> &[Vec2] {
        &self.body.corners
    }

    fn is_dead(&self) -> bool {
        self.body.dead
    }
}

impl Collider for Asteroid {
    fn corners(&self) -> &[Vec2] {
        &self.body.corners
    }

    fn is_dead(&self) -> bool {
        self.body.dead
    }
}

/// Bounding-box overlap of two hulls in the rotated frame of `a`
///
/// Hulls with fewer than three corners never collide.
pub fn check_collision(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }

    let origin = a[0];
    let reference = a[2] - origin;
    let angle = reference.y.atan2(reference.x);

    let align = |p: &Vec2| rotate_vector(*p - origin, angle);
    let a_aligned: Vec<Vec2> = a.iter().map(align).collect();
    let b_aligned: Vec<Vec2> = b.iter().map(align).collect();

    bounding_box(&a_aligned).overlaps(&bounding_box(&b_aligned))
}

/// Hull test between two colliders, ignoring liveness
#[inline]
pub fn collides(a: &impl Collider, b: &impl Collider) -> bool {
    check_collision(a.corners(), b.corners())
}

/// Both alive and overlapping
#[inline]
pub fn live_hit(a: &impl Collider, b: &impl Collider) -> bool {
    !a.is_dead() && !b.is_dead() && collides(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(center: Vec2, half: f32) -> Vec<Vec2> {
        vec![
            center + Vec2::new(-half, -half),
            center + Vec2::new(half, -half),
            center + Vec2::new(half, half),
            center + Vec2::new(-half, half),
        ]
    }

    #[test]
    fn test_disjoint_shapes_never_collide() {
        let a = square(Vec2::ZERO, 5.0);
        let b = square(Vec2::new(100.0, 100.0), 5.0);
        assert!(!check_collision(&a, &b));
        assert!(!check_collision(&b, &a));
    }

    #[test]
    fn test_identical_shapes_collide() {
        let a = square(Vec2::new(40.0, 40.0), 5.0);
        assert!(check_collision(&a, &a.clone()));
    }

    #[test]
    fn test_near_overlap_and_clear_gap() {
        let a = square(Vec2::ZERO, 5.0);
        assert!(check_collision(&a, &square(Vec2::new(6.0, 0.0), 5.0)));
        assert!(!check_collision(&a, &square(Vec2::new(25.0, 0.0), 5.0)));
    }

    #[test]
    fn test_degenerate_hull_never_collides() {
        let a = vec![Vec2::ZERO, Vec2::ONE];
        let b = square(Vec2::ZERO, 5.0);
        assert!(!check_collision(&a, &b));
        assert!(!check_collision(&b, &a));
    }

    #[test]
    fn test_alignment_uses_third_corner() {
        // A thin sliver whose third corner points straight up: the frame is turned
        // a quarter turn, swapping which axis separates the boxes.
        let a = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 10.0)];
        let b = vec![Vec2::new(-3.0, 4.0), Vec2::new(-2.0, 4.0), Vec2::new(-2.0, 5.0)];

        let angle = std::f32::consts::FRAC_PI_2;
        let a_r: Vec<Vec2> = a.iter().map(|p| rotate_vector(*p, angle)).collect();
        let b_r: Vec<Vec2> = b.iter().map(|p| rotate_vector(*p, angle)).collect();
        let expected = bounding_box(&a_r).overlaps(&bounding_box(&b_r));

        assert_eq!(check_collision(&a, &b), expected);
    }

    proptest! {
        #[test]
        fn collision_symmetric_for_axis_aligned_squares(
            ax in -300.0f32..300.0, ay in -300.0f32..300.0,
            bx in -300.0f32..300.0, by in -300.0f32..300.0,
        ) {
            let a = square(Vec2::new(ax, ay), 5.0);
            let b = square(Vec2::new(bx, by), 5.0);
            prop_assert_eq!(check_collision(&a, &b), check_collision(&b, &a));
        }
    }
}
