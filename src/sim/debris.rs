//! Wreckage left at the player's last death site
//!
//! Purely visual: fragments drift and spin, and never collide.

use glam::Vec2;

use super::geometry::rotate_vector;
use super::shapes::PLAYER;
use crate::consts::PLAYER_SIZE;

/// One broken hull segment
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    /// Segment midpoint
    pub pos: Vec2,
    /// Half-segment from the midpoint
    pub half: Vec2,
    pub vel: Vec2,
    pub spin: f32,
}

impl Fragment {
    /// Segment endpoints in world space
    pub fn endpoints(&self) -> [Vec2; 2] {
        [self.pos - self.half, self.pos + self.half]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Debris {
    pub fragments: Vec<Fragment>,
    pub hidden: bool,
}

impl Debris {
    /// Break the player hull apart at `pos`, inheriting the ship's drift
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        let hull = PLAYER[0];
        let fragments = hull
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let a = pair[0] * PLAYER_SIZE;
                let b = pair[1] * PLAYER_SIZE;
                let mid = (a + b) / 2.0;
                // Fly outward from the hull centre, alternating spin direction
                let outward = mid.normalize_or_zero() * 0.6;
                let spin = if i % 2 == 0 { 0.05 } else { -0.07 };
                Fragment {
                    pos: pos + mid,
                    half: (b - a) / 2.0,
                    vel: vel * 0.5 + outward,
                    spin,
                }
            })
            .collect();
        Self {
            fragments,
            hidden: false,
        }
    }

    /// Placeholder carried before the first death
    pub fn hidden() -> Self {
        Self {
            fragments: Vec::new(),
            hidden: true,
        }
    }

    pub fn update(&mut self) {
        for fragment in &mut self.fragments {
            fragment.pos += fragment.vel;
            fragment.half = rotate_vector(fragment.half, fragment.spin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_fragment_per_hull_edge() {
        let debris = Debris::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert_eq!(debris.fragments.len(), PLAYER[0].len() - 1);
        assert!(!debris.hidden);
    }

    #[test]
    fn test_fragments_drift_apart() {
        let mut debris = Debris::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let before: Vec<f32> = debris.fragments.iter().map(|f| f.pos.distance(Vec2::new(100.0, 100.0))).collect();
        for _ in 0..10 {
            debris.update();
        }
        for (fragment, start) in debris.fragments.iter().zip(before) {
            assert!(fragment.pos.distance(Vec2::new(100.0, 100.0)) > start);
        }
    }
}
