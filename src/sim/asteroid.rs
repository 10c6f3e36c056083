//! Asteroids and their splitting rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::shapes::Shape;
use crate::consts::*;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Big,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Outline scale (diameter class)
    pub fn diameter(self) -> f32 {
        match self {
            AsteroidSize::Big => BIG_ASTEROID,
            AsteroidSize::Medium => MED_ASTEROID,
            AsteroidSize::Small => SMALL_ASTEROID,
        }
    }

    /// Points for destroying an asteroid of this size
    pub fn points(self) -> u64 {
        match self {
            AsteroidSize::Big => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Size of the two fragments left behind, if any
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Big => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Fragments spawned on destruction
    pub fn child_count(self) -> usize {
        if self.split().is_some() { 2 } else { 0 }
    }
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    /// Rotation per frame (radians)
    pub spin: f32,
    /// Children already spawned for this death
    pub splitted: bool,
}

impl Asteroid {
    pub fn new(size: AsteroidSize, pos: Vec2, vel: Vec2, shape: Shape, spin: f32) -> Self {
        Self {
            body: Body::new(pos, vel, shape, size.diameter()),
            size,
            spin,
            splitted: false,
        }
    }

    pub fn update(&mut self) {
        if !self.body.dead {
            self.body.set_rotation(self.body.rotation + self.spin);
        }
        self.body.advance();
    }

    pub fn explode(&mut self) -> bool {
        self.body.explode(self.size.diameter() * 2.0)
    }

    /// Dead and still owing its split
    pub fn needs_split(&self) -> bool {
        self.body.dead && !self.splitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shapes::ASTEROIDS;

    #[test]
    fn test_split_table() {
        assert_eq!(AsteroidSize::Big.split(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.split(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.split(), None);
        assert_eq!(AsteroidSize::Big.child_count(), 2);
        assert_eq!(AsteroidSize::Small.child_count(), 0);
    }

    #[test]
    fn test_asteroid_spins_while_alive() {
        let mut rock = Asteroid::new(AsteroidSize::Big, Vec2::new(300.0, 300.0), Vec2::ZERO, ASTEROIDS[0], 0.1);
        rock.update();
        assert!((rock.body.rotation - 0.1).abs() < 1e-6);

        rock.explode();
        rock.update();
        assert!((rock.body.rotation - 0.1).abs() < 1e-6);
        assert!(rock.needs_split());
    }
}
