//! Shared kinematics and lifecycle for every simulated entity
//!
//! A body moves by its velocity each frame, wraps at the screen edges, and
//! walks through `alive → dead (exploding) → done`. `corners` is the hull
//! outline in world space and is refreshed whenever position or rotation moves.

use glam::Vec2;

use super::geometry::wrap_position;
use super::shapes::{Shape, transform_path};
use crate::consts::{EXPLOSION_FRAMES, SCREEN_HEIGHT, SCREEN_WIDTH};

/// An explosion in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    /// Frames until the explosion finishes
    pub frames_left: u32,
    /// Particle spread radius at full size
    pub blast_size: f32,
}

impl Explosion {
    /// 0.0 when just started, 1.0 when finished
    pub fn progress(&self) -> f32 {
        1.0 - self.frames_left as f32 / EXPLOSION_FRAMES as f32
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians
    pub rotation: f32,
    /// Outline scale
    pub scale: f32,
    pub shape: Shape,
    /// World-space hull
    pub corners: Vec<Vec2>,
    pub dead: bool,
    pub hidden: bool,
    /// Explosion finished; eligible for removal
    pub done: bool,
    pub explosion: Option<Explosion>,
    /// Rotation the hull was last transformed with
    hull_rotation: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, shape: Shape, scale: f32) -> Self {
        let mut body = Self {
            pos,
            vel,
            rotation: 0.0,
            scale,
            shape,
            corners: Vec::new(),
            dead: false,
            hidden: false,
            done: false,
            explosion: None,
            hull_rotation: 0.0,
        };
        body.refresh_corners();
        body
    }

    /// Set heading and re-project the hull
    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation = angle;
        self.hull_rotation = angle;
        self.refresh_corners();
    }

    /// Set heading without touching the hull orientation
    pub fn set_heading_only(&mut self, angle: f32) {
        self.rotation = angle;
    }

    /// Move to `pos` and re-project the hull
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.refresh_corners();
    }

    pub fn refresh_corners(&mut self) {
        self.corners = transform_path(self.shape[0], self.pos, self.hull_rotation, self.scale);
    }

    /// World-space copy of every path in the shape (for rendering)
    pub fn world_paths(&self) -> Vec<Vec<Vec2>> {
        self.shape
            .iter()
            .map(|path| transform_path(path, self.pos, self.hull_rotation, self.scale))
            .collect()
    }

    /// Advance one frame: integrate, wrap, and run the explosion countdown
    pub fn advance(&mut self) {
        self.pos = wrap_position(self.pos + self.vel, SCREEN_WIDTH, SCREEN_HEIGHT);
        self.refresh_corners();

        if let Some(explosion) = &mut self.explosion {
            explosion.frames_left = explosion.frames_left.saturating_sub(1);
            if explosion.frames_left == 0 {
                self.explosion = None;
                self.done = true;
            }
        }
    }

    /// Mark dead and start the explosion. Returns `true` only the first time.
    pub fn explode(&mut self, blast_size: f32) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.explosion = Some(Explosion {
            frames_left: EXPLOSION_FRAMES,
            blast_size,
        });
        true
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shapes::SHOT;

    #[test]
    fn test_advance_wraps_at_edges() {
        let mut body = Body::new(Vec2::new(SCREEN_WIDTH - 1.0, 1.0), Vec2::new(3.0, -3.0), SHOT, 1.0);
        body.advance();
        assert!((body.pos.x - 2.0).abs() < 1e-3);
        assert!((body.pos.y - (SCREEN_HEIGHT - 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_corners_follow_position() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0), SHOT, 1.0);
        body.advance();
        assert_eq!(body.corners[0], Vec2::new(10.0, 9.0));
    }

    #[test]
    fn test_explode_is_one_shot() {
        let mut body = Body::new(Vec2::ZERO, Vec2::ZERO, SHOT, 1.0);
        assert!(body.explode(10.0));
        assert!(!body.explode(10.0));
        assert!(body.dead);
        assert!(!body.done);
    }

    #[test]
    fn test_done_after_explosion_finishes() {
        let mut body = Body::new(Vec2::new(50.0, 50.0), Vec2::ZERO, SHOT, 1.0);
        body.explode(10.0);
        for _ in 0..EXPLOSION_FRAMES - 1 {
            body.advance();
            assert!(!body.done);
        }
        body.advance();
        assert!(body.done);
        assert!(body.explosion.is_none());
    }

    #[test]
    fn test_heading_only_keeps_hull() {
        let mut body = Body::new(Vec2::new(50.0, 50.0), Vec2::ZERO, SHOT, 1.0);
        let before = body.corners.clone();
        body.set_heading_only(1.0);
        body.refresh_corners();
        assert_eq!(body.corners, before);
        assert_eq!(body.rotation, 1.0);
    }
}
