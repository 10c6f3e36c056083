//! Ships (player and saucer) and the shots they own

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::bounding_box;
use super::shapes::{self, Shape};
use crate::consts::*;
use crate::heading;
use crate::tuning::Tuning;

/// Saucer size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaucerSize {
    Big,
    Small,
}

impl SaucerSize {
    /// Outline scale
    pub fn scale(self) -> f32 {
        match self {
            SaucerSize::Big => BIG_SAUCER,
            SaucerSize::Small => SMALL_SAUCER,
        }
    }
}

/// Who flies the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipKind {
    Player,
    Saucer { size: SaucerSize },
}

/// Per-kind ship parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipStats {
    pub scale: f32,
    pub max_speed: f32,
    pub thrust_accel: f32,
    /// Velocity retained per coasting frame (1.0 = no drag)
    pub drag: f32,
    pub shot_interval_ms: f32,
    pub shot_speed: f32,
    /// Distance a shot travels before expiring
    pub shot_range: f32,
    pub blast_size: f32,
    /// Thruster flame length multiplier (0 = no flame)
    pub flame_length: f32,
    /// Points for destroying this ship
    pub score_value: u64,
    /// Whether the hull outline turns with the heading
    pub rotates_hull: bool,
}

impl ShipStats {
    /// Stat table keyed by kind
    pub fn for_kind(kind: ShipKind, tuning: &Tuning) -> Self {
        let player = Self {
            scale: PLAYER_SIZE,
            max_speed: tuning.max_speed,
            thrust_accel: tuning.thrust_accel,
            drag: tuning.ship_drag,
            shot_interval_ms: tuning.shot_interval_ms,
            shot_speed: tuning.shot_speed,
            shot_range: tuning.shot_distance,
            blast_size: BLAST_SIZE,
            flame_length: 1.0,
            score_value: 0,
            rotates_hull: true,
        };

        match kind {
            ShipKind::Player => player,
            ShipKind::Saucer { size: SaucerSize::Big } => Self {
                scale: BIG_SAUCER,
                max_speed: player.max_speed / 3.0,
                thrust_accel: player.thrust_accel / 2.0,
                drag: 1.0,
                shot_interval_ms: player.shot_interval_ms * 10.0,
                shot_range: player.shot_range / 3.0,
                blast_size: player.blast_size / 2.0,
                flame_length: 0.0,
                score_value: 200,
                rotates_hull: false,
                ..player
            },
            // Smaller, quicker, and more trigger-happy
            ShipKind::Saucer { size: SaucerSize::Small } => Self {
                scale: SMALL_SAUCER,
                max_speed: player.max_speed / 2.0,
                thrust_accel: player.thrust_accel / 2.0,
                drag: 1.0,
                shot_interval_ms: player.shot_interval_ms * 6.0,
                shot_range: player.shot_range / 3.0,
                blast_size: player.blast_size / 4.0,
                flame_length: 0.0,
                score_value: 1000,
                rotates_hull: false,
                ..player
            },
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Shot {
    pub body: Body,
    /// Frames of flight remaining
    pub frames_left: u32,
}

impl Shot {
    pub fn new(pos: Vec2, vel: Vec2, range: f32) -> Self {
        let speed = vel.length().max(f32::EPSILON);
        Self {
            body: Body::new(pos, vel, shapes::SHOT, 1.0),
            frames_left: (range / speed).ceil() as u32,
        }
    }

    pub fn update(&mut self) {
        self.body.advance();
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            // Expired in flight: gone without an explosion
            self.body.dead = true;
            self.body.done = true;
        }
    }

    pub fn explode(&mut self) -> bool {
        self.body.explode(0.0)
    }
}

/// A ship with its in-flight shots
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    pub kind: ShipKind,
    pub stats: ShipStats,
    pub shots: Vec<Shot>,
    /// Time until the next shot is allowed (ms)
    pub shot_cooldown_ms: f32,
    /// Hyperspace jump requested
    pub hyperspace: bool,
    /// Thrusters fired this frame
    pub thrusting: bool,
}

impl Ship {
    pub fn new(kind: ShipKind, pos: Vec2, tuning: &Tuning) -> Self {
        let stats = ShipStats::for_kind(kind, tuning);
        let shape: Shape = match kind {
            ShipKind::Player => shapes::PLAYER,
            ShipKind::Saucer { .. } => shapes::SAUCER,
        };
        Self {
            body: Body::new(pos, Vec2::ZERO, shape, stats.scale),
            kind,
            stats,
            shots: Vec::new(),
            shot_cooldown_ms: 0.0,
            hyperspace: false,
            thrusting: false,
        }
    }

    pub fn is_saucer(&self) -> bool {
        matches!(self.kind, ShipKind::Saucer { .. })
    }

    pub fn saucer_size(&self) -> Option<SaucerSize> {
        match self.kind {
            ShipKind::Saucer { size } => Some(size),
            ShipKind::Player => None,
        }
    }

    /// Set heading; the hull only follows for kinds that rotate it
    pub fn update_rotation(&mut self, angle: f32) {
        if self.stats.rotates_hull {
            self.body.set_rotation(angle);
        } else {
            self.body.set_heading_only(angle);
        }
    }

    pub fn rotate_by(&mut self, delta: f32) {
        self.update_rotation(self.body.rotation + delta);
    }

    /// Where shots leave the ship
    fn muzzle(&self) -> Vec2 {
        if self.stats.rotates_hull {
            self.body.corners.first().copied().unwrap_or(self.body.pos)
        } else {
            let bb = bounding_box(&self.body.corners);
            Vec2::new((bb.left + bb.right) / 2.0, (bb.top + bb.bottom) / 2.0)
        }
    }

    /// Spawn a shot if the cooldown has elapsed. Returns whether one was fired.
    pub fn fire(&mut self) -> bool {
        if self.body.dead || self.shot_cooldown_ms > 0.0 {
            return false;
        }
        let vel = self.body.vel + heading(self.body.rotation) * self.stats.shot_speed;
        self.shots.push(Shot::new(self.muzzle(), vel, self.stats.shot_range));
        self.shot_cooldown_ms = self.stats.shot_interval_ms;
        true
    }

    /// Accelerate along the heading, capped at `max_speed`
    pub fn fire_thrusters(&mut self) {
        if self.body.dead {
            return;
        }
        let vel = self.body.vel + heading(self.body.rotation) * self.stats.thrust_accel;
        self.body.vel = vel.clamp_length_max(self.stats.max_speed);
        self.thrusting = true;
    }

    /// Advance one frame: cooldown, drag, motion, and shots
    pub fn update(&mut self) {
        self.shot_cooldown_ms = (self.shot_cooldown_ms - FRAME_MS).max(0.0);
        if !self.thrusting {
            self.body.vel *= self.stats.drag;
        }
        self.body.advance();

        for shot in &mut self.shots {
            shot.update();
        }
        self.shots.retain(|shot| !shot.body.dead);
    }

    pub fn explode(&mut self) -> bool {
        let exploded = self.body.explode(self.stats.blast_size);
        if exploded {
            self.thrusting = false;
        }
        exploded
    }
}
