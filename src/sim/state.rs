//! Session state and core bookkeeping types
//!
//! Everything a play session owns lives in [`SessionState`]: the entity
//! collections, score and lives, and the deferred-action state machines.
//! It is created by [`SessionState::new`] and dropped when the session ends.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::body::Body;
use super::debris::Debris;
use super::shapes;
use super::ship::{SaucerSize, Ship, ShipKind};
use super::timer::Deferred;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Host window lost focus; the frame step is skipped
    Paused,
    /// Last ship lost
    GameOver,
    /// Player asked to leave (host returns to its start screen)
    Exited,
}

/// Things that happened during a frame, for audio and the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { by: ShipKind },
    Thrust { by: ShipKind },
    AsteroidDestroyed { size: AsteroidSize },
    SaucerSpawned { size: SaucerSize },
    SaucerDestroyed { size: SaucerSize, points: u64 },
    PlayerDestroyed { lives_left: u32 },
    PlayerSpawned { hyperspace: bool },
    ExtraLife { lives: u32 },
    LevelStarted { level: u32, asteroids: usize },
    GameOver { score: u64 },
}

/// Running score with its HUD placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: u64,
    pub pos: Vec2,
    pub scale: f32,
}

impl Score {
    pub fn new(pos: Vec2, scale: f32) -> Self {
        Self { value: 0, pos, scale }
    }

    pub fn add(&mut self, points: u64) {
        self.value = self.value.saturating_add(points);
    }
}

/// Reserve-ship icon in the HUD
#[derive(Debug, Clone)]
pub struct LifeIndicator {
    pub body: Body,
}

impl LifeIndicator {
    /// Icon for reserve slot `index`, pointing up
    pub fn at_slot(index: usize) -> Self {
        let pos = Vec2::new(30.0 + 20.0 * index as f32, 60.0);
        let mut body = Body::new(pos, Vec2::ZERO, shapes::PLAYER, PLAYER_SIZE);
        body.set_rotation(3.0 * PI / 2.0);
        Self { body }
    }
}

/// Post-respawn halo
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Halo {
    pub size: f32,
    /// Counts down to the halo clearing
    pub timer: Deferred,
}

impl Halo {
    pub fn is_active(&self) -> bool {
        self.timer.is_pending()
    }
}

/// How a pending respawn places the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnMode {
    /// Clear of asteroids and saucer, with shrinking clearance on retry
    Safe,
    /// Anywhere in the central region, no safety check
    Hyperspace,
}

/// Player replacement lifecycle; busy from death (or jump) until placement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RespawnState {
    #[default]
    Idle,
    Pending { remaining_ms: f32, mode: RespawnMode },
    /// Last ship lost; nothing will respawn
    Abandoned,
}

impl RespawnState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RespawnState::Idle)
    }

    /// Count down; yields the mode on the frame the attempt is due
    pub fn advance(&mut self, dt_ms: f32) -> Option<RespawnMode> {
        if let RespawnState::Pending { remaining_ms, mode } = self {
            *remaining_ms -= dt_ms;
            if *remaining_ms <= 0.0 {
                let mode = *mode;
                *self = RespawnState::Idle;
                return Some(mode);
            }
        }
        None
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub tuning: Tuning,
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Frames stepped (excluding paused frames)
    pub frame: u64,

    pub level: u32,
    /// Ships left, including the active one
    pub lives: u32,
    pub score: Score,
    /// Score at which the next extra life is granted
    pub new_life_at: u64,
    /// Current spawn clearance (shrinks during crowded respawns)
    pub spawn_distance: f32,

    pub player: Ship,
    pub saucer: Ship,
    pub asteroids: Vec<Asteroid>,
    pub debris: Debris,
    pub life_indicators: Vec<LifeIndicator>,

    pub level_load: Deferred,
    pub saucer_spawn: Deferred,
    pub respawn: RespawnState,
    pub game_over: Deferred,
    pub debris_hide: Deferred,
    pub halo: Halo,

    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl SessionState {
    /// Fresh session: ship at center, empty field, saucer not yet scheduled
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut player = Ship::new(
            ShipKind::Player,
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            &tuning,
        );
        player.update_rotation(rng.random::<f32>() * TAU);

        let mut saucer = Ship::new(ShipKind::Saucer { size: SaucerSize::Big }, Vec2::ZERO, &tuning);
        saucer.update_rotation(TAU);
        saucer.body.dead = true;
        saucer.body.hidden = true;

        let lives = tuning.starting_lives;
        let life_indicators = (0..lives.saturating_sub(1) as usize)
            .map(LifeIndicator::at_slot)
            .collect();

        log::info!("Session initialized with seed: {}", seed);

        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            frame: 0,
            level: 1,
            lives,
            score: Score::new(Vec2::new(20.0, 20.0), 2.0),
            new_life_at: tuning.new_life_score,
            spawn_distance: tuning.spawn_distance,
            player,
            saucer,
            asteroids: Vec::new(),
            debris: Debris::hidden(),
            life_indicators,
            level_load: Deferred::Idle,
            saucer_spawn: Deferred::Idle,
            respawn: RespawnState::Idle,
            game_over: Deferred::Idle,
            debris_hide: Deferred::Idle,
            halo: Halo::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Uniform in [0, 1)
    pub fn random_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform point in `[min, max)` on both axes
    pub fn random_point(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(
            min.x + self.random_unit() * (max.x - min.x),
            min.y + self.random_unit() * (max.y - min.y),
        )
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append a reserve-ship icon after the last one
    pub fn push_life_indicator(&mut self) {
        let slot = self.life_indicators.len();
        self.life_indicators.push(LifeIndicator::at_slot(slot));
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Exited)
    }

    /// Live asteroids (not yet exploded)
    pub fn live_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| !a.body.dead).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = SessionState::new(7, Tuning::default());
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.life_indicators.len(), 2);
        assert_eq!(state.new_life_at, 10_000);
        assert_eq!(state.spawn_distance, 200.0);
        assert!(state.asteroids.is_empty());
        assert!(state.saucer.body.dead && state.saucer.body.hidden);
        assert!(state.debris.hidden);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_life_indicator_slots() {
        let mut state = SessionState::new(7, Tuning::default());
        state.push_life_indicator();
        let last = state.life_indicators.last().unwrap();
        assert_eq!(last.body.pos, Vec2::new(30.0 + 20.0 * 2.0, 60.0));
    }

    #[test]
    fn test_same_seed_same_start() {
        let a = SessionState::new(42, Tuning::default());
        let b = SessionState::new(42, Tuning::default());
        assert_eq!(a.player.body.rotation, b.player.body.rotation);
    }

    #[test]
    fn test_respawn_state_countdown() {
        let mut respawn = RespawnState::Pending {
            remaining_ms: 30.0,
            mode: RespawnMode::Safe,
        };
        assert_eq!(respawn.advance(20.0), None);
        assert_eq!(respawn.advance(20.0), Some(RespawnMode::Safe));
        assert!(respawn.is_idle());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = SessionState::new(1, Tuning::default());
        state.emit(GameEvent::ExtraLife { lives: 4 });
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.events.is_empty());
    }
}
