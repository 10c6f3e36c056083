//! Spawning and difficulty progression
//!
//! Asteroid waves, splitting, saucer scheduling and player respawn placement.
//! Every placement loop is bounded: after `MAX_PLACEMENT_ATTEMPTS` draws (or
//! once the respawn clearance would reach zero) a fixed fallback position is
//! used instead.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::asteroid::{Asteroid, AsteroidSize};
use super::geometry::{distance, wrap_position};
use super::shapes::ASTEROIDS;
use super::ship::{SaucerSize, Ship, ShipKind};
use super::state::{GameEvent, RespawnMode, RespawnState, SessionState};
use super::timer::Deferred;
use crate::consts::*;
use crate::heading;

/// Outcome of one safe-respawn attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnAttempt {
    /// Ship placed at a clear point
    Spawned(Vec2),
    /// Too crowded; clearance shrunk and another attempt scheduled
    Retry { spawn_distance: f32 },
    /// Clearance exhausted; ship placed at screen center
    Fallback(Vec2),
}

fn screen_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
}

/// Point on the playfield farthest from `pos` (half a screen away on both axes)
fn antipode(pos: Vec2) -> Vec2 {
    wrap_position(
        pos + Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
    )
}

/// Random point in the central half of the screen
fn central_point(state: &mut SessionState) -> Vec2 {
    state.random_point(
        Vec2::new(SCREEN_WIDTH / 4.0, SCREEN_HEIGHT / 4.0),
        Vec2::new(SCREEN_WIDTH * 3.0 / 4.0, SCREEN_HEIGHT * 3.0 / 4.0),
    )
}

/// Build an asteroid with a random heading, speed in `(0, max_speed]`, outline and spin.
///
/// With `origin` it appears there (fragments of a split). Otherwise it is placed
/// away from the player by more than the current spawn distance.
pub fn random_asteroid(
    state: &mut SessionState,
    size: AsteroidSize,
    max_speed: f32,
    origin: Option<Vec2>,
) -> Asteroid {
    let direction = state.random_unit() * TAU;
    let speed = max_speed * (1.0 - state.random_unit());
    let variant = ((state.random_unit() * ASTEROIDS.len() as f32) as usize).min(ASTEROIDS.len() - 1);
    let spin = (state.random_unit() - 0.5) * 0.04;

    let pos = match origin {
        Some(pos) => pos,
        None => clear_field_point(state),
    };

    let mut asteroid = Asteroid::new(size, pos, heading(direction) * speed, ASTEROIDS[variant], spin);
    asteroid.body.set_rotation(state.random_unit() * TAU);
    asteroid
}

fn clear_field_point(state: &mut SessionState) -> Vec2 {
    let player = state.player.body.pos;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = state.random_point(Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        if candidate.distance(player) > state.spawn_distance {
            return candidate;
        }
    }
    log::warn!("No clear asteroid spawn point; using far side of the field");
    antipode(player)
}

/// Queue the next wave once the field is empty and the saucer is down.
///
/// Returns `true` only on the call that actually schedules it.
pub fn try_schedule_level_advance(state: &mut SessionState) -> bool {
    if !state.asteroids.is_empty() || !state.saucer.body.dead || state.level_load.is_pending() {
        return false;
    }
    state.level_load.schedule(state.tuning.level_delay_ms)
}

/// Advance the level and fill the field with big asteroids.
///
/// Candidates closer to the player than the spawn distance are discarded, not
/// redrawn, so a wave can come up short.
pub fn load_level(state: &mut SessionState) {
    state.level += 1;
    let wanted = state.tuning.level_base + state.level;
    let max_speed = state.tuning.asteroid_max_speed;

    for _ in 0..wanted {
        let asteroid = random_asteroid(state, AsteroidSize::Big, max_speed, None);
        if asteroid.body.pos.distance(state.player.body.pos) > state.spawn_distance {
            state.asteroids.push(asteroid);
        } else {
            log::debug!("Discarded asteroid spawned too close to the player");
        }
    }

    let count = state.asteroids.len();
    log::info!("Level {}: {} asteroids", state.level, count);
    state.emit(GameEvent::LevelStarted {
        level: state.level,
        asteroids: count,
    });
}

/// Score and split every newly destroyed asteroid. Returns the points awarded.
///
/// Each asteroid is handled once; calling again in the same frame is a no-op.
pub fn process_splits(state: &mut SessionState) -> u64 {
    let max_speed = state.tuning.asteroid_max_speed;
    let mut fragments = Vec::new();
    let mut awarded = 0;

    for i in 0..state.asteroids.len() {
        if !state.asteroids[i].needs_split() {
            continue;
        }
        state.asteroids[i].splitted = true;
        let size = state.asteroids[i].size;
        let pos = state.asteroids[i].body.pos;

        awarded += size.points();
        state.score.add(size.points());
        state.emit(GameEvent::AsteroidDestroyed { size });

        if let Some(child) = size.split() {
            for _ in 0..size.child_count() {
                fragments.push(random_asteroid(state, child, max_speed, Some(pos)));
            }
        }
    }

    state.asteroids.extend(fragments);
    awarded
}

/// Saucer delay: higher levels wait less on average
pub fn saucer_delay_ms(level: u32, roll: f32, schedule_ms: f32) -> f32 {
    (1.0 / level.max(1) as f32 + 1.0 + roll) * schedule_ms
}

/// Queue a saucer if none is flying or pending. Returns `true` when scheduled.
pub fn try_schedule_saucer(state: &mut SessionState) -> bool {
    if !state.saucer.body.dead || state.saucer_spawn.is_pending() {
        return false;
    }
    let roll = state.random_unit();
    let delay = saucer_delay_ms(state.level, roll, state.tuning.saucer_schedule_ms);
    log::debug!("Saucer scheduled in {:.0} ms", delay);
    state.saucer_spawn.schedule(delay)
}

/// Bring a saucer in from the left or right edge, away from the player
pub fn spawn_saucer(state: &mut SessionState) {
    let player = state.player.body.pos;
    let mut placement = None;
    let mut size = SaucerSize::Big;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = if state.random_unit() < 0.5 { 0.0 } else { SCREEN_WIDTH };
        let y = state.random_unit() * SCREEN_HEIGHT;
        size = if state.random_unit() >= 0.5 {
            SaucerSize::Big
        } else {
            SaucerSize::Small
        };
        let candidate = Vec2::new(x, y);
        if candidate.distance(player) >= state.spawn_distance {
            placement = Some(candidate);
            break;
        }
    }

    let pos = placement.unwrap_or_else(|| {
        log::warn!("No clear saucer entry point; entering opposite the player");
        let x = if player.x < SCREEN_WIDTH / 2.0 { SCREEN_WIDTH } else { 0.0 };
        Vec2::new(x, antipode(player).y)
    });

    let mut saucer = Ship::new(ShipKind::Saucer { size }, pos, &state.tuning);
    saucer.body.set_rotation(PI);
    state.saucer = saucer;

    log::debug!("Saucer ({:?}) entering at ({:.0}, {:.0})", size, pos.x, pos.y);
    state.emit(GameEvent::SaucerSpawned { size });
}

/// Live asteroids and the live saucer are all at least `spawn_distance` away
fn placement_is_clear(state: &SessionState, point: Vec2) -> bool {
    let rocks_clear = state
        .asteroids
        .iter()
        .filter(|a| !a.body.dead)
        .all(|a| distance(a.body.pos, point) >= state.spawn_distance);
    let saucer_clear =
        state.saucer.body.dead || distance(state.saucer.body.pos, point) >= state.spawn_distance;
    rocks_clear && saucer_clear
}

/// Try to place the player at a clear point in the middle of the screen.
///
/// A crowded candidate shrinks the clearance by `spawn_distance_step` and
/// retries after `respawn_retry_ms`. Once the clearance would drop to zero
/// the ship goes to the center instead.
pub fn attempt_respawn(state: &mut SessionState) -> RespawnAttempt {
    let candidate = central_point(state);
    if placement_is_clear(state, candidate) {
        place_player(state, candidate, false);
        return RespawnAttempt::Spawned(candidate);
    }

    let shrunk = state.spawn_distance - state.tuning.spawn_distance_step;
    if shrunk > 0.0 {
        state.spawn_distance = shrunk;
        state.respawn = RespawnState::Pending {
            remaining_ms: state.tuning.respawn_retry_ms,
            mode: RespawnMode::Safe,
        };
        log::debug!("Respawn blocked; clearance now {}", shrunk);
        return RespawnAttempt::Retry { spawn_distance: shrunk };
    }

    log::warn!("No clear respawn point; placing ship at center");
    let center = screen_center();
    place_player(state, center, false);
    RespawnAttempt::Fallback(center)
}

/// Land a hyperspace jump anywhere in the middle of the screen
pub fn hyperspace_jump(state: &mut SessionState) -> Vec2 {
    let point = central_point(state);
    place_player(state, point, true);
    point
}

fn place_player(state: &mut SessionState, pos: Vec2, hyperspace: bool) {
    state.spawn_distance = state.tuning.spawn_distance;
    state.respawn = RespawnState::Idle;

    if !hyperspace {
        state.halo.size = state.tuning.halo_size;
        state.halo.timer = Deferred::Pending {
            remaining_ms: state.tuning.halo_duration_ms,
        };
    }

    let mut player = Ship::new(ShipKind::Player, pos, &state.tuning);
    player.update_rotation(state.random_unit() * TAU);
    state.player = player;

    state.emit(GameEvent::PlayerSpawned { hyperspace });
}
