//! Fixed timestep simulation tick
//!
//! Core game loop that advances one frame deterministically.

use glam::Vec2;

use super::collision::{check_collision, live_hit};
use super::debris::Debris;
use super::ship::{Ship, ShipKind};
use super::spawn::{
    attempt_respawn, hyperspace_jump, load_level, process_splits, spawn_saucer,
    try_schedule_level_advance, try_schedule_saucer,
};
use super::state::{GameEvent, GamePhase, RespawnMode, RespawnState, SessionState};
use super::timer::Deferred;
use crate::consts::*;
use crate::normalize_angle;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub hyperspace: bool,
    /// Leave the session
    pub escape: bool,
    /// Host window has focus; the frame is skipped without it
    pub focused: bool,
    /// Idle/demo mode - AI flies the ship
    pub idle_mode: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            rotate_left: false,
            rotate_right: false,
            thrust: false,
            fire: false,
            hyperspace: false,
            escape: false,
            focused: true,
            idle_mode: false,
        }
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut SessionState, input: &TickInput) {
    if input.escape && !state.is_over() {
        log::info!("Session exited at frame {}", state.frame);
        state.phase = GamePhase::Exited;
    }
    if state.is_over() {
        return;
    }

    if !input.focused {
        state.phase = GamePhase::Paused;
        if state.tuning.timers_run_while_paused {
            advance_timers(state, FRAME_MS);
        }
        return;
    }
    state.phase = GamePhase::Playing;
    advance_timers(state, FRAME_MS);
    // A timer may have just ended the game
    if state.is_over() {
        return;
    }

    // Idle/demo mode - AI plays the game
    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };
    apply_player_input(state, &input);

    for asteroid in &mut state.asteroids {
        asteroid.update();
    }
    if !state.debris.hidden {
        state.debris.update();
    }
    if !state.saucer.body.hidden {
        state.saucer.update();
        if state.saucer.body.done {
            state.saucer.body.hidden = true;
            state.saucer.shots.clear();
        }
    }
    state.player.update();

    resolve_asteroid_hits(state);
    process_splits(state);
    resolve_saucer_fights(state);
    state.asteroids.retain(|a| !a.body.done);

    try_schedule_level_advance(state);
    try_schedule_saucer(state);

    handle_player_death(state);
    handle_hyperspace(state);
    award_extra_lives(state);

    if !state.saucer.body.dead {
        saucer_ai(state);
    }

    if state.halo.is_active() {
        state.halo.size *= state.tuning.halo_decay;
    }
    state.frame += 1;
}

/// Count down every deferred action by `dt_ms` and run the ones that fire
fn advance_timers(state: &mut SessionState, dt_ms: f32) {
    if state.level_load.advance(dt_ms) {
        load_level(state);
    }
    if state.saucer_spawn.advance(dt_ms) {
        spawn_saucer(state);
    }
    match state.respawn.advance(dt_ms) {
        Some(RespawnMode::Safe) => {
            attempt_respawn(state);
        }
        Some(RespawnMode::Hyperspace) => {
            hyperspace_jump(state);
        }
        None => {}
    }
    if state.game_over.advance(dt_ms) {
        log::info!("Game over at level {} with score {}", state.level, state.score.value);
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::GameOver {
            score: state.score.value,
        });
    }
    if state.debris_hide.advance(dt_ms) {
        state.debris.hidden = true;
    }
    if state.halo.timer.advance(dt_ms) {
        state.halo.size = 0.0;
    }
}

fn apply_player_input(state: &mut SessionState, input: &TickInput) {
    let player = &mut state.player;
    player.thrusting = false;
    if player.body.dead || player.body.hidden {
        return;
    }

    let rotation_speed = state.tuning.rotation_speed;
    if input.rotate_left {
        player.rotate_by(-rotation_speed);
    }
    if input.rotate_right {
        player.rotate_by(rotation_speed);
    }
    if input.thrust {
        player.fire_thrusters();
        state.emit(GameEvent::Thrust { by: ShipKind::Player });
    }
    if input.fire && state.player.fire() {
        state.emit(GameEvent::ShotFired { by: ShipKind::Player });
    }
    if input.hyperspace {
        state.player.hyperspace = true;
    }
}

/// Built-in pilot: turn toward the nearest target, shoot when lined up,
/// jump away from anything about to hit
fn autopilot(state: &SessionState) -> TickInput {
    let mut input = TickInput::default();
    let player = &state.player;
    if player.body.dead || player.body.hidden {
        return input;
    }
    let pos = player.body.pos;

    let saucer = (!state.saucer.body.dead && !state.saucer.body.hidden).then_some(state.saucer.body.pos);
    let nearest = state
        .asteroids
        .iter()
        .filter(|a| !a.body.dead)
        .map(|a| a.body.pos)
        .chain(saucer)
        .min_by(|a, b| {
            a.distance(pos)
                .partial_cmp(&b.distance(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = nearest else {
        return input;
    };
    let offset = target - pos;
    let distance = offset.length();
    let delta = normalize_angle(offset.y.atan2(offset.x) - player.body.rotation);

    let turn_threshold = state.tuning.rotation_speed / 2.0;
    input.rotate_left = delta < -turn_threshold;
    input.rotate_right = delta > turn_threshold;
    input.fire = delta.abs() < 0.15 && distance < player.stats.shot_range;
    input.thrust = delta.abs() < 0.3 && distance > 300.0;
    input.hyperspace = distance < 40.0;
    input
}

/// Player shots and the player ship against every live asteroid
fn resolve_asteroid_hits(state: &mut SessionState) {
    let player_tangible = !state.player.body.hidden;

    for asteroid in &mut state.asteroids {
        if asteroid.body.dead {
            continue;
        }
        for shot in &mut state.player.shots {
            if live_hit(&*asteroid, &*shot) {
                asteroid.explode();
                shot.explode();
                break;
            }
        }
        // The ship's hull supplies the alignment frame
        if player_tangible && live_hit(&state.player, &*asteroid) {
            asteroid.explode();
            state.player.explode();
        }
    }
}

/// Hull of member `index` of a ship's side: its shots, then the ship itself
fn member_hull(ship: &Ship, index: usize) -> Option<&[Vec2]> {
    match ship.shots.get(index) {
        Some(shot) => (!shot.body.dead).then_some(shot.body.corners.as_slice()),
        None => (!ship.body.dead && !ship.body.hidden).then_some(ship.body.corners.as_slice()),
    }
}

/// Explode member `index`; returns `true` when it was the ship and it just died
fn explode_member(ship: &mut Ship, index: usize) -> bool {
    match ship.shots.get_mut(index) {
        Some(shot) => {
            shot.explode();
            false
        }
        None => ship.explode(),
    }
}

/// Player side (shots and ship) against saucer side (shots and saucer)
fn resolve_saucer_fights(state: &mut SessionState) {
    let player_members = state.player.shots.len() + 1;
    let saucer_members = state.saucer.shots.len() + 1;
    let mut saucer_killed = false;

    for i in 0..player_members {
        for j in 0..saucer_members {
            let hit = match (member_hull(&state.player, i), member_hull(&state.saucer, j)) {
                (Some(a), Some(b)) => check_collision(a, b),
                _ => false,
            };
            if hit {
                explode_member(&mut state.player, i);
                saucer_killed |= explode_member(&mut state.saucer, j);
                break;
            }
        }
    }

    if saucer_killed {
        let points = state.saucer.stats.score_value;
        state.score.add(points);
        if let Some(size) = state.saucer.saucer_size() {
            log::debug!("Saucer ({:?}) destroyed for {} points", size, points);
            state.emit(GameEvent::SaucerDestroyed { size, points });
        }
    }
}

/// Turn a freshly dead player into debris and queue what comes next
fn handle_player_death(state: &mut SessionState) {
    if !state.player.body.dead || state.player.body.hidden || !state.respawn.is_idle() {
        return;
    }

    state.player.body.hidden = true;
    state.debris = Debris::new(state.player.body.pos, state.player.body.vel);
    state.debris_hide = Deferred::Idle;
    state.debris_hide.schedule(state.tuning.debris_visible_ms);

    if state.lives <= 1 {
        state.lives = 0;
        state.respawn = RespawnState::Abandoned;
        state.game_over.schedule(state.tuning.game_over_delay_ms);
        log::info!("Last ship lost");
    } else {
        state.lives -= 1;
        state.life_indicators.pop();
        state.respawn = RespawnState::Pending {
            remaining_ms: state.tuning.respawn_delay_ms,
            mode: RespawnMode::Safe,
        };
    }
    state.emit(GameEvent::PlayerDestroyed {
        lives_left: state.lives,
    });
}

fn handle_hyperspace(state: &mut SessionState) {
    let player = &mut state.player;
    if !player.hyperspace || player.body.dead || !state.respawn.is_idle() {
        player.hyperspace = false;
        return;
    }
    player.hyperspace = false;
    player.body.hidden = true;
    state.respawn = RespawnState::Pending {
        remaining_ms: state.tuning.hyperspace_delay_ms,
        mode: RespawnMode::Hyperspace,
    };
}

/// Grant at most one extra life per frame. Returns `true` when one was granted.
pub fn award_extra_lives(state: &mut SessionState) -> bool {
    // No grants once the last ship is gone
    if state.score.value < state.new_life_at || state.respawn == RespawnState::Abandoned {
        return false;
    }
    state.new_life_at += state.tuning.new_life_score;
    state.lives += 1;
    state.push_life_indicator();
    log::debug!("Extra life at {} points", state.score.value);
    state.emit(GameEvent::ExtraLife { lives: state.lives });
    true
}

/// Saucer steering: turn toward the player, shoot when lined up, always thrust
fn saucer_ai(state: &mut SessionState) {
    let rotation_speed = state.tuning.rotation_speed;
    let target = state.player.body.pos;
    let player_targetable = !state.player.body.dead && !state.player.body.hidden;

    let saucer = &mut state.saucer;
    let offset = target - saucer.body.pos;
    let bearing = offset.y.atan2(offset.x);
    let delta = normalize_angle(bearing - saucer.body.rotation).clamp(-rotation_speed, rotation_speed);
    saucer.rotate_by(delta);

    let kind = saucer.kind;
    // Unclamped turns only; a signed `delta < rotation_speed` would also fire while swinging hard left
    let lined_up = delta.abs() < rotation_speed;
    if player_targetable && offset.length() < SHOT_DISTANCE && lined_up && saucer.fire() {
        state.emit(GameEvent::ShotFired { by: kind });
    }
    state.saucer.fire_thrusters();
    state.emit(GameEvent::Thrust { by: kind });
}
