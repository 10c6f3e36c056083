//! Scene drawing for a session

use std::f32::consts::TAU;

use glam::Vec2;

use super::Renderer;
use crate::consts::*;
use crate::heading;
use crate::sim::body::{Body, Explosion};
use crate::sim::shapes::{PLAYER_FLAME, transform_path};
use crate::sim::{GamePhase, SessionState, Ship};

/// Particles in an explosion burst
const EXPLOSION_PARTICLES: usize = 8;

/// Draw one complete frame
pub fn draw_scene(state: &SessionState, renderer: &mut impl Renderer) {
    renderer.clear();

    for asteroid in &state.asteroids {
        draw_body(&asteroid.body, renderer);
    }

    if !state.saucer.body.hidden {
        draw_ship(&state.saucer, renderer);
    }

    if !state.player.body.hidden {
        draw_ship(&state.player, renderer);
        if state.halo.is_active() && state.halo.size > 1.0 {
            renderer.draw_circle(state.player.body.pos, state.halo.size);
        }
    } else {
        // Shots outlive a hidden ship
        draw_shots(&state.player, renderer);
    }

    if !state.debris.hidden {
        for fragment in &state.debris.fragments {
            renderer.draw_polyline(&fragment.endpoints(), false);
        }
    }

    draw_hud(state, renderer);
}

fn draw_body(body: &Body, renderer: &mut impl Renderer) {
    match &body.explosion {
        Some(explosion) => draw_explosion(body.pos, explosion, renderer),
        None if !body.dead => {
            for path in body.world_paths() {
                renderer.draw_polyline(&path, false);
            }
        }
        None => {}
    }
}

fn draw_ship(ship: &Ship, renderer: &mut impl Renderer) {
    draw_body(&ship.body, renderer);
    if ship.thrusting && ship.stats.flame_length > 0.0 && !ship.body.dead {
        let flame = transform_path(
            PLAYER_FLAME,
            ship.body.pos,
            ship.body.rotation,
            ship.body.scale * ship.stats.flame_length,
        );
        renderer.draw_polyline(&flame, false);
    }
    draw_shots(ship, renderer);
}

fn draw_shots(ship: &Ship, renderer: &mut impl Renderer) {
    for shot in ship.shots.iter().filter(|s| !s.body.dead) {
        renderer.draw_polyline(&shot.body.corners, true);
    }
}

/// Ring of particles pushed outward as the explosion runs
fn draw_explosion(center: Vec2, explosion: &Explosion, renderer: &mut impl Renderer) {
    if explosion.blast_size <= 0.0 {
        return;
    }
    let radius = explosion.blast_size * explosion.progress();
    for i in 0..EXPLOSION_PARTICLES {
        let angle = i as f32 * TAU / EXPLOSION_PARTICLES as f32;
        renderer.draw_circle(center + heading(angle) * radius, 1.0);
    }
}

fn draw_hud(state: &SessionState, renderer: &mut impl Renderer) {
    renderer.draw_text(state.score.pos, &state.score.value.to_string(), state.score.scale);

    for indicator in &state.life_indicators {
        for path in indicator.body.world_paths() {
            renderer.draw_polyline(&path, false);
        }
    }

    match state.phase {
        GamePhase::Paused => renderer.draw_centered_text(SCREEN_HEIGHT / 2.0, "PAUSED", 3.0),
        GamePhase::GameOver => renderer.draw_centered_text(SCREEN_HEIGHT / 2.0, "GAME OVER", 3.0),
        GamePhase::Playing | GamePhase::Exited => {}
    }

    renderer.draw_centered_text(FOOTER_Y, FOOTER_TEXT, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        polylines: usize,
        circles: usize,
        texts: Vec<String>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn draw_polyline(&mut self, _points: &[Vec2], _closed: bool) {
            self.polylines += 1;
        }
        fn draw_circle(&mut self, _center: Vec2, _radius: f32) {
            self.circles += 1;
        }
        fn draw_text(&mut self, _pos: Vec2, text: &str, _scale: f32) {
            self.texts.push(text.to_string());
        }
        fn draw_centered_text(&mut self, _y: f32, text: &str, _scale: f32) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_fresh_session_scene() {
        let state = SessionState::new(3, Tuning::default());
        let mut recorder = Recorder::default();
        draw_scene(&state, &mut recorder);

        assert_eq!(recorder.clears, 1);
        // Player hull plus two reserve ships
        assert_eq!(recorder.polylines, 3);
        assert_eq!(recorder.texts, vec!["0".to_string(), FOOTER_TEXT.to_string()]);
    }

    #[test]
    fn test_paused_banner() {
        let mut state = SessionState::new(3, Tuning::default());
        let paused = TickInput {
            focused: false,
            ..Default::default()
        };
        tick(&mut state, &paused);

        let mut recorder = Recorder::default();
        draw_scene(&state, &mut recorder);
        assert!(recorder.texts.iter().any(|t| t == "PAUSED"));
    }

    #[test]
    fn test_exploding_asteroid_draws_particles() {
        let mut state = SessionState::new(3, Tuning::default());
        let rock = crate::sim::spawn::random_asteroid(
            &mut state,
            crate::sim::AsteroidSize::Big,
            0.0,
            Some(Vec2::new(100.0, 100.0)),
        );
        state.asteroids.push(rock);
        state.asteroids[0].explode();

        let mut recorder = Recorder::default();
        draw_scene(&state, &mut recorder);
        assert_eq!(recorder.circles, EXPLOSION_PARTICLES);
    }
}
