//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod body;
pub mod collision;
pub mod debris;
pub mod geometry;
pub mod shapes;
pub mod ship;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use asteroid::{Asteroid, AsteroidSize};
pub use body::{Body, Explosion};
pub use collision::{Collider, check_collision};
pub use debris::Debris;
pub use ship::{SaucerSize, Ship, ShipKind, ShipStats, Shot};
pub use spawn::RespawnAttempt;
pub use state::{GameEvent, GamePhase, RespawnMode, RespawnState, SessionState};
pub use tick::{TickInput, award_extra_lives, tick};
pub use timer::Deferred;
