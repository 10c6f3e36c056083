//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (key state and window focus)
//! - Time/ticks (fixed-step frame clock)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_MS, MAX_SUBSTEPS};
use crate::sim::TickInput;

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    Up,
    Down,
    Left,
    Right,
    Escape,
}

/// Host input polled once per frame
pub trait InputSource {
    fn is_key_down(&self, key: KeyCode) -> bool;
    fn has_focus(&self) -> bool;
}

/// Player key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub fire: KeyCode,
    pub thrust: KeyCode,
    pub rotate_left: KeyCode,
    pub rotate_right: KeyCode,
    pub hyperspace: KeyCode,
    pub exit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fire: KeyCode::Space,
            thrust: KeyCode::Up,
            rotate_left: KeyCode::Left,
            rotate_right: KeyCode::Right,
            hyperspace: KeyCode::Down,
            exit: KeyCode::Escape,
        }
    }
}

impl TickInput {
    /// Sample the host's keys through `bindings`
    pub fn poll(source: &impl InputSource, bindings: &KeyBindings) -> Self {
        Self {
            rotate_left: source.is_key_down(bindings.rotate_left),
            rotate_right: source.is_key_down(bindings.rotate_right),
            thrust: source.is_key_down(bindings.thrust),
            fire: source.is_key_down(bindings.fire),
            hyperspace: source.is_key_down(bindings.hyperspace),
            escape: source.is_key_down(bindings.exit),
            focused: source.has_focus(),
            idle_mode: false,
        }
    }
}

/// In-memory key state, fed by host key events
#[derive(Debug, Clone)]
pub struct KeyState {
    down: HashSet<KeyCode>,
    focused: bool,
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            down: HashSet::new(),
            focused: true,
        }
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        // Keys released while unfocused never reach us
        if !focused {
            self.down.clear();
        }
    }
}

impl InputSource for KeyState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

/// Fixed-step accumulator turning host refresh callbacks into whole frames
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator_ms: f32,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulation frames to step for a host callback at `now_ms`
    pub fn frames_due(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time_ms.replace(now_ms) else {
            return 0;
        };
        // Clamp long stalls (tab switches, debugger pauses)
        let elapsed = ((now_ms - last) as f32).clamp(0.0, 100.0);
        self.accumulator_ms += elapsed;

        let mut frames = 0;
        while self.accumulator_ms >= FRAME_MS && frames < MAX_SUBSTEPS {
            self.accumulator_ms -= FRAME_MS;
            frames += 1;
        }
        if frames == MAX_SUBSTEPS {
            self.accumulator_ms = self.accumulator_ms.min(FRAME_MS);
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut keys = KeyState::new();
        keys.press(KeyCode::Up);
        assert!(keys.is_key_down(KeyCode::Up));
        keys.set_focus(false);
        assert!(!keys.has_focus());
        assert!(!keys.is_key_down(KeyCode::Up));
    }

    #[test]
    fn test_poll_maps_bindings() {
        let mut keys = KeyState::new();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::Left);

        let input = TickInput::poll(&keys, &KeyBindings::default());
        assert!(input.fire && input.rotate_left);
        assert!(!input.thrust && !input.rotate_right && !input.escape);
        assert!(input.focused);

        let swapped = KeyBindings {
            fire: KeyCode::Up,
            thrust: KeyCode::Space,
            ..Default::default()
        };
        let input = TickInput::poll(&keys, &swapped);
        assert!(input.thrust && !input.fire);
    }

    #[test]
    fn test_frame_clock_steps_whole_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frames_due(0.0), 0);
        assert_eq!(clock.frames_due(10.0), 0);
        assert_eq!(clock.frames_due(35.0), 2);
    }

    #[test]
    fn test_frame_clock_caps_substeps() {
        let mut clock = FrameClock::new();
        clock.frames_due(0.0);
        assert_eq!(clock.frames_due(5000.0), MAX_SUBSTEPS);
    }
}
