//! Audio cue routing
//!
//! The simulation raises [`GameEvent`]s; the [`AudioManager`] turns them into
//! [`SoundCue`]s at an effective volume and hands them to an [`AudioSink`].
//! Playback itself is the host's business.

use crate::sim::{AsteroidSize, GameEvent, SaucerSize, ShipKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player shot
    Fire,
    /// Saucer shot
    SaucerFire,
    /// Player thrusters
    Thrust,
    /// Asteroid destroyed
    BangLarge,
    BangMedium,
    BangSmall,
    /// Saucer on screen
    SaucerBig,
    SaucerSmall,
    /// Player ship destroyed
    ShipExplosion,
    /// Extra life granted
    ExtraShip,
    /// Game over
    GameOver,
}

/// Fire-and-forget playback target
pub trait AudioSink {
    /// Play `cue` at `volume` (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("Sound: {:?} at {:.2}", cue, volume);
    }
}

/// Frames between repeated thrust cues
const THRUST_REPEAT_FRAMES: u32 = 8;

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Silence while the host window is unfocused
    mute_on_blur: bool,
    focused: bool,
    thrust_cooldown: u32,
    saucer_cooldown: u32,
    played: u64,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            focused: true,
            thrust_cooldown: 0,
            saucer_cooldown: 0,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_mute_on_blur(&mut self, enabled: bool) {
        self.mute_on_blur = enabled;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted || (self.mute_on_blur && !self.focused) {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues actually forwarded to the sink so far
    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play a sound effect
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
        self.played += 1;
    }

    /// Translate one frame's events into cues
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        self.thrust_cooldown = self.thrust_cooldown.saturating_sub(1);
        self.saucer_cooldown = self.saucer_cooldown.saturating_sub(1);
        for event in events {
            if let Some(cue) = self.cue_for(event) {
                self.play(cue);
            }
        }
    }

    fn cue_for(&mut self, event: &GameEvent) -> Option<SoundCue> {
        match *event {
            GameEvent::ShotFired { by: ShipKind::Player } => Some(SoundCue::Fire),
            GameEvent::ShotFired { .. } => Some(SoundCue::SaucerFire),
            // Thrust is raised every frame; only re-trigger once the last cue ran out
            GameEvent::Thrust { by: ShipKind::Player } => {
                repeat_after(&mut self.thrust_cooldown).then_some(SoundCue::Thrust)
            }
            // The saucer's engine tone loops while it flies
            GameEvent::Thrust { by: ShipKind::Saucer { size } } => {
                repeat_after(&mut self.saucer_cooldown).then_some(saucer_tone(size))
            }
            GameEvent::AsteroidDestroyed { size } => Some(match size {
                AsteroidSize::Big => SoundCue::BangLarge,
                AsteroidSize::Medium => SoundCue::BangMedium,
                AsteroidSize::Small => SoundCue::BangSmall,
            }),
            GameEvent::SaucerSpawned { size } => {
                self.saucer_cooldown = THRUST_REPEAT_FRAMES;
                Some(saucer_tone(size))
            }
            GameEvent::SaucerDestroyed { .. } => Some(SoundCue::BangLarge),
            GameEvent::PlayerDestroyed { .. } => Some(SoundCue::ShipExplosion),
            GameEvent::ExtraLife { .. } => Some(SoundCue::ExtraShip),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::PlayerSpawned { .. } | GameEvent::LevelStarted { .. } => None,
        }
    }
}

fn saucer_tone(size: SaucerSize) -> SoundCue {
    match size {
        SaucerSize::Big => SoundCue::SaucerBig,
        SaucerSize::Small => SoundCue::SaucerSmall,
    }
}

/// `true` (and rearm) when a looping cue's cooldown has run out
fn repeat_after(cooldown: &mut u32) -> bool {
    if *cooldown > 0 {
        return false;
    }
    *cooldown = THRUST_REPEAT_FRAMES;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundCue, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            self.0.push((cue, volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_events(&[
            GameEvent::ShotFired { by: ShipKind::Player },
            GameEvent::AsteroidDestroyed { size: AsteroidSize::Medium },
            GameEvent::LevelStarted { level: 2, asteroids: 5 },
        ]);
        let cues: Vec<_> = audio.sink().0.iter().map(|(c, _)| *c).collect();
        assert_eq!(cues, vec![SoundCue::Fire, SoundCue::BangMedium]);
        assert_eq!(audio.played(), 2);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundCue::Fire);
        assert_eq!(audio.sink().0[0].1, 0.25);

        audio.set_muted(true);
        audio.play(SoundCue::Fire);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_blur_silences_unless_disabled() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_focused(false);
        audio.play(SoundCue::Fire);
        assert_eq!(audio.played(), 0);

        audio.set_mute_on_blur(false);
        audio.play(SoundCue::Fire);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_thrust_is_throttled() {
        let mut audio = AudioManager::new(Recorder::default());
        let thrust = [GameEvent::Thrust { by: ShipKind::Player }];
        for _ in 0..THRUST_REPEAT_FRAMES {
            audio.handle_events(&thrust);
        }
        assert_eq!(audio.played(), 1);
        audio.handle_events(&thrust);
        assert_eq!(audio.played(), 2);
    }

    #[test]
    fn test_saucer_tone_loops_while_flying() {
        let mut audio = AudioManager::new(Recorder::default());
        let size = SaucerSize::Small;
        audio.handle_events(&[GameEvent::SaucerSpawned { size }]);
        let engine = [GameEvent::Thrust { by: ShipKind::Saucer { size } }];
        for _ in 0..THRUST_REPEAT_FRAMES * 2 {
            audio.handle_events(&engine);
        }
        let cues: Vec<_> = audio.sink().0.iter().map(|(c, _)| *c).collect();
        assert_eq!(cues, vec![SoundCue::SaucerSmall; 3]);
    }
}
