//! One-shot deferred actions
//!
//! Each delayed subsystem (level load, saucer spawn, game over, ...) owns one
//! [`Deferred`]. Scheduling only succeeds from `Idle`, so an action can never
//! be queued twice, and the countdown returns to `Idle` when it fires.

/// Idle/Pending countdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Deferred {
    #[default]
    Idle,
    Pending {
        remaining_ms: f32,
    },
}

impl Deferred {
    pub fn is_idle(&self) -> bool {
        matches!(self, Deferred::Idle)
    }

    pub fn is_pending(&self) -> bool {
        !self.is_idle()
    }

    /// Start the countdown. Returns `false` (and changes nothing) if already pending.
    pub fn schedule(&mut self, delay_ms: f32) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Deferred::Pending {
            remaining_ms: delay_ms.max(0.0),
        };
        true
    }

    /// Count down by `dt_ms`. Returns `true` on the frame the action fires.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        match self {
            Deferred::Idle => false,
            Deferred::Pending { remaining_ms } => {
                *remaining_ms -= dt_ms;
                if *remaining_ms <= 0.0 {
                    *self = Deferred::Idle;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn remaining_ms(&self) -> Option<f32> {
        match self {
            Deferred::Idle => None,
            Deferred::Pending { remaining_ms } => Some(*remaining_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_only_from_idle() {
        let mut timer = Deferred::default();
        assert!(timer.schedule(100.0));
        assert!(!timer.schedule(50.0));
        assert_eq!(timer.remaining_ms(), Some(100.0));
    }

    #[test]
    fn test_fires_once_then_idles() {
        let mut timer = Deferred::default();
        timer.schedule(30.0);
        assert!(!timer.advance(20.0));
        assert!(timer.advance(20.0));
        assert!(timer.is_idle());
        assert!(!timer.advance(20.0));
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut timer = Deferred::default();
        timer.schedule(0.0);
        assert!(timer.advance(0.0));
    }
}
