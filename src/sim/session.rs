//! Per-run score, health and clock

use serde::{Deserialize, Serialize};

use super::mode::GameMode;
use crate::consts::COUNTDOWN_INTERVAL_MS;
use crate::hit_points;

/// One play-through from mode selection to game over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub hp: u32,
    /// Whole seconds remaining
    pub time_left: u32,
    pub mode: GameMode,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

impl GameSession {
    /// Fresh session with the mode's starting hp and clock
    pub fn new(mode: GameMode) -> Self {
        Self {
            score: 0,
            hp: mode.starting_hp(),
            time_left: mode.duration_secs(),
            mode,
        }
    }

    /// Credit a kill made `distance` meters from the player, returns the points
    pub fn record_hit(&mut self, distance: f32) -> u64 {
        let points = hit_points(distance);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Lose one hp; true when the session is out of health
    pub fn take_damage(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }

    /// Run the clock down by `seconds`; true when time is up.
    /// The clock runs in every mode but only timed modes can run out.
    pub fn count_down(&mut self, seconds: u32) -> bool {
        self.time_left = self.time_left.saturating_sub(seconds);
        self.is_over()
    }

    /// Either end condition reached
    pub fn is_over(&self) -> bool {
        self.hp == 0 || (self.mode.is_timed() && self.time_left == 0)
    }
}

/// One-second countdown driven by the frame clock
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    next_due_ms: Option<f64>,
}

impl Countdown {
    /// Start counting from `now_ms`
    pub fn arm(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + COUNTDOWN_INTERVAL_MS);
    }

    pub fn disarm(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Number of whole seconds elapsed since the last poll.
    /// Non-finite timestamps count as no time passing.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(due) = self.next_due_ms else {
            return 0;
        };
        if !now_ms.is_finite() || now_ms < due {
            return 0;
        }
        let elapsed = ((now_ms - due) / COUNTDOWN_INTERVAL_MS).floor() + 1.0;
        self.next_due_ms = Some(due + elapsed * COUNTDOWN_INTERVAL_MS);
        elapsed.min(u32::MAX as f64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_uses_mode_table() {
        let s = GameSession::new(GameMode::Survival);
        assert_eq!(s.hp, 5);
        assert_eq!(s.time_left, 999);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut s = GameSession::new(GameMode::Classic);
        assert!(!s.take_damage());
        assert!(!s.take_damage());
        assert!(s.take_damage());
        assert!(s.take_damage());
        assert_eq!(s.hp, 0);
        assert!(s.is_over());
    }

    #[test]
    fn test_countdown_ends_timed_modes_only() {
        let mut s = GameSession::new(GameMode::TimeAttack);
        for _ in 0..29 {
            assert!(!s.count_down(1));
        }
        assert!(s.count_down(1));
        assert_eq!(s.time_left, 0);
        s.count_down(1);
        assert_eq!(s.time_left, 0);

        // Survival's clock runs on the HUD but never ends the session
        let mut survival = GameSession::new(GameMode::Survival);
        assert!(!survival.count_down(5));
        assert_eq!(survival.time_left, 994);
        assert!(!survival.count_down(2000));
        assert_eq!(survival.time_left, 0);
        assert!(!survival.is_over());
    }

    #[test]
    fn test_record_hit() {
        let mut s = GameSession::new(GameMode::Classic);
        assert_eq!(s.record_hit(3.0), 16);
        assert_eq!(s.record_hit(1.2), 12);
        assert_eq!(s.score, 28);
    }

    #[test]
    fn test_countdown_poll() {
        let mut c = Countdown::default();
        assert_eq!(c.poll(5000.0), 0);

        c.arm(1000.0);
        assert_eq!(c.poll(1999.0), 0);
        assert_eq!(c.poll(2000.0), 1);
        assert_eq!(c.poll(2500.0), 0);
        // A stalled frame catches up every missed second
        assert_eq!(c.poll(5100.0), 3);

        c.disarm();
        assert_eq!(c.poll(9000.0), 0);
    }

    #[test]
    fn test_countdown_poll_bad_timestamps() {
        let mut c = Countdown::default();
        c.arm(0.0);
        assert_eq!(c.poll(f64::INFINITY), 0);
        assert_eq!(c.poll(f64::NAN), 0);
        // Still on schedule afterwards
        assert_eq!(c.poll(1000.0), 1);

        // A huge jump is computed, not iterated
        assert_eq!(c.poll(1.0e12), 999_999_999);
        assert_eq!(c.poll(1.0e12 + 999.0), 0);
        assert_eq!(c.poll(1.0e12 + 1000.0), 1);
    }
}
