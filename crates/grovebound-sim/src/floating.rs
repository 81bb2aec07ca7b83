//! Floating damage numbers: rise and fade over a fixed duration.

use glam::Vec2;
use grovebound_core::constants::{DAMAGE_NUMBER_DURATION_MS, DAMAGE_NUMBER_RISE_PX};

use crate::events::DamageNumber;

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    /// Where the number first appeared.
    pub origin: Vec2,
    pub spawned_at: u64,
}

impl FloatingText {
    pub fn new(number: &DamageNumber, now: u64) -> Self {
        Self {
            text: number.text(),
            origin: number.position,
            spawned_at: now,
        }
    }

    /// Linear progress through the lifetime, clamped to `[0, 1]`.
    fn progress(&self, now: u64) -> f32 {
        let elapsed = now.saturating_sub(self.spawned_at);
        (elapsed as f32 / DAMAGE_NUMBER_DURATION_MS as f32).min(1.0)
    }

    /// Current position: moves straight up by the rise distance.
    pub fn position_at(&self, now: u64) -> Vec2 {
        self.origin - Vec2::new(0.0, DAMAGE_NUMBER_RISE_PX * self.progress(now))
    }

    /// Opacity from 255 down to 0.
    pub fn alpha_at(&self, now: u64) -> u8 {
        (255.0 * (1.0 - self.progress(now))).round() as u8
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.spawned_at) >= DAMAGE_NUMBER_DURATION_MS
    }
}
