use glam::Vec2;
use grovebound_core::config::ProjectileConfig;
use grovebound_core::types::Aabb;

use crate::events::{Faction, ProjectileSpawn};

/// A projectile in flight. Moves in a straight line until it hits
/// something or outlives its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Pixels per tick.
    pub velocity: Vec2,
    pub damage: f32,
    pub faction: Faction,
    pub spawned_at: u64,
    size: f32,
    lifetime_ms: u64,
}

impl Projectile {
    pub fn from_spawn(spawn: &ProjectileSpawn, now: u64, cfg: &ProjectileConfig) -> Self {
        let speed = match spawn.faction {
            Faction::Player => cfg.player_speed,
            Faction::Enemy => cfg.enemy_speed,
        };
        Self {
            position: spawn.origin,
            velocity: spawn.direction * speed,
            damage: spawn.damage,
            faction: spawn.faction,
            spawned_at: now,
            size: cfg.size,
            lifetime_ms: cfg.lifetime_ms,
        }
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.position, self.size)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.spawned_at) > self.lifetime_ms
    }
}
