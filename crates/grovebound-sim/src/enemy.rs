use glam::Vec2;
use grovebound_core::config::EnemyConfig;
use grovebound_core::types::Aabb;
use rand::Rng;

use crate::entity::{Body, EntityKind};
use crate::events::{DamageNumber, Faction, ProjectileSpawn};

/// Per-grunt ranged attack timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShooterTimer {
    pub delay_ms: u64,
    pub last_shot: u64,
}

/// Regular enemy that chases the player. Some of them also shoot.
#[derive(Debug, Clone)]
pub struct Grunt {
    position: Vec2,
    health: f32,
    speed: f32,
    size: f32,
    damage: f32,
    shooter: Option<ShooterTimer>,
    damage_numbers: Vec<DamageNumber>,
}

impl Grunt {
    /// Roll a new grunt. The shooter roll and delay come from `rng`.
    pub fn spawn<R: Rng + ?Sized>(position: Vec2, now: u64, cfg: &EnemyConfig, rng: &mut R) -> Self {
        let shooter = if rng.gen_bool(cfg.shoot_chance.clamp(0.0, 1.0)) {
            Some(ShooterTimer {
                delay_ms: rng.gen_range(cfg.shoot_delay_min_ms..=cfg.shoot_delay_max_ms),
                last_shot: now,
            })
        } else {
            None
        };
        Self::new(position, cfg, shooter)
    }

    pub fn new(position: Vec2, cfg: &EnemyConfig, shooter: Option<ShooterTimer>) -> Self {
        Self {
            position,
            health: cfg.max_health,
            speed: cfg.speed,
            size: cfg.size,
            damage: cfg.damage,
            shooter,
            damage_numbers: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn is_shooter(&self) -> bool {
        self.shooter.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.position, self.size)
    }

    /// Step toward the player and fire if this grunt is a shooter whose
    /// delay has passed.
    pub fn advance(&mut self, now: u64, player_pos: Vec2) -> Option<ProjectileSpawn> {
        let dir = (player_pos - self.position).normalize_or_zero();
        self.position += dir * self.speed;

        let timer = self.shooter.as_mut()?;
        if now.saturating_sub(timer.last_shot) <= timer.delay_ms || dir == Vec2::ZERO {
            return None;
        }
        timer.last_shot = now;
        Some(ProjectileSpawn {
            origin: self.position,
            direction: dir,
            damage: self.damage,
            faction: Faction::Enemy,
        })
    }

    /// Returns true on the killing hit.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() || amount <= 0.0 {
            return false;
        }
        self.health -= amount;
        self.damage_numbers.push(DamageNumber {
            position: self.position,
            amount,
        });
        !self.is_alive()
    }

    pub fn drain_damage_numbers(&mut self) -> Vec<DamageNumber> {
        std::mem::take(&mut self.damage_numbers)
    }
}

impl Body for Grunt {
    fn kind(&self) -> EntityKind {
        EntityKind::Grunt
    }

    fn position(&self) -> Vec2 {
        Grunt::position(self)
    }

    fn set_position(&mut self, position: Vec2) {
        Grunt::set_position(self, position)
    }
}
