use glam::Vec2;
use grovebound_core::config::PlayerConfig;
use grovebound_core::types::Aabb;

use crate::entity::{Body, EntityKind};
use crate::events::{DamageNumber, Faction, ProjectileSpawn};
use crate::hazard::HazardTarget;

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec2,
    /// Speed before any hazard slow.
    nominal_speed: f32,
    speed: f32,
    health: f32,
    max_health: f32,
    size: f32,
    shoot_delay_ms: u64,
    projectile_damage: f32,
    last_shot: Option<u64>,
    damage_numbers: Vec<DamageNumber>,
}

impl Player {
    pub fn new(position: Vec2, cfg: &PlayerConfig) -> Self {
        Self {
            position,
            nominal_speed: cfg.speed,
            speed: cfg.speed,
            health: cfg.max_health,
            max_health: cfg.max_health,
            size: cfg.size,
            shoot_delay_ms: cfg.shoot_delay_ms,
            projectile_damage: cfg.projectile_damage,
            last_shot: None,
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

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Move one tick in `direction` at the current speed. Diagonals are
    /// normalised so they are not faster than straight moves.
    pub fn move_by(&mut self, direction: Vec2) {
        self.position += direction.normalize_or_zero() * self.speed;
    }

    /// Fire toward `target` if the shot delay has passed.
    pub fn try_shoot(&mut self, now: u64, target: Vec2) -> Option<ProjectileSpawn> {
        if let Some(last) = self.last_shot {
            if now.saturating_sub(last) < self.shoot_delay_ms {
                return None;
            }
        }
        let direction = (target - self.position).normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }
        self.last_shot = Some(now);
        Some(ProjectileSpawn {
            origin: self.position,
            direction,
            damage: self.projectile_damage,
            faction: Faction::Player,
        })
    }

    pub fn drain_damage_numbers(&mut self) -> Vec<DamageNumber> {
        std::mem::take(&mut self.damage_numbers)
    }
}

impl HazardTarget for Player {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.position, self.size)
    }

    fn nominal_speed(&self) -> f32 {
        self.nominal_speed
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Returns true on the hit that kills the player.
    fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() || amount <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.damage_numbers.push(DamageNumber {
            position: self.position,
            amount,
        });
        !self.is_alive()
    }
}

impl Body for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn position(&self) -> Vec2 {
        Player::position(self)
    }

    fn set_position(&mut self, position: Vec2) {
        Player::set_position(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Vec2::ZERO, &PlayerConfig::default())
    }

    #[test]
    fn test_diagonal_move_is_normalised() {
        let mut p = player();
        p.move_by(Vec2::new(1.0, 1.0));
        assert!((p.position().length() - 5.0).abs() < 1e-5);
        p.set_speed(2.5);
        p.move_by(Vec2::ZERO);
        p.move_by(Vec2::new(0.0, -3.0));
        assert!((p.position().y - (5.0 / 2f32.sqrt() - 2.5)).abs() < 1e-5);
    }

    #[test]
    fn test_shoot_delay() {
        let mut p = player();
        let shot = p.try_shoot(0, Vec2::new(0.0, 10.0)).expect("first shot");
        assert_eq!(shot.direction, Vec2::Y);
        assert_eq!(shot.faction, Faction::Player);
        assert!(p.try_shoot(299, Vec2::X).is_none());
        assert!(p.try_shoot(300, Vec2::X).is_some());
        // Aiming at yourself does nothing and does not consume the delay.
        assert!(p.try_shoot(1000, Vec2::ZERO).is_none());
        assert!(p.try_shoot(1001, Vec2::X).is_some());
    }

    #[test]
    fn test_take_damage() {
        let mut p = player();
        assert!(!p.take_damage(40.0));
        assert!(p.take_damage(60.0));
        assert_eq!(p.health(), 0.0);
        assert!(!p.take_damage(1.0));
        let texts: Vec<_> = p.drain_damage_numbers().iter().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["-40", "-60"]);
    }
}
