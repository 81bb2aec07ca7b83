use glam::Vec2;
use grovebound_core::config::BossConfig;
use grovebound_core::constants::PHASE_DAMAGE_STEP;
use grovebound_core::types::Aabb;

use crate::charge::{ChargeAttack, ChargeParams, ChargeState};
use crate::entity::{Body, EntityKind};
use crate::events::{BossTick, DamageNumber, Faction, HazardSpawn, ProjectileSpawn};

/// Presentation state of the boss sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAnimation {
    Idle,
    Flying,
    Attack,
    Death,
}

/// Horizontal facing, used to mirror the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Boss encounter state machine.
///
/// Each tick runs in a fixed order: death check, escalation and hazard
/// spawner, locomotion, circle barrage, charge. The three attack clocks are
/// independent and never block one another. Once dead, nothing else runs.
#[derive(Debug, Clone)]
pub struct Boss {
    config: BossConfig,
    position: Vec2,
    health: f32,
    /// Escalation counter, starts at 1.
    phase: u32,
    animation: BossAnimation,
    facing: Facing,
    died_at: Option<u64>,
    last_circle: Option<u64>,
    last_patch: u64,
    charge: ChargeAttack,
    damage_numbers: Vec<DamageNumber>,
}

impl Boss {
    /// Create a boss at `position`. The patch timer starts at `now`.
    pub fn new(position: Vec2, config: BossConfig, now: u64) -> Self {
        let charge = ChargeAttack::new(ChargeParams::from(&config));
        Self {
            health: config.max_health,
            config,
            position,
            phase: 1,
            animation: BossAnimation::Idle,
            facing: Facing::Right,
            died_at: None,
            last_circle: None,
            last_patch: now,
            charge,
            damage_numbers: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the boss without running any AI, e.g. for arena clamping.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.config.max_health
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn animation(&self) -> BossAnimation {
        self.animation
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn charge_state(&self) -> ChargeState {
        self.charge.state()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Tick at which the death state was entered.
    pub fn died_at(&self) -> Option<u64> {
        self.died_at
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.position, self.config.size)
    }

    /// Damage each circle projectile carries in the current phase.
    pub fn projectile_damage(&self) -> f32 {
        self.config.base_damage * (1.0 + PHASE_DAMAGE_STEP * (self.phase - 1) as f32)
    }

    /// Damage dealt per tick of body contact, before the contact factor.
    pub fn contact_damage(&self) -> f32 {
        self.config.base_damage
    }

    fn below_enrage(&self) -> bool {
        self.health < self.config.max_health * self.config.enrage_fraction
    }

    /// Run one tick of AI and return the spawn requests it produced.
    pub fn advance(&mut self, now: u64, player_pos: Vec2) -> BossTick {
        let mut out = BossTick::default();

        if self.is_dead() {
            if self.died_at.is_none() {
                log::info!("boss died at {now} ms");
                self.died_at = Some(now);
                self.animation = BossAnimation::Death;
            }
            return out;
        }

        if self.below_enrage() {
            if self.phase == 1 {
                self.phase = 2;
                log::info!("boss entered phase {} at {:.0} health", self.phase, self.health);
            }
            if now.saturating_sub(self.last_patch) >= self.config.patch_interval_ms {
                self.last_patch = now;
                out.hazard = Some(HazardSpawn { center: player_pos });
            }
        }

        self.step_locomotion(player_pos);

        if self
            .last_circle
            .map_or(true, |t| now.saturating_sub(t) > self.config.circle_cooldown_ms)
        {
            self.last_circle = Some(now);
            self.fire_circle(&mut out.projectiles);
            self.animation = BossAnimation::Attack;
        }

        let displacement = self.charge.advance(now, self.position, player_pos);
        self.position += displacement;

        out
    }

    /// Walk toward the player. The dash displacement replaces the walk step
    /// while it runs, so a dashing boss moves only along the locked charge
    /// direction and never drifts toward the player mid-leap.
    fn step_locomotion(&mut self, player_pos: Vec2) {
        if self.charge.is_dashing() {
            self.animation = BossAnimation::Attack;
            return;
        }
        let dir = (player_pos - self.position).normalize_or_zero();
        if dir == Vec2::ZERO {
            self.animation = BossAnimation::Idle;
            return;
        }
        self.position += dir * self.config.speed;
        if dir.x < 0.0 {
            self.facing = Facing::Left;
        } else if dir.x > 0.0 {
            self.facing = Facing::Right;
        }
        self.animation = BossAnimation::Flying;
    }

    fn fire_circle(&self, out: &mut Vec<ProjectileSpawn>) {
        let count = self.config.circle_projectiles.max(1);
        let damage = self.projectile_damage();
        let step = std::f32::consts::TAU / count as f32;
        out.extend((0..count).map(|i| {
            let angle = step * i as f32;
            ProjectileSpawn {
                origin: self.position,
                direction: Vec2::new(angle.cos(), angle.sin()),
                damage,
                faction: Faction::Enemy,
            }
        }));
    }

    /// Apply damage and record a floating number. Returns true only on the
    /// hit that brings health to zero; hits on a dead boss are ignored.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_dead() || amount <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.damage_numbers.push(DamageNumber {
            position: self.position,
            amount,
        });
        self.is_dead()
    }

    /// Take the damage numbers recorded since the last drain.
    pub fn drain_damage_numbers(&mut self) -> Vec<DamageNumber> {
        std::mem::take(&mut self.damage_numbers)
    }
}

impl Body for Boss {
    fn kind(&self) -> EntityKind {
        EntityKind::Boss
    }

    fn position(&self) -> Vec2 {
        Boss::position(self)
    }

    fn set_position(&mut self, position: Vec2) {
        Boss::set_position(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boss_at(now: u64) -> Boss {
        Boss::new(Vec2::ZERO, BossConfig::default(), now)
    }

    #[test]
    fn test_hazard_waits_full_interval() {
        let t = 20_000;
        // Timer last fired at T - 9999: the boss was created then.
        let mut boss = boss_at(t - 9999);
        boss.take_damage(600.0);
        assert_eq!(boss.health(), 400.0);

        let tick = boss.advance(t, Vec2::new(300.0, 0.0));
        assert!(tick.hazard.is_none());

        let tick = boss.advance(t + 2, Vec2::new(300.0, 0.0));
        assert_eq!(
            tick.hazard,
            Some(HazardSpawn {
                center: Vec2::new(300.0, 0.0)
            })
        );

        // Timer reset at T + 2.
        assert!(boss.advance(t + 10_001, Vec2::ZERO).hazard.is_none());
        assert!(boss.advance(t + 10_002, Vec2::ZERO).hazard.is_some());
    }

    #[test]
    fn test_no_hazard_at_or_above_threshold() {
        let mut boss = boss_at(0);
        boss.take_damage(500.0);
        assert_eq!(boss.health(), 500.0);
        for now in (0..60_000).step_by(500) {
            assert!(boss.advance(now, Vec2::new(0.0, 400.0)).hazard.is_none());
        }
        assert_eq!(boss.phase(), 1);
    }

    #[test]
    fn test_hazard_interval_never_shorter() {
        let mut boss = boss_at(0);
        boss.take_damage(700.0);
        let mut spawns = Vec::new();
        for now in (0..100_000).step_by(16) {
            if boss.advance(now, Vec2::new(0.0, 5000.0)).hazard.is_some() {
                spawns.push(now);
            }
        }
        assert!(spawns.len() >= 8);
        assert!(spawns.windows(2).all(|w| w[1] - w[0] >= 10_000));
    }

    #[test]
    fn test_circle_barrage_shape() {
        let mut boss = boss_at(0);
        let tick = boss.advance(0, Vec2::new(100.0, 0.0));
        assert_eq!(tick.projectiles.len(), 24);
        assert_eq!(boss.animation(), BossAnimation::Attack);

        let first = tick.projectiles[0];
        assert!((first.direction - Vec2::X).length() < 1e-6);
        assert_eq!(first.damage, 10.0);
        assert_eq!(first.faction, Faction::Enemy);
        for (i, p) in tick.projectiles.iter().enumerate() {
            let expected = (15.0 * i as f32).to_radians();
            let dir = Vec2::new(expected.cos(), expected.sin());
            assert!((p.direction - dir).length() < 1e-4, "projectile {i}");
            assert_eq!(p.origin, Vec2::ZERO);
        }

        // Cooldown is strict.
        assert!(boss.advance(2000, Vec2::new(100.0, 0.0)).projectiles.is_empty());
        assert_eq!(boss.advance(2001, Vec2::new(100.0, 0.0)).projectiles.len(), 24);
    }

    #[test]
    fn test_phase_two_scales_damage() {
        let mut boss = boss_at(0);
        boss.take_damage(501.0);
        assert_eq!(boss.phase(), 1);
        let tick = boss.advance(0, Vec2::new(100.0, 0.0));
        assert_eq!(boss.phase(), 2);
        assert!(tick.projectiles.iter().all(|p| p.damage == 15.0));
    }

    #[test]
    fn test_walks_toward_player_and_faces() {
        let mut boss = boss_at(0);
        boss.advance(0, Vec2::new(-100.0, 0.0));
        assert_eq!(boss.facing(), Facing::Left);
        assert!((boss.position().x + 0.2).abs() < 1e-6);

        let mut still = Boss::new(Vec2::new(5.0, 5.0), BossConfig::default(), 0);
        still.advance(10, Vec2::new(5.0, 5.0));
        // No walking, but circle fired and charge began telegraphing.
        assert_eq!(still.position(), Vec2::new(5.0, 5.0));
        assert!(matches!(still.charge_state(), ChargeState::Telegraphing { .. }));
    }

    #[test]
    fn test_dash_moves_boss_along_locked_direction() {
        let mut boss = boss_at(0);
        boss.advance(0, Vec2::new(0.0, 1000.0));
        // Walking during the telegraph.
        boss.advance(1000, Vec2::new(0.0, 1000.0));
        let before_dash = boss.position();
        assert!(before_dash.y > 0.0);
        boss.advance(1501, Vec2::new(0.0, 1000.0));
        assert!(matches!(boss.charge_state(), ChargeState::Dashing { .. }));
        let start = boss.position();

        // Player moves sideways; dash keeps its aim and walking is suspended.
        boss.advance(1751, Vec2::new(-2000.0, 0.0));
        let moved = boss.position() - start;
        assert!(moved.x.abs() < 1e-3);
        assert!((moved.y - 500.0).abs() < 1e-2);

        boss.advance(2001, Vec2::new(-2000.0, 0.0));
        assert_eq!(boss.charge_state(), ChargeState::Waiting);
        assert!(((boss.position() - start).y - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn test_take_damage_reports_only_killing_blow() {
        let mut boss = boss_at(0);
        assert!(!boss.take_damage(999.0));
        assert!(!boss.take_damage(-50.0));
        assert!(!boss.take_damage(0.0));
        assert!(boss.take_damage(5.0));
        assert_eq!(boss.health(), 0.0);
        assert!(!boss.take_damage(5.0));

        let numbers = boss.drain_damage_numbers();
        assert_eq!(numbers.len(), 2);
        assert_eq!(numbers[0].text(), "-999");
        assert!(boss.drain_damage_numbers().is_empty());
    }

    #[test]
    fn test_death_freezes_everything() {
        let mut boss = boss_at(0);
        boss.advance(0, Vec2::new(0.0, 500.0));
        boss.take_damage(10_000.0);

        let pos = boss.position();
        let tick = boss.advance(50_000, Vec2::new(0.0, 500.0));
        assert!(tick.is_empty());
        assert_eq!(boss.animation(), BossAnimation::Death);
        assert_eq!(boss.died_at(), Some(50_000));

        for now in (50_016..80_000).step_by(16) {
            assert!(boss.advance(now, Vec2::new(300.0, -300.0)).is_empty());
        }
        assert_eq!(boss.position(), pos);
        assert_eq!(boss.died_at(), Some(50_000));
    }

    #[test]
    fn test_death_mid_dash_stops_movement() {
        let mut boss = boss_at(0);
        boss.advance(0, Vec2::new(1000.0, 0.0));
        boss.advance(1501, Vec2::new(1000.0, 0.0));
        boss.advance(1600, Vec2::new(1000.0, 0.0));
        assert!(matches!(boss.charge_state(), ChargeState::Dashing { .. }));
        boss.take_damage(1000.0);
        let pos = boss.position();
        boss.advance(1700, Vec2::new(1000.0, 0.0));
        assert_eq!(boss.position(), pos);
    }
}
