use glam::Vec2;
use grovebound_core::config::HazardConfig;
use grovebound_core::types::Aabb;

/// Anything a slowing hazard can act on.
pub trait HazardTarget {
    fn bounds(&self) -> Aabb;
    /// Baseline speed the slow is computed from and restored to.
    fn nominal_speed(&self) -> f32;
    fn speed(&self) -> f32;
    fn set_speed(&mut self, speed: f32);
    /// Returns true if this hit killed the target.
    fn take_damage(&mut self, amount: f32) -> bool;
}

/// Result of applying hazards to a target for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HazardEffect {
    pub inside: bool,
    pub damage: f32,
    pub killed: bool,
}

/// Stationary zone that halves the target's speed and deals periodic damage.
#[derive(Debug, Clone, PartialEq)]
pub struct SlowingHazard {
    center: Vec2,
    radius: f32,
    spawned_at: u64,
    last_damage: u64,
    tick_ms: u64,
    damage: f32,
    slow_factor: f32,
    lifetime_ms: Option<u64>,
}

impl SlowingHazard {
    /// The damage clock starts at creation, so the first hit lands one
    /// interval after the patch appears.
    pub fn new(center: Vec2, now: u64, cfg: &HazardConfig) -> Self {
        Self {
            center,
            radius: cfg.radius,
            spawned_at: now,
            last_damage: now,
            tick_ms: cfg.tick_ms,
            damage: cfg.damage,
            slow_factor: cfg.slow_factor,
            lifetime_ms: cfg.lifetime_ms,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Square collision box of side `2 * radius`.
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.center, self.radius * 2.0)
    }

    pub fn overlaps<T: HazardTarget + ?Sized>(&self, target: &T) -> bool {
        self.bounds().intersects(&target.bounds())
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.lifetime_ms
            .is_some_and(|life| now.saturating_sub(self.spawned_at) >= life)
    }

    /// Apply the periodic damage if the interval has passed. Returns the
    /// damage dealt and whether it killed the target.
    fn tick_damage<T: HazardTarget + ?Sized>(&mut self, now: u64, target: &mut T) -> (f32, bool) {
        if now.saturating_sub(self.last_damage) < self.tick_ms {
            return (0.0, false);
        }
        self.last_damage = now;
        (self.damage, target.take_damage(self.damage))
    }

    /// Single-hazard update: slow and damage while overlapping, restore the
    /// nominal speed once the target has left.
    pub fn update<T: HazardTarget + ?Sized>(&mut self, now: u64, target: &mut T) -> HazardEffect {
        if self.overlaps(target) {
            target.set_speed(target.nominal_speed() * self.slow_factor);
            let (damage, killed) = self.tick_damage(now, target);
            HazardEffect {
                inside: true,
                damage,
                killed,
            }
        } else {
            if target.speed() < target.nominal_speed() {
                target.set_speed(target.nominal_speed());
            }
            HazardEffect::default()
        }
    }
}

/// All live hazards of an encounter.
///
/// The speed decision is made once per tick over every hazard, so two
/// overlapping patches never undo each other's slow. Each patch keeps its
/// own damage clock.
#[derive(Debug, Clone)]
pub struct HazardField {
    config: HazardConfig,
    hazards: Vec<SlowingHazard>,
}

impl HazardField {
    pub fn new(config: HazardConfig) -> Self {
        Self {
            config,
            hazards: Vec::new(),
        }
    }

    pub fn spawn(&mut self, center: Vec2, now: u64) {
        log::info!("slowing patch spawned at ({:.0}, {:.0})", center.x, center.y);
        self.hazards.push(SlowingHazard::new(center, now, &self.config));
    }

    pub fn hazards(&self) -> &[SlowingHazard] {
        &self.hazards
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    pub fn clear(&mut self) {
        self.hazards.clear();
    }

    /// Drop expired patches, then slow and damage the target.
    pub fn update<T: HazardTarget + ?Sized>(&mut self, now: u64, target: &mut T) -> HazardEffect {
        let before = self.hazards.len();
        self.hazards.retain(|h| !h.is_expired(now));
        if self.hazards.len() != before {
            log::debug!("{} slowing patch(es) expired", before - self.hazards.len());
        }

        let mut effect = HazardEffect::default();
        for hazard in &mut self.hazards {
            if !hazard.overlaps(target) {
                continue;
            }
            effect.inside = true;
            let (damage, killed) = hazard.tick_damage(now, target);
            effect.damage += damage;
            effect.killed |= killed;
        }

        if effect.inside {
            target.set_speed(target.nominal_speed() * self.config.slow_factor);
        } else if target.speed() < target.nominal_speed() {
            target.set_speed(target.nominal_speed());
        }
        effect
    }
}
