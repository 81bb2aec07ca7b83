use glam::Vec2;

/// Side a projectile belongs to. Player shots hit enemies and the boss;
/// enemy shots hit the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

/// Request to create a projectile, emitted by whoever fired it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub origin: Vec2,
    /// Unit direction of travel.
    pub direction: Vec2,
    pub damage: f32,
    pub faction: Faction,
}

/// Request to create a slowing hazard centred on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSpawn {
    pub center: Vec2,
}

/// A hit that should be shown as a floating number at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageNumber {
    pub position: Vec2,
    pub amount: f32,
}

impl DamageNumber {
    /// Label drawn above the victim, e.g. `-12` for 12.7 damage.
    pub fn text(&self) -> String {
        format!("-{}", self.amount as i32)
    }
}

/// Everything the boss asked the host to create during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BossTick {
    pub projectiles: Vec<ProjectileSpawn>,
    pub hazard: Option<HazardSpawn>,
}

impl BossTick {
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.hazard.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_number_truncates() {
        let n = DamageNumber {
            position: Vec2::ZERO,
            amount: 12.7,
        };
        assert_eq!(n.text(), "-12");
        let one = DamageNumber {
            position: Vec2::ZERO,
            amount: 1.0,
        };
        assert_eq!(one.text(), "-1");
    }

    #[test]
    fn test_empty_tick() {
        assert!(BossTick::default().is_empty());
        let t = BossTick {
            projectiles: Vec::new(),
            hazard: Some(HazardSpawn { center: Vec2::ONE }),
        };
        assert!(!t.is_empty());
    }
}
