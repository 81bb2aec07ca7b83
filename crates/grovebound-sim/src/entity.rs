use glam::Vec2;
use grovebound_world::arena::BossArena;

/// Kind tag for every simulated body. Per-kind behaviour is looked up
/// here instead of by inspecting concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Boss,
    Grunt,
    Projectile,
}

impl EntityKind {
    /// Whether the body is confined to the boss arena while it exists.
    pub fn has_arena_clamp(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Boss)
    }

    /// Whether a small health bar is drawn above the body. The boss uses
    /// the full-width bar instead.
    pub fn has_overhead_health_bar(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Grunt)
    }
}

/// A positioned body that reports its own kind.
pub trait Body {
    fn kind(&self) -> EntityKind;
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
}

/// Clamp every body whose kind is confined to the arena.
pub fn confine_to_arena(arena: &BossArena, bodies: Vec<&mut dyn Body>) {
    for body in bodies {
        if body.kind().has_arena_clamp() {
            let clamped = arena.clamp(body.position());
            body.set_position(clamped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use grovebound_core::GameConfig;

    use crate::enemy::Grunt;
    use crate::player::Player;

    #[test]
    fn test_capabilities() {
        assert!(EntityKind::Player.has_arena_clamp());
        assert!(EntityKind::Boss.has_arena_clamp());
        assert!(!EntityKind::Grunt.has_arena_clamp());
        assert!(!EntityKind::Projectile.has_arena_clamp());
        assert!(!EntityKind::Boss.has_overhead_health_bar());
        assert!(EntityKind::Grunt.has_overhead_health_bar());
    }

    #[test]
    fn test_confine_skips_unclamped_kinds() {
        let cfg = GameConfig::default();
        let arena = BossArena::new(IVec2::ZERO, 11, 7);
        let far = Vec2::new(10_000.0, -10_000.0);
        let mut player = Player::new(far, &cfg.player);
        let mut grunt = Grunt::new(far, &cfg.enemy, None);

        confine_to_arena(
            &arena,
            vec![&mut player as &mut dyn Body, &mut grunt as &mut dyn Body],
        );

        assert_eq!(Body::position(&player), arena.clamp(far));
        assert_ne!(Body::position(&player), far);
        assert_eq!(Body::position(&grunt), far);
        assert_eq!(grunt.kind(), EntityKind::Grunt);
    }
}
