use glam::{IVec2, Vec2};
use grovebound_core::constants::{PORTAL_OFFSET_PX, PORTAL_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};
use grovebound_core::types::Aabb;
use grovebound_core::GameConfig;
use grovebound_world::arena::BossArena;
use grovebound_world::viewport::Viewport;
use grovebound_world::{RegionFeatures, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::boss::Boss;
use crate::enemy::Grunt;
use crate::entity::{confine_to_arena, Body};
use crate::events::{Faction, ProjectileSpawn};
use crate::floating::FloatingText;
use crate::hazard::{HazardField, HazardTarget};
use crate::player::Player;
use crate::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Open world with grunt spawns; the portal opens at the score threshold.
    Exploring,
    /// Inside the arena with the boss.
    BossFight,
    Finished(Outcome),
}

/// Player intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Movement direction; normalised by the player.
    pub movement: Vec2,
    /// World position to shoot at, if firing.
    pub aim: Option<Vec2>,
    /// Enter the portal when standing on it.
    pub interact: bool,
}

/// Running counters for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub grunts_spawned: u32,
    pub grunts_killed: u32,
    pub shots_fired: u32,
    pub boss_projectiles: u32,
    pub hazards_spawned: u32,
    pub damage_taken: f32,
    pub damage_dealt: f32,
}

/// One play-through: world, player, enemies, and the boss encounter.
pub struct Session {
    config: GameConfig,
    world: World,
    rng: ChaCha8Rng,
    player: Player,
    grunts: Vec<Grunt>,
    projectiles: Vec<Projectile>,
    hazards: HazardField,
    boss: Option<Boss>,
    arena: Option<BossArena>,
    portal: Option<Aabb>,
    floating: Vec<FloatingText>,
    score: u32,
    last_spawn: u64,
    zoom: f32,
    stage: Stage,
    stats: SessionStats,
}

impl Session {
    /// Start a session at `now`. Grunt spawning draws from a stream seeded
    /// by the world seed, so a fixed seed and input script replay exactly.
    pub fn new(config: GameConfig, now: u64) -> Self {
        let world = World::new(config.world.clone());
        let rng = ChaCha8Rng::seed_from_u64(u64::from(world.seed()));
        let player = Player::new(Vec2::ZERO, &config.player);
        let hazards = HazardField::new(config.hazard.clone());
        Self {
            config,
            world,
            rng,
            player,
            grunts: Vec::new(),
            projectiles: Vec::new(),
            hazards,
            boss: None,
            arena: None,
            portal: None,
            floating: Vec::new(),
            score: 0,
            last_spawn: now,
            zoom: 1.0,
            stage: Stage::Exploring,
            stats: SessionStats::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.stage {
            Stage::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn grunts(&self) -> &[Grunt] {
        &self.grunts
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn hazards(&self) -> &HazardField {
        &self.hazards
    }

    pub fn arena(&self) -> Option<&BossArena> {
        self.arena.as_ref()
    }

    pub fn portal(&self) -> Option<Aabb> {
        self.portal
    }

    pub fn floating_texts(&self) -> &[FloatingText] {
        &self.floating
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Camera view following the player.
    pub fn viewport(&self) -> Viewport {
        Viewport::centered_on(
            self.player.position(),
            IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            self.zoom,
        )
    }

    /// World features under the current camera.
    pub fn visible_region(&self) -> RegionFeatures {
        self.world.query_region(self.viewport().visible_tiles())
    }

    /// Advance the whole session by one tick.
    pub fn tick(&mut self, now: u64, input: &PlayerInput) -> Stage {
        if matches!(self.stage, Stage::Finished(_)) {
            return self.stage;
        }

        self.player.move_by(input.movement);
        if let Some(aim) = input.aim {
            if let Some(shot) = self.player.try_shoot(now, aim) {
                self.stats.shots_fired += 1;
                self.push_projectile(&shot, now);
            }
        }

        match self.stage {
            Stage::Exploring => self.update_exploring(now, input.interact),
            Stage::BossFight => self.update_boss_fight(now),
            Stage::Finished(_) => {}
        }

        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| !p.is_expired(now));

        let outcome = self.resolve_collisions();
        self.clamp_to_arena();
        self.collect_floating_texts(now);
        self.grunts.retain(Grunt::is_alive);

        if let Some(outcome) = outcome {
            self.finish(outcome);
        }
        self.stage
    }

    fn push_projectile(&mut self, spawn: &ProjectileSpawn, now: u64) {
        self.projectiles
            .push(Projectile::from_spawn(spawn, now, &self.config.projectile));
    }

    fn update_exploring(&mut self, now: u64, interact: bool) {
        let player_pos = self.player.position();
        let shots: Vec<ProjectileSpawn> = self
            .grunts
            .iter_mut()
            .filter_map(|g| g.advance(now, player_pos))
            .collect();
        for shot in &shots {
            self.push_projectile(shot, now);
        }

        if self.portal.is_none() && self.score >= self.config.progression.portal_score {
            let center = player_pos - Vec2::new(0.0, PORTAL_OFFSET_PX);
            log::info!(
                "portal opened at ({:.0}, {:.0}) with score {}",
                center.x,
                center.y,
                self.score
            );
            self.portal = Some(Aabb::square(center, PORTAL_SIZE));
        }

        let interval = self.config.progression.spawn_interval_ms(self.score);
        if now.saturating_sub(self.last_spawn) > interval {
            self.last_spawn = now;
            self.spawn_grunt(now);
        }

        let on_portal = self
            .portal
            .is_some_and(|portal| portal.intersects(&self.player.bounds()));
        if interact && on_portal {
            self.enter_arena(now);
        }
    }

    /// Spawn a grunt just outside a random edge of the camera view.
    fn spawn_grunt(&mut self, now: u64) {
        let view = self.viewport();
        let (min, max) = view.pixel_bounds();
        let margin = self.config.enemy.size as i32;
        let pos = match self.rng.gen_range(0..4) {
            0 => IVec2::new(self.rng.gen_range(min.x..=max.x), min.y - margin),
            1 => IVec2::new(max.x + margin, self.rng.gen_range(min.y..=max.y)),
            2 => IVec2::new(self.rng.gen_range(min.x..=max.x), max.y + margin),
            _ => IVec2::new(min.x - margin, self.rng.gen_range(min.y..=max.y)),
        };
        let grunt = Grunt::spawn(pos.as_vec2(), now, &self.config.enemy, &mut self.rng);
        log::debug!(
            "grunt spawned at ({}, {}), shooter: {}",
            pos.x,
            pos.y,
            grunt.is_shooter()
        );
        self.grunts.push(grunt);
        self.stats.grunts_spawned += 1;
    }

    /// Clear the open world, build the arena around the current view, and
    /// place the boss on the top edge and the player on the bottom edge.
    fn enter_arena(&mut self, now: u64) {
        self.grunts.clear();
        self.projectiles.clear();
        self.portal = None;

        let arena = BossArena::around_view(
            self.viewport().offset,
            IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            self.config.arena.width_tiles,
            self.config.arena.height_tiles,
        );
        self.player.set_position(arena.player_spawn_px());
        self.boss = Some(Boss::new(
            arena.boss_spawn_px(),
            self.config.boss.clone(),
            now,
        ));
        let center = arena.center_tile();
        log::info!("entered boss arena centred on tile ({}, {})", center.x, center.y);
        self.arena = Some(arena);
        self.stage = Stage::BossFight;
    }

    fn update_boss_fight(&mut self, now: u64) {
        let player_pos = self.player.position();
        if let Some(boss) = self.boss.as_mut() {
            let tick = boss.advance(now, player_pos);
            self.stats.boss_projectiles += tick.projectiles.len() as u32;
            for shot in &tick.projectiles {
                self.projectiles
                    .push(Projectile::from_spawn(shot, now, &self.config.projectile));
            }
            if let Some(hazard) = tick.hazard {
                self.stats.hazards_spawned += 1;
                self.hazards.spawn(hazard.center, now);
            }
        }
        let effect = self.hazards.update(now, &mut self.player);
        self.stats.damage_taken += effect.damage;
    }

    /// Apply projectile and contact hits. Returns the outcome if a deciding
    /// blow landed this tick; the first deciding blow wins.
    fn resolve_collisions(&mut self) -> Option<Outcome> {
        let Session {
            config,
            player,
            grunts,
            boss,
            projectiles,
            score,
            stats,
            ..
        } = self;
        let mut outcome = None;

        projectiles.retain(|p| {
            let bounds = p.bounds();
            match p.faction {
                Faction::Player => {
                    if let Some(grunt) = grunts
                        .iter_mut()
                        .find(|g| g.is_alive() && g.bounds().intersects(&bounds))
                    {
                        stats.damage_dealt += p.damage;
                        if grunt.take_damage(p.damage) {
                            *score += config.progression.score_per_kill;
                            stats.grunts_killed += 1;
                        }
                        return false;
                    }
                    if let Some(boss) = boss
                        .as_mut()
                        .filter(|b| !b.is_dead() && b.bounds().intersects(&bounds))
                    {
                        stats.damage_dealt += p.damage;
                        if boss.take_damage(p.damage) {
                            outcome.get_or_insert(Outcome::Victory);
                        }
                        return false;
                    }
                    true
                }
                Faction::Enemy => {
                    if !player.bounds().intersects(&bounds) {
                        return true;
                    }
                    stats.damage_taken += p.damage;
                    if player.take_damage(p.damage) {
                        outcome.get_or_insert(Outcome::Defeat);
                    }
                    false
                }
            }
        });

        let factor = config.enemy.contact_damage_factor;
        let player_box = player.bounds();
        let mut contact: Vec<f32> = grunts
            .iter()
            .filter(|g| g.is_alive() && g.bounds().intersects(&player_box))
            .map(|g| g.damage() * factor)
            .collect();
        if let Some(b) = boss
            .as_ref()
            .filter(|b| !b.is_dead() && b.bounds().intersects(&player_box))
        {
            contact.push(b.contact_damage() * factor);
        }
        for amount in contact {
            stats.damage_taken += amount;
            if player.take_damage(amount) {
                outcome.get_or_insert(Outcome::Defeat);
            }
        }

        if !player.is_alive() {
            outcome.get_or_insert(Outcome::Defeat);
        }
        outcome
    }

    fn clamp_to_arena(&mut self) {
        let Some(arena) = self.arena.as_ref() else {
            return;
        };
        let mut bodies: Vec<&mut dyn Body> = vec![&mut self.player as &mut dyn Body];
        if let Some(boss) = self.boss.as_mut() {
            bodies.push(boss);
        }
        bodies.extend(self.grunts.iter_mut().map(|g| g as &mut dyn Body));
        confine_to_arena(arena, bodies);
    }

    fn collect_floating_texts(&mut self, now: u64) {
        let mut numbers = self.player.drain_damage_numbers();
        for grunt in &mut self.grunts {
            numbers.extend(grunt.drain_damage_numbers());
        }
        if let Some(boss) = self.boss.as_mut() {
            numbers.extend(boss.drain_damage_numbers());
        }
        self.floating
            .extend(numbers.iter().map(|n| FloatingText::new(n, now)));
        self.floating.retain(|t| !t.is_expired(now));
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!(
            "session finished: {:?} with score {} ({} grunts killed)",
            outcome,
            self.score,
            self.stats.grunts_killed
        );
        self.hazards.clear();
        self.stage = Stage::Finished(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grovebound_core::config::WorldGenConfig;

    fn session() -> Session {
        let config = GameConfig {
            world: WorldGenConfig {
                seed: Some(42),
                ..WorldGenConfig::default()
            },
            ..GameConfig::default()
        };
        Session::new(config, 0)
    }

    fn idle() -> PlayerInput {
        PlayerInput::default()
    }

    /// Open the portal under the player and step through it at `now`.
    fn enter_arena(s: &mut Session, now: u64) {
        s.score = s.config.progression.portal_score;
        let interact = PlayerInput {
            interact: true,
            ..idle()
        };
        assert_eq!(s.tick(now, &interact), Stage::BossFight);
    }

    #[test]
    fn test_grunt_spawn_cadence() {
        let mut s = session();
        s.tick(1000, &idle());
        assert!(s.grunts().is_empty());
        s.tick(1001, &idle());
        assert_eq!(s.grunts().len(), 1);

        // Spawned just outside the camera view.
        let (min, max) = s.viewport().pixel_bounds();
        let g = s.grunts()[0].position();
        let inside = g.x >= min.x as f32 && g.x <= max.x as f32 && g.y >= min.y as f32 && g.y <= max.y as f32;
        assert!(!inside);

        s.tick(2001, &idle());
        assert_eq!(s.grunts().len(), 1);
        s.tick(2002, &idle());
        assert_eq!(s.grunts().len(), 2);
    }

    #[test]
    fn test_killing_grunt_scores() {
        let mut s = session();
        let at = Vec2::new(100.0, 0.0);
        s.grunts.push(Grunt::new(at, &s.config.enemy, None));
        s.push_projectile(
            &ProjectileSpawn {
                origin: at,
                direction: Vec2::X,
                damage: 50.0,
                faction: Faction::Player,
            },
            0,
        );
        s.tick(16, &idle());
        assert_eq!(s.score(), 10);
        assert!(s.grunts().is_empty());
        assert!(s.projectiles().is_empty());
        assert_eq!(s.floating_texts().len(), 1);
        assert_eq!(s.floating_texts()[0].text, "-50");
    }

    #[test]
    fn test_portal_opens_above_player() {
        let mut s = session();
        s.score = 100;
        s.tick(16, &idle());
        let portal = s.portal().expect("portal at threshold");
        assert_eq!(portal.center, Vec2::new(0.0, -50.0));
        assert_eq!(s.stage(), Stage::Exploring);
    }

    #[test]
    fn test_entering_arena_places_actors() {
        let mut s = session();
        s.grunts
            .push(Grunt::new(Vec2::new(900.0, 0.0), &s.config.enemy, None));
        enter_arena(&mut s, 16);

        assert!(s.grunts().is_empty());
        assert!(s.portal().is_none());
        let arena = s.arena().expect("arena built").clone();
        let boss = s.boss().expect("boss spawned");
        assert_eq!(arena.tile_bounds().width(), 51);
        assert_eq!(arena.tile_bounds().height(), 25);
        assert_eq!(boss.position(), arena.boss_spawn_px());
        // The bottom-edge spawn sits half a tile past the clamp limit.
        assert_eq!(s.player().position(), arena.clamp(arena.player_spawn_px()));
        assert_eq!(s.player().position().x, arena.player_spawn_px().x);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut s = session();
        enter_arena(&mut s, 16);
        let (_, max) = s.arena().expect("arena").clamp_bounds();
        let down = PlayerInput {
            movement: Vec2::new(0.0, 1.0),
            ..idle()
        };
        for i in 0..200 {
            s.tick(32 + i, &down);
        }
        assert_eq!(s.player().position().y, max.y);
    }

    #[test]
    fn test_boss_hazard_slows_player() {
        let mut s = session();
        enter_arena(&mut s, 1000);
        s.boss.as_mut().expect("boss").take_damage(600.0);
        s.tick(11_000, &idle());
        assert_eq!(s.hazards().len(), 1);
        assert_eq!(s.stats().hazards_spawned, 1);
        assert_eq!(s.player.speed(), s.config.player.speed * 0.5);
    }

    #[test]
    fn test_boss_kill_is_victory() {
        let mut s = session();
        enter_arena(&mut s, 16);
        let boss_pos = s.boss().expect("boss").position();
        s.boss.as_mut().expect("boss").take_damage(990.0);
        s.push_projectile(
            &ProjectileSpawn {
                origin: boss_pos,
                direction: Vec2::Y,
                damage: 10.0,
                faction: Faction::Player,
            },
            32,
        );
        assert_eq!(s.tick(32, &idle()), Stage::Finished(Outcome::Victory));
        assert_eq!(s.outcome(), Some(Outcome::Victory));

        // Finished sessions no longer change.
        let pos = s.player().position();
        s.tick(48, &PlayerInput {
            movement: Vec2::X,
            ..idle()
        });
        assert_eq!(s.player().position(), pos);
    }

    #[test]
    fn test_player_death_is_defeat() {
        let mut s = session();
        s.player.take_damage(99.0);
        s.push_projectile(
            &ProjectileSpawn {
                origin: Vec2::new(0.0, -6.0),
                direction: Vec2::Y,
                damage: 5.0,
                faction: Faction::Enemy,
            },
            0,
        );
        assert_eq!(s.tick(16, &idle()), Stage::Finished(Outcome::Defeat));
    }

    #[test]
    fn test_visible_region_follows_player() {
        let mut s = session();
        let before = s.world().generation_count();
        s.visible_region();
        let after_first = s.world().generation_count();
        assert!(after_first > before);
        s.visible_region();
        assert_eq!(s.world().generation_count(), after_first);

        s.player.set_position(Vec2::new(10_000.0, 0.0));
        s.visible_region();
        assert!(s.world().generation_count() > after_first);
    }
}
