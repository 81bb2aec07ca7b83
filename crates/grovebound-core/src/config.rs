use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Inclusive integer range drawn by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeI {
    pub min: i32,
    pub max: i32,
}

/// Inclusive float range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeF {
    pub min: f64,
    pub max: f64,
}

/// Procedural world parameters. `seed: None` picks a random seed at world creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: Option<u32>,
    pub max_tree_clusters: u32,
    pub cluster_trees: RangeI,
    pub cluster_radius: RangeI,
    pub pond_chance: f64,
    pub pond_radius: RangeI,
    pub pond_noise: RangeF,
    pub bush_chance: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_tree_clusters: MAX_TREE_CLUSTERS,
            cluster_trees: RangeI {
                min: CLUSTER_MIN_TREES as i32,
                max: CLUSTER_MAX_TREES as i32,
            },
            cluster_radius: RangeI {
                min: CLUSTER_MIN_RADIUS,
                max: CLUSTER_MAX_RADIUS,
            },
            pond_chance: POND_CHANCE,
            pond_radius: RangeI {
                min: POND_MIN_RADIUS,
                max: POND_MAX_RADIUS,
            },
            pond_noise: RangeF {
                min: POND_NOISE_MIN,
                max: POND_NOISE_MAX,
            },
            bush_chance: BUSH_CHANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_health: f32,
    /// Pixels per tick.
    pub speed: f32,
    pub base_damage: f32,
    pub circle_cooldown_ms: u64,
    pub circle_projectiles: u32,
    pub charge_cooldown_ms: u64,
    pub telegraph_ms: u64,
    /// Pixels per second.
    pub dash_speed: f32,
    pub dash_max_distance: f32,
    pub patch_interval_ms: u64,
    pub enrage_fraction: f32,
    pub size: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: BOSS_HEALTH,
            speed: BOSS_SPEED,
            base_damage: BOSS_DAMAGE,
            circle_cooldown_ms: CIRCLE_COOLDOWN_MS,
            circle_projectiles: CIRCLE_PROJECTILE_COUNT,
            charge_cooldown_ms: CHARGE_COOLDOWN_MS,
            telegraph_ms: CHARGE_TELEGRAPH_MS,
            dash_speed: CHARGE_DASH_SPEED,
            dash_max_distance: CHARGE_MAX_DISTANCE,
            patch_interval_ms: PATCH_INTERVAL_MS,
            enrage_fraction: ENRAGE_HEALTH_FRACTION,
            size: 142.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub radius: f32,
    pub tick_ms: u64,
    pub damage: f32,
    pub slow_factor: f32,
    /// `None` keeps patches for the rest of the encounter.
    pub lifetime_ms: Option<u64>,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            radius: HAZARD_RADIUS,
            tick_ms: HAZARD_TICK_MS,
            damage: HAZARD_DAMAGE,
            slow_factor: HAZARD_SLOW_FACTOR,
            lifetime_ms: Some(HAZARD_LIFETIME_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub size: f32,
    pub max_health: f32,
    pub shoot_delay_ms: u64,
    pub projectile_damage: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            size: PLAYER_SIZE,
            max_health: PLAYER_HEALTH,
            shoot_delay_ms: PLAYER_SHOOT_DELAY_MS,
            projectile_damage: PLAYER_PROJECTILE_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub speed: f32,
    pub size: f32,
    pub max_health: f32,
    pub damage: f32,
    pub shoot_chance: f64,
    pub shoot_delay_min_ms: u64,
    pub shoot_delay_max_ms: u64,
    pub contact_damage_factor: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: ENEMY_SPEED,
            size: ENEMY_SIZE,
            max_health: ENEMY_HEALTH,
            damage: ENEMY_DAMAGE,
            shoot_chance: ENEMY_SHOOT_CHANCE,
            shoot_delay_min_ms: ENEMY_MIN_SHOOT_DELAY_MS,
            shoot_delay_max_ms: ENEMY_MAX_SHOOT_DELAY_MS,
            contact_damage_factor: CONTACT_DAMAGE_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub size: f32,
    pub lifetime_ms: u64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_PROJECTILE_SPEED,
            enemy_speed: ENEMY_PROJECTILE_SPEED,
            size: PROJECTILE_SIZE,
            lifetime_ms: PROJECTILE_LIFETIME_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub spawn_rate_ms: u64,
    pub min_spawn_rate_ms: u64,
    pub spawn_rate_step_ms: u64,
    pub spawn_score_band: u32,
    pub score_per_kill: u32,
    pub portal_score: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            spawn_rate_ms: SPAWN_RATE_MS,
            min_spawn_rate_ms: MIN_SPAWN_RATE_MS,
            spawn_rate_step_ms: SPAWN_RATE_STEP_MS,
            spawn_score_band: SPAWN_SCORE_BAND,
            score_per_kill: SCORE_PER_KILL,
            portal_score: PORTAL_SCORE_THRESHOLD,
        }
    }
}

impl ProgressionConfig {
    /// Spawn interval for the given score: one step faster per full score band, floored.
    pub fn spawn_interval_ms(&self, score: u32) -> u64 {
        let bands = (score / self.spawn_score_band.max(1)) as u64;
        self.spawn_rate_ms
            .saturating_sub(bands * self.spawn_rate_step_ms)
            .max(self.min_spawn_rate_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width_tiles: i32,
    pub height_tiles: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width_tiles: ARENA_WIDTH_TILES,
            height_tiles: ARENA_HEIGHT_TILES,
        }
    }
}

/// Complete tunable configuration. Every section falls back to the constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldGenConfig,
    pub boss: BossConfig,
    pub hazard: HazardConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub progression: ProgressionConfig,
    pub arena: ArenaConfig,
}

impl GameConfig {
    /// Parse a RON document. Missing sections and fields keep their defaults.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Check every constraint and report all violations at once.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        let w = &self.world;
        check_range_i(&mut errors, "world.cluster_trees", w.cluster_trees);
        check_range_i(&mut errors, "world.cluster_radius", w.cluster_radius);
        check_range_i(&mut errors, "world.pond_radius", w.pond_radius);
        if w.pond_noise.min > w.pond_noise.max {
            errors.push(ConfigError::InvertedRange {
                field: "world.pond_noise",
                min: w.pond_noise.min,
                max: w.pond_noise.max,
            });
        }
        check_non_negative(&mut errors, "world.pond_noise", w.pond_noise.min);
        check_positive(&mut errors, "world.max_tree_clusters", w.max_tree_clusters as f64);
        check_probability(&mut errors, "world.pond_chance", w.pond_chance);
        check_probability(&mut errors, "world.bush_chance", w.bush_chance);

        let b = &self.boss;
        check_positive(&mut errors, "boss.max_health", b.max_health as f64);
        check_positive(&mut errors, "boss.circle_projectiles", b.circle_projectiles as f64);
        check_positive(&mut errors, "boss.telegraph_ms", b.telegraph_ms as f64);
        check_positive(&mut errors, "boss.dash_speed", b.dash_speed as f64);
        check_positive(&mut errors, "boss.dash_max_distance", b.dash_max_distance as f64);
        check_fraction(&mut errors, "boss.enrage_fraction", b.enrage_fraction as f64);

        let h = &self.hazard;
        check_positive(&mut errors, "hazard.radius", h.radius as f64);
        check_fraction(&mut errors, "hazard.slow_factor", h.slow_factor as f64);

        check_positive(&mut errors, "player.speed", self.player.speed as f64);
        check_positive(&mut errors, "player.size", self.player.size as f64);
        check_positive(&mut errors, "player.max_health", self.player.max_health as f64);

        let e = &self.enemy;
        check_positive(&mut errors, "enemy.size", e.size as f64);
        check_positive(&mut errors, "enemy.max_health", e.max_health as f64);
        check_probability(&mut errors, "enemy.shoot_chance", e.shoot_chance);
        if e.shoot_delay_min_ms > e.shoot_delay_max_ms {
            errors.push(ConfigError::InvertedRange {
                field: "enemy.shoot_delay",
                min: e.shoot_delay_min_ms as f64,
                max: e.shoot_delay_max_ms as f64,
            });
        }

        check_positive(&mut errors, "arena.width_tiles", self.arena.width_tiles as f64);
        check_positive(&mut errors, "arena.height_tiles", self.arena.height_tiles as f64);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Counts and radii are sampled from the range, so it must be ordered and
/// start at zero or above.
fn check_range_i(errors: &mut Vec<ConfigError>, field: &'static str, range: RangeI) {
    if range.min > range.max {
        errors.push(ConfigError::InvertedRange {
            field,
            min: range.min as f64,
            max: range.max as f64,
        });
    }
    check_non_negative(errors, field, range.min as f64);
}

fn check_non_negative(errors: &mut Vec<ConfigError>, field: &'static str, value: f64) {
    if value < 0.0 {
        errors.push(ConfigError::Negative { field, value });
    }
}

fn check_probability(errors: &mut Vec<ConfigError>, field: &'static str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::ProbabilityOutOfRange { field, value });
    }
}

fn check_positive(errors: &mut Vec<ConfigError>, field: &'static str, value: f64) {
    if value <= 0.0 {
        errors.push(ConfigError::NotPositive { field, value });
    }
}

fn check_fraction(errors: &mut Vec<ConfigError>, field: &'static str, value: f64) {
    if value <= 0.0 || value > 1.0 {
        errors.push(ConfigError::FractionOutOfRange { field, value });
    }
}
