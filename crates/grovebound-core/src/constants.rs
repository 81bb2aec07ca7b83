//! Single source of truth for gameplay constants.
//! These are the defaults behind `GameConfig`; a RON file may override any of them.

// ---------------------------------------------------------------------------
// World generation

/// Side length of a chunk in tiles.
pub const CHUNK_SIZE: i32 = 16;

/// Side length of a tile in pixels.
pub const TILE_SIZE: i32 = 64;

/// Upper bound on tree clusters per chunk (lower bound is 1).
pub const MAX_TREE_CLUSTERS: u32 = 3;
pub const CLUSTER_MIN_RADIUS: i32 = 2;
pub const CLUSTER_MAX_RADIUS: i32 = 4;
pub const CLUSTER_MIN_TREES: u32 = 5;
pub const CLUSTER_MAX_TREES: u32 = 10;

/// Probability that a chunk contains a pond.
pub const POND_CHANCE: f64 = 0.15;
pub const POND_MIN_RADIUS: i32 = 2;
pub const POND_MAX_RADIUS: i32 = 4;

/// Per-offset radius multiplier range that roughens the pond outline.
pub const POND_NOISE_MIN: f64 = 0.6;
pub const POND_NOISE_MAX: f64 = 1.3;

/// Probability that any given tile holds a bush.
pub const BUSH_CHANCE: f64 = 0.05;

/// Seed multipliers for the tree/pond stream.
pub const FEATURE_SEED_MUL_X: i64 = 341_873_128_712;
pub const FEATURE_SEED_MUL_Y: i64 = 132_897_987_541;

/// Seed multipliers and offset for the bush stream.
pub const BUSH_SEED_MUL_X: i64 = 1_610_612_741;
pub const BUSH_SEED_MUL_Y: i64 = 805_306_457;
pub const BUSH_SEED_OFFSET: i64 = 7;

// ---------------------------------------------------------------------------
// Boss

pub const BOSS_HEALTH: f32 = 1000.0;
/// Pixels per tick.
pub const BOSS_SPEED: f32 = 0.2;
pub const BOSS_DAMAGE: f32 = 10.0;

pub const CIRCLE_COOLDOWN_MS: u64 = 2000;
pub const CIRCLE_PROJECTILE_COUNT: u32 = 24;

pub const CHARGE_COOLDOWN_MS: u64 = 10_000;
pub const CHARGE_TELEGRAPH_MS: u64 = 1500;
/// Pixels per second.
pub const CHARGE_DASH_SPEED: f32 = 2000.0;
pub const CHARGE_MAX_DISTANCE: f32 = 1000.0;

/// Minimum time between slowing patches once the boss is below the enrage threshold.
pub const PATCH_INTERVAL_MS: u64 = 10_000;

/// Fraction of max health below which patches start and the escalation phase rises.
pub const ENRAGE_HEALTH_FRACTION: f32 = 0.5;

/// Damage multiplier added per escalation phase above 1.
pub const PHASE_DAMAGE_STEP: f32 = 0.5;

// ---------------------------------------------------------------------------
// Slowing hazard

pub const HAZARD_RADIUS: f32 = 128.0;
pub const HAZARD_TICK_MS: u64 = 1000;
pub const HAZARD_DAMAGE: f32 = 1.0;
pub const HAZARD_SLOW_FACTOR: f32 = 0.5;
pub const HAZARD_LIFETIME_MS: u64 = 30_000;

// ---------------------------------------------------------------------------
// Player

/// Pixels per tick.
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_SIZE: f32 = 48.0;
pub const PLAYER_HEALTH: f32 = 100.0;
pub const PLAYER_SHOOT_DELAY_MS: u64 = 300;
pub const PLAYER_PROJECTILE_DAMAGE: f32 = 10.0;

// ---------------------------------------------------------------------------
// Grunt enemies

pub const ENEMY_SPEED: f32 = 2.0;
pub const ENEMY_SIZE: f32 = 64.0;
pub const ENEMY_HEALTH: f32 = 41.0;
pub const ENEMY_DAMAGE: f32 = 5.0;
pub const ENEMY_SHOOT_CHANCE: f64 = 0.2;
pub const ENEMY_MIN_SHOOT_DELAY_MS: u64 = 500;
pub const ENEMY_MAX_SHOOT_DELAY_MS: u64 = 2000;
/// Fraction of enemy damage applied per tick of body contact.
pub const CONTACT_DAMAGE_FACTOR: f32 = 0.1;

// ---------------------------------------------------------------------------
// Projectiles

pub const PLAYER_PROJECTILE_SPEED: f32 = 12.0;
pub const ENEMY_PROJECTILE_SPEED: f32 = 6.0;
pub const PROJECTILE_SIZE: f32 = 24.0;
pub const PROJECTILE_LIFETIME_MS: u64 = 5000;

// ---------------------------------------------------------------------------
// Floating damage numbers

pub const DAMAGE_NUMBER_DURATION_MS: u64 = 1000;
pub const DAMAGE_NUMBER_RISE_PX: f32 = 30.0;

// ---------------------------------------------------------------------------
// Progression

pub const SPAWN_RATE_MS: u64 = 1000;
pub const MIN_SPAWN_RATE_MS: u64 = 100;
/// Spawn interval reduction per full score band.
pub const SPAWN_RATE_STEP_MS: u64 = 100;
pub const SPAWN_SCORE_BAND: u32 = 200;
pub const SCORE_PER_KILL: u32 = 10;
pub const PORTAL_SCORE_THRESHOLD: u32 = 100;
/// Portal appears this many pixels above the player.
pub const PORTAL_OFFSET_PX: f32 = 50.0;
/// Portal interaction square, in pixels.
pub const PORTAL_SIZE: f32 = 96.0;

// ---------------------------------------------------------------------------
// Arena and screen

pub const ARENA_WIDTH_TILES: i32 = 50;
pub const ARENA_HEIGHT_TILES: i32 = 25;

pub const SCREEN_WIDTH: i32 = 1920;
pub const SCREEN_HEIGHT: i32 = 1080;
pub const TICKS_PER_SECOND: u32 = 60;
