//! Game balance constants
//!
//! Everything tunable lives here so the rest of the crate never hardcodes
//! a number twice. Save files intentionally do not persist any of these;
//! derived progression is replayed from them on load.

/// Play area dimensions (pixels, origin top-left)
pub const GAME_WIDTH: f32 = 800.0;
pub const GAME_HEIGHT: f32 = 600.0;
/// Margin kept free of spawns along every edge
pub const SPAWN_MARGIN: f32 = 50.0;
/// Coins drifting out of bounds are clamped back to this margin
pub const COIN_CLAMP_MARGIN: f32 = 16.0;

/// Player starting attributes
pub const PLAYER_INITIAL_HEALTH: f32 = 100.0;
pub const PLAYER_INITIAL_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_INITIAL_DAMAGE: f32 = 10.0;
pub const PLAYER_INITIAL_SPEED: f32 = 100.0;
/// Seconds of invulnerability after any hit (contact or projectile)
pub const PLAYER_HIT_COOLDOWN: f64 = 1.0;

/// Enemy base attributes at wave 0 (scaled up by the wave manager)
pub const ENEMY_INITIAL_HEALTH: f32 = 30.0;
pub const ENEMY_INITIAL_SPEED: f32 = 60.0;
pub const ENEMY_INITIAL_DAMAGE: f32 = 10.0;
pub const ENEMY_INITIAL_MAX_ON_SCREEN: u32 = 5;
/// Regular spawns are rejected closer to the player than this
pub const ENEMY_MIN_SPAWN_DISTANCE: f32 = 150.0;
/// Chance a regular spawn is a Shooter once `wave >= SHOOTER_MIN_WAVE`
pub const SHOOTER_SPAWN_CHANCE: f64 = 0.30;
pub const SHOOTER_MIN_WAVE: u32 = 2;
/// Shooter kiting and fire cadence
pub const SHOOTER_FLEE_DISTANCE: f32 = 200.0;
pub const SHOOTER_FIRE_INTERVAL: f64 = 2.0;
pub const SHOOTER_SHOT_SPEED: f32 = 150.0;
pub const SHOOTER_SHOT_TTL: f32 = 3.0;

/// Boss stat multipliers over the current base values
pub const BOSS_HEALTH_MULT: f32 = 5.0;
pub const BOSS_SPEED_MULT: f32 = 0.8;
pub const BOSS_DAMAGE_MULT: f32 = 2.0;

/// Waves per world; a Boss closes every world
pub const WAVES_PER_WORLD: u32 = 10;
pub const BOSS_WAVE_INTERVAL: u32 = 10;
/// Per-wave base stat increments
pub const WAVE_ENEMY_HEALTH_INCREASE: f32 = 5.0;
pub const WAVE_ENEMY_SPEED_INCREASE: f32 = 2.0;
pub const WAVE_ENEMY_DAMAGE_INCREASE: f32 = 1.0;
/// Every this many waves the on-screen cap grows by the amount below
pub const WAVE_ENEMY_MAX_INCREASE_FREQ: u32 = 5;
pub const WAVE_ENEMY_MAX_AMOUNT_INCREASE: u32 = 1;

/// Coin economy
pub const COIN_POINTS_VALUE: u32 = 5;
pub const INITIAL_MAX_COINS: u32 = 2;
/// Coins inside this radius of the player are collected automatically
pub const COIN_COLLECT_DISTANCE: f32 = 24.0;

/// Magnet curve: linear in level, level 0 = off
pub const MAGNET_BASE_RANGE: f32 = 100.0;
pub const MAGNET_RANGE_PER_LEVEL: f32 = 80.0;
pub const MAGNET_BASE_SPEED: f32 = 80.0;
pub const MAGNET_SPEED_PER_LEVEL: f32 = 60.0;
/// Pull speed factor bounds: full speed at the player, half at the rim
pub const MAGNET_PULL_FLOOR: f32 = 0.5;
pub const MAGNET_PULL_CEILING: f32 = 1.0;

/// Player bullet lifetime (seconds)
pub const BULLET_TTL: f32 = 1.5;

/// Upgrade stat deltas per purchase
pub const UPGRADE_INCREASE_SPEED: f32 = 20.0;
pub const UPGRADE_INCREASE_MAX_HEALTH: f32 = 20.0;
pub const UPGRADE_INCREASE_DAMAGE: f32 = 5.0;

/// Shop cost curves: `base + steps_taken * step`
pub const UPGRADE_COST_SPEED_INITIAL: u32 = 50;
pub const UPGRADE_COST_SPEED_STEP: u32 = 25;
pub const UPGRADE_COST_COINS_INITIAL: u32 = 100;
pub const UPGRADE_COST_COINS_STEP: u32 = 50;
pub const UPGRADE_COST_MAGNET_INITIAL: u32 = 150;
pub const UPGRADE_COST_MAGNET_STEP: u32 = 75;
pub const UPGRADE_COST_MAX_HEALTH_INITIAL: u32 = 80;
pub const UPGRADE_COST_MAX_HEALTH_STEP: u32 = 40;
pub const UPGRADE_COST_DAMAGE_INITIAL: u32 = 120;
pub const UPGRADE_COST_DAMAGE_STEP: u32 = 60;

/// Timer periods (seconds)
pub const WAVE_INTERVAL: f64 = 20.0;
pub const ENEMY_SPAWN_INTERVAL: f64 = 2.0;
pub const COIN_SPAWN_INTERVAL: f64 = 2.0;
pub const AUTOSAVE_INTERVAL: f64 = 5.0;

/// Key the whole session state is persisted under
pub const SAVE_KEY: &str = "wavebound_save";
