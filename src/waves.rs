//! Wave and world progression
//!
//! The difficulty-over-time state machine: base enemy stats grow every
//! wave, regular enemies spawn up to a cap, every tenth wave swaps the
//! field for a single Boss, and a boss kill advances the world tier.
//!
//! Invariant: `wave == (world - 1) * WAVES_PER_WORLD + waves completed in
//! the current world`. Wave advancement is suspended during a boss fight
//! so the invariant stays exact and saves taken mid-fight replay cleanly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::stats::{Enemy, EnemyKind};

/// Progression phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Session not started; nothing spawns
    Idle,
    /// Regular spawning active
    Spawning,
    /// Boss alive; regular spawning and wave advancement suspended
    BossEncounter,
}

/// A weapon crate dropped where a boss died
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardCrate {
    pub id: u32,
    pub pos: Vec2,
    pub active: bool,
}

/// Progression state and the enemy group it feeds
#[derive(Debug, Clone)]
pub struct WaveManager {
    pub phase: WavePhase,
    pub wave: u32,
    pub world: u32,
    pub base_health: f32,
    pub base_speed: f32,
    pub base_damage: f32,
    pub max_on_screen: u32,
    pub enemies: Vec<Enemy>,
    pub boss_id: Option<u32>,
    pub crates: Vec<RewardCrate>,
    next_id: u32,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self {
            phase: WavePhase::Idle,
            wave: 0,
            world: 1,
            base_health: ENEMY_INITIAL_HEALTH,
            base_speed: ENEMY_INITIAL_SPEED,
            base_damage: ENEMY_INITIAL_DAMAGE,
            max_on_screen: ENEMY_INITIAL_MAX_ON_SCREEN,
            enemies: Vec::new(),
            boss_id: None,
            crates: Vec::new(),
            next_id: 1,
        }
    }
}

impl WaveManager {
    /// Begin regular spawning (session start)
    pub fn start(&mut self) {
        if self.phase == WavePhase::Idle {
            self.phase = WavePhase::Spawning;
        }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// One wave's worth of base stat growth. `wave` is the absolute wave
    /// number, which decides cap bumps; the same path runs live and during
    /// save reconciliation so the two can never drift apart.
    fn raise_base_stats(&mut self, wave: u32) {
        self.base_health += WAVE_ENEMY_HEALTH_INCREASE;
        self.base_speed += WAVE_ENEMY_SPEED_INCREASE;
        self.base_damage += WAVE_ENEMY_DAMAGE_INCREASE;
        if wave % WAVE_ENEMY_MAX_INCREASE_FREQ == 0 {
            self.max_on_screen += WAVE_ENEMY_MAX_AMOUNT_INCREASE;
        }
    }

    /// One world's worth of bulk growth, applied on boss defeat
    fn raise_base_stats_world(&mut self) {
        self.base_health += WAVE_ENEMY_HEALTH_INCREASE * WAVES_PER_WORLD as f32;
        self.base_speed += WAVE_ENEMY_SPEED_INCREASE * WAVES_PER_WORLD as f32;
        self.base_damage += WAVE_ENEMY_DAMAGE_INCREASE * WAVES_PER_WORLD as f32;
        self.max_on_screen += (WAVES_PER_WORLD / WAVE_ENEMY_MAX_INCREASE_FREQ) * WAVE_ENEMY_MAX_AMOUNT_INCREASE;
    }

    /// Advance one wave: raise base stats and maybe open a boss encounter.
    /// A no-op while Idle or while a boss is alive. Returns true when this
    /// call spawned a boss.
    pub fn advance_wave(&mut self) -> bool {
        if self.phase != WavePhase::Spawning {
            return false;
        }
        self.wave += 1;
        self.raise_base_stats(self.wave);
        log::debug!("wave {} (world {})", self.wave, self.world);

        if self.wave % BOSS_WAVE_INTERVAL == 0 {
            self.spawn_boss();
            return true;
        }
        false
    }

    /// Swap the field for the boss: regulars are despawned without death
    /// events (cleanup, not kills; no reward flows from it).
    fn spawn_boss(&mut self) {
        self.enemies.clear();
        let id = self.alloc_id();
        let boss = Enemy::new(
            id,
            EnemyKind::Boss,
            Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0),
            self.base_health * BOSS_HEALTH_MULT,
            self.base_speed * BOSS_SPEED_MULT,
            self.base_damage * BOSS_DAMAGE_MULT,
        );
        log::info!("boss spawned on wave {} with {} hp", self.wave, boss.health);
        self.enemies.push(boss);
        self.boss_id = Some(id);
        self.phase = WavePhase::BossEncounter;
    }

    /// Try to spawn one regular enemy. A no-op unless Spawning and below
    /// the on-screen cap. Picks a spot away from the player (best effort,
    /// ten attempts) and rolls Shooter once the wave allows it.
    pub fn try_spawn<R: Rng>(&mut self, player_pos: Vec2, rng: &mut R) {
        if self.phase != WavePhase::Spawning {
            return;
        }
        if self.enemies.iter().filter(|e| e.alive).count() as u32 >= self.max_on_screen {
            return;
        }

        let mut pos = random_spawn_pos(rng);
        let mut attempts = 0;
        while pos.distance(player_pos) < ENEMY_MIN_SPAWN_DISTANCE && attempts < 10 {
            pos = random_spawn_pos(rng);
            attempts += 1;
        }

        let kind = if self.wave >= SHOOTER_MIN_WAVE && rng.random_bool(SHOOTER_SPAWN_CHANCE) {
            EnemyKind::Shooter
        } else {
            EnemyKind::Contact
        };

        let id = self.alloc_id();
        self.enemies.push(Enemy::new(
            id,
            kind,
            pos,
            self.base_health,
            self.base_speed,
            self.base_damage,
        ));
        log::debug!("spawned {:?} #{} at {:.0},{:.0}", kind, id, pos.x, pos.y);
    }

    /// React to the boss dying: next world, wave realigned to the world
    /// boundary, one bulk stat bump, and a weapon crate where it fell.
    pub fn boss_defeated(&mut self, pos: Vec2) {
        self.boss_id = None;
        self.phase = WavePhase::Spawning;
        self.world += 1;
        self.wave = (self.world - 1) * WAVES_PER_WORLD;
        self.raise_base_stats_world();

        let id = self.alloc_id();
        self.crates.push(RewardCrate {
            id,
            pos,
            active: true,
        });
        log::info!("world {} cleared, crate dropped", self.world - 1);
    }

    /// Rebuild derived stats for a loaded `(wave, world)` pair by replaying
    /// the exact live increments: every absolute wave up to `wave`, plus
    /// one bulk bump per defeated boss. If the pair says a boss was alive
    /// when the save was taken, it is respawned from the rebuilt bases.
    pub fn reconcile(&mut self, wave: u32, world: u32) {
        self.base_health = ENEMY_INITIAL_HEALTH;
        self.base_speed = ENEMY_INITIAL_SPEED;
        self.base_damage = ENEMY_INITIAL_DAMAGE;
        self.max_on_screen = ENEMY_INITIAL_MAX_ON_SCREEN;
        self.wave = wave;
        self.world = world;
        self.phase = WavePhase::Spawning;

        for w in 1..=wave {
            self.raise_base_stats(w);
        }
        for _ in 1..world {
            self.raise_base_stats_world();
        }

        // wave == world * WAVES_PER_WORLD only while that world's boss is
        // still alive; a defeated boss resets wave to (world-1) * 10
        if wave > 0 && wave == world * WAVES_PER_WORLD {
            self.spawn_boss();
        }
    }

    /// Shortcut to the live boss record
    pub fn boss(&self) -> Option<&Enemy> {
        let id = self.boss_id?;
        self.enemies.iter().find(|e| e.id == id && e.alive)
    }

    /// Open a crate by id; yields nothing for inactive or unknown ids
    pub fn open_crate(&mut self, id: u32) -> bool {
        match self.crates.iter_mut().find(|c| c.id == id && c.active) {
            Some(c) => {
                c.active = false;
                true
            }
            None => false,
        }
    }

    /// Drop dead enemies and opened crates after overlap resolution
    pub fn sweep(&mut self) {
        self.enemies.retain(|e| e.alive);
        self.crates.retain(|c| c.active);
    }
}

fn random_spawn_pos<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(SPAWN_MARGIN..GAME_WIDTH - SPAWN_MARGIN),
        rng.random_range(SPAWN_MARGIN..GAME_HEIGHT - SPAWN_MARGIN),
    )
}
