//! Score ledger, coins, and the magnet effect
//!
//! Owns the coin group and all currency. Score never goes negative: spends
//! below balance are rejected and logged, never an error.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::hud::HudSink;

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

/// Currency and collectible state for one session
#[derive(Debug, Clone)]
pub struct Economy {
    pub score: u32,
    pub coin_value: u32,
    pub max_coins: u32,
    pub magnet_level: u32,
    pub coins: Vec<Coin>,
    next_id: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            score: 0,
            coin_value: COIN_POINTS_VALUE,
            max_coins: INITIAL_MAX_COINS,
            magnet_level: 0,
            coins: Vec::new(),
            next_id: 1,
        }
    }
}

impl Economy {
    /// Lazily top the active coin count up to `max_coins`
    pub fn spawn_coins<R: Rng>(&mut self, rng: &mut R) {
        let mut active = self.coins.iter().filter(|c| c.active).count() as u32;
        while active < self.max_coins {
            let pos = Vec2::new(
                rng.random_range(SPAWN_MARGIN..GAME_WIDTH - SPAWN_MARGIN),
                rng.random_range(SPAWN_MARGIN..GAME_HEIGHT - SPAWN_MARGIN),
            );
            let id = self.next_id;
            self.next_id += 1;
            self.coins.push(Coin {
                id,
                pos,
                vel: Vec2::ZERO,
                active: true,
            });
            active += 1;
        }
    }

    /// Collect a coin by id; a no-op for inactive or unknown ids
    pub fn collect(&mut self, id: u32, hud: &mut dyn HudSink) {
        let Some(coin) = self.coins.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if !coin.active {
            return;
        }
        coin.active = false;
        self.score += self.coin_value;
        hud.update_score(self.score);
    }

    /// Credit a reward (enemy kills) and report it to the HUD
    pub fn reward(&mut self, amount: u32, hud: &mut dyn HudSink) {
        self.score += amount;
        hud.update_score(self.score);
    }

    /// Try to spend; rejected with no mutation when short
    pub fn spend(&mut self, amount: u32, hud: &mut dyn HudSink) -> bool {
        if self.score < amount {
            log::debug!("spend rejected: {} short of {}", self.score, amount);
            return false;
        }
        self.score -= amount;
        hud.update_score(self.score);
        true
    }

    /// Effective magnet range for the current level (level 0 = off)
    pub fn magnet_range(&self) -> f32 {
        MAGNET_BASE_RANGE + (self.magnet_level.saturating_sub(1)) as f32 * MAGNET_RANGE_PER_LEVEL
    }

    /// Effective magnet pull speed for the current level
    pub fn magnet_speed(&self) -> f32 {
        MAGNET_BASE_SPEED + (self.magnet_level.saturating_sub(1)) as f32 * MAGNET_SPEED_PER_LEVEL
    }

    /// Pull coins toward the player and auto-collect the ones in reach.
    ///
    /// Pull speed rises as distance falls, clamped to
    /// `[MAGNET_PULL_FLOOR, MAGNET_PULL_CEILING]` of the level's speed.
    /// Coins outside range stop; coins that drifted out of bounds are
    /// clamped back inside with zero velocity.
    pub fn magnet_tick(&mut self, player_pos: Vec2, dt: f32, hud: &mut dyn HudSink) {
        if self.magnet_level == 0 {
            return;
        }
        let range = self.magnet_range();
        let speed = self.magnet_speed();
        let mut collected = 0u32;

        for coin in &mut self.coins {
            if !coin.active {
                continue;
            }
            let to_player = player_pos - coin.pos;
            let dist = to_player.length();

            if dist <= range {
                if dist <= COIN_COLLECT_DISTANCE {
                    coin.active = false;
                    collected += 1;
                    continue;
                }
                let factor = (1.0 - dist / range).clamp(MAGNET_PULL_FLOOR, MAGNET_PULL_CEILING);
                coin.vel = to_player / dist * (speed * factor);
                coin.pos += coin.vel * dt;
            } else {
                coin.vel = Vec2::ZERO;
            }

            if coin.pos.x < 0.0 || coin.pos.x > GAME_WIDTH || coin.pos.y < 0.0 || coin.pos.y > GAME_HEIGHT {
                coin.pos.x = coin.pos.x.clamp(COIN_CLAMP_MARGIN, GAME_WIDTH - COIN_CLAMP_MARGIN);
                coin.pos.y = coin.pos.y.clamp(COIN_CLAMP_MARGIN, GAME_HEIGHT - COIN_CLAMP_MARGIN);
                coin.vel = Vec2::ZERO;
            }
        }

        if collected > 0 {
            self.score += collected * self.coin_value;
            hud.update_score(self.score);
        }
    }

    pub fn upgrade_max_coins(&mut self) {
        self.max_coins += 1;
    }

    pub fn upgrade_magnet(&mut self) {
        self.magnet_level += 1;
    }

    /// Drop deactivated coins after overlap resolution
    pub fn sweep(&mut self) {
        self.coins.retain(|c| c.active);
    }
}
