//! Player and enemy attribute records
//!
//! Pure stat state, owned by the session. The host binds visual actors to
//! these records by id and never mutates them directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::*;

/// The player's mutable attributes for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    /// Stored upgrade counters; shop prices derive from these alone
    pub speed_level: u32,
    pub health_level: u32,
    pub damage_level: u32,
    /// Clock time of the last hit taken, for the invulnerability window
    pub last_hit: f64,
    pub alive: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0),
            health: PLAYER_INITIAL_HEALTH,
            max_health: PLAYER_INITIAL_MAX_HEALTH,
            damage: PLAYER_INITIAL_DAMAGE,
            speed: PLAYER_INITIAL_SPEED,
            speed_level: 1,
            health_level: 1,
            damage_level: 1,
            last_hit: f64::NEG_INFINITY,
            alive: true,
        }
    }
}

impl PlayerState {
    /// Permanent speed increase (shop-validated, unconditional here)
    pub fn upgrade_speed(&mut self, delta: f32) {
        self.speed += delta;
        self.speed_level += 1;
    }

    /// Raises the health cap and heals by the same amount, capped at the new max
    pub fn upgrade_max_health(&mut self, delta: f32) {
        self.max_health += delta;
        self.health = (self.health + delta).min(self.max_health);
        self.health_level += 1;
    }

    /// Permanent damage increase
    pub fn upgrade_damage(&mut self, delta: f32) {
        self.damage += delta;
        self.damage_level += 1;
    }
}

/// Behavior class of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Melee chaser, damages on contact
    Contact,
    /// Ranged kiter, flees when close and fires at the player
    Shooter,
    /// One per world, shooter behavior with multiplied stats
    Boss,
}

impl EnemyKind {
    /// Kinds that kite and fire projectiles
    pub fn is_ranged(&self) -> bool {
        matches!(self, EnemyKind::Shooter | EnemyKind::Boss)
    }
}

/// One enemy's stat record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    /// Clock time of the last shot fired (ranged kinds only)
    pub last_shot: f64,
    pub fire_interval: f64,
    pub shot_speed: f32,
    pub alive: bool,
}

impl Enemy {
    /// New enemy with stats copied from the given base values
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, health: f32, speed: f32, damage: f32) -> Self {
        let ranged = kind.is_ranged();
        Self {
            id,
            kind,
            pos,
            health,
            max_health: health,
            damage,
            speed,
            last_shot: f64::NEG_INFINITY,
            fire_interval: if ranged { SHOOTER_FIRE_INTERVAL } else { 0.0 },
            shot_speed: if ranged { SHOOTER_SHOT_SPEED } else { 0.0 },
            alive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_speed_bumps_level() {
        let mut p = PlayerState::default();
        p.upgrade_speed(UPGRADE_INCREASE_SPEED);
        assert_eq!(p.speed, PLAYER_INITIAL_SPEED + UPGRADE_INCREASE_SPEED);
        assert_eq!(p.speed_level, 2);
    }

    #[test]
    fn test_upgrade_max_health_heals_capped() {
        let mut p = PlayerState::default();
        p.health = 95.0;
        p.upgrade_max_health(20.0);
        assert_eq!(p.max_health, 120.0);
        // 95 + 20 = 115, under the new cap
        assert_eq!(p.health, 115.0);

        p.health = p.max_health;
        p.upgrade_max_health(20.0);
        // Full health stays full
        assert_eq!(p.health, p.max_health);
    }

    #[test]
    fn test_upgrade_damage_monotonic() {
        let mut p = PlayerState::default();
        let before = p.damage;
        p.upgrade_damage(UPGRADE_INCREASE_DAMAGE);
        p.upgrade_damage(UPGRADE_INCREASE_DAMAGE);
        assert!(p.damage > before);
        assert_eq!(p.damage_level, 3);
    }

    #[test]
    fn test_enemy_kinds() {
        assert!(!EnemyKind::Contact.is_ranged());
        assert!(EnemyKind::Shooter.is_ranged());
        assert!(EnemyKind::Boss.is_ranged());

        let e = Enemy::new(1, EnemyKind::Contact, Vec2::ZERO, 30.0, 60.0, 10.0);
        assert_eq!(e.fire_interval, 0.0);
        let s = Enemy::new(2, EnemyKind::Shooter, Vec2::ZERO, 30.0, 60.0, 10.0);
        assert_eq!(s.fire_interval, SHOOTER_FIRE_INTERVAL);
        assert_eq!(s.shot_speed, SHOOTER_SHOT_SPEED);
    }
}
