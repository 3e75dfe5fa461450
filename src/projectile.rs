//! Projectile records
//!
//! Both player bullets and enemy shots; the side decides who a hit can
//! damage, and the shooter handle only guards against self-damage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{GAME_HEIGHT, GAME_WIDTH};

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub side: Side,
    /// Weak handle to the firing enemy; never dereferenced, only compared
    pub shooter: Option<u32>,
    /// Seconds of flight left
    pub ttl: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, damage: f32, side: Side, ttl: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            damage,
            side,
            shooter: None,
            ttl,
            active: true,
        }
    }

    /// Integrate one tick; expires on TTL or on leaving the play area
    pub fn step(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;
        self.ttl -= dt;
        let out = self.pos.x < 0.0
            || self.pos.x > GAME_WIDTH
            || self.pos.y < 0.0
            || self.pos.y > GAME_HEIGHT;
        if self.ttl <= 0.0 || out {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_and_expires_on_ttl() {
        let mut p = Projectile::new(1, Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0), 5.0, Side::Player, 0.5);
        p.step(0.25);
        assert_eq!(p.pos, Vec2::new(112.5, 100.0));
        assert!(p.active);
        p.step(0.3);
        assert!(!p.active);
    }

    #[test]
    fn test_expires_leaving_bounds() {
        let mut p = Projectile::new(1, Vec2::new(795.0, 300.0), Vec2::new(400.0, 0.0), 5.0, Side::Enemy, 10.0);
        p.step(0.1);
        assert!(!p.active);
    }

    #[test]
    fn test_inactive_does_not_move() {
        let mut p = Projectile::new(1, Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0), 5.0, Side::Player, 1.0);
        p.active = false;
        p.step(1.0);
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
    }
}
