//! Inbound and outbound event types
//!
//! Overlap reports come in from the host's physics each tick; game events
//! go back out for it to translate into visuals and audio. Entity ids are
//! scoped to their group (enemy, projectile, coin, crate).

use glam::Vec2;

use crate::stats::EnemyKind;
use crate::weapons::WeaponKind;

/// An overlap the host observed this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    PlayerCoin { coin: u32 },
    PlayerEnemy { enemy: u32 },
    ProjectileEnemy { projectile: u32, enemy: u32 },
    PlayerProjectile { projectile: u32 },
    PlayerCrate { crate_id: u32 },
}

/// Outbound notifications, drained by the host once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Fired exactly once per enemy, after its state is fully updated
    EnemyDied { id: u32, kind: EnemyKind, pos: Vec2 },
    /// Distinct from enemy death; the session is in GameOver afterwards
    PlayerDied,
    /// Transient feedback hooks (tint flash); no gameplay meaning
    EnemyHit { id: u32 },
    PlayerHit,
    /// A reward crate yielded this weapon variation
    WeaponFound { name: &'static str, kind: WeaponKind },
}
