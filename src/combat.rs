//! Damage and death resolution
//!
//! Damage application is a pure state transition returning an outcome; the
//! caller reacts to `Died` exactly once. Nothing here touches score, the
//! HUD, or spawn logic, so applying damage stays side-effect-minimal.

use crate::config::PLAYER_HIT_COOLDOWN;
use crate::stats::{Enemy, PlayerState};

/// Result of one damage application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead, or the hit was absorbed by a cooldown
    Ignored,
    /// Health reduced, target still alive
    Hit,
    /// This hit killed the target; fires at most once per actor
    Died,
}

/// Apply damage to an enemy. Inactive targets are a no-op.
pub fn damage_enemy(enemy: &mut Enemy, amount: f32) -> DamageOutcome {
    if !enemy.alive {
        return DamageOutcome::Ignored;
    }
    enemy.health = (enemy.health - amount).max(0.0);
    if enemy.health <= 0.0 {
        // The alive flag gates the transition; Died can never fire twice
        enemy.alive = false;
        DamageOutcome::Died
    } else {
        DamageOutcome::Hit
    }
}

/// Apply damage to the player, gated by the post-hit invulnerability window.
///
/// The window covers contact damage and enemy projectiles alike, preventing
/// per-tick multi-hits while the player overlaps an enemy.
pub fn damage_player(player: &mut PlayerState, amount: f32, now: f64) -> DamageOutcome {
    if !player.alive {
        return DamageOutcome::Ignored;
    }
    if now <= player.last_hit + PLAYER_HIT_COOLDOWN {
        return DamageOutcome::Ignored;
    }
    player.last_hit = now;
    player.health = (player.health - amount).max(0.0);
    if player.health <= 0.0 {
        player.alive = false;
        DamageOutcome::Died
    } else {
        DamageOutcome::Hit
    }
}
