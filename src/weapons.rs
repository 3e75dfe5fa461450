//! Weapon catalog and per-session arsenal
//!
//! Static variation specs for the two weapon classes, plus the cooldown
//! state for the one slot of each class the player carries. Actual damage
//! is `damage_mult * player.damage` at attack time, so weapons keep pace
//! with upgrades.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weapon class; one slot of each in the arsenal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Sword,
}

/// A static weapon variation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub kind: WeaponKind,
    pub damage_mult: f32,
    /// Seconds between attacks
    pub cooldown: f64,
    /// Pistol: projectiles per shot
    pub pellets: u32,
    /// Pistol: total spread cone (radians)
    pub spread: f32,
    /// Pistol: bullet speed
    pub shot_speed: f32,
    /// Sword: hitbox center distance along the aim direction
    pub reach: f32,
    /// Sword: hitbox extents (width along aim is irrelevant; box is axis-aligned)
    pub hitbox_w: f32,
    pub hitbox_h: f32,
}

const fn pistol(name: &'static str, damage_mult: f32, cooldown: f64, pellets: u32, spread: f32, shot_speed: f32) -> WeaponSpec {
    WeaponSpec {
        name,
        kind: WeaponKind::Pistol,
        damage_mult,
        cooldown,
        pellets,
        spread,
        shot_speed,
        reach: 0.0,
        hitbox_w: 0.0,
        hitbox_h: 0.0,
    }
}

const fn sword(name: &'static str, damage_mult: f32, cooldown: f64, reach: f32, hitbox_w: f32, hitbox_h: f32) -> WeaponSpec {
    WeaponSpec {
        name,
        kind: WeaponKind::Sword,
        damage_mult,
        cooldown,
        pellets: 0,
        spread: 0.0,
        shot_speed: 0.0,
        reach,
        hitbox_w,
        hitbox_h,
    }
}

/// Pistol variations; index 0 is the starting weapon
pub static PISTOLS: [WeaponSpec; 4] = [
    pistol("Basic Pistol", 1.0, 0.3, 1, 0.0, 400.0),
    pistol("Heavy Revolver", 1.8, 0.6, 1, 0.0, 500.0),
    pistol("Rapid SMG", 0.6, 0.1, 1, 0.1, 350.0),
    pistol("Combat Shotgun", 0.7, 0.8, 5, 0.5, 300.0),
];

/// Sword variations; index 0 is the starting weapon
pub static SWORDS: [WeaponSpec; 4] = [
    sword("Short Sword", 1.0, 0.5, 40.0, 50.0, 30.0),
    sword("Long Sword", 1.5, 0.8, 60.0, 70.0, 40.0),
    sword("Swift Dagger", 0.7, 0.25, 30.0, 30.0, 20.0),
    sword("Heavy Greatsword", 2.5, 1.2, 80.0, 90.0, 50.0),
];

/// Pick a uniformly random variation of the given class (crate drops)
pub fn random_variation<R: Rng>(kind: WeaponKind, rng: &mut R) -> &'static WeaponSpec {
    let table: &[WeaponSpec] = match kind {
        WeaponKind::Pistol => &PISTOLS,
        WeaponKind::Sword => &SWORDS,
    };
    &table[rng.random_range(0..table.len())]
}

/// One equipped weapon slot with its cooldown state
#[derive(Debug, Clone)]
pub struct Weapon {
    pub spec: &'static WeaponSpec,
    /// Clock time of the last attack
    pub last_attack: f64,
}

impl Weapon {
    fn new(spec: &'static WeaponSpec) -> Self {
        Self {
            spec,
            last_attack: f64::NEG_INFINITY,
        }
    }

    /// Cooldown gate; records the attack time when it passes
    pub fn try_attack(&mut self, now: f64) -> bool {
        if now > self.last_attack + self.spec.cooldown {
            self.last_attack = now;
            true
        } else {
            false
        }
    }
}

/// The player's carried weapons: one pistol, one sword, one equipped
#[derive(Debug, Clone)]
pub struct Arsenal {
    pub pistol: Weapon,
    pub sword: Weapon,
    pub equipped: WeaponKind,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            pistol: Weapon::new(&PISTOLS[0]),
            sword: Weapon::new(&SWORDS[0]),
            equipped: WeaponKind::Pistol,
        }
    }
}

impl Arsenal {
    pub fn equip(&mut self, kind: WeaponKind) {
        self.equipped = kind;
    }

    /// The currently equipped slot
    pub fn current(&mut self) -> &mut Weapon {
        match self.equipped {
            WeaponKind::Pistol => &mut self.pistol,
            WeaponKind::Sword => &mut self.sword,
        }
    }

    /// Install a found variation into its class slot and equip it
    pub fn install(&mut self, spec: &'static WeaponSpec) {
        let slot = match spec.kind {
            WeaponKind::Pistol => &mut self.pistol,
            WeaponKind::Sword => &mut self.sword,
        };
        *slot = Weapon::new(spec);
        self.equipped = spec.kind;
    }
}
