//! Wavebound - progression and combat core for a top-down survival game
//!
//! Core modules:
//! - `session`: the per-run context object and tick pipeline
//! - `waves`: difficulty escalation, enemy/boss spawning, world tiers
//! - `combat`: damage application and death transitions
//! - `economy`: score, coins, and the magnet effect
//! - `persistence`: the flat save record and storage backends
//!
//! The crate owns all gameplay state and is deterministic: a fixed seed
//! plus the same tick inputs replays the same run. Rendering, input
//! polling, and collision detection belong to the host, which feeds
//! `TickInput` (with overlap reports) in and drains `GameEvent`s out.

pub mod combat;
pub mod config;
pub mod economy;
pub mod events;
pub mod hud;
pub mod persistence;
pub mod projectile;
pub mod session;
pub mod shop;
pub mod stats;
pub mod waves;
pub mod weapons;

pub use combat::DamageOutcome;
pub use economy::Economy;
pub use events::{GameEvent, Overlap};
pub use hud::{HudSink, NullHud};
pub use persistence::{FileStore, MemoryStore, SaveData, SaveStore};
pub use projectile::{Projectile, Side};
pub use session::{Session, SessionPhase, TickInput};
pub use shop::UpgradeKind;
pub use stats::{Enemy, EnemyKind, PlayerState};
pub use waves::{WaveManager, WavePhase};
pub use weapons::{Arsenal, WeaponKind, WeaponSpec};
