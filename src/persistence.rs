//! Save record and storage backends
//!
//! One flat JSON object under a single key. Every field is optional on
//! read with a documented default, so an absent or truncated save simply
//! degrades to a fresh game. Derived progression values (base enemy
//! stats, spawn cap) are never persisted; the wave manager replays them
//! from `currentWave`/`currentWorld` on load.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::*;

/// The flat persisted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub score: u32,
    pub speed_level: u32,
    pub magnet_level: u32,
    pub max_coins: u32,
    pub player_speed: f32,
    pub player_health: f32,
    pub player_max_health: f32,
    pub player_damage: f32,
    pub current_wave: u32,
    pub current_world: u32,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            score: 0,
            speed_level: 1,
            magnet_level: 0,
            max_coins: INITIAL_MAX_COINS,
            player_speed: PLAYER_INITIAL_SPEED,
            player_health: PLAYER_INITIAL_HEALTH,
            player_max_health: PLAYER_INITIAL_MAX_HEALTH,
            player_damage: PLAYER_INITIAL_DAMAGE,
            current_wave: 0,
            current_world: 1,
        }
    }
}

impl SaveData {
    /// Parse a stored blob; anything unreadable falls back to defaults
    pub fn from_blob(blob: Option<&str>) -> Self {
        match blob {
            Some(json) => serde_json::from_str(json).unwrap_or_else(|e| {
                log::warn!("unreadable save, starting fresh: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

/// Host-provided key-value persistence backend
pub trait SaveStore {
    fn load(&self, key: &str) -> Option<String>;
    /// Fire-and-forget; failures are logged by the implementation, never surfaced
    fn store(&mut self, key: &str, blob: &str);
}

/// In-memory store for tests and headless demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn store(&mut self, key: &str, blob: &str) {
        self.map.insert(key.to_string(), blob.to_string());
    }
}

/// One JSON file per key under a directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(blob) => Some(blob),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("save read failed for {key}: {e}");
                None
            }
        }
    }

    fn store(&mut self, key: &str, blob: &str) {
        if let Err(e) = fs::write(self.path(key), blob) {
            log::warn!("save write failed for {key}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_blob_is_fresh_game() {
        let data = SaveData::from_blob(None);
        assert_eq!(data, SaveData::default());
        assert_eq!(data.current_world, 1);
        assert_eq!(data.max_coins, INITIAL_MAX_COINS);
    }

    #[test]
    fn test_corrupt_blob_is_fresh_game() {
        let data = SaveData::from_blob(Some("{not json"));
        assert_eq!(data, SaveData::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let data = SaveData::from_blob(Some(r#"{"score": 120, "currentWave": 7}"#));
        assert_eq!(data.score, 120);
        assert_eq!(data.current_wave, 7);
        assert_eq!(data.speed_level, 1);
        assert_eq!(data.player_max_health, PLAYER_INITIAL_MAX_HEALTH);
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let json = serde_json::to_string(&SaveData::default()).unwrap();
        for field in [
            "score",
            "speedLevel",
            "magnetLevel",
            "maxCoins",
            "playerSpeed",
            "playerHealth",
            "playerMaxHealth",
            "playerDamage",
            "currentWave",
            "currentWorld",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn test_round_trip() {
        let data = SaveData {
            score: 420,
            speed_level: 3,
            magnet_level: 2,
            max_coins: 5,
            player_speed: 140.0,
            player_health: 88.0,
            player_max_health: 120.0,
            player_damage: 25.0,
            current_wave: 13,
            current_world: 2,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(SaveData::from_blob(Some(&json)), data);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert!(store.load("k").is_none());
        store.store("k", "v");
        assert_eq!(store.load("k").as_deref(), Some("v"));
    }
}
