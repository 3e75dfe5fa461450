//! Upgrade price curves
//!
//! Prices are a pure function of the stored level counter, nothing else.
//! The affordability check and the actual stat mutation live at the
//! session boundary; this module only prices.

use crate::config::*;

/// The five purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    Speed,
    MaxHealth,
    Damage,
    MaxCoins,
    Magnet,
}

impl UpgradeKind {
    /// Stat delta applied per purchase (coin/magnet kinds step by one level)
    pub fn stat_delta(&self) -> f32 {
        match self {
            UpgradeKind::Speed => UPGRADE_INCREASE_SPEED,
            UpgradeKind::MaxHealth => UPGRADE_INCREASE_MAX_HEALTH,
            UpgradeKind::Damage => UPGRADE_INCREASE_DAMAGE,
            UpgradeKind::MaxCoins | UpgradeKind::Magnet => 1.0,
        }
    }
}

/// Price of the next purchase given the current stored level.
///
/// Speed/MaxHealth/Damage/MaxCoins count levels from 1, Magnet from 0, so
/// `level` is passed as stored and the starting offset is handled here.
pub fn price(kind: UpgradeKind, level: u32) -> u32 {
    let (base, step, steps_taken) = match kind {
        UpgradeKind::Speed => (UPGRADE_COST_SPEED_INITIAL, UPGRADE_COST_SPEED_STEP, level.saturating_sub(1)),
        UpgradeKind::MaxHealth => (UPGRADE_COST_MAX_HEALTH_INITIAL, UPGRADE_COST_MAX_HEALTH_STEP, level.saturating_sub(1)),
        UpgradeKind::Damage => (UPGRADE_COST_DAMAGE_INITIAL, UPGRADE_COST_DAMAGE_STEP, level.saturating_sub(1)),
        UpgradeKind::MaxCoins => (UPGRADE_COST_COINS_INITIAL, UPGRADE_COST_COINS_STEP, level.saturating_sub(1)),
        UpgradeKind::Magnet => (UPGRADE_COST_MAGNET_INITIAL, UPGRADE_COST_MAGNET_STEP, level),
    };
    base + steps_taken * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_prices() {
        assert_eq!(price(UpgradeKind::Speed, 1), UPGRADE_COST_SPEED_INITIAL);
        assert_eq!(price(UpgradeKind::MaxHealth, 1), UPGRADE_COST_MAX_HEALTH_INITIAL);
        assert_eq!(price(UpgradeKind::Damage, 1), UPGRADE_COST_DAMAGE_INITIAL);
        assert_eq!(price(UpgradeKind::MaxCoins, 1), UPGRADE_COST_COINS_INITIAL);
        // Magnet starts at level 0
        assert_eq!(price(UpgradeKind::Magnet, 0), UPGRADE_COST_MAGNET_INITIAL);
    }

    #[test]
    fn test_prices_step_linearly_with_level() {
        assert_eq!(price(UpgradeKind::Speed, 4), UPGRADE_COST_SPEED_INITIAL + 3 * UPGRADE_COST_SPEED_STEP);
        assert_eq!(price(UpgradeKind::Magnet, 3), UPGRADE_COST_MAGNET_INITIAL + 3 * UPGRADE_COST_MAGNET_STEP);
    }
}
