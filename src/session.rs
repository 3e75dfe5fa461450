//! Session context and the per-tick pipeline
//!
//! `Session` owns every piece of mutable gameplay state and is the only
//! writer of each. One `tick` runs, in order: timers, movement (player,
//! enemies, projectiles, magnet), overlap resolution, then a sweep of
//! deactivated entities. Death reactions run inline right after the
//! state transition, so listeners always observe fully-updated actors and
//! nothing can re-enter a manager mid-handler.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::combat::{self, DamageOutcome};
use crate::config::*;
use crate::economy::Economy;
use crate::events::{GameEvent, Overlap};
use crate::hud::HudSink;
use crate::persistence::{SaveData, SaveStore};
use crate::projectile::{Projectile, Side};
use crate::shop::{self, UpgradeKind};
use crate::stats::{EnemyKind, PlayerState};
use crate::waves::WaveManager;
use crate::weapons::{self, Arsenal, WeaponKind};

/// Repeating interval, advanced by frame delta
#[derive(Debug, Clone)]
struct Timer {
    period: f64,
    elapsed: f64,
}

impl Timer {
    fn new(period: f64) -> Self {
        Self { period, elapsed: 0.0 }
    }

    /// Advance by `dt`; true when the period elapsed this tick
    fn fire(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed -= self.period;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Whether the session still accepts ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    /// Player died; ticks are skipped until `reset`
    GameOver,
}

/// Host input for one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intent, components in -1/0/+1
    pub move_dir: Vec2,
    /// World-space aim target
    pub aim: Vec2,
    /// Attack with the equipped weapon
    pub fire: bool,
    /// Switch the equipped weapon slot
    pub equip: Option<WeaponKind>,
    /// Overlaps the host's physics observed this frame, in report order
    pub overlaps: Vec<Overlap>,
}

/// All gameplay state for one run
pub struct Session {
    pub player: PlayerState,
    pub economy: Economy,
    pub waves: WaveManager,
    pub projectiles: Vec<Projectile>,
    pub arsenal: Arsenal,
    pub phase: SessionPhase,
    now: f64,
    next_projectile_id: u32,
    rng: Pcg32,
    events: Vec<GameEvent>,
    hud: Box<dyn HudSink>,
    store: Box<dyn SaveStore>,
    wave_timer: Timer,
    spawn_timer: Timer,
    coin_timer: Timer,
    autosave_timer: Timer,
}

impl Session {
    /// Fresh session; call `resume` afterwards to continue a saved run
    pub fn new(seed: u64, hud: Box<dyn HudSink>, store: Box<dyn SaveStore>) -> Self {
        let mut session = Self {
            player: PlayerState::default(),
            economy: Economy::default(),
            waves: WaveManager::default(),
            projectiles: Vec::new(),
            arsenal: Arsenal::default(),
            phase: SessionPhase::Running,
            now: 0.0,
            next_projectile_id: 1,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            hud,
            store,
            wave_timer: Timer::new(WAVE_INTERVAL),
            spawn_timer: Timer::new(ENEMY_SPAWN_INTERVAL),
            coin_timer: Timer::new(COIN_SPAWN_INTERVAL),
            autosave_timer: Timer::new(AUTOSAVE_INTERVAL),
        };
        session.waves.start();
        session.economy.spawn_coins(&mut session.rng);
        session.push_hud();
        log::info!("session started (seed {seed})");
        session
    }

    /// Current session clock in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the whole session by one frame
    pub fn tick(&mut self, input: &TickInput, dt: f64) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        self.now += dt;
        let dtf = dt as f32;

        // Timers
        if self.wave_timer.fire(dt) {
            self.waves.advance_wave();
            self.hud.update_wave(self.waves.wave);
        }
        if self.spawn_timer.fire(dt) {
            self.waves.try_spawn(self.player.pos, &mut self.rng);
        }
        if self.coin_timer.fire(dt) {
            self.economy.spawn_coins(&mut self.rng);
        }
        if self.autosave_timer.fire(dt) {
            self.save_now();
        }

        // Movement before damage resolution, damage before economy reactions
        self.move_player(input.move_dir, dtf);
        self.step_enemies(dtf);
        if let Some(kind) = input.equip {
            self.arsenal.equip(kind);
            let name = self.arsenal.current().spec.name;
            self.hud.update_weapon(name);
        }
        if input.fire {
            self.player_attack(input.aim);
        }
        for p in &mut self.projectiles {
            p.step(dtf);
        }
        self.economy.magnet_tick(self.player.pos, dtf, &mut *self.hud);

        for ov in &input.overlaps {
            self.resolve_overlap(*ov);
            if self.phase == SessionPhase::GameOver {
                break;
            }
        }

        self.waves.sweep();
        self.economy.sweep();
        self.projectiles.retain(|p| p.active);
    }

    /// Reset to fresh-game defaults; the save store is kept
    pub fn reset(&mut self) {
        self.player = PlayerState::default();
        self.economy = Economy::default();
        self.waves = WaveManager::default();
        self.waves.start();
        self.projectiles.clear();
        self.arsenal = Arsenal::default();
        self.events.clear();
        self.phase = SessionPhase::Running;
        self.now = 0.0;
        self.wave_timer.reset();
        self.spawn_timer.reset();
        self.coin_timer.reset();
        self.autosave_timer.reset();
        self.economy.spawn_coins(&mut self.rng);
        self.push_hud();
        log::info!("session reset");
    }

    // --- Persistence ---

    /// Snapshot the flat save record and hand it to the backend
    pub fn save_now(&mut self) {
        let data = SaveData {
            score: self.economy.score,
            speed_level: self.player.speed_level,
            magnet_level: self.economy.magnet_level,
            max_coins: self.economy.max_coins,
            player_speed: self.player.speed,
            player_health: self.player.health,
            player_max_health: self.player.max_health,
            player_damage: self.player.damage,
            current_wave: self.waves.wave,
            current_world: self.waves.world,
        };
        match serde_json::to_string(&data) {
            Ok(json) => {
                self.store.store(SAVE_KEY, &json);
                log::debug!("saved at wave {} world {}", data.current_wave, data.current_world);
            }
            Err(e) => log::warn!("save serialization failed: {e}"),
        }
    }

    /// Restore from the backend; an absent or unreadable save means a
    /// fresh game. Derived progression is replayed, never read back.
    pub fn resume(&mut self) {
        let blob = self.store.load(SAVE_KEY);
        let data = SaveData::from_blob(blob.as_deref());
        self.apply_save(&data);
        log::info!(
            "session resumed at wave {} world {}",
            data.current_wave,
            data.current_world
        );
    }

    fn apply_save(&mut self, data: &SaveData) {
        self.player.speed = data.player_speed;
        self.player.health = data.player_health;
        self.player.max_health = data.player_max_health;
        self.player.damage = data.player_damage;
        self.player.speed_level = data.speed_level;
        // Health/damage levels are not persisted; recover them from the
        // stat deltas so the price curve lands where it left off
        self.player.health_level = 1 + ((data.player_max_health - PLAYER_INITIAL_MAX_HEALTH).max(0.0)
            / UPGRADE_INCREASE_MAX_HEALTH)
            .round() as u32;
        self.player.damage_level = 1 + ((data.player_damage - PLAYER_INITIAL_DAMAGE).max(0.0)
            / UPGRADE_INCREASE_DAMAGE)
            .round() as u32;
        self.economy.score = data.score;
        self.economy.max_coins = data.max_coins;
        self.economy.magnet_level = data.magnet_level;
        self.waves.reconcile(data.current_wave, data.current_world);
        self.push_hud();
    }

    // --- Shop boundary ---

    /// Buy one upgrade level; rejected without mutation when short on score
    pub fn purchase(&mut self, kind: UpgradeKind) -> bool {
        let level = match kind {
            UpgradeKind::Speed => self.player.speed_level,
            UpgradeKind::MaxHealth => self.player.health_level,
            UpgradeKind::Damage => self.player.damage_level,
            // Loaded saves may carry a cap below the initial constant
            UpgradeKind::MaxCoins => self.economy.max_coins.saturating_sub(INITIAL_MAX_COINS) + 1,
            UpgradeKind::Magnet => self.economy.magnet_level,
        };
        let cost = shop::price(kind, level);
        if !self.economy.spend(cost, &mut *self.hud) {
            return false;
        }
        match kind {
            UpgradeKind::Speed => self.player.upgrade_speed(UPGRADE_INCREASE_SPEED),
            UpgradeKind::MaxHealth => {
                self.player.upgrade_max_health(UPGRADE_INCREASE_MAX_HEALTH);
                self.hud.update_health(self.player.health, self.player.max_health);
            }
            UpgradeKind::Damage => self.player.upgrade_damage(UPGRADE_INCREASE_DAMAGE),
            UpgradeKind::MaxCoins => self.economy.upgrade_max_coins(),
            UpgradeKind::Magnet => self.economy.upgrade_magnet(),
        }
        log::debug!("purchased {:?} for {}", kind, cost);
        true
    }

    // --- Tick stages ---

    fn move_player(&mut self, dir: Vec2, dt: f32) {
        let dir = dir.normalize_or_zero();
        self.player.pos += dir * self.player.speed * dt;
        self.player.pos.x = self.player.pos.x.clamp(0.0, GAME_WIDTH);
        self.player.pos.y = self.player.pos.y.clamp(0.0, GAME_HEIGHT);
    }

    /// Enemy behaviors: Contact chases, ranged kinds kite and fire
    fn step_enemies(&mut self, dt: f32) {
        let ppos = self.player.pos;
        let now = self.now;
        let mut shots: Vec<(u32, Vec2, f32, f32)> = Vec::new();

        for e in &mut self.waves.enemies {
            if !e.alive {
                continue;
            }
            let to_player = ppos - e.pos;
            let dist = to_player.length();
            let dir = if dist > 0.0 { to_player / dist } else { Vec2::ZERO };

            if e.kind.is_ranged() {
                if dist < SHOOTER_FLEE_DISTANCE {
                    e.pos -= dir * e.speed * dt;
                }
                // Fires on cadence regardless of movement state
                if now > e.last_shot + e.fire_interval {
                    e.last_shot = now;
                    shots.push((e.id, e.pos, e.damage, e.shot_speed));
                }
            } else {
                e.pos += dir * e.speed * dt;
            }
            e.pos.x = e.pos.x.clamp(0.0, GAME_WIDTH);
            e.pos.y = e.pos.y.clamp(0.0, GAME_HEIGHT);
        }

        for (shooter, pos, damage, speed) in shots {
            let dir = (ppos - pos).normalize_or_zero();
            let id = self.alloc_projectile_id();
            let mut p = Projectile::new(id, pos, dir * speed, damage, Side::Enemy, SHOOTER_SHOT_TTL);
            p.shooter = Some(shooter);
            self.projectiles.push(p);
        }
    }

    fn alloc_projectile_id(&mut self) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        id
    }

    /// Attack with the equipped weapon toward the aim point
    fn player_attack(&mut self, aim: Vec2) {
        let now = self.now;
        let weapon = self.arsenal.current();
        if !weapon.try_attack(now) {
            return;
        }
        let spec = weapon.spec;
        let damage = spec.damage_mult * self.player.damage;

        match spec.kind {
            WeaponKind::Pistol => {
                let base = (aim - self.player.pos).to_angle();
                for _ in 0..spec.pellets {
                    let angle = base + self.rng.random_range(-0.5..0.5) * spec.spread;
                    let dir = Vec2::from_angle(angle);
                    let id = self.alloc_projectile_id();
                    self.projectiles.push(Projectile::new(
                        id,
                        self.player.pos,
                        dir * spec.shot_speed,
                        damage,
                        Side::Player,
                        BULLET_TTL,
                    ));
                }
            }
            WeaponKind::Sword => {
                // One swing hits the nearest living enemy inside the box
                let dir = (aim - self.player.pos).normalize_or_zero();
                let center = self.player.pos + dir * spec.reach;
                let target = self
                    .waves
                    .enemies
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| {
                        e.alive
                            && (e.pos.x - center.x).abs() <= spec.hitbox_w / 2.0
                            && (e.pos.y - center.y).abs() <= spec.hitbox_h / 2.0
                    })
                    .min_by(|(_, a), (_, b)| {
                        a.pos
                            .distance_squared(center)
                            .partial_cmp(&b.pos.distance_squared(center))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map(|(i, _)| i);
                if let Some(i) = target {
                    let outcome = combat::damage_enemy(&mut self.waves.enemies[i], damage);
                    let e = &self.waves.enemies[i];
                    let (id, kind, pos) = (e.id, e.kind, e.pos);
                    match outcome {
                        DamageOutcome::Hit => self.events.push(GameEvent::EnemyHit { id }),
                        DamageOutcome::Died => self.on_enemy_down(id, kind, pos),
                        DamageOutcome::Ignored => {}
                    }
                }
            }
        }
    }

    // --- Overlap resolution ---

    fn resolve_overlap(&mut self, ov: Overlap) {
        match ov {
            Overlap::PlayerCoin { coin } => {
                self.economy.collect(coin, &mut *self.hud);
            }
            Overlap::PlayerEnemy { enemy } => {
                let Some(e) = self.waves.enemies.iter().find(|e| e.id == enemy && e.alive) else {
                    return;
                };
                let damage = e.damage;
                self.hit_player(damage);
            }
            Overlap::ProjectileEnemy { projectile, enemy } => {
                let Some(p) = self
                    .projectiles
                    .iter_mut()
                    .find(|p| p.id == projectile && p.active)
                else {
                    return;
                };
                // Enemy shots pass through enemies; the shooter handle
                // additionally guards against self-damage
                if p.side != Side::Player || p.shooter == Some(enemy) {
                    return;
                }
                let Some(i) = self.waves.enemies.iter().position(|e| e.id == enemy && e.alive)
                else {
                    return;
                };
                let damage = p.damage;
                p.active = false;
                let outcome = combat::damage_enemy(&mut self.waves.enemies[i], damage);
                let e = &self.waves.enemies[i];
                let (id, kind, pos) = (e.id, e.kind, e.pos);
                match outcome {
                    DamageOutcome::Hit => self.events.push(GameEvent::EnemyHit { id }),
                    DamageOutcome::Died => self.on_enemy_down(id, kind, pos),
                    DamageOutcome::Ignored => {}
                }
            }
            Overlap::PlayerProjectile { projectile } => {
                let Some(p) = self
                    .projectiles
                    .iter_mut()
                    .find(|p| p.id == projectile && p.active)
                else {
                    return;
                };
                if p.side != Side::Enemy {
                    return;
                }
                let damage = p.damage;
                // Consumed whether or not the hit cooldown absorbs it
                p.active = false;
                self.hit_player(damage);
            }
            Overlap::PlayerCrate { crate_id } => {
                if self.waves.open_crate(crate_id) {
                    let kind = if self.rng.random_bool(0.5) {
                        WeaponKind::Pistol
                    } else {
                        WeaponKind::Sword
                    };
                    let spec = weapons::random_variation(kind, &mut self.rng);
                    self.arsenal.install(spec);
                    self.hud.update_weapon(spec.name);
                    self.events.push(GameEvent::WeaponFound {
                        name: spec.name,
                        kind: spec.kind,
                    });
                    log::info!("weapon found: {}", spec.name);
                }
            }
        }
    }

    fn hit_player(&mut self, damage: f32) {
        match combat::damage_player(&mut self.player, damage, self.now) {
            DamageOutcome::Hit => {
                self.events.push(GameEvent::PlayerHit);
                self.hud.update_health(self.player.health, self.player.max_health);
            }
            DamageOutcome::Died => {
                self.hud.update_health(0.0, self.player.max_health);
                self.events.push(GameEvent::PlayerDied);
                self.phase = SessionPhase::GameOver;
                log::info!("player died on wave {}", self.waves.wave);
            }
            DamageOutcome::Ignored => {}
        }
    }

    /// Single reaction point for an enemy death: reward, notification, and
    /// the world transition when the boss falls
    fn on_enemy_down(&mut self, id: u32, kind: EnemyKind, pos: Vec2) {
        let reward = self.economy.coin_value * 2 + self.waves.wave * 2;
        self.economy.reward(reward, &mut *self.hud);
        self.events.push(GameEvent::EnemyDied { id, kind, pos });
        log::debug!("enemy #{id} down (+{reward})");

        if self.waves.boss_id == Some(id) {
            self.waves.boss_defeated(pos);
            self.hud.update_wave(self.waves.wave);
        }
    }

    fn push_hud(&mut self) {
        self.hud.update_score(self.economy.score);
        self.hud.update_health(self.player.health, self.player.max_health);
        self.hud.update_wave(self.waves.wave);
        let name = match self.arsenal.equipped {
            WeaponKind::Pistol => self.arsenal.pistol.spec.name,
            WeaponKind::Sword => self.arsenal.sword.spec.name,
        };
        self.hud.update_weapon(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::NullHud;
    use crate::persistence::{MemoryStore, SaveStore};
    use crate::stats::Enemy;

    const DT: f64 = 1.0 / 60.0;

    fn session() -> Session {
        Session::new(42, Box::new(NullHud), Box::new(MemoryStore::default()))
    }

    fn push_enemy(s: &mut Session, id: u32, kind: EnemyKind, pos: Vec2) {
        s.waves.enemies.push(Enemy::new(
            id,
            kind,
            pos,
            s.waves.base_health,
            s.waves.base_speed,
            s.waves.base_damage,
        ));
    }

    #[test]
    fn test_contact_hit_then_kill_scenario() {
        let mut s = session();
        let ppos = s.player.pos;
        push_enemy(&mut s, 100, EnemyKind::Contact, ppos + Vec2::new(10.0, 0.0));

        // Contact overlap: 10 damage through the fresh hit window
        let input = TickInput {
            overlaps: vec![Overlap::PlayerEnemy { enemy: 100 }],
            ..Default::default()
        };
        s.tick(&input, DT);
        assert_eq!(s.player.health, 90.0);
        assert_eq!(s.economy.score, 0);

        // 100 damage kills the 30 hp baseline enemy
        let pid = 900;
        s.projectiles.push(Projectile::new(
            pid,
            s.waves.enemies[0].pos,
            Vec2::ZERO,
            100.0,
            Side::Player,
            10.0,
        ));
        let input = TickInput {
            overlaps: vec![Overlap::ProjectileEnemy { projectile: pid, enemy: 100 }],
            ..Default::default()
        };
        s.tick(&input, DT);

        let events = s.drain_events();
        let deaths = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDied { id: 100, .. }))
            .count();
        assert_eq!(deaths, 1);
        // Kill reward at wave 0: coin_value * 2
        assert_eq!(s.economy.score, COIN_POINTS_VALUE * 2);
        // Swept
        assert!(s.waves.enemies.is_empty());
    }

    #[test]
    fn test_wave_timer_advances_wave() {
        let mut s = session();
        s.tick(&TickInput::default(), WAVE_INTERVAL);
        assert_eq!(s.waves.wave, 1);
    }

    #[test]
    fn test_enemy_projectile_hits_player_once() {
        let mut s = session();
        let pid = 900;
        s.projectiles.push(Projectile::new(
            pid,
            s.player.pos,
            Vec2::ZERO,
            10.0,
            Side::Enemy,
            10.0,
        ));
        let input = TickInput {
            overlaps: vec![
                Overlap::PlayerProjectile { projectile: pid },
                // Duplicate report the same frame: projectile already consumed
                Overlap::PlayerProjectile { projectile: pid },
            ],
            ..Default::default()
        };
        s.tick(&input, DT);
        assert_eq!(s.player.health, 90.0);
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_player_bullets_ignore_player_overlap() {
        let mut s = session();
        let pid = 900;
        s.projectiles.push(Projectile::new(
            pid,
            s.player.pos,
            Vec2::ZERO,
            50.0,
            Side::Player,
            10.0,
        ));
        let input = TickInput {
            overlaps: vec![Overlap::PlayerProjectile { projectile: pid }],
            ..Default::default()
        };
        s.tick(&input, DT);
        assert_eq!(s.player.health, 100.0);
    }

    #[test]
    fn test_player_death_stops_ticks_until_reset() {
        let mut s = session();
        s.player.health = 5.0;
        let ppos = s.player.pos;
        push_enemy(&mut s, 100, EnemyKind::Contact, ppos);
        let input = TickInput {
            overlaps: vec![Overlap::PlayerEnemy { enemy: 100 }],
            ..Default::default()
        };
        s.tick(&input, DT);
        assert_eq!(s.phase, SessionPhase::GameOver);
        assert!(s.drain_events().contains(&GameEvent::PlayerDied));

        let clock = s.now();
        s.tick(&TickInput::default(), DT);
        assert_eq!(s.now(), clock);

        s.reset();
        assert_eq!(s.phase, SessionPhase::Running);
        assert_eq!(s.player.health, PLAYER_INITIAL_HEALTH);
        assert_eq!(s.economy.score, 0);
        assert_eq!(s.waves.wave, 0);
    }

    #[test]
    fn test_sword_swing_hits_single_nearest_enemy() {
        let mut s = session();
        s.arsenal.equip(WeaponKind::Sword);
        let ppos = s.player.pos;
        // Two enemies inside the short sword box at reach 40
        push_enemy(&mut s, 1, EnemyKind::Contact, ppos + Vec2::new(38.0, 0.0));
        push_enemy(&mut s, 2, EnemyKind::Contact, ppos + Vec2::new(50.0, 0.0));
        s.player.damage = 1.0;

        let input = TickInput {
            aim: ppos + Vec2::new(100.0, 0.0),
            fire: true,
            ..Default::default()
        };
        s.tick(&input, DT);

        let hit: Vec<_> = s
            .waves
            .enemies
            .iter()
            .filter(|e| e.health < e.max_health)
            .collect();
        assert_eq!(hit.len(), 1);
    }

    #[test]
    fn test_pistol_fire_spawns_pellets() {
        let mut s = session();
        s.arsenal.install(&crate::weapons::PISTOLS[3]); // shotgun, 5 pellets
        let input = TickInput {
            aim: s.player.pos + Vec2::new(100.0, 0.0),
            fire: true,
            ..Default::default()
        };
        s.tick(&input, DT);
        assert_eq!(s.projectiles.len(), 5);
        assert!(s.projectiles.iter().all(|p| p.side == Side::Player));

        // Cooldown holds on the next frame
        s.tick(&input, DT);
        assert_eq!(s.projectiles.len(), 5);
    }

    #[test]
    fn test_shooter_fires_on_cadence() {
        let mut s = session();
        let ppos = s.player.pos;
        // Far enough not to flee, close enough to matter
        push_enemy(&mut s, 7, EnemyKind::Shooter, ppos + Vec2::new(250.0, 0.0));
        s.tick(&TickInput::default(), DT);
        assert_eq!(s.projectiles.len(), 1);
        assert_eq!(s.projectiles[0].side, Side::Enemy);
        assert_eq!(s.projectiles[0].shooter, Some(7));

        // Within the fire interval: no second shot
        s.tick(&TickInput::default(), DT);
        assert_eq!(s.projectiles.len(), 1);
    }

    #[test]
    fn test_crate_pickup_equips_and_emits() {
        let mut s = session();
        s.waves.crates.push(crate::waves::RewardCrate {
            id: 5,
            pos: s.player.pos,
            active: true,
        });
        let input = TickInput {
            overlaps: vec![Overlap::PlayerCrate { crate_id: 5 }],
            ..Default::default()
        };
        s.tick(&input, DT);

        let events = s.drain_events();
        let found = events.iter().find_map(|e| match e {
            GameEvent::WeaponFound { name, kind } => Some((*name, *kind)),
            _ => None,
        });
        let (name, kind) = found.expect("WeaponFound emitted");
        assert_eq!(s.arsenal.equipped, kind);
        assert_eq!(s.arsenal.current().spec.name, name);
        assert!(s.waves.crates.is_empty());

        // Second report of the same crate is a no-op
        s.tick(&input, DT);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_purchase_flow() {
        let mut s = session();
        // Can't afford anything at score 0
        assert!(!s.purchase(UpgradeKind::Speed));
        assert_eq!(s.player.speed_level, 1);

        s.economy.score = 1000;
        assert!(s.purchase(UpgradeKind::Speed));
        assert_eq!(s.player.speed_level, 2);
        assert_eq!(s.player.speed, PLAYER_INITIAL_SPEED + UPGRADE_INCREASE_SPEED);
        assert_eq!(s.economy.score, 1000 - UPGRADE_COST_SPEED_INITIAL);

        assert!(s.purchase(UpgradeKind::Magnet));
        assert_eq!(s.economy.magnet_level, 1);
        assert!(s.purchase(UpgradeKind::MaxCoins));
        assert_eq!(s.economy.max_coins, INITIAL_MAX_COINS + 1);
    }

    #[test]
    fn test_save_resume_round_trip() {
        let mut s = session();
        s.economy.score = 300;
        for _ in 0..3 {
            s.purchase(UpgradeKind::Speed);
        }
        // Live progression to world 2, wave 13
        for _ in 0..10 {
            s.waves.advance_wave();
        }
        let boss_pos = s.waves.boss().unwrap().pos;
        s.waves.boss_defeated(boss_pos);
        for _ in 0..3 {
            s.waves.advance_wave();
        }
        let bases = (
            s.waves.base_health,
            s.waves.base_speed,
            s.waves.base_damage,
            s.waves.max_on_screen,
        );
        let speed = s.player.speed;
        let score = s.economy.score;
        s.save_now();

        s.reset();
        assert_eq!(s.waves.wave, 0);
        s.resume();
        assert_eq!((s.waves.wave, s.waves.world), (13, 2));
        assert_eq!(
            (
                s.waves.base_health,
                s.waves.base_speed,
                s.waves.base_damage,
                s.waves.max_on_screen
            ),
            bases
        );
        assert_eq!(s.player.speed, speed);
        assert_eq!(s.player.speed_level, 4);
        assert_eq!(s.economy.score, score);
    }

    #[test]
    fn test_resume_tolerates_low_max_coins() {
        // A host-supplied save may carry a coin cap below the fresh-game
        // default; the next MaxCoins purchase prices from level 1
        let mut store = MemoryStore::default();
        store.store(SAVE_KEY, r#"{"maxCoins": 1, "score": 10000}"#);
        let mut s = Session::new(42, Box::new(NullHud), Box::new(store));
        s.resume();
        assert_eq!(s.economy.max_coins, 1);

        assert!(s.purchase(UpgradeKind::MaxCoins));
        assert_eq!(s.economy.max_coins, 2);
        assert_eq!(s.economy.score, 10000 - UPGRADE_COST_COINS_INITIAL);
    }

    #[test]
    fn test_boss_kill_through_session() {
        let mut s = session();
        for _ in 0..10 {
            s.waves.advance_wave();
        }
        let boss_id = s.waves.boss_id.unwrap();
        let boss_health = s.waves.boss().unwrap().health;
        let pid = 900;
        s.projectiles.push(Projectile::new(
            pid,
            Vec2::ZERO,
            Vec2::ZERO,
            boss_health,
            Side::Player,
            10.0,
        ));
        let input = TickInput {
            overlaps: vec![Overlap::ProjectileEnemy { projectile: pid, enemy: boss_id }],
            ..Default::default()
        };
        s.tick(&input, DT);

        assert_eq!(s.waves.world, 2);
        assert!(s.waves.boss_id.is_none());
        assert_eq!(s.waves.crates.len(), 1);
        let events = s.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDied { kind: EnemyKind::Boss, .. }
        )));
    }
}
