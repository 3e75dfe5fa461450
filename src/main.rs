//! Wavebound headless demo
//!
//! A stand-in host: runs a self-playing session at a fixed timestep,
//! synthesizes overlap reports from entity distances (a real host gets
//! these from its physics engine), and logs HUD updates and game events.
//! `RUST_LOG=debug` shows spawns, purchases, and autosaves.

use glam::Vec2;

use wavebound::config::*;
use wavebound::{
    FileStore, GameEvent, HudSink, Overlap, Session, SessionPhase, TickInput, UpgradeKind,
};

/// Overlap radii used by this stand-in host
const PICKUP_RADIUS: f32 = 24.0;
const CONTACT_RADIUS: f32 = 24.0;
const PROJECTILE_RADIUS: f32 = 12.0;

const DT: f64 = 1.0 / 60.0;
const DEMO_SECONDS: f64 = 120.0;

/// HUD sink that logs every update
struct LogHud;

impl HudSink for LogHud {
    fn update_score(&mut self, score: u32) {
        log::info!("[hud] score {score}");
    }
    fn update_health(&mut self, health: f32, max_health: f32) {
        log::info!("[hud] health {health:.0}/{max_health:.0}");
    }
    fn update_wave(&mut self, wave: u32) {
        log::info!("[hud] wave {wave}");
    }
    fn update_weapon(&mut self, name: &str) {
        log::info!("[hud] weapon {name}");
    }
}

fn main() {
    env_logger::init();

    let store = FileStore::new(std::env::temp_dir());
    let mut session = Session::new(0xC0FFEE, Box::new(LogHud), Box::new(store));
    session.resume();

    let mut frames = 0u64;
    while session.now() < DEMO_SECONDS {
        let input = decide_input(&session);
        session.tick(&input, DT);

        for event in session.drain_events() {
            match event {
                GameEvent::EnemyDied { id, kind, .. } => log::info!("{kind:?} #{id} destroyed"),
                GameEvent::PlayerDied => log::info!("game over"),
                GameEvent::WeaponFound { name, .. } => log::info!("picked up {name}"),
                GameEvent::EnemyHit { .. } | GameEvent::PlayerHit => {}
            }
        }

        if session.phase == SessionPhase::GameOver {
            session.reset();
        }

        // Spend surplus score on upgrades now and then
        frames += 1;
        if frames % 300 == 0 {
            for kind in [
                UpgradeKind::Damage,
                UpgradeKind::Magnet,
                UpgradeKind::Speed,
                UpgradeKind::MaxHealth,
                UpgradeKind::MaxCoins,
            ] {
                if session.purchase(kind) {
                    break;
                }
            }
        }
    }

    session.save_now();
    log::info!(
        "demo finished: wave {} world {} score {}",
        session.waves.wave,
        session.waves.world,
        session.economy.score
    );
}

/// Minimal self-playing policy: chase the nearest coin, aim at the nearest
/// enemy, fire constantly, and report proximity overlaps.
fn decide_input(session: &Session) -> TickInput {
    let ppos = session.player.pos;

    let nearest_coin = session
        .economy
        .coins
        .iter()
        .filter(|c| c.active)
        .min_by(|a, b| dist_cmp(a.pos, b.pos, ppos))
        .map(|c| c.pos);
    let nearest_enemy = session
        .waves
        .enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| dist_cmp(a.pos, b.pos, ppos))
        .map(|e| e.pos);

    // Run for coins, back away from a close enemy
    let mut target = nearest_coin.unwrap_or(Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0));
    if let Some(epos) = nearest_enemy {
        if epos.distance(ppos) < 120.0 {
            target = ppos + (ppos - epos);
        }
    }
    let delta = target - ppos;
    let move_dir = Vec2::new(
        if delta.x.abs() > 4.0 { delta.x.signum() } else { 0.0 },
        if delta.y.abs() > 4.0 { delta.y.signum() } else { 0.0 },
    );

    let mut overlaps = Vec::new();
    for coin in session.economy.coins.iter().filter(|c| c.active) {
        if coin.pos.distance(ppos) <= PICKUP_RADIUS {
            overlaps.push(Overlap::PlayerCoin { coin: coin.id });
        }
    }
    for enemy in session.waves.enemies.iter().filter(|e| e.alive) {
        if enemy.pos.distance(ppos) <= CONTACT_RADIUS {
            overlaps.push(Overlap::PlayerEnemy { enemy: enemy.id });
        }
        for p in session.projectiles.iter().filter(|p| p.active) {
            if p.pos.distance(enemy.pos) <= PROJECTILE_RADIUS {
                overlaps.push(Overlap::ProjectileEnemy {
                    projectile: p.id,
                    enemy: enemy.id,
                });
            }
        }
    }
    for p in session.projectiles.iter().filter(|p| p.active) {
        if p.pos.distance(ppos) <= PROJECTILE_RADIUS {
            overlaps.push(Overlap::PlayerProjectile { projectile: p.id });
        }
    }
    for c in session.waves.crates.iter().filter(|c| c.active) {
        if c.pos.distance(ppos) <= PICKUP_RADIUS {
            overlaps.push(Overlap::PlayerCrate { crate_id: c.id });
        }
    }

    TickInput {
        move_dir,
        aim: nearest_enemy.unwrap_or(target),
        fire: nearest_enemy.is_some(),
        equip: None,
        overlaps,
    }
}

fn dist_cmp(a: Vec2, b: Vec2, to: Vec2) -> std::cmp::Ordering {
    a.distance_squared(to)
        .partial_cmp(&b.distance_squared(to))
        .unwrap_or(std::cmp::Ordering::Equal)
}
