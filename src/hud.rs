//! HUD sink boundary
//!
//! The core pushes score/health/wave/weapon updates out through this trait;
//! the host renders them however it likes.

/// Receiver for HUD updates
pub trait HudSink {
    fn update_score(&mut self, score: u32);
    fn update_health(&mut self, health: f32, max_health: f32);
    fn update_wave(&mut self, wave: u32);
    fn update_weapon(&mut self, name: &str);
}

/// Discards every update; for tests and headless runs
#[derive(Debug, Default)]
pub struct NullHud;

impl HudSink for NullHud {
    fn update_score(&mut self, _score: u32) {}
    fn update_health(&mut self, _health: f32, _max_health: f32) {}
    fn update_wave(&mut self, _wave: u32) {}
    fn update_weapon(&mut self, _name: &str) {}
}
