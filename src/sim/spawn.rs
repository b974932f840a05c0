//! Hazard spawning
//!
//! Two independent schedules, one for plain asteroids and one for clusters.
//! New hazards appear at a random x across the view, a fixed distance above
//! its top edge, so they always drift into sight from above.

use glam::Vec2;
use rand::Rng;

use super::config::SpawnModel;
use super::state::GameState;
use crate::consts::*;

/// Which hazard a schedule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Asteroid,
    Cluster,
}

impl HazardKind {
    fn interval_ms(self) -> f64 {
        match self {
            HazardKind::Asteroid => ASTEROID_INTERVAL_MS as f64,
            HazardKind::Cluster => CLUSTER_INTERVAL_MS as f64,
        }
    }

    fn chance_per_frame(self) -> f32 {
        match self {
            HazardKind::Asteroid => ASTEROID_SPAWN_CHANCE,
            HazardKind::Cluster => CLUSTER_SPAWN_CHANCE,
        }
    }

    fn spawn_offset(self) -> f32 {
        match self {
            HazardKind::Asteroid => ASTEROID_SPAWN_OFFSET,
            HazardKind::Cluster => CLUSTER_SPAWN_OFFSET,
        }
    }
}

/// Run both schedules for a tick that advanced the play clock by `dt` seconds
pub fn spawn_hazards(state: &mut GameState, dt: f32) {
    for kind in [HazardKind::Asteroid, HazardKind::Cluster] {
        if should_spawn(state, kind, dt) {
            spawn(state, kind);
        }
    }
}

fn should_spawn(state: &mut GameState, kind: HazardKind, dt: f32) -> bool {
    match state.config.spawn_model {
        SpawnModel::Interval => {
            let last = match kind {
                HazardKind::Asteroid => &mut state.last_asteroid_ms,
                HazardKind::Cluster => &mut state.last_cluster_ms,
            };
            if state.clock_ms - *last > kind.interval_ms() {
                *last = state.clock_ms;
                true
            } else {
                false
            }
        }
        SpawnModel::Probabilistic => {
            // Same per-frame odds regardless of how many frames this tick covers
            let p = 1.0 - (1.0 - kind.chance_per_frame()).powf(crate::frames_in(dt));
            state.rng().random_bool(p.clamp(0.0, 1.0) as f64)
        }
    }
}

/// Create one hazard above the current view, returning its id
pub fn spawn(state: &mut GameState, kind: HazardKind) -> u32 {
    let viewport = state.viewport;
    let camera = state.camera;
    let rng = state.rng();
    let x = camera.x + rng.random::<f32>() * viewport.width();
    let variant = rng.random_range(0..HAZARD_VARIANTS);
    let pos = Vec2::new(x, camera.y - kind.spawn_offset());

    let id = state.push_asteroid(pos, kind == HazardKind::Cluster, variant);
    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    id
}
