//! Simulation tick
//!
//! Core game loop step plus the lifecycle commands (fire, reset, countdown).

use super::collision::{TrackedRegion, first_rocket_hit, resolve_projectile_hits};
use super::config::FrameModel;
use super::spawn::spawn_hazards;
use super::state::{Explosion, GameEvent, GamePhase, GameState, Projectile, Rocket, Viewport};
use crate::consts::*;
use crate::frames_in;

/// Input snapshot for a single tick
///
/// Turning is level-triggered (held); `fire` and `restart` are one-shot and
/// must only be set on the tick following the key press.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub restart: bool,
}

impl TickInput {
    /// -1 for left, +1 for right, 0 when neither or both are held
    pub fn turn_axis(&self) -> f32 {
        match (self.turn_left, self.turn_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;
    let frames = frames_in(dt);

    // Age before anything new is created so fresh explosions are seen at frame 0.
    // Runs in every phase so the game-over explosion keeps fading.
    for explosion in &mut state.explosions {
        explosion.frame += 1;
    }
    state.explosions.retain(|e| !e.expired());

    match state.phase {
        GamePhase::Menu => {}

        GamePhase::Countdown => {
            state.countdown_ms -= dt * 1000.0;
            if state.countdown_ms <= 0.0 {
                state.countdown_ms = 0.0;
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::CountdownFinished);
                log::info!("Countdown finished, go!");
            }
        }

        GamePhase::Playing => {
            if input.fire {
                fire(state);
            }
            step_playing(state, input, dt, frames);
        }

        GamePhase::GameOver => {
            if input.restart {
                start_countdown(state);
            }
        }
    }

    if state.phase != GamePhase::Menu {
        scroll_background(state, frames);
    }
}

/// One gameplay step while `Playing`
fn step_playing(state: &mut GameState, input: &TickInput, dt: f32, frames: f32) {
    // Steering and forward motion
    let turn_model = state.config.turn_model;
    state.rocket.steer(input.turn_axis(), turn_model, frames);
    state.rocket.advance(frames);
    if state.config.frame == FrameModel::ScreenFixed {
        state.rocket.confine(&state.viewport);
    }
    state.update_camera();

    // New hazards
    state.clock_ms += (dt * 1000.0) as f64;
    spawn_hazards(state, dt);

    // Hazards fall, projectiles fly along their fired heading
    for asteroid in &mut state.asteroids {
        asteroid.fall(frames);
    }
    for projectile in &mut state.projectiles {
        projectile.advance(frames);
    }

    // Projectiles vs asteroids
    for hit in resolve_projectile_hits(&mut state.asteroids, &mut state.projectiles) {
        state.score += hit.points;
        log::debug!(
            "Projectile #{} destroyed asteroid #{} (+{})",
            hit.projectile_id,
            hit.asteroid_id,
            hit.points
        );
        state.events.push(GameEvent::AsteroidDestroyed {
            id: hit.asteroid_id,
            cluster: hit.cluster,
            points: hit.points,
        });
    }

    // Surviving asteroids vs rocket; one collision ends the run
    if first_rocket_hit(&state.asteroids, state.rocket.pos).is_some() {
        state.explosions.push(Explosion::new(state.rocket.pos));
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::RocketDestroyed { score: state.score });
        log::info!("Rocket destroyed, final score {}", state.score);
    }

    cull_untracked(state);
}

/// Drop asteroids and projectiles that left the tracked region
fn cull_untracked(state: &mut GameState) {
    let region = tracked_region(state);
    state.asteroids.retain(|a| region.contains(a.pos));
    state.projectiles.retain(|p| region.contains(p.pos));
}

/// Area around the current view in which entities are kept alive
pub fn tracked_region(state: &GameState) -> TrackedRegion {
    TrackedRegion::around_view(state.camera, state.viewport.size(), TRACK_MARGIN)
}

fn scroll_background(state: &mut GameState, frames: f32) {
    let height = state.viewport.height();
    state.background_offset = (state.background_offset + BACKGROUND_SCROLL * frames) % height;
}

/// Fire one projectile from the rocket's nose. Ignored unless `Playing`.
pub fn fire(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: state.rocket.nose(),
        angle: state.rocket.angle,
        speed: PROJECTILE_SPEED,
    });
}

/// Clear the field and restore the rocket, leaving the run in `Menu`
pub fn reset(state: &mut GameState) {
    state.asteroids.clear();
    state.projectiles.clear();
    state.explosions.clear();
    state.score = 0;
    state.rocket = Rocket::at_start(&state.viewport);
    state.update_camera();
    // Timers restart from now so the next spawn waits a full interval
    state.last_asteroid_ms = state.clock_ms;
    state.last_cluster_ms = state.clock_ms;
    state.background_offset = 0.0;
    state.phase = GamePhase::Menu;
}

/// Reset and begin the pre-game countdown
pub fn start_countdown(state: &mut GameState) {
    reset(state);
    state.countdown_ms = state.config.countdown_ms.max(0.0);
    state.phase = GamePhase::Countdown;
    log::info!("Starting countdown ({} ms)", state.countdown_ms);
}

/// Apply a new viewport size without touching any entity
pub fn set_viewport(state: &mut GameState, width: f32, height: f32) {
    state.viewport = Viewport::new(width, height);
    state.background_offset %= state.viewport.height();
    state.update_camera();
}
