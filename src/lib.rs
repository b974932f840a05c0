//! Rocket Drift - A vertically scrolling rocket-vs-asteroids shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, run state)
//! - `input`: Keyboard mapping with level/edge semantics
//! - `assets`: Sprite manifest and preload tracking
//! - `settings`: Player preferences and simulation policy selection

pub mod assets;
pub mod input;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, AssetManifest, Preloader};
pub use input::{Control, InputState};
pub use settings::{Preset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Rates are expressed per reference frame (60 Hz) and scaled by elapsed time
/// inside the simulation.
pub mod consts {
    /// Frame rate the per-frame constants below were tuned at
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Fixed simulation timestep (one reference frame)
    pub const SIM_DT: f32 = 1.0 / REFERENCE_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Rocket forward speed (units per frame, the rocket never stops)
    pub const ROCKET_SPEED: f32 = 4.8;
    /// Start height as a fraction of the viewport height
    pub const ROCKET_START_Y_FRACTION: f32 = 0.7;
    /// Heading change per frame with instant turning (radians)
    pub const TURN_RATE: f32 = 0.055;
    /// Angular velocity gained per frame with inertial turning (radians)
    pub const TURN_ACCEL: f32 = 0.004;
    /// Multiplicative angular velocity decay per frame
    pub const TURN_DAMPING: f32 = 0.95;

    /// Distance from rocket center to its nose, where projectiles appear
    pub const NOSE_OFFSET: f32 = 45.0;
    pub const PROJECTILE_SPEED: f32 = 11.0;

    /// Sprite scale applied to hazard sizes
    pub const SPRITE_SCALE: f32 = 1.75;
    pub const ASTEROID_SIZE: f32 = 55.0 * SPRITE_SCALE;
    pub const ASTEROID_FALL_SPEED: f32 = 2.5;
    /// How far above the top of the view plain asteroids appear
    pub const ASTEROID_SPAWN_OFFSET: f32 = 120.0;
    pub const CLUSTER_SIZE: f32 = 130.0 * SPRITE_SCALE;
    pub const CLUSTER_FALL_SPEED: f32 = 1.6;
    pub const CLUSTER_SPAWN_OFFSET: f32 = 180.0;
    /// Number of interchangeable sprites per hazard kind
    pub const HAZARD_VARIANTS: u8 = 2;

    /// Interval spawning thresholds (milliseconds of play time)
    pub const ASTEROID_INTERVAL_MS: f32 = 800.0;
    pub const CLUSTER_INTERVAL_MS: f32 = 2800.0;
    /// Probabilistic spawning chances per frame (~same mean rate as the intervals)
    pub const ASTEROID_SPAWN_CHANCE: f32 = 0.02;
    pub const CLUSTER_SPAWN_CHANCE: f32 = 0.006;

    pub const COUNTDOWN_MS: f32 = 3000.0;
    /// Explosion lifetime in ticks; removed once the counter exceeds this
    pub const EXPLOSION_FRAMES: u32 = 20;

    pub const SCORE_ASTEROID: u64 = 10;
    pub const SCORE_CLUSTER: u64 = 50;

    /// Entities further than this outside the view are discarded
    pub const TRACK_MARGIN: f32 = 300.0;
    /// Screen-fixed mode keeps the rocket this far from the top/bottom edges
    pub const SAFE_BAND_MARGIN: f32 = 40.0;

    /// Background scroll per frame (cosmetic)
    pub const BACKGROUND_SCROLL: f32 = 2.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector along a heading
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    polar_to_cartesian(1.0, theta)
}

/// Number of reference frames covered by `dt` seconds
#[inline]
pub fn frames_in(dt: f32) -> f32 {
    dt * consts::REFERENCE_HZ
}
