//! Simulation policy selection
//!
//! Each behaviour that varied between revisions of the game has exactly one
//! canonical policy per run, chosen here.

use serde::{Deserialize, Serialize};

use crate::consts::COUNTDOWN_MS;

/// How steering input changes the rocket heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnModel {
    /// Fixed heading change per frame while a turn key is held
    Instant,
    /// Turn keys accelerate an angular velocity that decays every frame
    #[default]
    Inertial,
}

/// How new hazards are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnModel {
    /// Spawn when enough play time has passed since the last spawn
    #[default]
    Interval,
    /// Independent Bernoulli trial per frame
    Probabilistic,
}

/// Coordinate frame the rocket flies in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameModel {
    /// World equals screen; rocket wraps horizontally and is held in a vertical band
    ScreenFixed,
    /// Unbounded world; the camera is centered on the rocket
    #[default]
    CameraFollow,
}

/// Per-run simulation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub turn_model: TurnModel,
    pub spawn_model: SpawnModel,
    pub frame: FrameModel,
    /// Countdown length before play starts (0 starts on the next tick)
    pub countdown_ms: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            turn_model: TurnModel::default(),
            spawn_model: SpawnModel::default(),
            frame: FrameModel::default(),
            countdown_ms: COUNTDOWN_MS,
        }
    }
}
