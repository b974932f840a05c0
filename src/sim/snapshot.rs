//! Read-only view of the simulation for renderers
//!
//! Positions are in world coordinates; subtract `camera` to get screen
//! coordinates.

use serde::Serialize;

use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocketView {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AsteroidView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub variant: u8,
    pub cluster: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileView {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExplosionView {
    pub x: f32,
    pub y: f32,
    /// Opacity, fading linearly to 0
    pub alpha: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub countdown_remaining_ms: f32,
    pub camera: [f32; 2],
    pub viewport: [f32; 2],
    pub background_offset: f32,
    pub rocket: RocketView,
    pub asteroids: Vec<AsteroidView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            countdown_remaining_ms: match state.phase {
                GamePhase::Countdown => state.countdown_ms,
                _ => 0.0,
            },
            camera: state.camera.to_array(),
            viewport: state.viewport.size().to_array(),
            background_offset: state.background_offset,
            rocket: RocketView {
                x: state.rocket.pos.x,
                y: state.rocket.pos.y,
                angle: state.rocket.angle,
            },
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    x: a.pos.x,
                    y: a.pos.y,
                    size: a.size,
                    variant: a.variant,
                    cluster: a.cluster,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    x: p.pos.x,
                    y: p.pos.y,
                    angle: p.angle,
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    x: e.pos.x,
                    y: e.pos.y,
                    alpha: e.alpha(),
                })
                .collect(),
        }
    }

    pub fn try_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// JSON for the render boundary; logs and returns an empty string on failure
    pub fn to_json(&self) -> String {
        match self.try_to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Snapshot serialization failed: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::SimConfig;
    use crate::sim::state::{Explosion, Viewport};
    use crate::sim::tick::start_countdown;
    use glam::Vec2;

    #[test]
    fn test_capture() {
        let mut state = GameState::new(3, SimConfig::default(), Viewport::new(640.0, 480.0));
        start_countdown(&mut state);
        state.push_asteroid(Vec2::new(10.0, 20.0), true, 1);
        let mut explosion = Explosion::new(Vec2::new(1.0, 2.0));
        explosion.frame = 5;
        state.explosions.push(explosion);

        let snapshot = Snapshot::capture(&state);

        assert_eq!(snapshot.phase, GamePhase::Countdown);
        assert_eq!(snapshot.countdown_remaining_ms, state.config.countdown_ms);
        assert_eq!(snapshot.viewport, [640.0, 480.0]);
        assert_eq!(snapshot.asteroids.len(), 1);
        assert!(snapshot.asteroids[0].cluster);
        assert_eq!(snapshot.asteroids[0].variant, 1);
        assert!((snapshot.explosions[0].alpha - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new(3, SimConfig::default(), Viewport::default());
        let json = Snapshot::capture(&state).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Menu");
        assert_eq!(value["score"], 0);
        assert!(value["asteroids"].as_array().unwrap().is_empty());
        assert!(value["rocket"]["angle"].is_number());
    }

    #[test]
    fn test_json_matches_fallible_encoding() {
        let mut state = GameState::new(9, SimConfig::default(), Viewport::default());
        // Non-finite floats encode as null rather than failing
        state.rocket.angle = f32::NAN;
        let snapshot = Snapshot::capture(&state);

        let json = snapshot.try_to_json().unwrap();
        assert!(!json.is_empty());
        assert_eq!(snapshot.to_json(), json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["rocket"]["angle"].is_null());
        assert_eq!(value["viewport"], serde_json::json!([800.0, 600.0]));
    }
}
